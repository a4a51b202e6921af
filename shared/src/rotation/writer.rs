//! Rotating file writer.
//!
//! `RotatingFileWriter` keeps exactly one active segment open for appends.
//! Every write first checks the active segment's age; once it reaches the
//! configured interval the segment is closed, renamed with a timestamp
//! suffix into the retired set, a fresh segment is opened and the oldest
//! retired segments beyond the retention window are deleted. Rotation is a
//! synchronous, non-overlapping step executed inline before the write.
//!
//! Rotation only triggers on a write: an idle writer keeps its segment open
//! indefinitely, even past its nominal age.

use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// Timestamp suffix appended to retired segments.
///
/// Lexicographic order of this format matches chronological order, so the
/// retired set can be sorted by file name alone.
const SEGMENT_SUFFIX_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// A file writer that rotates its output by wall-clock age.
///
/// # Example
///
/// ```no_run
/// use shared::rotation::RotatingFileWriter;
/// use std::time::Duration;
///
/// let mut writer =
///     RotatingFileWriter::open("./log/vehicle", Duration::from_secs(60), 5)?;
/// writer.write_line("2024-01-15 10:30:00.000 [logger]- speed : 42.5")?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct RotatingFileWriter {
    base_path: PathBuf,
    interval: Duration,
    backup_count: usize,
    file: File,
    opened_at: Instant,
    opened_wall: DateTime<Local>,
}

impl RotatingFileWriter {
    /// Opens (or creates) the active segment at `base_path`.
    ///
    /// Parent directories are created as needed. The segment is opened in
    /// append mode, so restarting on an existing file continues it rather
    /// than truncating. A reopened segment inherits its age from the file's
    /// modified time, so a stale segment from a previous run rotates on the
    /// first write after reopen instead of growing forever across restarts.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created or
    /// opened (e.g. permission denied). This is fatal to the writer and is
    /// surfaced to the caller without retry.
    pub fn open(
        base_path: impl Into<PathBuf>,
        interval: Duration,
        backup_count: usize,
    ) -> io::Result<Self> {
        let base_path = base_path.into();
        if let Some(dir) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = Self::open_segment(&base_path)?;
        let (opened_at, opened_wall) = Self::segment_origin(&file);
        Ok(Self {
            base_path,
            interval,
            backup_count,
            file,
            opened_at,
            opened_wall,
        })
    }

    /// Determines when the segment behind `file` started.
    ///
    /// For a freshly created file the modified time is "now"; for an
    /// existing file it is the last write of the previous run, which is
    /// where the rotation interval continues counting from. Falls back to
    /// "now" on platforms without modified-time support.
    fn segment_origin(file: &File) -> (Instant, DateTime<Local>) {
        let now = Instant::now();
        match file.metadata().and_then(|m| m.modified()) {
            Ok(modified) => {
                let age = SystemTime::now()
                    .duration_since(modified)
                    .unwrap_or_default();
                (now.checked_sub(age).unwrap_or(now), DateTime::from(modified))
            }
            Err(_) => (now, Local::now()),
        }
    }

    /// Appends one line to the active segment, rotating first if the
    /// segment's age has reached the interval.
    ///
    /// The line is written atomically with respect to other operations on
    /// this writer and flushed before returning, so a line is either fully
    /// on disk in one segment or not written at all.
    ///
    /// # Errors
    ///
    /// Returns an error if rotation or the write fails.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        if self.opened_at.elapsed() >= self.interval {
            self.rotate()?;
        }
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.file.flush()
    }

    /// Returns the age of the active segment.
    #[must_use]
    pub fn active_age(&self) -> Duration {
        self.opened_at.elapsed()
    }

    /// Returns the base path of the active segment.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the retired segments belonging to this writer, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the log directory cannot be read.
    pub fn retired(&self) -> io::Result<Vec<PathBuf>> {
        retired_segments(&self.base_path)
    }

    /// Closes the active segment, moves it into the retired set, opens a
    /// fresh segment and prunes retired segments beyond the retention
    /// window (oldest first, strict FIFO by segment name).
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let target = self.retired_target()?;
        fs::rename(&self.base_path, &target)?;

        self.file = Self::open_segment(&self.base_path)?;
        self.opened_at = Instant::now();
        self.opened_wall = Local::now();

        self.prune()
    }

    /// Picks a non-existing retired path for the segment being closed,
    /// stamped with the time it was opened.
    ///
    /// Two rotations within the same second would collide on the timestamp
    /// alone; a zero-padded counter disambiguates while keeping the
    /// name sort (and with it FIFO eviction) chronological.
    fn retired_target(&self) -> io::Result<PathBuf> {
        let stamp = self.opened_wall.format(SEGMENT_SUFFIX_FORMAT);
        let mut candidate = self.with_suffix(&stamp.to_string());
        let mut counter = 1;
        while candidate.exists() {
            candidate = self.with_suffix(&format!("{stamp}.{counter:03}"));
            counter += 1;
            if counter > 999 {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "Could not find a free retired segment name",
                ));
            }
        }
        Ok(candidate)
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .base_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(suffix);
        self.base_path.with_file_name(name)
    }

    /// Deletes the oldest retired segments beyond the backup count.
    fn prune(&self) -> io::Result<()> {
        let retired = self.retired()?;
        if retired.len() <= self.backup_count {
            return Ok(());
        }
        let excess = retired.len() - self.backup_count;
        for path in &retired[..excess] {
            tracing::debug!(path = %path.display(), "Deleting expired log segment");
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn open_segment(path: &Path) -> io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }
}

/// Lists the retired segments for the given base path, oldest first.
///
/// A retired segment is any file in the base path's directory named
/// `<base file name>.<suffix>`. Suffixes sort lexicographically in
/// chronological order, so the result is sorted by file name.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn retired_segments(base_path: &Path) -> io::Result<Vec<PathBuf>> {
    let dir = match base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => dir,
        None => Path::new("."),
    };
    let Some(base_name) = base_path.file_name().and_then(|n| n.to_str()) else {
        return Ok(Vec::new());
    };
    let prefix = format!("{base_name}.");

    let mut segments = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(&prefix) && name.len() > prefix.len() {
            segments.push(entry.path());
        }
    }
    segments.sort();
    Ok(segments)
}
