//! Vlogger CLI
//!
//! Command-line interface for inspecting the rotating vehicle log on disk.
//!
//! # Usage
//!
//! ```bash
//! vlogger --help
//! vlogger segments
//! vlogger segments --json
//! vlogger tail --lines 20
//! ```

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::config::DEFAULT_LOG_PATH;
use shared::rotation::retired_segments;
use std::fs;
use std::path::{Path, PathBuf};

/// Vlogger CLI - vehicle log inspection
#[derive(Parser)]
#[command(name = "vlogger")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base path of the active log segment
    #[arg(short, long, env = "VLOGGER_LOG_PATH", default_value = DEFAULT_LOG_PATH)]
    log_path: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the active segment and the retired segments on disk
    Segments {
        /// Print machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the last lines of the active segment
    Tail {
        /// Number of lines to print
        #[arg(short = 'n', long, default_value_t = 10)]
        lines: usize,
    },
}

/// One segment as reported by `vlogger segments`.
#[derive(Debug, Serialize)]
struct SegmentInfo {
    path: PathBuf,
    active: bool,
    size_bytes: u64,
    modified: Option<DateTime<Local>>,
}

impl SegmentInfo {
    fn from_path(path: &Path, active: bool) -> Result<Self> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Cannot stat segment '{}'", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            active,
            size_bytes: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::from),
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Segments { json }) => {
            let segments = collect_segments(&cli.log_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&segments)?);
            } else {
                print_segments(&segments);
            }
        }
        Some(Commands::Tail { lines }) => {
            for line in tail_lines(&cli.log_path, lines)? {
                println!("{line}");
            }
        }
        None => {
            println!("Vlogger CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Gathers the active segment (if present) followed by the retired
/// segments, oldest first.
fn collect_segments(log_path: &Path) -> Result<Vec<SegmentInfo>> {
    let mut segments = Vec::new();
    if log_path.exists() {
        segments.push(SegmentInfo::from_path(log_path, true)?);
    }
    for path in retired_segments(log_path)
        .with_context(|| format!("Cannot read log directory of '{}'", log_path.display()))?
    {
        segments.push(SegmentInfo::from_path(&path, false)?);
    }
    Ok(segments)
}

fn print_segments(segments: &[SegmentInfo]) {
    if segments.is_empty() {
        println!("No segments found");
        return;
    }
    for segment in segments {
        let marker = if segment.active { "active " } else { "retired" };
        let modified = segment
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{marker}  {:>10} B  {modified}  {}",
            segment.size_bytes,
            segment.path.display()
        );
    }
}

/// Returns the last `count` lines of the active segment.
fn tail_lines(log_path: &Path, count: usize) -> Result<Vec<String>> {
    let content = fs::read_to_string(log_path)
        .with_context(|| format!("Cannot read log file '{}'", log_path.display()))?;
    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(count);
    Ok(lines[start..].iter().map(ToString::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parse() {
        // Verify CLI can parse without arguments
        let cli = Cli::try_parse_from(["vlogger"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_segments_command() {
        let cli = Cli::try_parse_from(["vlogger", "segments", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Segments { json: true })));
    }

    #[test]
    fn test_cli_tail_command_default_lines() {
        let cli = Cli::try_parse_from(["vlogger", "tail"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Tail { lines: 10 })));
    }

    #[test]
    fn test_collect_segments_orders_active_first() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("vehicle");
        fs::write(&base, "active\n").unwrap();
        fs::write(dir.path().join("vehicle.2024-01-15_10-30-00"), "old\n").unwrap();
        fs::write(dir.path().join("vehicle.2024-01-15_10-31-00"), "newer\n").unwrap();

        let segments = collect_segments(&base).unwrap();
        assert_eq!(segments.len(), 3);
        assert!(segments[0].active);
        assert!(!segments[1].active);
        assert!(segments[1].path < segments[2].path);
    }

    #[test]
    fn test_collect_segments_without_active_file() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("vehicle");
        fs::write(dir.path().join("vehicle.2024-01-15_10-30-00"), "old\n").unwrap();

        let segments = collect_segments(&base).unwrap();
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].active);
    }

    #[test]
    fn test_tail_lines_returns_last_n() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("vehicle");
        fs::write(&base, "one\ntwo\nthree\nfour\n").unwrap();

        assert_eq!(tail_lines(&base, 2).unwrap(), vec!["three", "four"]);
        assert_eq!(tail_lines(&base, 10).unwrap().len(), 4);
    }
}
