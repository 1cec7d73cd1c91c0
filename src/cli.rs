use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Progress messages
    Info,
    /// Configuration and scene details
    Debug,
    /// Per-sample events
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
///
/// Every option left unset keeps the value from the config file.
#[derive(Parser, Debug)]
#[command(name = "skytrace")]
#[command(about = "A toon-shading ray tracer with an atmospheric sky")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
pub struct Args {
    /// RON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the effective config to this file and exit
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Output file path (.png, or .jpg/.jpeg)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Vertical jitter strata per pixel
    #[arg(long)]
    pub v_samples: Option<u32>,

    /// Horizontal jitter strata per pixel
    #[arg(long)]
    pub h_samples: Option<u32>,

    /// One centered ray per pixel, no anti-aliasing
    #[arg(short, long)]
    pub debug: bool,

    /// Fill missed rays with the atmospheric sky
    #[arg(long)]
    pub sky: bool,

    /// Base seed for the jitter and sky samples
    #[arg(long)]
    pub seed: Option<u64>,

    /// JPEG quality
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_leave_config_untouched() {
        let args = Args::parse_from(["skytrace"]);
        assert_eq!(args.debug_level, LogLevel::Info);
        assert!(args.width.is_none());
        assert!(args.output.is_none());
        assert!(!args.debug);
        assert!(!args.sky);
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "skytrace",
            "-d",
            "--sky",
            "--width",
            "64",
            "--v-samples",
            "2",
            "--seed",
            "9",
            "--debug-level",
            "trace",
            "-o",
            "out.png",
        ]);
        assert!(args.debug);
        assert!(args.sky);
        assert_eq!(args.width, Some(64));
        assert_eq!(args.v_samples, Some(2));
        assert_eq!(args.seed, Some(9));
        assert_eq!(LevelFilter::from(args.debug_level), LevelFilter::Trace);
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn test_quality_range_checked() {
        assert!(Args::try_parse_from(["skytrace", "--quality", "0"]).is_err());
        assert!(Args::try_parse_from(["skytrace", "--quality", "101"]).is_err());
        assert_eq!(
            Args::try_parse_from(["skytrace", "--quality", "80"]).unwrap().quality,
            Some(80)
        );
    }
}
