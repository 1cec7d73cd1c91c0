use log::LevelFilter;

/// Initialize the logger with the specified level
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Format a duration in seconds as `HH:MM:SS.ssssss`.
pub fn humanize_time(secs: f64) -> String {
    let secs = secs.max(0.0);
    let whole = secs.trunc() as u64;
    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let seconds = secs - (hours * 3600 + minutes * 60) as f64;
    format!("{hours:02}:{minutes:02}:{seconds:09.6}")
}
