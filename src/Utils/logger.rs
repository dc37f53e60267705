use chrono::Local;
use simplelog::*;
use std::fs::File;

/// "debug", "info", "warn", "error" or "off" -> LevelFilter
pub fn parse_loglevel(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" => Some(LevelFilter::Off),
        _ => None,
    }
}

/// name of the log file for a run started now, like log_2024-05-01_12-30-00.txt
pub fn log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Terminal logger plus, optionally, a file logger. Unknown levels fall back to info.
/// Returns false if a global logger was already installed.
pub fn init_logger(loglevel: &str, log_to_file: bool) -> bool {
    let level = parse_loglevel(loglevel).unwrap_or(LevelFilter::Info);
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));
    if log_to_file {
        let name = log_file_name();
        match File::create(&name) {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(e) => eprintln!("cannot create log file {}: {}", name, e),
        }
    }
    CombinedLogger::init(loggers).is_ok()
}
