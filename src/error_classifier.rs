use crate::monitor::error::MonitorError;
use log::LevelFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Log level for a failed status poll. Polls repeat every tick, so
    /// transient transport trouble stays at warn.
    pub fn classify_poll_error(&self, error: &MonitorError) -> LogLevel {
        match error {
            MonitorError::Http { status, .. } if *status == 401 || *status == 403 => {
                LogLevel::Error
            }
            MonitorError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,
            MonitorError::Decode(_) => LogLevel::Error,
            MonitorError::Reqwest(_) => LogLevel::Warn,
            _ => LogLevel::Warn,
        }
    }

    /// Log level for a failed add/remove request.
    pub fn classify_mutation_error(&self, error: &MonitorError) -> LogLevel {
        match error {
            // The backend refused the change and said why; nothing is broken.
            MonitorError::Rejected { .. } => LogLevel::Warn,
            MonitorError::Http { status, .. } if *status == 404 => LogLevel::Warn,
            MonitorError::Decode(_) => LogLevel::Error,
            _ => LogLevel::Error,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
