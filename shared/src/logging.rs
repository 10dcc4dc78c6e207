use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Trace => write!(f, "TRACE"),
        }
    }
}

impl From<&str> for LogLevel {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "warn" => LogLevel::Warn,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }
}

/// ログカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    System,
    Config,
    Transport,
    Grpc,
    Analysis,
    Display,
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogCategory::System => write!(f, "SYSTEM"),
            LogCategory::Config => write!(f, "CONFIG"),
            LogCategory::Transport => write!(f, "TRANSPORT"),
            LogCategory::Grpc => write!(f, "GRPC"),
            LogCategory::Analysis => write!(f, "ANALYSIS"),
            LogCategory::Display => write!(f, "DISPLAY"),
        }
    }
}

/// グローバルログレベル（既定はWARN：表出力を汚さない）
static GLOBAL_LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Warn as u8);

/// ログメッセージの出力先
static LOG_OUTPUT: OnceLock<Box<dyn Fn(&str) + Send + Sync>> = OnceLock::new();

/// ログレベルを設定
pub fn set_log_level(level: LogLevel) {
    GLOBAL_LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// 現在のログレベルを取得
pub fn get_log_level() -> LogLevel {
    match GLOBAL_LOG_LEVEL.load(Ordering::Relaxed) {
        0 => LogLevel::Error,
        1 => LogLevel::Warn,
        2 => LogLevel::Info,
        3 => LogLevel::Debug,
        4 => LogLevel::Trace,
        _ => LogLevel::Warn,
    }
}

/// ログ出力先を設定（最初の1回のみ有効）
pub fn set_log_output<F>(output: F)
where
    F: Fn(&str) + Send + Sync + 'static,
{
    let _ = LOG_OUTPUT.set(Box::new(output));
}

/// ログ行のフォーマット
pub fn format_log_line(level: LogLevel, category: LogCategory, message: &str) -> String {
    let timestamp = chrono::Utc::now().format("%H:%M:%S%.3f");
    format!("[{timestamp}] [{level}] [{category}] {message}")
}

/// ログメッセージの出力
pub fn log_message(level: LogLevel, category: LogCategory, message: &str) {
    if level > get_log_level() {
        return;
    }

    let formatted = format_log_line(level, category, message);

    if let Some(output) = LOG_OUTPUT.get() {
        output(&formatted);
    } else {
        // 表はstdoutに出すので、ログは常にstderr
        eprintln!("{formatted}");
    }
}

/// ログマクロ
#[macro_export]
macro_rules! log_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::logging::log_message(
            $crate::logging::LogLevel::Error,
            $category,
            &format!($($arg)*)
        );
    };
}

#[macro_export]
macro_rules! log_warn {
    ($category:expr, $($arg:tt)*) => {
        $crate::logging::log_message(
            $crate::logging::LogLevel::Warn,
            $category,
            &format!($($arg)*)
        );
    };
}

#[macro_export]
macro_rules! log_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::logging::log_message(
            $crate::logging::LogLevel::Info,
            $category,
            &format!($($arg)*)
        );
    };
}

#[macro_export]
macro_rules! log_debug {
    ($category:expr, $($arg:tt)*) => {
        $crate::logging::log_message(
            $crate::logging::LogLevel::Debug,
            $category,
            &format!($($arg)*)
        );
    };
}

#[macro_export]
macro_rules! log_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::logging::log_message(
            $crate::logging::LogLevel::Trace,
            $category,
            &format!($($arg)*)
        );
    };
}

/// 便利なマクロ - よく使うカテゴリ別
#[macro_export]
macro_rules! log_system {
    ($level:ident, $($arg:tt)*) => {
        $crate::paste::paste! {
            $crate::[<log_ $level>]!($crate::logging::LogCategory::System, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_config {
    ($level:ident, $($arg:tt)*) => {
        $crate::paste::paste! {
            $crate::[<log_ $level>]!($crate::logging::LogCategory::Config, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_transport {
    ($level:ident, $($arg:tt)*) => {
        $crate::paste::paste! {
            $crate::[<log_ $level>]!($crate::logging::LogCategory::Transport, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_grpc {
    ($level:ident, $($arg:tt)*) => {
        $crate::paste::paste! {
            $crate::[<log_ $level>]!($crate::logging::LogCategory::Grpc, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_analysis {
    ($level:ident, $($arg:tt)*) => {
        $crate::paste::paste! {
            $crate::[<log_ $level>]!($crate::logging::LogCategory::Analysis, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_display {
    ($level:ident, $($arg:tt)*) => {
        $crate::paste::paste! {
            $crate::[<log_ $level>]!($crate::logging::LogCategory::Display, $($arg)*);
        }
    };
}
