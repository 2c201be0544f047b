//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//!
//! # 使用示例
//!
//! ```no_run
//! use glyph_split::core::{log, config::LogLevel};
//!
//! log::init_logger(LogLevel::Info, false, None);
//! tracing::info!(glyphs = 94, "Font split");
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use std::path::Path;

use super::config::LogLevel;

/// 初始化日志系统
///
/// 必须在程序开始时调用一次。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否同时输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "glyph_split.log"）
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) {
    let filter = EnvFilter::new(level.as_filter());

    if file_output {
        let log_path = log_file_path.unwrap_or("glyph_split.log");
        let path = Path::new(log_path);
        let directory = path.parent().unwrap_or(Path::new("."));
        let filename = path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("glyph_split.log");

        // 每天滚动
        let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, filename);

        let console_layer = fmt::layer()
            .with_target(false)
            .with_ansi(true);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    } else {
        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// 拆分流程日志 - Info 级别
#[macro_export]
macro_rules! split_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "glyph_split::split", $($arg)*)
    };
}

/// 拆分流程日志 - Warn 级别
#[macro_export]
macro_rules! split_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "glyph_split::split", $($arg)*)
    };
}

impl LogLevel {
    /// `EnvFilter` 使用的指令字符串
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
