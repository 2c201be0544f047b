//! 核心功能模块
//!
//! 提供日志系统、配置管理和错误处理，与具体的几何处理逻辑解耦。
//!
//! - `log`：日志系统，基于 tracing
//! - `config`：配置管理，支持配置文件与命令行覆盖
//! - `error`：错误处理，定义统一的错误类型

pub mod log;
pub mod config;
pub mod error;

pub use error::{Result, GlyphSplitError};
pub use config::Config;
