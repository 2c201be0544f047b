//! 配置管理模块
//!
//! 提供拆分配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//! 不提供配置文件时，所有字段取默认值，行为与固定流程一致。
//!
//! # 配置文件格式 (glyph_split.toml)
//!
//! ```toml
//! [split]
//! source = "font.obj"
//! output_dir = "font"
//! first_id = 33          # '!' 的 ASCII 码
//! extension = "obj"
//! verify_output = true
//!
//! [logging]
//! level = "info"         # trace, debug, info, warn, error
//! file_output = false
//! log_file = "glyph_split.log"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{ConfigError, Result};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "glyph_split.toml";

/// 顶层配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 拆分配置
    #[serde(default)]
    pub split: SplitConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 拆分配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// 源字体模型路径
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// 输出目录，已存在时视为已完成
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// 第一个字形的文件编号
    #[serde(default = "default_first_id")]
    pub first_id: u32,

    /// 输出文件扩展名（不含点号）
    #[serde(default = "default_extension")]
    pub extension: String,

    /// 写出后用 tobj 重新加载校验
    #[serde(default = "default_verify_output")]
    pub verify_output: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_source() -> PathBuf { PathBuf::from("font.obj") }
fn default_output_dir() -> PathBuf { PathBuf::from("font") }
fn default_first_id() -> u32 { 33 }
fn default_extension() -> String { "obj".to_string() }
fn default_verify_output() -> bool { true }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "glyph_split.log".to_string() }

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            output_dir: default_output_dir(),
            first_id: default_first_id(),
            extension: default_extension(),
            verify_output: default_verify_output(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    ///
    /// 文件存在但解析失败时返回错误，不会静默回退。
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// 从命令行参数中找出 `--config <path>`
    pub fn config_path_from_args<I>(args: I) -> PathBuf
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        args.iter()
            .position(|a| a == "--config")
            .and_then(|idx| args.get(idx + 1))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--source <path>`: 源模型路径
    /// - `--output <dir>`: 输出目录
    /// - `--no-verify`: 跳过输出校验
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if let Some(idx) = args.iter().position(|a| a == "--source") {
            if let Some(source) = args.get(idx + 1) {
                self.split.source = PathBuf::from(source);
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--output") {
            if let Some(output) = args.get(idx + 1) {
                self.split.output_dir = PathBuf::from(output);
            }
        }

        if args.iter().any(|a| a == "--no-verify") {
            self.split.verify_output = false;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.split.source.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "split.source".to_string(),
                reason: "Source path must not be empty".to_string(),
            }.into());
        }

        if self.split.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "split.output_dir".to_string(),
                reason: "Output directory must not be empty".to_string(),
            }.into());
        }

        let ext = &self.split.extension;
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            return Err(ConfigError::InvalidValue {
                field: "split.extension".to_string(),
                reason: "Extension must be a non-empty name without dots or separators".to_string(),
            }.into());
        }

        Ok(())
    }
}
