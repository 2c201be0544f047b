//! glyph_split 命令行入口
//!
//! ```bash
//! # 默认：读取 ./font.obj，写出到 ./font/
//! cargo run
//!
//! # 命令行覆盖
//! cargo run -- --source assets/font.obj --output assets/font
//! ```

use std::process::ExitCode;

use anyhow::Context;
use glyph_split::core::{log, Config};
use glyph_split::split::{SplitOutcome, Splitter};
use tracing::{error, info};

fn load_config() -> anyhow::Result<Config> {
    let args: Vec<String> = std::env::args().collect();
    let config_path = Config::config_path_from_args(&args);

    let mut config = Config::from_file_or_default(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    config.apply_args(&args);
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run(config: &Config) -> anyhow::Result<SplitOutcome> {
    let splitter = Splitter::new(config.split.clone());
    splitter
        .run()
        .with_context(|| format!("failed to split {}", config.split.source.display()))
}

fn main() -> ExitCode {
    // 1. 加载配置（在初始化日志之前）
    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // 2. 初始化日志系统
    let log_file = config
        .logging
        .file_output
        .then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!(version = env!("CARGO_PKG_VERSION"), "glyph_split starting");

    // 3. 拆分
    match run(&config) {
        Ok(SplitOutcome::Split(_)) | Ok(SplitOutcome::AlreadyDone(_)) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
