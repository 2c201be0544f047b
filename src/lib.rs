//! glyph_split - 字体模型拆分工具
//!
//! 将一个包含多个命名对象的 OBJ 字体模型拆分为每个字形一个文件，
//! 并把每个字形的面索引重新编号为从 1 开始，使其可以独立加载。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `geometry`: OBJ 记录分类、分段、索引重定位与校验
//! - `split`: 拆分器，负责输出目录策略与写出
//!
//! # 使用示例
//!
//! ```no_run
//! use glyph_split::core::config::SplitConfig;
//! use glyph_split::split::{Splitter, SplitOutcome};
//!
//! let splitter = Splitter::new(SplitConfig::default());
//! match splitter.run()? {
//!     SplitOutcome::Split(report) => println!("{} glyphs", report.glyphs.len()),
//!     SplitOutcome::AlreadyDone(dir) => println!("{} already exists", dir.display()),
//! }
//! # Ok::<(), glyph_split::core::GlyphSplitError>(())
//! ```

pub mod core;
pub mod geometry;
pub mod split;

#[cfg(test)]
mod testing;
