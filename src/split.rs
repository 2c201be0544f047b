//! 字形拆分器
//!
//! 读取整个字体模型，按对象分段并重定位面索引，
//! 然后为每个字形写出一个独立的 OBJ 文件（`33.obj`、`34.obj`……）。
//!
//! 输出目录已存在时视为已经拆分过，不做任何写入。
//! 所有段都在内存中重定位成功之后才开始写文件；
//! 任何失败都会删除本次新建的输出目录。

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::config::SplitConfig;
use crate::core::error::{GlyphSplitError, Result};
use crate::geometry::rebase::{rebase_segments, IndexOffsets, SegmentCounts};
use crate::geometry::segment::segment_document;
use crate::geometry::verify::verify_glyph;
use crate::{split_info, split_warn};

/// 最后一个可打印 ASCII 字符 `'~'`
const LAST_PRINTABLE: u32 = 126;

/// 单个字形的摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSummary {
    /// 文件编号，同时也是字符码
    pub id: u32,

    /// 源文件中的对象名
    pub name: String,

    /// 写出的记录数量
    pub counts: SegmentCounts,

    /// 输出文件路径
    pub path: PathBuf,
}

impl GlyphSummary {
    /// 编号对应的可打印字符
    pub fn character(&self) -> Option<char> {
        glyph_char(self.id)
    }
}

/// 一次拆分的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    pub glyphs: Vec<GlyphSummary>,
}

impl SplitReport {
    /// 所有字形的顶点/UV/法线总数
    pub fn totals(&self) -> IndexOffsets {
        self.glyphs
            .iter()
            .fold(IndexOffsets::default(), |acc, glyph| acc.advance(&glyph.counts))
    }
}

/// 拆分结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome {
    /// 完成拆分
    Split(SplitReport),

    /// 输出目录已存在，未做任何处理
    AlreadyDone(PathBuf),
}

/// 编号对应的可打印字符（33..=126）
pub fn glyph_char(id: u32) -> Option<char> {
    if (33..=LAST_PRINTABLE).contains(&id) {
        char::from_u32(id)
    } else {
        None
    }
}

/// 字形拆分器
#[derive(Debug, Clone)]
pub struct Splitter {
    config: SplitConfig,
}

impl Splitter {
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// 第 `index` 个段的输出路径
    pub fn glyph_path(&self, index: usize) -> PathBuf {
        let id = self.config.first_id + index as u32;
        self.config
            .output_dir
            .join(format!("{}.{}", id, self.config.extension))
    }

    /// 执行拆分
    ///
    /// 新建的输出目录只有在拆分成功后才会保留；
    /// 之后任何一步失败都会删除它，使修正输入后可以重新运行。
    ///
    /// # 错误
    ///
    /// - 源文件不存在或无法读取
    /// - 输出目录创建失败（已存在除外）
    /// - 面引用了其他段的几何数据，或引用格式不是 `v/vt/vn`
    /// - 写出或校验失败
    pub fn run(&self) -> Result<SplitOutcome> {
        let source = &self.config.source;
        let output_dir = &self.config.output_dir;

        if !source.exists() {
            return Err(GlyphSplitError::SourceNotFound(source.clone()));
        }

        if !create_output_dir(output_dir)? {
            split_info!(dir = %output_dir.display(), "Font files already exist, exiting");
            return Ok(SplitOutcome::AlreadyDone(output_dir.clone()));
        }

        match self.split_into_output() {
            Ok(report) => Ok(SplitOutcome::Split(report)),
            Err(e) => {
                if let Err(cleanup) = fs::remove_dir_all(output_dir) {
                    split_warn!(
                        dir = %output_dir.display(),
                        "Failed to remove incomplete output: {}",
                        cleanup
                    );
                }
                Err(e)
            }
        }
    }

    /// 读取、重定位并写出所有字形，输出目录已由调用方创建
    fn split_into_output(&self) -> Result<SplitReport> {
        let source = &self.config.source;
        let contents = fs::read_to_string(source)?;
        let segments = segment_document(&contents);

        split_info!(
            source = %source.display(),
            segments = segments.len(),
            "Generating font"
        );

        let rebased = rebase_segments(&segments)?;
        let total = rebased.len();

        let mut report = SplitReport::default();
        for (i, segment) in rebased.into_iter().enumerate() {
            let path = self.glyph_path(i);
            fs::write(&path, &segment.text)?;

            if self.config.verify_output {
                verify_glyph(&path, &segment.counts)?;
            }

            let glyph = GlyphSummary {
                id: self.config.first_id + i as u32,
                name: segment.name,
                counts: segment.counts,
                path,
            };

            match glyph.character() {
                Some(c) => split_info!(
                    "Processing: [{}/{}] {} '{}' {}",
                    i + 1,
                    total,
                    glyph.id,
                    c,
                    glyph.name
                ),
                None => split_warn!(
                    "Processing: [{}/{}] {} has no printable character ({})",
                    i + 1,
                    total,
                    glyph.id,
                    glyph.name
                ),
            }

            report.glyphs.push(glyph);
        }

        let totals = report.totals();
        split_info!(
            glyphs = report.glyphs.len(),
            vertices = totals.vertices,
            uvs = totals.uvs,
            normals = totals.normals,
            "Done"
        );

        Ok(report)
    }
}

/// 创建输出目录
///
/// 返回 `false` 表示目录已存在。其它失败都视为致命错误。
fn create_output_dir(dir: &Path) -> Result<bool> {
    match fs::create_dir(dir) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.into()),
    }
}
