//! 错误处理模块
//!
//! 定义了拆分流程中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息（段序号、行号、原始索引）
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理

use std::fmt;
use std::path::PathBuf;

/// 统一的 Result 类型
pub type Result<T> = std::result::Result<T, GlyphSplitError>;

/// glyph_split 的错误类型
#[derive(Debug)]
pub enum GlyphSplitError {
    /// 配置错误
    Config(ConfigError),

    /// 源文件不存在
    SourceNotFound(PathBuf),

    /// OBJ 记录解析错误
    Parse(ObjParseError),

    /// 面索引重定位失败
    Rebase(RebaseError),

    /// 输出校验失败
    Verify(MeshLoadError),

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 面记录解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjParseError {
    /// 段序号（从 0 开始）
    pub segment: usize,
    /// 段内行号（从 1 开始）
    pub line: usize,
    /// 无法解析的引用文本
    pub reference: String,
}

/// 索引分量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexComponent {
    Vertex,
    Uv,
    Normal,
}

/// 面索引减去偏移后小于 1
///
/// 说明该面引用了其他段中的几何数据，输入不合法。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseError {
    pub segment: usize,
    pub component: IndexComponent,
    /// 源文件中的全局索引
    pub index: i64,
    /// 之前所有段累计的偏移
    pub offset: usize,
}

/// 网格重新加载校验的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 外部库解析失败
    ExternalLibraryError(String),

    /// 数据验证失败
    ValidationError(String),
}

impl fmt::Display for GlyphSplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphSplitError::Config(e) => write!(f, "Configuration error: {}", e),
            GlyphSplitError::SourceNotFound(path) => {
                write!(f, "Source model not found: {}", path.display())
            }
            GlyphSplitError::Parse(e) => write!(f, "Parse error: {}", e),
            GlyphSplitError::Rebase(e) => write!(f, "Index rebase error: {}", e),
            GlyphSplitError::Verify(e) => write!(f, "Output verification error: {}", e),
            GlyphSplitError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for ObjParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "segment {} line {}: expected v/vt/vn integer triple, got '{}'",
            self.segment, self.line, self.reference
        )
    }
}

impl fmt::Display for IndexComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexComponent::Vertex => "vertex",
            IndexComponent::Uv => "uv",
            IndexComponent::Normal => "normal",
        };
        f.write_str(name)
    }
}

impl fmt::Display for RebaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "segment {} references {} index {} which lies before its offset {}",
            self.segment, self.component, self.index, self.offset
        )
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::ExternalLibraryError(msg) => write!(f, "External library error: {}", msg),
            MeshLoadError::ValidationError(msg) => write!(f, "Mesh validation failed: {}", msg),
        }
    }
}

impl std::error::Error for GlyphSplitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GlyphSplitError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for ObjParseError {}
impl std::error::Error for RebaseError {}
impl std::error::Error for MeshLoadError {}

impl From<std::io::Error> for GlyphSplitError {
    fn from(err: std::io::Error) -> Self {
        GlyphSplitError::Io(err)
    }
}

impl From<ConfigError> for GlyphSplitError {
    fn from(err: ConfigError) -> Self {
        GlyphSplitError::Config(err)
    }
}

impl From<ObjParseError> for GlyphSplitError {
    fn from(err: ObjParseError) -> Self {
        GlyphSplitError::Parse(err)
    }
}

impl From<RebaseError> for GlyphSplitError {
    fn from(err: RebaseError) -> Self {
        GlyphSplitError::Rebase(err)
    }
}

impl From<MeshLoadError> for GlyphSplitError {
    fn from(err: MeshLoadError) -> Self {
        GlyphSplitError::Verify(err)
    }
}
