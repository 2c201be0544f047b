/// 几何处理模块
///
/// 针对 OBJ 文本格式的逐行处理：记录分类、按对象分段、面索引重定位，
/// 以及写出后的校验。
///
/// # 模块结构
///
/// - `record`: 行记录分类与面记录解析
/// - `segment`: 按对象标记切分源文档
/// - `rebase`: 累计偏移与面索引重定位
/// - `verify`: 使用 tobj 重新加载并校验输出
///
/// # 处理流程
///
/// ```text
/// font.obj (全文读入)
///     ↓
/// segment_document  →  Vec<Segment>
///     ↓
/// rebase_segments   →  Vec<RebasedSegment>
///     ↓
/// Splitter (写出 33.obj, 34.obj, ...)
/// ```

pub mod record;
pub mod segment;
pub mod rebase;
pub mod verify;

pub use record::{FaceVertex, RecordKind};
pub use segment::{segment_document, Segment};
pub use rebase::{rebase_segments, IndexOffsets, RebasedSegment, SegmentCounts};
