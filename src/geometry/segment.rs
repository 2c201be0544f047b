/// 源文档分段
///
/// 将整个 OBJ 文本按对象标记切分为若干段，每段对应一个字形。
use super::record::{is_object_marker, OBJECT_MARKER};

/// 一个对象段
///
/// 从对象标记行开始，到下一个标记行或文档末尾为止（不含标记行本身）。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment<'a> {
    /// 标记行后面的对象名（可能为空）
    pub name: &'a str,

    /// 段内的原始行，保持源顺序
    pub lines: Vec<&'a str>,
}

/// 按对象标记切分文档
///
/// 第一个标记之前的行没有所属的段，直接丢弃。
/// 没有任何标记的文档返回空列表。
///
/// # 示例
///
/// ```rust
/// use glyph_split::geometry::segment::segment_document;
///
/// let segments = segment_document("# header\no A\nv 0 0 0\no B\nv 1 1 1\n");
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].name, "A");
/// assert_eq!(segments[1].lines, vec!["v 1 1 1"]);
/// ```
pub fn segment_document(source: &str) -> Vec<Segment<'_>> {
    let mut segments: Vec<Segment<'_>> = Vec::new();

    for line in source.lines() {
        if is_object_marker(line) {
            segments.push(Segment {
                name: line[OBJECT_MARKER.len()..].trim(),
                lines: Vec::new(),
            });
        } else if let Some(current) = segments.last_mut() {
            current.lines.push(line);
        }
    }

    segments
}
