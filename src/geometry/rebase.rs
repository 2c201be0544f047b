/// 面索引重定位
///
/// OBJ 的面索引在整个文件内全局编号。把一个段单独写成文件时，
/// 需要减去之前所有段累计写出的顶点/UV/法线数量，使该段的索引从 1 开始。
///
/// 累计偏移用不可变的 [`IndexOffsets`] 在折叠中逐段传递，
/// 每处理完一段返回新的偏移值。
use super::record::{face_references, format_face, FaceVertex, RecordKind};
use super::segment::Segment;
use crate::core::error::{IndexComponent, ObjParseError, RebaseError, Result};

/// 之前所有段累计写出的记录数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexOffsets {
    pub vertices: usize,
    pub uvs: usize,
    pub normals: usize,
}

impl IndexOffsets {
    /// 加上一个段的本地计数，得到下一段的偏移
    #[must_use]
    pub fn advance(self, counts: &SegmentCounts) -> Self {
        Self {
            vertices: self.vertices + counts.vertices,
            uvs: self.uvs + counts.uvs,
            normals: self.normals + counts.normals,
        }
    }

    fn get(&self, component: IndexComponent) -> usize {
        match component {
            IndexComponent::Vertex => self.vertices,
            IndexComponent::Uv => self.uvs,
            IndexComponent::Normal => self.normals,
        }
    }
}

/// 一个段内各类记录的数量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentCounts {
    pub vertices: usize,
    pub uvs: usize,
    pub normals: usize,
    pub faces: usize,
}

/// 重定位后的段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebasedSegment {
    /// 对象名
    pub name: String,

    /// 本段记录计数
    pub counts: SegmentCounts,

    /// 输出文本，每行以 `\n` 结尾
    pub text: String,
}

/// 重定位单个引用
fn rebase_vertex(
    fv: FaceVertex,
    offsets: &IndexOffsets,
    segment: usize,
) -> std::result::Result<FaceVertex, RebaseError> {
    let shift = |component: IndexComponent| {
        let index = fv.get(component);
        let offset = offsets.get(component);
        index
            .checked_sub(offset as i64)
            .filter(|rebased| *rebased >= 1)
            .ok_or(RebaseError { segment, component, index, offset })
    };

    Ok(FaceVertex {
        vertex: shift(IndexComponent::Vertex)?,
        uv: shift(IndexComponent::Uv)?,
        normal: shift(IndexComponent::Normal)?,
    })
}

/// 重定位一个段
///
/// `index` 为段序号，仅用于错误信息。
/// 顶点/UV/法线行原样复制，面行重写索引，其它记录丢弃。
pub fn rebase_segment(
    segment: &Segment<'_>,
    index: usize,
    offsets: IndexOffsets,
) -> Result<RebasedSegment> {
    let mut counts = SegmentCounts::default();
    let mut text = String::new();

    for (line_no, line) in segment.lines.iter().enumerate() {
        match RecordKind::classify(line) {
            RecordKind::Vertex => counts.vertices += 1,
            RecordKind::TexCoord => counts.uvs += 1,
            RecordKind::Normal => counts.normals += 1,
            RecordKind::Face => {
                let mut vertices = Vec::new();
                for reference in face_references(line) {
                    let fv = FaceVertex::parse(reference).ok_or_else(|| ObjParseError {
                        segment: index,
                        line: line_no + 1,
                        reference: reference.to_string(),
                    })?;
                    vertices.push(rebase_vertex(fv, &offsets, index)?);
                }
                counts.faces += 1;
                text.push_str(&format_face(&vertices));
                text.push('\n');
                continue;
            }
            RecordKind::Other => continue,
        }
        text.push_str(line);
        text.push('\n');
    }

    Ok(RebasedSegment {
        name: segment.name.to_string(),
        counts,
        text,
    })
}

/// 按源顺序重定位所有段
///
/// 任意一段失败即整体失败，不返回部分结果。
pub fn rebase_segments(segments: &[Segment<'_>]) -> Result<Vec<RebasedSegment>> {
    let (rebased, _) = segments.iter().enumerate().try_fold(
        (Vec::with_capacity(segments.len()), IndexOffsets::default()),
        |(mut out, offsets), (i, segment)| {
            let seg = rebase_segment(segment, i, offsets)?;
            let next = offsets.advance(&seg.counts);
            out.push(seg);
            Ok::<_, crate::core::error::GlyphSplitError>((out, next))
        },
    )?;
    Ok(rebased)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GlyphSplitError;
    use crate::geometry::segment::segment_document;

    const TWO_GLYPHS: &str = "\
o First
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vn 0 0 1
s off
f 1/1/1 2/1/1 3/1/1
o Second
v 0 0 1
v 1 0 1
v 0 1 1
vt 1 1
vt 0 1
vn 0 1 0
f 4/2/2 5/3/2 6/2/2
";

    #[test]
    fn test_offsets_advance() {
        let counts = SegmentCounts { vertices: 3, uvs: 1, normals: 2, faces: 1 };
        let next = IndexOffsets::default().advance(&counts).advance(&counts);
        assert_eq!(next, IndexOffsets { vertices: 6, uvs: 2, normals: 4 });
    }

    #[test]
    fn test_second_segment_rebased() {
        let segments = segment_document(TWO_GLYPHS);
        let rebased = rebase_segments(&segments).unwrap();
        assert_eq!(rebased.len(), 2);

        assert_eq!(rebased[0].name, "First");
        assert!(rebased[0].text.contains("f 1/1/1 2/1/1 3/1/1\n"));
        assert!(!rebased[0].text.contains("s off"));

        // 4 - 3 = 1
        assert!(rebased[1].text.ends_with("f 1/1/1 2/2/1 3/1/1\n"));
        assert_eq!(
            rebased[1].counts,
            SegmentCounts { vertices: 3, uvs: 2, normals: 1, faces: 1 }
        );
    }

    #[test]
    fn test_geometry_lines_copied_verbatim() {
        let segments = segment_document("o A\nv 0.125 -1.5 2\nvt 0.5 0.25\n");
        let rebased = rebase_segments(&segments).unwrap();
        assert_eq!(rebased[0].text, "v 0.125 -1.5 2\nvt 0.5 0.25\n");
    }

    #[test]
    fn test_cross_segment_reference_is_fatal() {
        let src = "o A\nv 0 0 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 1/1/1 1/1/1\n\
                   o B\nv 1 1 1\nvt 1 1\nvn 0 1 0\nf 1/2/2 2/2/2 2/2/2\n";
        let segments = segment_document(src);
        let err = rebase_segments(&segments).unwrap_err();
        match err {
            GlyphSplitError::Rebase(e) => {
                assert_eq!(e.segment, 1);
                assert_eq!(e.component, IndexComponent::Vertex);
                assert_eq!(e.index, 1);
                assert_eq!(e.offset, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_index_is_fatal() {
        let segments = segment_document("o A\nv 0 0 0\nvt 0 0\nvn 0 0 1\nf -1/1/1 1/1/1 1/1/1\n");
        assert!(matches!(
            rebase_segments(&segments),
            Err(GlyphSplitError::Rebase(_))
        ));
    }

    #[test]
    fn test_extreme_negative_index_is_rebase_error() {
        let src = "o A\nv 0 0 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 1/1/1 1/1/1\n\
                   o B\nv 1 1 1\nvt 1 1\nvn 0 1 0\n\
                   f -9223372036854775808/2/2 2/2/2 2/2/2\n";
        let segments = segment_document(src);
        match rebase_segments(&segments) {
            Err(GlyphSplitError::Rebase(e)) => {
                assert_eq!(e.segment, 1);
                assert_eq!(e.component, IndexComponent::Vertex);
                assert_eq!(e.index, i64::MIN);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_reference_is_parse_error() {
        let segments = segment_document("o A\nv 0 0 0\nvn 0 0 1\nf 1//1 1//1 1//1\n");
        match rebase_segments(&segments) {
            Err(GlyphSplitError::Parse(e)) => {
                assert_eq!(e.segment, 0);
                assert_eq!(e.line, 3);
                assert_eq!(e.reference, "1//1");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_counts_sum_to_source_totals() {
        let segments = segment_document(TWO_GLYPHS);
        let rebased = rebase_segments(&segments).unwrap();
        let total = rebased
            .iter()
            .fold(IndexOffsets::default(), |acc, seg| acc.advance(&seg.counts));

        let count = |prefix: &str| TWO_GLYPHS.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(total.vertices, count("v "));
        assert_eq!(total.uvs, count("vt "));
        assert_eq!(total.normals, count("vn "));
    }
}
