/// OBJ 行记录
///
/// 按行首标记对 OBJ 文本行分类，并提供面记录的解析与格式化。
/// 只关心拆分字形需要的记录类型：`o`、`v`、`vt`、`vn`、`f`。
use crate::core::error::IndexComponent;

/// 对象标记（新字形的开始）
pub const OBJECT_MARKER: &str = "o";

/// 行记录类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// 顶点位置 `v `
    Vertex,
    /// 纹理坐标 `vt `
    TexCoord,
    /// 法线 `vn `
    Normal,
    /// 面 `f `
    Face,
    /// 其他记录（注释、材质、平滑组等），拆分时丢弃
    Other,
}

impl RecordKind {
    /// 按行首前缀分类
    pub fn classify(line: &str) -> Self {
        if line.starts_with("v ") {
            RecordKind::Vertex
        } else if line.starts_with("vt ") {
            RecordKind::TexCoord
        } else if line.starts_with("vn ") {
            RecordKind::Normal
        } else if line.starts_with("f ") {
            RecordKind::Face
        } else {
            RecordKind::Other
        }
    }
}

/// 判断是否为对象标记行
#[inline]
pub fn is_object_marker(line: &str) -> bool {
    line.starts_with(OBJECT_MARKER)
}

/// 面记录中的一个顶点引用 `v/vt/vn`
///
/// 索引保持 OBJ 的 1 基语义。用 `i64` 存储，以便表示负数（相对索引）
/// 和重定位后越界的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    pub vertex: i64,
    pub uv: i64,
    pub normal: i64,
}

impl FaceVertex {
    /// 解析 `a/b/c` 形式的引用，必须恰好是三个整数
    pub fn parse(reference: &str) -> Option<Self> {
        let mut parts = reference.split('/');
        let vertex = parts.next()?.parse().ok()?;
        let uv = parts.next()?.parse().ok()?;
        let normal = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { vertex, uv, normal })
    }

    /// 按分量取索引
    pub fn get(&self, component: IndexComponent) -> i64 {
        match component {
            IndexComponent::Vertex => self.vertex,
            IndexComponent::Uv => self.uv,
            IndexComponent::Normal => self.normal,
        }
    }
}

impl std::fmt::Display for FaceVertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.vertex, self.uv, self.normal)
    }
}

/// 拆出面记录中的引用文本
///
/// 调用方需保证 `line` 以 `f ` 开头。引用之间可以是任意数量的空格或制表符。
pub fn face_references(line: &str) -> impl Iterator<Item = &str> + '_ {
    line[2..].split([' ', '\t']).filter(|s| !s.is_empty())
}

/// 把一组引用格式化为面记录行（不含换行符）
pub fn format_face(vertices: &[FaceVertex]) -> String {
    let refs: Vec<String> = vertices.iter().map(FaceVertex::to_string).collect();
    format!("f {}", refs.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(RecordKind::classify("v 0.0 1.0 2.0"), RecordKind::Vertex);
        assert_eq!(RecordKind::classify("vt 0.5 0.5"), RecordKind::TexCoord);
        assert_eq!(RecordKind::classify("vn 0 0 1"), RecordKind::Normal);
        assert_eq!(RecordKind::classify("f 1/1/1 2/2/1 3/3/1"), RecordKind::Face);
        assert_eq!(RecordKind::classify("s off"), RecordKind::Other);
        assert_eq!(RecordKind::classify("usemtl Material"), RecordKind::Other);
        assert_eq!(RecordKind::classify("vp 0.1"), RecordKind::Other);
    }

    #[test]
    fn test_object_marker() {
        assert!(is_object_marker("o Glyph_A"));
        assert!(!is_object_marker("v 1 2 3"));
        assert!(!is_object_marker("# o commented"));
    }

    #[test]
    fn test_parse_face_vertex() {
        assert_eq!(
            FaceVertex::parse("4/7/2"),
            Some(FaceVertex { vertex: 4, uv: 7, normal: 2 })
        );
        assert_eq!(FaceVertex::parse("4//2"), None);
        assert_eq!(FaceVertex::parse("4/7"), None);
        assert_eq!(FaceVertex::parse("4/7/2/1"), None);
        assert_eq!(FaceVertex::parse("a/b/c"), None);
    }

    #[test]
    fn test_face_references_mixed_whitespace() {
        let refs: Vec<&str> = face_references("f 1/1/1\t2/2/1  3/3/1 ").collect();
        assert_eq!(refs, vec!["1/1/1", "2/2/1", "3/3/1"]);
    }

    #[test]
    fn test_format_face() {
        let verts = [
            FaceVertex { vertex: 1, uv: 2, normal: 3 },
            FaceVertex { vertex: 4, uv: 5, normal: 6 },
        ];
        assert_eq!(format_face(&verts), "f 1/2/3 4/5/6");
    }
}
