/// 输出校验
///
/// 重新读取写出的字形文件，确认它是自洽的 OBJ：
///
/// 1. 每个面引用的顶点/UV/法线索引都落在本文件声明的记录数量之内（1 基）；
/// 2. tobj 可以完整解析该文件。
///
/// 重定位只保证索引 >= 1，第 1 条还能发现引用了后续段几何数据的前向引用。
use super::rebase::SegmentCounts;
use super::record::{face_references, FaceVertex, RecordKind};
use crate::core::error::{IndexComponent, MeshLoadError, Result};
use std::path::Path;

/// 校验一个字形文件
pub fn verify_glyph(path: &Path, counts: &SegmentCounts) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| MeshLoadError::ExternalLibraryError(format!("{}: {}", path.display(), e)))?;

    check_face_ranges(&contents, counts)
        .map_err(|msg| MeshLoadError::ValidationError(format!("{}: {}", path.display(), msg)))?;

    let load_options = tobj::LoadOptions {
        triangulate: true,
        ..Default::default()
    };
    tobj::load_obj(path, &load_options)
        .map_err(|e| MeshLoadError::ExternalLibraryError(format!("{}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), faces = counts.faces, "Glyph verified");
    Ok(())
}

/// 检查所有面引用是否在 `1..=count` 之内
fn check_face_ranges(contents: &str, counts: &SegmentCounts) -> std::result::Result<(), String> {
    let limits = [
        (IndexComponent::Vertex, counts.vertices),
        (IndexComponent::Uv, counts.uvs),
        (IndexComponent::Normal, counts.normals),
    ];

    for (line_no, line) in contents.lines().enumerate() {
        if RecordKind::classify(line) != RecordKind::Face {
            continue;
        }
        for reference in face_references(line) {
            let fv = FaceVertex::parse(reference)
                .ok_or_else(|| format!("line {}: malformed reference '{}'", line_no + 1, reference))?;
            for (component, limit) in limits {
                let index = fv.get(component);
                if index < 1 || index as u64 > limit as u64 {
                    return Err(format!(
                        "line {}: {} index {} outside 1..={}",
                        line_no + 1,
                        component,
                        index,
                        limit
                    ));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GlyphSplitError;
    use crate::testing::Scratch;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n";

    #[test]
    fn test_valid_glyph() {
        let scratch = Scratch::new("verify_ok");
        let path = scratch.write("ok.obj", TRIANGLE);
        let counts = SegmentCounts { vertices: 3, uvs: 1, normals: 1, faces: 1 };
        assert!(verify_glyph(&path, &counts).is_ok());
    }

    #[test]
    fn test_unused_vertices_are_allowed() {
        let scratch = Scratch::new("verify_unused");
        let path = scratch.write("unused.obj", &format!("v 5 5 5\n{}", TRIANGLE));
        let counts = SegmentCounts { vertices: 4, uvs: 1, normals: 1, faces: 1 };
        assert!(verify_glyph(&path, &counts).is_ok());
    }

    #[test]
    fn test_uv_beyond_segment_is_rejected() {
        let scratch = Scratch::new("verify_uv");
        let path = scratch.write("bad.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/2/1 2/1/1 3/1/1\n");
        let counts = SegmentCounts { vertices: 3, uvs: 1, normals: 1, faces: 1 };
        match verify_glyph(&path, &counts) {
            Err(GlyphSplitError::Verify(MeshLoadError::ValidationError(msg))) => {
                assert!(msg.contains("uv index 2"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_vertex_beyond_segment_is_rejected() {
        let scratch = Scratch::new("verify_vertex");
        let path = scratch.write("bad.obj", "v 0 0 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 1/1/1 4/1/1\n");
        let counts = SegmentCounts { vertices: 1, uvs: 1, normals: 1, faces: 1 };
        assert!(matches!(
            verify_glyph(&path, &counts),
            Err(GlyphSplitError::Verify(MeshLoadError::ValidationError(_)))
        ));
    }

    #[test]
    fn test_unparsable_geometry_is_rejected() {
        let scratch = Scratch::new("verify_parse");
        let path = scratch.write("bad.obj", "v x y z\n");
        let counts = SegmentCounts { vertices: 1, ..SegmentCounts::default() };
        assert!(matches!(
            verify_glyph(&path, &counts),
            Err(GlyphSplitError::Verify(MeshLoadError::ExternalLibraryError(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        let scratch = Scratch::new("verify_missing");
        let result = verify_glyph(&scratch.path().join("absent.obj"), &SegmentCounts::default());
        assert!(matches!(result, Err(GlyphSplitError::Verify(_))));
    }
}
