use std::io::BufRead;

use glam::Vec3;

use crate::{BoundingBox, Error, Result};

/// Vertex positions of a Wavefront OBJ model.
#[derive(Debug, Clone, Default)]
pub struct Obj {
    pub vertices: Vec<Vec3>,
    pub face_count: usize,
}

impl Obj {
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut vertices = Vec::new();
        let mut face_count = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let mut tokens = line.split_whitespace();

            match tokens.next() {
                Some("v") => {
                    let mut component = || -> Result<f32> {
                        let token = tokens.next().ok_or_else(|| Error::Obj {
                            line: index + 1,
                            message: "vertex has fewer than 3 components".to_string(),
                        })?;

                        let value: f32 = token.parse().map_err(|_| Error::Obj {
                            line: index + 1,
                            message: format!("invalid vertex component {token:?}"),
                        })?;

                        if !value.is_finite() {
                            return Err(Error::Obj {
                                line: index + 1,
                                message: format!("non-finite vertex component {token:?}"),
                            });
                        }

                        Ok(value)
                    };

                    let x = component()?;
                    let y = component()?;
                    let z = component()?;

                    vertices.push(Vec3::new(x, y, z));
                }
                Some("f") => face_count += 1,
                _ => {}
            }
        }

        log::debug!(
            "Parsed obj data: {} vertices, {} faces",
            vertices.len(),
            face_count
        );

        Ok(Self {
            vertices,
            face_count,
        })
    }

    pub fn parse_bytes(data: &[u8]) -> Result<Self> {
        Self::parse(data)
    }

    pub fn bounds(&self) -> Result<BoundingBox> {
        BoundingBox::from_points(self.vertices.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE: &str = "\
# corner cube
o cube
v 0 0 0
v 1000.0 0 0
v 1000 1000 1000

vn 0 1 0
f 1 2 3
";

    #[test]
    fn test_parse_vertices() {
        let obj = Obj::parse_bytes(CUBE.as_bytes()).unwrap();

        assert_eq!(obj.vertices.len(), 3);
        assert_eq!(obj.vertices[1], Vec3::new(1000.0, 0.0, 0.0));
        assert_eq!(obj.face_count, 1);
    }

    #[test]
    fn test_bounds() {
        let bounds = Obj::parse_bytes(CUBE.as_bytes()).unwrap().bounds().unwrap();

        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::splat(1000.0));
    }

    #[test]
    fn test_no_vertices() {
        let obj = Obj::parse_bytes(b"o empty\n").unwrap();
        assert!(matches!(obj.bounds(), Err(Error::NoGeometryData)));
    }

    #[test]
    fn test_short_vertex() {
        let result = Obj::parse_bytes(b"v 1 2 3\nv 1 2\n");
        assert!(matches!(result, Err(Error::Obj { line: 2, .. })));
    }

    #[test]
    fn test_invalid_component() {
        let result = Obj::parse_bytes(b"v 1 two 3\n");
        assert!(matches!(result, Err(Error::Obj { line: 1, .. })));
    }

    #[test]
    fn test_non_finite_component() {
        for data in [&b"v 0 0 0\nv inf 1 1\n"[..], b"v 0 0 0\nv 1 -inf 1\n", b"v 0 0 0\nv 1 1 NaN\n"] {
            let result = Obj::parse_bytes(data);
            assert!(matches!(result, Err(Error::Obj { line: 2, .. })));
        }
    }
}
