/// Geometry of the individual cubies that make up the puzzle
use nalgebra::{Point3, Vector3};

use crate::label::Label;
use crate::notation::Face;

/// Distance between neighbouring cubie centres
pub const SPACING: f32 = 1.0;

/// Edge length of a cubie; slightly under [`SPACING`] so seams show
pub const CUBIE_SIZE: f32 = 0.96;

/// A vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// One side of a cubie, wound counter-clockwise seen from outside
#[derive(Debug, Clone)]
pub struct Quad {
    pub side: Face,
    /// The face whose sticker covers this side, `None` for inner plastic
    pub sticker: Option<Face>,
    pub vertices: [Vertex; 4],
}

impl Quad {
    /// Triangle indices into [`Quad::vertices`]
    pub const INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

    pub fn min(&self) -> Point3<f32> {
        self.vertices
            .iter()
            .skip(1)
            .fold(self.vertices[0].position, |acc, v| acc.inf(&v.position))
    }

    pub fn max(&self) -> Point3<f32> {
        self.vertices
            .iter()
            .skip(1)
            .fold(self.vertices[0].position, |acc, v| acc.sup(&v.position))
    }
}

/// Outward normal of each face in scene space: `U` is +y, `F` is +x and
/// `R` is +z
pub fn face_normal(face: Face) -> Vector3<f32> {
    match face {
        Face::Up => Vector3::new(0.0, 1.0, 0.0),
        Face::Down => Vector3::new(0.0, -1.0, 0.0),
        Face::Front => Vector3::new(1.0, 0.0, 0.0),
        Face::Back => Vector3::new(-1.0, 0.0, 0.0),
        Face::Right => Vector3::new(0.0, 0.0, 1.0),
        Face::Left => Vector3::new(0.0, 0.0, -1.0),
    }
}

/// Centre of the cubie at `label` in the solved cube
pub fn center(label: Label) -> Point3<f32> {
    let (up, front, right) = label.offsets();
    let offset = face_normal(Face::Up) * f32::from(up)
        + face_normal(Face::Front) * f32::from(front)
        + face_normal(Face::Right) * f32::from(right);
    Point3::from(offset * SPACING)
}

/// A single cubie with its geometry baked at its solved position, so that
/// rotating the node about the origin carries it around the cube
#[derive(Debug, Clone)]
pub struct Cubie {
    pub label: Label,
    /// One quad per face, in [`Face::ALL`] order
    pub quads: Vec<Quad>,
}

impl Cubie {
    pub fn new(label: Label, size: f32) -> Self {
        let half = size / 2.0;
        let centre = center(label);

        let quads = Face::ALL
            .into_iter()
            .map(|side| {
                let normal = face_normal(side);
                let u = tangent(&normal);
                let v = normal.cross(&u);
                let mid = centre + normal * half;
                let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
                let vertices = corners.map(|(a, b)| Vertex::new(mid + (u * a + v * b) * half, normal));
                let sticker = (centre.coords.dot(&normal) > SPACING / 2.0).then_some(side);
                Quad {
                    side,
                    sticker,
                    vertices,
                }
            })
            .collect();

        Self { label, quads }
    }

    pub fn stickers(&self) -> impl Iterator<Item = Face> + '_ {
        self.quads.iter().filter_map(|q| q.sticker)
    }
}

/// Some unit vector perpendicular to an axis-aligned normal
fn tangent(normal: &Vector3<f32>) -> Vector3<f32> {
    if normal.x != 0.0 {
        Vector3::y()
    } else if normal.y != 0.0 {
        Vector3::z()
    } else {
        Vector3::x()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticker_counts() {
        assert_eq!(Cubie::new(Label::UFR, CUBIE_SIZE).stickers().count(), 3);
        assert_eq!(Cubie::new(Label::UFM, CUBIE_SIZE).stickers().count(), 2);
        assert_eq!(Cubie::new(Label::MFM, CUBIE_SIZE).stickers().count(), 1);

        let stickers: Vec<Face> = Cubie::new(Label::DBL, CUBIE_SIZE).stickers().collect();
        assert_eq!(stickers, [Face::Down, Face::Back, Face::Left]);
    }

    #[test]
    fn test_quads_face_outward() {
        let cubie = Cubie::new(Label::UFL, 1.0);
        for quad in &cubie.quads {
            let [a, b, c, _] = quad.vertices.map(|v| v.position);
            let winding = (b - a).cross(&(c - a)).normalize();
            assert!((winding - face_normal(quad.side)).norm() < 1e-6);
        }
    }

    #[test]
    fn test_bounds() {
        let cubie = Cubie::new(Label::UFR, 1.0);
        let top = &cubie.quads[Face::Up.index()];
        assert!((top.min().y - 1.5).abs() < 1e-6);
        assert!((top.max().x - 1.5).abs() < 1e-6);
        assert!((top.min().z - 0.5).abs() < 1e-6);
    }
}
