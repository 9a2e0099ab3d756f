/// Quaternion orientation of a piece and the fixed rotation of every move
use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::OnceLock;

use nalgebra::{Quaternion, Unit, UnitQuaternion, Vector3};

use crate::notation::{Face, Move, Turn};

/// A unit quaternion stored as `(w, x, y, z)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Orientation {
    pub const IDENTITY: Orientation = Orientation {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Reinterpret as a unit quaternion. Components are taken as-is, without
    /// renormalizing.
    pub fn to_quaternion(self) -> UnitQuaternion<f64> {
        UnitQuaternion::new_unchecked(Quaternion::new(self.w, self.x, self.y, self.z))
    }

    /// True when both describe the same rotation within `eps`, counting `q`
    /// and `-q` as equal
    pub fn same_rotation(&self, other: &Orientation, eps: f64) -> bool {
        let dot = self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z;
        (dot.abs() - 1.0).abs() <= eps
    }

    /// Apply `mv` on top of this orientation, in the world frame
    pub fn compose(self, mv: Move) -> Self {
        compose(self, mv)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<UnitQuaternion<f64>> for Orientation {
    fn from(q: UnitQuaternion<f64>) -> Self {
        let c = q.into_inner().coords;
        Self::new(c.w, c.x, c.y, c.z)
    }
}

impl From<Orientation> for UnitQuaternion<f64> {
    fn from(o: Orientation) -> Self {
        o.to_quaternion()
    }
}

/// Rotation axis and signed angle in radians for a move.
///
/// Opposite faces share an axis, so `U` and `D'` (and every other such
/// pair) resolve to the same entry. Half turns of either face of an axis
/// share the same quaternion too.
fn axis_angle(mv: Move) -> (Unit<Vector3<f64>>, f64) {
    use Face::*;
    use Turn::*;

    match (mv.face, mv.turn) {
        (Up, Clockwise) | (Down, CounterClockwise) => (Vector3::y_axis(), FRAC_PI_2),
        (Down, Clockwise) | (Up, CounterClockwise) => (Vector3::y_axis(), -FRAC_PI_2),
        (Front, Clockwise) | (Back, CounterClockwise) => (Vector3::x_axis(), -FRAC_PI_2),
        (Back, Clockwise) | (Front, CounterClockwise) => (Vector3::x_axis(), FRAC_PI_2),
        (Left, Clockwise) | (Right, CounterClockwise) => (Vector3::z_axis(), -FRAC_PI_2),
        (Right, Clockwise) | (Left, CounterClockwise) => (Vector3::z_axis(), FRAC_PI_2),
        (Up | Down, Half) => (Vector3::y_axis(), PI),
        (Front | Back, Half) => (Vector3::x_axis(), -PI),
        (Left | Right, Half) => (Vector3::z_axis(), -PI),
    }
}

static TURN_QUATERNIONS: OnceLock<[UnitQuaternion<f64>; Move::COUNT]> = OnceLock::new();

/// The fixed quaternion for `mv`, built once per process
pub fn turn_quaternion(mv: Move) -> &'static UnitQuaternion<f64> {
    let table = TURN_QUATERNIONS.get_or_init(|| {
        let mut table = [UnitQuaternion::identity(); Move::COUNT];
        for mv in Move::all() {
            let (axis, angle) = axis_angle(mv);
            table[mv.index()] = UnitQuaternion::from_axis_angle(&axis, angle);
        }
        table
    });
    &table[mv.index()]
}

/// New orientation after turning a piece by `mv`: `q_move * q_piece`
pub fn compose(orientation: Orientation, mv: Move) -> Orientation {
    Orientation::from(turn_quaternion(mv) * orientation.to_quaternion())
}
