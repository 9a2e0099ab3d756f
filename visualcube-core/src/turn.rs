/// Face turns: reorient the nine pieces of a face and cycle their slots
use log::trace;

use crate::label::Label;
use crate::notation::{Face, Move, Turn};
use crate::registry::{PieceRegistry, SceneNode};
use crate::rotation::compose;

/// The nine slots of each face in row-major order, as seen looking at the
/// face from outside the cube: back/up row first, left column first.
///
/// `B`, `L` and `R` read their columns in their own left-to-right sense,
/// which is mirrored relative to `U`, `D` and `F`.
#[rustfmt::skip]
const FACE_GRIDS: [[Label; 9]; 6] = {
    use Label::*;
    [
        // U
        [UBL, UBM, UBR,
         UML, UMM, UMR,
         UFL, UFM, UFR],
        // D
        [DFL, DFM, DFR,
         DML, DMM, DMR,
         DBL, DBM, DBR],
        // F
        [UFL, UFM, UFR,
         MFL, MFM, MFR,
         DFL, DFM, DFR],
        // B
        [UBR, UBM, UBL,
         MBR, MBM, MBL,
         DBR, DBM, DBL],
        // L
        [UBL, UML, UFL,
         MBL, MML, MFL,
         DBL, DML, DFL],
        // R
        [UFR, UMR, UBR,
         MFR, MMR, MBR,
         DFR, DMR, DBR],
    ]
};

/// For each grid cell, the cell whose piece moves into it
const CLOCKWISE: [usize; 9] = [6, 3, 0, 7, 4, 1, 8, 5, 2];
const COUNTER_CLOCKWISE: [usize; 9] = [2, 5, 8, 1, 4, 7, 0, 3, 6];
const HALF: [usize; 9] = [8, 7, 6, 5, 4, 3, 2, 1, 0];

pub fn face_grid(face: Face) -> &'static [Label; 9] {
    &FACE_GRIDS[face.index()]
}

fn source_cells(turn: Turn) -> &'static [usize; 9] {
    match turn {
        Turn::Clockwise => &CLOCKWISE,
        Turn::CounterClockwise => &COUNTER_CLOCKWISE,
        Turn::Half => &HALF,
    }
}

/// Turn one face. Orientations are updated before pieces change slots, and
/// the other 17 slots are left alone.
pub fn apply_move<N: SceneNode>(registry: &mut PieceRegistry<N>, mv: Move) {
    let grid = face_grid(mv.face);
    for &label in grid {
        let node = registry.get_mut(label);
        let turned = compose(node.orientation(), mv);
        node.set_orientation(turned);
    }
    registry.permute(grid, source_cells(mv.turn));
    trace!("applied {mv}");
}

/// Apply moves strictly left to right
pub fn apply_algorithm<N: SceneNode>(registry: &mut PieceRegistry<N>, moves: &[Move]) {
    for &mv in moves {
        apply_move(registry, mv);
    }
}
