//! The dihedral group of the square board, as position permutations.
//!
//! The eight board transforms (4 rotations x 2 reflection states) are
//! generated from two primitives: horizontal reflection (swap opposing
//! columns within each row) and transpose (swap cell `(i, j)` with
//! `(j, i)`). A 90 degree clockwise rotation is transpose followed by
//! reflection.
//!
//! The generation order is fixed. Weights are addressed per concrete
//! symmetry ordering, so training and evaluation must enumerate the group
//! identically; [`Symmetry::all`] is the single source of that order.

use mergris_engine::{BOARD_CELLS, BOARD_EDGE};

/// One element of the order-8 dihedral group, stored as the permutation it
/// applies to linear board positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symmetry {
    map: [u8; BOARD_CELLS],
}

/// Reflects a position horizontally: `(row, col)` to `(row, 3 - col)`.
fn reflect_horizontal(position: usize) -> usize {
    let row = position / BOARD_EDGE;
    let col = position % BOARD_EDGE;
    row * BOARD_EDGE + (BOARD_EDGE - 1 - col)
}

/// Transposes a position: `(row, col)` to `(col, row)`.
fn transpose(position: usize) -> usize {
    let row = position / BOARD_EDGE;
    let col = position % BOARD_EDGE;
    col * BOARD_EDGE + row
}

/// Rotates a position 90 degrees clockwise: transpose, then reflect.
fn rotate_clockwise(position: usize) -> usize {
    reflect_horizontal(transpose(position))
}

impl Symmetry {
    /// The identity permutation.
    pub const IDENTITY: Self = {
        let mut map = [0; BOARD_CELLS];
        let mut i = 0;
        while i < BOARD_CELLS {
            map[i] = i as u8;
            i += 1;
        }
        Self { map }
    };

    /// Returns where this symmetry sends `position`.
    #[inline]
    #[must_use]
    pub fn position(&self, position: usize) -> usize {
        usize::from(self.map[position])
    }

    /// This symmetry followed by a horizontal reflection.
    #[must_use]
    fn reflected(self) -> Self {
        let mut map = self.map;
        for entry in &mut map {
            *entry = reflect_horizontal(usize::from(*entry)) as u8;
        }
        Self { map }
    }

    /// This symmetry followed by a clockwise quarter turn.
    #[must_use]
    fn rotated(self) -> Self {
        let mut map = self.map;
        for entry in &mut map {
            *entry = rotate_clockwise(usize::from(*entry)) as u8;
        }
        Self { map }
    }

    /// All 8 group elements in the fixed generation order: the 4 successive
    /// rotations of the identity, then the 4 successive rotations of the
    /// reflected identity.
    #[must_use]
    pub fn all() -> [Symmetry; 8] {
        let mut elements = [Symmetry::IDENTITY; 8];
        let mut index = 0;
        for start in [Symmetry::IDENTITY, Symmetry::IDENTITY.reflected()] {
            let mut current = start;
            for _ in 0..4 {
                elements[index] = current;
                index += 1;
                current = current.rotated();
            }
        }
        elements
    }
}
