//! Sampling patterns and their base-15 feature encoding.
//!
//! A pattern is an ordered list of 6 board positions. Sampling a board
//! through a pattern reads the 6 ranks at those positions and packs them
//! into a single base-15 integer (the tuple feature code), which indexes a
//! dense weight table.
//!
//! Each pattern is expanded through the 8 board symmetries into 8 concrete
//! position orderings. All 8 orderings of one pattern index the *same*
//! table, but at independent cells: the geometry is shared, the weights are
//! not tied.

use mergris_engine::Board;

use crate::symmetry::Symmetry;

/// Number of fixed sampling patterns.
pub const PATTERN_COUNT: usize = 4;
/// Number of labeled cells per pattern.
pub const PATTERN_CELLS: usize = 6;
/// Number of symmetry orderings per pattern.
pub const ORDERINGS_PER_PATTERN: usize = 8;

/// Radix of the tuple feature code. Every sampled rank must stay below it.
pub const FEATURE_BASE: usize = 15;
/// Entries per weight table: one cell per possible 6-digit base-15 code.
pub const TABLE_LEN: usize = FEATURE_BASE
    * FEATURE_BASE
    * FEATURE_BASE
    * FEATURE_BASE
    * FEATURE_BASE
    * FEATURE_BASE;

/// The four fixed 6-cell patterns, as linear positions in label order
/// (label 1 first). Two row-pair stripes and two 2x3 blocks:
///
/// ```text
///  pattern 0      pattern 1      pattern 2      pattern 3
///  a b c d        . . . .        a b c .        . . . .
///  e f . .        a b c d        d e f .        a b c .
///  . . . .        e f . .        . . . .        d e f .
///  . . . .        . . . .        . . . .        . . . .
/// ```
const PATTERNS: [[u8; PATTERN_CELLS]; PATTERN_COUNT] = [
    [0, 1, 2, 3, 4, 5],
    [4, 5, 6, 7, 8, 9],
    [0, 1, 2, 4, 5, 6],
    [4, 5, 6, 8, 9, 10],
];

/// Encodes the ranks sampled at `cells` as a base-15 integer, label 1 as
/// the most significant digit.
///
/// # Panics
///
/// Panics if a sampled rank is 15 or above; such a board cannot be encoded
/// and the value function is undefined for it.
#[inline]
#[must_use]
pub fn feature_code(board: &Board, cells: &[u8; PATTERN_CELLS]) -> usize {
    let mut code = 0;
    for &cell in cells {
        let rank = usize::from(board.rank(usize::from(cell)));
        assert!(rank < FEATURE_BASE, "rank {rank} exceeds the feature base");
        code = code * FEATURE_BASE + rank;
    }
    code
}

/// A pattern expanded through all 8 board symmetries.
///
/// Holds the concrete position lists the value function samples. The
/// ordering sequence is fixed by [`Symmetry::all`] and must stay bitwise
/// stable across training and evaluation.
#[derive(Debug, Clone)]
pub struct SymmetricPattern {
    orderings: [[u8; PATTERN_CELLS]; ORDERINGS_PER_PATTERN],
}

impl SymmetricPattern {
    /// Expands one pattern into its 8 symmetry orderings.
    #[must_use]
    pub fn expand(cells: [u8; PATTERN_CELLS]) -> Self {
        let symmetries = Symmetry::all();
        let mut orderings = [[0; PATTERN_CELLS]; ORDERINGS_PER_PATTERN];
        for (ordering, symmetry) in orderings.iter_mut().zip(&symmetries) {
            for (target, &cell) in ordering.iter_mut().zip(&cells) {
                *target = symmetry.position(usize::from(cell)) as u8;
            }
        }
        Self { orderings }
    }

    /// The 8 concrete position orderings, in generation order.
    #[must_use]
    pub fn orderings(&self) -> &[[u8; PATTERN_CELLS]; ORDERINGS_PER_PATTERN] {
        &self.orderings
    }
}

/// Expands the four fixed patterns, in table order.
#[must_use]
pub fn all_patterns() -> [SymmetricPattern; PATTERN_COUNT] {
    PATTERNS.map(SymmetricPattern::expand)
}
