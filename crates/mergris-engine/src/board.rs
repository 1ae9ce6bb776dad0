use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

/// Number of cells on one edge of the board.
pub const BOARD_EDGE: usize = 4;
/// Total number of cells on the board.
pub const BOARD_CELLS: usize = BOARD_EDGE * BOARD_EDGE;

/// Reward reported by [`Board::slide`] when the slide moves nothing.
pub const ILLEGAL_SLIDE: i32 = -1;

/// A slide direction, in the fixed scan order used everywhere in this
/// workspace: `Up`, `Right`, `Down`, `Left`.
///
/// The order matters: the player agent scans candidate moves in this order
/// and breaks score ties in favor of the first candidate, so reordering the
/// variants changes which moves a trained agent picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in scan order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

/// 4x4 board of tile ranks.
///
/// Each cell holds a rank: `0` for an empty cell, `k > 0` for a tile
/// displaying `2^k`. Cells are addressed by linear position `0..16` in
/// row-major order:
///
/// ```text
///  0  1  2  3
///  4  5  6  7
///  8  9 10 11
/// 12 13 14 15
/// ```
///
/// The board also carries the direction of the last successful slide. The
/// move engine sets it; the environment agent reads it to decide which edge
/// a fresh tile may spawn on. It is transient state and is not part of the
/// serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [u8; BOARD_CELLS],
    last_slide: Option<Direction>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board with no slide history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [0; BOARD_CELLS],
            last_slide: None,
        }
    }

    /// Returns the rank at a linear position.
    ///
    /// # Panics
    ///
    /// Panics if `position >= 16`.
    #[inline]
    #[must_use]
    pub fn rank(&self, position: usize) -> u8 {
        self.cells[position]
    }

    /// Returns `true` if the cell at `position` holds no tile.
    #[inline]
    #[must_use]
    pub fn is_empty_cell(&self, position: usize) -> bool {
        self.cells[position] == 0
    }

    /// Returns the direction of the last successful slide, or `None` before
    /// the first slide of an episode.
    #[must_use]
    pub fn last_slide(&self) -> Option<Direction> {
        self.last_slide
    }

    /// Returns the highest rank currently on the board.
    #[must_use]
    pub fn max_rank(&self) -> u8 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Iterates over all cell ranks in position order.
    pub fn ranks(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().copied()
    }

    /// Places a tile of rank `tile` at `position`.
    ///
    /// # Panics
    ///
    /// Panics if the target cell is occupied; callers must pick an empty
    /// cell first.
    pub fn place(&mut self, position: usize, tile: u8) {
        assert!(
            self.cells[position] == 0,
            "cannot place tile at occupied position {position}"
        );
        self.cells[position] = tile;
    }

    /// Slides all tiles toward `direction`, merging equal neighbors.
    ///
    /// Each pair of equal ranks that collide merges once into a tile one
    /// rank higher and earns `2^(rank + 1)` reward. Returns the summed merge
    /// reward for a legal slide (possibly `0`), or [`ILLEGAL_SLIDE`] if no
    /// tile moved, in which case the board is left untouched.
    ///
    /// A legal slide records `direction` as the last slide.
    pub fn slide(&mut self, direction: Direction) -> i32 {
        let mut moved = *self;
        let reward = match direction {
            Direction::Left => moved.slide_rows(false),
            Direction::Right => moved.slide_rows(true),
            Direction::Up => {
                moved.transpose();
                let reward = moved.slide_rows(false);
                moved.transpose();
                reward
            }
            Direction::Down => {
                moved.transpose();
                let reward = moved.slide_rows(true);
                moved.transpose();
                reward
            }
        };

        if moved.cells == self.cells {
            return ILLEGAL_SLIDE;
        }
        self.cells = moved.cells;
        self.last_slide = Some(direction);
        reward
    }

    /// Slides every row toward column 0 (`reversed = false`) or column 3
    /// (`reversed = true`), returning the total merge reward.
    fn slide_rows(&mut self, reversed: bool) -> i32 {
        let mut reward = 0;
        for row in 0..BOARD_EDGE {
            let base = row * BOARD_EDGE;
            let mut line = [0u8; BOARD_EDGE];
            for (i, cell) in line.iter_mut().enumerate() {
                let col = if reversed { BOARD_EDGE - 1 - i } else { i };
                *cell = self.cells[base + col];
            }
            reward += compress_and_merge(&mut line);
            for (i, cell) in line.iter().enumerate() {
                let col = if reversed { BOARD_EDGE - 1 - i } else { i };
                self.cells[base + col] = *cell;
            }
        }
        reward
    }

    /// Swaps cell `(i, j)` with cell `(j, i)`.
    fn transpose(&mut self) {
        for row in 0..BOARD_EDGE {
            for col in (row + 1)..BOARD_EDGE {
                self.cells.swap(row * BOARD_EDGE + col, col * BOARD_EDGE + row);
            }
        }
    }

    /// Creates a board from 16 ranks in position order, for tests and
    /// fixtures. The slide tag starts unset.
    #[must_use]
    pub fn from_ranks(ranks: [u8; BOARD_CELLS]) -> Self {
        Self {
            cells: ranks,
            last_slide: None,
        }
    }

    /// Like [`Self::from_ranks`], but with the last-slide tag preset.
    #[must_use]
    pub fn from_ranks_after(ranks: [u8; BOARD_CELLS], direction: Direction) -> Self {
        Self {
            cells: ranks,
            last_slide: Some(direction),
        }
    }
}

/// Compresses a line toward index 0 and merges equal neighbors once each,
/// returning the merge reward.
fn compress_and_merge(line: &mut [u8; BOARD_EDGE]) -> i32 {
    let mut packed = [0u8; BOARD_EDGE];
    let mut len = 0;
    for &rank in line.iter() {
        if rank != 0 {
            packed[len] = rank;
            len += 1;
        }
    }

    let mut merged = [0u8; BOARD_EDGE];
    let mut out = 0;
    let mut reward = 0;
    let mut i = 0;
    while i < len {
        if i + 1 < len && packed[i] == packed[i + 1] {
            merged[out] = packed[i] + 1;
            reward += 1i32 << (packed[i] + 1);
            i += 2;
        } else {
            merged[out] = packed[i];
            i += 1;
        }
        out += 1;
    }

    *line = merged;
    reward
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_EDGE {
            for col in 0..BOARD_EDGE {
                let rank = self.cells[row * BOARD_EDGE + col];
                let value = if rank == 0 { 0 } else { 1u32 << rank };
                write!(f, "{value:>6}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: 16 hex digits, one per cell, position 0 first.
        let mut hex_string = String::with_capacity(BOARD_CELLS);
        for rank in self.cells {
            write!(&mut hex_string, "{rank:x}").unwrap();
        }
        serializer.serialize_str(&hex_string)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.len() != BOARD_CELLS {
            return Err(serde::de::Error::custom(format!(
                "expected {} hex digits, got {}",
                BOARD_CELLS,
                s.len()
            )));
        }

        let mut cells = [0u8; BOARD_CELLS];
        for (i, ch) in s.chars().enumerate() {
            let rank = ch.to_digit(16).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid hex digit at position {i}: {ch}"))
            })?;
            cells[i] = u8::try_from(rank).unwrap();
        }

        Ok(Board {
            cells,
            last_slide: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!((0..BOARD_CELLS).all(|pos| board.is_empty_cell(pos)));
        assert_eq!(board.last_slide(), None);
        assert_eq!(board.max_rank(), 0);
    }

    #[test]
    fn test_place_fills_cell() {
        let mut board = Board::new();
        board.place(5, 2);
        assert_eq!(board.rank(5), 2);
        assert!(!board.is_empty_cell(5));
    }

    #[test]
    #[should_panic(expected = "occupied position")]
    fn test_place_on_occupied_cell_panics() {
        let mut board = Board::new();
        board.place(5, 1);
        board.place(5, 1);
    }

    #[test]
    fn test_slide_left_merges_pair() {
        // [2 2 4 .] -> [4 4 . .], reward 4 for the 2+2 merge
        let mut board = Board::from_ranks([
            1, 1, 2, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let reward = board.slide(Direction::Left);
        assert_eq!(reward, 4);
        assert_eq!(board.rank(0), 2);
        assert_eq!(board.rank(1), 2);
        assert_eq!(board.rank(2), 0);
        assert_eq!(board.last_slide(), Some(Direction::Left));
    }

    #[test]
    fn test_slide_merges_each_pair_once() {
        // [2 2 2 2] -> [4 4 . .], not [8 . . .]
        let mut board = Board::from_ranks([
            1, 1, 1, 1, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let reward = board.slide(Direction::Left);
        assert_eq!(reward, 8);
        assert_eq!(board.rank(0), 2);
        assert_eq!(board.rank(1), 2);
        assert_eq!(board.rank(2), 0);
    }

    #[test]
    fn test_slide_right_compresses_toward_column_three() {
        let mut board = Board::from_ranks([
            1, 0, 0, 1, //
            2, 0, 3, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let reward = board.slide(Direction::Right);
        assert_eq!(reward, 4);
        assert_eq!(board.rank(3), 2);
        assert_eq!(board.rank(2), 3);
        assert_eq!(board.rank(1), 2);
        assert!(board.is_empty_cell(0));
    }

    #[test]
    fn test_slide_up_merges_columns() {
        let mut board = Board::from_ranks([
            2, 0, 0, 0, //
            2, 0, 0, 0, //
            0, 0, 0, 0, //
            3, 0, 0, 0,
        ]);
        let reward = board.slide(Direction::Up);
        assert_eq!(reward, 8);
        assert_eq!(board.rank(0), 3);
        assert_eq!(board.rank(4), 3);
        assert!(board.is_empty_cell(8));
        assert!(board.is_empty_cell(12));
        assert_eq!(board.last_slide(), Some(Direction::Up));
    }

    #[test]
    fn test_slide_down_merges_toward_bottom_row() {
        let mut board = Board::from_ranks([
            1, 0, 0, 0, //
            0, 0, 0, 0, //
            1, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let reward = board.slide(Direction::Down);
        assert_eq!(reward, 4);
        assert_eq!(board.rank(12), 2);
        assert!(board.is_empty_cell(0));
        assert!(board.is_empty_cell(8));
    }

    #[test]
    fn test_slide_without_movement_is_illegal() {
        // Everything already packed left; sliding left moves nothing.
        let board0 = Board::from_ranks([
            1, 2, 3, 4, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        let mut board = board0;
        assert_eq!(board.slide(Direction::Left), ILLEGAL_SLIDE);
        assert_eq!(board, board0);
        assert_eq!(board.last_slide(), None);
    }

    #[test]
    fn test_movement_without_merge_rewards_zero() {
        let mut board = Board::from_ranks([
            0, 0, 0, 1, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]);
        assert_eq!(board.slide(Direction::Left), 0);
        assert_eq!(board.rank(0), 1);
        assert_eq!(board.last_slide(), Some(Direction::Left));
    }

    #[test]
    fn test_full_checkerboard_has_no_legal_slide() {
        let mut board = Board::from_ranks([
            1, 2, 1, 2, //
            2, 1, 2, 1, //
            1, 2, 1, 2, //
            2, 1, 2, 1,
        ]);
        for direction in Direction::ALL {
            assert_eq!(board.slide(direction), ILLEGAL_SLIDE, "{direction}");
        }
    }

    #[test]
    fn test_board_serialization_roundtrip() {
        let board = Board::from_ranks([
            0, 1, 2, 3, //
            4, 5, 6, 7, //
            8, 9, 10, 11, //
            12, 13, 14, 0,
        ]);
        let serialized = serde_json::to_string(&board).unwrap();
        assert_eq!(serialized, "\"0123456789abcde0\"");

        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.cells, board.cells);
        // The slide tag is transient and not round-tripped.
        assert_eq!(deserialized.last_slide(), None);
    }

    #[test]
    fn test_board_deserialization_rejects_bad_input() {
        assert!(serde_json::from_str::<Board>("\"012\"").is_err());
        assert!(serde_json::from_str::<Board>("\"0123456789abcdeg\"").is_err());
    }
}
