//! The n-tuple network: a linear value function over pattern lookups.
//!
//! # Value computation
//!
//! For each of the 4 patterns and each of its 8 symmetry orderings, the
//! board is sampled into a base-15 feature code that indexes the pattern's
//! dense weight table. The board value is the plain sum of those 32
//! lookups: a linear function over sparse indicator features, one weight
//! per (pattern, ordering, value-combination) triple.
//!
//! [`NTupleNetwork::adjust`] writes the same 32 cells the value read, once
//! per referencing sampling. That symmetry between read and write is what
//! makes the TD update in the agent crate a correct gradient step for this
//! linear model.
//!
//! # Persistence
//!
//! Weight files are little-endian binary: a `u32` table count, then per
//! table a `u64` entry count followed by the raw `f32` entries. No version
//! field, no checksum. A file whose table shapes do not match the network
//! is rejected as corrupt.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use mergris_engine::Board;

use crate::pattern::{self, PATTERN_COUNT, SymmetricPattern, TABLE_LEN, feature_code};

/// Linear afterstate value function backed by four dense weight tables.
#[derive(Debug, Clone)]
pub struct NTupleNetwork {
    tables: Vec<Vec<f32>>,
    patterns: [SymmetricPattern; PATTERN_COUNT],
}

impl Default for NTupleNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl NTupleNetwork {
    /// Creates a network with all weights at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: (0..PATTERN_COUNT).map(|_| vec![0.0; TABLE_LEN]).collect(),
            patterns: pattern::all_patterns(),
        }
    }

    /// Estimates the value of `board`: the sum of all 32 weight lookups.
    #[must_use]
    pub fn value(&self, board: &Board) -> f32 {
        let mut total = 0.0;
        for (table, pattern) in self.tables.iter().zip(&self.patterns) {
            for ordering in pattern.orderings() {
                total += table[feature_code(board, ordering)];
            }
        }
        total
    }

    /// Adds `delta` to every weight cell [`Self::value`] would read for
    /// `board` (once per referencing sampling) and returns the new value.
    pub fn adjust(&mut self, board: &Board, delta: f32) -> f32 {
        for (table, pattern) in self.tables.iter_mut().zip(&self.patterns) {
            for ordering in pattern.orderings() {
                table[feature_code(board, ordering)] += delta;
            }
        }
        self.value(board)
    }

    /// Writes the weight tables to `path`, truncating any existing file.
    pub fn save<P>(&self, path: P) -> io::Result<()>
    where
        P: AsRef<Path>,
    {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write_tables(&self.tables, &mut writer)?;
        writer.flush()
    }

    /// Loads a network from the weight file at `path`.
    ///
    /// Fails with [`io::ErrorKind::InvalidData`] when the file does not
    /// contain exactly 4 tables of 15^6 entries each.
    pub fn load<P>(path: P) -> io::Result<Self>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        let tables = read_tables(&mut BufReader::new(file))?;
        if tables.len() != PATTERN_COUNT {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected {PATTERN_COUNT} weight tables, found {}", tables.len()),
            ));
        }
        if let Some(bad) = tables.iter().find(|t| t.len() != TABLE_LEN) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected {TABLE_LEN} weights per table, found {}", bad.len()),
            ));
        }
        Ok(Self {
            tables,
            patterns: pattern::all_patterns(),
        })
    }
}

/// Serializes weight tables: `u32` table count, then per table a `u64`
/// entry count and the raw little-endian `f32` entries.
fn write_tables<W>(tables: &[Vec<f32>], writer: &mut W) -> io::Result<()>
where
    W: Write,
{
    let count = u32::try_from(tables.len()).expect("table count fits in u32");
    writer.write_all(&count.to_le_bytes())?;
    for table in tables {
        writer.write_all(&(table.len() as u64).to_le_bytes())?;
        for &weight in table {
            writer.write_all(&weight.to_le_bytes())?;
        }
    }
    Ok(())
}

/// Inverse of [`write_tables`]. Trailing garbage after the declared tables
/// is not detected; the format carries no checksum.
fn read_tables<R>(reader: &mut R) -> io::Result<Vec<Vec<f32>>>
where
    R: Read,
{
    let mut count_bytes = [0; 4];
    reader.read_exact(&mut count_bytes)?;
    let count = u32::from_le_bytes(count_bytes);

    let mut tables = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let mut len_bytes = [0; 8];
        reader.read_exact(&mut len_bytes)?;
        let len = usize::try_from(u64::from_le_bytes(len_bytes))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut table = Vec::with_capacity(len);
        let mut weight_bytes = [0; 4];
        for _ in 0..len {
            reader.read_exact(&mut weight_bytes)?;
            table.push(f32::from_le_bytes(weight_bytes));
        }
        tables.push(table);
    }
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn sample_board() -> Board {
        Board::from_ranks([
            1, 2, 3, 0, //
            0, 1, 0, 2, //
            0, 0, 1, 0, //
            3, 0, 0, 1,
        ])
    }

    #[test]
    fn test_zero_network_values_everything_at_zero() {
        let network = NTupleNetwork::new();
        assert_eq!(network.value(&Board::new()), 0.0);
        assert_eq!(network.value(&sample_board()), 0.0);
    }

    #[test]
    fn test_value_is_linear_in_a_single_weight() {
        let board = sample_board();
        let mut network = NTupleNetwork::new();
        let before = network.value(&board);

        // Perturb exactly the cell that pattern 0's identity ordering reads.
        let index = feature_code(&board, &network.patterns[0].orderings()[0]);
        network.tables[0][index] += 0.625;

        assert_eq!(network.value(&board) - before, 0.625);
    }

    #[test]
    fn test_adjust_touches_exactly_the_read_cells() {
        // Strictly increasing ranks make every ordering sample a distinct
        // code, so the 32 touched cells are 32 distinct cells.
        let board = Board::from_ranks([
            0, 1, 2, 3, //
            4, 5, 6, 7, //
            8, 9, 10, 11, //
            12, 13, 14, 14,
        ]);
        let mut network = NTupleNetwork::new();
        let value = network.adjust(&board, 0.5);

        // 4 patterns x 8 orderings, one 0.5 contribution each.
        assert_eq!(value, 32.0 * 0.5);
        assert_eq!(network.value(&board), 16.0);

        // A board sampling disjoint feature codes stays untouched.
        let other = Board::from_ranks([7; 16]);
        assert_eq!(network.value(&other), 0.0);
    }

    #[test]
    fn test_orderings_are_not_weight_tied() {
        // Writing the cell for one ordering must not affect the value seen
        // through a different ordering of the same pattern on a rotated
        // board, unless the codes happen to collide.
        let board = sample_board();
        let mut network = NTupleNetwork::new();
        let identity_code = feature_code(&board, &network.patterns[2].orderings()[0]);
        let rotated_code = feature_code(&board, &network.patterns[2].orderings()[1]);
        assert_ne!(identity_code, rotated_code);

        network.tables[2][identity_code] = 1.0;
        assert_eq!(network.tables[2][rotated_code], 0.0);
    }

    #[test]
    fn test_table_serialization_roundtrip_is_bit_identical() {
        let tables = vec![
            vec![0.0f32, -1.5, 3.25, f32::MIN_POSITIVE],
            vec![42.0, -0.0],
        ];
        let mut buffer = Vec::new();
        write_tables(&tables, &mut buffer).unwrap();

        let restored = read_tables(&mut Cursor::new(&buffer)).unwrap();
        assert_eq!(restored.len(), tables.len());
        for (restored, original) in restored.iter().zip(&tables) {
            assert_eq!(restored.len(), original.len());
            for (r, o) in restored.iter().zip(original) {
                assert_eq!(r.to_bits(), o.to_bits());
            }
        }
    }

    #[test]
    fn test_read_tables_rejects_truncated_input() {
        let tables = vec![vec![1.0f32; 8]];
        let mut buffer = Vec::new();
        write_tables(&tables, &mut buffer).unwrap();
        buffer.truncate(buffer.len() - 2);

        assert!(read_tables(&mut Cursor::new(&buffer)).is_err());
    }
}
