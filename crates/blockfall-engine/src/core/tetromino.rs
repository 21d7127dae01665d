use std::str::FromStr;

use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Serialize, Serializer, ser::SerializeSeq as _};

/// Largest bounding box a shape may occupy (the I-piece needs 4×4).
pub const MAX_SHAPE_SIZE: usize = 4;

type ShapeRow = ArrayVec<bool, MAX_SHAPE_SIZE>;

/// Error returned by [`Shape::from_rows`] for matrices that cannot be a piece shape.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape matrix has no cells")]
    Empty,
    #[display("shape matrix is {width}x{height}, larger than the 4x4 bounding box")]
    TooLarge { width: usize, height: usize },
    #[display("shape row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[display("shape cell ({x}, {y}) holds {value}, expected 0 or 1")]
    InvalidCell { x: usize, y: usize, value: u8 },
}

/// A rectangular 0/1 matrix describing which cells of a piece are occupied.
///
/// `Shape` owns its cells in fixed-capacity inline storage, so every clone is a
/// structurally independent deep copy: changing one never affects another.
///
/// # Example
///
/// ```
/// use blockfall_engine::Shape;
///
/// let shape = Shape::from_rows(&[[1_u8, 1, 1], [0, 1, 0]]).unwrap();
/// let rotated = shape.rotated();
///
/// assert_eq!((rotated.width(), rotated.height()), (2, 3));
/// assert_eq!(rotated.rotated().rotated().rotated(), shape);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: ArrayVec<ShapeRow, MAX_SHAPE_SIZE>,
}

impl Shape {
    /// Builds a shape from rows of `0`/`1` cells.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ShapeError>
    where
        R: AsRef<[u8]>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if height == 0 || width == 0 {
            return Err(ShapeError::Empty);
        }
        if width > MAX_SHAPE_SIZE || height > MAX_SHAPE_SIZE {
            return Err(ShapeError::TooLarge { width, height });
        }

        let mut shape_rows = ArrayVec::new();
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ShapeError::Ragged {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            let mut cells = ShapeRow::new();
            for (x, &value) in row.iter().enumerate() {
                let occupied = match value {
                    0 => false,
                    1 => true,
                    _ => return Err(ShapeError::InvalidCell { x, y, value }),
                };
                cells.push(occupied);
            }
            shape_rows.push(cells);
        }
        Ok(Self { rows: shape_rows })
    }

    fn from_table(size: usize, table: &[[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        let rows = table[..size]
            .iter()
            .map(|row| row[..size].iter().map(|&cell| cell != 0).collect())
            .collect();
        Self { rows }
    }

    /// Number of columns of the matrix.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, ArrayVec::len)
    }

    /// Number of rows of the matrix.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.rows.iter().map(ArrayVec::as_slice)
    }

    /// Returns the `(column, row)` offsets of occupied cells, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, &occupied)| occupied.then_some((x, y)))
        })
    }

    /// Returns the shape rotated 90° clockwise.
    ///
    /// An `N`×`M` matrix (N rows) becomes `M`×`N`, with
    /// `rotated[j][N - 1 - i] = self[i][j]`.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let height = self.height();
        let rows = (0..self.width())
            .map(|j| (0..height).map(|k| self.rows[height - 1 - k][j]).collect())
            .collect();
        Self { rows }
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Rows of 0/1, matching the catalog notation
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            let cells: ArrayVec<u8, MAX_SHAPE_SIZE> = row.iter().map(|&c| u8::from(c)).collect();
            seq.serialize_element(cells.as_slice())?;
        }
        seq.end()
    }
}

/// Color tag of a piece, also stored in the board cells it lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

/// The seven catalog pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum TetrominoKind {
    I = 0,
    O = 1,
    T = 2,
    S = 3,
    Z = 4,
    J = 5,
    L = 6,
}

impl Distribution<TetrominoKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TetrominoKind {
        TetrominoKind::ALL[rng.random_range(0..TetrominoKind::LEN)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid tetromino kind: {input:?}")]
pub struct ParseTetrominoKindError {
    input: String,
}

impl FromStr for TetrominoKind {
    type Err = ParseTetrominoKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
        .ok_or_else(|| ParseTetrominoKindError {
            input: s.to_owned(),
        })
    }
}

// Square bounding boxes, so four rotations reproduce the canonical matrix.
const CATALOG: [(usize, [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE], Color); TetrominoKind::LEN] = [
    (
        4,
        [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
        Color::Cyan,
    ),
    (
        2,
        [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        Color::Yellow,
    ),
    (
        3,
        [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        Color::Purple,
    ),
    (
        3,
        [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        Color::Green,
    ),
    (
        3,
        [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        Color::Red,
    ),
    (
        3,
        [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        Color::Blue,
    ),
    (
        3,
        [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        Color::Orange,
    ),
];

impl TetrominoKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::O,
        Self::T,
        Self::S,
        Self::Z,
        Self::J,
        Self::L,
    ];

    #[must_use]
    pub const fn color(self) -> Color {
        CATALOG[self as usize].2
    }

    /// Returns a fresh copy of the canonical shape.
    #[must_use]
    pub fn shape(self) -> Shape {
        let (size, table, _) = &CATALOG[self as usize];
        Shape::from_table(*size, table)
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// ```
    /// use blockfall_engine::TetrominoKind;
    ///
    /// assert_eq!(TetrominoKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::I => 'I',
            Self::O => 'O',
            Self::T => 'T',
            Self::S => 'S',
            Self::Z => 'Z',
            Self::J => 'J',
            Self::L => 'L',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::I),
            'O' => Some(Self::O),
            'T' => Some(Self::T),
            'S' => Some(Self::S),
            'Z' => Some(Self::Z),
            'J' => Some(Self::J),
            'L' => Some(Self::L),
            _ => None,
        }
    }
}

/// A piece handed out by the catalog: a shape and its color tag.
///
/// Every `Tetromino` owns its shape, so rotating one in-flight piece never
/// touches the catalog or any other instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tetromino {
    kind: TetrominoKind,
    shape: Shape,
    color: Color,
}

impl Tetromino {
    /// Creates a piece in its canonical orientation.
    #[must_use]
    pub fn new(kind: TetrominoKind) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            color: kind.color(),
        }
    }

    /// Picks one of the seven kinds uniformly at random.
    #[must_use]
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(rng.random())
    }

    #[must_use]
    pub fn kind(&self) -> TetrominoKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns this piece with its shape rotated 90° clockwise.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            kind: self.kind,
            shape: self.shape.rotated(),
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_from_rows_rejects_invalid_matrices() {
        let empty: [[u8; 0]; 0] = [];
        assert_eq!(Shape::from_rows(&empty), Err(ShapeError::Empty));
        assert_eq!(
            Shape::from_rows(&[[1_u8, 1, 1, 1, 1]]),
            Err(ShapeError::TooLarge {
                width: 5,
                height: 1
            })
        );
        assert_eq!(
            Shape::from_rows(&[&[1_u8, 1][..], &[1_u8][..]]),
            Err(ShapeError::Ragged {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            Shape::from_rows(&[[1_u8, 2]]),
            Err(ShapeError::InvalidCell {
                x: 1,
                y: 0,
                value: 2
            })
        );
    }

    #[test]
    fn test_rotate_clockwise_mapping() {
        // 2 rows x 3 columns
        let shape = Shape::from_rows(&[[1_u8, 1, 0], [0, 1, 1]]).unwrap();
        let rotated = shape.rotated();

        assert_eq!(rotated, Shape::from_rows(&[[0_u8, 1], [1, 1], [1, 0]]).unwrap());
        for i in 0..shape.height() {
            for j in 0..shape.width() {
                assert_eq!(
                    rotated.is_occupied(shape.height() - 1 - i, j),
                    shape.is_occupied(j, i)
                );
            }
        }
    }

    #[test]
    fn test_rotate_does_not_mutate_input() {
        let shape = TetrominoKind::L.shape();
        let before = shape.clone();
        let _ = shape.rotated();
        assert_eq!(shape, before);
    }

    #[test]
    fn test_four_rotations_round_trip_for_catalog() {
        for kind in TetrominoKind::ALL {
            let shape = kind.shape();
            let turned = shape.rotated().rotated().rotated().rotated();
            assert_eq!(turned, shape, "{kind:?}");
        }
    }

    #[test]
    fn test_catalog_shapes_are_square_tetrominoes() {
        for kind in TetrominoKind::ALL {
            let shape = kind.shape();
            assert_eq!(shape.width(), shape.height(), "{kind:?}");
            assert_eq!(shape.occupied_cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_clone_is_independent_copy() {
        let original = Tetromino::new(TetrominoKind::T);
        let mut copy = original.clone();
        copy = copy.rotated();

        assert_ne!(copy.shape(), original.shape());
        assert_eq!(original.shape(), &TetrominoKind::T.shape());
    }

    #[test]
    fn test_random_covers_every_kind() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; TetrominoKind::LEN];
        for _ in 0..500 {
            let piece = Tetromino::random(&mut rng);
            assert_eq!(piece.shape(), &piece.kind().shape());
            seen[piece.kind() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_kind_char_conversion() {
        for kind in TetrominoKind::ALL {
            assert_eq!(TetrominoKind::from_char(kind.as_char()), Some(kind));
            assert_eq!(kind.as_char().to_string().parse::<TetrominoKind>(), Ok(kind));
        }
        assert_eq!(TetrominoKind::from_char('X'), None);
        assert!("IO".parse::<TetrominoKind>().is_err());
        assert!("".parse::<TetrominoKind>().is_err());
    }

    #[test]
    fn test_shape_serializes_as_bits() {
        let json = serde_json::to_string(&TetrominoKind::O.shape()).unwrap();
        assert_eq!(json, "[[1,1],[1,1]]");
    }
}
