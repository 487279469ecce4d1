use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::BOARD_WIDTH;

/// Largest width or height of any piece shape.
pub const MAX_SHAPE_SIZE: usize = 4;

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const SPAWN_CENTER_X: i32 = (BOARD_WIDTH / 2) as i32;

/// RGB color of a piece, also used for the board cells it locks into.
///
/// Displays as a lowercase `#rrggbb` string.
///
/// ```
/// use blockfall_engine::PieceKind;
///
/// assert_eq!(PieceKind::O.color().to_string(), "#f0f000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct PieceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PieceColor {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Binary occupancy matrix of a piece, at most 4×4.
///
/// The matrix is rectangular; rotation swaps its width and height.
/// Values are small and `Copy`, so every piece owns its own matrix and
/// rotating one piece never affects another or the spawn table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Builds a shape from rows of `0`/`1` values.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= MAX_SHAPE_SIZE);
        assert!(H > 0 && H <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            cells,
        }
    }

    #[must_use]
    pub const fn width(&self) -> u8 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Returns whether the cell at column `x`, row `y` of the matrix is occupied.
    ///
    /// Cells outside the matrix are reported as empty.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < usize::from(self.width) && y < usize::from(self.height) && self.cells[y][x]
    }

    /// Iterates over the rows of the matrix, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..usize::from(self.height)]
            .iter()
            .map(|row| &row[..usize::from(self.width)])
    }

    /// Iterates over the `(column, row)` offsets of occupied cells.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| {
                self.cells[usize::from(y)][usize::from(x)].then_some((x, y))
            })
        })
    }

    /// Returns the matrix rotated 90° clockwise.
    ///
    /// The cell at `(row, col)` moves to `(col, height - 1 - row)`.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let height = usize::from(self.height);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in self.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                cells[x][height - 1 - y] = cell;
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

/// Picks one of the seven kinds with equal probability.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::J,
        Self::L,
        Self::O,
        Self::S,
        Self::T,
        Self::Z,
    ];

    /// Returns the shape this kind spawns with.
    #[must_use]
    pub const fn spawn_shape(self) -> Shape {
        PIECE_TEMPLATES[self as usize].0
    }

    /// Returns the color cells of this kind are drawn and locked with.
    #[must_use]
    pub const fn color(self) -> PieceColor {
        PIECE_TEMPLATES[self as usize].1
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }
}

const PIECE_TEMPLATES: [(Shape, PieceColor); PieceKind::LEN] = [
    // I-piece
    (
        Shape::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
        PieceColor::rgb(0x00, 0xf0, 0xf0),
    ),
    // J-piece
    (
        Shape::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
        PieceColor::rgb(0x00, 0x00, 0xf0),
    ),
    // L-piece
    (
        Shape::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
        PieceColor::rgb(0xf0, 0xa0, 0x00),
    ),
    // O-piece
    (
        Shape::from_rows([[1, 1], [1, 1]]),
        PieceColor::rgb(0xf0, 0xf0, 0x00),
    ),
    // S-piece
    (
        Shape::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
        PieceColor::rgb(0x00, 0xf0, 0x00),
    ),
    // T-piece
    (
        Shape::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
        PieceColor::rgb(0xa0, 0x00, 0xf0),
    ),
    // Z-piece
    (
        Shape::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
        PieceColor::rgb(0xf0, 0x00, 0x00),
    ),
];

/// A piece on the board: its kind, current shape and anchor position.
///
/// The anchor `(x, y)` is the board position of the shape's top-left
/// matrix cell. It is signed because a rotated shape may have empty
/// leading columns that sit outside the board.
///
/// Pieces are values: moving or rotating returns a new `Piece`, and the
/// session decides whether to keep it.
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::T);
/// assert_eq!(piece.position(), (4, 0));
///
/// let moved = piece.moved(1, 2);
/// assert_eq!(moved.position(), (5, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece at its spawn position: horizontally centered, top row.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        let shape = kind.spawn_shape();
        Self {
            kind,
            shape,
            x: SPAWN_CENTER_X - i32::from(shape.width()) / 2,
            y: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.kind.color()
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Iterates over the board coordinates `(x, y)` of occupied cells.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_cells()
            .map(move |(dx, dy)| (self.x + i32::from(dx), self.y + i32::from(dy)))
    }

    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Returns the piece rotated 90° clockwise around its anchor.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        Self {
            shape: self.shape.rotated_clockwise(),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied(shape: &Shape) -> Vec<(u8, u8)> {
        shape.occupied_cells().collect()
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(occupied(&kind.spawn_shape()).len(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_spawn_positions_are_centered() {
        assert_eq!(Piece::new(PieceKind::I).position(), (3, 0));
        assert_eq!(Piece::new(PieceKind::O).position(), (4, 0));
        for kind in [
            PieceKind::J,
            PieceKind::L,
            PieceKind::S,
            PieceKind::T,
            PieceKind::Z,
        ] {
            assert_eq!(Piece::new(kind).position(), (4, 0), "{kind:?}");
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = PieceKind::T.spawn_shape().rotated_clockwise();
        assert_eq!(
            rotated,
            Shape::from_rows([[0, 1, 0], [0, 1, 1], [0, 1, 0]])
        );
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let shape = Shape::from_rows([[1, 1, 1], [1, 0, 0]]);
        let rotated = shape.rotated_clockwise();
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
        assert_eq!(rotated, Shape::from_rows([[1, 1], [0, 1], [0, 1]]));
    }

    #[test]
    fn test_rotate_i_becomes_vertical() {
        let rotated = PieceKind::I.spawn_shape().rotated_clockwise();
        assert_eq!(occupied(&rotated), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for kind in PieceKind::ALL {
            let shape = kind.spawn_shape();
            let mut rotated = shape;
            for _ in 0..4 {
                rotated = rotated.rotated_clockwise();
            }
            assert_eq!(rotated, shape, "{kind:?}");
        }
    }

    #[test]
    fn test_rotation_does_not_touch_template() {
        let piece = Piece::new(PieceKind::L);
        let rotated = piece.rotated_clockwise();
        assert_ne!(rotated.shape(), piece.shape());
        assert_eq!(PieceKind::L.spawn_shape(), *piece.shape());
    }

    #[test]
    fn test_occupied_positions_follow_anchor() {
        let piece = Piece::new(PieceKind::O).moved(-1, 3);
        let cells: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(cells, vec![(3, 3), (4, 3), (3, 4), (4, 4)]);
    }

    #[test]
    fn test_is_occupied_outside_matrix() {
        let shape = PieceKind::O.spawn_shape();
        assert!(shape.is_occupied(1, 1));
        assert!(!shape.is_occupied(2, 0));
        assert!(!shape.is_occupied(0, 2));
    }

    #[test]
    fn test_colors_are_distinct() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(a.color(), b.color());
            }
        }
        assert_eq!(PieceKind::I.color().to_string(), "#00f0f0");
        assert_eq!(PieceKind::L.color().to_string(), "#f0a000");
    }

    #[test]
    fn test_uniform_distribution_covers_all_kinds() {
        use rand::SeedableRng as _;

        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        let mut seen = [0usize; PieceKind::LEN];
        for _ in 0..7000 {
            let kind: PieceKind = rng.random();
            seen[kind as usize] += 1;
        }
        for count in seen {
            assert!((700..1300).contains(&count), "skewed distribution: {seen:?}");
        }
    }
}
