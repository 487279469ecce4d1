use arrayvec::ArrayVec;

use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{Piece, PieceColor},
};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// Nothing locked here.
    #[default]
    Empty,
    /// Locked cell, holding the color of the piece that locked it.
    Filled(PieceColor),
}

impl Cell {
    #[must_use]
    pub fn color(self) -> Option<PieceColor> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

/// Board row indices removed by one line clear, in the order they were found
/// (bottom-most first), expressed in the coordinates before the clear.
pub type ClearedRows = ArrayVec<usize, BOARD_HEIGHT>;

type Row = [Cell; BOARD_WIDTH];

const EMPTY_ROW: Row = [Cell::Empty; BOARD_WIDTH];

/// The grid of locked cells, 10 columns by 20 rows.
///
/// Row 0 is the top of the board. The dimensions are fixed by the type.
/// Cells above the board (negative rows) are not stored: pieces may
/// overhang the top edge, but never the side walls or the floor.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::EMPTY;
/// let piece = Piece::new(PieceKind::O).moved(0, 18);
///
/// assert!(!board.is_colliding(&piece, 0, 0));
/// assert!(board.is_colliding(&piece, 0, 1)); // floor
///
/// board.fill_piece(&piece);
/// assert!(board.cell(4, 19).is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    /// Returns the cell at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    /// Overwrites a single cell.
    ///
    /// Used to set up board positions; gameplay only changes cells through
    /// [`Board::fill_piece`] and [`Board::clear_lines`].
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.rows.iter()
    }

    /// Counts the filled cells on the board.
    #[must_use]
    pub fn filled_cells(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_filled()).count()
    }

    /// Checks whether `piece`, offset by `(dx, dy)`, overlaps a wall, the
    /// floor, or a locked cell.
    ///
    /// Cells above the top edge only take part in the wall check.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        piece.occupied_positions().any(|(x, y)| {
            let Some(col) = usize::try_from(x + dx).ok().filter(|&x| x < BOARD_WIDTH) else {
                return true;
            };
            match usize::try_from(y + dy) {
                Err(_) => false,
                Ok(row) => row >= BOARD_HEIGHT || self.rows[row][col].is_filled(),
            }
        })
    }

    /// Writes the piece's color into every cell it covers on the board.
    ///
    /// Cells above the top edge are dropped. Returns how many cells were
    /// written.
    pub fn fill_piece(&mut self, piece: &Piece) -> usize {
        let cell = Cell::Filled(piece.color());
        let mut written = 0;
        for (x, y) in piece.occupied_positions() {
            let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if let Some(target) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
                *target = cell;
                written += 1;
            }
        }
        written
    }

    /// Removes complete rows and returns their indices.
    ///
    /// Rows are scanned from the bottom up. Each complete row is removed,
    /// everything above it moves down one row, and an empty row appears at
    /// the top; the same index is then checked again so stacked complete
    /// rows are all found.
    pub fn clear_lines(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = BOARD_HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.rows[row].iter().all(|c| c.is_filled()) {
                self.rows[..=row].rotate_right(1);
                self.rows[0] = EMPTY_ROW;
                cleared.push(row - cleared.len());
                continue;
            }
            y -= 1;
        }
        cleared
    }
}
