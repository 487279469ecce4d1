use blockfall_engine::Piece;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::BlockDisplay;

/// Draws a single piece centered in its area, e.g. the next piece.
///
/// Empty rows and columns of the shape matrix are trimmed before centering.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: Piece) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Column and row ranges of the occupied cells, as `(x, y, width, height)`.
fn bounding_box(piece: &Piece) -> (u8, u8, u8, u8) {
    let shape = piece.shape();
    let (mut min_x, mut min_y) = (u8::MAX, u8::MAX);
    let (mut max_x, mut max_y) = (0, 0);
    for (x, y) in shape.occupied_cells() {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    if min_x > max_x {
        return (0, 0, 0, 0);
    }
    (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let empty_block = BlockDisplay::empty(false);
        let Some(piece) = &self.piece else {
            Widget::render(&empty_block, area, buf);
            return;
        };

        let (min_x, min_y, width, height) = bounding_box(piece);
        let piece_area = area.centered(
            Constraint::Length(u16::from(width) * BlockDisplay::width()),
            Constraint::Length(u16::from(height) * BlockDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied_block = BlockDisplay::filled(piece.color());
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                let shape_x = usize::from(min_x) + x;
                let shape_y = usize::from(min_y) + y;
                if piece.shape().is_occupied(shape_x, shape_y) {
                    Widget::render(&occupied_block, grid_cell, buf);
                } else {
                    Widget::render(&empty_block, grid_cell, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::PieceKind;

    use super::*;

    #[test]
    fn test_bounding_box_trims_empty_rows() {
        assert_eq!(bounding_box(&Piece::new(PieceKind::I)), (0, 1, 4, 1));
        assert_eq!(bounding_box(&Piece::new(PieceKind::O)), (0, 0, 2, 2));
        assert_eq!(bounding_box(&Piece::new(PieceKind::T)), (0, 0, 3, 2));
    }

    #[test]
    fn test_bounding_box_of_rotated_piece() {
        let piece = Piece::new(PieceKind::I).rotated_clockwise();
        assert_eq!(bounding_box(&piece), (2, 0, 1, 4));
    }
}
