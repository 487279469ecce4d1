use blockfall_engine::{Cell, PieceColor};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::widgets::style;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub const fn filled(color: PieceColor) -> Self {
        Self::new(style::filled(color), "")
    }

    pub const fn empty(show_dots: bool) -> Self {
        if show_dots {
            Self::new(style::EMPTY_DOT, ".")
        } else {
            Self::new(style::EMPTY, "")
        }
    }

    pub const fn from_cell(cell: Cell, show_dots: bool) -> Self {
        match cell {
            Cell::Empty => Self::empty(show_dots),
            Cell::Filled(color) => Self::filled(color),
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::PieceKind;
    use ratatui::style::Color;

    use super::*;

    #[test]
    fn test_filled_cell_uses_piece_color() {
        let display = BlockDisplay::from_cell(Cell::Filled(PieceKind::L.color()), true);
        assert_eq!(display.style.bg, Some(Color::Rgb(0xf0, 0xa0, 0x00)));
        assert_eq!(display.symbol, "");
    }

    #[test]
    fn test_empty_cell_dots() {
        assert_eq!(BlockDisplay::from_cell(Cell::Empty, true).symbol, ".");
        assert_eq!(BlockDisplay::from_cell(Cell::Empty, false).symbol, "");
    }

    #[test]
    fn test_render_fills_area() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        BlockDisplay::filled(PieceKind::I.color()).render(area, &mut buf);
        for x in 0..2 {
            assert_eq!(buf[(x, 0)].bg, Color::Rgb(0x00, 0xf0, 0xf0));
        }
    }
}
