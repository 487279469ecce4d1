use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::view::widgets::{
    BoardDisplay, PieceDisplay, SessionStatsDisplay, StatsSnapshot, color, style,
};

/// The whole game screen: stats, board and next piece, plus the pause and
/// game-over banners.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    score: usize,
    final_score: Option<usize>,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, score: usize) -> Self {
        Self {
            session,
            score,
            final_score: None,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    /// Score reported when the game ended, shown in the game-over banner.
    pub fn final_score(self, final_score: Option<usize>) -> Self {
        Self {
            final_score,
            ..self
        }
    }

    fn popup(&self) -> Option<(Text<'static>, Style)> {
        match self.session.session_state() {
            SessionState::Playing => None,
            SessionState::Paused => Some((
                Text::from("PAUSED"),
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            )),
            SessionState::GameOver => {
                let score = self.final_score.unwrap_or(self.score);
                let text = Text::from(vec![
                    Line::from("GAME OVER!!"),
                    Line::from(format!("SCORE: {score}")),
                    Line::from("R: Restart  Q: Quit"),
                ]);
                Some((text, Style::new().fg(color::WHITE).bg(color::RED)))
            }
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let style = style::DEFAULT;
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.session.session_state() {
            SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };

        let game_board = {
            let widget = BoardDisplay::new(self.session.board())
                .block(Block::bordered().border_style(border_style).style(style));
            // The active piece is hidden while paused.
            if self.session.session_state().is_playing() {
                widget.active_piece(*self.session.active_piece())
            } else {
                widget
            }
        };
        let next_panel = PieceDisplay::new()
            .piece(*self.session.next_piece())
            .block(
                Block::bordered()
                    .title(Line::from("NEXT").centered())
                    .padding(block_padding)
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let session_stats =
            SessionStatsDisplay::new(StatsSnapshot::new(self.session, self.score)).block(
                Block::bordered()
                    .title(Line::from("STATS").centered())
                    .padding(block_padding)
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some((text, style)) = self.popup() {
            let text_height = u16::try_from(text.height()).unwrap_or(u16::MAX);
            let block = Block::new().style(style);
            let text = text.style(style).centered();
            let area = board_area.centered(
                Constraint::Length(game_board_width),
                Constraint::Length(text_height + 2),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(
                inner.centered_vertically(Constraint::Length(text_height)),
                buf,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Command, PieceSeed};

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([3; 16]);

    fn render_to_string(display: &SessionDisplay<'_>) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_playing_has_no_banner() {
        let session = GameSession::with_seed(SEED);
        let screen = render_to_string(&SessionDisplay::new(&session, 0));
        assert!(screen.contains("NEXT"));
        assert!(screen.contains("STATS"));
        assert!(!screen.contains("PAUSED"));
    }

    #[test]
    fn test_paused_banner() {
        let mut session = GameSession::with_seed(SEED);
        session.apply(Command::TogglePause);
        let screen = render_to_string(&SessionDisplay::new(&session, 0));
        assert!(screen.contains("PAUSED"));
    }

    #[test]
    fn test_game_over_banner_shows_final_score() {
        let session = GameSession::with_seed(SEED);
        let display = SessionDisplay::new(&session, 0).final_score(Some(1200));
        assert!(display.popup().is_none());

        let mut session = GameSession::with_seed(SEED);
        while !session.is_game_over() {
            session.apply(Command::HardDrop);
        }
        let display = SessionDisplay::new(&session, 0).final_score(Some(1200));
        let screen = render_to_string(&display);
        assert!(screen.contains("GAME OVER!!"));
        assert!(screen.contains("SCORE: 1200"));
    }
}
