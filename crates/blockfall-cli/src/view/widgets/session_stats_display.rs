use std::{iter, time::Duration};

use blockfall_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

/// Values shown in the stats panel.
///
/// The score is passed in separately because the front end shows the score
/// it was last notified of, not the one it could query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    score: usize,
    level: usize,
    lines: usize,
    pieces: usize,
    drop_interval: Duration,
    play_time: Duration,
    line_cleared_counter: [usize; 5],
}

impl StatsSnapshot {
    pub fn new(session: &GameSession, score: usize) -> Self {
        let stats = session.stats();
        Self {
            score,
            level: stats.level(),
            lines: stats.total_cleared_lines(),
            pieces: stats.completed_pieces(),
            drop_interval: stats.drop_interval(),
            play_time: session.play_time(),
            line_cleared_counter: *stats.line_cleared_counter(),
        }
    }
}

pub struct SessionStatsDisplay<'a> {
    snapshot: StatsSnapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(snapshot: StatsSnapshot) -> Self {
        Self {
            snapshot,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap() + super::block_vertical_margin(self.block.as_ref())
    }
}

fn format_time(dur: Duration) -> String {
    format!(
        "{:0}:{:0>2}.{:0>2}",
        dur.as_secs() / 60,
        dur.as_secs() % 60,
        dur.subsec_millis() / 10
    )
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&StatsSnapshot) -> String),
    LabelValue(&'static str, &'static dyn Fn(&StatsSnapshot) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|stats| stats.score.to_string()),
    Row::FullLabel("TIME:"),
    Row::FullValue(&|stats| format_time(stats.play_time)),
    Row::Empty,
    Row::LabelValue("LEVEL:", &|stats| stats.level.to_string()),
    Row::LabelValue("LINES:", &|stats| stats.lines.to_string()),
    Row::LabelValue("SPEED:", &|stats| {
        format!("{}ms", stats.drop_interval.as_millis())
    }),
    Row::Empty,
    Row::LabelValue("PIECES:", &|stats| stats.pieces.to_string()),
    Row::LabelValue("SINGLES:", &|stats| stats.line_cleared_counter[1].to_string()),
    Row::LabelValue("DOUBLES:", &|stats| stats.line_cleared_counter[2].to_string()),
    Row::LabelValue("TRIPLES:", &|stats| stats.line_cleared_counter[3].to_string()),
    Row::LabelValue("TETRIS:", &|stats| stats.line_cleared_counter[4].to_string()),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas[..].iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(&self.snapshot), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(&self.snapshot), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::PieceSeed;

    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(Duration::ZERO), "0:00.00");
        assert_eq!(format_time(Duration::from_millis(83_456)), "1:23.45");
    }

    #[test]
    fn test_snapshot_uses_given_score() {
        let session = GameSession::with_seed(PieceSeed::from_bytes([1; 16]));
        let snapshot = StatsSnapshot::new(&session, 1234);
        assert_eq!(snapshot.score, 1234);
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.drop_interval, Duration::from_millis(1000));
    }

    #[test]
    fn test_render_shows_score_and_level() {
        let session = GameSession::with_seed(PieceSeed::from_bytes([1; 16]));
        let display = SessionStatsDisplay::new(StatsSnapshot::new(&session, 40));
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        let line = |y: u16| -> String {
            (0..area.width).map(|x| buf[(x, y)].symbol()).collect()
        };
        assert!(line(0).starts_with("SCORE:"));
        assert!(line(1).trim_end().ends_with("40"));
        assert!(line(5).starts_with("LEVEL:"));
        assert_eq!(line(5).trim_end().chars().last(), Some('1'));
    }
}
