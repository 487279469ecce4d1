use std::time::Duration;

use blockfall_engine::{GameEvent, GameSession, PieceSeed};
use crossterm::event::Event;
use log::info;
use rand::Rng as _;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    input::{self, Action, KEY_BINDINGS},
    view::widgets::{KeyBindingDisplay, SessionDisplay},
};

/// The game screen: owns the running session and mirrors what it reports.
///
/// The displayed score and the game-over score are only updated from
/// [`GameEvent`]s, never by reading the session directly.
#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    fixed_seed: Option<PieceSeed>,
    score: usize,
    final_score: Option<usize>,
    is_exiting: bool,
}

fn start_session(fixed_seed: Option<PieceSeed>) -> GameSession {
    let seed = fixed_seed.unwrap_or_else(|| rand::rng().random());
    info!("[Play] new game with seed {seed}");
    GameSession::with_seed(seed)
}

impl PlayScreen {
    pub fn new(fixed_seed: Option<PieceSeed>) -> Self {
        let mut this = Self {
            session: start_session(fixed_seed),
            fixed_seed,
            score: 0,
            final_score: None,
            is_exiting: false,
        };
        this.sync_events();
        this
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn handle_event(&mut self, event: &Event) {
        match input::action_for_event(event) {
            Some(Action::Game(command)) => {
                self.session.apply(command);
                self.sync_events();
            }
            Some(Action::Quit) => self.is_exiting = true,
            Some(Action::Restart) if self.session.is_game_over() => self.restart(),
            Some(Action::Restart) | None => {}
        }
    }

    pub fn update(&mut self, elapsed: Duration) {
        self.session.tick(elapsed);
        self.sync_events();
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display =
            SessionDisplay::new(&self.session, self.score).final_score(self.final_score);
        let help = KeyBindingDisplay::new(KEY_BINDINGS);

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(24), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help, help_area);
    }

    fn restart(&mut self) {
        self.session = start_session(self.fixed_seed);
        self.score = 0;
        self.final_score = None;
        self.sync_events();
    }

    fn sync_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::ScoreChanged { score } => self.score = score,
                GameEvent::GameOver { final_score } => self.final_score = Some(final_score),
                GameEvent::NextPieceChanged { .. } | GameEvent::LinesCleared { .. } => {}
            }
        }
    }
}
