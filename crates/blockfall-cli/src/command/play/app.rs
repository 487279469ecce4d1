use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    command::play::screen::PlayScreen,
    config::PlayConfig,
    tui::{App, RenderMode, Tui},
};

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
    fps: u32,
}

impl PlayApp {
    pub fn new(config: &PlayConfig) -> Self {
        Self {
            screen: PlayScreen::new(config.seed),
            fps: config.fps,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        let rate = f64::from(self.fps);
        tui.set_tick_rate(rate);
        tui.set_render_mode(RenderMode::throttled_from_rate(rate));
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: &Event) {
        self.screen.handle_event(event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui, elapsed: Duration) {
        self.screen.update(elapsed);
    }
}
