use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render after state changes (tick or crossterm event).
    #[default]
    OnDirty,
    /// Render after state changes, but with minimum interval between renders.
    ///
    /// If events occur faster than the interval, they are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from frame rate (FPS).
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Event loop state management.
///
/// Manages tick/render intervals and returns the next event via `next()`.
/// If an interval is not set, that event type will not be generated.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop`.
    ///
    /// Tick interval is unset, and render mode defaults to `OnDirty`.
    /// The first tick measures its elapsed time from here.
    pub fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            last_render: past_time,
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the tick interval.
    ///
    /// Pass `None` to disable tick events.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    /// Sets the render mode.
    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Returns the next event.
    ///
    /// Blocks until a tick/render time is reached or a crossterm event occurs.
    /// If both tick and render are unset, only waits for crossterm events.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.poll_timers(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns the tick or render event due at `now`, if any.
    ///
    /// Ticks take priority over renders. A tick reports the time since the
    /// previous one, so a slow frame hands the game its full elapsed time.
    fn poll_timers(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(tick_interval) = self.tick_interval {
            let elapsed = now.saturating_duration_since(self.last_tick);
            if elapsed >= tick_interval {
                self.last_tick = now;
                self.dirty = true;
                return Some(TuiEvent::Tick(elapsed));
            }
        }

        let do_render = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if do_render {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(16);

    fn event_loop(start: Instant) -> EventLoop {
        EventLoop {
            tick_interval: Some(TICK),
            render_mode: RenderMode::Throttled(TICK),
            last_tick: start,
            last_render: start,
            dirty: false,
        }
    }

    #[test]
    fn test_initial_render() {
        let mut events = EventLoop::new();
        let now = Instant::now();
        assert!(matches!(events.poll_timers(now), Some(TuiEvent::Render)));
        assert!(events.poll_timers(now).is_none());
    }

    #[test]
    fn test_no_tick_before_interval() {
        let start = Instant::now();
        let mut events = event_loop(start);
        assert!(events.poll_timers(start + TICK / 2).is_none());
        assert_eq!(events.compute_timeout(start + TICK / 2), Some(TICK / 2));
    }

    #[test]
    fn test_tick_reports_elapsed_time() {
        let start = Instant::now();
        let mut events = event_loop(start);

        let late = start + Duration::from_millis(40);
        let Some(TuiEvent::Tick(elapsed)) = events.poll_timers(late) else {
            panic!("expected a tick");
        };
        assert_eq!(elapsed, Duration::from_millis(40));

        // The tick marks the state dirty, so a render follows.
        assert!(events.poll_timers(late).is_some_and(|e| e.is_render()));
        assert!(events.poll_timers(late).is_none());

        let Some(TuiEvent::Tick(elapsed)) = events.poll_timers(late + TICK) else {
            panic!("expected a tick");
        };
        assert_eq!(elapsed, TICK);
    }

    #[test]
    fn test_throttled_render_waits_for_interval() {
        let start = Instant::now();
        let mut events = event_loop(start);
        events.tick_interval = None;
        events.dirty = true;
        events.last_render = start;

        assert!(events.poll_timers(start + TICK / 4).is_none());
        assert_eq!(events.compute_timeout(start + TICK / 4), Some(TICK * 3 / 4));
        assert!(
            events
                .poll_timers(start + TICK)
                .is_some_and(|e| e.is_render())
        );
    }

    #[test]
    fn test_no_timeout_without_timers() {
        let start = Instant::now();
        let mut events = event_loop(start);
        events.tick_interval = None;
        assert_eq!(events.compute_timeout(start), None);
    }
}
