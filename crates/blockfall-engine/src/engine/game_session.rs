use std::{time::Duration, vec};

use log::{debug, info};

use crate::core::{board::Board, piece::Piece};

use super::{
    GameStats,
    command::{Command, GameEvent, MoveOutcome},
    piece_generator::{PieceGenerator, PieceSeed},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// One game from the first spawn to game over.
///
/// Owns the board, the active and next pieces, the statistics and the
/// pause/over state. It holds no timer: the caller drives it with
/// [`tick`](Self::tick) and player commands, and reads state back through
/// the query methods and [`drain_events`](Self::drain_events).
///
/// Commands only take effect while [`SessionState::Playing`]; in any other
/// state they return [`MoveOutcome::Ignored`]. Game over is terminal; a new
/// session is needed to play again.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active_piece: Piece,
    next_piece: Piece,
    generator: PieceGenerator,
    stats: GameStats,
    session_state: SessionState,
    drop_counter: Duration,
    play_time: Duration,
    events: Vec<GameEvent>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Starts a session with a random piece sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(PieceGenerator::new())
    }

    /// Starts a session whose piece sequence is fixed by `seed`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_generator(PieceGenerator::with_seed(seed))
    }

    fn with_generator(mut generator: PieceGenerator) -> Self {
        let next_piece = generator.next_piece();
        let mut this = Self {
            board: Board::EMPTY,
            active_piece: next_piece,
            next_piece,
            generator,
            stats: GameStats::new(),
            session_state: SessionState::Playing,
            drop_counter: Duration::ZERO,
            play_time: Duration::ZERO,
            events: Vec::new(),
        };
        this.spawn_piece();
        this.events.push(GameEvent::ScoreChanged { score: 0 });
        this
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        &self.active_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.session_state.is_paused()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session_state.is_game_over()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.stats.total_cleared_lines()
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.stats.drop_interval()
    }

    /// Total time spent playing, excluding pauses.
    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    /// Takes the notifications queued since the last call.
    pub fn drain_events(&mut self) -> vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Checks `piece`, offset by `(dx, dy)`, against the walls, the floor and
    /// the locked cells.
    #[must_use]
    pub fn check_collision(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        self.board.is_colliding(piece, dx, dy)
    }

    /// Advances the drop timer.
    ///
    /// When the accumulated time exceeds the drop interval, the active piece
    /// moves down one row (locking if it cannot) and the timer restarts.
    /// At most one drop happens per call, whatever `elapsed` is. Returns
    /// the outcome of that drop, or `None` if no drop was due.
    pub fn tick(&mut self, elapsed: Duration) -> Option<MoveOutcome> {
        if !self.session_state.is_playing() {
            return None;
        }
        self.play_time += elapsed;
        self.drop_counter += elapsed;
        if self.drop_counter <= self.stats.drop_interval() {
            return None;
        }
        let outcome = self.move_piece(0, 1);
        self.drop_counter = Duration::ZERO;
        Some(outcome)
    }

    /// Executes a player command.
    ///
    /// Returns `None` for [`Command::TogglePause`], which has no movement
    /// outcome.
    pub fn apply(&mut self, command: Command) -> Option<MoveOutcome> {
        let outcome = match command {
            Command::MoveLeft => self.move_piece(-1, 0),
            Command::MoveRight => self.move_piece(1, 0),
            Command::SoftDrop => self.move_piece(0, 1),
            Command::Rotate => self.rotate_piece(),
            Command::HardDrop => self.hard_drop(),
            Command::TogglePause => {
                self.toggle_pause();
                return None;
            }
        };
        Some(outcome)
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
        debug!("[GameSession] state is now {:?}", self.session_state);
    }

    /// Moves the active piece by `(dx, dy)`.
    ///
    /// A blocked downward move locks the piece where it is, clears lines and
    /// spawns the next piece. A blocked sideways move changes nothing.
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> MoveOutcome {
        if !self.session_state.is_playing() {
            return MoveOutcome::Ignored;
        }
        if !self.board.is_colliding(&self.active_piece, dx, dy) {
            self.active_piece = self.active_piece.moved(dx, dy);
            return MoveOutcome::Moved;
        }
        if dy > 0 {
            self.complete_piece_drop();
            return MoveOutcome::Locked;
        }
        MoveOutcome::Blocked
    }

    /// Drops the active piece to the lowest free position and locks it.
    pub fn hard_drop(&mut self) -> MoveOutcome {
        if !self.session_state.is_playing() {
            return MoveOutcome::Ignored;
        }
        while !self.board.is_colliding(&self.active_piece, 0, 1) {
            self.active_piece = self.active_piece.moved(0, 1);
        }
        self.complete_piece_drop();
        MoveOutcome::Locked
    }

    /// Rotates the active piece 90° clockwise if the rotated shape fits
    /// without moving it.
    pub fn rotate_piece(&mut self) -> MoveOutcome {
        if !self.session_state.is_playing() {
            return MoveOutcome::Ignored;
        }
        let rotated = self.active_piece.rotated_clockwise();
        if self.board.is_colliding(&rotated, 0, 0) {
            return MoveOutcome::Blocked;
        }
        self.active_piece = rotated;
        MoveOutcome::Moved
    }

    fn complete_piece_drop(&mut self) {
        self.lock_piece();
        self.clear_lines();
        self.spawn_piece();
    }

    fn lock_piece(&mut self) {
        let written = self.board.fill_piece(&self.active_piece);
        debug!(
            "[GameSession] locked {} at {:?} ({written} cells on board)",
            self.active_piece.kind().as_char(),
            self.active_piece.position(),
        );
    }

    fn clear_lines(&mut self) {
        let rows = self.board.clear_lines();
        let level_before = self.stats.level();
        let points = self.stats.complete_piece_drop(rows.len());
        if rows.is_empty() {
            return;
        }

        info!(
            "[GameSession] cleared rows {:?} for {points} points (score {})",
            rows.as_slice(),
            self.stats.score(),
        );
        if self.stats.level() != level_before {
            info!(
                "[GameSession] level {} reached, drop interval {:?}",
                self.stats.level(),
                self.stats.drop_interval(),
            );
        }
        self.events.push(GameEvent::LinesCleared {
            rows,
            points,
            level: self.stats.level(),
        });
        self.events.push(GameEvent::ScoreChanged {
            score: self.stats.score(),
        });
    }

    fn spawn_piece(&mut self) {
        self.active_piece = self.next_piece;
        self.next_piece = self.generator.next_piece();
        debug!(
            "[GameSession] spawned {}, next {}",
            self.active_piece.kind().as_char(),
            self.next_piece.kind().as_char(),
        );

        if self.board.is_colliding(&self.active_piece, 0, 0) {
            self.session_state = SessionState::GameOver;
            info!("[GameSession] game over, final score {}", self.stats.score());
            self.events.push(GameEvent::GameOver {
                final_score: self.stats.score(),
            });
        }

        self.events.push(GameEvent::NextPieceChanged {
            kind: self.next_piece.kind(),
        });
    }
}
