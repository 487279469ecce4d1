use crate::{ClearedRows, PieceKind};

/// A discrete player command.
///
/// Front ends map one input event to one command and hand it to
/// [`GameSession::apply`](super::GameSession::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Move one row down; locks the piece if it cannot move.
    SoftDrop,
    /// Rotate 90° clockwise in place.
    Rotate,
    HardDrop,
    TogglePause,
}

/// Result of a movement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    /// The piece moved or rotated.
    Moved,
    /// The piece could not move and stays where it was.
    Blocked,
    /// The piece locked into the board and the next piece spawned.
    Locked,
    /// The session is paused or over; nothing happened.
    Ignored,
}

/// Notification for the UI, queued by the session and drained by the front end.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEvent {
    /// The score to display. Sent once when the session starts and after
    /// every clear that scored.
    ScoreChanged { score: usize },
    /// A new piece was queued as the next piece.
    NextPieceChanged { kind: PieceKind },
    /// Rows were cleared by the last lock.
    LinesCleared {
        rows: ClearedRows,
        points: usize,
        level: usize,
    },
    /// The freshly spawned piece could not be placed. Sent exactly once.
    GameOver { final_score: usize },
}
