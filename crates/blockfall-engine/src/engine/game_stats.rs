use std::time::Duration;

/// Base points for line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// The base is multiplied by the level in effect before the clear.
const SCORE_TABLE: [usize; 5] = [0, 40, 100, 300, 1200];

const LINES_PER_LEVEL: usize = 10;
const INITIAL_DROP_INTERVAL_MS: u64 = 1000;
const DROP_INTERVAL_STEP_MS: u64 = 100;
const MIN_DROP_INTERVAL_MS: u64 = 100;

/// Game statistics tracking score, level, lines cleared, and piece count.
///
/// - **Score**: base points × level for each clear
/// - **Level**: starts at 1, one more per 10 cleared lines
/// - **Drop interval**: 1000 ms at level 1, 100 ms faster per level,
///   never below 100 ms
/// - **Completed pieces**: total number of pieces locked
/// - **Line clear distribution**: count of single, double, triple, quad
///   line clears
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// assert_eq!(stats.complete_piece_drop(4), 1200);
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.drop_interval(), Duration::from_millis(1000));
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new tracker: level 1, everything else at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of line clears by count.
    ///
    /// Array indices represent:
    /// - `[0]`: Number of drops with 0 lines cleared
    /// - `[1]`: Number of singles (1 line)
    /// - `[2]`: Number of doubles (2 lines)
    /// - `[3]`: Number of triples (3 lines)
    /// - `[4]`: Number of tetrises (4 lines)
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Time between automatic drops at the current level.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        let steps = u64::try_from(self.level - 1).unwrap_or(u64::MAX);
        let millis = INITIAL_DROP_INTERVAL_MS
            .saturating_sub(steps.saturating_mul(DROP_INTERVAL_STEP_MS))
            .max(MIN_DROP_INTERVAL_MS);
        Duration::from_millis(millis)
    }

    /// Updates statistics after a piece locks and returns the points awarded.
    ///
    /// With zero cleared lines only the piece count changes. Clears larger
    /// than four rows cannot come from a single piece and score as four.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        self.completed_pieces += 1;
        let bucket = cleared_lines.min(self.line_cleared_counter.len() - 1);
        self.line_cleared_counter[bucket] += 1;
        if cleared_lines == 0 {
            return 0;
        }

        let points = SCORE_TABLE[bucket] * self.level;
        self.score += points;
        self.total_cleared_lines += cleared_lines;
        self.level = self.total_cleared_lines / LINES_PER_LEVEL + 1;
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_stats() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.total_cleared_lines(), 0);
        assert_eq!(stats.completed_pieces(), 0);
        assert_eq!(stats.drop_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_score_table_at_level_one() {
        for (lines, expected) in [(1, 40), (2, 100), (3, 300), (4, 1200)] {
            let mut stats = GameStats::new();
            assert_eq!(stats.complete_piece_drop(lines), expected);
            assert_eq!(stats.score(), expected);
            assert_eq!(stats.total_cleared_lines(), lines);
        }
    }

    #[test]
    fn test_no_clear_changes_only_piece_count() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(2);
        let before = stats.clone();

        assert_eq!(stats.complete_piece_drop(0), 0);
        assert_eq!(stats.score(), before.score());
        assert_eq!(stats.level(), before.level());
        assert_eq!(stats.total_cleared_lines(), before.total_cleared_lines());
        assert_eq!(stats.drop_interval(), before.drop_interval());
        assert_eq!(stats.completed_pieces(), before.completed_pieces() + 1);
        assert_eq!(stats.line_cleared_counter()[0], 1);
    }

    #[test]
    fn test_level_up_uses_level_before_clear() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(4);
        stats.complete_piece_drop(4);
        assert_eq!(stats.level(), 1);

        // 8 -> 11 lines: scored at level 1, then level 2.
        assert_eq!(stats.complete_piece_drop(3), 300);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.drop_interval(), Duration::from_millis(900));

        assert_eq!(stats.complete_piece_drop(1), 80);
        assert_eq!(stats.score(), 1200 + 1200 + 300 + 80);
    }

    #[test]
    fn test_level_changes_only_at_multiples_of_ten() {
        let mut stats = GameStats::new();
        let mut previous_level = stats.level();
        for _ in 0..45 {
            stats.complete_piece_drop(1);
            let level = stats.level();
            assert!(level >= previous_level);
            if level != previous_level {
                assert_eq!(stats.total_cleared_lines() % 10, 0);
            }
            assert_eq!(level, stats.total_cleared_lines() / 10 + 1);
            previous_level = level;
        }
        assert_eq!(stats.level(), 5);
    }

    #[test]
    fn test_drop_interval_floor() {
        let mut stats = GameStats::new();
        let expected = [1000, 900, 800, 700, 600, 500, 400, 300, 200, 100, 100, 100];
        for millis in expected {
            assert_eq!(stats.drop_interval(), Duration::from_millis(millis));
            for _ in 0..10 {
                stats.complete_piece_drop(1);
            }
        }
    }

    #[test]
    fn test_line_clear_histogram() {
        let mut stats = GameStats::new();
        for lines in [0, 1, 1, 2, 3, 4, 4, 4] {
            stats.complete_piece_drop(lines);
        }
        assert_eq!(stats.line_cleared_counter(), &[1, 2, 1, 1, 3]);
        assert_eq!(stats.completed_pieces(), 8);
    }
}
