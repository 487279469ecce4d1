use blockfall_engine::Command;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the front end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(Command),
    Quit,
    /// Start a new game. Only honoured once the current one is over.
    Restart,
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        Self::Game(command)
    }
}

/// Key legend shown under the board, in the order keys are listed.
pub const KEY_BINDINGS: &[(&[&str], &str)] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["Q"], "Quit"),
];

/// Maps a terminal event to an action.
///
/// Only key presses count; releases and repeats reported by some terminals
/// are ignored so that one physical press gives one command.
pub fn action_for_event(event: &Event) -> Option<Action> {
    let Event::Key(key) = event else {
        return None;
    };
    action_for_key(*key)
}

fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    let action = match key.code {
        KeyCode::Left => Command::MoveLeft.into(),
        KeyCode::Right => Command::MoveRight.into(),
        KeyCode::Down => Command::SoftDrop.into(),
        KeyCode::Up => Command::Rotate.into(),
        KeyCode::Char(' ') => Command::HardDrop.into(),
        KeyCode::Char('p' | 'P') => Command::TogglePause.into(),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('r' | 'R') => Action::Restart,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            action_for_event(&press(KeyCode::Left)),
            Some(Action::Game(Command::MoveLeft))
        );
        assert_eq!(
            action_for_event(&press(KeyCode::Right)),
            Some(Action::Game(Command::MoveRight))
        );
        assert_eq!(
            action_for_event(&press(KeyCode::Down)),
            Some(Action::Game(Command::SoftDrop))
        );
        assert_eq!(
            action_for_event(&press(KeyCode::Up)),
            Some(Action::Game(Command::Rotate))
        );
    }

    #[test]
    fn test_letter_keys_ignore_case() {
        for c in ['p', 'P'] {
            assert_eq!(
                action_for_event(&press(KeyCode::Char(c))),
                Some(Action::Game(Command::TogglePause))
            );
        }
        for c in ['q', 'Q'] {
            assert_eq!(action_for_event(&press(KeyCode::Char(c))), Some(Action::Quit));
        }
        assert_eq!(
            action_for_event(&press(KeyCode::Char('r'))),
            Some(Action::Restart)
        );
        assert_eq!(
            action_for_event(&press(KeyCode::Char(' '))),
            Some(Action::Game(Command::HardDrop))
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(action_for_event(&event), Some(Action::Quit));
        assert_eq!(action_for_event(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let event = Event::Key(KeyEvent::new_with_kind_and_state(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        ));
        assert_eq!(action_for_event(&event), None);
    }

    #[test]
    fn test_non_key_events_are_ignored() {
        assert_eq!(action_for_event(&Event::Resize(80, 24)), None);
        assert_eq!(action_for_event(&Event::FocusLost), None);
    }
}
