use dopo_core::Direction;
use thiserror::Error;

/// Player action performed before a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Step one cell.
    Move(Direction),
    /// Lay a run of ice ahead.
    Create,
    /// Shatter player ice ahead.
    Break,
    /// Do nothing this tick.
    Idle,
}

/// Errors raised while reading an action script.
#[derive(Debug, PartialEq, Eq, Error)]
pub(crate) enum ScriptError {
    /// The script contained a symbol without a matching action.
    #[error("unknown action `{symbol}` at position {index}; expected one of N S E W C B .")]
    UnknownAction {
        /// Offending character.
        symbol: char,
        /// Zero-based index within the script.
        index: usize,
    },
}

/// Parses a script of one symbol per tick, ignoring whitespace.
pub(crate) fn parse(script: &str) -> Result<Vec<Action>, ScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, symbol)| !symbol.is_whitespace())
        .map(|(index, symbol)| match symbol.to_ascii_uppercase() {
            'N' => Ok(Action::Move(Direction::North)),
            'S' => Ok(Action::Move(Direction::South)),
            'E' => Ok(Action::Move(Direction::East)),
            'W' => Ok(Action::Move(Direction::West)),
            'C' => Ok(Action::Create),
            'B' => Ok(Action::Break),
            '.' => Ok(Action::Idle),
            _ => Err(ScriptError::UnknownAction { symbol, index }),
        })
        .collect()
}
