//! Scripted player input.

use anyhow::{bail, Result};
use maze_runner_core::Direction;

/// Single scripted input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Move one cell.
    Move(Direction),
    /// Advance the countdown by one second.
    Tick,
}

/// Parses `U`/`D`/`L`/`R` moves and `T` ticks, ignoring case and whitespace.
pub(crate) fn parse(script: &str) -> Result<Vec<Input>> {
    let mut inputs = Vec::with_capacity(script.len());
    for (position, symbol) in script.chars().enumerate() {
        let input = match symbol.to_ascii_uppercase() {
            'U' => Input::Move(Direction::North),
            'D' => Input::Move(Direction::South),
            'L' => Input::Move(Direction::West),
            'R' => Input::Move(Direction::East),
            'T' => Input::Tick,
            symbol if symbol.is_whitespace() => continue,
            other => bail!("unexpected input {other:?} at position {position}"),
        };
        inputs.push(input);
    }
    Ok(inputs)
}
