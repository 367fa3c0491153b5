//! Translation of typed input into puzzle commands.

use anyhow::{bail, Result};
use phrase_push_core::Direction;

/// Request distilled from a single typed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Move the player one cell.
    Move(Direction),
    /// Stop the session.
    Quit,
}

/// Maps an interactive token to an input.
///
/// Accepts `w/a/s/d`, vi-style `h/j/k/l`, arrow names and compass names,
/// ignoring case. Compass initials `n` and `e` work too; `s` already means
/// south, while `w` stays north as in `w/a/s/d`.
pub(crate) fn parse_token(token: &str) -> Option<Input> {
    let input = match token.to_ascii_lowercase().as_str() {
        "w" | "k" | "n" | "up" | "north" => Input::Move(Direction::North),
        "d" | "l" | "e" | "right" | "east" => Input::Move(Direction::East),
        "s" | "j" | "down" | "south" => Input::Move(Direction::South),
        "a" | "h" | "left" | "west" => Input::Move(Direction::West),
        "q" | "quit" | "exit" => Input::Quit,
        _ => return None,
    };
    Some(input)
}

/// Parses a compact move script made of `U`, `D`, `L` and `R` letters.
///
/// Whitespace and commas are ignored so long scripts may be wrapped.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Direction>> {
    let mut directions = Vec::with_capacity(script.len());
    for (position, letter) in script.chars().enumerate() {
        let direction = match letter.to_ascii_uppercase() {
            'U' => Direction::North,
            'R' => Direction::East,
            'D' => Direction::South,
            'L' => Direction::West,
            other if other.is_whitespace() || other == ',' => continue,
            other => bail!("unexpected move `{other}` at position {position} of the script"),
        };
        directions.push(direction);
    }
    Ok(directions)
}
