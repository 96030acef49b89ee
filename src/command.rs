use crate::world::Direction;
use std::str::FromStr;
use thiserror::Error;

/// A single tick's worth of player input
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// Turn the snake before the tick
    Turn(Direction),
    /// Let the tick happen with no input
    Wait,
}

impl Command {
    /// Map a character of a move script to a command, using the same keys as
    /// the interactive game: `w`/`k` up, `s`/`j` down, `a`/`h` left, `d`/`l`
    /// right, and `.` for no input.
    pub fn from_char(ch: char) -> Option<Command> {
        match ch.to_ascii_lowercase() {
            'w' | 'k' => Some(Command::Turn(Direction::Up)),
            's' | 'j' => Some(Command::Turn(Direction::Down)),
            'a' | 'h' => Some(Command::Turn(Direction::Left)),
            'd' | 'l' => Some(Command::Turn(Direction::Right)),
            '.' => Some(Command::Wait),
            _ => None,
        }
    }
}

/// A sequence of commands, one per tick
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Script(Vec<Command>);

impl Script {
    pub fn commands(&self) -> &[Command] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    /// Parse a move script.  Whitespace is ignored.
    fn from_str(s: &str) -> Result<Script, ScriptError> {
        s.char_indices()
            .filter(|(_, ch)| !ch.is_whitespace())
            .map(|(offset, ch)| Command::from_char(ch).ok_or(ScriptError { offset, ch }))
            .collect::<Result<Vec<_>, _>>()
            .map(Script)
    }
}

impl<'a> IntoIterator for &'a Script {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("invalid move {ch:?} at offset {offset} in move script")]
pub struct ScriptError {
    pub offset: usize,
    pub ch: char,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case('w', Some(Command::Turn(Direction::Up)))]
    #[case('K', Some(Command::Turn(Direction::Up)))]
    #[case('s', Some(Command::Turn(Direction::Down)))]
    #[case('j', Some(Command::Turn(Direction::Down)))]
    #[case('a', Some(Command::Turn(Direction::Left)))]
    #[case('H', Some(Command::Turn(Direction::Left)))]
    #[case('d', Some(Command::Turn(Direction::Right)))]
    #[case('l', Some(Command::Turn(Direction::Right)))]
    #[case('.', Some(Command::Wait))]
    #[case('x', None)]
    #[case('5', None)]
    fn test_from_char(#[case] ch: char, #[case] cmd: Option<Command>) {
        assert_eq!(Command::from_char(ch), cmd);
    }

    #[test]
    fn parse_script() {
        let script = "w. d\nj".parse::<Script>().expect("script should parse");
        assert_eq!(
            script.commands(),
            [
                Command::Turn(Direction::Up),
                Command::Wait,
                Command::Turn(Direction::Right),
                Command::Turn(Direction::Down),
            ]
        );
        assert_eq!(script.len(), 4);
    }

    #[test]
    fn parse_empty_script() {
        let script = "  ".parse::<Script>().expect("blank script should parse");
        assert!(script.is_empty());
    }

    #[test]
    fn parse_bad_script() {
        assert_eq!(
            "ww?d".parse::<Script>(),
            Err(ScriptError {
                offset: 2,
                ch: '?'
            })
        );
    }
}
