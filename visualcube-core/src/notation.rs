/// Face-turn notation: `U`, `R'`, `F2` and friends
use std::fmt;

use nom::{
    branch::alt,
    character::complete::char,
    combinator::{all_consuming, map, opt, value},
    IResult,
};

use crate::error::{CubeError, Result};

/// One of the six outer layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Up,
    Down,
    Front,
    Back,
    Left,
    Right,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Down,
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Down => 'D',
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Right => 'R',
        }
    }
}

/// Turn magnitude, with clockwise judged looking at the face from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Half,
}

impl Turn {
    pub const ALL: [Turn; 3] = [Turn::Clockwise, Turn::CounterClockwise, Turn::Half];

    pub fn inverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        }
    }
}

/// A single face turn. Carries no cube state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    pub const COUNT: usize = 18;

    pub const fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    /// Every move, face-major
    pub fn all() -> impl Iterator<Item = Move> {
        Face::ALL
            .into_iter()
            .flat_map(|face| Turn::ALL.into_iter().map(move |turn| Move::new(face, turn)))
    }

    /// Dense index in `0..Move::COUNT`
    pub fn index(self) -> usize {
        self.face.index() * 3 + self.turn as usize
    }

    pub fn inverse(self) -> Self {
        Self::new(self.face, self.turn.inverse())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.letter(), self.turn.suffix())
    }
}

fn face(input: &str) -> IResult<&str, Face> {
    alt((
        value(Face::Up, char('U')),
        value(Face::Down, char('D')),
        value(Face::Front, char('F')),
        value(Face::Back, char('B')),
        value(Face::Left, char('L')),
        value(Face::Right, char('R')),
    ))(input)
}

fn turn(input: &str) -> IResult<&str, Turn> {
    map(
        opt(alt((
            value(Turn::CounterClockwise, char('\'')),
            value(Turn::Half, char('2')),
        ))),
        |turn| turn.unwrap_or(Turn::Clockwise),
    )(input)
}

fn face_turn(input: &str) -> IResult<&str, Move> {
    let (input, face) = face(input)?;
    let (input, turn) = turn(input)?;
    Ok((input, Move::new(face, turn)))
}

/// Parse a single token. Matching is case-sensitive and the whole token
/// must be consumed.
pub fn parse_move(token: &str) -> Result<Move> {
    all_consuming(face_turn)(token)
        .map(|(_, mv)| mv)
        .map_err(|_| CubeError::UnknownMove(token.to_string()))
}

/// Parse an ordered list of tokens, stopping at the first bad one
pub fn parse_algorithm<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Move>> {
    tokens.iter().map(|token| parse_move(token.as_ref())).collect()
}

/// Parse a whitespace-separated algorithm such as `"R U R' U'"`
pub fn parse_algorithm_str(algorithm: &str) -> Result<Vec<Move>> {
    algorithm.split_whitespace().map(parse_move).collect()
}

/// The algorithm that undoes `moves`
pub fn invert_algorithm(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_canonical_tokens() {
        let tokens = [
            "U", "D", "F", "B", "L", "R", "U'", "D'", "F'", "B'", "L'", "R'", "U2", "D2", "F2",
            "B2", "L2", "R2",
        ];
        let moves = parse_algorithm(&tokens).unwrap();
        assert_eq!(moves.len(), 18);
        for (token, mv) in tokens.iter().zip(&moves) {
            assert_eq!(mv.to_string(), *token);
        }
        assert_eq!(moves[0], Move::new(Face::Up, Turn::Clockwise));
        assert_eq!(moves[11], Move::new(Face::Right, Turn::CounterClockwise));
        assert_eq!(moves[14], Move::new(Face::Front, Turn::Half));
    }

    #[test]
    fn test_rejects_unknown_tokens() {
        for token in ["U3", "u", "X", "", "R''", " R", "R2'"] {
            match parse_move(token) {
                Err(CubeError::UnknownMove(bad)) => assert_eq!(bad, token),
                other => panic!("expected unknown move for {token:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_stops_at_first_bad_token() {
        let result = parse_algorithm(&["R", "u", "X"]);
        assert!(matches!(result, Err(CubeError::UnknownMove(ref t)) if t == "u"));
    }

    #[test]
    fn test_empty_algorithm_is_solved() {
        let empty: [&str; 0] = [];
        assert!(parse_algorithm(&empty).unwrap().is_empty());
        assert!(parse_algorithm_str("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_algorithm_str_preserves_order() {
        let moves = parse_algorithm_str("R U  R' U'").unwrap();
        let rendered: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
        assert_eq!(rendered, ["R", "U", "R'", "U'"]);
    }

    #[test]
    fn test_move_indices_are_dense() {
        let indices: Vec<usize> = Move::all().map(Move::index).collect();
        assert_eq!(indices, (0..Move::COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn test_invert_algorithm() {
        let moves = parse_algorithm_str("R U2 F'").unwrap();
        let inverse = invert_algorithm(&moves);
        assert_eq!(inverse, parse_algorithm_str("F U2 R'").unwrap());
    }
}
