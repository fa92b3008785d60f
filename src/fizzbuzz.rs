//! Fizzbuzz moves.

use std::fmt;

/// Number of rounds played when none is configured.
pub const DEFAULT_ITERATIONS: u32 = 100;

/// Upper bound on rounds; every move is held in memory before rendering.
pub const MAX_ITERATIONS: u32 = 1_000_000;

/// What gets called out on a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Number(u32),
    Fizz,
    Buzz,
    FizzBuzz,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Number(n) => write!(f, "{}", n),
            Move::Fizz => write!(f, "Fizz"),
            Move::Buzz => write!(f, "Buzz"),
            Move::FizzBuzz => write!(f, "FizzBuzz"),
        }
    }
}

impl Move {
    /// The move for round `i`.
    pub fn for_round(i: u32) -> Self {
        match (is_fizz(i), is_buzz(i)) {
            (true, true) => Move::FizzBuzz,
            (true, false) => Move::Fizz,
            (false, true) => Move::Buzz,
            (false, false) => Move::Number(i),
        }
    }
}

pub fn is_fizz(i: u32) -> bool {
    i % 3 == 0
}

pub fn is_buzz(i: u32) -> bool {
    i % 5 == 0
}

/// Play rounds `1..=iterations`.
pub fn play(iterations: u32) -> Vec<Move> {
    (1..=iterations).map(Move::for_round).collect()
}
