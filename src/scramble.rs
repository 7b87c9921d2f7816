use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::cubie::CubieCube;
use crate::facelet::FaceCube;
use crate::solver::Search;
use crate::{error::Error, Move};

/// Output format and search mode flags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolveOptions(u8);

impl SolveOptions {
    /// Mark the end of phase 1 with a `.`.
    pub const USE_SEPARATOR: Self = Self(0x1);
    /// Return the moves generating the cube instead of solving it.
    pub const INVERSE_SOLUTION: Self = Self(0x2);
    /// Append the move count, like `(21f)`.
    pub const APPEND_LENGTH: Self = Self(0x4);
    /// Search for a shortest solution.
    pub const OPTIMAL_SOLUTION: Self = Self(0x8);

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0xf)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SolveOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SolveOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A solution as returned by the search, in the frame of the input cube.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub moves: Vec<Move>,
    /// Number of moves in front of the phase separator.
    pub separator: Option<usize>,
    pub append_length: bool,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens: Vec<String> = Vec::with_capacity(self.moves.len() + 2);
        for (i, m) in self.moves.iter().enumerate() {
            if self.separator == Some(i) {
                tokens.push(".".to_string());
            }
            tokens.push(m.to_string());
        }
        if self.separator == Some(self.moves.len()) {
            tokens.push(".".to_string());
        }
        if self.append_length {
            tokens.push(format!("({}f)", self.moves.len()));
        }
        write!(f, "{}", tokens.join(" "))
    }
}

pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace()
        .map(|word| Move::from_str(word.trim()))
        .collect()
}

pub fn scramble_to_str(s: &[Move]) -> String {
    s.iter().map(Move::to_string).collect::<Vec<_>>().join(" ")
}

/// A random move sequence. Consecutive moves never turn the same face, and turns of opposite faces come in
/// a fixed order.
pub fn gen_scramble(length: usize) -> Vec<Move> {
    let mut rng = thread_rng();
    let mut scramble: Vec<Move> = Vec::with_capacity(length);
    while scramble.len() < length {
        let m = ALL_MOVES[rng.gen_range(0..N_MOVE)];
        if let Some(&last) = scramble.last() {
            if last.face() == m.face() || last.axis() == m.axis() && last.face() > m.face() {
                continue;
            }
        }
        scramble.push(m);
    }
    scramble
}

/// Facelet string of a uniformly random cube.
pub fn random_state_facelets() -> String {
    let mut cc = CubieCube::default();
    cc.randomize();
    FaceCube::from(&cc).to_string()
}

/// Moves that generate a uniformly random cube from the solved one.
pub fn random_state_scramble(max_depth: usize, probe_max: u64) -> Result<Vec<Move>, Error> {
    let mut cc = CubieCube::default();
    cc.randomize();
    let solution = Search::new().solve(&cc, max_depth, probe_max, 0, SolveOptions::INVERSE_SOLUTION)?;
    Ok(solution.moves)
}
