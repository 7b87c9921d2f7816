use std::{fmt, str::FromStr};

use log::info;
use serde::{Deserialize, Serialize};

use self::Move::*;
use crate::cached_table;
use crate::constants::*;
use crate::cubie::{self, Corner::*, CubieCube, Edge::*};
use crate::error::Error;

/// Layer moves, Up, Right, Front, Down, Left, Back.
///
/// $ clockwise, $2 double, $3 counter-clockwise. The discriminant is the move index used by all tables.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Move {
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            U3 => write!(f, "U'"),
            D3 => write!(f, "D'"),
            R3 => write!(f, "R'"),
            L3 => write!(f, "L'"),
            F3 => write!(f, "F'"),
            B3 => write!(f, "B'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = match chars.next() {
            Some('U') => 0,
            Some('R') => 1,
            Some('F') => 2,
            Some('D') => 3,
            Some('L') => 4,
            Some('B') => 5,
            _ => return Err(Error::InvalidScramble),
        };
        let power = match chars.as_str() {
            "" | "1" => 0,
            "2" | "2'" => 1,
            "'" | "3" => 2,
            _ => return Err(Error::InvalidScramble),
        };
        Ok(ALL_MOVES[3 * face + power])
    }
}

impl Move {
    /// The face turned, 0..6 in the order U, R, F, D, L, B.
    pub fn face(self) -> usize {
        self as usize / 3
    }

    /// The axis turned, 0 = UD, 1 = RL, 2 = FB.
    pub fn axis(self) -> usize {
        self.face() % 3
    }

    pub fn is_same_layer(self, other: Move) -> bool {
        self.face() == other.face()
    }

    /// Moves on opposite faces, which commute.
    pub fn is_inverse(self, other: Move) -> bool {
        self.axis() == other.axis() && self.face() != other.face()
    }

    pub fn get_inverse(self) -> Self {
        ALL_MOVES[3 * self.face() + 2 - self as usize % 3]
    }
}

/// The basic six cube moves described by permutations and changes in orientation.
///
/// U_MOVE
pub const U_MOVE: CubieCube = CubieCube {
    cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// R_MOVE
pub const R_MOVE: CubieCube = CubieCube {
    cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR], //permutation of the corners
    co: [2, 0, 0, 1, 1, 0, 0, 2],                 //changes of the orientations of the corners
    ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR], //permutation of the edges
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],     //changes of the permutations of the edges
};

/// F_MOVE
pub const F_MOVE: CubieCube = CubieCube {
    cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
    co: [1, 2, 0, 0, 2, 1, 0, 0],
    ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
    eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
};

/// D_MOVE
pub const D_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// L_MOVE
pub const L_MOVE: CubieCube = CubieCube {
    cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
    co: [0, 1, 2, 0, 0, 2, 1, 0],
    ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// B_MOVE
pub const B_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
    co: [0, 0, 1, 2, 0, 0, 2, 1],
    ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
    eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
};

/// Raw coordinate move tables, all indexed `N_MOVE * coord + move`.
pub struct MoveTables {
    pub twist_move: Vec<u16>,
    pub flip_move: Vec<u16>,
    pub slice_sorted_move: Vec<u16>,
    pub u_edges_move: Vec<u16>,
    pub d_edges_move: Vec<u16>,
    pub ccomb_move: Vec<u16>,
    /// `phase2_blocked[last][m]` forbids phase 2 move m after phase 2 move `last`, a row `N_MOVE2` for
    /// no previous move. Moves on the same face never follow each other and moves on opposite faces come
    /// in ascending order.
    pub phase2_blocked: [[bool; N_MOVE2]; N_MOVE2 + 1],
}

impl MoveTables {
    pub fn new() -> Self {
        Self {
            twist_move: move_twist(),
            flip_move: move_flip(),
            slice_sorted_move: move_slice_sorted(),
            u_edges_move: move_u_edges(),
            d_edges_move: move_d_edges(),
            ccomb_move: move_ccomb(),
            phase2_blocked: phase2_blocked(),
        }
    }

    /// Phase 1 slice coordinate after a move. The location of the slice edges does not depend on their order.
    pub fn slice_move(&self, slice: usize, m: usize) -> usize {
        self.slice_sorted_move[N_MOVE * slice * N_PERM_4 + m] as usize / N_PERM_4
    }
}

impl Default for MoveTables {
    fn default() -> Self {
        Self::new()
    }
}

fn phase2_blocked() -> [[bool; N_MOVE2]; N_MOVE2 + 1] {
    let mut blocked = [[false; N_MOVE2]; N_MOVE2 + 1];
    for (i, &last) in UD_MOVES.iter().enumerate() {
        for (j, &m) in UD_MOVES.iter().enumerate() {
            blocked[i][j] = last.is_same_layer(m) || (last.is_inverse(m) && last as usize >= m as usize);
        }
    }
    blocked
}

/// Fill a move table by applying the three powers of every face turn to each coordinate value.
fn create_move_table(
    name: &str,
    size: usize,
    multiply: fn(&mut CubieCube, CubieCube),
    set: fn(&mut CubieCube, u16),
    get: fn(&CubieCube) -> u16,
) -> Vec<u16> {
    cached_table(name, || {
        info!("Creating {} table...", name);
        let bmc = cubie::basic_move_cubes();
        let mut a = CubieCube::default();
        let mut table = vec![0; size * N_MOVE];
        for i in 0..size {
            set(&mut a, i as u16);
            for (j, mc) in bmc.iter().enumerate() {
                for k in 0..3 {
                    multiply(&mut a, *mc);
                    table[N_MOVE * i + 3 * j + k] = get(&a);
                }
                multiply(&mut a, *mc); // 4. move restores face
            }
        }
        table
    })
}

/// Move table for the twists of the corners.
///
/// 0 <= twist < 2187 in phase 1, twist = 0 in phase 2
pub fn move_twist() -> Vec<u16> {
    create_move_table(
        "move_twist",
        N_TWIST,
        CubieCube::corner_multiply,
        CubieCube::set_twist,
        CubieCube::get_twist,
    )
}

/// Move table for the flip of the edges.
///
/// 0 <= flip < 2048 in phase 1, flip = 0 in phase 2
pub fn move_flip() -> Vec<u16> {
    create_move_table(
        "move_flip",
        N_FLIP,
        CubieCube::edge_multiply,
        CubieCube::set_flip,
        CubieCube::get_flip,
    )
}

/// Move table for the four UD-slice edges FR, FL, BL and BR.
///
/// Phase 1 only needs the location of the slice edges, the order comes for free and gives the phase 2 slice
/// permutation at the end of phase 1.
pub fn move_slice_sorted() -> Vec<u16> {
    create_move_table(
        "move_slice_sorted",
        N_SLICE_SORTED,
        CubieCube::edge_multiply,
        CubieCube::set_slice_sorted,
        CubieCube::get_slice_sorted,
    )
}

/// Move table for the u_edges coordinate for transition phase 1 -> phase 2
pub fn move_u_edges() -> Vec<u16> {
    create_move_table(
        "move_u_edges",
        N_SLICE_SORTED,
        CubieCube::edge_multiply,
        CubieCube::set_u_edges,
        CubieCube::get_u_edges,
    )
}

/// Move table for the d_edges coordinate for transition phase 1 -> phase 2
pub fn move_d_edges() -> Vec<u16> {
    create_move_table(
        "move_d_edges",
        N_SLICE_SORTED,
        CubieCube::edge_multiply,
        CubieCube::set_d_edges,
        CubieCube::get_d_edges,
    )
}

/// Move table for the location of the D-layer corners.
pub fn move_ccomb() -> Vec<u16> {
    create_move_table(
        "move_ccomb",
        N_COMB,
        CubieCube::corner_multiply,
        CubieCube::set_ccomb,
        CubieCube::get_ccomb,
    )
}
