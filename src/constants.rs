use crate::facelet::Color;
use crate::moves::Move::{self, *};

pub const N_MOVE: usize = 18; // number of moves
pub const N_MOVE2: usize = 10; // number of phase 2 moves
pub const N_TWIST: usize = 2187; // 3^7 possible corner orientations
pub const N_FLIP: usize = 2048; // 2^11 possible edge orientations
pub const N_SLICE: usize = 495; // 12 choose 4 possible positions of FR, FL, BL, BR edges
pub const N_PERM_4: usize = 24;
pub const N_SLICE_SORTED: usize = 11880; // 12*11*10*9 possible positions of FR, FL, BL, BR edges
pub const N_U_EDGES_PHASE2: usize = 1680; // u_edges coordinate range in phase 2
pub const N_CORNERS: usize = 40320; // 8! corner permutations
pub const N_UD_EDGES: usize = 40320; // 8! permutations of the edges in the U-face and D-face
pub const N_COMB: usize = 70; // positions of the four D-layer corners

pub const N_TWIST_SYM: usize = 324; // twist classes under the 8 phase 1 symmetries
pub const N_FLIP_SYM: usize = 336; // flip classes under the 8 phase 1 symmetries
pub const N_PERM_SYM: usize = 2768; // corner or ud-edge permutation classes under the 16 phase 2 symmetries

pub const N_SYM: usize = 48; // number of cube symmetries of full group Oh
pub const N_SYM_D4H: usize = 16; // number of symmetries of subgroup D4h
pub const N_SYM_D2H: usize = 8; // symmetries that keep all three axes, used in phase 1

pub const SOLVED: u16 = 0; // 0 is index of solved state (except for u_edges coordinate)
pub const SOLVED_U_EDGES: u16 = 1656;

/// Pruning values are stored in 4 bits, 15 means unknown (at least 15).
pub const PRUN_UNKNOWN: u8 = 0xf;

/// Longest phase 2 search attempted for a single phase 1 prefix.
pub const MAX_DEPTH2: usize = 13;
/// Capacity of the search move buffer. Larger requested depths are clamped to it.
pub const MAX_SOLUTION_LENGTH: usize = 30;

pub const DEFAULT_MAX_DEPTH: usize = 21;
pub const DEFAULT_PROBE_MAX: u64 = 100_000;
pub const DEFAULT_PROBE_MIN: u64 = 0;

/// Directory to load and store pruning tables, unset means in-memory only.
pub const TABLE_DIR_ENV: &str = "TWOPHASE_TABLE_DIR";

pub const ALL_COLORS: [Color; 6] = [
    Color::U,
    Color::R,
    Color::F,
    Color::D,
    Color::L,
    Color::B,
];

#[rustfmt::skip]
pub const ALL_MOVES: [Move; N_MOVE] = [
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
];

/// Phase 2 moves, indexed by phase 2 move index.
#[rustfmt::skip]
pub const UD_MOVES: [Move; N_MOVE2] = [
    U, U2, U3, R2, F2,
    D, D2, D3, L2, B2,
];

/// Moves tried in front of the scramble, index 0 means none.
pub const PRE_MOVES: [Option<Move>; 9] = [
    None,
    Some(R),
    Some(R3),
    Some(F),
    Some(F3),
    Some(L),
    Some(L3),
    Some(B),
    Some(B3),
];

pub const SOLVED_FACELETS: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

/// Phase 2 move index of each move, `N_MOVE2` for moves outside phase 2.
#[rustfmt::skip]
pub const STD_TO_UD: [usize; N_MOVE] = [
    0, 1, 2,
    N_MOVE2, 3, N_MOVE2,
    N_MOVE2, 4, N_MOVE2,
    5, 6, 7,
    N_MOVE2, 8, N_MOVE2,
    N_MOVE2, 9, N_MOVE2,
];
