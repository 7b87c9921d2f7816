use std::fmt;

use log::info;

use crate::constants::*;
use crate::cubie::{self, CubieCube, ALL_EDGES};
use crate::cubie::Edge::*;
use crate::moves::MoveTables;
use crate::symmetries::{SymClasses, SymmetriesTables};

/// A symmetry reduced coordinate, the class index and the symmetry mapping the state onto the class
/// representative packed into one word.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct SymCoord(u16);

impl SymCoord {
    pub fn new(class: usize, sym: usize) -> Self {
        Self((class << 4 | sym) as u16)
    }

    pub fn class(self) -> usize {
        (self.0 >> 4) as usize
    }

    pub fn sym(self) -> usize {
        (self.0 & 0xf) as usize
    }
}

impl fmt::Display for SymCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.class(), self.sym())
    }
}

/// Tables for the symmetry reduced coordinates.
///
/// Twist and flip are reduced by the 8 symmetries keeping all three axes, the corner and ud-edge
/// permutations by the 16 symmetries of D4h. Conjugation tables are indexed `n_sym * coord + sym`.
pub struct SymCoordTables {
    pub twist: SymClasses,
    pub flip: SymClasses,
    pub cperm: SymClasses,
    pub eperm: SymClasses,
    /// `N_MOVE * class + move`
    pub twist_move: Vec<SymCoord>,
    pub flip_move: Vec<SymCoord>,
    pub cperm_move: Vec<SymCoord>,
    /// `N_MOVE2 * class + phase 2 move`
    pub eperm_move: Vec<SymCoord>,
    /// `N_MOVE2 * mperm + phase 2 move`, the permutation of the slice edges in phase 2
    pub mperm_move: Vec<u8>,
    pub flip_conj: Vec<u16>,
    /// Flip of the representative of each flip class conjugated by each of the 8 symmetries.
    pub flip_s2rf: Vec<u16>,
    pub slice_conj: Vec<u16>,
    pub mperm_conj: Vec<u8>,
    pub ccomb_conj: Vec<u8>,
    /// Corner combination of the representative of each corner permutation class.
    pub perm2comb: Vec<u8>,
    /// `N_PERM_4 * u_edges + d_edges % N_PERM_4` gives the ud-edge permutation at the start of phase 2.
    pub edge_merge: Vec<SymCoord>,
}

/// Raw coordinate of a conjugated cube, with `set` and `get` selecting the coordinate.
fn conj_raw(
    sy: &SymmetriesTables,
    set: fn(&mut CubieCube, u16),
    get: fn(&CubieCube) -> u16,
) -> impl Fn(u16, usize) -> u16 + '_ {
    move |raw, s| {
        let mut cc = CubieCube::default();
        set(&mut cc, raw);
        get(&sy.conj(&cc, s))
    }
}

fn conj_table(
    sy: &SymmetriesTables,
    size: usize,
    n_sym: usize,
    set: fn(&mut CubieCube, u16),
    get: fn(&CubieCube) -> u16,
) -> Vec<u16> {
    let conj = conj_raw(sy, set, get);
    let mut table = vec![0; size * n_sym];
    for raw in 0..size {
        for s in 0..n_sym {
            table[n_sym * raw + s] = conj(raw as u16, s);
        }
    }
    table
}

impl SymCoordTables {
    pub fn new(sy: &SymmetriesTables, mv: &MoveTables) -> Self {
        info!("Creating symmetry coordinate tables...");
        let twist = SymClasses::new(
            "twist",
            sy,
            N_TWIST,
            N_SYM_D2H,
            conj_raw(sy, CubieCube::set_twist, CubieCube::get_twist),
        );
        let flip = SymClasses::new(
            "flip",
            sy,
            N_FLIP,
            N_SYM_D2H,
            conj_raw(sy, CubieCube::set_flip, CubieCube::get_flip),
        );
        let cperm = SymClasses::new(
            "corner permutation",
            sy,
            N_CORNERS,
            N_SYM_D4H,
            conj_raw(sy, CubieCube::set_corners, CubieCube::get_corners),
        );
        let eperm = SymClasses::new(
            "ud-edge permutation",
            sy,
            N_UD_EDGES,
            N_SYM_D4H,
            conj_raw(sy, CubieCube::set_ud_edges, CubieCube::get_ud_edges),
        );

        let mut twist_move = Vec::with_capacity(twist.len() * N_MOVE);
        for &raw in &twist.class_to_raw {
            for m in 0..N_MOVE {
                twist_move.push(twist.raw_to_sym[mv.twist_move[N_MOVE * raw as usize + m] as usize]);
            }
        }
        let mut flip_move = Vec::with_capacity(flip.len() * N_MOVE);
        for &raw in &flip.class_to_raw {
            for m in 0..N_MOVE {
                flip_move.push(flip.raw_to_sym[mv.flip_move[N_MOVE * raw as usize + m] as usize]);
            }
        }

        let move_cube = cubie::move_cubes();
        let mut cperm_move = Vec::with_capacity(cperm.len() * N_MOVE);
        for &raw in &cperm.class_to_raw {
            let mut cc = CubieCube::default();
            cc.set_corners(raw);
            for mc in &move_cube {
                let mut c = cc;
                c.corner_multiply(*mc);
                cperm_move.push(cperm.raw_to_sym[c.get_corners() as usize]);
            }
        }
        let mut eperm_move = Vec::with_capacity(eperm.len() * N_MOVE2);
        for &raw in &eperm.class_to_raw {
            let mut cc = CubieCube::default();
            cc.set_ud_edges(raw);
            for m in UD_MOVES {
                let mut c = cc;
                c.edge_multiply(move_cube[m as usize]);
                eperm_move.push(eperm.raw_to_sym[c.get_ud_edges() as usize]);
            }
        }
        let mut mperm_move = Vec::with_capacity(N_PERM_4 * N_MOVE2);
        for mperm in 0..N_PERM_4 {
            for m in UD_MOVES {
                mperm_move.push(mv.slice_sorted_move[N_MOVE * mperm + m as usize] as u8);
            }
        }

        let flip_conj = conj_table(sy, N_FLIP, N_SYM_D2H, CubieCube::set_flip, CubieCube::get_flip);
        let flip_s2rf = flip
            .class_to_raw
            .iter()
            .flat_map(|&raw| {
                let row = N_SYM_D2H * raw as usize;
                flip_conj[row..row + N_SYM_D2H].iter().copied()
            })
            .collect();
        let slice_conj = conj_table(sy, N_SLICE, N_SYM_D2H, CubieCube::set_slice, CubieCube::get_slice);
        let mperm_conj = conj_table(
            sy,
            N_PERM_4,
            N_SYM_D4H,
            CubieCube::set_slice_sorted,
            CubieCube::get_slice_sorted,
        )
        .into_iter()
        .map(|v| v as u8)
        .collect();
        let ccomb_conj = conj_table(sy, N_COMB, N_SYM_D4H, CubieCube::set_ccomb, CubieCube::get_ccomb)
            .into_iter()
            .map(|v| v as u8)
            .collect();
        let perm2comb = cperm
            .class_to_raw
            .iter()
            .map(|&raw| {
                let mut cc = CubieCube::default();
                cc.set_corners(raw);
                cc.get_ccomb() as u8
            })
            .collect();
        let edge_merge = create_edge_merge_table(&eperm);

        Self {
            twist,
            flip,
            cperm,
            eperm,
            twist_move,
            flip_move,
            cperm_move,
            eperm_move,
            mperm_move,
            flip_conj,
            flip_s2rf,
            slice_conj,
            mperm_conj,
            ccomb_conj,
            perm2comb,
            edge_merge,
        }
    }

    /// Move a twist or flip coordinate given as `(class, sym)` through the class move table.
    fn sym_move(table: &[SymCoord], sy: &SymmetriesTables, c: SymCoord, m: usize) -> SymCoord {
        let moved = table[N_MOVE * c.class() + sy.move_conj(c.sym(), m)];
        SymCoord::new(moved.class(), sy.mult(moved.sym(), c.sym()))
    }

    pub fn move_twist(&self, sy: &SymmetriesTables, c: SymCoord, m: usize) -> SymCoord {
        Self::sym_move(&self.twist_move, sy, c, m)
    }

    pub fn move_flip(&self, sy: &SymmetriesTables, c: SymCoord, m: usize) -> SymCoord {
        Self::sym_move(&self.flip_move, sy, c, m)
    }

    pub fn move_cperm(&self, sy: &SymmetriesTables, c: SymCoord, m: usize) -> SymCoord {
        Self::sym_move(&self.cperm_move, sy, c, m)
    }

    /// Move the ud-edge permutation by phase 2 move `m`.
    pub fn move_eperm(&self, sy: &SymmetriesTables, c: SymCoord, m: usize) -> SymCoord {
        let moved = self.eperm_move[N_MOVE2 * c.class() + sy.sym_move_ud[N_MOVE2 * c.sym() + m]];
        SymCoord::new(moved.class(), sy.mult(moved.sym(), c.sym()))
    }

    pub fn slice_conj(&self, slice: usize, s: usize) -> usize {
        self.slice_conj[N_SYM_D2H * slice + s] as usize
    }

    pub fn mperm_conj(&self, mperm: usize, s: usize) -> usize {
        self.mperm_conj[N_SYM_D4H * mperm + s] as usize
    }

    pub fn ccomb_conj(&self, ccomb: usize, s: usize) -> usize {
        self.ccomb_conj[N_SYM_D4H * ccomb + s] as usize
    }

    /// Flip of a cube in the frame where its twist is the class representative.
    pub fn flip_in_twist_frame(&self, sy: &SymmetriesTables, twist: SymCoord, flip: SymCoord) -> usize {
        let s = sy.mult(twist.sym(), sy.sym_inv[flip.sym()]);
        self.flip_s2rf[N_SYM_D2H * flip.class() + s] as usize
    }

    /// Corner combination of a cube in the frame where its ud-edge permutation is the class representative.
    pub fn ccomb_in_eperm_frame(&self, sy: &SymmetriesTables, cperm: SymCoord, eperm: SymCoord) -> usize {
        let s = sy.mult(eperm.sym(), sy.sym_inv[cperm.sym()]);
        self.ccomb_conj(self.perm2comb[cperm.class()] as usize, s)
    }

    /// Ud-edge permutation at the start of phase 2 from the u_edges and d_edges coordinates.
    pub fn merge_edges(&self, u_edges: u16, d_edges: u16) -> SymCoord {
        self.edge_merge[N_PERM_4 * u_edges as usize + d_edges as usize % N_PERM_4]
    }
}

/// For every placement of the U-edges outside the slice, place the D-edges in the remaining positions in
/// all 24 orders and record the resulting ud-edge permutation.
fn create_edge_merge_table(eperm: &SymClasses) -> Vec<SymCoord> {
    let edge_u = [UR, UF, UL, UB];
    let mut table = vec![SymCoord::default(); N_U_EDGES_PHASE2 * N_PERM_4];
    let mut c_u = CubieCube::default();
    for u in 0..N_U_EDGES_PHASE2 {
        c_u.set_u_edges(u as u16);
        let free: Vec<usize> = (0..8).filter(|&i| !edge_u.contains(&c_u.ep[i])).collect();
        let mut cc = c_u;
        cc.ep[8..].copy_from_slice(&[FR, FL, BL, BR]);
        let mut order = [0u8; 4];
        for k in 0..N_PERM_4 {
            cubie::index_to_perm(k, &mut order);
            for (&pos, &o) in free.iter().zip(&order) {
                cc.ep[pos] = ALL_EDGES[DR as usize + o as usize];
            }
            let d = cc.get_d_edges() as usize;
            table[N_PERM_4 * u + d % N_PERM_4] = eperm.raw_to_sym[cc.get_ud_edges() as usize];
        }
    }
    table
}

/// The phase 1 coordinates of a search node with its pruning value.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct PhaseOneNode {
    pub twist: SymCoord,
    pub flip: SymCoord,
    /// Location of the slice edges, 0 <= slice < 495.
    pub slice: u16,
    /// Lower bound of the phase 1 distance.
    pub prun: u8,
}

impl PhaseOneNode {
    /// The phase 1 coordinates of a cube, `prun` is left 0.
    pub fn from_cubie(cc: &CubieCube, ct: &SymCoordTables) -> Self {
        Self {
            twist: ct.twist.raw_to_sym[cc.get_twist() as usize],
            flip: ct.flip.raw_to_sym[cc.get_flip() as usize],
            slice: cc.get_slice(),
            prun: 0,
        }
    }

    /// The coordinates after move `m`, `prun` is left 0.
    pub fn apply(&self, sy: &SymmetriesTables, mv: &MoveTables, ct: &SymCoordTables, m: usize) -> Self {
        Self {
            twist: ct.move_twist(sy, self.twist, m),
            flip: ct.move_flip(sy, self.flip, m),
            slice: mv.slice_move(self.slice as usize, m) as u16,
            prun: 0,
        }
    }
}
