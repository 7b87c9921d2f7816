use std::cmp::max;

use log::{debug, info};

use crate::cached_table;
use crate::constants::*;
use crate::coord::{PhaseOneNode, SymCoord, SymCoordTables};
use crate::moves::MoveTables;
use crate::symmetries::SymmetriesTables;

/// Distances packed in 4 bits, 8 entries per word. `PRUN_UNKNOWN` marks entries not reached.
pub struct PruningTable {
    data: Vec<u32>,
}

impl PruningTable {
    fn new(size: usize) -> Self {
        Self {
            data: vec![0xffffffff; size.div_ceil(8)],
        }
    }

    pub fn get(&self, idx: usize) -> u8 {
        (self.data[idx >> 3] >> ((idx & 7) << 2) & 0xf) as u8
    }

    fn set(&mut self, idx: usize, value: u8) {
        let shift = (idx & 7) << 2;
        self.data[idx >> 3] &= !(0xf << shift);
        self.data[idx >> 3] |= (value as u32) << shift;
    }

    /// Breadth first search from the solved index 0.
    ///
    /// `next(idx, m)` is the index after move m and `equivalents(idx, out)` pushes the other indices
    /// describing the same position, which come from symmetric class representatives. The search runs
    /// backwards from the unknown entries once more than half of the table is filled.
    fn build<N, E>(name: &str, size: usize, n_moves: usize, next: N, equivalents: E) -> Self
    where
        N: Fn(usize, usize) -> usize,
        E: Fn(usize, &mut Vec<usize>),
    {
        info!("Creating {} table...", name);
        let mut table = Self::new(size);
        let mut same = Vec::new();
        let fill = |table: &mut Self, idx: usize, depth: u8, same: &mut Vec<usize>| -> usize {
            table.set(idx, depth);
            let mut filled = 1;
            same.clear();
            equivalents(idx, same);
            for &j in same.iter() {
                if table.get(j) == PRUN_UNKNOWN {
                    table.set(j, depth);
                    filled += 1;
                }
            }
            filled
        };
        let mut done = fill(&mut table, 0, 0, &mut same);
        let mut depth = 0;
        while done < size && depth < PRUN_UNKNOWN - 1 {
            let backward = done > size - done;
            let before = done;
            for idx in 0..size {
                let value = table.get(idx);
                if backward {
                    if value != PRUN_UNKNOWN {
                        continue;
                    }
                    if (0..n_moves).any(|m| table.get(next(idx, m)) == depth) {
                        done += fill(&mut table, idx, depth + 1, &mut same);
                    }
                } else {
                    if value != depth {
                        continue;
                    }
                    for m in 0..n_moves {
                        let j = next(idx, m);
                        if table.get(j) == PRUN_UNKNOWN {
                            done += fill(&mut table, j, depth + 1, &mut same);
                        }
                    }
                }
            }
            depth += 1;
            debug!(
                "{}: depth {} done {}/{}{}",
                name,
                depth,
                done,
                size,
                if backward { " (backward)" } else { "" }
            );
            if done == before {
                break;
            }
        }
        table
    }

    /// Load the table from the table directory, or build it.
    fn cached<F: FnOnce() -> Self>(name: &str, create: F) -> Self {
        Self {
            data: cached_table(name, || create().data),
        }
    }
}

/// Push the conjugates `class_size * class + conj(coord, s)` for the nontrivial self-symmetries of a class.
fn push_self_sym(out: &mut Vec<usize>, self_sym: u16, base: usize, conj: impl Fn(usize) -> usize) {
    let mut bits = self_sym >> 1;
    let mut s = 1;
    while bits != 0 {
        if bits & 1 != 0 {
            out.push(base + conj(s));
        }
        bits >>= 1;
        s += 1;
    }
}

/// The pruning tables give lower bounds of the phase 1 and phase 2 distances.
pub struct PruningTables {
    /// `N_SLICE * twist class + slice`
    pub udslice_twist: PruningTable,
    /// `N_SLICE * flip class + slice`
    pub udslice_flip: PruningTable,
    /// `N_FLIP * twist class + flip`
    pub twist_flip: PruningTable,
    /// `N_PERM_4 * corner class + slice permutation`
    pub mcperm: PruningTable,
    /// `N_PERM_4 * ud-edge class + slice permutation`
    pub meperm: PruningTable,
    /// `N_COMB * ud-edge class + corner combination`
    pub eperm_ccomb: PruningTable,
}

impl PruningTables {
    pub fn new(mv: &MoveTables, ct: &SymCoordTables) -> Self {
        let udslice_twist = PruningTable::cached("prun_udslice_twist", || {
            PruningTable::build(
                "prun_udslice_twist",
                N_TWIST_SYM * N_SLICE,
                N_MOVE,
                |idx, m| {
                    let (class, slice) = (idx / N_SLICE, idx % N_SLICE);
                    let twist = ct.twist_move[N_MOVE * class + m];
                    let slice = mv.slice_move(slice, m);
                    N_SLICE * twist.class() + ct.slice_conj(slice, twist.sym())
                },
                |idx, out| {
                    let (class, slice) = (idx / N_SLICE, idx % N_SLICE);
                    push_self_sym(out, ct.twist.self_sym[class], N_SLICE * class, |s| ct.slice_conj(slice, s));
                },
            )
        });
        let udslice_flip = PruningTable::cached("prun_udslice_flip", || {
            PruningTable::build(
                "prun_udslice_flip",
                N_FLIP_SYM * N_SLICE,
                N_MOVE,
                |idx, m| {
                    let (class, slice) = (idx / N_SLICE, idx % N_SLICE);
                    let flip = ct.flip_move[N_MOVE * class + m];
                    let slice = mv.slice_move(slice, m);
                    N_SLICE * flip.class() + ct.slice_conj(slice, flip.sym())
                },
                |idx, out| {
                    let (class, slice) = (idx / N_SLICE, idx % N_SLICE);
                    push_self_sym(out, ct.flip.self_sym[class], N_SLICE * class, |s| ct.slice_conj(slice, s));
                },
            )
        });
        let twist_flip = PruningTable::cached("prun_twist_flip", || {
            PruningTable::build(
                "prun_twist_flip",
                N_TWIST_SYM * N_FLIP,
                N_MOVE,
                |idx, m| {
                    let (class, flip) = (idx / N_FLIP, idx % N_FLIP);
                    let twist = ct.twist_move[N_MOVE * class + m];
                    let flip = mv.flip_move[N_MOVE * flip + m] as usize;
                    N_FLIP * twist.class() + ct.flip_conj[N_SYM_D2H * flip + twist.sym()] as usize
                },
                |idx, out| {
                    let (class, flip) = (idx / N_FLIP, idx % N_FLIP);
                    push_self_sym(out, ct.twist.self_sym[class], N_FLIP * class, |s| {
                        ct.flip_conj[N_SYM_D2H * flip + s] as usize
                    });
                },
            )
        });
        let mcperm = PruningTable::cached("prun_mcperm", || {
            PruningTable::build(
                "prun_mcperm",
                N_PERM_SYM * N_PERM_4,
                N_MOVE2,
                |idx, m| {
                    let (class, mperm) = (idx / N_PERM_4, idx % N_PERM_4);
                    let cperm = ct.cperm_move[N_MOVE * class + UD_MOVES[m] as usize];
                    let mperm = ct.mperm_move[N_MOVE2 * mperm + m] as usize;
                    N_PERM_4 * cperm.class() + ct.mperm_conj(mperm, cperm.sym())
                },
                |idx, out| {
                    let (class, mperm) = (idx / N_PERM_4, idx % N_PERM_4);
                    push_self_sym(out, ct.cperm.self_sym[class], N_PERM_4 * class, |s| ct.mperm_conj(mperm, s));
                },
            )
        });
        let meperm = PruningTable::cached("prun_meperm", || {
            PruningTable::build(
                "prun_meperm",
                N_PERM_SYM * N_PERM_4,
                N_MOVE2,
                |idx, m| {
                    let (class, mperm) = (idx / N_PERM_4, idx % N_PERM_4);
                    let eperm = ct.eperm_move[N_MOVE2 * class + m];
                    let mperm = ct.mperm_move[N_MOVE2 * mperm + m] as usize;
                    N_PERM_4 * eperm.class() + ct.mperm_conj(mperm, eperm.sym())
                },
                |idx, out| {
                    let (class, mperm) = (idx / N_PERM_4, idx % N_PERM_4);
                    push_self_sym(out, ct.eperm.self_sym[class], N_PERM_4 * class, |s| ct.mperm_conj(mperm, s));
                },
            )
        });
        let eperm_ccomb = PruningTable::cached("prun_eperm_ccomb", || {
            PruningTable::build(
                "prun_eperm_ccomb",
                N_PERM_SYM * N_COMB,
                N_MOVE2,
                |idx, m| {
                    let (class, ccomb) = (idx / N_COMB, idx % N_COMB);
                    let eperm = ct.eperm_move[N_MOVE2 * class + m];
                    let ccomb = mv.ccomb_move[N_MOVE * ccomb + UD_MOVES[m] as usize] as usize;
                    N_COMB * eperm.class() + ct.ccomb_conj(ccomb, eperm.sym())
                },
                |idx, out| {
                    let (class, ccomb) = (idx / N_COMB, idx % N_COMB);
                    push_self_sym(out, ct.eperm.self_sym[class], N_COMB * class, |s| ct.ccomb_conj(ccomb, s));
                },
            )
        });
        Self {
            udslice_twist,
            udslice_flip,
            twist_flip,
            mcperm,
            meperm,
            eperm_ccomb,
        }
    }

    /// Lower bound of the number of moves to reach phase 2.
    pub fn phase1(&self, sy: &SymmetriesTables, ct: &SymCoordTables, node: &PhaseOneNode) -> u8 {
        let slice = node.slice as usize;
        let (twist, flip) = (node.twist, node.flip);
        let prun_twist = self
            .udslice_twist
            .get(N_SLICE * twist.class() + ct.slice_conj(slice, twist.sym()));
        let prun_flip = self
            .udslice_flip
            .get(N_SLICE * flip.class() + ct.slice_conj(slice, flip.sym()));
        let prun_twist_flip = self
            .twist_flip
            .get(N_FLIP * twist.class() + ct.flip_in_twist_frame(sy, twist, flip));
        max(prun_twist, max(prun_flip, prun_twist_flip))
    }

    pub fn mcperm(&self, ct: &SymCoordTables, cperm: SymCoord, mperm: usize) -> u8 {
        self.mcperm
            .get(N_PERM_4 * cperm.class() + ct.mperm_conj(mperm, cperm.sym()))
    }

    pub fn meperm(&self, ct: &SymCoordTables, eperm: SymCoord, mperm: usize) -> u8 {
        self.meperm
            .get(N_PERM_4 * eperm.class() + ct.mperm_conj(mperm, eperm.sym()))
    }

    pub fn eperm_ccomb(&self, sy: &SymmetriesTables, ct: &SymCoordTables, cperm: SymCoord, eperm: SymCoord) -> u8 {
        self.eperm_ccomb
            .get(N_COMB * eperm.class() + ct.ccomb_in_eperm_frame(sy, cperm, eperm))
    }
}
