use std::collections::HashMap;

use log::{debug, info};

use crate::constants::*;
use crate::coord::SymCoord;
use crate::cubie::{self, Corner::*, CubieCube, Edge::*};

/// 120° clockwise rotation around the long diagonal URF-DBL.
pub const ROT_URF3: CubieCube = CubieCube {
    cp: [URF, DFR, DLF, UFL, UBR, DRB, DBL, ULB],
    co: [1, 2, 1, 2, 2, 1, 2, 1],
    ep: [UF, FR, DF, FL, UB, BR, DB, BL, UR, DR, DL, UL],
    eo: [1, 0, 1, 0, 1, 0, 1, 0, 1, 1, 1, 1],
};

/// 180° rotation around the axis through the F and B centers.
pub const ROT_F2: CubieCube = CubieCube {
    cp: [DLF, DFR, DRB, DBL, UFL, URF, UBR, ULB],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [DL, DF, DR, DB, UL, UF, UR, UB, FL, FR, BR, BL],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// 90° clockwise rotation around the axis through the U and D centers.
pub const ROT_U4: CubieCube = CubieCube {
    cp: [UBR, URF, UFL, ULB, DRB, DFR, DLF, DBL],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UB, UR, UF, UL, DB, DR, DF, DL, BR, FR, FL, BL],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1],
};

/// Reflection at the plane through the U, D, F, B centers.
pub const MIRR_LR2: CubieCube = CubieCube {
    cp: [UFL, URF, UBR, ULB, DLF, DFR, DRB, DBL],
    co: [3, 3, 3, 3, 3, 3, 3, 3],
    ep: [UL, UF, UR, UB, DL, DF, DR, DB, FL, FR, BR, BL],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The 48 symmetries of the cube.
///
/// Symmetry `16 * a + 8 * (c & 1) + 4 * (c >> 1) + 2 * b + d` is `ROT_URF3^a * ROT_U4^c * ROT_F2^b * MIRR_LR2^d`.
/// The first 16 form D4h and keep the UD axis, the first 8 keep all three axes.
pub fn sym_cubes() -> Vec<CubieCube> {
    let mut cubes = Vec::with_capacity(N_SYM);
    let mut urf = CubieCube::default();
    for _ in 0..3 {
        for s in 0..N_SYM_D4H {
            let u4 = (s >> 3 & 1) | (s >> 1 & 2);
            let mut cc = urf;
            for _ in 0..u4 {
                cc.multiply(ROT_U4);
            }
            if s & 2 != 0 {
                cc.multiply(ROT_F2);
            }
            if s & 1 != 0 {
                cc.multiply(MIRR_LR2);
            }
            cubes.push(cc);
        }
        urf.multiply(ROT_URF3);
    }
    cubes
}

impl CubieCube {
    /// Bit s is set if symmetry s maps this cube to itself. Bit 48 is set if some symmetry maps it to its
    /// inverse.
    pub fn self_symmetry(&self) -> u64 {
        let inv = self.inverse_cubie_cube();
        let mut mask = 0;
        for (s, sc) in sym_cubes().iter().enumerate() {
            let c = self.conjugate(sc, &sc.inverse_cubie_cube());
            if c == *self {
                mask |= 1 << s;
            }
            if c == inv {
                mask |= 1 << N_SYM;
            }
        }
        mask
    }
}

/// Symmetry group tables, and how the symmetries act on moves.
pub struct SymmetriesTables {
    pub sym_cube: Vec<CubieCube>,
    pub sym_inv: Vec<usize>,
    /// `sym_mult[N_SYM * a + b] = c` with `S_a * S_b = S_c`.
    pub sym_mult: Vec<usize>,
    /// `sym_move[N_MOVE * s + m]` is the move `S_s * M * S_s^-1`.
    pub sym_move: Vec<usize>,
    /// Same as `sym_move` in phase 2 move indices, D4h symmetries only.
    pub sym_move_ud: Vec<usize>,
    /// Bit s is set if symmetry s commutes with the move.
    pub move_cube_sym: [u64; N_MOVE],
    /// Bit m is set if symmetry s maps move m to a smaller move index.
    pub first_move_sym: Vec<u32>,
    /// Moves of the six search roots translated back to the frame of the input cube.
    pub urf_move: [[usize; N_MOVE]; 6],
}

impl SymmetriesTables {
    pub fn new() -> Self {
        info!("Creating symmetry tables...");
        let sym_cube = sym_cubes();
        let index: HashMap<CubieCube, usize> = sym_cube.iter().enumerate().map(|(i, c)| (*c, i)).collect();

        let mut sym_inv = vec![0; N_SYM];
        let mut sym_mult = vec![0; N_SYM * N_SYM];
        for a in 0..N_SYM {
            for b in 0..N_SYM {
                let mut cc = sym_cube[a];
                cc.multiply(sym_cube[b]);
                let c = index[&cc];
                sym_mult[N_SYM * a + b] = c;
                if c == 0 {
                    sym_inv[a] = b;
                }
            }
        }

        let move_cube = cubie::move_cubes();
        let move_index: HashMap<CubieCube, usize> = move_cube.iter().enumerate().map(|(i, c)| (*c, i)).collect();
        let mut sym_move = vec![0; N_SYM * N_MOVE];
        let mut move_cube_sym = [0u64; N_MOVE];
        let mut first_move_sym = vec![0u32; N_SYM];
        for s in 0..N_SYM {
            for m in 0..N_MOVE {
                let conj = move_cube[m].conjugate(&sym_cube[s], &sym_cube[sym_inv[s]]);
                let m2 = move_index[&conj];
                sym_move[N_MOVE * s + m] = m2;
                if m2 == m {
                    move_cube_sym[m] |= 1 << s;
                }
                if m2 < m {
                    first_move_sym[s] |= 1 << m;
                }
            }
        }

        let mut sym_move_ud = vec![0; N_SYM_D4H * N_MOVE2];
        for s in 0..N_SYM_D4H {
            for (m, &ud) in UD_MOVES.iter().enumerate() {
                sym_move_ud[N_MOVE2 * s + m] = STD_TO_UD[sym_move[N_MOVE * s + ud as usize]];
            }
        }

        let mut urf_move = [[0; N_MOVE]; 6];
        for u in 0..3 {
            let s = sym_inv[N_SYM_D4H * u];
            for m in 0..N_MOVE {
                let m2 = sym_move[N_MOVE * s + m];
                urf_move[u][m] = m2;
                urf_move[u + 3][m] = ALL_MOVES[m2].get_inverse() as usize;
            }
        }

        Self {
            sym_cube,
            sym_inv,
            sym_mult,
            sym_move,
            sym_move_ud,
            move_cube_sym,
            first_move_sym,
            urf_move,
        }
    }

    /// `S_s * cc * S_s^-1`
    pub fn conj(&self, cc: &CubieCube, s: usize) -> CubieCube {
        cc.conjugate(&self.sym_cube[s], &self.sym_cube[self.sym_inv[s]])
    }

    pub fn mult(&self, a: usize, b: usize) -> usize {
        self.sym_mult[N_SYM * a + b]
    }

    pub fn move_conj(&self, s: usize, m: usize) -> usize {
        self.sym_move[N_MOVE * s + m]
    }

    /// Move `m` of a cube as seen from the cube rotated by `ROT_URF3`.
    pub fn urf_conj_move(&self, m: usize) -> usize {
        self.sym_move[N_MOVE * N_SYM_D4H + m]
    }

    /// Mask of the first `n_sym` symmetries fixing `cc`.
    pub fn self_symmetry(&self, cc: &CubieCube, n_sym: usize) -> u64 {
        (0..n_sym)
            .filter(|&s| self.conj(cc, s) == *cc)
            .fold(0, |mask, s| mask | 1 << s)
    }

    /// True if some D4h symmetry conjugates `a` into `b`.
    pub fn is_d4h_conjugate(&self, a: &CubieCube, b: &CubieCube) -> bool {
        (0..N_SYM_D4H).any(|s| self.conj(a, s) == *b)
    }

    /// Moves that need not be tried first from a cube fixed by the symmetries in `ssym`.
    pub fn skip_moves(&self, ssym: u64) -> u32 {
        let mut skip = 0;
        let mut s = ssym >> 1;
        let mut i = 1;
        while s != 0 {
            if s & 1 != 0 {
                skip |= self.first_move_sym[i];
            }
            s >>= 1;
            i += 1;
        }
        skip
    }
}

impl Default for SymmetriesTables {
    fn default() -> Self {
        Self::new()
    }
}

/// Equivalence classes of a raw coordinate under the first `n_sym` symmetries.
pub struct SymClasses {
    /// Smallest raw coordinate of each class.
    pub class_to_raw: Vec<u16>,
    pub raw_to_sym: Vec<SymCoord>,
    /// Bit s is set if symmetry s fixes the representative.
    pub self_sym: Vec<u16>,
}

impl SymClasses {
    /// Group the raw coordinates `0..n_raw` into classes.
    ///
    /// `conj(raw, s)` is the raw coordinate of `S_s * X * S_s^-1` for a cube X with coordinate `raw`. Afterwards
    /// `raw_to_sym[raw] = (k, s)` means `S_s * X * S_s^-1` is the representative of class k.
    pub fn new<F>(name: &str, sy: &SymmetriesTables, n_raw: usize, n_sym: usize, conj: F) -> Self
    where
        F: Fn(u16, usize) -> u16,
    {
        let mut class_to_raw = Vec::new();
        let mut self_sym = Vec::new();
        let mut raw_to_sym: Vec<Option<SymCoord>> = vec![None; n_raw];
        for raw in 0..n_raw {
            if raw_to_sym[raw].is_some() {
                continue;
            }
            let class = class_to_raw.len();
            class_to_raw.push(raw as u16);
            let mut fixed = 0u16;
            for s in 0..n_sym {
                let r = conj(raw as u16, sy.sym_inv[s]) as usize;
                if r == raw {
                    fixed |= 1 << s;
                }
                if raw_to_sym[r].is_none() {
                    raw_to_sym[r] = Some(SymCoord::new(class, s));
                }
            }
            self_sym.push(fixed);
        }
        debug!("{}: {} classes", name, class_to_raw.len());
        Self {
            class_to_raw,
            raw_to_sym: raw_to_sym.into_iter().map(Option::unwrap_or_default).collect(),
            self_sym,
        }
    }

    pub fn len(&self) -> usize {
        self.class_to_raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.class_to_raw.is_empty()
    }
}

#[cfg(test)]
mod test {
    use crate::moves::Move::*;
    use crate::symmetries::*;

    #[test]
    fn test_group() {
        let sy = SymmetriesTables::new();
        assert!(sy.sym_cube[0].is_solved());
        for a in 0..N_SYM {
            assert_eq!(sy.mult(a, sy.sym_inv[a]), 0);
            assert_eq!(sy.mult(sy.sym_inv[a], a), 0);
            for b in 0..N_SYM {
                let c = sy.mult(a, b);
                if a < N_SYM_D4H && b < N_SYM_D4H {
                    assert!(c < N_SYM_D4H);
                }
                if a < N_SYM_D2H && b < N_SYM_D2H {
                    assert!(c < N_SYM_D2H);
                }
            }
        }
        // all 48 cubes are distinct
        let distinct: std::collections::HashSet<_> = sy.sym_cube.iter().collect();
        assert_eq!(distinct.len(), N_SYM);
    }

    #[test]
    fn test_sym_move() {
        let sy = SymmetriesTables::new();
        for m in 0..N_MOVE {
            assert_eq!(sy.move_conj(0, m), m);
        }
        // D4h keeps phase 2 moves in phase 2
        for s in 0..N_SYM_D4H {
            for m in UD_MOVES {
                assert_ne!(STD_TO_UD[sy.move_conj(s, m as usize)], N_MOVE2);
            }
        }
        // the rotations around the UD axis commute with U
        assert_eq!(sy.move_cube_sym[U as usize] & 0xffff, 0x1111);
        // three rotations around the diagonal give the identity
        for m in 0..N_MOVE {
            let m3 = sy.urf_conj_move(sy.urf_conj_move(sy.urf_conj_move(m)));
            assert_eq!(m3, m);
            assert_eq!(sy.urf_move[1][sy.urf_move[2][m]], m);
            assert_eq!(sy.urf_move[0][m], m);
            assert_eq!(sy.urf_move[3][m], ALL_MOVES[m].get_inverse() as usize);
            assert_eq!(sy.urf_move[1][m] % 3, m % 3);
        }
        assert_eq!(sy.first_move_sym[0], 0);
    }

    #[test]
    fn test_conj_matches_sym_move() {
        let sy = SymmetriesTables::new();
        let cc = CubieCube::from([R, U, F3, L2, D].as_slice());
        for s in 0..N_SYM {
            let conj = sy.conj(&cc, s);
            // S * (C * M) * S^-1 = (S * C * S^-1) * (S * M * S^-1)
            let mut moved = cc;
            moved.apply_move(B);
            let mut expected = conj;
            expected.apply_move(ALL_MOVES[sy.move_conj(s, B as usize)]);
            assert_eq!(sy.conj(&moved, s), expected);
            assert_eq!(sy.conj(&conj, sy.sym_inv[s]), cc);
        }
    }

    #[test]
    fn test_self_symmetry() {
        let solved = CubieCube::default();
        assert_eq!(solved.self_symmetry(), (1 << 49) - 1);
        let mut superflip = CubieCube::default();
        superflip.eo = [1; 12];
        assert_eq!(superflip.self_symmetry(), (1 << 49) - 1);
        let cc = CubieCube::from([R, U, F].as_slice());
        assert_eq!(cc.self_symmetry() & 1, 1);
        let sy = SymmetriesTables::new();
        assert_eq!(sy.self_symmetry(&solved, N_SYM_D4H), 0xffff);
        assert_eq!(sy.self_symmetry(&superflip, N_SYM), (1 << N_SYM) - 1);
        let u = CubieCube::from([U].as_slice());
        assert_eq!(sy.self_symmetry(&u, N_SYM_D4H), 0x1111);
        assert!(sy.is_d4h_conjugate(&CubieCube::from([R].as_slice()), &CubieCube::from([L3].as_slice())));
        assert!(!sy.is_d4h_conjugate(&CubieCube::from([R].as_slice()), &u));
        assert_eq!(sy.skip_moves(1), 0);
    }

    #[test]
    fn test_sym_classes() {
        let sy = SymmetriesTables::new();
        let twist = SymClasses::new("twist", &sy, N_TWIST, N_SYM_D2H, |raw, s| {
            let mut cc = CubieCube::default();
            cc.set_twist(raw);
            sy.conj(&cc, s).get_twist()
        });
        assert_eq!(twist.len(), N_TWIST_SYM);
        assert_eq!(twist.class_to_raw[0], SOLVED);
        assert_eq!(twist.self_sym[0], 0xff);
        let flip = SymClasses::new("flip", &sy, N_FLIP, N_SYM_D2H, |raw, s| {
            let mut cc = CubieCube::default();
            cc.set_flip(raw);
            sy.conj(&cc, s).get_flip()
        });
        assert_eq!(flip.len(), N_FLIP_SYM);
        let corners = SymClasses::new("corners", &sy, N_CORNERS, N_SYM_D4H, |raw, s| {
            let mut cc = CubieCube::default();
            cc.set_corners(raw);
            sy.conj(&cc, s).get_corners()
        });
        assert_eq!(corners.len(), N_PERM_SYM);
        // the recorded symmetry maps every raw coordinate onto its representative
        for raw in (0..N_CORNERS as u16).step_by(101) {
            let sc = corners.raw_to_sym[raw as usize];
            let mut cc = CubieCube::default();
            cc.set_corners(raw);
            assert_eq!(sy.conj(&cc, sc.sym()).get_corners(), corners.class_to_raw[sc.class()]);
        }
    }
}
