use std::fmt;

use rand::{thread_rng, Rng};

use self::{Corner::*, Edge::*};
use crate::constants::*;
use crate::error::Error;
use crate::moves::{Move, B_MOVE, D_MOVE, F_MOVE, L_MOVE, R_MOVE, U_MOVE};

/// The names of the corner positions of the cube. Corner URF e.g. has an U(p), a R(ight) and a F(ront) facelet.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Corner {
    URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB,
}

pub const ALL_CORNERS: [Corner; 8] = [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB];

/// The names of the edge positions of the cube. Edge UR e.g. has an U(p) and R(ight) facelet.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Edge {
    UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR,
}

pub const ALL_EDGES: [Edge; 12] = [UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR];

/// Represent a cube on the cubie level with 8 corner cubies, 12 edge cubies and the cubie orientations.
///
/// `cp[i]` is the corner occupying position i and `co[i]` its orientation. Orientations 3, 4 and 5 only
/// occur for mirrored symmetry cubes, never for reachable states.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct CubieCube {
    pub cp: [Corner; 8],
    pub co: [u8; 8],
    pub ep: [Edge; 12],
    pub eo: [u8; 12],
}

impl Default for CubieCube {
    fn default() -> Self {
        Self {
            cp: ALL_CORNERS,
            co: [0; 8],
            ep: ALL_EDGES,
            eo: [0; 12],
        }
    }
}

impl fmt::Display for CubieCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..8 {
            write!(f, "({:?},{})", self.cp[i], self.co[i])?;
        }
        writeln!(f)?;
        for i in 0..12 {
            write!(f, "({:?},{})", self.ep[i], self.eo[i])?;
        }
        Ok(())
    }
}

impl From<&[Move]> for CubieCube {
    fn from(moves: &[Move]) -> Self {
        let mut cc = CubieCube::default();
        cc.multiply_moves(moves);
        cc
    }
}

/// The cubes for the six clockwise face turns U, R, F, D, L, B.
pub fn basic_move_cubes() -> [CubieCube; 6] {
    [U_MOVE, R_MOVE, F_MOVE, D_MOVE, L_MOVE, B_MOVE]
}

/// The cubes for all 18 moves in move index order.
pub fn move_cubes() -> [CubieCube; N_MOVE] {
    let bmc = basic_move_cubes();
    let mut mc = [CubieCube::default(); N_MOVE];
    for (face, base) in bmc.iter().enumerate() {
        let mut cc = CubieCube::default();
        for power in 0..3 {
            cc.multiply(*base);
            mc[3 * face + power] = cc;
        }
    }
    mc
}

/// Binomial coefficient n choose k, 0 if n < k.
pub fn c_nk(n: usize, k: usize) -> usize {
    if n < k {
        return 0;
    }
    let k = k.min(n - k);
    let mut s = 1;
    let mut i = n;
    let mut j = 1;
    while i != n - k {
        s *= i;
        s /= j;
        i -= 1;
        j += 1;
    }
    s
}

/// Lehmer index of a permutation of 0..n, 0 for the identity.
pub fn perm_to_index(p: &[u8]) -> usize {
    let n = p.len();
    let mut idx = 0;
    for i in 0..n {
        idx *= n - i;
        idx += p[i + 1..].iter().filter(|&&v| v < p[i]).count();
    }
    idx
}

/// Inverse of [perm_to_index], writes the permutation into `p` (at most 12 elements).
pub fn index_to_perm(mut idx: usize, p: &mut [u8]) {
    let n = p.len();
    let mut digits = [0usize; 12];
    for i in (0..n).rev() {
        digits[i] = idx % (n - i);
        idx /= n - i;
    }
    let mut avail = [0u8; 12];
    for (i, v) in avail.iter_mut().enumerate().take(n) {
        *v = i as u8;
    }
    let mut left = n;
    for i in 0..n {
        let d = digits[i];
        p[i] = avail[d];
        avail.copy_within(d + 1..left, d);
        left -= 1;
    }
}

/// 1 for an odd permutation, 0 for an even one.
pub fn perm_parity(p: &[u8]) -> u8 {
    let mut s = 0;
    for i in 0..p.len() {
        for j in i + 1..p.len() {
            if p[j] < p[i] {
                s += 1;
            }
        }
    }
    s % 2
}

impl CubieCube {
    /// Multiply this cubie cube with another cubie cube b, restricted to the corners. Does not change b.
    ///
    /// Handles the mirrored orientations 3..5 so symmetry cubes with reflections can be composed.
    pub fn corner_multiply(&mut self, b: CubieCube) {
        let mut c_perm = [URF; 8];
        let mut c_ori = [0; 8];
        for c in 0..8 {
            let from = b.cp[c] as usize;
            c_perm[c] = self.cp[from];
            let ori_a = self.co[from];
            let ori_b = b.co[c];
            c_ori[c] = match (ori_a < 3, ori_b < 3) {
                // two regular cubes
                (true, true) => (ori_a + ori_b) % 3,
                // cube b is in a mirrored state, so is the composition
                (true, false) => {
                    let ori = ori_a + ori_b;
                    if ori >= 6 {
                        ori - 3
                    } else {
                        ori
                    }
                }
                // cube a is in a mirrored state, so is the composition
                (false, true) => {
                    let ori = ori_a - ori_b;
                    if ori < 3 {
                        ori + 3
                    } else {
                        ori
                    }
                }
                // both mirrored, the composition is regular
                (false, false) => (ori_a + 3 - ori_b) % 3,
            };
        }
        self.cp = c_perm;
        self.co = c_ori;
    }

    /// Multiply this cubie cube with another cubie cube b, restricted to the edges. Does not change b.
    pub fn edge_multiply(&mut self, b: CubieCube) {
        let mut e_perm = [UR; 12];
        let mut e_ori = [0; 12];
        for e in 0..12 {
            let from = b.ep[e] as usize;
            e_perm[e] = self.ep[from];
            e_ori[e] = (b.eo[e] + self.eo[from]) % 2;
        }
        self.ep = e_perm;
        self.eo = e_ori;
    }

    /// Multiply this cubie cube with another cubie cube b. Does not change b.
    pub fn multiply(&mut self, b: CubieCube) {
        self.corner_multiply(b);
        self.edge_multiply(b);
    }

    /// Return the inverse of this cubie cube.
    pub fn inverse_cubie_cube(&self) -> Self {
        let mut d = CubieCube::default();
        for e in 0..12 {
            d.ep[self.ep[e] as usize] = ALL_EDGES[e];
        }
        for e in 0..12 {
            d.eo[e] = self.eo[d.ep[e] as usize];
        }
        for c in 0..8 {
            d.cp[self.cp[c] as usize] = ALL_CORNERS[c];
        }
        for c in 0..8 {
            let ori = self.co[d.cp[c] as usize];
            d.co[c] = if ori >= 3 { ori } else { (3 - ori) % 3 };
        }
        d
    }

    /// `s * self * s_inv`, the conjugate of this cube by a symmetry cube.
    pub fn conjugate(&self, s: &CubieCube, s_inv: &CubieCube) -> Self {
        let mut ss = *s;
        ss.multiply(*self);
        ss.multiply(*s_inv);
        ss
    }

    /// Apply a single move in place.
    pub fn apply_move(&mut self, m: Move) {
        let base = basic_move_cubes()[m as usize / 3];
        for _ in 0..=(m as usize % 3) {
            self.multiply(base);
        }
    }

    /// Apply a sequence of moves in place.
    pub fn multiply_moves(&mut self, moves: &[Move]) {
        for &m in moves {
            self.apply_move(m);
        }
    }

    /// Return a copy with the moves applied.
    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        let mut cc = *self;
        cc.multiply_moves(moves);
        cc
    }

    pub fn is_solved(&self) -> bool {
        *self == CubieCube::default()
    }

    /// The twist of the 8 corners. 0 <= twist < 2187 in phase 1, twist = 0 in phase 2.
    pub fn get_twist(&self) -> u16 {
        self.co[..7].iter().fold(0, |acc, &c| 3 * acc + c as u16)
    }

    pub fn set_twist(&mut self, twist: u16) {
        let mut twist = twist;
        let mut twistparity = 0;
        for i in (0..7).rev() {
            self.co[i] = (twist % 3) as u8;
            twistparity += self.co[i];
            twist /= 3;
        }
        self.co[7] = (3 - twistparity % 3) % 3;
    }

    /// The flip of the 12 edges. 0 <= flip < 2048 in phase 1, flip = 0 in phase 2.
    pub fn get_flip(&self) -> u16 {
        self.eo[..11].iter().fold(0, |acc, &e| 2 * acc + e as u16)
    }

    pub fn set_flip(&mut self, flip: u16) {
        let mut flip = flip;
        let mut flipparity = 0;
        for i in (0..11).rev() {
            self.eo[i] = (flip % 2) as u8;
            flipparity += self.eo[i];
            flip /= 2;
        }
        self.eo[11] = (2 - flipparity % 2) % 2;
    }

    /// Location and order of the four edges `first..first + 4`, with positions rotated right by `shift`
    /// before they are scanned.
    fn get_edge4(&self, first: usize, shift: usize) -> u16 {
        let mut a = 0;
        let mut x = 0;
        let mut order = [0u8; 4];
        for j in (0..12).rev() {
            let e = self.ep[(j + 12 - shift) % 12] as usize;
            if (first..first + 4).contains(&e) {
                a += c_nk(11 - j, x + 1);
                order[3 - x] = (e - first) as u8;
                x += 1;
            }
        }
        (N_PERM_4 * a + perm_to_index(&order)) as u16
    }

    fn set_edge4(&mut self, idx: u16, first: usize, shift: usize) {
        let mut a = idx as usize / N_PERM_4;
        let mut order = [0u8; 4];
        index_to_perm(idx as usize % N_PERM_4, &mut order);
        let mut placed = [None; 12];
        let mut x = 4;
        for j in 0..12 {
            if x > 0 && a >= c_nk(11 - j, x) {
                a -= c_nk(11 - j, x);
                placed[(j + 12 - shift) % 12] = Some(ALL_EDGES[first + order[4 - x] as usize]);
                x -= 1;
            }
        }
        // the other edges fill the remaining positions in ascending order
        let mut k = 0;
        for (j, p) in placed.iter().enumerate() {
            self.ep[j] = match p {
                Some(e) => *e,
                None => {
                    while (first..first + 4).contains(&k) {
                        k += 1;
                    }
                    k += 1;
                    ALL_EDGES[k - 1]
                }
            };
        }
    }

    /// Location of the UD-slice edges FR, FL, BL and BR ignoring their permutation.
    /// 0 <= slice < 495 in phase 1, slice = 0 in phase 2.
    pub fn get_slice(&self) -> u16 {
        self.get_slice_sorted() / N_PERM_4 as u16
    }

    pub fn set_slice(&mut self, idx: u16) {
        self.set_slice_sorted(idx * N_PERM_4 as u16);
    }

    /// Permutation and location of the UD-slice edges FR, FL, BL and BR.
    /// 0 <= slice_sorted < 11880 in phase 1, 0 <= slice_sorted < 24 in phase 2, slice_sorted = 0 for solved cube.
    pub fn get_slice_sorted(&self) -> u16 {
        self.get_edge4(FR as usize, 0)
    }

    pub fn set_slice_sorted(&mut self, idx: u16) {
        self.set_edge4(idx, FR as usize, 0);
    }

    /// Permutation and location of edges UR, UF, UL and UB.
    /// 0 <= u_edges < 11880 in phase 1, 0 <= u_edges < 1680 in phase 2, u_edges = 1656 for solved cube.
    pub fn get_u_edges(&self) -> u16 {
        self.get_edge4(UR as usize, 4)
    }

    pub fn set_u_edges(&mut self, idx: u16) {
        self.set_edge4(idx, UR as usize, 4);
    }

    /// Permutation and location of edges DR, DF, DL and DB.
    /// 0 <= d_edges < 11880 in phase 1, 0 <= d_edges < 1680 in phase 2, d_edges = 0 for solved cube.
    pub fn get_d_edges(&self) -> u16 {
        self.get_edge4(DR as usize, 4)
    }

    pub fn set_d_edges(&mut self, idx: u16) {
        self.set_edge4(idx, DR as usize, 4);
    }

    /// Permutation of all corners. 0 <= corners < 40320, corners = 0 for solved cube.
    pub fn get_corners(&self) -> u16 {
        let perm = self.cp.map(|c| c as u8);
        perm_to_index(&perm) as u16
    }

    pub fn set_corners(&mut self, idx: u16) {
        let mut perm = [0u8; 8];
        index_to_perm(idx as usize, &mut perm);
        self.cp = perm.map(|c| ALL_CORNERS[c as usize]);
    }

    /// Permutation of the 8 U and D edges. Only meaningful in phase 2 where they stay out of the UD-slice.
    /// 0 <= ud_edges < 40320, ud_edges = 0 for solved cube.
    pub fn get_ud_edges(&self) -> u16 {
        let mut perm = [0u8; 8];
        for (p, e) in perm.iter_mut().zip(&self.ep[..8]) {
            *p = *e as u8;
        }
        perm_to_index(&perm) as u16
    }

    pub fn set_ud_edges(&mut self, idx: u16) {
        let mut perm = [0u8; 8];
        index_to_perm(idx as usize, &mut perm);
        for i in 0..8 {
            self.ep[i] = ALL_EDGES[perm[i] as usize];
        }
        self.ep[8..].copy_from_slice(&[FR, FL, BL, BR]);
    }

    /// Location of the four D-layer corners. 0 <= ccomb < 70, ccomb = 0 for solved cube.
    pub fn get_ccomb(&self) -> u16 {
        let mut a = 0;
        let mut x = 0;
        for j in (0..8).rev() {
            if self.cp[j] >= DFR {
                a += c_nk(7 - j, x + 1);
                x += 1;
            }
        }
        a as u16
    }

    pub fn set_ccomb(&mut self, idx: u16) {
        let mut a = idx as usize;
        let mut x = 4;
        let mut u = 0;
        for j in 0..8 {
            if x > 0 && a >= c_nk(7 - j, x) {
                a -= c_nk(7 - j, x);
                self.cp[j] = ALL_CORNERS[8 - x];
                x -= 1;
            } else {
                self.cp[j] = ALL_CORNERS[u];
                u += 1;
            }
        }
    }

    pub fn corner_parity(&self) -> u8 {
        perm_parity(&self.cp.map(|c| c as u8))
    }

    pub fn edge_parity(&self) -> u8 {
        perm_parity(&self.ep.map(|e| e as u8))
    }

    /// Check if this cubie cube is a reachable state.
    pub fn verify(&self) -> Result<(), Error> {
        let edge_mask = self.ep.iter().fold(0u16, |m, &e| m | 1 << e as u16);
        if edge_mask != 0xfff {
            return Err(Error::MissingEdge);
        }
        if self.eo.iter().any(|&e| e > 1) || self.eo.iter().sum::<u8>() % 2 != 0 {
            return Err(Error::EdgeFlip);
        }
        let corner_mask = self.cp.iter().fold(0u8, |m, &c| m | 1 << c as u8);
        if corner_mask != 0xff {
            return Err(Error::MissingCorner);
        }
        if self.co.iter().any(|&c| c > 2) || self.co.iter().sum::<u8>() % 3 != 0 {
            return Err(Error::CornerTwist);
        }
        if self.edge_parity() != self.corner_parity() {
            return Err(Error::Parity);
        }
        Ok(())
    }

    /// Replace this cube with a uniformly random reachable state.
    pub fn randomize(&mut self) {
        let mut rng = thread_rng();
        let mut ep = [0u8; 12];
        index_to_perm(rng.gen_range(0..479_001_600), &mut ep);
        self.ep = ep.map(|e| ALL_EDGES[e as usize]);
        self.set_corners(rng.gen_range(0..N_CORNERS) as u16);
        if self.edge_parity() != self.corner_parity() {
            self.ep.swap(0, 1);
        }
        self.set_flip(rng.gen_range(0..N_FLIP) as u16);
        self.set_twist(rng.gen_range(0..N_TWIST) as u16);
    }
}

#[cfg(test)]
mod test {
    use crate::cubie::*;
    use crate::moves::Move::*;

    #[test]
    fn test_c_nk() {
        assert_eq!(c_nk(12, 4), 495);
        assert_eq!(c_nk(8, 4), 70);
        assert_eq!(c_nk(3, 4), 0);
        assert_eq!(c_nk(5, 0), 1);
    }

    #[test]
    fn test_perm_index() {
        let mut p = [0u8; 8];
        for idx in (0..N_CORNERS).step_by(97) {
            index_to_perm(idx, &mut p);
            assert_eq!(perm_to_index(&p), idx);
        }
        index_to_perm(0, &mut p);
        assert_eq!(p, [0, 1, 2, 3, 4, 5, 6, 7]);
        index_to_perm(N_CORNERS - 1, &mut p);
        assert_eq!(p, [7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_solved_coordinates() {
        let cc = CubieCube::default();
        assert_eq!(cc.get_twist(), SOLVED);
        assert_eq!(cc.get_flip(), SOLVED);
        assert_eq!(cc.get_slice_sorted(), SOLVED);
        assert_eq!(cc.get_u_edges(), SOLVED_U_EDGES);
        assert_eq!(cc.get_d_edges(), SOLVED);
        assert_eq!(cc.get_corners(), SOLVED);
        assert_eq!(cc.get_ud_edges(), SOLVED);
        assert_eq!(cc.get_ccomb(), SOLVED);
    }

    #[test]
    fn test_coordinate_roundtrip() {
        let mut cc = CubieCube::default();
        for i in 0..N_TWIST as u16 {
            cc.set_twist(i);
            assert_eq!(cc.get_twist(), i);
        }
        for i in 0..N_FLIP as u16 {
            cc.set_flip(i);
            assert_eq!(cc.get_flip(), i);
        }
        for i in 0..N_SLICE_SORTED as u16 {
            cc.set_slice_sorted(i);
            assert_eq!(cc.get_slice_sorted(), i);
            cc.set_u_edges(i);
            assert_eq!(cc.get_u_edges(), i);
            cc.set_d_edges(i);
            assert_eq!(cc.get_d_edges(), i);
        }
        for i in 0..N_COMB as u16 {
            cc.set_ccomb(i);
            assert_eq!(cc.get_ccomb(), i);
        }
        for i in (0..N_CORNERS as u16).step_by(7) {
            cc.set_corners(i);
            assert_eq!(cc.get_corners(), i);
            cc.set_ud_edges(i);
            assert_eq!(cc.get_ud_edges(), i);
        }
    }

    #[test]
    fn test_move_inverse() {
        let cc = CubieCube::from([R, U, R3, U3, F2, D, L3, B].as_slice());
        let mut inv = cc.inverse_cubie_cube();
        inv.multiply(cc);
        assert!(inv.is_solved());
        for m in [U, R, F, D, L, B] {
            let cc = CubieCube::from([m, m, m, m].as_slice());
            assert!(cc.is_solved());
        }
    }

    #[test]
    fn test_phase2_ranges() {
        let cc = CubieCube::from([U, R2, F2, D3, L2, B2, U2, D].as_slice());
        assert_eq!(cc.get_twist(), 0);
        assert_eq!(cc.get_flip(), 0);
        assert!(cc.get_slice_sorted() < N_PERM_4 as u16);
        assert!(cc.get_u_edges() < N_U_EDGES_PHASE2 as u16);
        assert!(cc.get_d_edges() < N_U_EDGES_PHASE2 as u16);
    }

    #[test]
    fn test_verify() {
        let mut cc = CubieCube::default();
        cc.eo[3] = 1;
        assert!(matches!(cc.verify(), Err(Error::EdgeFlip)));
        let mut cc = CubieCube::default();
        cc.co[5] = 2;
        assert!(matches!(cc.verify(), Err(Error::CornerTwist)));
        let mut cc = CubieCube::default();
        cc.ep.swap(2, 7);
        assert!(matches!(cc.verify(), Err(Error::Parity)));
        let mut cc = CubieCube::default();
        cc.ep[0] = UF;
        assert!(matches!(cc.verify(), Err(Error::MissingEdge)));
        // an even sum alone is not enough
        let mut cc = CubieCube::default();
        cc.eo[0] = 2;
        assert!(matches!(cc.verify(), Err(Error::EdgeFlip)));
        let mut cc = CubieCube::default();
        cc.cp[0] = DRB;
        assert!(matches!(cc.verify(), Err(Error::MissingCorner)));
    }

    #[test]
    fn test_randomize() {
        for _ in 0..50 {
            let mut cc = CubieCube::default();
            cc.randomize();
            assert!(cc.verify().is_ok());
        }
    }
}
