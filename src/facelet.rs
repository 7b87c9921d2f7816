use std::fmt;

use crate::constants::*;
use crate::cubie::{CubieCube, ALL_CORNERS, ALL_EDGES};
use crate::error::Error;

/// The six face colors, named after the face whose center carries them.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    U,
    R,
    F,
    D,
    L,
    B,
}

use Color::*;

/// Facelet indices of the corner positions, starting with the U or D facelet, then clockwise.
///
/// The facelets are numbered U1..U9, R1..R9, F1..F9, D1..D9, L1..L9, B1..B9 = 0..53.
pub const CORNER_FACELET: [[usize; 3]; 8] = [
    [8, 9, 20],   // U9 R1 F3
    [6, 18, 38],  // U7 F1 L3
    [0, 36, 47],  // U1 L1 B3
    [2, 45, 11],  // U3 B1 R3
    [29, 26, 15], // D3 F9 R7
    [27, 44, 24], // D1 L9 F7
    [33, 53, 42], // D7 B9 L7
    [35, 17, 51], // D9 R9 B7
];

/// Facelet indices of the edge positions.
pub const EDGE_FACELET: [[usize; 2]; 12] = [
    [5, 10],  // U6 R2
    [7, 19],  // U8 F2
    [3, 37],  // U4 L2
    [1, 46],  // U2 B2
    [32, 16], // D6 R8
    [28, 25], // D2 F8
    [30, 43], // D4 L8
    [34, 52], // D8 B8
    [23, 12], // F6 R4
    [21, 41], // F4 L6
    [50, 39], // B6 L4
    [48, 14], // B4 R6
];

pub const CORNER_COLOR: [[Color; 3]; 8] = [
    [U, R, F],
    [U, F, L],
    [U, L, B],
    [U, B, R],
    [D, F, R],
    [D, L, F],
    [D, B, L],
    [D, R, B],
];

pub const EDGE_COLOR: [[Color; 2]; 12] = [
    [U, R],
    [U, F],
    [U, L],
    [U, B],
    [D, R],
    [D, F],
    [D, L],
    [D, B],
    [F, R],
    [F, L],
    [B, L],
    [B, R],
];

/// Cube on the facelet level.
///
/// The facelet string lists the 54 facelets face by face in the order U, R, F, D, L, B. The colors are
/// given by the characters of the six center facelets, so any six distinct characters can be used.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FaceCube {
    pub f: [Color; 54],
}

impl Default for FaceCube {
    fn default() -> Self {
        let mut f = [U; 54];
        for (i, c) in f.iter_mut().enumerate() {
            *c = ALL_COLORS[i / 9];
        }
        Self { f }
    }
}

impl fmt::Display for FaceCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.f {
            write!(f, "{:?}", c)?;
        }
        Ok(())
    }
}

impl TryFrom<&str> for FaceCube {
    type Error = Error;

    fn try_from(cube_string: &str) -> Result<Self, Self::Error> {
        let chars: Vec<char> = cube_string.chars().collect();
        if chars.len() != 54 {
            return Err(Error::MalformedFacelets);
        }
        let centers = [chars[4], chars[13], chars[22], chars[31], chars[40], chars[49]];
        let mut f = [U; 54];
        let mut count = [0; 6];
        for (i, ch) in chars.iter().enumerate() {
            let c = centers
                .iter()
                .position(|x| x == ch)
                .ok_or(Error::MalformedFacelets)?;
            f[i] = ALL_COLORS[c];
            count[c] += 1;
        }
        if count.iter().any(|&n| n != 9) {
            return Err(Error::WrongColorCount);
        }
        Ok(Self { f })
    }
}

impl From<&CubieCube> for FaceCube {
    fn from(cc: &CubieCube) -> Self {
        let mut fc = FaceCube::default();
        for i in 0..8 {
            let j = cc.cp[i] as usize;
            let ori = cc.co[i] as usize;
            for n in 0..3 {
                fc.f[CORNER_FACELET[i][(n + ori) % 3]] = CORNER_COLOR[j][n];
            }
        }
        for i in 0..12 {
            let j = cc.ep[i] as usize;
            let ori = cc.eo[i] as usize;
            for n in 0..2 {
                fc.f[EDGE_FACELET[i][(n + ori) % 2]] = EDGE_COLOR[j][n];
            }
        }
        fc
    }
}

/// Converts facelets to cubies and checks that the result is a reachable state.
impl TryFrom<&FaceCube> for CubieCube {
    type Error = Error;

    fn try_from(fc: &FaceCube) -> Result<Self, Self::Error> {
        let mut cc = CubieCube::default();
        for i in 0..12 {
            let [a, b] = EDGE_FACELET[i].map(|k| fc.f[k]);
            let (j, ori) = EDGE_COLOR
                .iter()
                .enumerate()
                .find_map(|(j, col)| match (a == col[0] && b == col[1], a == col[1] && b == col[0]) {
                    (true, _) => Some((j, 0)),
                    (_, true) => Some((j, 1)),
                    _ => None,
                })
                .ok_or(Error::MissingEdge)?;
            cc.ep[i] = ALL_EDGES[j];
            cc.eo[i] = ori;
        }
        for i in 0..8 {
            let fac = CORNER_FACELET[i];
            // the U or D facelet gives the orientation
            let ori = (0..3)
                .find(|&o| matches!(fc.f[fac[o]], U | D))
                .ok_or(Error::MissingCorner)?;
            let col1 = fc.f[fac[(ori + 1) % 3]];
            let col2 = fc.f[fac[(ori + 2) % 3]];
            let j = CORNER_COLOR
                .iter()
                .position(|col| col1 == col[1] && col2 == col[2])
                .ok_or(Error::MissingCorner)?;
            cc.cp[i] = ALL_CORNERS[j];
            cc.co[i] = ori as u8;
        }
        cc.verify()?;
        Ok(cc)
    }
}

/// Parse and validate a facelet string into a cubie cube.
pub fn parse_facelets(cube_string: &str) -> Result<CubieCube, Error> {
    let fc = FaceCube::try_from(cube_string)?;
    CubieCube::try_from(&fc)
}

#[cfg(test)]
mod test {
    use crate::facelet::*;
    use crate::moves::Move;

    #[test]
    fn test_solved_roundtrip() {
        let fc = FaceCube::try_from(SOLVED_FACELETS).unwrap();
        let cc = CubieCube::try_from(&fc).unwrap();
        assert!(cc.is_solved());
        assert_eq!(FaceCube::from(&cc).to_string(), SOLVED_FACELETS);
    }

    #[test]
    fn test_custom_colors() {
        let s = SOLVED_FACELETS
            .replace('U', "w")
            .replace('D', "y")
            .replace('F', "g")
            .replace('B', "b")
            .replace('R', "r")
            .replace('L', "o");
        assert!(parse_facelets(&s).unwrap().is_solved());
    }

    #[test]
    fn test_state_roundtrip() {
        let cc = CubieCube::from([Move::R, Move::U2, Move::F3, Move::D, Move::L2, Move::B, Move::U3, Move::R2].as_slice());
        let s = FaceCube::from(&cc).to_string();
        assert_eq!(parse_facelets(&s).unwrap(), cc);
    }

    #[test]
    fn test_known_state() {
        let cc = parse_facelets("RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF").unwrap();
        assert!(cc.verify().is_ok());
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_facelets("UUU"), Err(Error::MalformedFacelets)));
        let mut s: Vec<char> = SOLVED_FACELETS.chars().collect();
        s[0] = 'R';
        let s: String = s.into_iter().collect();
        assert!(matches!(parse_facelets(&s), Err(Error::WrongColorCount)));
        let s = SOLVED_FACELETS.replacen('U', "X", 1);
        assert!(matches!(parse_facelets(&s), Err(Error::MalformedFacelets)));

        let mut cc = CubieCube::default();
        cc.eo[0] = 1;
        let s = FaceCube::from(&cc).to_string();
        assert!(matches!(parse_facelets(&s), Err(Error::EdgeFlip)));

        let mut cc = CubieCube::default();
        cc.co[0] = 1;
        let s = FaceCube::from(&cc).to_string();
        assert!(matches!(parse_facelets(&s), Err(Error::CornerTwist)));

        let mut cc = CubieCube::default();
        cc.ep.swap(0, 1);
        let s = FaceCube::from(&cc).to_string();
        assert!(matches!(parse_facelets(&s), Err(Error::Parity)));
    }

    #[test]
    fn test_superflip() {
        let mut cc = CubieCube::default();
        cc.eo = [1; 12];
        let s = FaceCube::from(&cc).to_string();
        assert_eq!(parse_facelets(&s).unwrap(), cc);
    }
}
