//! A crate for solving the 3x3 Rubik's cube with a two-phase search over symmetry reduced coordinates.
//!
//! A [solver::Search] session returns the first solution within the requested length and can be
//! resumed to look for more. An optimal mode searches the three axes of the cube at once.
//!
//! ```rust,no_run
//! use twophase::{solve, SolveOptions};
//!
//! let solution = solve(
//!     "RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF",
//!     21,
//!     100_000,
//!     0,
//!     SolveOptions::APPEND_LENGTH,
//! )
//! .unwrap();
//! println!("{}", solution);
//! ```

#[macro_use]
extern crate lazy_static;

/// Module containing functions for scrambling the cube and formatting solutions.
pub mod scramble;

pub mod error;

/// Module containing 3x3 cube constants.
pub mod constants;
pub mod coord;
pub mod cubie;
pub mod facelet;
pub mod moves;
pub mod pruning;
pub mod solver;
pub mod symmetries;

use std::{env, fs, path::Path};

use bincode::{
    config::{self, Configuration},
    decode_from_slice, encode_to_vec,
    error::DecodeError,
    Decode, Encode,
};
use log::{debug, warn};

use crate::constants::TABLE_DIR_ENV;
use crate::error::Error;

pub use crate::moves::Move;
pub use crate::scramble::{Solution, SolveOptions};
pub use crate::solver::{initialize, solve, solver, Search};

const CONFIG: Configuration = config::standard();

pub fn write_table<P, T: Encode>(path: P, table: &T) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    let encoded = encode_to_vec(table, CONFIG)?;
    fs::write(path, encoded)?;
    Ok(())
}

pub fn decode_table<T: Decode>(bytes: &[u8]) -> Result<T, Error> {
    let (decoded, written) = decode_from_slice(bytes, CONFIG)?;
    let additional = bytes.len() - written;

    if additional != 0 {
        return Err(DecodeError::UnexpectedEnd { additional })?;
    }
    Ok(decoded)
}

/// Load the table `name` from the table directory, or build it with `create`.
///
/// Without `TWOPHASE_TABLE_DIR` tables live in memory only. A table that fails to load is rebuilt and
/// written back, a failed write only costs the rebuild on the next start.
pub(crate) fn cached_table<T, F>(name: &str, create: F) -> T
where
    T: Encode + Decode,
    F: FnOnce() -> T,
{
    match env::var_os(TABLE_DIR_ENV) {
        Some(dir) => table_in_dir(Path::new(&dir), name, create),
        None => create(),
    }
}

fn table_in_dir<T, F>(dir: &Path, name: &str, create: F) -> T
where
    T: Encode + Decode,
    F: FnOnce() -> T,
{
    let path = dir.join(name);
    if let Ok(bytes) = fs::read(&path) {
        match decode_table(&bytes) {
            Ok(table) => {
                debug!("Loaded {} table from {}", name, path.display());
                return table;
            }
            Err(e) => warn!("Discarding {}: {}", path.display(), e),
        }
    }
    debug!("No usable {} table in {}, building it", name, dir.display());
    let table = create();
    let stored = fs::create_dir_all(dir)
        .map_err(Error::from)
        .and_then(|_| write_table(&path, &table));
    if let Err(e) = stored {
        warn!("Could not store {} table: {}", name, e);
    }
    table
}
