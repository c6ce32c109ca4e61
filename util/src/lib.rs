//! Small helpers shared by the footprint extraction crates: logging setup, formatting numbers for
//! humans, and writing files.

#[macro_use]
extern crate log;

mod io;
pub mod logger;
mod utils;

pub use crate::io::{file_size, to_json, write_json};
pub use crate::utils::{basename, prettyprint_bytes, prettyprint_usize};
