//! PCIbex result line schema
//!
//! This module defines the fixed positional layout of PCIbex result lines and
//! the decoder that gives each position a name.

mod raw_line;

pub use raw_line::*;
