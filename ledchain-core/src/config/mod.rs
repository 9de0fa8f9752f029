//! Configuration types
//!
//! Board-agnostic configuration structures for the matrix chain. The
//! firmware fills these from its embedded TOML file.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
