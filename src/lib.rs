//! # Pellets
//!
//! A write-once, append-oriented record format over any byte-addressable
//! resource.
//!
//! ## Core idea
//! Every field starts with a one-byte indicator and, when variable length,
//! a decimal byte count. A reader needs no schema: it can parse forward
//! from a known offset, or find the last record from end-of-data by
//! scanning back to the final whitespace, where the trailer of the newest
//! pellet begins.
//!
//! ```text
//! key     := "N" number | "S" len "\n" bytes | "C" ws key key
//! value   := "D" | "R" len "\n" bytes | ("V" len "\n" bytes)*
//! pellet  := key "\n" value "\n" "O" len ("-" offset ":" count)*
//! ```

pub mod error;
pub mod key;
pub mod pellet;
pub mod resource;
mod token;
pub mod types;
pub mod value;

// Public re-exports for the top-level API
pub use error::{Error, Result};
pub use key::{Key, Number, MAX_COMPOSITE_DEPTH};
pub use pellet::{LocatedPellet, Pellet, PelletLog, Trailer};
pub use resource::{ByteResource, FileResource, MemoryResource, ReadChunk, ScanLimits, TailToken};
pub use token::{LENGTH_TOKEN_LIMIT, NUMBER_TOKEN_LIMIT, OFFSETS_TOKEN_LIMIT};
pub use types::{Offset, SkipPair};
pub use value::ValueContainer;
