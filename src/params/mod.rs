//! Request parameter handling.
//!
//! # Data Flow
//! ```text
//! query string + form body
//!     → decoder.rs (parse, map keys via FIELDS)
//!     → origin.rs (reconstruct request URL, escape `%`)
//!     → ParameterSet (rendered once, then dropped)
//! ```

pub mod decoder;
pub mod origin;
pub mod types;

pub use decoder::{decode, decode_request, parse_form};
pub use origin::{build_origin, escape_percent, resolve_origin};
pub use types::{ParameterSet, FIELDS};
