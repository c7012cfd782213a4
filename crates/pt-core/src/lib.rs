//! pt-core: shared foundation for pipetherm.
//!
//! Contains:
//! - units (uom SI types + constructors for pipe and material properties)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PtError, PtResult};
pub use numeric::*;
pub use units::*;
