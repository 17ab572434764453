//! # Wind
//!
//! Ambient wind from a set of point sources. Each enabled source pushes horizontally
//! along its heading with a strength that falls off linearly to zero at its radius and
//! optionally gusts sinusoidally over time. The field holds no state: every query takes
//! an immutable snapshot of the sources.

mod field;
mod source;

pub use field::{wind_at, WindField};
pub use source::{Variability, WindError, WindSource, WindSourceId};
