//! Domain types, errors, and validation rules shared by the Sketchbook crates.

pub mod error;
pub mod ids;
pub mod lookup;
pub mod types;
pub mod validation;
