//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Reads take `&PgPool`; multi-step writes take the [`Store`](crate::Store)
//! so they can honour its write strategy.

pub mod lookup_repo;
pub mod sketch_repo;

pub use lookup_repo::LookupRepo;
pub use sketch_repo::SketchRepo;
