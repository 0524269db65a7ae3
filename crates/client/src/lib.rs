//! Client-side state for the sketchbook UI.
//!
//! [`form::SketchForm`] and [`list::SketchList`] are plain state machines
//! that talk to the server through the [`api::SketchApi`] trait.
//! [`app::SketchApp`] composes the two.

pub mod api;
pub mod app;
pub mod error;
pub mod form;
pub mod list;
pub mod models;

#[cfg(test)]
mod testing;
