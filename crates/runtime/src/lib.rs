//! Request/response façade over the simulation.
//!
//! The [`Controller`] owns at most one live [`mazecrawl_core::World`] and
//! exposes the operations a frontend drives: start a game from a dungeon
//! file, advance it, interact, build, and save or restore it as JSON on
//! disk. Every operation returns a fresh snapshot or a [`RuntimeError`].

pub mod controller;
pub mod error;
pub mod logging;

pub use controller::Controller;
pub use error::RuntimeError;
