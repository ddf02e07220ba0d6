//! Background tasks internal to the crate.

mod arena;

pub use arena::{ArenaWorker, Command};
