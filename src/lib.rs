//! Core simulation and terminal frontend for an arcade Snake variant.
//!
//! The snake eats apples on a fixed grid; every tenth apple spawns a large
//! bonus orange that, when eaten, slows the simulation for a few seconds.
//! All mutable game state lives in [`session::GameSession`]; rendering and
//! sound are collaborators that receive read-only snapshots.

pub mod clock;
pub mod config;
pub mod cues;
pub mod food;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
