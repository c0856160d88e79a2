// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod core;
pub mod params;

pub mod cache;
pub mod events;
pub mod geo;
pub mod resolve;
pub mod runner;

/// Crate-wide boxed error. `Send + Sync` so the binary can report it via eyre.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
