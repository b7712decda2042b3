pub use core_2048::*;

pub mod ai;
pub mod codec;
pub mod config;
pub mod direction;
pub mod game;
pub mod heuristic;
pub mod logic;
