//! Player domain

pub mod player;

pub use player::*;
