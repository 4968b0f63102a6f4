//! AI components

pub mod darkness;
pub mod fsm;


// Re-export all components
pub use darkness::*;
pub use fsm::*;
