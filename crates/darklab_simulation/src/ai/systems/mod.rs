//! AI systems (Darkness FSM, movement behaviors, teleport, reactions)

pub mod fsm;
pub mod movement;
pub mod reactions;
pub mod teleport;

// Re-export all systems
pub use fsm::*;
pub use movement::*;
pub use reactions::*;
pub use teleport::*;
