//! Concrete state spaces exercising the search engine.

pub mod delivery;
pub mod jugs;

pub use delivery::{DeliveryLayout, DeliveryPuzzle, DeliveryState, Direction, Position};
pub use jugs::{JugConfig, JugPuzzle, JugState};
