//! Rebel AI - per-turn decision engine for the autonomous rebel side
//!
//! Each turn the engine fuses aging sighting reports into a threat map,
//! builds a pool of weighted candidate tasks and executes one task per
//! action point until the budget is spent or the controlled entity drops
//! out of play.

pub mod core;
pub mod events;
pub mod intel;
pub mod ledger;
pub mod persistence;
pub mod state;
pub mod tasks;
pub mod turn;
pub mod world;

pub use crate::core::{AiConfig, AiError, DecisionRng, Result, ScriptedRng, SeededRng};
pub use crate::turn::{RebelAi, TurnReport};
pub use crate::world::{AiServices, World};
