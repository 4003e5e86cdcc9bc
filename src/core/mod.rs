pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::AiConfig;
pub use error::{AiError, Result};
pub use rng::{DecisionRng, ScriptedRng, SeededRng};
