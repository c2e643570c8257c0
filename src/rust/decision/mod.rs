//! The decision engine: rule cascade, thresholds and disposal tips.

mod engine;
mod rules;
pub mod thresholds;
mod tips;

pub use engine::DecisionEngine;
pub use rules::{DecisionRule, HAZARDOUS_TIE_KEYWORDS, RECYCLABLE_TIE_KEYWORDS};
pub use thresholds::DecisionThresholds;
pub use tips::disposal_tip;
