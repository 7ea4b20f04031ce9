//! Application layer - use-case handlers wiring domain logic to ports.

mod analyze_survey;

pub use analyze_survey::{AnalyzeSurveyHandler, DEFAULT_CANDIDATE_MODELS};
