//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `diagnostic` - Survey input, analysis result, prompt construction,
//!   response parsing/validation, and the rule-based fallback generator

pub mod diagnostic;
