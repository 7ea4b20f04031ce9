//! Diagnostico AI - AI readiness diagnostic for small and medium businesses
//!
//! Receives questionnaire answers, asks a generative model for a structured
//! analysis trying a chain of candidate model identifiers, and degrades to a
//! deterministic rule-based analysis whenever the external path cannot
//! produce a valid result.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
