//! Diagnostic domain - survey answers, analysis results, and the pure logic
//! that turns one into the other without external help.

mod analysis;
mod fallback;
mod prompt;
mod response;
mod survey;

pub use analysis::{AnalysisResult, RecommendedTool};
pub use fallback::{
    fallback_insight, generate_fallback_analysis, PROBLEM_GENERIC_OPTIMIZATION,
    PROBLEM_HIGH_REWORK, PROBLEM_INFORMATION_ACCESS, PROBLEM_INFO_SEARCH_TIME,
    PROBLEM_MANUAL_PROCESSES,
};
pub use prompt::build_analysis_prompt;
pub use response::{parse_analysis, validate_analysis, StructureError};
pub use survey::{
    SurveyError, SurveyInput, ACTIVITY_INFO_SEARCH, ACTIVITY_MANUAL_PROCESSES, NONE_REPORTED,
    NOT_INFORMED, RATING_MAX, RATING_MIN,
};

#[cfg(test)]
pub(crate) use survey::test_support;
