//! Analysis result - the structured recommendation set returned to the caller.

/// A tool recommended for the surveyed business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendedTool {
    pub name: String,
    pub description: String,
    pub use_case: String,
    pub category: String,
}

impl RecommendedTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        use_case: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            use_case: use_case.into(),
            category: category.into(),
        }
    }
}

/// The structured output of an analysis run.
///
/// Produced either from the external model's response or from the
/// deterministic fallback generator; the caller cannot tell the two apart.
/// The three lists are always present (possibly empty on the model path);
/// `insight` is always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Identified problems, most significant first.
    pub problems: Vec<String>,
    /// Recommended tools.
    pub tools: Vec<RecommendedTool>,
    /// Suggested next steps, in order.
    pub next_steps: Vec<String>,
    /// Free-text insight; never empty.
    pub insight: String,
}
