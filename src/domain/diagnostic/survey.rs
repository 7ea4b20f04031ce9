//! Survey input - the questionnaire answers submitted by a business user.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Lower bound for the 1-5 rating scales.
pub const RATING_MIN: u8 = 1;
/// Upper bound for the 1-5 rating scales.
pub const RATING_MAX: u8 = 5;

/// Literal activity option that triggers the information-search fallback rule.
pub const ACTIVITY_INFO_SEARCH: &str = "Busca de informações/documentos";
/// Literal activity option that triggers the manual-processes fallback rule.
pub const ACTIVITY_MANUAL_PROCESSES: &str = "Processos manuais repetitivos";

/// Placeholder embedded in the prompt when the main problem was not given.
pub const NOT_INFORMED: &str = "Não informado";
/// Placeholder for absent additional comments or an empty activity selection.
pub const NONE_REPORTED: &str = "Nenhum";

/// Errors raised when constructing a [`SurveyInput`] from untrusted data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SurveyError {
    #[error("field '{field}' must be between {min} and {max}, got {actual}")]
    RatingOutOfRange {
        field: &'static str,
        min: u8,
        max: u8,
        actual: u8,
    },
}

impl SurveyError {
    pub fn rating_out_of_range(field: &'static str, actual: u8) -> Self {
        SurveyError::RatingOutOfRange {
            field,
            min: RATING_MIN,
            max: RATING_MAX,
            actual,
        }
    }
}

/// Flat record of questionnaire answers.
///
/// Constructed once per incoming request and never mutated. Ratings are
/// guaranteed to lie in [1,5] by [`SurveyInput::validate`] (the HTTP layer
/// converts through it) or by clamping on the lenient re-read path. Contact
/// fields are captured for lead follow-up but not validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyInput {
    pub sector: String,
    pub company_size: String,
    pub strategic_goal: String,
    pub differentiator: String,
    pub bottleneck_area: String,
    pub ai_usage: String,
    pub ai_barrier: String,
    pub leadership_attitude: String,
    /// Selected time-consuming activities; order irrelevant.
    pub time_consuming_activities: Vec<String>,
    /// 1-5: how satisfied the team is with access to information.
    pub information_satisfaction: u8,
    /// 1-5: how often work has to be redone.
    pub rework_frequency: u8,
    pub main_problem: Option<String>,
    pub additional_comments: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl SurveyInput {
    /// Checks the rating invariants.
    pub fn validate(&self) -> Result<(), SurveyError> {
        check_rating("satisfacaoInformacoes", self.information_satisfaction)?;
        check_rating("frequenciaRetrabalho", self.rework_frequency)?;
        Ok(())
    }

    /// Clamps both ratings into [1,5], for inputs read on the lenient path.
    pub fn clamped(mut self) -> Self {
        self.information_satisfaction = self.information_satisfaction.clamp(RATING_MIN, RATING_MAX);
        self.rework_frequency = self.rework_frequency.clamp(RATING_MIN, RATING_MAX);
        self
    }

    /// Whether the given literal activity was selected.
    pub fn has_activity(&self, activity: &str) -> bool {
        self.time_consuming_activities.iter().any(|a| a == activity)
    }

    /// Selected activities joined for prompt embedding, or the placeholder
    /// when nothing was selected.
    pub fn activities_joined(&self) -> String {
        if self.time_consuming_activities.is_empty() {
            NONE_REPORTED.to_string()
        } else {
            self.time_consuming_activities.join(", ")
        }
    }

    /// Main problem text, or the placeholder when absent or blank.
    pub fn main_problem_text(&self) -> &str {
        non_blank(&self.main_problem).unwrap_or(NOT_INFORMED)
    }

    /// Additional comments, or the placeholder when absent or blank.
    pub fn additional_comments_text(&self) -> &str {
        non_blank(&self.additional_comments).unwrap_or(NONE_REPORTED)
    }
}

fn check_rating(field: &'static str, value: u8) -> Result<(), SurveyError> {
    if !(RATING_MIN..=RATING_MAX).contains(&value) {
        return Err(SurveyError::rating_out_of_range(field, value));
    }
    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_survey;
    use super::*;

    #[test]
    fn valid_ratings_pass_validation() {
        assert!(sample_survey().validate().is_ok());
    }

    #[test]
    fn zero_rating_fails_validation() {
        let mut survey = sample_survey();
        survey.rework_frequency = 0;

        let err = survey.validate().unwrap_err();
        assert_eq!(
            err,
            SurveyError::rating_out_of_range("frequenciaRetrabalho", 0)
        );
    }

    #[test]
    fn oversized_rating_fails_validation() {
        let mut survey = sample_survey();
        survey.information_satisfaction = 6;

        assert!(survey.validate().is_err());
    }

    #[test]
    fn clamped_pulls_ratings_into_range() {
        let mut survey = sample_survey();
        survey.information_satisfaction = 0;
        survey.rework_frequency = 9;

        let clamped = survey.clamped();
        assert_eq!(clamped.information_satisfaction, RATING_MIN);
        assert_eq!(clamped.rework_frequency, RATING_MAX);
    }

    #[test]
    fn activity_lookup_matches_literal() {
        let survey = sample_survey();
        assert!(survey.has_activity(ACTIVITY_INFO_SEARCH));
        assert!(!survey.has_activity(ACTIVITY_MANUAL_PROCESSES));
    }

    #[test]
    fn empty_activity_selection_uses_placeholder() {
        let mut survey = sample_survey();
        survey.time_consuming_activities.clear();
        assert_eq!(survey.activities_joined(), NONE_REPORTED);
    }

    #[test]
    fn absent_optional_fields_use_placeholders() {
        let mut survey = sample_survey();
        survey.main_problem = None;
        survey.additional_comments = Some("   ".to_string());

        assert_eq!(survey.main_problem_text(), NOT_INFORMED);
        assert_eq!(survey.additional_comments_text(), NONE_REPORTED);
    }
}
