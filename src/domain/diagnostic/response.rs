//! Parsing and validation of the model's textual response.
//!
//! Generative models rarely honor "JSON only" perfectly, so extraction runs
//! four strategies in order - direct parse, fenced-block interior, fence
//! stripping with an outer brace slice, and a balanced-brace scan - and the
//! first candidate that parses AND validates wins. When nothing survives,
//! the rule-based fallback takes over; raw model prose is never surfaced to
//! the caller.

use serde_json::Value;
use thiserror::Error;

use super::analysis::{AnalysisResult, RecommendedTool};
use super::fallback::{fallback_insight, generate_fallback_analysis};
use super::survey::SurveyInput;

/// Wire field holding the problem list.
pub const FIELD_PROBLEMS: &str = "problemasIdentificados";
/// Wire field holding the tool list.
pub const FIELD_TOOLS: &str = "ferramentasRecomendadas";
/// Wire field holding the next-step list.
pub const FIELD_NEXT_STEPS: &str = "proximosPassos";
/// Wire field holding the insight text.
pub const FIELD_INSIGHT: &str = "insights";

/// Structural failures that invalidate a parsed response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("required field '{field}' is missing or not a sequence")]
    MissingSequence { field: &'static str },
}

/// Parses the raw model output into a validated [`AnalysisResult`].
///
/// Never fails: every unparseable or structurally invalid response resolves
/// to the deterministic fallback for the given survey.
pub fn parse_analysis(raw: &str, survey: &SurveyInput) -> AnalysisResult {
    for candidate in extraction_candidates(raw) {
        if let Ok(value) = serde_json::from_str::<Value>(&candidate) {
            if let Ok(result) = validate_analysis(&value, survey) {
                return result;
            }
        }
    }
    generate_fallback_analysis(survey)
}

/// Validates a parsed JSON value against the expected shape.
///
/// The three list fields are hard requirements. `insights` is soft: a
/// missing, non-string, or blank value is replaced with the fallback insight
/// rather than discarding otherwise-valid structured data.
pub fn validate_analysis(
    value: &Value,
    survey: &SurveyInput,
) -> Result<AnalysisResult, StructureError> {
    let object = value.as_object().ok_or(StructureError::NotAnObject)?;

    let problems = required_string_sequence(object, FIELD_PROBLEMS)?;
    let tools = object
        .get(FIELD_TOOLS)
        .and_then(Value::as_array)
        .ok_or(StructureError::MissingSequence { field: FIELD_TOOLS })?
        .iter()
        .map(tool_from_value)
        .collect();
    let next_steps = required_string_sequence(object, FIELD_NEXT_STEPS)?;

    let insight = match object.get(FIELD_INSIGHT).and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => fallback_insight(survey),
    };

    Ok(AnalysisResult {
        problems,
        tools,
        next_steps,
        insight,
    })
}

fn required_string_sequence(
    object: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, StructureError> {
    let items = object
        .get(field)
        .and_then(Value::as_array)
        .ok_or(StructureError::MissingSequence { field })?;

    Ok(items
        .iter()
        .filter_map(|item| item.as_str().map(String::from))
        .collect())
}

fn tool_from_value(value: &Value) -> RecommendedTool {
    // Individual sub-fields are trusted loosely; only the list shape is hard.
    RecommendedTool::new(
        value["nome"].as_str().unwrap_or(""),
        value["descricao"].as_str().unwrap_or(""),
        value["casoDeUso"].as_str().unwrap_or(""),
        value["categoria"].as_str().unwrap_or(""),
    )
}

/// Candidate JSON substrings, in strategy order.
fn extraction_candidates(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let mut candidates = vec![trimmed.to_string()];

    if let Some(block) = fenced_block(trimmed) {
        candidates.push(block);
    }

    let stripped = strip_fences(trimmed);
    if let Some(slice) = outer_brace_slice(&stripped) {
        candidates.push(slice);
    }
    if let Some(object) = first_balanced_object(&stripped) {
        candidates.push(object);
    }

    candidates
}

/// Interior of the first code fence, tolerating a `json` language tag.
fn fenced_block(text: &str) -> Option<String> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    let after = after.strip_prefix("json").unwrap_or(after);
    let end = after.find("```")?;
    Some(after[..end].trim().to_string())
}

fn strip_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "")
}

/// Substring from the first `{` to the last `}`, inclusive.
fn outer_brace_slice(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| text[start..=end].to_string())
}

/// First complete brace-balanced object, ignoring braces inside strings.
fn first_balanced_object(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..=start + offset].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostic::survey::test_support::sample_survey;
    use serde_json::json;

    fn well_formed_body() -> String {
        json!({
            "problemasIdentificados": ["Retrabalho constante", "Dados dispersos"],
            "ferramentasRecomendadas": [{
                "nome": "Zapier",
                "descricao": "Automação sem código",
                "casoDeUso": "Integrar planilhas ao CRM",
                "categoria": "Automação"
            }],
            "proximosPassos": ["Mapear processos", "Rodar piloto"],
            "insights": "A operação perde horas com tarefas integráveis."
        })
        .to_string()
    }

    #[test]
    fn direct_parse_succeeds() {
        let survey = sample_survey();
        let result = parse_analysis(&well_formed_body(), &survey);

        assert_eq!(
            result.problems,
            vec!["Retrabalho constante", "Dados dispersos"]
        );
        assert_eq!(result.tools.len(), 1);
        assert_eq!(result.tools[0].name, "Zapier");
        assert_eq!(result.next_steps, vec!["Mapear processos", "Rodar piloto"]);
        assert_eq!(
            result.insight,
            "A operação perde horas com tarefas integráveis."
        );
    }

    #[test]
    fn fenced_json_block_is_extracted() {
        let survey = sample_survey();
        let raw = format!("Aqui está a análise:\n```json\n{}\n```\nEspero que ajude!", well_formed_body());

        let result = parse_analysis(&raw, &survey);
        assert_eq!(result.problems[0], "Retrabalho constante");
    }

    #[test]
    fn untagged_fence_is_extracted() {
        let survey = sample_survey();
        let raw = format!("```\n{}\n```", well_formed_body());

        let result = parse_analysis(&raw, &survey);
        assert_eq!(result.tools[0].category, "Automação");
    }

    #[test]
    fn prose_around_object_is_sliced_away() {
        let survey = sample_survey();
        let raw = format!("Claro! Segue o resultado. {} Qualquer dúvida, avise.", well_formed_body());

        let result = parse_analysis(&raw, &survey);
        assert_eq!(result.next_steps.len(), 2);
    }

    #[test]
    fn balanced_scan_rescues_trailing_brace_noise() {
        let survey = sample_survey();
        // Outer slice captures the stray brace and fails; the balanced scan
        // stops at the first complete object.
        let raw = format!("{} }}", well_formed_body());

        let result = parse_analysis(&raw, &survey);
        assert_eq!(result.problems[0], "Retrabalho constante");
    }

    #[test]
    fn non_json_text_falls_back() {
        let survey = sample_survey();
        let result = parse_analysis("Desculpe, não consigo responder isso.", &survey);

        assert_eq!(result, generate_fallback_analysis(&survey));
    }

    #[test]
    fn missing_problem_list_is_hard_failure() {
        let survey = sample_survey();
        let raw = json!({
            "ferramentasRecomendadas": [],
            "proximosPassos": [],
            "insights": "ok"
        })
        .to_string();

        let result = parse_analysis(&raw, &survey);
        assert_eq!(result, generate_fallback_analysis(&survey));
    }

    #[test]
    fn null_sequence_is_hard_failure() {
        let survey = sample_survey();
        let value = json!({
            "problemasIdentificados": null,
            "ferramentasRecomendadas": [],
            "proximosPassos": [],
        });

        let err = validate_analysis(&value, &survey).unwrap_err();
        assert_eq!(
            err,
            StructureError::MissingSequence { field: FIELD_PROBLEMS }
        );
    }

    #[test]
    fn wrong_typed_sequence_is_hard_failure() {
        let survey = sample_survey();
        let value = json!({
            "problemasIdentificados": [],
            "ferramentasRecomendadas": "nenhuma",
            "proximosPassos": [],
        });

        assert_eq!(
            validate_analysis(&value, &survey).unwrap_err(),
            StructureError::MissingSequence { field: FIELD_TOOLS }
        );
    }

    #[test]
    fn missing_insight_is_repaired_not_rejected() {
        let survey = sample_survey();
        let value = json!({
            "problemasIdentificados": ["Dados dispersos"],
            "ferramentasRecomendadas": [],
            "proximosPassos": ["Rodar piloto"],
        });

        let result = validate_analysis(&value, &survey).unwrap();
        assert_eq!(result.problems, vec!["Dados dispersos"]);
        assert_eq!(result.insight, fallback_insight(&survey));
    }

    #[test]
    fn blank_insight_is_repaired() {
        let survey = sample_survey();
        let value = json!({
            "problemasIdentificados": [],
            "ferramentasRecomendadas": [],
            "proximosPassos": [],
            "insights": "   "
        });

        let result = validate_analysis(&value, &survey).unwrap();
        assert_eq!(result.insight, fallback_insight(&survey));
    }

    #[test]
    fn tool_subfields_default_when_absent() {
        let survey = sample_survey();
        let value = json!({
            "problemasIdentificados": [],
            "ferramentasRecomendadas": [{"nome": "Notion AI"}],
            "proximosPassos": [],
            "insights": "ok"
        });

        let result = validate_analysis(&value, &survey).unwrap();
        assert_eq!(result.tools[0].name, "Notion AI");
        assert_eq!(result.tools[0].description, "");
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_the_scan() {
        let text = r#"prefixo {"a": "tem } chave", "b": 1} sufixo"#;
        let object = first_balanced_object(text).unwrap();
        assert_eq!(object, r#"{"a": "tem } chave", "b": 1}"#);
    }
}
