//! HTTP DTOs for the diagnostic endpoint.
//!
//! These types decouple the wire format (Portuguese camelCase field names,
//! kept for compatibility with the questionnaire front end) from the domain
//! types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::diagnostic::{AnalysisResult, RecommendedTool, SurveyError, SurveyInput};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Survey answers as submitted by the questionnaire.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeSurveyRequest {
    #[serde(rename = "setor")]
    pub sector: String,
    #[serde(rename = "porteEmpresa")]
    pub company_size: String,
    #[serde(rename = "objetivoEstrategico")]
    pub strategic_goal: String,
    #[serde(rename = "diferencialCompetitivo")]
    pub differentiator: String,
    #[serde(rename = "areaGargalo")]
    pub bottleneck_area: String,
    #[serde(rename = "usoIA")]
    pub ai_usage: String,
    #[serde(rename = "barreiraIA")]
    pub ai_barrier: String,
    #[serde(rename = "atitudeLideranca")]
    pub leadership_attitude: String,
    #[serde(rename = "atividadesConsomemTempo", default)]
    pub time_consuming_activities: Vec<String>,
    #[serde(rename = "satisfacaoInformacoes")]
    pub information_satisfaction: u8,
    #[serde(rename = "frequenciaRetrabalho")]
    pub rework_frequency: u8,
    #[serde(rename = "problemaPrincipal", default)]
    pub main_problem: Option<String>,
    #[serde(rename = "comentariosAdicionais", default)]
    pub additional_comments: Option<String>,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "dataEnvio", default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl TryFrom<AnalyzeSurveyRequest> for SurveyInput {
    type Error = SurveyError;

    fn try_from(req: AnalyzeSurveyRequest) -> Result<Self, Self::Error> {
        let survey = SurveyInput {
            sector: req.sector,
            company_size: req.company_size,
            strategic_goal: req.strategic_goal,
            differentiator: req.differentiator,
            bottleneck_area: req.bottleneck_area,
            ai_usage: req.ai_usage,
            ai_barrier: req.ai_barrier,
            leadership_attitude: req.leadership_attitude,
            time_consuming_activities: req.time_consuming_activities,
            information_satisfaction: req.information_satisfaction,
            rework_frequency: req.rework_frequency,
            main_problem: req.main_problem,
            additional_comments: req.additional_comments,
            name: req.name,
            email: req.email,
            phone: req.phone,
            submitted_at: req.submitted_at,
        };
        survey.validate()?;
        Ok(survey)
    }
}

/// Lenient re-read of a rejected body: every field defaults, ratings are
/// clamped. Succeeds for any JSON object so the fallback generator can still
/// answer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LenientSurveyRequest {
    #[serde(rename = "setor")]
    pub sector: String,
    #[serde(rename = "porteEmpresa")]
    pub company_size: String,
    #[serde(rename = "objetivoEstrategico")]
    pub strategic_goal: String,
    #[serde(rename = "diferencialCompetitivo")]
    pub differentiator: String,
    #[serde(rename = "areaGargalo")]
    pub bottleneck_area: String,
    #[serde(rename = "usoIA")]
    pub ai_usage: String,
    #[serde(rename = "barreiraIA")]
    pub ai_barrier: String,
    #[serde(rename = "atitudeLideranca")]
    pub leadership_attitude: String,
    #[serde(rename = "atividadesConsomemTempo")]
    pub time_consuming_activities: Vec<String>,
    #[serde(rename = "satisfacaoInformacoes")]
    pub information_satisfaction: u8,
    #[serde(rename = "frequenciaRetrabalho")]
    pub rework_frequency: u8,
    #[serde(rename = "problemaPrincipal")]
    pub main_problem: Option<String>,
    #[serde(rename = "comentariosAdicionais")]
    pub additional_comments: Option<String>,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "dataEnvio")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl LenientSurveyRequest {
    /// Converts into a domain survey, clamping ratings into range.
    pub fn into_survey(self) -> SurveyInput {
        SurveyInput {
            sector: self.sector,
            company_size: self.company_size,
            strategic_goal: self.strategic_goal,
            differentiator: self.differentiator,
            bottleneck_area: self.bottleneck_area,
            ai_usage: self.ai_usage,
            ai_barrier: self.ai_barrier,
            leadership_attitude: self.leadership_attitude,
            time_consuming_activities: self.time_consuming_activities,
            information_satisfaction: self.information_satisfaction,
            rework_frequency: self.rework_frequency,
            main_problem: self.main_problem,
            additional_comments: self.additional_comments,
            name: self.name,
            email: self.email,
            phone: self.phone,
            submitted_at: self.submitted_at,
        }
        .clamped()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A recommended tool on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResponse {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "casoDeUso")]
    pub use_case: String,
    #[serde(rename = "categoria")]
    pub category: String,
}

impl From<RecommendedTool> for ToolResponse {
    fn from(tool: RecommendedTool) -> Self {
        Self {
            name: tool.name,
            description: tool.description,
            use_case: tool.use_case,
            category: tool.category,
        }
    }
}

/// The analysis result on the wire. Success and fallback share this shape;
/// the caller cannot tell them apart.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    #[serde(rename = "problemasIdentificados")]
    pub problems: Vec<String>,
    #[serde(rename = "ferramentasRecomendadas")]
    pub tools: Vec<ToolResponse>,
    #[serde(rename = "proximosPassos")]
    pub next_steps: Vec<String>,
    #[serde(rename = "insights")]
    pub insight: String,
}

impl From<AnalysisResult> for AnalysisResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            problems: result.problems,
            tools: result.tools.into_iter().map(ToolResponse::from).collect(),
            next_steps: result.next_steps,
            insight: result.insight,
        }
    }
}

/// Standard error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
