//! Rule-based fallback analysis.
//!
//! Pure function of the survey answers. Used whenever the external model
//! path cannot produce a valid result, so it must never fail and never
//! return an empty problem list.

use once_cell::sync::Lazy;

use super::analysis::{AnalysisResult, RecommendedTool};
use super::survey::{SurveyInput, ACTIVITY_INFO_SEARCH, ACTIVITY_MANUAL_PROCESSES};

/// Problem appended when the rework rating is 4 or 5.
pub const PROBLEM_HIGH_REWORK: &str =
    "Alta frequência de retrabalho, indicando processos mal padronizados";
/// Problem appended when information satisfaction is 1 or 2.
pub const PROBLEM_INFORMATION_ACCESS: &str =
    "Dificuldade de acesso rápido às informações necessárias para o trabalho";
/// Problem appended when document search was selected as a time sink.
pub const PROBLEM_INFO_SEARCH_TIME: &str =
    "Tempo excessivo gasto em busca de informações e documentos";
/// Problem appended when repetitive manual processes were selected.
pub const PROBLEM_MANUAL_PROCESSES: &str =
    "Processos manuais repetitivos que poderiam ser automatizados";
/// Problem used when no specific rule fired; the list is never empty.
pub const PROBLEM_GENERIC_OPTIMIZATION: &str =
    "Oportunidades de otimização de processos identificadas nas respostas";

/// Rework rating at or above which the rework rule fires.
const HIGH_REWORK_THRESHOLD: u8 = 4;
/// Information-satisfaction rating at or below which the access rule fires.
const LOW_SATISFACTION_THRESHOLD: u8 = 2;

/// Fixed tool catalog used by the fallback analysis, independent of input.
static FALLBACK_TOOLS: Lazy<Vec<RecommendedTool>> = Lazy::new(|| {
    vec![
        RecommendedTool::new(
            "Zapier",
            "Plataforma de automação que conecta aplicativos do dia a dia sem código",
            "Automatizar tarefas repetitivas como transferência de dados entre planilhas, e-mails e CRM",
            "Automação",
        ),
        RecommendedTool::new(
            "Notion AI",
            "Espaço de trabalho com assistente de IA para organizar e resumir o conhecimento da empresa",
            "Centralizar documentos e encontrar informações rapidamente com busca assistida por IA",
            "Gestão do Conhecimento",
        ),
        RecommendedTool::new(
            "ChatGPT",
            "Assistente de IA generativa para redação, análise e apoio à decisão",
            "Acelerar elaboração de relatórios, e-mails e respostas a clientes",
            "Produtividade",
        ),
    ]
});

/// Fixed next-step list used by the fallback analysis.
static FALLBACK_NEXT_STEPS: Lazy<Vec<String>> = Lazy::new(|| {
    vec![
        "Mapear os processos que mais consomem tempo da equipe".to_string(),
        "Escolher um piloto de automação de baixo risco e alto impacto".to_string(),
        "Capacitar a equipe nas ferramentas selecionadas".to_string(),
        "Medir os resultados do piloto e expandir gradualmente".to_string(),
    ]
});

/// Generates the deterministic rule-based analysis.
///
/// Rules run in a fixed order so the resulting problem list is stable for a
/// given survey. Tools and next steps come from the static catalog.
pub fn generate_fallback_analysis(survey: &SurveyInput) -> AnalysisResult {
    let mut problems = Vec::new();

    if survey.rework_frequency >= HIGH_REWORK_THRESHOLD {
        problems.push(PROBLEM_HIGH_REWORK.to_string());
    }
    if survey.information_satisfaction <= LOW_SATISFACTION_THRESHOLD {
        problems.push(PROBLEM_INFORMATION_ACCESS.to_string());
    }
    if survey.has_activity(ACTIVITY_INFO_SEARCH) {
        problems.push(PROBLEM_INFO_SEARCH_TIME.to_string());
    }
    if survey.has_activity(ACTIVITY_MANUAL_PROCESSES) {
        problems.push(PROBLEM_MANUAL_PROCESSES.to_string());
    }
    if problems.is_empty() {
        problems.push(PROBLEM_GENERIC_OPTIMIZATION.to_string());
    }

    AnalysisResult {
        problems,
        tools: FALLBACK_TOOLS.clone(),
        next_steps: FALLBACK_NEXT_STEPS.clone(),
        insight: fallback_insight(survey),
    }
}

/// Insight text interpolating the stated bottleneck area.
///
/// Also used by the validator to repair a model response whose `insights`
/// field is missing or empty.
pub fn fallback_insight(survey: &SurveyInput) -> String {
    format!(
        "Com base nas suas respostas, a área de {} concentra o maior potencial \
         de ganho com IA. Começar por automações simples nessa frente tende a \
         liberar horas da equipe já nas primeiras semanas.",
        survey.bottleneck_area.to_lowercase()
    )
}
