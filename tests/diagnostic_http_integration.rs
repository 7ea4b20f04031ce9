//! Integration tests for the diagnostic HTTP endpoint.
//!
//! Exercises the full request path - DTO deserialization, the analysis
//! handler with a mocked provider, fallback branches, and the error
//! envelope - through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use diagnostico_ai::adapters::ai::{MockAiProvider, MockFailure};
use diagnostico_ai::adapters::http::diagnostic::MISSING_CREDENTIAL_MESSAGE;
use diagnostico_ai::adapters::http::{diagnostic_routes, DiagnosticHandlers};
use diagnostico_ai::application::AnalyzeSurveyHandler;

// =============================================================================
// Test infrastructure
// =============================================================================

fn app_with(provider: MockAiProvider) -> Router {
    let analyze = AnalyzeSurveyHandler::new(Arc::new(provider));
    app_with_handlers(DiagnosticHandlers::new(Arc::new(analyze)))
}

fn app_with_handlers(handlers: DiagnosticHandlers) -> Router {
    Router::new().nest("/api/diagnostico", diagnostic_routes(handlers))
}

async fn post_analysis(app: Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/diagnostico")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn survey_body() -> Value {
    json!({
        "setor": "Varejo",
        "porteEmpresa": "11-50 funcionários",
        "objetivoEstrategico": "Reduzir custos operacionais",
        "diferencialCompetitivo": "Atendimento personalizado",
        "areaGargalo": "Operações",
        "usoIA": "Não utilizamos",
        "barreiraIA": "Falta de conhecimento técnico",
        "atitudeLideranca": "Curiosa, mas cautelosa",
        "atividadesConsomemTempo": ["Elaboração de relatórios"],
        "satisfacaoInformacoes": 3,
        "frequenciaRetrabalho": 2,
        "problemaPrincipal": "Pedidos se perdem entre planilhas",
        "nome": "Maria Souza",
        "email": "maria@exemplo.com.br",
        "telefone": "+55 11 91234-5678",
        "dataEnvio": "2024-05-10T14:30:00Z"
    })
}

fn model_answer() -> String {
    json!({
        "problemasIdentificados": ["Retrabalho constante", "Dados dispersos", "Falta de automação"],
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

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn successful_analysis_returns_model_result() {
    let provider = MockAiProvider::new().with_generation(model_answer());
    let mock = provider.clone();

    let (status, body) = post_analysis(app_with(provider), survey_body().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["problemasIdentificados"][0], "Retrabalho constante");
    assert_eq!(body["ferramentasRecomendadas"][0]["nome"], "Zapier");
    assert_eq!(body["proximosPassos"][1], "Rodar piloto");
    assert_eq!(body["insights"], "A operação perde horas com tarefas integráveis.");
    assert_eq!(mock.generation_call_count(), 1);
}

#[tokio::test]
async fn permission_failure_degrades_to_fallback_without_retries() {
    let provider = MockAiProvider::new().with_generation_error(MockFailure::PermissionDenied);
    let mock = provider.clone();

    let (status, body) = post_analysis(app_with(provider), survey_body().to_string()).await;

    // Caller cannot tell the fallback apart from a real analysis.
    assert_eq!(status, StatusCode::OK);
    assert!(!body["problemasIdentificados"].as_array().unwrap().is_empty());
    assert_eq!(body["ferramentasRecomendadas"].as_array().unwrap().len(), 3);
    assert_eq!(body["proximosPassos"].as_array().unwrap().len(), 4);
    assert!(!body["insights"].as_str().unwrap().is_empty());
    assert_eq!(mock.generation_call_count(), 1);
}

#[tokio::test]
async fn model_not_found_advances_to_next_candidate() {
    let provider = MockAiProvider::new()
        .with_generation_error(MockFailure::ModelNotFound)
        .with_generation(model_answer());
    let mock = provider.clone();

    let (status, body) = post_analysis(app_with(provider), survey_body().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["problemasIdentificados"][0], "Retrabalho constante");
    assert_eq!(mock.generation_call_count(), 2);
}

#[tokio::test]
async fn fallback_rules_fire_in_order_at_the_http_level() {
    let provider = MockAiProvider::new().with_generation_error(MockFailure::Unavailable);

    let mut body = survey_body();
    body["frequenciaRetrabalho"] = json!(5);
    body["satisfacaoInformacoes"] = json!(1);
    body["atividadesConsomemTempo"] = json!(["Busca de informações/documentos"]);

    let (status, response) = post_analysis(app_with(provider), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let problems = response["problemasIdentificados"].as_array().unwrap();
    assert_eq!(problems.len(), 3);
    assert!(problems[0].as_str().unwrap().contains("retrabalho"));
    assert!(problems[1].as_str().unwrap().contains("informações"));
    assert!(problems[2].as_str().unwrap().contains("busca de informações"));
}

#[tokio::test]
async fn missing_credential_answers_configuration_error() {
    let app = app_with_handlers(DiagnosticHandlers::unconfigured());

    let (status, body) = post_analysis(app, survey_body().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], MISSING_CREDENTIAL_MESSAGE);
}

#[tokio::test]
async fn partial_body_is_answered_with_fallback_without_calling_the_model() {
    let provider = MockAiProvider::new().with_generation(model_answer());
    let mock = provider.clone();

    let (status, body) = post_analysis(app_with(provider), "{}".to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["problemasIdentificados"].as_array().unwrap().is_empty());
    assert_eq!(mock.generation_call_count(), 0);
}

#[tokio::test]
async fn non_json_body_surfaces_generic_error() {
    let provider = MockAiProvider::new();
    let mock = provider.clone();

    let (status, body) =
        post_analysis(app_with(provider), "isto não é json".to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Falha ao processar"));
    assert_eq!(mock.generation_call_count(), 0);
}

#[tokio::test]
async fn out_of_range_rating_still_gets_an_analysis() {
    let provider = MockAiProvider::new().with_generation(model_answer());
    let mock = provider.clone();

    let mut body = survey_body();
    body["frequenciaRetrabalho"] = json!(9);

    let (status, response) = post_analysis(app_with(provider), body.to_string()).await;

    // The strict read rejects the rating; the lenient path clamps it and
    // answers with the rule-based analysis instead of calling the model.
    assert_eq!(status, StatusCode::OK);
    assert!(!response["problemasIdentificados"].as_array().unwrap().is_empty());
    assert_eq!(mock.generation_call_count(), 0);
}
