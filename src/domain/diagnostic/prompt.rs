//! Prompt construction for the diagnostic analysis call.

use super::survey::SurveyInput;

/// Builds the analysis prompt sent to the generative model.
///
/// Deterministic: every survey field is embedded verbatim, multi-select
/// answers are joined with ", ", and absent optional fields appear as their
/// placeholders. The model is instructed to answer with the exact JSON shape
/// the validator expects and nothing else.
pub fn build_analysis_prompt(survey: &SurveyInput) -> String {
    format!(
        r#"Você é um consultor especializado em adoção de IA por pequenas e médias empresas.
Analise as respostas do diagnóstico abaixo e produza recomendações práticas.

Dados da empresa:
- Setor: {sector}
- Porte: {company_size}
- Objetivo estratégico: {strategic_goal}
- Diferencial competitivo: {differentiator}
- Área com maior gargalo: {bottleneck_area}
- Uso atual de IA: {ai_usage}
- Principal barreira para IA: {ai_barrier}
- Atitude da liderança: {leadership_attitude}
- Atividades que mais consomem tempo: {activities}
- Satisfação com acesso a informações (1-5): {information_satisfaction}
- Frequência de retrabalho (1-5): {rework_frequency}
- Principal problema relatado: {main_problem}
- Comentários adicionais: {additional_comments}

Responda SOMENTE com um objeto JSON válido, exatamente neste formato:
{{
  "problemasIdentificados": ["problema 1", "problema 2", "problema 3"],
  "ferramentasRecomendadas": [
    {{
      "nome": "nome da ferramenta",
      "descricao": "o que a ferramenta faz",
      "casoDeUso": "como aplicar nesta empresa",
      "categoria": "categoria da ferramenta"
    }}
  ],
  "proximosPassos": ["passo 1", "passo 2", "passo 3", "passo 4"],
  "insights": "um parágrafo com o insight mais importante para esta empresa"
}}

Liste de 3 a 5 problemas e exatamente 3 ferramentas.
Não use markdown, não use blocos de código e não adicione texto fora do JSON."#,
        sector = survey.sector,
        company_size = survey.company_size,
        strategic_goal = survey.strategic_goal,
        differentiator = survey.differentiator,
        bottleneck_area = survey.bottleneck_area,
        ai_usage = survey.ai_usage,
        ai_barrier = survey.ai_barrier,
        leadership_attitude = survey.leadership_attitude,
        activities = survey.activities_joined(),
        information_satisfaction = survey.information_satisfaction,
        rework_frequency = survey.rework_frequency,
        main_problem = survey.main_problem_text(),
        additional_comments = survey.additional_comments_text(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostic::survey::test_support::sample_survey;
    use crate::domain::diagnostic::survey::{NONE_REPORTED, NOT_INFORMED};

    #[test]
    fn prompt_embeds_every_field() {
        let survey = sample_survey();
        let prompt = build_analysis_prompt(&survey);

        assert!(prompt.contains(&survey.sector));
        assert!(prompt.contains(&survey.company_size));
        assert!(prompt.contains(&survey.strategic_goal));
        assert!(prompt.contains(&survey.differentiator));
        assert!(prompt.contains(&survey.bottleneck_area));
        assert!(prompt.contains(&survey.ai_usage));
        assert!(prompt.contains(&survey.ai_barrier));
        assert!(prompt.contains(&survey.leadership_attitude));
        assert!(prompt.contains("Elaboração de relatórios, Busca de informações/documentos"));
        assert!(prompt.contains("Pedidos se perdem"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let survey = sample_survey();
        assert_eq!(build_analysis_prompt(&survey), build_analysis_prompt(&survey));
    }

    #[test]
    fn absent_optionals_become_placeholders() {
        let mut survey = sample_survey();
        survey.main_problem = None;
        survey.additional_comments = None;

        let prompt = build_analysis_prompt(&survey);
        assert!(prompt.contains(&format!("Principal problema relatado: {}", NOT_INFORMED)));
        assert!(prompt.contains(&format!("Comentários adicionais: {}", NONE_REPORTED)));
    }

    #[test]
    fn prompt_names_the_expected_json_fields() {
        let prompt = build_analysis_prompt(&sample_survey());
        assert!(prompt.contains("problemasIdentificados"));
        assert!(prompt.contains("ferramentasRecomendadas"));
        assert!(prompt.contains("proximosPassos"));
        assert!(prompt.contains("insights"));
    }
}
