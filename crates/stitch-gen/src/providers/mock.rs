//! Mock provider for demos and testing
//!
//! Returns a fixed sample pattern, fenced the way models tend to answer,
//! without running anything external.

use crate::provider::{GenerateRequest, PatternProvider, ProviderStatus};
use std::collections::BTreeMap;
use stitch_core::Result;
use stitch_schema::{
    Abbreviation, Calibration, Category, Fiber, Gauge, Materials, Mode, Pattern, Section, Step,
    Weight, Worked, Yarn, BRAND,
};

/// A provider that answers every request with the sample pattern
#[derive(Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

impl PatternProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        Ok(ProviderStatus::Available)
    }

    fn generate(&self, request: &GenerateRequest) -> Result<String> {
        tracing::info!(mode = %request.mode, "mock provider answering with sample pattern");
        let body = serde_json::to_string_pretty(&sample_pattern(request.mode))?;
        Ok(format!("```json\n{}\n```", body))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn round(n: u32, label: &str, text: &str, count: u32) -> Step {
    Step {
        step: n,
        label: label.to_string(),
        text: text.to_string(),
        stitch_count: Some(count),
        action: None,
    }
}

/// The sample pattern served by the mock provider
pub fn sample_pattern(mode: Mode) -> Pattern {
    Pattern {
        brand: BRAND.to_string(),
        title: "Patrón de Muestra (Demo)".to_string(),
        category: Category::Amigurumi,
        mode,
        confidence: 100,
        assumptions: strings(&[
            "Este es un patrón simulado porque no hay proveedor configurado.",
            "Configura STITCH_GEMINI_API_KEY para resultados reales.",
        ]),
        materials: Materials {
            yarn: vec![Yarn {
                fiber: Fiber::from("cotton"),
                weight: Weight::from("DK"),
                meters_est: Some(50.0),
                colors: strings(&["Variado"]),
            }],
            hook_mm_range: [2.5, 3.5],
            hook_mm_recommended: 3.0,
            tools: strings(&["marcador", "aguja lanera", "relleno"]),
        },
        gauge: Gauge {
            target: "20 pb x 24 hileras = 10 cm".to_string(),
            stitches_per_10cm: None,
            rows_per_10cm: None,
            how_to_measure: "Muestra estándar en punto bajo".to_string(),
            adjustment_rules: strings(&["Ajustar gancho según tensión"]),
        },
        abbreviations: vec![
            Abbreviation {
                abbr: "pb".to_string(),
                meaning: "punto bajo".to_string(),
            },
            Abbreviation {
                abbr: "aum".to_string(),
                meaning: "aumento (2 pb en mismo pto)".to_string(),
            },
            Abbreviation {
                abbr: "dism".to_string(),
                meaning: "disminución (2 pb juntos)".to_string(),
            },
        ],
        parts: vec![Section {
            name: "Cuerpo Principal (Ejemplo)".to_string(),
            worked: Worked::InRounds,
            instructions: vec![
                round(1, "Vta 1", "Anillo mágico de 6 pb (6)", 6),
                round(2, "Vta 2", "Aum en cada pto (12)", 12),
                round(3, "Vta 3", "*1 pb, 1 aum* rep 6 veces (18)", 18),
                round(4, "Vta 4", "*2 pb, 1 aum* rep 6 veces (24)", 24),
                round(5, "Vta 5-8", "1 pb en cada pto (24)", 24),
                round(6, "Vta 9", "*2 pb, 1 dism* rep 6 veces (18)", 18),
                round(7, "Vta 10", "Rellenar y cerrar con aguja lanera", 0),
            ],
            notes: Some(strings(&["Este patrón es solo un ejemplo para validar el flujo."])),
        }],
        assembly: strings(&["Cerrar y esconder hebras"]),
        finishing: strings(&["Disfruta tu creación de prueba"]),
        calibration: Calibration {
            required_for_exact: false,
            inputs: vec![],
            used_values: Some(BTreeMap::new()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_json;

    #[test]
    fn test_mock_provider_health() {
        let provider = MockProvider::new();
        assert_eq!(provider.health_check().unwrap(), ProviderStatus::Available);
    }

    #[test]
    fn test_mock_output_is_fenced_and_admissible() {
        let provider = MockProvider::new();
        let request = GenerateRequest::from_payload("QUJD", Mode::Exact).unwrap();
        let text = provider.generate(&request).unwrap();

        assert!(text.starts_with("```json"));
        let pattern = stitch_schema::parse_str(&extract_json(&text)).unwrap();
        assert_eq!(pattern, sample_pattern(Mode::Exact));
    }

    #[test]
    fn test_sample_pattern_is_consistent() {
        for config in [
            stitch_check::CheckConfig::default(),
            stitch_check::CheckConfig {
                vocabulary: stitch_check::ActionVocabulary::spanish(),
                ..Default::default()
            },
        ] {
            let report =
                stitch_check::ConsistencyChecker::new(config).check(&sample_pattern(Mode::Instant));
            assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
        }
    }
}
