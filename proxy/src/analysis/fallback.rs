use market_lens_core::{AnalysisSection, AnalyzeResponse, MarketData};

use super::rules::default_competitors;

/// Canned single-section analysis served when the model is unavailable or its
/// output cannot be used.
pub fn fallback_analysis(company_name: &str) -> Vec<AnalysisSection> {
    vec![AnalysisSection {
        title: "Market Overview".to_string(),
        description: format!(
            "A detailed AI analysis for {company_name} is temporarily unavailable. \
            This overview summarizes the factors that shape most competitive markets."
        ),
        market_data: MarketData {
            target_users: vec![
                "Existing customers".to_string(),
                "Adjacent market segments".to_string(),
                "Enterprise buyers".to_string(),
            ],
            market_size: "Estimate unavailable".to_string(),
            entry_barriers: vec![
                "Brand recognition".to_string(),
                "Capital requirements".to_string(),
            ],
            key_features: vec![
                "Product quality".to_string(),
                "Pricing".to_string(),
                "Customer support".to_string(),
            ],
        },
    }]
}

pub fn fallback_response(company_name: &str) -> AnalyzeResponse {
    AnalyzeResponse {
        analysis: fallback_analysis(company_name),
        competitors: default_competitors(company_name),
    }
}
