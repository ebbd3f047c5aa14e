//! Terminal rendering of an analysis: section cards, chart, comparison table.

pub mod chart;
pub mod comparison;
pub mod competition;
pub mod news;

use market_lens_core::{company_image, AnalysisSection, AnalyzeResponse};

use chart::{chart_dataset, render_chart, ChartBar};
use comparison::ComparisonTable;
use competition::enhance_description;

const CHART_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct SectionCard {
    pub title: String,
    pub description: String,
    pub fields: Vec<(&'static str, String)>,
    pub chart: Vec<ChartBar>,
}

impl SectionCard {
    pub fn from_section(section: &AnalysisSection) -> Self {
        let data = &section.market_data;
        Self {
            title: section.title.clone(),
            description: enhance_description(&section.description, &section.title),
            fields: vec![
                ("Target Users", data.target_users.join(", ")),
                ("Market Size", data.market_size.clone()),
                ("Entry Barriers", data.entry_barriers.join(", ")),
                ("Key Features", data.key_features.join(", ")),
            ],
            chart: chart_dataset(data),
        }
    }
}

/// Everything the terminal shows for one successful analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub company_name: String,
    pub image_url: &'static str,
    pub cards: Vec<SectionCard>,
    pub table: ComparisonTable,
    pub response: AnalyzeResponse,
}

impl AnalysisView {
    pub fn build(company_name: &str, response: AnalyzeResponse) -> Self {
        Self {
            company_name: company_name.to_string(),
            image_url: company_image(company_name),
            cards: response.analysis.iter().map(SectionCard::from_section).collect(),
            table: ComparisonTable::build(company_name, &response.competitors),
            response,
        }
    }

    pub fn render(&self) -> String {
        let mut out = vec![
            format!("=== Market analysis: {} ===", self.company_name),
            format!("Image: {}", self.image_url),
        ];

        for card in &self.cards {
            out.push(String::new());
            out.push(format!("## {}", card.title));
            if !card.description.is_empty() {
                out.push(card.description.clone());
            }
            for (label, value) in &card.fields {
                if !value.is_empty() {
                    out.push(format!("  {label}: {value}"));
                }
            }
            out.push("  Market strength:".to_string());
            out.push(render_chart(&card.chart, CHART_WIDTH));
        }

        out.push(String::new());
        out.push("## Competitive Landscape Comparison".to_string());
        out.push(self.table.render());
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_lens_core::{Competitor, MarketData};

    fn response() -> AnalyzeResponse {
        AnalyzeResponse {
            analysis: vec![AnalysisSection {
                title: "Market Overview".to_string(),
                description: "EV leader.".to_string(),
                market_data: MarketData {
                    target_users: vec!["Commuters".to_string(), "Fleets".to_string()],
                    market_size: "$500B".to_string(),
                    entry_barriers: vec![],
                    key_features: vec!["Range".to_string()],
                },
            }],
            competitors: vec![Competitor {
                name: "BYD".to_string(),
                market_share: "17%".to_string(),
                strengths: vec!["Batteries".to_string()],
                weaknesses: vec![],
                primary_markets: vec!["China".to_string()],
                year_founded: None,
            }],
        }
    }

    #[test]
    fn test_view_uses_curated_image() {
        let view = AnalysisView::build("Tesla", response());
        assert_ne!(view.image_url, market_lens_core::company_images::FALLBACK_IMAGE);
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].fields[0].1, "Commuters, Fleets");
    }

    #[test]
    fn test_render_contains_cards_and_table() {
        let text = AnalysisView::build("Tesla", response()).render();
        assert!(text.contains("## Market Overview"));
        assert!(text.contains("Target Users: Commuters, Fleets"));
        assert!(!text.contains("Entry Barriers:"));
        assert!(text.contains("- BYD"));
        assert!(text.contains("Market Size"));
    }

    #[test]
    fn test_card_description_mentions_rivals() {
        let mut resp = response();
        resp.analysis[0].description = "Tesla sells electric vehicles worldwide.".to_string();
        let view = AnalysisView::build("Tesla", resp);
        assert!(view.cards[0]
            .description
            .ends_with("major competitors like Volkswagen Group, BYD, Ford, Rivian."));
        // The raw response keeps the model's wording
        assert_eq!(
            view.response.analysis[0].description,
            "Tesla sells electric vehicles worldwide."
        );
    }
}
