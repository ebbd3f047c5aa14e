use market_lens_core::Competitor;

pub const NO_COMPETITORS: &str =
    "No direct competitors identified for this company in the current analysis.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub name: String,
    pub founded: Option<String>,
    pub market_share: String,
    pub strengths: String,
    pub weaknesses: String,
    pub primary_markets: String,
    pub is_target: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonTable {
    Rows(Vec<ComparisonRow>),
    Empty,
}

impl ComparisonTable {
    /// Target company row first, then one row per competitor.
    pub fn build(company_name: &str, competitors: &[Competitor]) -> Self {
        if competitors.is_empty() {
            return ComparisonTable::Empty;
        }

        let mut rows = Vec::with_capacity(competitors.len() + 1);
        rows.push(ComparisonRow {
            name: company_name.to_string(),
            founded: None,
            market_share: "Market Leader".to_string(),
            strengths: list_or(&[], "Information not available"),
            weaknesses: list_or(&[], "Information not available"),
            primary_markets: list_or(&[], "Global"),
            is_target: true,
        });
        rows.extend(competitors.iter().map(ComparisonRow::from_competitor));
        ComparisonTable::Rows(rows)
    }

    pub fn render(&self) -> String {
        let rows = match self {
            ComparisonTable::Empty => return format!("  {NO_COMPETITORS}"),
            ComparisonTable::Rows(rows) => rows,
        };

        let mut out = Vec::new();
        for row in rows {
            let marker = if row.is_target { "*" } else { "-" };
            match &row.founded {
                Some(founded) => out.push(format!("  {marker} {} ({founded})", row.name)),
                None => out.push(format!("  {marker} {}", row.name)),
            }
            out.push(format!("      Market share:    {}", row.market_share));
            out.push(format!("      Strengths:       {}", row.strengths));
            out.push(format!("      Weaknesses:      {}", row.weaknesses));
            out.push(format!("      Primary markets: {}", row.primary_markets));
        }
        out.join("\n")
    }
}

impl ComparisonRow {
    fn from_competitor(c: &Competitor) -> Self {
        let market_share = match c.market_share.trim() {
            "" => "Varies".to_string(),
            share => share.to_string(),
        };
        Self {
            name: c.name.clone(),
            founded: c
                .year_founded
                .as_deref()
                .map(str::trim)
                .filter(|y| !y.is_empty())
                .map(|y| format!("Founded {y}")),
            market_share,
            strengths: list_or(&c.strengths, "Information not available"),
            weaknesses: list_or(&c.weaknesses, "Information not available"),
            primary_markets: list_or(&c.primary_markets, "Global"),
            is_target: false,
        }
    }
}

fn list_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competitor(name: &str) -> Competitor {
        Competitor {
            name: name.to_string(),
            market_share: String::new(),
            strengths: vec![],
            weaknesses: vec!["Price".to_string(), "Range".to_string()],
            primary_markets: vec![],
            year_founded: Some("2003".to_string()),
        }
    }

    #[test]
    fn test_target_row_first_with_fallback_cells() {
        let ComparisonTable::Rows(rows) = ComparisonTable::build("Tesla", &[competitor("BYD")]) else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_target);
        assert_eq!(rows[0].name, "Tesla");

        let byd = &rows[1];
        assert_eq!(byd.market_share, "Varies");
        assert_eq!(byd.strengths, "Information not available");
        assert_eq!(byd.weaknesses, "Price, Range");
        assert_eq!(byd.primary_markets, "Global");
        assert_eq!(byd.founded.as_deref(), Some("Founded 2003"));
    }

    #[test]
    fn test_empty_list_renders_panel() {
        let table = ComparisonTable::build("Acme", &[]);
        assert_eq!(table, ComparisonTable::Empty);
        assert!(table.render().contains("No direct competitors identified"));
    }

    #[test]
    fn test_render_lists_every_row() {
        let table = ComparisonTable::build("Tesla", &[competitor("BYD"), competitor("Rivian")]);
        let text = table.render();
        assert!(text.contains("* Tesla"));
        assert!(text.contains("- BYD (Founded 2003)"));
        assert!(text.contains("- Rivian"));
    }
}
