use market_lens_core::NewsArticle;

pub const NO_NEWS: &str = "There are no relevant news articles at the moment.";

/// "source • date" card per article, or the empty-state line.
pub fn render_news(articles: &[NewsArticle]) -> String {
    if articles.is_empty() {
        return format!("  {NO_NEWS}");
    }

    articles
        .iter()
        .map(|a| {
            let mut card = format!(
                "  {}\n    {} • {}",
                a.title,
                a.source,
                display_date(&a.published_date)
            );
            if !a.description.is_empty() {
                card.push_str(&format!("\n    {}", a.description));
            }
            if !a.url.is_empty() {
                card.push_str(&format!("\n    {}", a.url));
            }
            card
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// ISO-8601 timestamps shown as a calendar date; anything else verbatim.
fn display_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state() {
        assert!(render_news(&[]).contains(NO_NEWS));
    }

    #[test]
    fn test_card_shows_source_and_date() {
        let article = NewsArticle {
            title: "Tesla opens plant".to_string(),
            description: String::new(),
            url: "https://example.com".to_string(),
            source: "Reuters".to_string(),
            published_date: "2024-05-01T10:00:00Z".to_string(),
        };
        let text = render_news(&[article]);
        assert!(text.contains("Reuters • May 1, 2024"));
        assert!(text.contains("https://example.com"));
    }

    #[test]
    fn test_unparseable_date_kept_verbatim() {
        assert_eq!(display_date("yesterday"), "yesterday");
    }
}
