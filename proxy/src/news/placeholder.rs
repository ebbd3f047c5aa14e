use chrono::{DateTime, SecondsFormat, Utc};
use market_lens_core::NewsArticle;

const GENERIC_SUBJECT: &str = "the market";
const SEARCH_BASE: &str = "https://news.google.com/search";

fn search_url(terms: &str) -> String {
    reqwest::Url::parse_with_params(SEARCH_BASE, &[("q", terms)])
        .map(|url| url.to_string())
        .unwrap_or_else(|_| SEARCH_BASE.to_string())
}

/// Stand-in headlines served when the news upstream cannot be used.
pub fn placeholder_articles(company_name: &str, now: DateTime<Utc>) -> Vec<NewsArticle> {
    let subject = match company_name.trim() {
        "" => GENERIC_SUBJECT,
        name => name,
    };
    let date = now.to_rfc3339_opts(SecondsFormat::Secs, true);

    vec![
        NewsArticle {
            title: format!("Latest developments around {subject}"),
            description: format!(
                "Live headlines for {subject} are unavailable right now. Check back later for recent coverage."
            ),
            url: search_url(subject),
            source: "Market Lens".to_string(),
            published_date: date.clone(),
        },
        NewsArticle {
            title: format!("Industry trends shaping {subject}"),
            description: format!(
                "Follow analyst commentary and market reports to track how {subject} is positioned against competitors."
            ),
            url: search_url(&format!("{subject} industry")),
            source: "Market Lens".to_string(),
            published_date: date,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_reference_company() {
        let articles = placeholder_articles("Tesla", Utc::now());
        assert_eq!(articles.len(), 2);
        assert!(articles.iter().all(|a| a.title.contains("Tesla")));
        assert!(articles[0].url.ends_with("q=Tesla"));
    }

    #[test]
    fn test_blank_name_uses_generic_subject() {
        let articles = placeholder_articles("  ", Utc::now());
        assert!(articles[0].title.contains("the market"));
    }

    #[test]
    fn test_placeholders_are_deterministic() {
        let now = Utc::now();
        let a = placeholder_articles("Coca Cola", now);
        let b = placeholder_articles("Coca Cola", now);
        assert_eq!(a, b);
        assert!(a[1].url.contains("Coca+Cola"));
    }

    #[test]
    fn test_query_is_percent_encoded() {
        let articles = placeholder_articles("AT&T", Utc::now());
        assert_eq!(articles[0].url, "https://news.google.com/search?q=AT%26T");
        assert_eq!(
            articles[1].url,
            "https://news.google.com/search?q=AT%26T+industry"
        );
    }
}
