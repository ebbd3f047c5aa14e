use serde::{Deserialize, Serialize};

/// Quantitative block attached to every analysis section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    #[serde(default)]
    pub target_users: Vec<String>,
    #[serde(default)]
    pub market_size: String,
    #[serde(default)]
    pub entry_barriers: Vec<String>,
    #[serde(default)]
    pub key_features: Vec<String>,
}

/// One card of the market analysis (overview, competition, opportunity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSection {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub market_data: MarketData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    #[serde(default)]
    pub market_share: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub primary_markets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_founded: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    /// ISO-8601 timestamp as reported by the upstream provider.
    pub published_date: String,
}

/// Body of `POST /analyze-market`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub company_name: String,
}

/// Body of `POST /fetch-news`.
///
/// `company_name` is optional so a missing field reaches the handler instead of
/// being rejected by the extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsRequest {
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: Vec<AnalysisSection>,
    #[serde(default)]
    pub competitors: Vec<Competitor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub articles: Vec<NewsArticle>,
    #[serde(default)]
    pub limit_exceeded: bool,
}

/// Error-shaped body. Always delivered with HTTP 200.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// What the client may receive from `/analyze-market`.
///
/// The success shape is tried first; a body without `analysis` falls through to
/// the error shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalyzeReply {
    Analysis(AnalyzeResponse),
    Error(ErrorBody),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_uses_camel_case() {
        let section = AnalysisSection {
            title: "Market Overview".into(),
            description: "desc".into(),
            market_data: MarketData {
                target_users: vec!["Teens".into()],
                market_size: "$10B".into(),
                entry_barriers: vec![],
                key_features: vec!["Stories".into()],
            },
        };
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["marketData"]["targetUsers"][0], "Teens");
        assert_eq!(json["marketData"]["marketSize"], "$10B");
        assert!(json["marketData"].get("entryBarriers").is_some());
    }

    #[test]
    fn test_year_founded_omitted_when_absent() {
        let c = Competitor {
            name: "Acme".into(),
            market_share: "5%".into(),
            strengths: vec![],
            weaknesses: vec![],
            primary_markets: vec![],
            year_founded: None,
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(!json.contains("yearFounded"));
        assert!(json.contains("marketShare"));
    }

    #[test]
    fn test_reply_distinguishes_error_body() {
        let err: AnalyzeReply =
            serde_json::from_str(r#"{"error":"boom","details":"upstream"}"#).unwrap();
        assert_eq!(
            err,
            AnalyzeReply::Error(ErrorBody::new("boom").with_details("upstream"))
        );

        let ok: AnalyzeReply =
            serde_json::from_str(r#"{"analysis":[{"title":"Overview"}],"competitors":[]}"#)
                .unwrap();
        match ok {
            AnalyzeReply::Analysis(resp) => {
                assert_eq!(resp.analysis.len(), 1);
                assert_eq!(resp.analysis[0].market_data, MarketData::default());
            }
            other => panic!("expected analysis, got {other:?}"),
        }
    }

    #[test]
    fn test_news_request_tolerates_missing_name() {
        let req: NewsRequest = serde_json::from_str("{}").unwrap();
        assert!(req.company_name.is_none());
    }
}
