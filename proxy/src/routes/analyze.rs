use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use market_lens_core::{AnalyzeReply, AnalyzeRequest, ErrorBody};
use tracing::{info, warn};

use crate::AppState;

/// POST /analyze-market
///
/// Always answers 200. Upstream and parse failures are absorbed by the analyst;
/// only an unreadable body or a blank company name produce an error body.
pub async fn analyze_market(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> (StatusCode, Json<AnalyzeReply>) {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!("Unreadable analyze request: {}", rejection.body_text());
            return (
                StatusCode::OK,
                Json(AnalyzeReply::Error(
                    ErrorBody::new("Invalid request body").with_details(rejection.body_text()),
                )),
            );
        }
    };

    let company_name = req.company_name.trim();
    if company_name.is_empty() {
        warn!("Analyze request with blank companyName");
        return (
            StatusCode::OK,
            Json(AnalyzeReply::Error(ErrorBody::new("Company name is required"))),
        );
    }

    let resp = state.analyst.analyze(company_name).await;
    info!(
        "Analyzed {company_name}: {} sections, {} competitors",
        resp.analysis.len(),
        resp.competitors.len()
    );
    (StatusCode::OK, Json(AnalyzeReply::Analysis(resp)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MarketAnalyst;
    use crate::test_state;

    async fn call(company: &str) -> (StatusCode, AnalyzeReply) {
        let state = test_state(MarketAnalyst::new(None, false));
        let req = AnalyzeRequest {
            company_name: company.to_string(),
        };
        let (status, Json(reply)) = analyze_market(State(state), Ok(Json(req))).await;
        (status, reply)
    }

    #[tokio::test]
    async fn test_blank_name_is_error_body_with_200() {
        let (status, reply) = call("   ").await;
        assert_eq!(status, StatusCode::OK);
        match reply {
            AnalyzeReply::Error(e) => assert_eq!(e.error, "Company name is required"),
            other => panic!("expected error body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_model_still_populates() {
        let (status, reply) = call("Instagram").await;
        assert_eq!(status, StatusCode::OK);
        let AnalyzeReply::Analysis(resp) = reply else {
            panic!("expected analysis");
        };
        assert!(!resp.analysis.is_empty());
        assert!(resp
            .competitors
            .iter()
            .any(|c| c.name.to_lowercase().contains("tiktok")));
    }

    #[test]
    fn test_error_body_serializes_without_details() {
        let reply = AnalyzeReply::Error(ErrorBody::new("Company name is required"));
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Company name is required"}));
    }
}
