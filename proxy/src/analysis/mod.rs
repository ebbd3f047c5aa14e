//! Market analysis pipeline: prompt, model call, parse, patch.

pub mod fallback;
pub mod industry;
pub mod parse;
pub mod prompt;
pub mod rules;

use std::sync::Arc;

use anyhow::Result;
use market_lens_core::AnalyzeResponse;
use tracing::{info, warn};

use crate::analyzer::ChatModel;
use fallback::fallback_response;
use industry::Industry;
use parse::{parse_model_output, ParsedAnalysis};
use prompt::{build_prompt, build_repair_prompt, ANALYST_SYSTEM, REPAIR_SYSTEM};

/// Produces a populated analysis for every company name.
///
/// `model` is `None` when no API key is configured; every request then gets the
/// fallback analysis.
#[derive(Clone)]
pub struct MarketAnalyst {
    model: Option<Arc<dyn ChatModel>>,
    repair_pass: bool,
}

impl MarketAnalyst {
    pub fn new(model: Option<Arc<dyn ChatModel>>, repair_pass: bool) -> Self {
        Self { model, repair_pass }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    /// Never fails: upstream, configuration and parse errors all degrade to
    /// fallback data.
    pub async fn analyze(&self, company_name: &str) -> AnalyzeResponse {
        let parsed = match self.request_analysis(company_name).await {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Analysis for {company_name} fell back to canned data: {e:#}");
                return fallback_response(company_name);
            }
        };

        let before = parsed.competitors.as_ref().map_or(0, Vec::len);
        let resp = finalize(company_name, parsed);
        if resp.competitors.len() != before {
            info!(
                "Competitors for {company_name} patched: {before} -> {}",
                resp.competitors.len()
            );
        }
        resp
    }

    async fn request_analysis(&self, company_name: &str) -> Result<ParsedAnalysis> {
        let Some(model) = &self.model else {
            anyhow::bail!("LLM API key not configured");
        };

        let industry = Industry::detect(company_name);
        let prompt = build_prompt(company_name, industry);
        let completion = model.complete(ANALYST_SYSTEM, &prompt).await?;

        info!(
            "Analysis[{}]: {company_name} ({industry:?}, ${:.4})",
            model.label(),
            completion.cost
        );

        match parse_model_output(&completion.text) {
            Ok(parsed) => Ok(parsed),
            Err(e) if self.repair_pass => {
                warn!("Model output for {company_name} unusable ({e}), asking for a repair");
                let repaired = model
                    .complete(REPAIR_SYSTEM, &build_repair_prompt(&completion.text))
                    .await?;
                Ok(parse_model_output(&repaired.text)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Apply the competitor backfill and must-have rival passes.
pub fn finalize(company_name: &str, parsed: ParsedAnalysis) -> AnalyzeResponse {
    let competitors = rules::backfill(company_name, parsed.competitors.unwrap_or_default());
    let competitors = rules::ensure_rivals(company_name, competitors);
    AnalyzeResponse {
        analysis: parsed.analysis,
        competitors,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use anyhow::Result;
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use crate::analyzer::{ChatModel, Completion};

    /// Replays canned replies in order and records every user message.
    pub struct ScriptedModel {
        replies: Mutex<VecDeque<Result<String, String>>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        pub fn new(replies: Vec<Result<&str, &str>>) -> Self {
            Self {
                replies: Mutex::new(
                    replies
                        .into_iter()
                        .map(|r| r.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        fn label(&self) -> String {
            "scripted".to_string()
        }

        async fn complete(&self, _system: &str, user_msg: &str) -> Result<Completion> {
            self.calls.lock().unwrap().push(user_msg.to_string());
            let next = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err("no scripted reply left".to_string()));
            match next {
                Ok(text) => Ok(Completion {
                    text,
                    cost: Decimal::ZERO,
                }),
                Err(msg) => Err(anyhow::anyhow!(msg)),
            }
        }
    }
}
