//! Turning raw model text into analysis sections and competitors.

use market_lens_core::{AnalysisSection, Competitor};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("model output is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("model output has no \"analysis\" array")]
    MissingAnalysis,
    #[error("model output has no usable analysis sections")]
    EmptyAnalysis,
}

/// Validated model output. `competitors` is `None` when the field was absent or
/// not an array.
#[derive(Debug, Clone)]
pub struct ParsedAnalysis {
    pub analysis: Vec<AnalysisSection>,
    pub competitors: Option<Vec<Competitor>>,
}

/// Parse model output, tolerating a markdown fence, surrounding prose, and a
/// missing opening quote in string lists.
pub fn parse_model_output(text: &str) -> Result<ParsedAnalysis, ParseError> {
    let unfenced = strip_code_fence(text);
    let candidate = if unfenced.starts_with('{') {
        unfenced
    } else {
        extract_object(unfenced).unwrap_or(unfenced)
    };

    let value: Value = match serde_json::from_str(candidate) {
        Ok(v) => v,
        Err(first) => {
            let repaired = repair_missing_quotes(candidate)
                .ok_or_else(|| ParseError::InvalidJson(first.to_string()))?;
            serde_json::from_str(&repaired).map_err(|e| ParseError::InvalidJson(e.to_string()))?
        }
    };

    validate_shape(value)
}

fn validate_shape(value: Value) -> Result<ParsedAnalysis, ParseError> {
    let sections = value
        .get("analysis")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingAnalysis)?;

    // Malformed entries are dropped individually; only an empty result fails.
    let analysis: Vec<AnalysisSection> = sections
        .iter()
        .filter_map(|s| serde_json::from_value(s.clone()).ok())
        .collect();
    if analysis.is_empty() {
        return Err(ParseError::EmptyAnalysis);
    }

    let competitors = value
        .get("competitors")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|c| serde_json::from_value::<Competitor>(c.clone()).ok())
                .filter(|c| !c.name.trim().is_empty())
                .collect()
        });

    Ok(ParsedAnalysis {
        analysis,
        competitors,
    })
}

/// Remove a surrounding ```/```json fence.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// First balanced `{...}` in `text`, ignoring braces inside strings.
pub fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Insert the opening quote a model dropped before a string list element, e.g.
/// `["Teens", Adults", "Seniors"]`.
///
/// Returns `None` when nothing matched the pattern, so callers can tell a repair
/// attempt from a no-op.
pub fn repair_missing_quotes(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    // Set right after '[' or an array-level ','
    let mut expect_element = false;
    let mut repaired = false;

    for (i, &ch) in chars.iter().enumerate() {
        if in_string {
            out.push(ch);
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        if expect_element && !ch.is_whitespace() {
            expect_element = false;
            if ch.is_alphanumeric() && bare_word_closed_by_quote(&chars[i..]) {
                out.push('"');
                out.push(ch);
                in_string = true;
                repaired = true;
                continue;
            }
        }

        match ch {
            '"' => in_string = true,
            '[' => {
                stack.push(ch);
                expect_element = true;
            }
            '{' => stack.push(ch),
            ']' | '}' => {
                stack.pop();
            }
            ',' => expect_element = stack.last() == Some(&'['),
            _ => {}
        }
        out.push(ch);
    }

    repaired.then_some(out)
}

/// A bare word that runs into a closing quote before any structural character.
fn bare_word_closed_by_quote(rest: &[char]) -> bool {
    let word: String = rest.iter().take_while(|c| c.is_alphanumeric()).collect();
    if matches!(word.as_str(), "true" | "false" | "null") {
        return false;
    }
    for &c in rest {
        match c {
            '"' => return true,
            ',' | ']' | '}' | '[' | '{' | '\n' => return false,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "analysis": [{
            "title": "Market Overview",
            "description": "Photo sharing at scale.",
            "marketData": {
                "targetUsers": ["Teens", "Young adults"],
                "marketSize": "$150B by 2027",
                "entryBarriers": ["Network effects"],
                "keyFeatures": ["Stories", "Reels"]
            }
        }],
        "competitors": [{
            "name": "TikTok",
            "marketShare": "25%",
            "strengths": ["Algorithm"],
            "weaknesses": ["Regulation"],
            "primaryMarkets": ["Global"],
            "yearFounded": "2016"
        }]
    }"#;

    #[test]
    fn test_parses_plain_json() {
        let parsed = parse_model_output(VALID).unwrap();
        assert_eq!(parsed.analysis.len(), 1);
        assert_eq!(parsed.analysis[0].market_data.key_features, vec!["Stories", "Reels"]);
        let competitors = parsed.competitors.unwrap();
        assert_eq!(competitors[0].year_founded.as_deref(), Some("2016"));
    }

    #[test]
    fn test_parses_fenced_json() {
        let fenced = format!("```json\n{VALID}\n```");
        let parsed = parse_model_output(&fenced).unwrap();
        assert_eq!(parsed.analysis[0].title, "Market Overview");

        let bare_fence = format!("```\n{VALID}\n```\n");
        assert!(parse_model_output(&bare_fence).is_ok());
    }

    #[test]
    fn test_parses_json_wrapped_in_prose() {
        let chatty = format!("Sure! Here is the analysis:\n{VALID}\nLet me know if you need more.");
        assert!(parse_model_output(&chatty).is_ok());
    }

    #[test]
    fn test_repairs_missing_opening_quote() {
        let broken = r#"{"analysis": [{"title": "Overview", "description": "d",
            "marketData": {"targetUsers": ["Teens", Young adults", 18-24 year olds", "Parents"],
            "marketSize": "$5B", "entryBarriers": [Capital"], "keyFeatures": []}}]}"#;
        assert!(serde_json::from_str::<Value>(broken).is_err());

        let parsed = parse_model_output(broken).unwrap();
        let data = &parsed.analysis[0].market_data;
        assert_eq!(
            data.target_users,
            vec!["Teens", "Young adults", "18-24 year olds", "Parents"]
        );
        assert_eq!(data.entry_barriers, vec!["Capital"]);
        assert!(parsed.competitors.is_none());
    }

    #[test]
    fn test_repair_is_noop_on_valid_or_unrelated_input() {
        assert!(repair_missing_quotes(VALID).is_none());
        assert!(repair_missing_quotes("[true, false, null, 3]").is_none());
        assert!(repair_missing_quotes(r#"[3, 4.5, "x"]"#).is_none());
        assert!(repair_missing_quotes("not json at all").is_none());
    }

    #[test]
    fn test_repair_ignores_brackets_inside_strings() {
        let text = r#"{"a": "[x, y\"", "b": [one"]}"#;
        let fixed = repair_missing_quotes(text).unwrap();
        assert_eq!(fixed, r#"{"a": "[x, y\"", "b": ["one"]}"#);
    }

    #[test]
    fn test_unparseable_output_is_error() {
        let err = parse_model_output("I cannot help with that.").unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(
            parse_model_output(r#"{"competitors": []}"#).unwrap_err(),
            ParseError::MissingAnalysis
        ));
        assert!(matches!(
            parse_model_output(r#"{"analysis": "none"}"#).unwrap_err(),
            ParseError::MissingAnalysis
        ));
        assert!(matches!(
            parse_model_output(r#"{"analysis": []}"#).unwrap_err(),
            ParseError::EmptyAnalysis
        ));
        assert!(matches!(
            parse_model_output(r#"{"analysis": [{"description": "no title"}]}"#).unwrap_err(),
            ParseError::EmptyAnalysis
        ));
    }

    #[test]
    fn test_non_array_competitors_become_none() {
        let text = r#"{"analysis": [{"title": "T"}], "competitors": "see above"}"#;
        assert!(parse_model_output(text).unwrap().competitors.is_none());

        let text = r#"{"analysis": [{"title": "T"}], "competitors": [{"name": ""}, {"name": "Acme"}, 5]}"#;
        let competitors = parse_model_output(text).unwrap().competitors.unwrap();
        assert_eq!(competitors.len(), 1);
        assert_eq!(competitors[0].name, "Acme");
    }

    #[test]
    fn test_extract_object_skips_braces_in_strings() {
        let text = r#"note {"a": "}{", "b": {"c": 1}} trailing"#;
        assert_eq!(extract_object(text), Some(r#"{"a": "}{", "b": {"c": 1}}"#));
        assert_eq!(extract_object("no braces"), None);
    }
}
