use super::industry::Industry;

pub const ANALYST_SYSTEM: &str = r#"You are a market research analyst specializing in competitive analysis. Always respond with valid JSON that matches the requested structure exactly. Always include competitors for every analysis - no business exists without competitors.

CROSS-REFERENCE RULES:
1. If the company is a social media platform (Instagram, Facebook, Snapchat, YouTube), TikTok MUST appear in the competitors list. If the company is TikTok, Instagram MUST appear.
2. If the company is an automotive brand, its most obvious rival MUST appear: Tesla competes with BYD, BMW with Mercedes-Benz, Mercedes-Benz with BMW, Audi with BMW and Mercedes-Benz.
3. Never list the company itself as its own competitor.

Do NOT wrap the JSON in markdown code blocks."#;

pub const REPAIR_SYSTEM: &str = r#"You convert malformed model output into valid JSON. Keep every value that is present, fix quoting, brackets and commas, and output ONLY the corrected JSON object with the keys "analysis" and "competitors". Do NOT wrap in markdown code blocks."#;

const RESPONSE_SHAPE: &str = r#"{
  "analysis": [{
    "title": string,
    "description": string,
    "marketData": {
      "targetUsers": string[],
      "marketSize": string,
      "entryBarriers": string[],
      "keyFeatures": string[]
    }
  }],
  "competitors": [{
    "name": string,
    "marketShare": string,
    "strengths": string[],
    "weaknesses": string[],
    "primaryMarkets": string[],
    "yearFounded": string (optional)
  }]
}"#;

/// User message for the analysis call.
pub fn build_prompt(company_name: &str, industry: Industry) -> String {
    format!(
        "Analyze the market for {company}. Provide a detailed analysis including:\n\
        1. Market Overview\n\
        2. Competition Analysis\n\
        3. Opportunity Assessment\n\
        \n\
        For each section, include:\n\
        - Target users\n\
        - Market size and growth\n\
        - Entry barriers\n\
        - Required key features\n\
        \n\
        Also, identify at least 3 key competitors for {company}. For each competitor, include:\n\
        - Their name\n\
        - Approximate market share (can be an estimate)\n\
        - 3 key strengths\n\
        - 2-3 key weaknesses\n\
        - Primary markets they operate in\n\
        - Year founded (if significant)\n\
        \n\
        {fragment}\n\
        \n\
        Format the response as a JSON object with this structure:\n\
        {shape}\n\
        \n\
        IMPORTANT: Always include at least 3 competitors in the \"competitors\" array, even if they are smaller or less known competitors.",
        company = company_name,
        fragment = industry.prompt_fragment(company_name),
        shape = RESPONSE_SHAPE,
    )
}

/// User message for the second, repair-only call.
pub fn build_repair_prompt(raw_output: &str) -> String {
    format!(
        "The following output was supposed to be a JSON object with this structure:\n\
        {RESPONSE_SHAPE}\n\
        \n\
        It could not be parsed. Return the corrected JSON only.\n\
        \n\
        === OUTPUT ===\n\
        {raw_output}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_company_and_fragment() {
        let prompt = build_prompt("Instagram", Industry::SocialMedia);
        assert!(prompt.starts_with("Analyze the market for Instagram."));
        assert!(prompt.contains("For social media companies like Instagram"));
        assert!(prompt.contains("\"marketData\""));
        assert!(prompt.contains("at least 3 competitors"));
    }

    #[test]
    fn test_repair_prompt_carries_raw_output() {
        let prompt = build_repair_prompt("{\"analysis\": [");
        assert!(prompt.ends_with("{\"analysis\": ["));
        assert!(prompt.contains("\"competitors\""));
    }
}
