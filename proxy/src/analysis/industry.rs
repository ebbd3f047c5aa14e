//! Keyword-driven industry detection for company names.

pub const SOCIAL_MEDIA: &[&str] = &[
    "instagram", "facebook", "tiktok", "snap", "twitter", "youtube", "pinterest", "reddit",
];
pub const E_COMMERCE: &[&str] = &["amazon", "ebay", "etsy", "shopify", "alibaba", "walmart"];
pub const AUTOMOTIVE: &[&str] = &[
    "bmw", "audi", "mercedes", "tesla", "toyota", "volkswagen", "ford", "byd", "rivian",
];
pub const SPORTSWEAR: &[&str] = &["nike", "adidas", "puma", "under armour", "new balance"];
pub const FITNESS: &[&str] = &["strava", "fitbit", "garmin", "fitness", "peloton"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Industry {
    SocialMedia,
    ECommerce,
    Automotive,
    Sportswear,
    Fitness,
    Generic,
}

/// Checked in order; the first set with a hit wins.
const INDUSTRY_KEYWORDS: &[(Industry, &[&str])] = &[
    (Industry::SocialMedia, SOCIAL_MEDIA),
    (Industry::ECommerce, E_COMMERCE),
    (Industry::Automotive, AUTOMOTIVE),
    (Industry::Sportswear, SPORTSWEAR),
    (Industry::Fitness, FITNESS),
];

/// True when the lowercased name contains any keyword.
pub fn matches_any(lowercase_name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lowercase_name.contains(k))
}

impl Industry {
    pub fn detect(company_name: &str) -> Self {
        let name = company_name.to_lowercase();
        INDUSTRY_KEYWORDS
            .iter()
            .find(|(_, keywords)| matches_any(&name, keywords))
            .map(|(industry, _)| *industry)
            .unwrap_or(Industry::Generic)
    }

    /// Instruction fragment embedded in the analysis prompt.
    pub fn prompt_fragment(&self, company_name: &str) -> String {
        match self {
            Industry::SocialMedia => format!(
                "For social media companies like {company_name}, be sure to include competitors like TikTok, Instagram, Snapchat, YouTube, and other social platforms."
            ),
            Industry::ECommerce => format!(
                "For e-commerce companies like {company_name}, be sure to include competitors like Amazon, eBay, Walmart, Etsy, Shopify, or other relevant platforms."
            ),
            Industry::Automotive => format!(
                "For automotive companies like {company_name}, be sure to include competitors like BMW, Mercedes-Benz, Audi, Tesla, Toyota, or other relevant car manufacturers."
            ),
            Industry::Sportswear => format!(
                "For sportswear companies like {company_name}, be sure to include competitors like Nike, Adidas, Puma, Under Armour, New Balance, or other relevant brands."
            ),
            Industry::Fitness => format!(
                "For fitness tracking companies like {company_name}, be sure to include competitors like Strava, Nike Run Club, Garmin Connect, MapMyRun, or other fitness platforms."
            ),
            Industry::Generic => format!(
                "Be sure to include at least 3 direct competitors for {company_name}, even if they are smaller players in the market."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(Industry::detect("Instagram"), Industry::SocialMedia);
        assert_eq!(Industry::detect("SHOPIFY Plus"), Industry::ECommerce);
        assert_eq!(Industry::detect("Tesla"), Industry::Automotive);
        assert_eq!(Industry::detect("Under Armour"), Industry::Sportswear);
        assert_eq!(Industry::detect("Planet Fitness"), Industry::Fitness);
        assert_eq!(Industry::detect("Acme Widgets"), Industry::Generic);
    }

    #[test]
    fn test_first_matching_set_wins() {
        // "snap" (social) is checked before "amazon" (e-commerce)
        assert_eq!(Industry::detect("Snap Amazon Bundle"), Industry::SocialMedia);
    }

    #[test]
    fn test_fragment_names_company() {
        let text = Industry::Generic.prompt_fragment("Acme");
        assert!(text.contains("Acme"));
        assert!(text.contains("at least 3"));
        assert!(Industry::Automotive.prompt_fragment("BMW").contains("Tesla"));
    }
}
