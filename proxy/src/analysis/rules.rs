//! Curated competitor records and the tables that decide when to use them.
//!
//! Two passes run over every model response:
//! 1. [`backfill`] tops the list up to [`MIN_COMPETITORS`].
//! 2. [`ensure_rivals`] guarantees the obvious rival of a known brand is listed.

use market_lens_core::Competitor;

use super::industry::{matches_any, AUTOMOTIVE, SOCIAL_MEDIA};

pub const MIN_COMPETITORS: usize = 3;

/// Static competitor record. `key` is the lowercase fragment used to detect the
/// same company already being present under a slightly different name.
#[derive(Debug, Clone, Copy)]
pub struct CompetitorSeed {
    pub key: &'static str,
    pub name: &'static str,
    pub market_share: &'static str,
    pub strengths: &'static [&'static str],
    pub weaknesses: &'static [&'static str],
    pub primary_markets: &'static [&'static str],
    pub year_founded: Option<&'static str>,
}

impl CompetitorSeed {
    pub fn to_competitor(&self) -> Competitor {
        Competitor {
            name: self.name.to_string(),
            market_share: self.market_share.to_string(),
            strengths: owned(self.strengths),
            weaknesses: owned(self.weaknesses),
            primary_markets: owned(self.primary_markets),
            year_founded: self.year_founded.map(str::to_string),
        }
    }

    /// The target company is this seed (never list a company as its own rival).
    fn is_target(&self, lowercase_company: &str) -> bool {
        lowercase_company.contains(self.key)
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ── Curated records ──

const TIKTOK: CompetitorSeed = CompetitorSeed {
    key: "tiktok",
    name: "TikTok",
    market_share: "~25% of social media market",
    strengths: &["Short-form video content", "Advanced algorithm", "Growing user base"],
    weaknesses: &["Limited content formats", "Privacy concerns", "Regulatory challenges"],
    primary_markets: &["Global", "Particularly strong in Gen Z demographic"],
    year_founded: Some("2016"),
};

const SNAPCHAT: CompetitorSeed = CompetitorSeed {
    key: "snap",
    name: "Snapchat",
    market_share: "~10% of social media market",
    strengths: &["Ephemeral content", "AR features", "Young user base"],
    weaknesses: &[
        "Limited older demographic reach",
        "Profitability challenges",
        "Competition from Instagram Stories",
    ],
    primary_markets: &["North America", "Europe"],
    year_founded: Some("2011"),
};

const YOUTUBE: CompetitorSeed = CompetitorSeed {
    key: "youtube",
    name: "YouTube",
    market_share: "~30% of video content market",
    strengths: &["Vast content library", "Creator monetization", "Google integration"],
    weaknesses: &[
        "Different content format",
        "Less focused on social networking",
        "Lower engagement rates than Instagram",
    ],
    primary_markets: &["Global"],
    year_founded: Some("2005"),
};

const INSTAGRAM: CompetitorSeed = CompetitorSeed {
    key: "instagram",
    name: "Instagram",
    market_share: "~20% of social media market",
    strengths: &["Visual-first format", "Reels and Stories", "Meta advertising platform"],
    weaknesses: &["Algorithm changes", "Competition in video space", "Creator fatigue"],
    primary_markets: &["Global"],
    year_founded: Some("2010"),
};

const NIKE_RUN_CLUB: CompetitorSeed = CompetitorSeed {
    key: "nike run club",
    name: "Nike Run Club",
    market_share: "~20% of fitness app market",
    strengths: &["Strong brand recognition", "Integrated with Nike products", "Training plans"],
    weaknesses: &["Less social features", "Limited to running", "Less detailed analytics"],
    primary_markets: &["Global", "Casual runners"],
    year_founded: Some("2010"),
};

const GARMIN_CONNECT: CompetitorSeed = CompetitorSeed {
    key: "garmin",
    name: "Garmin Connect",
    market_share: "~15% of fitness tracking market",
    strengths: &["Hardware integration", "Professional analytics", "Multi-sport tracking"],
    weaknesses: &[
        "Less social engagement",
        "Higher price point with hardware",
        "Complex user interface",
    ],
    primary_markets: &["Serious athletes", "Global"],
    year_founded: Some("2000"),
};

const MAPMYRUN: CompetitorSeed = CompetitorSeed {
    key: "mapmyrun",
    name: "MapMyRun",
    market_share: "~10% of running app market",
    strengths: &["Route planning features", "Under Armour integration", "Community challenges"],
    weaknesses: &[
        "Less active community than Strava",
        "Fewer premium features",
        "Less popular with cyclists",
    ],
    primary_markets: &["North America", "Europe"],
    year_founded: Some("2007"),
};

const BYD: CompetitorSeed = CompetitorSeed {
    key: "byd",
    name: "BYD",
    market_share: "18% of global EV market",
    strengths: &["Battery technology", "Cost leadership", "Vertical integration"],
    weaknesses: &["Limited global presence", "Brand recognition outside Asia"],
    primary_markets: &["China", "Asia-Pacific", "Emerging markets"],
    year_founded: Some("1995"),
};

const VOLKSWAGEN: CompetitorSeed = CompetitorSeed {
    key: "volkswagen",
    name: "Volkswagen Group",
    market_share: "11% of global EV market",
    strengths: &["Manufacturing scale", "Global distribution", "Brand portfolio"],
    weaknesses: &["Legacy infrastructure", "Software capabilities"],
    primary_markets: &["Europe", "China", "North America"],
    year_founded: Some("1937"),
};

const RIVIAN: CompetitorSeed = CompetitorSeed {
    key: "rivian",
    name: "Rivian",
    market_share: "1% of global EV market",
    strengths: &[
        "Specialized in EV trucks/SUVs",
        "Strong backing from investors",
        "Adventure-focused brand",
    ],
    weaknesses: &["Production ramp challenges", "Financial sustainability"],
    primary_markets: &["North America"],
    year_founded: Some("2009"),
};

const TESLA: CompetitorSeed = CompetitorSeed {
    key: "tesla",
    name: "Tesla",
    market_share: "14% of global EV market",
    strengths: &["Brand recognition", "Technology leadership", "Vertical integration"],
    weaknesses: &["Premium pricing", "Production constraints"],
    primary_markets: &["North America", "Europe", "China"],
    year_founded: Some("2003"),
};

const TOYOTA: CompetitorSeed = CompetitorSeed {
    key: "toyota",
    name: "Toyota",
    market_share: "~10% of global auto market",
    strengths: &["Manufacturing efficiency", "Hybrid leadership", "Reliability reputation"],
    weaknesses: &["Late to full EVs", "Conservative design"],
    primary_markets: &["Global", "Japan", "North America"],
    year_founded: Some("1937"),
};

const BMW: CompetitorSeed = CompetitorSeed {
    key: "bmw",
    name: "BMW",
    market_share: "~2% of global auto market",
    strengths: &["Driving dynamics", "Premium brand", "Strong engineering"],
    weaknesses: &["High ownership costs", "Slower EV transition"],
    primary_markets: &["Europe", "China", "North America"],
    year_founded: Some("1916"),
};

const MERCEDES: CompetitorSeed = CompetitorSeed {
    key: "mercedes",
    name: "Mercedes-Benz",
    market_share: "~2% of global auto market",
    strengths: &["Luxury positioning", "Safety innovation", "Global dealer network"],
    weaknesses: &["Premium pricing", "Complex model lineup"],
    primary_markets: &["Europe", "China", "North America"],
    year_founded: Some("1926"),
};

/// Placeholders used when no curated record applies. Matched by exact name.
const GENERIC_COMPETITORS: &[CompetitorSeed] = &[
    CompetitorSeed {
        key: "competitor a",
        name: "Competitor A",
        market_share: "~20% estimated market share",
        strengths: &["Brand recognition", "Product innovation", "Market presence"],
        weaknesses: &["Higher pricing", "Limited market reach", "Narrower product range"],
        primary_markets: &["Global markets"],
        year_founded: Some("2005"),
    },
    CompetitorSeed {
        key: "competitor b",
        name: "Competitor B",
        market_share: "~15% estimated market share",
        strengths: &["Cost leadership", "Distribution network", "Customer loyalty"],
        weaknesses: &["Less brand recognition", "Product quality issues", "Limited innovation"],
        primary_markets: &["Regional focus"],
        year_founded: Some("2010"),
    },
    CompetitorSeed {
        key: "competitor c",
        name: "Competitor C",
        market_share: "~10% estimated market share",
        strengths: &["Niche specialization", "Customer service", "Agile operations"],
        weaknesses: &["Smaller scale", "Limited resources", "Narrower audience"],
        primary_markets: &["Specialized segments"],
        year_founded: Some("2015"),
    },
];

// ── Tables ──

/// Records offered when the list is short. Every matching rule contributes, in
/// order; exact companies come before their industry set.
struct BackfillRule {
    keywords: &'static [&'static str],
    competitors: &'static [CompetitorSeed],
}

const BACKFILL_RULES: &[BackfillRule] = &[
    BackfillRule {
        keywords: &["instagram"],
        competitors: &[TIKTOK, SNAPCHAT, YOUTUBE],
    },
    BackfillRule {
        keywords: &["strava"],
        competitors: &[NIKE_RUN_CLUB, GARMIN_CONNECT, MAPMYRUN],
    },
    BackfillRule {
        keywords: &["tesla"],
        competitors: &[BYD, VOLKSWAGEN, RIVIAN],
    },
    BackfillRule {
        keywords: SOCIAL_MEDIA,
        competitors: &[TIKTOK, INSTAGRAM, SNAPCHAT, YOUTUBE],
    },
    BackfillRule {
        keywords: AUTOMOTIVE,
        competitors: &[TESLA, TOYOTA, BMW, MERCEDES, VOLKSWAGEN],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Front,
    Back,
}

/// A rival that must be listed whenever the company matches `brands`.
struct RivalRule {
    brands: &'static [&'static str],
    rival: CompetitorSeed,
    placement: Placement,
}

const RIVAL_RULES: &[RivalRule] = &[
    RivalRule {
        brands: &["instagram", "facebook", "snap", "youtube", "twitter", "pinterest"],
        rival: TIKTOK,
        placement: Placement::Front,
    },
    RivalRule {
        brands: &["tiktok"],
        rival: INSTAGRAM,
        placement: Placement::Front,
    },
    RivalRule {
        brands: &["tesla"],
        rival: BYD,
        placement: Placement::Front,
    },
    RivalRule {
        brands: &["bmw", "audi"],
        rival: MERCEDES,
        placement: Placement::Front,
    },
    RivalRule {
        brands: &["mercedes"],
        rival: BMW,
        placement: Placement::Front,
    },
    RivalRule {
        brands: &["bmw", "audi", "mercedes", "volkswagen", "toyota", "ford"],
        rival: TESLA,
        placement: Placement::Back,
    },
];

/// Case-insensitive substring match against existing competitor names.
pub fn has_competitor(competitors: &[Competitor], key: &str) -> bool {
    let key = key.to_lowercase();
    competitors
        .iter()
        .any(|c| c.name.to_lowercase().contains(&key))
}

/// Top `competitors` up to [`MIN_COMPETITORS`]. Lists that are already long
/// enough come back untouched.
pub fn backfill(company_name: &str, mut competitors: Vec<Competitor>) -> Vec<Competitor> {
    if competitors.len() >= MIN_COMPETITORS {
        return competitors;
    }
    let company = company_name.to_lowercase();

    let curated = BACKFILL_RULES
        .iter()
        .filter(|rule| matches_any(&company, rule.keywords))
        .flat_map(|rule| rule.competitors.iter());

    for seed in curated {
        if competitors.len() >= MIN_COMPETITORS {
            return competitors;
        }
        if seed.is_target(&company) || has_competitor(&competitors, seed.key) {
            continue;
        }
        competitors.push(seed.to_competitor());
    }

    // Exact-name dedup keeps at least one placeholder free for every slot missing.
    for seed in GENERIC_COMPETITORS {
        if competitors.len() >= MIN_COMPETITORS {
            break;
        }
        if competitors
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(seed.name))
        {
            continue;
        }
        competitors.push(seed.to_competitor());
    }

    competitors
}

/// Insert each must-have rival of a recognized social-media or automotive brand
/// that is not already listed.
pub fn ensure_rivals(company_name: &str, mut competitors: Vec<Competitor>) -> Vec<Competitor> {
    let company = company_name.to_lowercase();
    if !matches_any(&company, SOCIAL_MEDIA) && !matches_any(&company, AUTOMOTIVE) {
        return competitors;
    }

    for rule in RIVAL_RULES
        .iter()
        .filter(|rule| matches_any(&company, rule.brands))
    {
        if rule.rival.is_target(&company) || has_competitor(&competitors, rule.rival.key) {
            continue;
        }
        let record = rule.rival.to_competitor();
        match rule.placement {
            Placement::Front => competitors.insert(0, record),
            Placement::Back => competitors.push(record),
        }
    }

    competitors
}

/// Competitors used when the model produced nothing usable.
pub fn default_competitors(company_name: &str) -> Vec<Competitor> {
    ensure_rivals(company_name, backfill(company_name, Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Competitor {
        Competitor {
            name: name.to_string(),
            market_share: String::new(),
            strengths: vec![],
            weaknesses: vec![],
            primary_markets: vec![],
            year_founded: None,
        }
    }

    fn names(list: &[Competitor]) -> Vec<&str> {
        list.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_known_company_gets_curated_records() {
        assert_eq!(names(&backfill("Instagram", vec![])), vec!["TikTok", "Snapchat", "YouTube"]);
        assert_eq!(
            names(&backfill("Strava", vec![])),
            vec!["Nike Run Club", "Garmin Connect", "MapMyRun"]
        );
        assert_eq!(names(&backfill("Tesla", vec![])), vec!["BYD", "Volkswagen Group", "Rivian"]);
    }

    #[test]
    fn test_unknown_company_gets_placeholders() {
        assert_eq!(
            names(&backfill("Acme Widgets", vec![])),
            vec!["Competitor A", "Competitor B", "Competitor C"]
        );
    }

    #[test]
    fn test_backfill_keeps_existing_and_skips_duplicates() {
        let existing = vec![named("Snapchat Inc."), named("Pinterest")];
        let result = backfill("Instagram", existing);
        assert_eq!(names(&result), vec!["Snapchat Inc.", "Pinterest", "TikTok"]);
    }

    #[test]
    fn test_backfill_never_lists_the_company_itself() {
        let result = backfill("TikTok", vec![]);
        assert_eq!(result.len(), 3);
        assert!(!has_competitor(&result, "tiktok"));
        assert_eq!(names(&result), vec!["Instagram", "Snapchat", "YouTube"]);
    }

    #[test]
    fn test_long_lists_are_untouched() {
        let existing = vec![named("A"), named("B"), named("C"), named("D")];
        assert_eq!(backfill("Tesla", existing.clone()), existing);
    }

    #[test]
    fn test_placeholders_fill_even_on_name_collisions() {
        let existing = vec![named("competitor a"), named("Competitor B")];
        let result = backfill("Acme", existing);
        assert_eq!(names(&result), vec!["competitor a", "Competitor B", "Competitor C"]);

        // A company literally named like a placeholder still gets three entries
        assert_eq!(backfill("Competitor", vec![]).len(), 3);
    }

    #[test]
    fn test_social_brand_always_lists_tiktok() {
        let existing = vec![named("Snapchat"), named("YouTube"), named("Pinterest")];
        let result = ensure_rivals("instagram", existing);
        assert_eq!(result[0].name, "TikTok");
        assert_eq!(result.len(), 4);

        // Already present under another casing: no growth
        let existing = vec![named("TIKTOK (ByteDance)"), named("Snapchat"), named("YouTube")];
        assert_eq!(ensure_rivals("Instagram", existing).len(), 3);
    }

    #[test]
    fn test_automotive_rivals_front_and_back() {
        let existing = vec![named("Audi"), named("Toyota"), named("Lexus")];
        let result = ensure_rivals("BMW", existing);
        assert_eq!(names(&result), vec!["Mercedes-Benz", "Audi", "Toyota", "Lexus", "Tesla"]);
    }

    #[test]
    fn test_unrelated_company_gets_no_rivals() {
        let existing = vec![named("A"), named("B"), named("C")];
        assert_eq!(ensure_rivals("Acme", existing.clone()), existing);
    }

    #[test]
    fn test_default_competitors_meet_minimum() {
        for company in ["Instagram", "Facebook", "Tesla", "BMW", "Strava", "Acme", ""] {
            let list = default_competitors(company);
            assert!(list.len() >= MIN_COMPETITORS, "{company}: {}", list.len());
        }
        assert!(has_competitor(&default_competitors("Facebook"), "tiktok"));
    }
}
