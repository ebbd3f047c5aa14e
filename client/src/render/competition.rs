//! Competition-aware rewriting of section descriptions.
//!
//! Model output often describes a company without naming who it competes with.
//! [`enhance_description`] patches the text from ordered keyword tables so every
//! card says something concrete about competition. All matching is ASCII
//! case-insensitive on whole words.

/// Brands whose joint presence means the text already lists competitors.
const KNOWN_COMPANIES: &[&str] = &[
    "instagram", "snapchat", "tiktok", "facebook", "youtube", "twitter", "mercedes", "bmw",
    "audi", "tesla", "toyota", "volkswagen", "ford", "apple", "google", "microsoft", "amazon",
];

struct BrandRivals {
    brands: &'static [&'static str],
    rivals: &'static [&'static str],
}

struct IndustryRivals {
    keywords: &'static [&'static str],
    brands: &'static [BrandRivals],
}

const INDUSTRY_RIVALS: &[IndustryRivals] = &[
    IndustryRivals {
        keywords: &[
            "social media", "platform", "platforms", "network", "networks", "photo sharing",
            "video sharing", "content creator", "content creators",
        ],
        brands: &[
            BrandRivals {
                brands: &["tiktok", "tik tok"],
                rivals: &["Instagram", "Snapchat", "YouTube", "Facebook"],
            },
            BrandRivals {
                brands: &["instagram"],
                rivals: &["TikTok", "Snapchat", "Pinterest", "Facebook"],
            },
            BrandRivals {
                brands: &["facebook", "meta"],
                rivals: &["Instagram", "TikTok", "Snapchat", "YouTube"],
            },
            BrandRivals {
                brands: &["snapchat"],
                rivals: &["Instagram", "TikTok", "BeReal", "Facebook"],
            },
            BrandRivals {
                brands: &["twitter"],
                rivals: &["Facebook", "Instagram", "Threads", "Bluesky"],
            },
        ],
    },
    IndustryRivals {
        keywords: &[
            "automotive", "car", "cars", "vehicle", "vehicles", "automobile", "automobiles",
            "automaker", "automakers", "manufacturer", "manufacturers", "electric vehicle", "ev",
            "evs",
        ],
        brands: &[
            BrandRivals {
                brands: &["bmw"],
                rivals: &["Mercedes-Benz", "Audi", "Lexus", "Tesla"],
            },
            BrandRivals {
                brands: &["mercedes", "mercedes-benz"],
                rivals: &["BMW", "Audi", "Lexus", "Tesla"],
            },
            BrandRivals {
                brands: &["tesla"],
                rivals: &["Volkswagen Group", "BYD", "Ford", "Rivian"],
            },
            BrandRivals {
                brands: &["toyota"],
                rivals: &["Honda", "Volkswagen", "Ford", "Hyundai"],
            },
            BrandRivals {
                brands: &["ford"],
                rivals: &["General Motors", "Toyota", "Volkswagen"],
            },
        ],
    },
    IndustryRivals {
        keywords: &[
            "tech", "technology", "technologies", "software", "hardware", "electronics",
            "digital", "computer", "computers", "smartphone", "smartphones",
        ],
        brands: &[
            BrandRivals {
                brands: &["apple"],
                rivals: &["Samsung", "Microsoft", "Google", "Huawei"],
            },
            BrandRivals {
                brands: &["microsoft"],
                rivals: &["Apple", "Google", "Amazon", "IBM"],
            },
            BrandRivals {
                brands: &["google"],
                rivals: &["Apple", "Microsoft", "Amazon", "Meta"],
            },
            BrandRivals {
                brands: &["amazon"],
                rivals: &["Walmart", "Alibaba", "Microsoft", "Google"],
            },
        ],
    },
];

/// Titles or descriptions that make a section about the competitive landscape.
const COMPETITION_TOPICS: &[&str] = &[
    "competition", "competitive", "market position", "landscape", "overview", "competitor",
    "competitors", "rival", "rivals", "market share", "industry player", "industry players",
];

/// Words that count as the text already mentioning competition.
const COMPETITION_MENTIONS: &[&str] = &[
    "competition", "competitive", "competitor", "competitors", "compete", "competes",
    "competing", "rivalry", "market position",
];

/// Vague phrases, tried pattern by pattern: any first word followed by any second.
const VAGUE_PHRASES: &[(&[&str], &[&str])] = &[
    (
        &["various", "multiple", "several", "many", "different"],
        &["social media platforms", "platforms", "competitors", "companies", "players", "brands"],
    ),
    (
        &["faces", "experiencing", "has", "with"],
        &["competition", "competitive pressure"],
    ),
    (
        &["other", "leading", "major"],
        &["platforms", "competitors", "players", "brands"],
    ),
    (
        &["increasing", "growing", "significant", "intense"],
        &["competition"],
    ),
];

const VAGUE_REPLACEMENT: &str = "key industry competitors";
const GENERIC_SENTENCE: &str =
    "The company operates in a competitive market with several established players.";

/// Patch `description` so it names rivals or at least mentions competition.
pub fn enhance_description(description: &str, title: &str) -> String {
    if description.trim().is_empty() {
        return description.to_string();
    }
    let lower = description.to_ascii_lowercase();
    let lower_title = title.to_ascii_lowercase();

    let named = KNOWN_COMPANIES
        .iter()
        .filter(|c| find_word(&lower, c).is_some())
        .count();
    if named >= 2 {
        return description.to_string();
    }

    let industry = INDUSTRY_RIVALS.iter().find(|industry| {
        industry
            .keywords
            .iter()
            .any(|k| find_word(&lower, k).is_some() || find_word(&lower_title, k).is_some())
    });
    if let Some(industry) = industry {
        let brand = industry
            .brands
            .iter()
            .find(|b| b.brands.iter().any(|name| find_word(&lower, name).is_some()));
        if let Some(brand) = brand {
            return add_rivals(description, brand.rivals);
        }
    }

    let topical = COMPETITION_TOPICS
        .iter()
        .any(|t| find_word(&lower_title, t).is_some() || find_word(&lower, t).is_some());
    if topical {
        return sharpen_vague_phrase(description);
    }

    let mentioned = COMPETITION_MENTIONS
        .iter()
        .any(|m| find_word(&lower, m).is_some());
    if mentioned {
        description.to_string()
    } else {
        append_sentence(description, GENERIC_SENTENCE)
    }
}

/// Byte offset of the first whole-word occurrence of `term` in `lower`.
fn find_word(lower: &str, term: &str) -> Option<usize> {
    lower.match_indices(term).map(|(pos, _)| pos).find(|&pos| {
        let before = lower[..pos].chars().next_back();
        let after = lower[pos + term.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Splice rivals into the first sentence about competition, or append a new one.
fn add_rivals(description: &str, rivals: &[&str]) -> String {
    let names = rivals.join(", ");

    let mut start = 0;
    for (end, ch) in description.char_indices() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let sentence = description[start..end].to_ascii_lowercase();
        if COMPETITION_MENTIONS
            .iter()
            .any(|m| find_word(&sentence, m).is_some())
        {
            if ch != '.' {
                return description.to_string();
            }
            return format!(
                "{} from major competitors like {names}{}",
                &description[..end],
                &description[end..]
            );
        }
        start = end + 1;
    }

    append_sentence(
        description,
        &format!("It faces competition from major competitors like {names}."),
    )
}

fn sharpen_vague_phrase(description: &str) -> String {
    let lower = description.to_ascii_lowercase();
    for (firsts, seconds) in VAGUE_PHRASES {
        let leftmost = firsts
            .iter()
            .flat_map(|first| seconds.iter().map(move |second| format!("{first} {second}")))
            .filter_map(|phrase| find_word(&lower, &phrase).map(|pos| (pos, phrase.len())))
            .min_by_key(|&(pos, _)| pos);
        if let Some((pos, len)) = leftmost {
            return format!(
                "{}{VAGUE_REPLACEMENT}{}",
                &description[..pos],
                &description[pos + len..]
            );
        }
    }
    description.to_string()
}

fn append_sentence(description: &str, sentence: &str) -> String {
    let trimmed = description.trim_end();
    if trimmed.ends_with(['.', '!', '?']) {
        format!("{trimmed} {sentence}")
    } else {
        format!("{trimmed}. {sentence}")
    }
}
