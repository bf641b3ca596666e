#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLevel {
    pub level: &'static str,
    pub price: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    One,
    Two,
}

impl Tier {
    pub fn number(self) -> u8 {
        match self {
            Tier::One => 1,
            Tier::Two => 2,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct LanguageEntry {
    pub key: &'static str,
    pub flag: &'static str,
    pub name: &'static str,
    pub tier: Tier,
    pub description: &'static str,
    pub pricing: &'static [PriceLevel],
}

const TIER_ONE_PRICING: &[PriceLevel] = &[
    PriceLevel { level: "A1 - Beginner", price: "₹16,000" },
    PriceLevel { level: "A2 - Elementary", price: "₹18,000" },
    PriceLevel { level: "B1 - Intermediate", price: "₹20,000" },
    PriceLevel { level: "B2 - Upper Intermediate", price: "₹22,000" },
    PriceLevel { level: "C1 - Advanced", price: "₹24,000" },
    PriceLevel { level: "C2 - Proficiency", price: "₹26,000" },
];

const TIER_TWO_PRICING: &[PriceLevel] = &[
    PriceLevel { level: "A1 - Beginner", price: "₹14,000" },
    PriceLevel { level: "A2 - Elementary", price: "₹16,000" },
    PriceLevel { level: "B1 - Intermediate", price: "₹18,000" },
    PriceLevel { level: "B2 - Upper Intermediate", price: "₹20,000" },
    PriceLevel { level: "C1 - Advanced", price: "₹22,000" },
    PriceLevel { level: "C2 - Proficiency", price: "₹24,000" },
];

pub static CATALOG: &[LanguageEntry] = &[
    LanguageEntry {
        key: "japanese",
        flag: "🇯🇵",
        name: "Japanese",
        tier: Tier::One,
        description: "Master the elegant Japanese language and immerse yourself in one of the world's most fascinating cultures. Learn hiragana, katakana, and kanji while exploring Japanese customs, traditions, and modern society.",
        pricing: TIER_ONE_PRICING,
    },
    LanguageEntry {
        key: "chinese",
        flag: "🇨🇳",
        name: "Chinese",
        tier: Tier::One,
        description: "Learn Mandarin Chinese and unlock opportunities in the world's most spoken language. Master the tones, characters, and cultural nuances that make Chinese unique and fascinating.",
        pricing: TIER_ONE_PRICING,
    },
    LanguageEntry {
        key: "hebrew",
        flag: "🇮🇱",
        name: "Hebrew",
        tier: Tier::One,
        description: "Discover the ancient Hebrew language and connect with its rich historical and cultural heritage. Learn to read, write, and speak modern Hebrew while exploring its biblical roots.",
        pricing: TIER_ONE_PRICING,
    },
    LanguageEntry {
        key: "korean",
        flag: "🇰🇷",
        name: "Korean",
        tier: Tier::One,
        description: "Explore Korean language and dive into K-culture, K-pop, and modern Korean society. Learn Hangul and master the unique grammar structure while discovering Korean traditions.",
        pricing: TIER_ONE_PRICING,
    },
    LanguageEntry {
        key: "russian",
        flag: "🇷🇺",
        name: "Russian",
        tier: Tier::One,
        description: "Master Russian and access the language of Tolstoy, Dostoyevsky, and rich Slavic culture. Learn the Cyrillic alphabet and complex grammar while exploring Russian literature and arts.",
        pricing: TIER_ONE_PRICING,
    },
    LanguageEntry {
        key: "dutch",
        flag: "🇳🇱",
        name: "Dutch",
        tier: Tier::One,
        description: "Learn Dutch and open doors to opportunities in the Netherlands and Belgium. Master this Germanic language and discover the rich culture of the Low Countries.",
        pricing: TIER_ONE_PRICING,
    },
    LanguageEntry {
        key: "swedish",
        flag: "🇸🇪",
        name: "Swedish",
        tier: Tier::One,
        description: "Embrace Swedish and connect with Scandinavian culture, design, and innovation. Learn one of the North Germanic languages and explore Swedish traditions and modern lifestyle.",
        pricing: TIER_ONE_PRICING,
    },
    LanguageEntry {
        key: "arabic",
        flag: "🇸🇦",
        name: "Arabic",
        tier: Tier::Two,
        description: "Learn Modern Standard Arabic and explore the rich cultural heritage of the Arab world. Master the Arabic script and discover one of the world's most influential languages.",
        pricing: TIER_TWO_PRICING,
    },
    LanguageEntry {
        key: "french",
        flag: "🇫🇷",
        name: "French",
        tier: Tier::Two,
        description: "Master the language of love, diplomacy, and one of the world's most beautiful cultures. Learn French and access a world of art, cuisine, fashion, and international relations.",
        pricing: TIER_TWO_PRICING,
    },
    LanguageEntry {
        key: "spanish",
        flag: "🇪🇸",
        name: "Spanish",
        tier: Tier::Two,
        description: "Learn Spanish and connect with over 500 million speakers across the globe. Discover the vibrant cultures of Spain and Latin America while mastering one of the world's most useful languages.",
        pricing: TIER_TWO_PRICING,
    },
    LanguageEntry {
        key: "italian",
        flag: "🇮🇹",
        name: "Italian",
        tier: Tier::Two,
        description: "Discover Italian, the language of art, music, cuisine, and la dolce vita. Learn to speak like a native while exploring Italy's incredible cultural contributions to the world.",
        pricing: TIER_TWO_PRICING,
    },
    LanguageEntry {
        key: "german",
        flag: "🇩🇪",
        name: "German",
        tier: Tier::Two,
        description: "Master German and access opportunities in Europe's largest economy and beyond. Learn the language of Goethe, Einstein, and modern engineering excellence.",
        pricing: TIER_TWO_PRICING,
    },
];

pub fn lookup(key: &str) -> Option<&'static LanguageEntry> {
    CATALOG.iter().find(|entry| entry.key == key)
}

/// Case-insensitive substring match on the display name. An empty term
/// matches everything.
pub fn matches(entry: &LanguageEntry, term: &str) -> bool {
    entry.name.to_lowercase().contains(&term.trim().to_lowercase())
}

pub fn search(term: &str) -> Vec<&'static LanguageEntry> {
    CATALOG.iter().filter(|entry| matches(entry, term)).collect()
}

/// Line under the search bar. Empty while nothing is typed.
pub fn search_summary(term: &str, visible: usize, total: usize) -> String {
    if term.trim().is_empty() {
        String::new()
    } else if visible == 0 {
        "No languages found".to_string()
    } else if visible == total {
        format!("Showing all {} languages", visible)
    } else {
        format!("Found {} language{}", visible, if visible == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_and_unknown_keys() {
        assert_eq!(lookup("french").map(|e| e.name), Some("French"));
        assert!(lookup("klingon").is_none());
        assert!(lookup("French").is_none());
    }

    #[test]
    fn every_entry_has_six_levels_in_order() {
        for entry in CATALOG {
            let levels: Vec<_> = entry.pricing.iter().map(|p| &p.level[..2]).collect();
            assert_eq!(levels, ["A1", "A2", "B1", "B2", "C1", "C2"], "{}", entry.key);
        }
    }

    #[test]
    fn tiers_set_the_price() {
        assert_eq!(lookup("japanese").unwrap().pricing[0].price, "₹16,000");
        assert_eq!(lookup("german").unwrap().pricing[5].price, "₹24,000");
        assert_eq!(CATALOG.iter().filter(|e| e.tier == Tier::One).count(), 7);
        assert_eq!(CATALOG.iter().filter(|e| e.tier.number() == 2).count(), 5);
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<_> = CATALOG.iter().map(|e| e.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), CATALOG.len());
    }

    #[test]
    fn search_is_case_insensitive_and_trimmed() {
        let names: Vec<_> = search("  AN ").iter().map(|e| e.name).collect();
        assert_eq!(names, ["Japanese", "Korean", "Russian", "Spanish", "Italian", "German"]);
        assert_eq!(search("").len(), CATALOG.len());
        assert!(search("zz").is_empty());
    }

    #[test]
    fn summary_wording() {
        assert_eq!(search_summary("", 12, 12), "");
        assert_eq!(search_summary("zz", 0, 12), "No languages found");
        assert_eq!(search_summary("e", 12, 12), "Showing all 12 languages");
        assert_eq!(search_summary("fr", 1, 12), "Found 1 language");
        assert_eq!(search_summary("an", 5, 12), "Found 5 languages");
    }
}
