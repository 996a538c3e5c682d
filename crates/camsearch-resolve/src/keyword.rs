//! Keyword extraction: strips conversational filler from a search utterance.
//!
//! "강남역 교통 상황 보여줘" → "강남역", "Gangnam Station show me" → "Gangnam Station".
//!
//! The suffix list is walked exactly once, in order, each entry stripping
//! from whatever the previous entries left behind. Order the table so that
//! suffixes that usually come last in a sentence are listed first.

use camsearch_core::KeywordLocale;

/// Swappable filler table for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordPatterns {
    /// Trailing phrases, applied once each, in order.
    pub suffixes: Vec<String>,
    /// Single trailing characters stripped after the suffix pass.
    pub particles: Vec<char>,
}

impl KeywordPatterns {
    pub fn new<S: Into<String>>(suffixes: impl IntoIterator<Item = S>, particles: &[char]) -> Self {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
            particles: particles.to_vec(),
        }
    }

    pub fn korean() -> Self {
        Self::new(
            [
                "보여주세요",
                "보여줘",
                "알려줘",
                "어때요",
                "어때",
                "좀",
                "상황",
                "교통",
                "CCTV",
                "cctv",
                "확인",
                "검색",
            ],
            // 이/가/도 are left out: too many place names end in them (종로3가, 여의도).
            &['은', '는', '을', '를', '에', '의'],
        )
    }

    pub fn english() -> Self {
        Self::new(
            [
                "show me",
                "how about",
                "status",
                "traffic",
                "cctv",
                "CCTV",
                "check",
                "search",
            ],
            &[],
        )
    }

    pub fn for_locale(locale: KeywordLocale) -> Self {
        match locale {
            KeywordLocale::Ko => Self::korean(),
            KeywordLocale::En => Self::english(),
        }
    }
}

impl Default for KeywordPatterns {
    fn default() -> Self {
        Self::korean()
    }
}

/// Reduce a raw utterance to a bare search term. May return "".
pub fn extract_keyword(raw: &str, patterns: &KeywordPatterns) -> String {
    let mut text = raw.trim();

    for suffix in &patterns.suffixes {
        if suffix.is_empty() {
            continue;
        }
        if let Some(rest) = text.strip_suffix(suffix.as_str()) {
            text = rest.trim();
        }
    }

    if text.chars().count() > 1 {
        if let Some(last) = text.chars().last() {
            if patterns.particles.contains(&last) {
                text = &text[..text.len() - last.len_utf8()];
            }
        }
    }

    text.trim().to_string()
}
