use std::fmt;

/// Coarse topic of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Funding,
    Marketing,
    Legal,
    Ops,
    Pricing,
    Pitch,
}

/// Checked top to bottom; the first intent with any keyword contained in the
/// input wins.
const INTENT_TABLE: &[(Intent, &[&str])] = &[
    (
        Intent::Funding,
        &["fund", "raise", "investor", "seed", "pre-seed", "series"],
    ),
    (
        Intent::Marketing,
        &["marketing", "growth", "users", "acquisition", "channels"],
    ),
    (
        Intent::Legal,
        &["legal", "contract", "term", "agreement", "nda"],
    ),
    (Intent::Ops, &["team", "hiring", "onboard", "hr"]),
    (Intent::Pricing, &["pricing", "revenue", "business model"]),
    (
        Intent::Pitch,
        &["pitch", "deck", "investor email", "pitch deck"],
    ),
];

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Funding => "funding",
            Intent::Marketing => "marketing",
            Intent::Legal => "legal",
            Intent::Ops => "ops",
            Intent::Pricing => "pricing",
            Intent::Pitch => "pitch",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify already lower-cased text. Substring matching, so "hr" also hits
/// words like "through".
pub fn classify(lowered: &str) -> Option<Intent> {
    INTENT_TABLE
        .iter()
        .find(|(_, words)| words.iter().any(|w| lowered.contains(w)))
        .map(|(intent, _)| *intent)
}

/// 32-bit polynomial rolling hash (`h = h * 31 + unit`) over UTF-16 code
/// units, wrapping like a signed 32-bit integer.
pub fn hash_code(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// `|hash_code(s)| mod len`, safe for `i32::MIN`.
pub fn pick_index(s: &str, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (i64::from(hash_code(s)).unsigned_abs() % len as u64) as usize
}
