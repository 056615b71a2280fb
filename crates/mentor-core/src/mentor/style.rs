use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Tone of the mentor's replies.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MentorStyle {
    Supportive,
    Direct,
    Investor,
    #[default]
    Balanced,
}

impl MentorStyle {
    pub const ALL: [MentorStyle; 4] = [
        MentorStyle::Supportive,
        MentorStyle::Direct,
        MentorStyle::Investor,
        MentorStyle::Balanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MentorStyle::Supportive => "supportive",
            MentorStyle::Direct => "direct",
            MentorStyle::Investor => "investor",
            MentorStyle::Balanced => "balanced",
        }
    }

    /// Direct and investor tones use terse numbered action items.
    pub fn is_terse(&self) -> bool {
        matches!(self, MentorStyle::Direct | MentorStyle::Investor)
    }
}

impl FromStr for MentorStyle {
    type Err = Infallible;

    /// Unknown names resolve to [`MentorStyle::Balanced`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "supportive" => MentorStyle::Supportive,
            "direct" => MentorStyle::Direct,
            "investor" => MentorStyle::Investor,
            _ => MentorStyle::Balanced,
        })
    }
}

impl fmt::Display for MentorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
