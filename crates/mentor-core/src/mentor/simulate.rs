//! Offline mentor: canned advice picked by keyword intent and a string hash.

use super::intent::{classify, pick_index, Intent};
use super::style::MentorStyle;
use crate::constants::texts;
use crate::context::Profile;

const FALLBACK_ADVICE: &[&str] = &[
    "Clarify the one problem you are solving and who you are solving it for.",
    "Design a small experiment to validate assumptions in 2 weeks.",
];

const TERSE_ACTIONS: &[&str] = &[
    "1) One-sentence value prop",
    "2) Top metric to improve",
    "3) Next experiment (1-week)",
    "4) Decide success criteria",
];

const SOFT_ACTIONS: &[&str] = &[
    "- Write a one-line value proposition",
    "- List top 3 assumptions",
    "- Run one small experiment to test an assumption",
];

const GENERIC_FOLLOW_UP: &str =
    "Can you share one key metric or constraint to make this more actionable?";

fn advice_for(intent: Option<Intent>) -> &'static [&'static str] {
    match intent {
        Some(Intent::Funding) => &[
            "Start with a 1-page summary, then a 10-slide deck: problem, solution, market size, traction, team, financials, and ask.",
            "Get 3 pilot customers and quantify metrics (MRR, conversion) before scaling outreach.",
        ],
        Some(Intent::Marketing) => &[
            "Pick 2 channels, run 3 experiments each week, measure CAC and retention for each.",
            "Create a 4-week content calendar targeting your top ICP segment.",
        ],
        Some(Intent::Legal) => &[
            "Use a simple contractor agreement and an IP assignment clause for early hires/contractors.",
            "Document incorporation and cap table basics; keep records of founder agreements.",
        ],
        Some(Intent::Ops) => &[
            "Define the first 3 hires and create onboarding checklists for them.",
            "Track weekly OKRs and run short retros to iterate operations.",
        ],
        Some(Intent::Pricing) => &[
            "Run a pricing pilot with 3 customers to test willingness to pay and adjust tiers.",
            "Focus on value metrics (time saved, revenue uplift) when presenting price.",
        ],
        Some(Intent::Pitch) => &[
            "I can draft a short investor email or a pitch deck outline — which do you prefer?",
            "Highlight traction, clear market, and an explicit ask (amount + use of funds).",
        ],
        None => FALLBACK_ADVICE,
    }
}

fn follow_up_for(intent: Option<Intent>) -> &'static str {
    match intent {
        Some(Intent::Funding) => {
            "Do you have any traction metrics (revenue, users) I can use to draft a short pitch?"
        }
        Some(Intent::Marketing) => "Who is your ideal customer (one sentence)?",
        Some(Intent::Legal) => "Do you have any existing contracts or IP concerns?",
        _ => GENERIC_FOLLOW_UP,
    }
}

fn offer_for(intent: Option<Intent>) -> Option<&'static str> {
    match intent {
        Some(Intent::Funding) => {
            Some("(I can generate a sample pitch or investor email for you on request.)")
        }
        Some(Intent::Marketing) => {
            Some("(I can create a short GTM checklist or content plan for you on request.)")
        }
        _ => None,
    }
}

fn opener(style: MentorStyle, name: Option<&str>) -> String {
    match (style, name) {
        (MentorStyle::Supportive, Some(n)) => {
            format!("Thanks {n}, I hear you — here’s a friendly breakdown:")
        }
        (MentorStyle::Supportive, None) => {
            "Thanks — I hear you. Here’s a friendly breakdown:".to_string()
        }
        (MentorStyle::Direct, Some(n)) => format!("{n}, here’s a concise plan:"),
        (MentorStyle::Direct, None) => "Here’s a concise plan:".to_string(),
        (MentorStyle::Investor, Some(n)) => {
            format!("{n}, investor perspective — focus on signal to investors:")
        }
        (MentorStyle::Investor, None) => {
            "Investor perspective — focus on signal to investors:".to_string()
        }
        (MentorStyle::Balanced, Some(n)) => {
            format!("Good question, {n}. Here are the key points:")
        }
        (MentorStyle::Balanced, None) => "Good question — here are the key points:".to_string(),
    }
}

/// The pieces a local reply is assembled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalReply {
    pub intent: Option<Intent>,
    pub advice: &'static str,
    pub text: String,
}

/// Build the offline reply for `user_text`. Pure: the same input, profile and
/// style always give the same text.
pub fn simulate_reply(user_text: &str, profile: &Profile, style: MentorStyle) -> LocalReply {
    let lowered = user_text.trim().to_lowercase();
    let intent = classify(&lowered);

    let candidates = advice_for(intent);
    let advice = candidates[pick_index(&lowered, candidates.len())];
    tracing::debug!(
        "Local reply: intent={}, advice #{}",
        intent.map(|i| i.as_str()).unwrap_or("fallback"),
        pick_index(&lowered, candidates.len())
    );

    let advice_line = match profile.stage() {
        Some(stage) => format!("{advice} (Stage: {stage})"),
        None => advice.to_string(),
    };
    let actions = if style.is_terse() {
        TERSE_ACTIONS
    } else {
        SOFT_ACTIONS
    };

    let mut sections = vec![
        opener(style, profile.display_name()),
        advice_line,
        texts::NEXT_STEPS_HEADER.to_string(),
        actions.join("\n"),
        format!("Follow-up: {}", follow_up_for(intent)),
    ];
    if let Some(offer) = offer_for(intent) {
        sections.push(offer.to_string());
    }

    LocalReply {
        intent,
        advice,
        text: sections.join("\n\n"),
    }
}
