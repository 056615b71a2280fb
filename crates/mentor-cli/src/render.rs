//! Plain-text views of the store.

use chrono::{DateTime, Local};
use mentor_core::{Conversation, Profile, Role, Stats};

/// Local, human-readable form of an RFC 3339 timestamp. Unparsable input is
/// shown as-is.
pub fn format_date(iso: &str) -> String {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| iso.to_string())
}

pub fn render_conversation(conversation: &Conversation) -> String {
    let mut out = format!(
        "── {} ({}) ──\n",
        conversation.name,
        format_date(&conversation.created_at)
    );
    if conversation.messages.is_empty() {
        out.push_str("No messages yet. Ask your mentor anything.\n");
    }
    for message in &conversation.messages {
        out.push_str(&render_message_text(message.role, &message.text));
        out.push('\n');
    }
    out
}

pub fn render_message_text(role: Role, text: &str) -> String {
    let label = match role {
        Role::User => "You",
        Role::Assistant => "Mentor",
    };
    format!("{label}: {text}")
}

pub fn render_saved_list(conversations: &[Conversation]) -> String {
    if conversations.is_empty() {
        return "No conversations yet — start a chat to save them.".to_string();
    }
    conversations
        .iter()
        .map(|c| {
            format!(
                "{}  {} • {}  ({} msgs)",
                c.id,
                c.name,
                format_date(&c.created_at),
                c.messages.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_stats(stats: &Stats) -> String {
    format!(
        "Saved conversations: {}\nTotal messages: {}",
        stats.saved_conversations, stats.total_messages
    )
}

pub fn render_profile(profile: &Profile) -> String {
    let field = |v: &str| if v.is_empty() { "-".to_string() } else { v.to_string() };
    let prefs = [
        ("funding", profile.prefs.funding),
        ("marketing", profile.prefs.marketing),
        ("legal", profile.prefs.legal),
        ("ops", profile.prefs.ops),
    ]
    .iter()
    .filter(|(_, on)| *on)
    .map(|(name, _)| *name)
    .collect::<Vec<_>>();

    format!(
        "Name: {}\nEmail: {}\nRole: {}\nStartup: {}\nStage: {}\nIndustry: {}\nDescription: {}\nInterests: {}",
        field(&profile.fullname),
        field(&profile.email),
        field(&profile.role),
        field(&profile.startup),
        field(&profile.stage),
        field(&profile.industry),
        field(&profile.description),
        if prefs.is_empty() { "-".to_string() } else { prefs.join(", ") },
    )
}

pub fn show_notice(message: &str) {
    eprintln!("» {message}");
}
