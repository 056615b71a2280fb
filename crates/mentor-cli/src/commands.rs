/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Clear the current conversation.
    Clear,
    /// Quit the application.
    Quit,
    /// Start a fresh conversation.
    NewConversation,
    /// Save the current conversation, optionally renaming it.
    SaveConversation(Option<String>),
    /// Load conversation by ID.
    LoadConversation(String),
    /// List saved conversations.
    ListConversations,
    /// Show the mentor style, or change it.
    Style(Option<String>),
    /// Show the profile.
    ShowProfile,
    /// Update one profile field.
    SetProfileField { field: String, value: String },
    /// Show conversation and message counts.
    ShowStats,
    /// Not a command - treat as regular input.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let parts: Vec<&str> = input.trim().splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,
        "/clear" => CommandResult::Clear,
        "/new" => CommandResult::NewConversation,

        // Conversation commands
        "/save" => CommandResult::SaveConversation((!arg.is_empty()).then(|| arg.to_string())),
        "/load" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /load <conversation-id>".into())
            } else {
                CommandResult::LoadConversation(arg.to_string())
            }
        }
        "/conversations" | "/history" => CommandResult::ListConversations,
        "/stats" | "/status" => CommandResult::ShowStats,

        // Mentor commands
        "/style" => CommandResult::Style((!arg.is_empty()).then(|| arg.to_string())),
        "/profile" => {
            if arg.is_empty() {
                return CommandResult::ShowProfile;
            }
            let rest = match arg.strip_prefix("set") {
                Some(rest) if rest.is_empty() || rest.starts_with(' ') => rest.trim(),
                _ => return profile_usage(),
            };
            let mut fields = rest.splitn(2, ' ');
            match (fields.next(), fields.next()) {
                (Some(field), value) if !field.is_empty() => CommandResult::SetProfileField {
                    field: field.to_string(),
                    value: value.unwrap_or("").trim().to_string(),
                },
                _ => profile_usage(),
            }
        }
        "/version" => CommandResult::Message(format!("Mentor CLI v{}", env!("CARGO_PKG_VERSION"))),

        // Unknown command
        _ => {
            if input.trim_start().starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

fn profile_usage() -> CommandResult {
    CommandResult::Message(
        "Usage: /profile set <field> <value>\nFields: fullname, email, role, startup, stage, industry, description, pref-funding, pref-marketing, pref-legal, pref-ops".into(),
    )
}

fn show_help() -> CommandResult {
    let help_text = "\
╭─ Mentor Chat Commands ─────────────────────────────────────────╮

  CHAT
    /new                      Start a fresh conversation
    /clear                    Clear the current conversation
    /save [name]              Save the current conversation
    /load <id>                Load a saved conversation
    /conversations, /history  List saved conversations
    /stats                    Show conversation and message counts

  MENTOR
    /style [name]             Show or set tone (supportive, direct, investor, balanced)
    /profile                  Show your profile
    /profile set <f> <v>      Update one profile field

  OTHER
    /help, /h                 Show this help message
    /version                  Show version information
    /exit, /quit, /q          Quit the application

╰────────────────────────────────────────────────────────────────╯";

    CommandResult::Message(help_text.into())
}
