use anyhow::Result;
use mentor_core::constants::limits;
use mentor_core::{MentorSession, MentorStyle, StoreEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::commands::{handle_command, CommandResult};
use crate::render;

/// What the REPL should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Continue(Option<String>),
    Quit,
}

// ── Single prompt ───────────────────────────────────────────────────────

pub async fn run_single_prompt(session: &mut MentorSession, prompt: &str) -> Result<()> {
    match session.send(prompt).await? {
        Some(reply) => println!("{}", reply.text),
        None => render::show_notice("Nothing to send."),
    }
    Ok(())
}

// ── Interactive REPL ────────────────────────────────────────────────────

pub async fn run_repl(mut session: MentorSession) -> Result<()> {
    let events = session.store_mut().subscribe();
    let indicator = tokio::spawn(typing_indicator(events));

    println!("{}", render::render_conversation(session.store().current()));
    println!("Type a message, or /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let command = handle_command(input);
        let flow = match command {
            CommandResult::NotACommand => {
                match session.send(input).await {
                    Ok(Some(reply)) => Flow::Continue(Some(render::render_message_text(
                        reply.role,
                        &reply.text,
                    ))),
                    Ok(None) => Flow::Continue(None),
                    Err(e) => Flow::Continue(Some(format!("Could not save message: {e}"))),
                }
            }
            other => execute(&mut session, other),
        };

        match flow {
            Flow::Continue(Some(output)) => println!("{output}"),
            Flow::Continue(None) => {}
            Flow::Quit => break,
        }
    }

    indicator.abort();
    Ok(())
}

/// Apply a non-chat command to the session and describe the result.
pub fn execute(session: &mut MentorSession, command: CommandResult) -> Flow {
    let store = session.store_mut();
    let output = match command {
        CommandResult::Message(msg) => msg,
        CommandResult::Quit => return Flow::Quit,
        CommandResult::NotACommand => return Flow::Continue(None),
        CommandResult::Clear => match store.clear_current() {
            Ok(()) => "Conversation cleared. Saved copies are untouched.".to_string(),
            Err(e) => format!("Could not clear conversation: {e}"),
        },
        CommandResult::NewConversation => match store.create_conversation(None) {
            Ok(conv) => render::render_conversation(&conv),
            Err(e) => format!("Could not start conversation: {e}"),
        },
        CommandResult::SaveConversation(name) => match store.commit_current_as(name.as_deref()) {
            Ok(()) => format!(
                "Conversation saved locally as \"{}\" ({}).",
                store.current().name,
                store.current().id
            ),
            Err(e) => format!("Could not save conversation: {e}"),
        },
        CommandResult::LoadConversation(id) => match store.load_from_saved(&id) {
            Ok(Some(conv)) => render::render_conversation(&conv),
            Ok(None) => format!("No saved conversation with id {id}."),
            Err(e) => format!("Could not load conversation: {e}"),
        },
        CommandResult::ListConversations => render::render_saved_list(store.saved()),
        CommandResult::Style(None) => format!(
            "Mentor style: {} (options: {})",
            store.style(),
            MentorStyle::ALL.map(|s| s.as_str()).join(", ")
        ),
        CommandResult::Style(Some(name)) => {
            let style: MentorStyle = name.parse().unwrap_or_default();
            match store.set_style(style) {
                Ok(()) => format!("Mentor style set to {style}."),
                Err(e) => format!("Could not save style: {e}"),
            }
        }
        CommandResult::ShowProfile => render::render_profile(store.profile()),
        CommandResult::SetProfileField { field, value } => {
            let mut profile = store.profile().clone();
            if !profile.set_field(&field, &value) {
                return Flow::Continue(Some(format!("Unknown profile field: {field}")));
            }
            match store.save_profile(profile) {
                Ok(()) => "Profile saved.".to_string(),
                Err(e) => format!("Could not save profile: {e}"),
            }
        }
        CommandResult::ShowStats => {
            let mut out = render::render_stats(&store.stats());
            let recent = store.recent(limits::RECENT_LIST_LEN);
            if !recent.is_empty() {
                out.push_str("\nRecent:\n");
                out.push_str(&render::render_saved_list(recent));
            }
            out
        }
    };
    Flow::Continue(Some(output))
}

/// Subscriber that shows a typing notice while a reply is outstanding.
async fn typing_indicator(mut events: UnboundedReceiver<StoreEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            StoreEvent::ReplyPending => render::show_notice("Mentor is thinking…"),
            other => tracing::debug!("store event: {:?}", other),
        }
    }
}
