use std::time::Duration;

use super::intent::hash_code;
use super::simulate::simulate_reply;
use super::style::MentorStyle;
use crate::config::Settings;
use crate::constants::{defaults, limits};
use crate::context::{Message, Profile, Role};
use crate::error::MentorError;
use crate::llm::{ChatMessage, LlmClient, OpenAIClient};

/// Everything a reply is based on.
#[derive(Debug, Clone, Copy)]
pub struct ReplyRequest<'a> {
    pub user_text: &'a str,
    /// Earlier messages of the conversation, oldest first, excluding
    /// `user_text` itself.
    pub history: &'a [Message],
    pub profile: &'a Profile,
    pub style: MentorStyle,
}

/// Source of mentor replies used by [`crate::session::MentorSession`].
#[async_trait::async_trait]
pub trait MentorReplier: Send + Sync {
    async fn reply(&self, request: ReplyRequest<'_>) -> Result<String, MentorError>;
}

/// Remote completion when a credential is configured, local simulation
/// otherwise or whenever the remote call fails.
pub struct ReplyGenerator {
    client: Option<Box<dyn LlmClient>>,
    history_window: usize,
    latency: bool,
}

impl ReplyGenerator {
    /// Build from settings. `credential` is the API key resolved by the caller;
    /// `None` means local replies only.
    pub fn new(credential: Option<String>, settings: &Settings) -> Self {
        let client = credential.map(|key| {
            Box::new(
                OpenAIClient::new(key)
                    .with_model(settings.llm.model.clone())
                    .with_base_url(settings.base_url())
                    .with_temperature(settings.llm.temperature)
                    .with_max_tokens(settings.llm.max_tokens),
            ) as Box<dyn LlmClient>
        });

        Self {
            client,
            history_window: settings.llm.history_window,
            latency: settings.simulation.latency,
        }
    }

    /// Local replies only.
    pub fn offline() -> Self {
        Self {
            client: None,
            history_window: defaults::HISTORY_WINDOW,
            latency: true,
        }
    }

    pub fn with_client(mut self, client: Box<dyn LlmClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_latency(mut self, latency: bool) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn is_remote(&self) -> bool {
        self.client.is_some()
    }

    /// Produce a reply. Never fails: remote errors fall back to the local
    /// simulation.
    pub async fn generate_reply(
        &self,
        user_text: &str,
        history: &[Message],
        profile: &Profile,
        style: MentorStyle,
    ) -> String {
        if let Some(client) = &self.client {
            let messages = self.build_messages(user_text, history, profile, style);
            match remote_reply(client.as_ref(), &messages).await {
                Ok(text) => return text,
                Err(e) => tracing::warn!("AI request failed, using local reply: {}", e),
            }
            return simulate_reply(user_text, profile, style).text;
        }

        if self.latency {
            tokio::time::sleep(simulated_delay(user_text)).await;
        }
        simulate_reply(user_text, profile, style).text
    }

    /// System persona, profile summary, the last `history_window` messages and
    /// the new user message.
    pub fn build_messages(
        &self,
        user_text: &str,
        history: &[Message],
        profile: &Profile,
        style: MentorStyle,
    ) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(system_prompt(style))];

        match serde_json::to_string(profile) {
            Ok(json) => messages.push(ChatMessage::system(format!("Profile: {json}"))),
            Err(e) => tracing::warn!("Could not serialize profile: {}", e),
        }

        let start = history.len().saturating_sub(self.history_window);
        messages.extend(history[start..].iter().map(|m| match m.role {
            Role::User => ChatMessage::user(m.text.clone()),
            Role::Assistant => ChatMessage::assistant(m.text.clone()),
        }));

        messages.push(ChatMessage::user(user_text));
        messages
    }
}

#[async_trait::async_trait]
impl MentorReplier for ReplyGenerator {
    async fn reply(&self, request: ReplyRequest<'_>) -> Result<String, MentorError> {
        Ok(self
            .generate_reply(
                request.user_text,
                request.history,
                request.profile,
                request.style,
            )
            .await)
    }
}

async fn remote_reply(client: &dyn LlmClient, messages: &[ChatMessage]) -> Result<String, MentorError> {
    let response = client.chat(messages).await?;
    let text = response.content.trim();
    if text.is_empty() {
        return Err(MentorError::Llm("Empty completion".into()));
    }
    if let Some(usage) = response.usage {
        tracing::debug!(
            "Completion used {} prompt / {} completion tokens",
            usage.input_tokens,
            usage.output_tokens
        );
    }
    Ok(text.to_string())
}

fn system_prompt(style: MentorStyle) -> String {
    format!(
        "You are a startup mentor assistant. Tone: {style}. Use profile and recent history to provide actionable, concise guidance. If asked, offer templates for emails or pitch decks. Be polite and constructive."
    )
}

/// Pseudo thinking time for local replies, 400..1200 ms.
pub fn simulated_delay(user_text: &str) -> Duration {
    let spread = i64::from(hash_code(user_text)).unsigned_abs() % limits::SIMULATED_DELAY_SPREAD_MS;
    Duration::from_millis(limits::SIMULATED_DELAY_BASE_MS + spread)
}
