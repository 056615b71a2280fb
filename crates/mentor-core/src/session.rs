use crate::constants::texts;
use crate::context::{ConversationStore, Message, Role, StoreEvent};
use crate::error::MentorError;
use crate::mentor::{MentorReplier, ReplyRequest};

/// The send-message flow: persist the user's text, generate a reply, persist
/// the reply. One request at a time.
pub struct MentorSession {
    store: ConversationStore,
    replier: Box<dyn MentorReplier>,
}

impl MentorSession {
    pub fn new(store: ConversationStore, replier: Box<dyn MentorReplier>) -> Self {
        Self { store, replier }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConversationStore {
        &mut self.store
    }

    pub fn into_store(self) -> ConversationStore {
        self.store
    }

    /// Send `text` to the mentor. Blank input is ignored and returns `None`.
    ///
    /// The user message is persisted before generation starts, so it survives
    /// a failed reply; a failing replier yields the apology text instead.
    pub async fn send(&mut self, text: &str) -> Result<Option<Message>, MentorError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let history = self.store.current().messages.clone();
        self.store.append_message(Role::User, text)?;
        self.store.emit(StoreEvent::ReplyPending);

        let request = ReplyRequest {
            user_text: text,
            history: &history,
            profile: self.store.profile(),
            style: self.store.style(),
        };
        let reply = match self.replier.reply(request).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                tracing::warn!("Mentor returned an empty reply");
                texts::APOLOGY.to_string()
            }
            Err(e) => {
                tracing::error!("Mentor AI error: {}", e);
                texts::APOLOGY.to_string()
            }
        };

        self.store.emit(StoreEvent::ReplySettled);
        self.store.append_message(Role::Assistant, reply).map(Some)
    }
}
