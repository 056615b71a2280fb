use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use super::conversation::{timestamp, Conversation, Message, Role};
use super::profile::Profile;
use crate::constants::{defaults, keys, limits};
use crate::error::MentorError;
use crate::mentor::MentorStyle;
use crate::storage::KeyValueStore;

/// Notifications for whoever renders the store. Emitted after the state
/// change has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    ConversationChanged,
    SavedListChanged,
    ProfileChanged,
    StyleChanged,
    /// A reply is being generated; show a typing indicator.
    ReplyPending,
    /// Generation finished, successfully or not.
    ReplySettled,
}

/// Counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub saved_conversations: usize,
    pub total_messages: usize,
}

/// Owns the saved list, the current conversation, the profile and the style
/// preference, and writes each of them through to a [`KeyValueStore`] on
/// every mutation.
pub struct ConversationStore {
    kv: Box<dyn KeyValueStore>,
    saved: Vec<Conversation>,
    current: Conversation,
    profile: Profile,
    style: MentorStyle,
    subscribers: Vec<UnboundedSender<StoreEvent>>,
}

impl ConversationStore {
    /// Load all records from `kv`. Unreadable or malformed records start out
    /// empty; a fresh conversation is created when none was persisted.
    pub fn open(kv: impl KeyValueStore + 'static) -> Self {
        let kv: Box<dyn KeyValueStore> = Box::new(kv);

        let saved: Vec<Conversation> = load_record(kv.as_ref(), keys::SAVED_CHATS).unwrap_or_default();
        let profile: Profile = load_record(kv.as_ref(), keys::PROFILE).unwrap_or_default();
        let current: Option<Conversation> = load_record(kv.as_ref(), keys::CURRENT);
        let style = match kv.get(keys::STYLE) {
            Ok(Some(raw)) => raw.parse::<MentorStyle>().unwrap_or_default(),
            Ok(None) => MentorStyle::default(),
            Err(e) => {
                tracing::warn!("Resetting {}: {}", keys::STYLE, e);
                MentorStyle::default()
            }
        };

        let fresh = current.is_none();
        let mut store = Self {
            kv,
            saved,
            current: current.unwrap_or_else(|| Conversation::new(None)),
            profile,
            style,
            subscribers: Vec::new(),
        };

        if fresh {
            if let Err(e) = store.persist_current() {
                tracing::warn!("Could not persist initial conversation: {}", e);
            }
        }

        tracing::info!(
            "Opened conversation store: {} saved, current {}",
            store.saved.len(),
            store.current.id
        );
        store
    }

    /// Register an observer. Dropped receivers are pruned on the next event.
    pub fn subscribe(&mut self) -> UnboundedReceiver<StoreEvent> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub(crate) fn emit(&mut self, event: StoreEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    // ── Conversations ───────────────────────────────────────────────────

    pub fn current(&self) -> &Conversation {
        &self.current
    }

    pub fn saved(&self) -> &[Conversation] {
        &self.saved
    }

    pub fn recent(&self, limit: usize) -> &[Conversation] {
        &self.saved[..limit.min(self.saved.len())]
    }

    /// Start a new empty conversation and make it current.
    pub fn create_conversation(&mut self, name: Option<&str>) -> Result<Conversation, MentorError> {
        self.current = Conversation::new(name);
        self.emit(StoreEvent::ConversationChanged);
        self.persist_current()?;
        Ok(self.current.clone())
    }

    pub fn append_message(&mut self, role: Role, text: impl Into<String>) -> Result<Message, MentorError> {
        let message = Message::new(role, text);
        self.current.push(message.clone());
        self.emit(StoreEvent::ConversationChanged);
        self.persist_current()?;
        Ok(message)
    }

    /// Copy the current conversation into the saved list, replacing the entry
    /// with the same id or inserting at the front.
    pub fn commit_current_to_saved_list(&mut self) -> Result<(), MentorError> {
        let snapshot = self.current.clone();
        match self.saved.iter_mut().find(|c| c.id == snapshot.id) {
            Some(entry) => *entry = snapshot,
            None => {
                self.saved.insert(0, snapshot);
                self.saved.truncate(limits::SAVED_CONVERSATIONS_CAP);
            }
        }
        self.emit(StoreEvent::SavedListChanged);

        self.persist_saved()?;
        self.persist_current()
    }

    /// Rename the current conversation, then commit it. A blank name becomes
    /// the placeholder.
    pub fn commit_current_as(&mut self, name: Option<&str>) -> Result<(), MentorError> {
        if let Some(name) = name {
            let name = name.trim();
            self.current.name = if name.is_empty() {
                defaults::CONVERSATION_NAME.to_string()
            } else {
                name.to_string()
            };
        }
        if self.current.created_at.is_empty() {
            self.current.created_at = timestamp();
        }
        self.commit_current_to_saved_list()
    }

    /// Empty the current conversation. Saved copies are left alone.
    pub fn clear_current(&mut self) -> Result<(), MentorError> {
        self.current.reset();
        self.emit(StoreEvent::ConversationChanged);
        self.persist_current()
    }

    /// Make a copy of the saved conversation `id` current. Returns `None` and
    /// leaves the current conversation untouched when `id` is unknown.
    pub fn load_from_saved(&mut self, id: &str) -> Result<Option<Conversation>, MentorError> {
        let Some(found) = self.saved.iter().find(|c| c.id == id).cloned() else {
            tracing::debug!("No saved conversation with id {}", id);
            return Ok(None);
        };

        self.current = found;
        self.emit(StoreEvent::ConversationChanged);
        self.persist_current()?;
        Ok(Some(self.current.clone()))
    }

    // ── Profile & preferences ───────────────────────────────────────────

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn save_profile(&mut self, profile: Profile) -> Result<(), MentorError> {
        self.profile = profile;
        self.emit(StoreEvent::ProfileChanged);
        write_record(self.kv.as_mut(), keys::PROFILE, &self.profile)
    }

    pub fn style(&self) -> MentorStyle {
        self.style
    }

    pub fn set_style(&mut self, style: MentorStyle) -> Result<(), MentorError> {
        self.style = style;
        self.emit(StoreEvent::StyleChanged);
        self.kv.set(keys::STYLE, style.as_str())
    }

    /// The externally provisioned API key, if any.
    pub fn credential(&self) -> Option<String> {
        keys::CREDENTIALS.iter().find_map(|key| match self.kv.get(key) {
            Ok(Some(value)) if !value.trim().is_empty() => Some(value.trim().to_string()),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Could not read credential record {}: {}", key, e);
                None
            }
        })
    }

    pub fn stats(&self) -> Stats {
        let saved_messages: usize = self.saved.iter().map(Conversation::len).sum();
        Stats {
            saved_conversations: self.saved.len(),
            total_messages: saved_messages + self.current.len(),
        }
    }

    // ── Persistence ─────────────────────────────────────────────────────

    fn persist_current(&mut self) -> Result<(), MentorError> {
        write_record(self.kv.as_mut(), keys::CURRENT, &self.current)
    }

    fn persist_saved(&mut self) -> Result<(), MentorError> {
        write_record(self.kv.as_mut(), keys::SAVED_CHATS, &self.saved)
    }
}

fn load_record<T: DeserializeOwned>(kv: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Resetting {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Resetting {}: failed to parse record: {}", key, e);
            None
        }
    }
}

fn write_record<T: Serialize + ?Sized>(
    kv: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), MentorError> {
    let contents = serde_json::to_string(value)
        .map_err(|e| MentorError::storage(key, format!("Failed to serialize record: {}", e)))?;
    kv.set(key, &contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn open_creates_and_persists_untitled_conversation() {
        let store = ConversationStore::open(MemoryStore::new());
        assert_eq!(store.current().name, "Untitled");
        assert!(store.current().is_empty());
        assert!(store.saved().is_empty());
        assert_eq!(store.style(), MentorStyle::Balanced);
    }

    #[test]
    fn malformed_records_reset_to_defaults() {
        let kv = MemoryStore::new()
            .with_entry(keys::SAVED_CHATS, "{not json")
            .with_entry(keys::PROFILE, "[1,2,3]")
            .with_entry(keys::CURRENT, "null")
            .with_entry(keys::STYLE, "shouty");
        let store = ConversationStore::open(kv);

        assert!(store.saved().is_empty());
        assert_eq!(store.profile(), &Profile::default());
        assert_eq!(store.current().name, "Untitled");
        assert_eq!(store.style(), MentorStyle::Balanced);
    }

    #[test]
    fn commit_replaces_existing_entry_in_place() {
        let mut store = ConversationStore::open(MemoryStore::new());
        store.commit_current_to_saved_list().unwrap();
        store.create_conversation(Some("Second")).unwrap();
        store.commit_current_to_saved_list().unwrap();

        let first_id = store.saved()[1].id.clone();
        store.load_from_saved(&first_id).unwrap();
        store.append_message(Role::User, "edited").unwrap();
        store.commit_current_to_saved_list().unwrap();

        assert_eq!(store.saved().len(), 2);
        assert_eq!(store.saved()[1].id, first_id);
        assert_eq!(store.saved()[1].messages.len(), 1);
    }

    #[test]
    fn commit_as_blank_name_uses_placeholder() {
        let mut store = ConversationStore::open(MemoryStore::new());
        store.commit_current_as(Some("  ")).unwrap();
        assert_eq!(store.saved()[0].name, "Untitled");

        store.commit_current_as(Some(" Series A prep ")).unwrap();
        assert_eq!(store.saved()[0].name, "Series A prep");
        assert_eq!(store.saved().len(), 1);
    }

    #[test]
    fn stats_count_saved_and_current_messages() {
        let mut store = ConversationStore::open(MemoryStore::new());
        store.append_message(Role::User, "a").unwrap();
        store.append_message(Role::Assistant, "b").unwrap();
        store.commit_current_to_saved_list().unwrap();
        store.append_message(Role::User, "c").unwrap();

        let stats = store.stats();
        assert_eq!(stats.saved_conversations, 1);
        assert_eq!(stats.total_messages, 5);
    }

    #[test]
    fn credential_is_read_in_key_order() {
        let kv = MemoryStore::new()
            .with_entry("smp_openai_key", "sk-second")
            .with_entry("OPENAI_API_KEY", "  ");
        let store = ConversationStore::open(kv);
        assert_eq!(store.credential().as_deref(), Some("sk-second"));
    }

    #[test]
    fn subscribers_see_events_and_closed_ones_are_pruned() {
        let mut store = ConversationStore::open(MemoryStore::new());
        let mut rx = store.subscribe();
        let dropped = store.subscribe();
        drop(dropped);

        store.append_message(Role::User, "hello").unwrap();
        store.commit_current_to_saved_list().unwrap();

        assert_eq!(rx.try_recv().unwrap(), StoreEvent::ConversationChanged);
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::SavedListChanged);
        assert!(rx.try_recv().is_err());
        assert_eq!(store.subscribers.len(), 1);
    }
}
