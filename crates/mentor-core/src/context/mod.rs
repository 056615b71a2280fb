mod conversation;
mod profile;
pub mod persistence;

pub use conversation::{generate_id, timestamp, Conversation, Message, Role};
pub use profile::{Profile, TopicPrefs};
pub use persistence::{ConversationStore, Stats, StoreEvent};
