pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod llm;
pub mod mentor;
pub mod session;
pub mod storage;

// Re-export key types
pub use config::Settings;
pub use context::{Conversation, ConversationStore, Message, Profile, Role, Stats, StoreEvent};
pub use error::{MentorError, Result};
pub use llm::{ChatMessage, ChatRole, LlmClient, LlmResponse, OpenAIClient};
pub use mentor::{Intent, MentorReplier, MentorStyle, ReplyGenerator, ReplyRequest};
pub use session::MentorSession;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
