/// Mentor Chat: centralized constants.
/// Storage keys, limits and literal texts live here.

// ─── Storage Keys ─────────────────────────────────────────────────────────────

pub mod keys {
    pub const SAVED_CHATS: &str = "smp_chats_v1";
    pub const STYLE: &str = "smp_style_v1";
    pub const PROFILE: &str = "smp_profile_v1";
    pub const CURRENT: &str = "smp_current_v1";

    /// Credential records, checked in order. Read-only for the engine.
    pub const CREDENTIALS: &[&str] = &["OPENAI_API_KEY", "smp_openai_key"];
}

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
}

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
}

// ─── Default Settings ─────────────────────────────────────────────────────────

pub mod defaults {
    pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
    pub const TEMPERATURE: f32 = 0.6;
    pub const MAX_TOKENS: u32 = 600;
    pub const HISTORY_WINDOW: usize = 6;
    pub const CONVERSATION_NAME: &str = "Untitled";
}

// ─── Limits ───────────────────────────────────────────────────────────────────

pub mod limits {
    pub const SAVED_CONVERSATIONS_CAP: usize = 50;
    pub const RECENT_LIST_LEN: usize = 5;
    pub const SIMULATED_DELAY_BASE_MS: u64 = 400;
    pub const SIMULATED_DELAY_SPREAD_MS: u64 = 800;
}

// ─── Literal Texts ────────────────────────────────────────────────────────────

pub mod texts {
    pub const APOLOGY: &str = "I'm having trouble responding. Please try again.";
    pub const NEXT_STEPS_HEADER: &str = "Suggested next steps:";
}

// ─── Config Paths ─────────────────────────────────────────────────────────────

pub mod paths {
    pub const CONFIG_DIR: &str = "mentor-chat";
    pub const CONFIG_FILE: &str = "config.toml";
    pub const DATA_DIR: &str = "mentor-chat";
}
