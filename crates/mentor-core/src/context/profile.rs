use serde::{Deserialize, Serialize};

/// The founder's self-description. There is only ever one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Profile {
    pub fullname: String,
    pub email: String,
    pub role: String,
    pub startup: String,
    pub stage: String,
    pub industry: String,
    pub description: String,
    pub prefs: TopicPrefs,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TopicPrefs {
    pub funding: bool,
    pub marketing: bool,
    pub legal: bool,
    pub ops: bool,
}

impl Profile {
    /// First word of the full name, or the startup name.
    pub fn display_name(&self) -> Option<&str> {
        if let Some(first) = self.fullname.split_whitespace().next() {
            return Some(first);
        }
        let startup = self.startup.trim();
        (!startup.is_empty()).then_some(startup)
    }

    pub fn stage(&self) -> Option<&str> {
        let stage = self.stage.trim();
        (!stage.is_empty()).then_some(stage)
    }

    /// Set a field by its form name. Returns false for unknown fields.
    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        let value = value.trim();
        let flag = matches!(value, "true" | "yes" | "on" | "1");
        match field {
            "fullname" | "name" => self.fullname = value.to_string(),
            "email" => self.email = value.to_string(),
            "role" => self.role = value.to_string(),
            "startup" => self.startup = value.to_string(),
            "stage" => self.stage = value.to_string(),
            "industry" => self.industry = value.to_string(),
            "description" => self.description = value.to_string(),
            "pref-funding" => self.prefs.funding = flag,
            "pref-marketing" => self.prefs.marketing = flag,
            "pref-legal" => self.prefs.legal = flag,
            "pref-ops" => self.prefs.ops = flag,
            _ => return false,
        }
        true
    }
}
