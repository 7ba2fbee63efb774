//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Serve the chat page at `/chat/ui`
    #[serde(default = "default_enable_chat_ui")]
    pub enable_chat_ui: bool,

    /// Show detailed error messages (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_chat_ui: default_enable_chat_ui(),
            verbose_errors: false,
        }
    }
}

fn default_enable_chat_ui() -> bool {
    true
}
