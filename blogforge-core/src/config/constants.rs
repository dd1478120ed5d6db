/// Model ID constants for the supported providers
pub mod models {
    pub mod deepseek {
        pub const DEFAULT_MODEL: &str = DEEPSEEK_CHAT;
        pub const SUPPORTED_MODELS: &[&str] = &[DEEPSEEK_CHAT, DEEPSEEK_REASONER];

        pub const DEEPSEEK_CHAT: &str = "deepseek-chat";
        pub const DEEPSEEK_REASONER: &str = "deepseek-reasoner";
    }
}

/// Model validation and helper functions
pub mod model_helpers {
    use super::models;

    /// Get supported models for a provider
    pub fn supported_for(provider: &str) -> Option<&'static [&'static str]> {
        match provider {
            "deepseek" => Some(models::deepseek::SUPPORTED_MODELS),
            _ => None,
        }
    }

}

/// Default configuration values
pub mod defaults {
    use super::models;

    pub const DEFAULT_PROVIDER: &str = "deepseek";
    pub const DEFAULT_MODEL: &str = models::deepseek::DEFAULT_MODEL;
    pub const DEFAULT_API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
    pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
}

/// Sampling temperatures per pipeline stage
pub mod temperatures {
    pub const OUTLINE: f32 = 0.7;
    pub const DRAFT: f32 = 0.8;
    pub const ENHANCEMENT: f32 = 0.6;
    pub const SUMMARY: f32 = 0.5;
    pub const DIRECT: f32 = 0.7;

    /// Inclusive range accepted by OpenAI-compatible chat endpoints
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 2.0;
}

/// Bounds on requested article length, in words
pub mod lengths {
    pub const MIN_WORDS: u32 = 300;
    pub const MAX_WORDS: u32 = 2000;
    pub const DEFAULT_WORDS: u32 = 800;
}

/// URL constants for API endpoints
pub mod urls {
    pub const DEEPSEEK_API_BASE: &str = "https://api.deepseek.com/v1";
}

/// Message role constants to avoid hardcoding strings
pub mod message_roles {
    pub const USER: &str = "user";
}

/// Configuration file locations
pub mod paths {
    pub const CONFIG_FILE_NAME: &str = "blogforge.toml";
    pub const CONFIG_DIR_NAME: &str = ".blogforge";
}
