//! Deployment-time settings, read from the environment at startup.
//! There is no runtime config file.

pub const APP_NAME_VAR: &str = "PLAYGROUND_APP_NAME";
pub const API_BASE_VAR: &str = "PLAYGROUND_API_BASE_URL";
pub const ACCOUNT_VAR: &str = "PLAYGROUND_ACCOUNT";

const DEFAULT_APP_NAME: &str = "AI Playground";
const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Display title shown in the window header.
    pub app_name: String,
    /// Base URL the three skill endpoints are resolved against.
    pub api_base_url: String,
    /// Account label the stand-in identity provider reports on sign-in.
    pub account: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            app_name: non_empty(APP_NAME_VAR).unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            api_base_url: non_empty(API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            account: non_empty(ACCOUNT_VAR),
        }
    }
}
