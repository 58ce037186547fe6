#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{ErrorKind, Result},
    failed,
};

pub const DEFAULT_SENDER_NAME: &str = "No Reply";

fn default_sender_name() -> String {
    DEFAULT_SENDER_NAME.to_string()
}

fn default_save_to_sent_items() -> bool {
    true
}

/// Settings for a [`MessageConverter`](crate::MessageConverter).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Sender used when a message has no From address.
    fallback_from: String,
    /// Display name that goes with `fallback_from`.
    #[cfg_attr(feature = "serde", serde(default = "default_sender_name"))]
    fallback_name: String,
    /// Run html bodies through the sanitizer before converting them.
    #[cfg_attr(feature = "serde", serde(default))]
    sanitize_html: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_save_to_sent_items"))]
    save_to_sent_items: bool,
}

impl Config {
    pub fn new<F: Into<String>>(fallback_from: F) -> Result<Self> {
        let config = Self {
            fallback_from: fallback_from.into(),
            fallback_name: default_sender_name(),
            sanitize_html: false,
            save_to_sent_items: default_save_to_sent_items(),
        };

        config.validate()?;

        Ok(config)
    }

    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = crate::parse::json::from_json(json)?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !validator::validate_email(self.fallback_from.as_str()) {
            failed!(
                ErrorKind::InvalidConfig,
                "Fallback sender '{}' is not a valid email address",
                self.fallback_from
            );
        }

        Ok(())
    }

    pub fn with_fallback_name<N: Into<String>>(mut self, name: N) -> Self {
        self.fallback_name = name.into();

        self
    }

    pub fn with_sanitize_html(mut self, sanitize_html: bool) -> Self {
        self.sanitize_html = sanitize_html;

        self
    }

    pub fn with_save_to_sent_items(mut self, save_to_sent_items: bool) -> Self {
        self.save_to_sent_items = save_to_sent_items;

        self
    }

    pub fn fallback_from(&self) -> &str {
        &self.fallback_from
    }

    pub fn fallback_name(&self) -> &str {
        &self.fallback_name
    }

    pub fn sanitize_html(&self) -> bool {
        self.sanitize_html
    }

    pub fn save_to_sent_items(&self) -> bool {
        self.save_to_sent_items
    }
}
