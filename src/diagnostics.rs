use log::{error, warn};

/// Receives the diagnostics emitted while converting a message.
///
/// `warning` is used when a default gets substituted for a missing field,
/// `alert` when a conversion fails.
pub trait Diagnostics: Send + Sync {
    fn warning(&self, message: &str);

    fn alert(&self, message: &str);
}

/// Forwards diagnostics to the [`log`] facade.
#[derive(Debug, Clone)]
pub struct LogDiagnostics {
    target: String,
}

impl Default for LogDiagnostics {
    fn default() -> Self {
        Self::new(module_path!())
    }
}

impl LogDiagnostics {
    pub fn new<T: Into<String>>(target: T) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Diagnostics for LogDiagnostics {
    fn warning(&self, message: &str) {
        warn!(target: self.target.as_str(), "{}", message)
    }

    fn alert(&self, message: &str) {
        error!(target: self.target.as_str(), "{}", message)
    }
}
