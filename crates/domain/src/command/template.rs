use serde::{Deserialize, Serialize};

use super::error::DispatchError;

/// Token substituted with the selected field value.
pub const VALUE_PLACEHOLDER: &str = "[[value]]";

/// An external command template, parsed into a program and an argument
/// vector at load time.
///
/// The field value is substituted into a single argument and handed to the
/// process verbatim — it is never re-tokenized or passed through a shell,
/// so a hostile value cannot alter command semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandTemplate {
    program: String,
    args: Vec<String>,
}

impl CommandTemplate {
    /// Parse a raw template like `whois [[value]]` or
    /// `lookup.sh --query=[[value]] --json`.
    ///
    /// The placeholder may appear at most once, and never in the program
    /// position. A template without a placeholder is valid; substitution is
    /// then a no-op.
    pub fn parse(raw: &str) -> Result<Self, DispatchError> {
        let invalid = |reason: &str| DispatchError::InvalidTemplate {
            raw: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = raw.split_whitespace().map(ToString::to_string);
        let program = parts.next().ok_or_else(|| invalid("template is empty"))?;
        let args: Vec<String> = parts.collect();

        if program.contains(VALUE_PLACEHOLDER) {
            return Err(invalid("placeholder may not be the program"));
        }
        if raw.matches(VALUE_PLACEHOLDER).count() > 1 {
            return Err(invalid("placeholder may appear at most once"));
        }

        Ok(Self { program, args })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn has_placeholder(&self) -> bool {
        self.args.iter().any(|a| a.contains(VALUE_PLACEHOLDER))
    }

    /// Produce the argument vector with the value substituted in.
    /// The value lands inside exactly one argument (or none, for a
    /// placeholder-free template) and is never split further.
    pub fn substitute(&self, value: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.replace(VALUE_PLACEHOLDER, value))
            .collect()
    }

    /// Human-readable rendition of the substituted invocation, for display
    /// and audit logs only — execution always uses the argument vector.
    pub fn rendered(&self, value: &str) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.substitute(value));
        parts.join(" ")
    }
}

/// A URL template for lookup links. The value is percent-encoded before
/// substitution so it cannot break out of the URL component it lands in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkTemplate {
    raw: String,
}

impl LinkTemplate {
    pub fn parse(raw: &str) -> Result<Self, DispatchError> {
        let invalid = |reason: &str| DispatchError::InvalidTemplate {
            raw: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.trim().is_empty() {
            return Err(invalid("link is empty"));
        }
        if raw.matches(VALUE_PLACEHOLDER).count() > 1 {
            return Err(invalid("placeholder may appear at most once"));
        }

        Ok(Self {
            raw: raw.trim().to_string(),
        })
    }

    pub fn has_placeholder(&self) -> bool {
        self.raw.contains(VALUE_PLACEHOLDER)
    }

    /// Substitute the percent-encoded value into the URL.
    pub fn substitute(&self, value: &str) -> String {
        self.raw
            .replace(VALUE_PLACEHOLDER, &urlencoding::encode(value))
    }
}
