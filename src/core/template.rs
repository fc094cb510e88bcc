use std::borrow::Cow;

use chrono::Utc;

use crate::core::Severity;
use crate::Error;

pub const DEFAULT_MESSAGE_TEMPLATE: &str = "<t:{timestamp}:F> **{displayName}**\n```{codeBlock}\n{messagePrefix}{message}\n```\n";

/// Discord refuses message content longer than this many characters.
pub const CONTENT_LIMIT: usize = 2000;
const TRUNCATION_MARKER: &str = " [...]";

const TIMESTAMP: &str = "timestamp";
const DISPLAY_NAME: &str = "displayName";
const CODE_BLOCK: &str = "codeBlock";
const MESSAGE_PREFIX: &str = "messagePrefix";
const MESSAGE: &str = "message";

/// The presentation pattern a message is rendered into before it goes out to Discord.
///
/// Tokens are written as `{name}`, recognized are `{timestamp}`, `{displayName}`, `{codeBlock}`,
/// `{messagePrefix}` and `{message}`. Anything else between braces is copied as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pattern: Cow<'static, str>,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        MessageTemplate {
            pattern: Cow::Borrowed(DEFAULT_MESSAGE_TEMPLATE),
        }
    }
}

impl MessageTemplate {
    /// A custom pattern, it has to at least place the timestamp and the message.
    pub fn custom(pattern: impl Into<String>) -> Result<Self, Error> {
        let pattern = pattern.into();
        if !pattern.contains("{timestamp}") || !pattern.contains("{message}") {
            return Err(Error::InvalidTemplate(pattern));
        }

        Ok(MessageTemplate {
            pattern: Cow::Owned(pattern),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_default(&self) -> bool {
        self.pattern == DEFAULT_MESSAGE_TEMPLATE
    }

    pub fn render(&self, severity: Severity, message: &str) -> String {
        self.render_at(severity, message, Utc::now().timestamp())
    }

    /// Renders against a fixed unix timestamp (in seconds).
    pub fn render_at(&self, severity: Severity, message: &str, timestamp: i64) -> String {
        // discord's <t:...> markup wants the plain 10 digit seconds value
        let timestamp = format!("{:010}", timestamp);

        let mut out = String::with_capacity(self.pattern.len() + message.len() + 16);
        let mut rest: &str = &self.pattern;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let token = after.find('}').map(|close| (&after[..close], close));
            let replacement = match token {
                Some((TIMESTAMP, _)) => Some(timestamp.as_str()),
                Some((DISPLAY_NAME, _)) => Some(severity.display_name()),
                Some((CODE_BLOCK, _)) => Some(severity.code_block()),
                Some((MESSAGE_PREFIX, _)) => Some(severity.message_prefix()),
                Some((MESSAGE, _)) => Some(message),
                _ => None,
            };

            match (replacement, token) {
                (Some(value), Some((_, close))) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }

    /// Renders like [`render_at`](Self::render_at) but cuts the message body short, marked with
    /// `[...]`, when the result would not fit in `limit` characters. Returns if anything was cut.
    pub fn render_within(&self, severity: Severity, message: &str, timestamp: i64, limit: usize) -> (String, bool) {
        let rendered = self.render_at(severity, message, timestamp);
        if rendered.chars().count() <= limit {
            return (rendered, false);
        }

        let layout = self.render_at(severity, "", timestamp).chars().count();
        let copies = self.pattern.matches("{message}").count().max(1);
        let keep = (limit.saturating_sub(layout) / copies).saturating_sub(TRUNCATION_MARKER.len());

        let mut body: String = message.chars().take(keep).collect();
        body.push_str(TRUNCATION_MARKER);

        let rendered = self.render_at(severity, &body, timestamp);
        if rendered.chars().count() <= limit {
            (rendered, true)
        } else {
            // the layout alone is already too long
            (rendered.chars().take(limit).collect(), true)
        }
    }
}
