use std::error::Error as StdError;
use std::fmt::Display;

use twilight_model::id::ChannelId;

use crate::core::Severity;

/// A single logging call, borrowed from the caller for as long as it takes to dispatch it.
#[derive(Clone, Copy)]
pub struct LogRequest<'a> {
    pub message: &'a str,
    pub arguments: &'a [&'a dyn Display],
    pub severity: Severity,
    /// Overrides the configured channel, `None` uses the configured one.
    pub channel_id: Option<ChannelId>,
    pub cause: Option<&'a dyn StdError>,
}

impl<'a> LogRequest<'a> {
    pub fn new(severity: Severity, message: &'a str) -> Self {
        LogRequest {
            message,
            arguments: &[],
            severity,
            channel_id: None,
            cause: None,
        }
    }

    pub fn arguments(mut self, arguments: &'a [&'a dyn Display]) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn channel(mut self, channel_id: impl Into<Option<ChannelId>>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn cause(mut self, cause: Option<&'a dyn StdError>) -> Self {
        self.cause = cause;
        self
    }
}
