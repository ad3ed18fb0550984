//! Configuration for a load session.

/// Configuration for a load session.
///
/// Controls strictness, message retention, and edit tracing.
#[derive(Clone, Debug)]
pub struct LoadConfig {
    /// Make `finish` fail when any warning or error was recorded.
    pub strict: bool,

    /// Maximum number of retained load messages; later ones are counted only.
    pub message_limit: usize,

    /// Log every committed edit at trace level.
    pub trace_edits: bool,

    /// Accept a second definition of an already defined entity silently.
    pub allow_duplicate_definitions: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            strict: false,
            message_limit: 1_000,
            trace_edits: false,
            allow_duplicate_definitions: false,
        }
    }
}

impl LoadConfig {
    /// Creates a configuration that rejects any load with problems.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Builder method to set strictness.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builder method to set the message limit.
    #[must_use]
    pub fn with_message_limit(mut self, limit: usize) -> Self {
        self.message_limit = limit;
        self
    }

    /// Builder method to enable/disable edit tracing.
    #[must_use]
    pub fn with_trace_edits(mut self, trace: bool) -> Self {
        self.trace_edits = trace;
        self
    }

    /// Builder method to allow duplicate definitions.
    #[must_use]
    pub fn with_allow_duplicate_definitions(mut self, allow: bool) -> Self {
        self.allow_duplicate_definitions = allow;
        self
    }
}
