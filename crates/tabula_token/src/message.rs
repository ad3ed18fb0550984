//! Load-session messages.

use std::fmt;

use tabula_foundation::{EntityId, Error, ErrorKind};

/// How serious a load message is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational.
    Info,
    /// Something was skipped or left unresolved; the load continues.
    Warning,
    /// An edit was rejected; the field kept its previous content.
    Error,
}

impl Severity {
    /// The severity an error is reported with.
    #[must_use]
    pub fn of(error: &Error) -> Self {
        match error.kind {
            ErrorKind::ResolutionFailure { .. } | ErrorKind::DeferredTaskFailure { .. } => {
                Self::Warning
            }
            _ => Self::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// One recorded problem (or note) of a load session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadMessage {
    /// Severity.
    pub severity: Severity,
    /// Token involved, if any.
    pub token: Option<String>,
    /// Entity involved, if any.
    pub entity: Option<EntityId>,
    /// The offending raw text, if any.
    pub value: Option<String>,
    /// What happened.
    pub message: String,
}

impl LoadMessage {
    /// Creates a message without token, entity, or value.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            token: None,
            entity: None,
            value: None,
            message: message.into(),
        }
    }

    /// Sets the token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the entity.
    #[must_use]
    pub fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Sets the offending text.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for LoadMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.severity)?;
        if let Some(entity) = self.entity {
            write!(f, "{entity} ")?;
        }
        if let Some(token) = &self.token {
            write!(f, "{token}")?;
            if let Some(value) = &self.value {
                write!(f, ":{value}")?;
            }
            write!(f, " ")?;
        }
        write!(f, "- {}", self.message)
    }
}
