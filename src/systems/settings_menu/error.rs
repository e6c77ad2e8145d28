use super::{defs::EntryId, navigation::NavigationMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    UnknownProviderKind(String),
    DuplicateEntry(EntryId),
    EmptyEntryId,
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownProviderKind(kind) => {
                write!(f, "settings entry kind `{kind}` does not exist")
            }
            Self::DuplicateEntry(id) => write!(f, "settings entry `{id}` is already registered"),
            Self::EmptyEntryId => write!(f, "settings entry id must not be empty"),
        }
    }
}

impl std::error::Error for ConfigurationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    TransitionInFlight(NavigationMode),
    UnknownEntry(EntryId),
}

impl std::fmt::Display for NavigationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransitionInFlight(mode) => {
                write!(f, "navigation request refused while in {mode:?}")
            }
            Self::UnknownEntry(id) => write!(f, "no settings entry named `{id}`"),
        }
    }
}

impl std::error::Error for NavigationError {}
