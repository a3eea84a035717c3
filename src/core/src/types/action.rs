//! Action selectors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque tag naming the action being authorized (edit, delete, ...).
///
/// The current decision policy does not discriminate between selectors: a
/// standing grant covers every action. The selector is carried through the
/// decision contract so a per-action policy table can be added without
/// changing the query surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionSelector {
    /// Action name (edit, delete, etc.)
    pub name: String,
}

impl ActionSelector {
    /// Create a new action selector
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Selector for edit actions
    pub fn edit() -> Self {
        Self::new("edit")
    }

    /// Selector for delete actions
    pub fn delete() -> Self {
        Self::new("delete")
    }
}

impl fmt::Display for ActionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_selector() {
        let edit = ActionSelector::edit();
        assert_eq!(edit.name, "edit");
        assert_eq!(edit, ActionSelector::new("edit"));
        assert_ne!(edit, ActionSelector::delete());
    }
}
