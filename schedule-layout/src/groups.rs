use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::RawEvent;

const DEFAULT_GROUP: &str = "M2";

/// Distinct group identifiers in the feed, sorted.
pub fn unique_groups(events: &[RawEvent]) -> Vec<String> {
    events
        .iter()
        .map(|event| event.group.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// The groups whose events are shown, in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GroupSelection(Vec<String>);

impl Default for GroupSelection {
    fn default() -> Self {
        Self(vec![DEFAULT_GROUP.to_string()])
    }
}

impl GroupSelection {
    #[must_use]
    pub fn none() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn contains(&self, group: &str) -> bool {
        self.0.iter().any(|selected| selected == group)
    }

    /// Deselects `group` if selected, otherwise appends it.
    pub fn toggle(&mut self, group: &str) {
        if self.contains(group) {
            self.0.retain(|selected| selected != group);
        } else {
            self.0.push(group.to_string());
        }
    }

    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for GroupSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::none();
        for group in iter {
            let group = group.into();
            if !selection.contains(&group) {
                selection.0.push(group);
            }
        }
        selection
    }
}
