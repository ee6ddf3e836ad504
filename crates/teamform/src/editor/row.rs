//! Row types of a bounded list editor.

use std::fmt;

use crate::field::{EntryLabels, FieldKind};

/// Stable handle of an entry row.
///
/// A handle survives renumbering: it names the row, not its slot. Event
/// handlers hold a `RowId` and resolve the row's current position when they
/// fire, so nothing needs rewiring after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub(crate) u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One data-bearing row of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: RowId,
    position: usize,
    value: String,
    labels: EntryLabels,
}

impl Entry {
    pub(crate) fn new(id: RowId, kind: FieldKind, position: usize) -> Self {
        Self {
            id,
            position,
            value: String::new(),
            labels: EntryLabels::for_position(kind, position),
        }
    }

    /// Stable handle of this row.
    #[must_use]
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Current 1-based position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Text entered by the user.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Identifiers rendered for this row.
    #[must_use]
    pub fn labels(&self) -> &EntryLabels {
        &self.labels
    }

    /// Consume the entry, returning its value.
    #[must_use]
    pub fn into_value(self) -> String {
        self.value
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }

    pub(crate) fn relabel(&mut self, kind: FieldKind, position: usize) {
        self.position = position;
        self.labels = EntryLabels::for_position(kind, position);
    }
}

/// A rendered row: an entry, or the trailing add control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row<'a> {
    /// A data-bearing entry with its remove control.
    Entry(&'a Entry),
    /// The add control; never carries data.
    AddControl,
}

impl Row<'_> {
    /// Check if this is the add control.
    #[must_use]
    pub fn is_add_control(&self) -> bool {
        matches!(self, Self::AddControl)
    }
}
