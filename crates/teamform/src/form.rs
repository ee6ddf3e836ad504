//! The team form: two independent list editors plus scalar fields.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config::Config;
use crate::editor::{BoundedListEditor, RowId};
use crate::error::{Error, Result};
use crate::field::FieldKind;
use crate::submission::{FormData, Team};

/// A single-valued field of the team form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    /// Team name (required).
    Name,
    /// Team status.
    Status,
    /// Team description.
    Description,
    /// Logo URL.
    Logo,
}

impl ScalarField {
    /// All scalar fields in form order.
    pub const ALL: [ScalarField; 4] = [
        ScalarField::Name,
        ScalarField::Status,
        ScalarField::Description,
        ScalarField::Logo,
    ];

    /// Form-field name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Status => "status",
            Self::Description => "description",
            Self::Logo => "logo",
        }
    }
}

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| Error::InvalidFieldName {
                name: s.to_string(),
            })
    }
}

/// A user interaction with the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Click on a list's add control.
    Add(FieldKind),
    /// Click on the remove control of the entry at a position.
    Remove {
        /// The list.
        kind: FieldKind,
        /// Current position of the entry.
        position: usize,
    },
    /// Click on the remove control bound to a row handle.
    ///
    /// The handle is resolved to the row's current position when applied,
    /// so it stays valid across earlier removals.
    RemoveRow {
        /// The list.
        kind: FieldKind,
        /// Handle returned when the row was added.
        row: RowId,
    },
    /// Type into a list entry.
    SetEntry {
        /// The list.
        kind: FieldKind,
        /// Current position of the entry.
        position: usize,
        /// New text.
        value: String,
    },
    /// Type into the list entry behind a row handle.
    SetRow {
        /// The list.
        kind: FieldKind,
        /// Handle of the row.
        row: RowId,
        /// New text.
        value: String,
    },
    /// Type into a scalar field.
    SetField(ScalarField, String),
}

/// What an action changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A row was added at the given position.
    Added {
        /// Handle of the new row.
        row: RowId,
        /// Its position.
        position: usize,
    },
    /// A row was removed.
    Removed {
        /// Handle of the removed row.
        row: RowId,
    },
    /// A value was updated.
    Updated,
}

/// The team creation form.
#[derive(Debug, Clone)]
pub struct TeamForm {
    config: Config,
    name: String,
    status: String,
    description: String,
    logo: String,
    members: BoundedListEditor,
    links: BoundedListEditor,
}

impl TeamForm {
    /// Create a freshly mounted form: blank fields, one entry per list.
    ///
    /// # Errors
    ///
    /// Returns an error if either list configuration is invalid.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            name: String::new(),
            status: String::new(),
            description: String::new(),
            logo: String::new(),
            members: BoundedListEditor::new(FieldKind::Member, &config.members)?,
            links: BoundedListEditor::new(FieldKind::Link, &config.links)?,
        })
    }

    /// The editor of the given list.
    #[must_use]
    pub fn editor(&self, kind: FieldKind) -> &BoundedListEditor {
        match kind {
            FieldKind::Member => &self.members,
            FieldKind::Link => &self.links,
        }
    }

    /// The editor of the given list, mutably.
    pub fn editor_mut(&mut self, kind: FieldKind) -> &mut BoundedListEditor {
        match kind {
            FieldKind::Member => &mut self.members,
            FieldKind::Link => &mut self.links,
        }
    }

    /// Current value of a scalar field.
    #[must_use]
    pub fn field(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::Name => &self.name,
            ScalarField::Status => &self.status,
            ScalarField::Description => &self.description,
            ScalarField::Logo => &self.logo,
        }
    }

    /// Set a scalar field.
    pub fn set_field(&mut self, field: ScalarField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ScalarField::Name => self.name = value,
            ScalarField::Status => self.status = value,
            ScalarField::Description => self.description = value,
            ScalarField::Logo => self.logo = value,
        }
    }

    /// Dispatch a user interaction to the editor or field it targets.
    ///
    /// # Errors
    ///
    /// Returns the editor's invariant violation if the action addresses a
    /// full list, an absent position or a row that is gone.
    pub fn apply(&mut self, action: FormAction) -> Result<ActionOutcome> {
        debug!(?action, "Applying form action");
        match action {
            FormAction::Add(kind) => {
                let editor = self.editor_mut(kind);
                let row = editor.add_entry()?;
                Ok(ActionOutcome::Added {
                    row,
                    position: editor.count(),
                })
            }
            FormAction::Remove { kind, position } => {
                let removed = self.editor_mut(kind).remove_entry(position)?;
                Ok(ActionOutcome::Removed { row: removed.id() })
            }
            FormAction::RemoveRow { kind, row } => {
                let removed = self.editor_mut(kind).remove_row(row)?;
                Ok(ActionOutcome::Removed { row: removed.id() })
            }
            FormAction::SetEntry {
                kind,
                position,
                value,
            } => {
                self.editor_mut(kind).set_value(position, value)?;
                Ok(ActionOutcome::Updated)
            }
            FormAction::SetRow { kind, row, value } => {
                self.editor_mut(kind).set_row_value(row, value)?;
                Ok(ActionOutcome::Updated)
            }
            FormAction::SetField(field, value) => {
                self.set_field(field, value);
                Ok(ActionOutcome::Updated)
            }
        }
    }

    /// Flatten the form into the name-to-value map a submit would post.
    ///
    /// Blank scalar fields are omitted; every list entry is included under
    /// its position-derived name.
    #[must_use]
    pub fn form_data(&self) -> FormData {
        let mut data = FormData::new();
        for field in ScalarField::ALL {
            let value = self.field(field);
            if !value.is_empty() {
                data.insert(field.name(), value);
            }
        }
        for kind in FieldKind::ALL {
            for (name, value) in self.editor(kind).field_values() {
                data.insert(name.to_string(), value);
            }
        }
        data
    }

    /// Validate and submit the form.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the form content is incomplete.
    pub fn submit(&self) -> Result<Team> {
        Team::from_form(&self.form_data(), &self.config)
    }
}
