//! Field kinds and position-derived field names.
//!
//! Every list entry is addressed by the host form through a deterministic
//! name of the form `<kind>-<position>` (`member-1`, `link-3`). The remove
//! control of that entry is labeled `button-<tag>-<position>`.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Which repeatable list a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKind {
    /// A team member's full name.
    Member,
    /// A link associated with the team.
    Link,
}

impl FieldKind {
    /// All list kinds, in the order they appear on the form.
    pub const ALL: [FieldKind; 2] = [FieldKind::Member, FieldKind::Link];

    /// Prefix used in input ids and form-field names.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Link => "link",
        }
    }

    /// Short tag used in remove-control ids.
    #[must_use]
    pub fn button_tag(self) -> char {
        match self {
            Self::Member => 'm',
            Self::Link => 'l',
        }
    }

    /// Plural name of the whole list.
    #[must_use]
    pub fn list_name(self) -> &'static str {
        match self {
            Self::Member => "members",
            Self::Link => "links",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for FieldKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "member" | "members" => Ok(Self::Member),
            "link" | "links" => Ok(Self::Link),
            _ => Err(Error::InvalidFieldName {
                name: s.to_string(),
            }),
        }
    }
}

fn field_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(member|link)-([1-9][0-9]*)$").expect("static regex"))
}

/// A position-derived form-field name such as `member-2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldName {
    /// The list this field belongs to.
    pub kind: FieldKind,
    /// 1-based position within the list.
    pub position: usize,
}

impl FieldName {
    /// Create a field name for the given list and position.
    #[must_use]
    pub fn new(kind: FieldKind, position: usize) -> Self {
        Self { kind, position }
    }

    /// Parse a `<kind>-<position>` name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFieldName`] if the name does not follow the scheme
    /// or the position is zero.
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = || Error::InvalidFieldName {
            name: name.to_string(),
        };
        let caps = field_name_regex().captures(name).ok_or_else(invalid)?;
        let kind = caps[1].parse()?;
        let position = caps[2].parse().map_err(|_| invalid())?;
        Ok(Self { kind, position })
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.prefix(), self.position)
    }
}

/// The identifiers rendered for one entry row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryLabels {
    /// Id of the text input.
    pub input_id: String,
    /// Form-field name of the text input; what the host form reads on submit.
    pub input_name: String,
    /// Id of the row's remove control.
    pub remove_id: String,
}

impl EntryLabels {
    /// Build the labels for the entry at `position` of a `kind` list.
    #[must_use]
    pub fn for_position(kind: FieldKind, position: usize) -> Self {
        let name = FieldName::new(kind, position).to_string();
        Self {
            input_id: name.clone(),
            input_name: name,
            remove_id: format!("button-{}-{position}", kind.button_tag()),
        }
    }
}
