//! Submit-time collection and validation of a team form.
//!
//! The host form never holds references to dynamically created rows. It
//! reads a flat map of field names to values and recovers each list from the
//! posted `<kind>-<position>` names. Content validation (required,
//! non-empty text) happens here rather than in the editors.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::field::{FieldKind, FieldName};

/// Separator of list values in their stored text form.
const LIST_SEPARATOR: &str = ", ";

/// Flat name-to-value view of a form, as a browser would post it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    /// Create an empty form data set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Get a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Collect the values of one list from the names actually posted.
    ///
    /// Only `<kind>-<position>` names with `position <= max_entries` count;
    /// they are returned trimmed, in position order. Work is proportional to
    /// the number of posted fields, not to the capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFieldName`] for a name carrying the list's
    /// prefix that is not a valid field name (`member-0`, `link-x`), and
    /// [`Error::EmptyField`] for a present but blank value.
    pub fn list_values(&self, kind: FieldKind, max_entries: usize) -> Result<Vec<String>> {
        let prefix = format!("{}-", kind.prefix());
        let mut found = Vec::new();
        for (name, value) in &self.fields {
            if !name.starts_with(&prefix) {
                continue;
            }
            let field = FieldName::parse(name)?;
            if field.position > max_entries {
                continue;
            }
            let value = value.trim();
            if value.is_empty() {
                return Err(Error::empty_field(name.as_str()));
            }
            found.push((field.position, value.to_string()));
        }
        found.sort_by_key(|(position, _)| *position);
        Ok(found.into_iter().map(|(_, value)| value).collect())
    }

    fn required(&self, name: &str) -> Result<&str> {
        let value = self.get(name).ok_or_else(|| Error::missing_field(name))?;
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::empty_field(name));
        }
        Ok(value)
    }

    fn optional(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Lifecycle status of a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamStatus {
    /// The team is working and recruiting.
    #[default]
    Active,
    /// The team is not currently working.
    Inactive,
    /// The team has been suspended.
    Suspended,
}

impl fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Suspended => write!(f, "suspended"),
        }
    }
}

impl FromStr for TeamStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "suspended" => Ok(Self::Suspended),
            _ => Err(Error::UnknownStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// A validated team, as produced by submitting the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    /// Team name.
    pub name: String,
    /// Lifecycle status.
    pub status: TeamStatus,
    /// Free-form description.
    pub description: String,
    /// Logo URL, if one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Member names in form order.
    pub members: Vec<String>,
    /// Links in form order.
    pub links: Vec<String>,
    /// When the form was submitted.
    pub submitted_at: DateTime<Utc>,
}

impl Team {
    /// Validate posted form data into a team.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is missing, the status is
    /// unknown, any present list value is blank, or no member was given.
    pub fn from_form(data: &FormData, config: &Config) -> Result<Self> {
        let name = data.required("name")?.to_string();
        let status = match data.optional("status") {
            Some(status) => status.parse()?,
            None => TeamStatus::default(),
        };
        let description = data
            .optional("description")
            .unwrap_or(&config.form.default_description)
            .to_string();
        let logo_url = data.optional("logo").map(str::to_string);

        let members = data.list_values(FieldKind::Member, config.members.max_entries)?;
        if members.is_empty() {
            return Err(Error::missing_field(
                FieldName::new(FieldKind::Member, 1).to_string(),
            ));
        }
        let links = data.list_values(FieldKind::Link, config.links.max_entries)?;

        debug!(
            members = members.len(),
            links = links.len(),
            "Form data validated"
        );
        info!(team = %name, status = %status, "Team submitted");

        Ok(Self {
            name,
            status,
            description,
            logo_url,
            members,
            links,
            submitted_at: Utc::now(),
        })
    }

    /// Members in their stored text form.
    #[must_use]
    pub fn members_text(&self) -> String {
        join_values(&self.members)
    }

    /// Links in their stored text form.
    #[must_use]
    pub fn links_text(&self) -> String {
        join_values(&self.links)
    }
}

/// Join list values into their stored text form.
#[must_use]
pub fn join_values(values: &[String]) -> String {
    values.join(LIST_SEPARATOR)
}
