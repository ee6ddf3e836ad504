//! `teamform` - Bounded, self-renumbering list editors for team forms
//!
//! This library provides the list editor behind a team form's repeatable
//! rows (members, links), the host form that owns two independent editors,
//! and submit-time collection of the form's values.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod field;
pub mod form;
pub mod logging;
pub mod session;
pub mod submission;

pub use config::{Config, ListConfig};
pub use editor::{BoundedListEditor, Entry, Row, RowId};
pub use error::{Error, Result};
pub use field::{EntryLabels, FieldKind, FieldName};
pub use form::{FormAction, TeamForm};
pub use logging::init_logging;
pub use session::Session;
pub use submission::{FormData, Team, TeamStatus};
