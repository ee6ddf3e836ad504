//! Line-oriented editing sessions.
//!
//! A session drives a [`TeamForm`] from text commands, one per line, either
//! typed interactively or read from a script:
//!
//! ```text
//! name Rustaceans
//! set members 1 Alice
//! add members
//! set members 2 Bob
//! remove members 1
//! set members #2 Bob Smith
//! show
//! submit
//! ```

use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::editor::{BoundedListEditor, Row, RowId};
use crate::error::{Error, Result};
use crate::field::FieldKind;
use crate::form::{ActionOutcome, FormAction, ScalarField, TeamForm};
use crate::submission::Team;

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Act on the form.
    Action(FormAction),
    /// Print the form.
    Show,
    /// Validate and submit the form.
    Submit,
    /// Print the command summary.
    Help,
    /// End the session.
    Quit,
}

/// Command summary printed by `help`.
pub const HELP: &str = "\
commands:
  add <members|links>                 append an entry
  remove <members|links> <position>   remove an entry and renumber
  set <members|links> <position> <text>
                                      a row handle (#n, see show) may
                                      stand in for <position>
  name|status|description|logo <text>
  show                                print the form
  submit                              validate and submit
  quit                                leave without submitting";

fn command_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?x)^
            (?:
                (?P<add>add)\s+(?P<add_kind>\w+)
              | (?P<remove>remove)\s+(?P<remove_kind>\w+)\s+(?P<remove_pos>\#?\d+)
              | (?P<set>set)\s+(?P<set_kind>\w+)\s+(?P<set_pos>\#?\d+)(?:\s+(?P<set_value>.*))?
              | (?P<field>name|status|description|logo)(?:\s+(?P<field_value>.*))?
              | (?P<bare>show|submit|help|quit|exit)
            )\s*$",
        )
        .expect("static regex")
    })
}

impl SessionCommand {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Command`] if the line is not a known command.
    pub fn parse(line_no: usize, line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let caps = command_regex()
            .captures(line)
            .ok_or_else(|| Error::command(line_no, format!("unknown command '{line}'")))?;
        let kind = |group: &str| -> Result<FieldKind> {
            caps[group]
                .parse()
                .map_err(|_| Error::command(line_no, format!("unknown list '{}'", &caps[group])))
        };
        let target = |group: &str| -> Result<Target> {
            let text = &caps[group];
            let bad = || Error::command(line_no, format!("bad position '{text}'"));
            match text.strip_prefix('#') {
                Some(id) => Ok(Target::Row(RowId(id.parse().map_err(|_| bad())?))),
                None => Ok(Target::Position(text.parse().map_err(|_| bad())?)),
            }
        };

        let command = if caps.name("add").is_some() {
            Self::Action(FormAction::Add(kind("add_kind")?))
        } else if caps.name("remove").is_some() {
            let kind = kind("remove_kind")?;
            Self::Action(match target("remove_pos")? {
                Target::Position(position) => FormAction::Remove { kind, position },
                Target::Row(row) => FormAction::RemoveRow { kind, row },
            })
        } else if caps.name("set").is_some() {
            let kind = kind("set_kind")?;
            let value = caps
                .name("set_value")
                .map_or_else(String::new, |m| m.as_str().trim().to_string());
            Self::Action(match target("set_pos")? {
                Target::Position(position) => FormAction::SetEntry {
                    kind,
                    position,
                    value,
                },
                Target::Row(row) => FormAction::SetRow { kind, row, value },
            })
        } else if let Some(field) = caps.name("field") {
            let field: ScalarField = field.as_str().parse()?;
            let value = caps
                .name("field_value")
                .map_or_else(String::new, |m| m.as_str().trim().to_string());
            Self::Action(FormAction::SetField(field, value))
        } else {
            match &caps["bare"] {
                "show" => Self::Show,
                "submit" => Self::Submit,
                "help" => Self::Help,
                _ => Self::Quit,
            }
        };
        Ok(Some(command))
    }
}

/// How a command addresses a list entry.
enum Target {
    Position(usize),
    Row(RowId),
}

/// Result of executing one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Keep reading; print the message if any.
    Continue(Option<String>),
    /// The form was submitted.
    Submitted(Team),
    /// The user left the session.
    Quit,
}

/// An editing session over one team form.
#[derive(Debug)]
pub struct Session {
    form: TeamForm,
    line_no: usize,
}

impl Session {
    /// Start a session on a freshly mounted form.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            form: TeamForm::new(config)?,
            line_no: 0,
        })
    }

    /// The form being edited.
    #[must_use]
    pub fn form(&self) -> &TeamForm {
        &self.form
    }

    /// Execute one input line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not parse, the action breaks an
    /// editor invariant, or submission fails validation.
    pub fn execute(&mut self, line: &str) -> Result<Step> {
        self.line_no += 1;
        let Some(command) = SessionCommand::parse(self.line_no, line)? else {
            return Ok(Step::Continue(None));
        };
        debug!(line = self.line_no, ?command, "Executing session command");

        match command {
            SessionCommand::Action(action) => {
                let outcome = self.form.apply(action)?;
                let message = match outcome {
                    ActionOutcome::Added { position, .. } => Some(format!("added entry {position}")),
                    ActionOutcome::Removed { .. } => Some("removed".to_string()),
                    ActionOutcome::Updated => None,
                };
                Ok(Step::Continue(message))
            }
            SessionCommand::Show => Ok(Step::Continue(Some(render_form(&self.form)))),
            SessionCommand::Help => Ok(Step::Continue(Some(HELP.to_string()))),
            SessionCommand::Submit => Ok(Step::Submitted(self.form.submit()?)),
            SessionCommand::Quit => Ok(Step::Quit),
        }
    }

    /// Run a script to completion.
    ///
    /// Stops at the first error, at `quit`, or at `submit`. Returns the team
    /// if the script submitted the form.
    ///
    /// # Errors
    ///
    /// Returns the first error any line produces.
    pub fn run_script<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<Option<Team>> {
        for line in input.lines() {
            match self.execute(&line?)? {
                Step::Continue(Some(message)) => writeln!(out, "{message}")?,
                Step::Continue(None) => {}
                Step::Submitted(team) => return Ok(Some(team)),
                Step::Quit => return Ok(None),
            }
        }
        Ok(None)
    }

    /// Run an interactive session.
    ///
    /// Unlike [`run_script`](Self::run_script), errors are reported and the
    /// session continues; the form is left unchanged by a rejected command.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run_interactive<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
    ) -> Result<Option<Team>> {
        writeln!(out, "{}", render_form(&self.form))?;
        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match self.execute(&line) {
                Ok(Step::Continue(Some(message))) => writeln!(out, "{message}")?,
                Ok(Step::Continue(None)) => {}
                Ok(Step::Submitted(team)) => return Ok(Some(team)),
                Ok(Step::Quit) => return Ok(None),
                Err(err) => {
                    warn!(error = %err, "Command rejected");
                    writeln!(out, "error: {err}")?;
                }
            }
        }
    }
}

/// Render the whole form as text.
#[must_use]
pub fn render_form(form: &TeamForm) -> String {
    let mut text = String::new();
    for field in ScalarField::ALL {
        let value = form.field(field);
        let _ = writeln!(text, "{:<12} {}", format!("{field}:"), value);
    }
    for kind in FieldKind::ALL {
        text.push_str(&render_list(form.editor(kind)));
    }
    text.trim_end().to_string()
}

/// Render one list, including its add control when present.
#[must_use]
pub fn render_list(editor: &BoundedListEditor) -> String {
    let mut text = format!(
        "{} ({}/{})\n",
        editor.kind().list_name(),
        editor.count(),
        editor.max_entries()
    );
    for row in editor.rows() {
        match row {
            Row::Entry(entry) => {
                let value = if entry.value().is_empty() {
                    format!("<{}>", editor.placeholder())
                } else {
                    entry.value().to_string()
                };
                let _ = writeln!(
                    text,
                    "  [{}] {} [-] ({}) {}",
                    entry.labels().input_name,
                    value,
                    entry.labels().remove_id,
                    entry.id()
                );
            }
            Row::AddControl => text.push_str("  [+]\n"),
        }
    }
    text
}
