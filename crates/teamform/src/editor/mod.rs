//! Bounded list editor.
//!
//! A [`BoundedListEditor`] owns the repeatable rows of one logical form field
//! (team members, team links). It keeps two invariants across every add and
//! remove:
//!
//! - **Contiguity**: entry positions are exactly `1..=count`, in order, and
//!   every entry's labels match its position.
//! - **Capacity gate**: the trailing add control is present iff
//!   `count < max_entries`.
//!
//! Adding past capacity or removing an absent position is a broken invariant,
//! reported as an error and logged rather than ignored.
//!
//! # Example
//!
//! ```
//! use teamform::config::ListConfig;
//! use teamform::editor::BoundedListEditor;
//! use teamform::field::FieldKind;
//!
//! let mut links = BoundedListEditor::new(FieldKind::Link, &ListConfig::links()).unwrap();
//! links.set_value(1, "x").unwrap();
//! links.add_entry().unwrap();
//! links.set_value(2, "y").unwrap();
//! links.add_entry().unwrap();
//! links.set_value(3, "z").unwrap();
//!
//! links.remove_entry(2).unwrap();
//! assert_eq!(links.values(), vec![(1, "x"), (2, "z")]);
//!
//! links.add_entry().unwrap();
//! assert_eq!(links.entries()[2].labels().input_name, "link-3");
//! ```

mod row;

use tracing::{debug, trace, warn};

pub use row::{Entry, Row, RowId};

use crate::config::ListConfig;
use crate::error::{Error, Result};
use crate::field::{EntryLabels, FieldKind, FieldName};

/// Editor of one bounded, positionally-labeled list.
#[derive(Debug, Clone)]
pub struct BoundedListEditor {
    kind: FieldKind,
    max_entries: usize,
    placeholder: String,
    enforce_minimum: bool,
    entries: Vec<Entry>,
    add_control: bool,
    next_row: u64,
}

impl BoundedListEditor {
    /// Create an editor holding the initial entry at position 1.
    ///
    /// The add control is present unless the capacity is exactly one.
    ///
    /// # Errors
    ///
    /// Returns an error if the list configuration is invalid.
    pub fn new(kind: FieldKind, config: &ListConfig) -> Result<Self> {
        config.validate(kind)?;

        let mut editor = Self {
            kind,
            max_entries: config.max_entries,
            placeholder: config.placeholder.clone(),
            enforce_minimum: config.enforce_minimum,
            entries: Vec::new(),
            add_control: config.max_entries > 1,
            next_row: 0,
        };
        let id = editor.allocate_row();
        editor.entries.push(Entry::new(id, kind, 1));
        debug!(kind = %kind, max_entries = editor.max_entries, "List editor created");
        Ok(editor)
    }

    /// The list this editor manages.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Configured capacity.
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Display text for empty inputs.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Number of entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list holds no entries.
    ///
    /// Only reachable when the minimum floor is disabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if the list is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_entries
    }

    /// Check if the add control is currently rendered.
    #[must_use]
    pub fn has_add_control(&self) -> bool {
        self.add_control
    }

    /// Entries in position order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Rendered rows: every entry, then the add control when present.
    #[must_use]
    pub fn rows(&self) -> Vec<Row<'_>> {
        let mut rows: Vec<Row<'_>> = self.entries.iter().map(Row::Entry).collect();
        if self.add_control {
            rows.push(Row::AddControl);
        }
        rows
    }

    /// Current `(position, value)` pairs in order.
    #[must_use]
    pub fn values(&self) -> Vec<(usize, &str)> {
        self.entries
            .iter()
            .map(|e| (e.position(), e.value()))
            .collect()
    }

    /// Current values keyed by their form-field name.
    pub fn field_values(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        self.entries
            .iter()
            .map(|e| (FieldName::new(self.kind, e.position()), e.value()))
    }

    /// The entry at `position`, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Entry> {
        position
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
    }

    /// The value at `position`, if any.
    #[must_use]
    pub fn value(&self, position: usize) -> Option<&str> {
        self.get(position).map(Entry::value)
    }

    /// Current position of a row, or `None` once it has been removed.
    #[must_use]
    pub fn position_of(&self, row: RowId) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.id() == row)
            .map(|index| index + 1)
    }

    /// Set the text of the entry at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchPosition`] if there is no entry at `position`.
    pub fn set_value(&mut self, position: usize, value: impl Into<String>) -> Result<()> {
        let index = self.index_of(position)?;
        self.entries[index].set_value(value.into());
        trace!(kind = %self.kind, position, "Entry value updated");
        Ok(())
    }

    /// Set the text of a row by its handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchRow`] if the row has been removed.
    pub fn set_row_value(&mut self, row: RowId, value: impl Into<String>) -> Result<()> {
        let position = self.resolve(row)?;
        self.set_value(position, value)
    }

    /// Append a new empty entry before the add control.
    ///
    /// Returns the handle of the new row, which its remove control is bound
    /// to. When the new entry fills the list the add control is removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityReached`] if the list is already full.
    pub fn add_entry(&mut self) -> Result<RowId> {
        if !self.add_control || self.is_full() {
            warn!(
                kind = %self.kind,
                max_entries = self.max_entries,
                "Rejected add on a full list"
            );
            return Err(Error::CapacityReached {
                kind: self.kind,
                max_entries: self.max_entries,
            });
        }

        let position = self.entries.len() + 1;
        let id = self.allocate_row();
        self.entries.push(Entry::new(id, self.kind, position));

        if position == self.max_entries {
            self.add_control = false;
            debug!(kind = %self.kind, "Capacity reached, add control removed");
        }

        debug!(kind = %self.kind, position, row = %id, "Entry added");
        self.debug_check();
        Ok(id)
    }

    /// Remove the entry at `position` and renumber the rest.
    ///
    /// Every remaining entry is relabeled from 1 in order, and the add control
    /// is restored if the list dropped below capacity without one. Returns
    /// the removed entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchPosition`] if there is no entry at `position`, or
    /// [`Error::LastEntry`] if it is the only entry and the minimum floor is
    /// enforced.
    pub fn remove_entry(&mut self, position: usize) -> Result<Entry> {
        let index = self.index_of(position)?;

        if self.enforce_minimum && self.entries.len() == 1 {
            warn!(kind = %self.kind, "Rejected removal of the last entry");
            return Err(Error::LastEntry { kind: self.kind });
        }

        let removed = self.entries.remove(index);
        self.relabel();

        if self.entries.len() < self.max_entries && !self.add_control {
            self.add_control = true;
            debug!(kind = %self.kind, "Add control restored");
        }

        debug!(
            kind = %self.kind,
            position,
            row = %removed.id(),
            count = self.entries.len(),
            "Entry removed"
        );
        self.debug_check();
        Ok(removed)
    }

    /// Remove a row by its handle, wherever it currently sits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchRow`] if the row has already been removed, or any
    /// error of [`remove_entry`](Self::remove_entry).
    pub fn remove_row(&mut self, row: RowId) -> Result<Entry> {
        let position = self.resolve(row)?;
        self.remove_entry(position)
    }

    /// Rebuild every entry's position and labels from its slot.
    ///
    /// Deterministic: relabeling an unchanged list is a no-op.
    pub fn relabel(&mut self) {
        let kind = self.kind;
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.relabel(kind, index + 1);
        }
        trace!(kind = %kind, count = self.entries.len(), "Entries relabeled");
    }

    /// Check both list invariants.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let contiguous = self.entries.iter().enumerate().all(|(index, entry)| {
            let labels = EntryLabels::for_position(self.kind, index + 1);
            entry.position() == index + 1 && *entry.labels() == labels
        });
        let gated = self.add_control == (self.entries.len() < self.max_entries);
        contiguous && gated && self.entries.len() <= self.max_entries
    }

    fn index_of(&self, position: usize) -> Result<usize> {
        if position == 0 || position > self.entries.len() {
            warn!(
                kind = %self.kind,
                position,
                count = self.entries.len(),
                "Rejected access to an absent position"
            );
            return Err(Error::NoSuchPosition {
                kind: self.kind,
                position,
                count: self.entries.len(),
            });
        }
        Ok(position - 1)
    }

    fn resolve(&self, row: RowId) -> Result<usize> {
        self.position_of(row).ok_or_else(|| {
            warn!(kind = %self.kind, row = %row, "Rejected stale row handle");
            Error::NoSuchRow {
                kind: self.kind,
                row,
            }
        })
    }

    fn allocate_row(&mut self) -> RowId {
        let id = RowId(self.next_row);
        self.next_row += 1;
        id
    }

    fn debug_check(&self) {
        debug_assert!(self.is_consistent(), "list invariants broken: {self:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use proptest::prelude::*;

    fn members() -> BoundedListEditor {
        BoundedListEditor::new(FieldKind::Member, &ListConfig::members()).unwrap()
    }

    fn links() -> BoundedListEditor {
        BoundedListEditor::new(FieldKind::Link, &ListConfig::links()).unwrap()
    }

    fn filled(editor: &mut BoundedListEditor, values: &[&str]) {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                editor.add_entry().unwrap();
            }
            editor.set_value(i + 1, *value).unwrap();
        }
    }

    fn positions(editor: &BoundedListEditor) -> Vec<usize> {
        editor.entries().iter().map(Entry::position).collect()
    }

    #[test]
    fn test_new_has_one_entry_and_add_control() {
        let editor = members();
        assert_eq!(editor.count(), 1);
        assert!(editor.has_add_control());
        assert_eq!(editor.entries()[0].labels().input_name, "member-1");
        assert_eq!(editor.placeholder(), "Full name");
        assert!(editor.is_consistent());
    }

    #[test]
    fn test_new_with_capacity_one_has_no_add_control() {
        let config = ListConfig {
            max_entries: 1,
            ..ListConfig::members()
        };
        let mut editor = BoundedListEditor::new(FieldKind::Member, &config).unwrap();
        assert!(!editor.has_add_control());
        assert!(editor.is_full());
        assert!(matches!(
            editor.add_entry(),
            Err(Error::CapacityReached { max_entries: 1, .. })
        ));
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        let config = ListConfig {
            max_entries: 0,
            ..ListConfig::links()
        };
        let result = BoundedListEditor::new(FieldKind::Link, &config);
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_new_rejects_oversized_capacity() {
        let config = ListConfig {
            max_entries: usize::MAX / 2,
            ..ListConfig::links()
        };
        let result = BoundedListEditor::new(FieldKind::Link, &config);
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_rows_end_with_add_control() {
        let mut editor = members();
        editor.add_entry().unwrap();

        let rows = editor.rows();
        assert_eq!(rows.len(), 3);
        assert!(!rows[0].is_add_control());
        assert!(!rows[1].is_add_control());
        assert!(rows[2].is_add_control());
    }

    #[test]
    fn test_add_labels_new_entry() {
        let mut editor = links();
        editor.add_entry().unwrap();

        let entry = &editor.entries()[1];
        assert_eq!(entry.position(), 2);
        assert_eq!(entry.labels().input_id, "link-2");
        assert_eq!(entry.labels().input_name, "link-2");
        assert_eq!(entry.labels().remove_id, "button-l-2");
        assert!(entry.value().is_empty());
    }

    #[test]
    fn test_fill_to_capacity() {
        init_test_logging();
        let mut editor = members();
        for _ in 0..4 {
            editor.add_entry().unwrap();
        }

        assert_eq!(editor.count(), 5);
        assert!(!editor.has_add_control());
        assert!(editor.rows().iter().all(|r| !r.is_add_control()));

        let err = editor.add_entry().unwrap_err();
        assert!(err.is_invariant_violation());
        assert!(matches!(
            err,
            Error::CapacityReached {
                kind: FieldKind::Member,
                max_entries: 5
            }
        ));
        assert_eq!(editor.count(), 5);
    }

    #[test]
    fn test_add_control_present_until_last_slot() {
        let mut editor = members();
        for expected in 2..=5 {
            assert!(editor.has_add_control());
            editor.add_entry().unwrap();
            assert_eq!(editor.count(), expected);
            assert_eq!(editor.has_add_control(), expected < 5);
        }
    }

    #[test]
    fn test_remove_first_element() {
        let mut editor = members();
        filled(&mut editor, &["A", "B", "C"]);

        let removed = editor.remove_entry(1).unwrap();
        assert_eq!(removed.value(), "A");
        assert_eq!(editor.values(), vec![(1, "B"), (2, "C")]);
        assert_eq!(editor.entries()[0].labels().input_name, "member-1");
        assert_eq!(editor.entries()[1].labels().remove_id, "button-m-2");
    }

    #[test]
    fn test_remove_from_full_list_restores_add_control() {
        let mut editor = members();
        filled(&mut editor, &["A", "B", "C", "D", "E"]);
        assert!(!editor.has_add_control());

        editor.remove_entry(1).unwrap();
        assert_eq!(editor.count(), 4);
        assert!(editor.has_add_control());
        assert!(editor.rows().last().unwrap().is_add_control());
        assert_eq!(editor.value(1), Some("B"));
    }

    #[test]
    fn test_remove_middle_then_readd_reuses_position() {
        let mut editor = links();
        filled(&mut editor, &["x", "y", "z"]);

        editor.remove_entry(2).unwrap();
        assert_eq!(editor.values(), vec![(1, "x"), (2, "z")]);
        assert_eq!(editor.entries()[1].labels().input_id, "link-2");

        editor.add_entry().unwrap();
        assert_eq!(editor.entries()[2].labels().input_name, "link-3");
        assert_eq!(positions(&editor), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_last_position() {
        let mut editor = links();
        filled(&mut editor, &["x", "y", "z"]);

        editor.remove_entry(3).unwrap();
        assert_eq!(editor.values(), vec![(1, "x"), (2, "y")]);
    }

    #[test]
    fn test_remove_absent_position() {
        init_test_logging();
        let mut editor = links();
        editor.add_entry().unwrap();

        for position in [0, 3, 100] {
            let err = editor.remove_entry(position).unwrap_err();
            assert!(err.is_invariant_violation());
            assert!(matches!(
                err,
                Error::NoSuchPosition { count: 2, .. }
            ));
        }
        assert_eq!(editor.count(), 2);
    }

    #[test]
    fn test_remove_sole_entry_rejected_with_minimum() {
        let mut editor = members();
        let err = editor.remove_entry(1).unwrap_err();
        assert!(matches!(err, Error::LastEntry { kind: FieldKind::Member }));
        assert_eq!(editor.count(), 1);
    }

    #[test]
    fn test_remove_sole_entry_allowed_without_minimum() {
        let config = ListConfig {
            enforce_minimum: false,
            ..ListConfig::members()
        };
        let mut editor = BoundedListEditor::new(FieldKind::Member, &config).unwrap();
        editor.remove_entry(1).unwrap();

        assert!(editor.is_empty());
        assert!(editor.has_add_control());
        assert!(editor.is_consistent());

        editor.add_entry().unwrap();
        assert_eq!(editor.entries()[0].labels().input_name, "member-1");
    }

    #[test]
    fn test_row_handle_survives_renumbering() {
        let mut editor = members();
        editor.add_entry().unwrap();
        let third = editor.add_entry().unwrap();
        editor.set_row_value(third, "Carol").unwrap();

        assert_eq!(editor.position_of(third), Some(3));
        editor.remove_entry(1).unwrap();
        assert_eq!(editor.position_of(third), Some(2));

        let removed = editor.remove_row(third).unwrap();
        assert_eq!(removed.into_value(), "Carol");
        assert_eq!(editor.position_of(third), None);
    }

    #[test]
    fn test_stale_row_handle() {
        let mut editor = links();
        let row = editor.add_entry().unwrap();
        editor.remove_row(row).unwrap();

        let err = editor.remove_row(row).unwrap_err();
        assert!(matches!(err, Error::NoSuchRow { .. }));
        assert!(err.is_invariant_violation());
        assert!(editor.set_row_value(row, "x").is_err());
    }

    #[test]
    fn test_set_value_absent_position() {
        let mut editor = members();
        assert!(matches!(
            editor.set_value(2, "Bob"),
            Err(Error::NoSuchPosition { position: 2, .. })
        ));
    }

    #[test]
    fn test_relabel_is_idempotent() {
        let mut editor = links();
        filled(&mut editor, &["a", "b", "c", "d"]);
        editor.remove_entry(2).unwrap();

        editor.relabel();
        let first = editor.entries().to_vec();
        editor.relabel();
        assert_eq!(editor.entries(), first.as_slice());
    }

    #[test]
    fn test_field_values() {
        let mut editor = links();
        filled(&mut editor, &["https://a", "https://b"]);

        let names: Vec<String> = editor
            .field_values()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        assert_eq!(names, vec!["link-1=https://a", "link-2=https://b"]);
    }

    #[test]
    fn test_get_and_value() {
        let mut editor = members();
        editor.set_value(1, "Alice").unwrap();

        assert_eq!(editor.value(1), Some("Alice"));
        assert_eq!(editor.value(0), None);
        assert_eq!(editor.value(2), None);
        assert!(editor.get(1).is_some());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Add), (1_usize..=12).prop_map(Op::Remove)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn test_invariants_hold_over_operation_sequences(
            max_entries in 1_usize..=10,
            enforce_minimum in any::<bool>(),
            ops in prop::collection::vec(op(), 0..64),
        ) {
            let config = ListConfig {
                max_entries,
                placeholder: "p".to_string(),
                enforce_minimum,
            };
            let mut editor = BoundedListEditor::new(FieldKind::Link, &config).unwrap();
            editor.set_value(1, "v0").unwrap();
            let mut model = vec!["v0".to_string()];
            let mut next = 1;

            for (step, op) in ops.into_iter().enumerate() {
                match op {
                    Op::Add => {
                        let result = editor.add_entry();
                        prop_assert_eq!(result.is_ok(), model.len() < max_entries, "step {}", step);
                        if result.is_ok() {
                            let value = format!("v{next}");
                            next += 1;
                            editor.set_value(model.len() + 1, value.clone()).unwrap();
                            model.push(value);
                        }
                    }
                    Op::Remove(position) => {
                        let allowed = position <= model.len()
                            && !(enforce_minimum && model.len() == 1);
                        let result = editor.remove_entry(position);
                        prop_assert_eq!(result.is_ok(), allowed, "step {}", step);
                        if let Ok(removed) = result {
                            let expected = model.remove(position - 1);
                            prop_assert_eq!(removed.value(), expected.as_str());
                        }
                    }
                }

                // Survivors keep their relative order under dense positions.
                let expected: Vec<(usize, &str)> = model
                    .iter()
                    .enumerate()
                    .map(|(index, value)| (index + 1, value.as_str()))
                    .collect();
                prop_assert_eq!(editor.values(), expected, "step {}", step);
                prop_assert!(editor.is_consistent(), "step {}", step);
                prop_assert_eq!(editor.has_add_control(), model.len() < max_entries);
                prop_assert!(editor.count() <= max_entries);
                if enforce_minimum {
                    prop_assert!(!editor.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_remove_sequence_keeps_value_order() {
        let mut editor = members();
        filled(&mut editor, &["a", "b", "c", "d", "e"]);

        editor.remove_entry(3).unwrap();
        editor.remove_entry(1).unwrap();
        editor.add_entry().unwrap();

        assert_eq!(editor.values(), vec![(1, "b"), (2, "d"), (3, "e"), (4, "")]);
        assert!(editor.has_add_control());
    }

    #[test]
    fn test_editors_are_independent() {
        let mut members = members();
        let mut links = links();
        links.add_entry().unwrap();
        links.add_entry().unwrap();

        for _ in 0..4 {
            members.add_entry().unwrap();
        }
        members.remove_entry(2).unwrap();

        assert_eq!(links.count(), 3);
        assert!(links.has_add_control());
        assert_eq!(positions(&links), vec![1, 2, 3]);
        assert_eq!(links.entries()[0].labels().input_name, "link-1");
    }
}
