use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::model::{Candidate, OptionItem};
use crate::ops::filter::filter_candidates;

/// Error type for building a selection store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("duplicate option label: {0:?}")]
    DuplicateLabel(String),
}

/// Receives the selected items (internal flags stripped) whenever the number
/// of selected items changes between two commits.
pub trait SelectionListener {
    fn selection_changed(&mut self, selected: &[OptionItem]);
}

impl<F> SelectionListener for F
where
    F: FnMut(&[OptionItem]),
{
    fn selection_changed(&mut self, selected: &[OptionItem]) {
        self(selected)
    }
}

/// What a Backspace on an empty query did to the chips
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackspaceOutcome {
    /// No chips to act on
    Noop,
    /// Trailing chip is now highlighted
    Armed(String),
    /// Trailing chip was already highlighted and has been deselected
    Removed(String),
}

/// Owns the candidate universe and the two per-candidate flags.
///
/// Every public mutation is one commit. After a commit, the listener is told
/// about the selection if the selected count differs from the last commit.
/// Same-count changes (highlighting, a swap inside [`SelectionStore::batch`])
/// are not reported.
pub struct SelectionStore {
    candidates: Vec<Candidate>,
    listener: Option<Box<dyn SelectionListener>>,
    /// Selected count at the last commit; None before the first one
    committed_count: Option<usize>,
    batch_depth: usize,
}

impl fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStore")
            .field("candidates", &self.candidates)
            .field("has_listener", &self.listener.is_some())
            .field("committed_count", &self.committed_count)
            .finish()
    }
}

impl SelectionStore {
    /// Copy `items` into a fresh store. Labels must be unique.
    pub fn new(items: &[OptionItem]) -> Result<Self, SelectError> {
        check_unique_labels(items)?;
        Ok(SelectionStore {
            candidates: items.iter().cloned().map(Candidate::new).collect(),
            listener: None,
            committed_count: None,
            batch_depth: 0,
        })
    }

    pub fn with_listener(mut self, listener: impl SelectionListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn set_listener(&mut self, listener: impl SelectionListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Initial commit: reports the starting (empty) selection once.
    pub fn mount(&mut self) {
        self.commit();
    }

    // -----------------------------------------------------------------------
    // Derived views

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Selected candidates in original order
    pub fn selected(&self) -> Vec<&Candidate> {
        self.candidates.iter().filter(|c| c.selected).collect()
    }

    /// Selected items with the internal flags stripped
    pub fn selected_items(&self) -> Vec<OptionItem> {
        self.candidates
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.item.clone())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.selected).count()
    }

    /// Unselected candidates matching `query`
    pub fn filtered(&self, query: &str) -> Vec<&Candidate> {
        filter_candidates(&self.candidates, query)
    }

    pub fn highlighted(&self) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.pending_removal)
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.find(label).is_some_and(|c| c.selected)
    }

    fn find(&self, label: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.label() == label)
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.candidates.iter().position(|c| c.label() == label)
    }

    // -----------------------------------------------------------------------
    // Mutations

    /// Mark `label` selected and clear every highlight. Returns false for an
    /// unknown label, which leaves the store untouched.
    pub fn select(&mut self, label: &str) -> bool {
        let Some(idx) = self.position(label) else {
            return false;
        };
        for c in &mut self.candidates {
            c.pending_removal = false;
        }
        self.candidates[idx].selected = true;
        tracing::debug!(label, "option selected");
        self.commit();
        true
    }

    /// Unselect `label`; other candidates keep their flags.
    pub fn deselect(&mut self, label: &str) -> bool {
        let Some(idx) = self.position(label) else {
            return false;
        };
        let c = &mut self.candidates[idx];
        c.selected = false;
        c.pending_removal = false;
        tracing::debug!(label, "option deselected");
        self.commit();
        true
    }

    /// Chip dismiss button: unselect `label` and clear every highlight.
    pub fn dismiss(&mut self, label: &str) -> bool {
        let Some(idx) = self.position(label) else {
            return false;
        };
        for c in &mut self.candidates {
            c.pending_removal = false;
        }
        self.candidates[idx].selected = false;
        tracing::debug!(label, "chip dismissed");
        self.commit();
        true
    }

    /// Clear `pending_removal` everywhere except on `keep`.
    pub fn clear_highlight_except(&mut self, keep: Option<&str>) {
        for c in &mut self.candidates {
            if keep != Some(c.item.label.as_str()) {
                c.pending_removal = false;
            }
        }
        self.commit();
    }

    /// Highlight `label` alone. Only a selected candidate can be highlighted.
    pub fn highlight(&mut self, label: &str) -> bool {
        let Some(idx) = self.position(label) else {
            return false;
        };
        if !self.candidates[idx].selected {
            return false;
        }
        for (i, c) in self.candidates.iter_mut().enumerate() {
            c.pending_removal = i == idx;
        }
        self.commit();
        true
    }

    /// Two-step removal of the trailing chip. "Trailing" is the selected
    /// candidate nearest the end of the universe, not the most recent pick.
    pub fn backspace(&mut self) -> BackspaceOutcome {
        let Some(last) = self.candidates.iter().rev().find(|c| c.selected) else {
            return BackspaceOutcome::Noop;
        };
        let label = last.item.label.clone();
        let armed = last.pending_removal;
        if armed {
            self.deselect(&label);
            tracing::debug!(label = %label, "highlighted chip removed");
            BackspaceOutcome::Removed(label)
        } else {
            self.highlight(&label);
            tracing::debug!(label = %label, "chip armed for removal");
            BackspaceOutcome::Armed(label)
        }
    }

    /// Run several mutations as a single commit.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.batch_depth += 1;
        let result = f(self);
        self.batch_depth -= 1;
        self.commit();
        result
    }

    fn commit(&mut self) {
        if self.batch_depth > 0 {
            return;
        }
        let count = self.selected_count();
        if self.committed_count == Some(count) {
            return;
        }
        self.committed_count = Some(count);
        let items = self.selected_items();
        tracing::info!(count, "selection changed");
        if let Some(listener) = &mut self.listener {
            listener.selection_changed(&items);
        }
    }
}

/// Shared record of every notification a store has sent.
///
/// Cloning shares the record; hand [`SelectionLog::listener`] to the store
/// and keep a clone to read back what was reported.
#[derive(Debug, Clone, Default)]
pub struct SelectionLog {
    entries: Rc<RefCell<Vec<Vec<OptionItem>>>>,
}

impl SelectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&self) -> impl SelectionListener + use<> {
        let entries = Rc::clone(&self.entries);
        move |items: &[OptionItem]| {
            tracing::info!(
                target: "chipselect::notify",
                labels = ?items.iter().map(|i| i.label.as_str()).collect::<Vec<_>>(),
                "selection notified"
            );
            entries.borrow_mut().push(items.to_vec());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn last(&self) -> Option<Vec<OptionItem>> {
        self.entries.borrow().last().cloned()
    }

    pub fn entries(&self) -> Vec<Vec<OptionItem>> {
        self.entries.borrow().clone()
    }
}

/// Labels are the identity key, so they must be unique.
pub fn check_unique_labels(items: &[OptionItem]) -> Result<(), SelectError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.label.as_str()) {
            return Err(SelectError::DuplicateLabel(item.label.clone()));
        }
    }
    Ok(())
}
