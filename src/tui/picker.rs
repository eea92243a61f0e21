use std::time::{Duration, Instant};

use crate::model::{Candidate, InputConfig, OptionItem};
use crate::ops::selection::{BackspaceOutcome, SelectError, SelectionListener, SelectionStore};

use super::input::InputController;

/// The multi-select widget state: the selection store plus the input
/// controller, wired together the way user events need them.
#[derive(Debug)]
pub struct Picker {
    pub store: SelectionStore,
    pub input: InputController,
}

impl Picker {
    /// Build the widget and perform the mount commit, which reports the
    /// initial empty selection to `listener`.
    pub fn new(
        items: &[OptionItem],
        blur_delay: Duration,
        listener: impl SelectionListener + 'static,
    ) -> Result<Self, SelectError> {
        let mut store = SelectionStore::new(items)?.with_listener(listener);
        store.mount();
        Ok(Picker {
            store,
            input: InputController::new(blur_delay),
        })
    }

    pub fn from_config(
        items: &[OptionItem],
        config: &InputConfig,
        listener: impl SelectionListener + 'static,
    ) -> Result<Self, SelectError> {
        Self::new(items, Duration::from_millis(config.blur_delay_ms), listener)
    }

    pub fn query(&self) -> &str {
        self.input.query()
    }

    pub fn filtered(&self) -> Vec<&Candidate> {
        self.store.filtered(self.input.query())
    }

    pub fn selected(&self) -> Vec<&Candidate> {
        self.store.selected()
    }

    pub fn dropdown_visible(&self) -> bool {
        self.input.dropdown_visible(self.filtered().len())
    }

    /// Label under the dropdown cursor, when the dropdown is showing
    pub fn cursor_label(&self) -> Option<String> {
        if !self.dropdown_visible() {
            return None;
        }
        self.filtered()
            .get(self.input.row())
            .map(|c| c.item.label.clone())
    }

    pub fn focus(&mut self, now: Instant) {
        self.input.focus(now);
    }

    pub fn blur(&mut self, now: Instant) {
        self.input.blur(now);
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.input.tick(now)
    }

    pub fn type_char(&mut self, c: char) {
        self.input.insert_char(c);
    }

    pub fn type_str(&mut self, s: &str) {
        self.input.insert_str(s);
    }

    /// Key-down half of Backspace: edits the query only.
    pub fn backspace_press(&mut self) -> bool {
        self.input.delete_back()
    }

    /// Key-up half of Backspace: acts on the chips, but only when the query
    /// is empty at this moment.
    pub fn backspace_release(&mut self) -> BackspaceOutcome {
        if !self.input.query().is_empty() {
            return BackspaceOutcome::Noop;
        }
        self.store.backspace()
    }

    /// Choose an option from the dropdown.
    pub fn pick(&mut self, label: &str) -> bool {
        if !self.store.select(label) {
            return false;
        }
        self.input.on_pick();
        tracing::info!(label, "picked");
        true
    }

    pub fn pick_at_cursor(&mut self) -> Option<String> {
        let label = self.cursor_label()?;
        self.pick(&label).then_some(label)
    }

    /// Chip dismiss button
    pub fn dismiss(&mut self, label: &str) -> bool {
        let dismissed = self.store.dismiss(label);
        if dismissed {
            let len = self.filtered().len();
            self.input.clamp_row(len);
        }
        dismissed
    }

    pub fn move_up(&mut self) {
        self.input.move_up();
    }

    pub fn move_down(&mut self) {
        let len = self.filtered().len();
        self.input.move_down(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn people() -> Vec<OptionItem> {
        vec![
            OptionItem::new("Alice", "alice@example.com"),
            OptionItem::new("Bob", "bob@example.com"),
            OptionItem::new("Carl", "carl@example.com"),
        ]
    }

    fn picker() -> (Picker, Rc<RefCell<usize>>) {
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let p = Picker::new(&people(), Duration::from_millis(500), move |_: &[OptionItem]| {
            *sink.borrow_mut() += 1;
        })
        .unwrap();
        (p, calls)
    }

    fn labels(list: &[&Candidate]) -> Vec<String> {
        list.iter().map(|c| c.item.label.clone()).collect()
    }

    #[test]
    fn mount_notifies_once() {
        let (_, calls) = picker();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn pick_resets_query_and_closes_dropdown() {
        let (mut p, _) = picker();
        p.focus(Instant::now());
        p.type_str("Bo");
        assert!(p.dropdown_visible());
        assert!(p.pick("Bob"));
        assert_eq!(p.query(), "");
        assert!(!p.dropdown_visible());
    }

    #[test]
    fn pick_at_cursor_follows_row() {
        let (mut p, _) = picker();
        p.focus(Instant::now());
        p.move_down();
        assert_eq!(p.pick_at_cursor(), Some("Bob".to_string()));
        assert_eq!(labels(&p.selected()), vec!["Bob"]);
    }

    #[test]
    fn pick_at_cursor_needs_visible_dropdown() {
        let (mut p, _) = picker();
        assert_eq!(p.pick_at_cursor(), None);
    }

    #[test]
    fn backspace_release_ignored_with_query() {
        let (mut p, _) = picker();
        p.pick("Alice");
        p.type_char('x');
        assert_eq!(p.backspace_release(), BackspaceOutcome::Noop);
        assert!(p.store.highlighted().is_none());
    }

    #[test]
    fn backspace_press_then_release_on_last_char_arms_chip() {
        let (mut p, _) = picker();
        p.pick("Alice");
        p.type_char('x');
        assert!(p.backspace_press());
        assert_eq!(
            p.backspace_release(),
            BackspaceOutcome::Armed("Alice".to_string())
        );
    }

    #[test]
    fn dismiss_keeps_query_and_focus() {
        let (mut p, calls) = picker();
        p.pick("Carl");
        p.focus(Instant::now());
        p.type_char('a');
        assert!(p.dismiss("Carl"));
        assert_eq!(p.query(), "a");
        assert!(p.input.is_focused());
        assert_eq!(*calls.borrow(), 3);
    }

    #[test]
    fn pick_unknown_label_keeps_input_state() {
        let (mut p, calls) = picker();
        p.focus(Instant::now());
        p.type_str("Zed");
        assert!(!p.pick("Zed"));
        assert_eq!(p.query(), "Zed");
        assert!(p.input.is_focused());
        assert_eq!(*calls.borrow(), 1);
    }
}
