use std::time::{Duration, Instant};

/// Observable state of the text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Idle,
    Focused,
    FocusedWithQuery,
}

/// Owns the query string, the focus flag and the pending blur deadline.
///
/// Losing focus does not close the dropdown right away: the blur only takes
/// effect once `blur_delay` has elapsed, so a click on a dropdown row is not
/// pre-empted by the dropdown disappearing. Regaining focus cancels the
/// pending blur.
#[derive(Debug, Clone)]
pub struct InputController {
    query: String,
    focused: bool,
    blur_deadline: Option<Instant>,
    blur_delay: Duration,
    /// Dropdown cursor (index into the filtered list)
    row: usize,
}

impl InputController {
    pub fn new(blur_delay: Duration) -> Self {
        InputController {
            query: String::new(),
            focused: false,
            blur_deadline: None,
            blur_delay,
            row: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn state(&self) -> FocusState {
        match (self.focused, self.query.is_empty()) {
            (false, _) => FocusState::Idle,
            (true, true) => FocusState::Focused,
            (true, false) => FocusState::FocusedWithQuery,
        }
    }

    pub fn blur_delay(&self) -> Duration {
        self.blur_delay
    }

    pub fn pending_blur(&self) -> Option<Instant> {
        self.blur_deadline
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Visible iff focused and there is something to show
    pub fn dropdown_visible(&self, filtered_len: usize) -> bool {
        self.focused && filtered_len > 0
    }

    pub fn focus(&mut self, _now: Instant) {
        if self.blur_deadline.take().is_some() {
            tracing::debug!("pending blur cancelled by refocus");
        }
        self.focused = true;
    }

    /// Schedule the blur. A later blur pushes the deadline back.
    pub fn blur(&mut self, now: Instant) {
        self.blur_deadline = Some(now + self.blur_delay);
    }

    /// Fire the pending blur if its deadline has passed. Returns true when
    /// the focus flag changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.blur_deadline {
            Some(deadline) if now >= deadline => {
                self.blur_deadline = None;
                let was_focused = self.focused;
                self.focused = false;
                tracing::debug!("blur fired");
                was_focused
            }
            _ => false,
        }
    }

    /// Time left until the pending blur fires (for the event loop's poll timeout)
    pub fn time_to_blur(&self, now: Instant) -> Option<Duration> {
        self.blur_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn insert_char(&mut self, c: char) {
        self.query.push(c);
        self.row = 0;
    }

    pub fn insert_str(&mut self, s: &str) {
        self.query.push_str(s);
        self.row = 0;
    }

    /// Remove the last character of the query. Returns false when it was
    /// already empty.
    pub fn delete_back(&mut self) -> bool {
        let removed = self.query.pop().is_some();
        if removed {
            self.row = 0;
        }
        removed
    }

    /// An option was picked: the query resets and the dropdown closes even
    /// though the caret stays in the field.
    pub fn on_pick(&mut self) {
        self.query.clear();
        self.focused = false;
        self.blur_deadline = None;
        self.row = 0;
    }

    pub fn move_up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn move_down(&mut self, filtered_len: usize) {
        if self.row + 1 < filtered_len {
            self.row += 1;
        }
    }

    /// Keep the cursor inside a list that may have shrunk
    pub fn clamp_row(&mut self, filtered_len: usize) {
        if filtered_len == 0 {
            self.row = 0;
        } else if self.row >= filtered_len {
            self.row = filtered_len - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn starts_idle() {
        let input = InputController::new(DELAY);
        assert_eq!(input.state(), FocusState::Idle);
        assert!(!input.dropdown_visible(3));
    }

    #[test]
    fn state_tracks_focus_and_query() {
        let t0 = Instant::now();
        let mut input = InputController::new(DELAY);
        input.focus(t0);
        assert_eq!(input.state(), FocusState::Focused);
        input.insert_char('a');
        assert_eq!(input.state(), FocusState::FocusedWithQuery);
        input.delete_back();
        assert_eq!(input.state(), FocusState::Focused);
    }

    #[test]
    fn blur_waits_for_the_delay() {
        let t0 = Instant::now();
        let mut input = InputController::new(DELAY);
        input.focus(t0);
        input.blur(t0);
        assert!(!input.tick(t0 + Duration::from_millis(499)));
        assert!(input.is_focused());
        assert!(input.tick(t0 + DELAY));
        assert_eq!(input.state(), FocusState::Idle);
        assert!(input.pending_blur().is_none());
    }

    #[test]
    fn refocus_within_delay_cancels_blur() {
        let t0 = Instant::now();
        let mut input = InputController::new(DELAY);
        input.focus(t0);
        input.blur(t0);
        input.focus(t0 + Duration::from_millis(100));
        assert!(!input.tick(t0 + Duration::from_millis(600)));
        assert!(input.is_focused());
    }

    #[test]
    fn blur_refocus_blur_fires_once_after_last_blur() {
        let t0 = Instant::now();
        let mut input = InputController::new(DELAY);
        input.focus(t0);
        input.blur(t0);
        input.focus(t0 + Duration::from_millis(100));
        input.blur(t0 + Duration::from_millis(200));
        assert!(!input.tick(t0 + Duration::from_millis(600)));
        assert!(input.is_focused());
        assert!(input.tick(t0 + Duration::from_millis(700)));
    }

    #[test]
    fn dropdown_needs_focus_and_rows() {
        let mut input = InputController::new(DELAY);
        input.focus(Instant::now());
        assert!(input.dropdown_visible(1));
        assert!(!input.dropdown_visible(0));
    }

    #[test]
    fn pick_clears_query_and_focus() {
        let t0 = Instant::now();
        let mut input = InputController::new(DELAY);
        input.focus(t0);
        input.insert_str("Bo");
        input.blur(t0);
        input.on_pick();
        assert_eq!(input.query(), "");
        assert!(!input.is_focused());
        assert!(input.pending_blur().is_none());
    }

    #[test]
    fn delete_back_on_empty_query() {
        let mut input = InputController::new(DELAY);
        assert!(!input.delete_back());
        input.insert_char('é');
        assert!(input.delete_back());
        assert_eq!(input.query(), "");
    }

    #[test]
    fn row_moves_within_bounds_and_resets_on_typing() {
        let mut input = InputController::new(DELAY);
        input.move_down(3);
        input.move_down(3);
        input.move_down(3);
        assert_eq!(input.row(), 2);
        input.clamp_row(1);
        assert_eq!(input.row(), 0);
        input.move_down(3);
        input.insert_char('x');
        assert_eq!(input.row(), 0);
        input.move_up();
        assert_eq!(input.row(), 0);
    }

    #[test]
    fn time_to_blur_counts_down() {
        let t0 = Instant::now();
        let mut input = InputController::new(DELAY);
        assert_eq!(input.time_to_blur(t0), None);
        input.blur(t0);
        assert_eq!(
            input.time_to_blur(t0 + Duration::from_millis(200)),
            Some(Duration::from_millis(300))
        );
        assert_eq!(input.time_to_blur(t0 + DELAY * 2), Some(Duration::ZERO));
    }
}
