use std::fs;
use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::cli::commands::ReplayArgs;
use crate::cli::output::*;
use crate::model::{OptionItem, PickerConfig};
use crate::ops::script::{Step, parse_script};
use crate::ops::selection::SelectError;
use crate::tui::app::App;
use crate::tui::input::handle_event;

/// A picker driven by script steps against a virtual clock.
///
/// Keys go through the same handler the terminal uses, with no keyboard
/// enhancement, so each Backspace is a full press-and-release.
pub struct Session {
    pub app: App,
    now: Instant,
}

impl Session {
    pub fn new(items: &[OptionItem], config: &PickerConfig) -> Result<Self, SelectError> {
        Ok(Session {
            app: App::new(items, config)?,
            now: Instant::now(),
        })
    }

    pub fn apply(&mut self, step: &Step) {
        let now = self.now;
        match step {
            Step::Focus => handle_event(&mut self.app, Event::FocusGained, now),
            Step::Blur => handle_event(&mut self.app, Event::FocusLost, now),
            Step::Wait(d) => {
                self.now += *d;
                self.app.picker.tick(self.now);
            }
            Step::Type(text) => {
                for c in text.chars() {
                    self.key(KeyCode::Char(c));
                }
            }
            Step::Backspace => self.key(KeyCode::Backspace),
            Step::Up => self.key(KeyCode::Up),
            Step::Down => self.key(KeyCode::Down),
            Step::Enter => self.key(KeyCode::Enter),
            Step::Pick(label) => {
                if !self.app.picker.pick(label) {
                    tracing::warn!(label = %label, "pick: no such option");
                }
            }
            Step::Dismiss(label) => {
                if !self.app.picker.dismiss(label) {
                    tracing::warn!(label = %label, "dismiss: no such option");
                }
            }
        }
    }

    fn key(&mut self, code: KeyCode) {
        let ev = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        handle_event(&mut self.app, ev, self.now);
    }

    pub fn final_state(&self) -> ReplayEventJson {
        let picker = &self.app.picker;
        ReplayEventJson::Final {
            selected: picker.store.selected_items(),
            query: picker.query().to_string(),
            state: focus_state_name(picker.input.state()),
            highlighted: picker.store.highlighted().map(|c| c.item.label.clone()),
            dropdown: if picker.dropdown_visible() {
                picker
                    .filtered()
                    .iter()
                    .map(|c| c.item.label.clone())
                    .collect()
            } else {
                Vec::new()
            },
            notifications: self.app.log.len(),
        }
    }
}

pub fn cmd_replay(
    args: ReplayArgs,
    items: &[OptionItem],
    config: &PickerConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines: Vec<String> = Vec::new();
    if let Some(path) = &args.script {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {}", path.display(), e))?;
        lines.extend(text.lines().map(str::to_string));
    }
    lines.extend(args.steps);
    let steps = parse_script(&lines)?;

    let mut session = Session::new(items, config)?;
    let mut reported = 0;
    report_new(&session, 0, &mut reported, json)?;
    for (i, step) in steps.iter().enumerate() {
        session.apply(step);
        report_new(&session, i + 1, &mut reported, json)?;
    }

    let summary = session.final_state();
    if json {
        println!("{}", serde_json::to_string(&summary)?);
    } else if let ReplayEventJson::Final {
        selected,
        query,
        state,
        highlighted,
        dropdown,
        notifications,
    } = summary
    {
        println!("selected: {}", format_labels(&selected));
        println!("query: {:?}", query);
        println!("state: {}", state);
        println!("highlighted: {}", highlighted.as_deref().unwrap_or("(none)"));
        if !dropdown.is_empty() {
            println!("dropdown: {}", dropdown.join(", "));
        }
        println!("notifications: {}", notifications);
    }
    Ok(())
}

/// Print notifications the log gained since the last call
fn report_new(
    session: &Session,
    step: usize,
    reported: &mut usize,
    json: bool,
) -> Result<(), serde_json::Error> {
    let entries = session.app.log.entries();
    for selected in entries.into_iter().skip(*reported) {
        *reported += 1;
        if json {
            let line = ReplayEventJson::Notify { step, selected };
            println!("{}", serde_json::to_string(&line)?);
        } else {
            println!("notify[{}]: {}", step, format_labels(&selected));
        }
    }
    Ok(())
}
