use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture, Event, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::model::{OptionItem, PickerConfig, UiConfig};
use crate::ops::selection::{SelectError, SelectionLog};

use super::input;
use super::picker::Picker;
use super::render;
use super::theme::Theme;

/// Longest the event loop sleeps waiting for input
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Something clickable recorded during the last render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Input,
    Chip(String),
    ChipDismiss(String),
    DropdownRow(String),
}

/// Main application state
pub struct App {
    pub picker: Picker,
    pub theme: Theme,
    pub ui: UiConfig,
    pub should_quit: bool,
    /// Backspace touches chips on key release (keyboard enhancement active).
    /// Without it the terminal never reports releases, so the press does both halves.
    pub release_backspace: bool,
    /// Every notification sent by the picker, oldest first
    pub log: SelectionLog,
    /// Clickable regions, rebuilt on every render
    pub hit_regions: Vec<(Rect, Hit)>,
    /// Outline of the widget on screen; clicks outside it blur the field
    pub widget_area: Option<Rect>,
}

impl App {
    pub fn new(items: &[OptionItem], config: &PickerConfig) -> Result<Self, SelectError> {
        let log = SelectionLog::new();
        let picker = Picker::from_config(items, &config.input, log.listener())?;
        Ok(App {
            picker,
            theme: Theme::from_config(&config.ui),
            ui: config.ui.clone(),
            should_quit: false,
            release_backspace: false,
            log,
            hit_regions: Vec::new(),
            widget_area: None,
        })
    }

    /// Topmost clickable region under a cell. Later regions are drawn on top.
    pub fn hit_at(&self, col: u16, row: u16) -> Option<&Hit> {
        self.hit_regions
            .iter()
            .rev()
            .find(|(rect, _)| {
                col >= rect.x
                    && col < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(_, hit)| hit)
    }

    pub fn inside_widget(&self, col: u16, row: u16) -> bool {
        self.widget_area.is_some_and(|r| {
            col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
        })
    }
}

/// Run the picker until the user quits; returns the final selection.
pub fn run(
    items: &[OptionItem],
    config: &PickerConfig,
) -> Result<Vec<OptionItem>, Box<dyn std::error::Error>> {
    let mut app = App::new(items, config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        EnableBracketedPaste
    )?;

    let want_enhancement = config.input.kitty_keyboard.unwrap_or(true);
    app.release_backspace = want_enhancement
        && matches!(crossterm::terminal::supports_keyboard_enhancement(), Ok(true))
        && execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )
        .is_ok();
    tracing::debug!(release_backspace = app.release_backspace, "terminal ready");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook: Arc<PanicHook> = Arc::from(std::panic::take_hook());
    let chained = Arc::clone(&original_hook);
    let release_backspace = app.release_backspace;
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = restore_terminal(&mut io::stdout(), release_backspace);
        chained(panic_info);
    }));

    // The field has the caret when the picker opens
    app.picker.focus(Instant::now());

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal and the previous panic hook
    let _ = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| original_hook(panic_info)));
    disable_raw_mode()?;
    restore_terminal(terminal.backend_mut(), app.release_backspace)?;

    result?;
    Ok(app.picker.store.selected_items())
}

type PanicHook = dyn Fn(&std::panic::PanicHookInfo<'_>) + Sync + Send + 'static;

/// Undo everything `run` switched on, in reverse order.
fn restore_terminal<W: io::Write>(out: &mut W, release_backspace: bool) -> io::Result<()> {
    if release_backspace {
        execute!(out, PopKeyboardEnhancementFlags)?;
    }
    execute!(
        out,
        DisableBracketedPaste,
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen,
        Show
    )
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.picker.tick(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        // Wake up in time for a pending blur
        let timeout = app
            .picker
            .input
            .time_to_blur(Instant::now())
            .map_or(POLL_INTERVAL, |left| left.min(POLL_INTERVAL));

        if event::poll(timeout)? {
            let ev = event::read()?;
            input::handle_event(app, ev, Instant::now());
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
