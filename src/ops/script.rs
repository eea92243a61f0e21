use std::time::Duration;

/// One step of a headless picker session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Focus,
    Blur,
    /// Advance the clock, firing any blur that comes due
    Wait(Duration),
    /// Type text into the query, one character at a time
    Type(String),
    /// Full Backspace keystroke (press then release)
    Backspace,
    Up,
    Down,
    /// Pick the option under the dropdown cursor
    Enter,
    /// Click a dropdown row
    Pick(String),
    /// Click a chip's dismiss button
    Dismiss(String),
}

/// Error type for session scripts. `step` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("step {step}: unknown command {command:?}")]
    UnknownCommand { step: usize, command: String },
    #[error("step {step}: `{command}` needs an argument")]
    MissingArgument { step: usize, command: String },
    #[error("step {step}: `{command}` takes no argument")]
    UnexpectedArgument { step: usize, command: String },
    #[error("step {step}: bad wait duration {value:?} (expected milliseconds)")]
    BadDuration { step: usize, value: String },
}

/// Parse one step. The argument is everything after the first space, kept
/// verbatim so queries with spaces survive.
pub fn parse_step(step: usize, text: &str) -> Result<Step, ScriptError> {
    let (command, arg) = match text.split_once(' ') {
        Some((c, a)) => (c, Some(a)),
        None => (text, None),
    };

    let needs_arg = |arg: Option<&str>| -> Result<String, ScriptError> {
        match arg {
            Some(a) if !a.is_empty() => Ok(a.to_string()),
            _ => Err(ScriptError::MissingArgument {
                step,
                command: command.to_string(),
            }),
        }
    };
    let no_arg = |s: Step| -> Result<Step, ScriptError> {
        match arg {
            Some(a) if !a.trim().is_empty() => Err(ScriptError::UnexpectedArgument {
                step,
                command: command.to_string(),
            }),
            _ => Ok(s),
        }
    };

    match command {
        "focus" => no_arg(Step::Focus),
        "blur" => no_arg(Step::Blur),
        "backspace" => no_arg(Step::Backspace),
        "up" => no_arg(Step::Up),
        "down" => no_arg(Step::Down),
        "enter" => no_arg(Step::Enter),
        "type" => Ok(Step::Type(needs_arg(arg)?)),
        "pick" => Ok(Step::Pick(needs_arg(arg)?)),
        "dismiss" => Ok(Step::Dismiss(needs_arg(arg)?)),
        "wait" => {
            let value = needs_arg(arg)?;
            let ms = value
                .trim()
                .trim_end_matches("ms")
                .parse::<u64>()
                .map_err(|_| ScriptError::BadDuration {
                    step,
                    value: value.clone(),
                })?;
            Ok(Step::Wait(Duration::from_millis(ms)))
        }
        other => Err(ScriptError::UnknownCommand {
            step,
            command: other.to_string(),
        }),
    }
}

/// Parse a list of steps. Blank lines and `#` comments are skipped but still
/// count toward step numbers.
pub fn parse_script<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        steps.push(parse_step(i + 1, line.trim_start())?);
    }
    Ok(steps)
}
