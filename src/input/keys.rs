use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

use crate::controllers::session::Command;
use crate::core::actions::navigate::Navigation;

/// A raw event from the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(char),
    /// Mouse button 1-3 pressed at surface pixel `(x, y)`.
    Button { button: u8, x: u32, y: u32 },
}

/// Maps an input event to a command; unbound keys and buttons yield `None`.
#[must_use]
pub fn command_for(event: InputEvent) -> Option<Command> {
    match event {
        InputEvent::Key(key) => command_for_key(key),
        InputEvent::Button { button: 1..=3, x, y } => Some(Command::Recenter { x, y }),
        InputEvent::Button { .. } => None,
    }
}

fn command_for_key(key: char) -> Option<Command> {
    let command = match key {
        'u' => Command::Navigate(Navigation::PanUp),
        'd' => Command::Navigate(Navigation::PanDown),
        'l' => Command::Navigate(Navigation::PanLeft),
        'r' => Command::Navigate(Navigation::PanRight),
        'i' | '+' => Command::Navigate(Navigation::ZoomIn),
        'o' | '-' => Command::Navigate(Navigation::ZoomOut),
        'm' => Command::Navigate(Navigation::IncreaseDetail),
        'q' => Command::Quit,
        '1'..='8' => Command::SetWorkers(key.to_digit(10)? as usize),
        _ => return None,
    };

    Some(command)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("malformed click at offset {offset}: expected '@x,y'")]
    MalformedClick { offset: usize },
}

/// Parses a command script: one character per key press, plus `@x,y` for a
/// click at pixel `(x, y)`. Whitespace and unbound keys are skipped.
pub fn parse_script(script: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    let mut chars = script.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c != '@' {
            commands.extend(command_for(InputEvent::Key(c)));
            continue;
        }

        let x = take_number(&mut chars);
        let comma = chars.next_if(|&(_, c)| c == ',').is_some();
        let y = if comma { take_number(&mut chars) } else { None };

        match (x, y) {
            (Some(x), Some(y)) => commands.push(Command::Recenter { x, y }),
            _ => return Err(ScriptError::MalformedClick { offset }),
        }
    }

    Ok(commands)
}

fn take_number(chars: &mut Peekable<CharIndices<'_>>) -> Option<u32> {
    let mut digits = String::new();

    while let Some((_, d)) = chars.next_if(|(_, d)| d.is_ascii_digit()) {
        digits.push(d);
    }

    digits.parse().ok()
}
