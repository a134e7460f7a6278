//! Input normalisation.
//!
//! Front ends translate their native events into [`RawInput`]; the game only
//! ever sees the two per-frame signals of [`InputSignals`].

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{trace, warn};

/// What the player asked for during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSignals {
    pub tap: bool,
    pub quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Up,
    Escape,
    Char(char),
    Other,
}

/// Front-end independent event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    KeyDown { key: Key, ctrl: bool },
    PointerDown { primary: bool },
    TouchDown,
    /// Window close or equivalent.
    Close,
    Other,
}

impl RawInput {
    pub fn from_crossterm(event: &Event) -> Self {
        match event {
            Event::Key(key) => from_key_event(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(button) => RawInput::PointerDown {
                    primary: button == MouseButton::Left,
                },
                _ => RawInput::Other,
            },
            _ => RawInput::Other,
        }
    }
}

fn from_key_event(key: &KeyEvent) -> RawInput {
    if key.kind != KeyEventKind::Press {
        return RawInput::Other;
    }
    let mapped = match key.code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Up => Key::Up,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };
    RawInput::KeyDown {
        key: mapped,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
    }
}

/// Fold every event of one poll into a single set of signals.
pub fn normalize<I>(events: I) -> InputSignals
where
    I: IntoIterator<Item = RawInput>,
{
    let mut signals = InputSignals::default();
    for raw in events {
        match raw {
            RawInput::Close
            | RawInput::KeyDown {
                key: Key::Escape, ..
            } => signals.quit = true,
            RawInput::KeyDown {
                key: Key::Char('c' | 'C'),
                ctrl: true,
            } => signals.quit = true,
            RawInput::KeyDown {
                key: Key::Space | Key::Up,
                ..
            }
            | RawInput::PointerDown { primary: true }
            | RawInput::TouchDown => signals.tap = true,
            other => trace!(event = ?other, "input_ignored"),
        }
    }
    signals
}

pub trait InputSource {
    /// Drain pending events without blocking.
    fn poll(&mut self) -> InputSignals;
}

/// Reads crossterm's event queue.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    fn drain(&mut self) -> Vec<RawInput> {
        let mut events = Vec::new();
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => match event::read() {
                    Ok(event) => events.push(RawInput::from_crossterm(&event)),
                    Err(error) => {
                        warn!(%error, "input_read_failed");
                        break;
                    }
                },
                Ok(false) => break,
                Err(error) => {
                    warn!(%error, "input_poll_failed");
                    break;
                }
            }
        }
        events
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> InputSignals {
        let events = self.drain();
        normalize(events)
    }
}

/// Replays per-frame signals. Idle once the script runs out, or quits if
/// built with [`ScriptedInput::quitting_after`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSignals>,
    quit_when_done: bool,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputSignals>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            quit_when_done: false,
        }
    }

    pub fn quitting_after(frames: impl IntoIterator<Item = InputSignals>) -> Self {
        Self {
            quit_when_done: true,
            ..Self::new(frames)
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputSignals {
        self.frames.pop_front().unwrap_or(InputSignals {
            tap: false,
            quit: self.quit_when_done,
        })
    }
}
