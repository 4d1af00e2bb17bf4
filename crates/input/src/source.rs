//! Crossterm-backed [`InputSource`].
//!
//! Terminals with the kitty keyboard protocol report key-up; everything else
//! only reports presses (plus OS auto-repeat as more presses). For the latter a
//! held key is considered released after `KEY_RELEASE_TIMEOUT_MS` without a
//! fresh press.

use std::io;
use std::time::Duration;

use anyhow::Result;
use arrayvec::ArrayVec;
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use tracing::debug;

use crate::core::{HostSignal, InputSource};
use crate::map::{map_key, KeyBinding};
use crate::types::{Control, InputEvent};

/// Silence after which a held key counts as released when the terminal never
/// reports key-up.
pub const KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    control: Control,
    last_seen: u64,
}

/// Turns raw key transitions into press / repeat / release events.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: ArrayVec<HeldKey, 7>,
    emulate_release: bool,
    release_timeout_ms: u64,
}

impl KeyTracker {
    pub fn new(emulate_release: bool) -> Self {
        Self {
            held: ArrayVec::new(),
            emulate_release,
            release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.iter().any(|h| h.control == control)
    }

    /// Record one key transition at `now_ms`.
    pub fn observe(
        &mut self,
        control: Control,
        kind: KeyEventKind,
        now_ms: u64,
        events: &mut Vec<InputEvent>,
    ) {
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if let Some(held) = self.held.iter_mut().find(|h| h.control == control) {
                    held.last_seen = now_ms;
                    events.push(InputEvent::Repeat(control));
                } else {
                    // One slot per control, so this never overflows.
                    let _ = self.held.try_push(HeldKey {
                        control,
                        last_seen: now_ms,
                    });
                    events.push(InputEvent::Press(control));
                }
            }
            KeyEventKind::Release => {
                if let Some(idx) = self.held.iter().position(|h| h.control == control) {
                    self.held.remove(idx);
                    events.push(InputEvent::Release(control));
                }
            }
        }
    }

    /// Synthesize releases for keys silent for the timeout. No-op when the
    /// terminal reports key-up itself.
    pub fn expire(&mut self, now_ms: u64, events: &mut Vec<InputEvent>) {
        if !self.emulate_release {
            return;
        }
        let timeout = self.release_timeout_ms;
        self.held.retain(|held| {
            if now_ms.saturating_sub(held.last_seen) >= timeout {
                events.push(InputEvent::Release(held.control));
                false
            } else {
                true
            }
        });
    }

    /// Release everything (restart, focus loss).
    pub fn release_all(&mut self, events: &mut Vec<InputEvent>) {
        for held in self.held.drain(..) {
            events.push(InputEvent::Release(held.control));
        }
    }
}

/// Reads the terminal's event queue without blocking.
pub struct CrosstermInput {
    tracker: KeyTracker,
}

impl CrosstermInput {
    /// `keyboard_enhanced` should be the result of
    /// [`enable_keyboard_enhancement`].
    pub fn new(keyboard_enhanced: bool) -> Self {
        Self {
            tracker: KeyTracker::new(!keyboard_enhanced),
        }
    }

    /// Translate one key event. Exposed so hosts can feed events they read
    /// themselves.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        now_ms: u64,
        events: &mut Vec<InputEvent>,
    ) -> HostSignal {
        match map_key(key) {
            Some(KeyBinding::Quit) if key.kind != KeyEventKind::Release => HostSignal::Quit,
            Some(KeyBinding::Restart) if key.kind == KeyEventKind::Press => {
                self.tracker.release_all(events);
                HostSignal::Restart
            }
            Some(KeyBinding::Play(control)) => {
                self.tracker.observe(control, key.kind, now_ms, events);
                HostSignal::Continue
            }
            _ => HostSignal::Continue,
        }
    }

    pub fn tracker(&self) -> &KeyTracker {
        &self.tracker
    }
}

impl InputSource for CrosstermInput {
    fn poll(&mut self, now_ms: u64, events: &mut Vec<InputEvent>) -> Result<HostSignal> {
        let mut signal = HostSignal::Continue;
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match self.handle_key(key, now_ms, events) {
                    HostSignal::Quit => return Ok(HostSignal::Quit),
                    HostSignal::Restart => signal = HostSignal::Restart,
                    HostSignal::Continue => {}
                },
                Event::FocusLost => self.tracker.release_all(events),
                _ => {}
            }
        }
        self.tracker.expire(now_ms, events);
        Ok(signal)
    }
}

/// Ask the terminal to report key-up events. Returns whether it agreed.
/// Requires raw mode.
pub fn enable_keyboard_enhancement() -> Result<bool> {
    if !terminal::supports_keyboard_enhancement()? {
        debug!("terminal lacks keyboard enhancement, emulating key release");
        return Ok(false);
    }
    execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )?;
    debug!("keyboard enhancement enabled");
    Ok(true)
}

pub fn disable_keyboard_enhancement() -> Result<()> {
    execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
    Ok(())
}
