/// Virtual game pad.
///
/// `KeyTracker` turns terminal key events into the set of buttons that are
/// currently held; `Pad` turns successive held sets into press edges, with
/// autorepeat on the D-pad.

use std::collections::HashMap;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Autorepeat;

// ── Buttons ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Buttons(u16);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    pub const UP: Buttons = Buttons(1 << 0);
    pub const RIGHT: Buttons = Buttons(1 << 1);
    pub const DOWN: Buttons = Buttons(1 << 2);
    pub const LEFT: Buttons = Buttons(1 << 3);
    /// Fire.
    pub const CROSS: Buttons = Buttons(1 << 4);
    /// Pause / resume.
    pub const START: Buttons = Buttons(1 << 5);

    pub const DPAD: Buttons = Buttons(0b1111);

    pub fn contains(self, other: Buttons) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Buttons;
    fn bitor(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    fn bitor_assign(&mut self, rhs: Buttons) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Buttons;
    fn bitand(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 & rhs.0)
    }
}

impl Not for Buttons {
    type Output = Buttons;
    fn not(self) -> Buttons {
        Buttons(!self.0)
    }
}

// ── Pad state ────────────────────────────────────────────────────────────────

/// One tick's view of the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PadState {
    /// Buttons down this tick.
    pub held: Buttons,
    /// Buttons that went down this tick, plus D-pad autorepeat pulses.
    pub pressed: Buttons,
}

impl PadState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn held(buttons: Buttons) -> Self {
        Self {
            held: buttons,
            pressed: Buttons::NONE,
        }
    }

    pub fn pressed(buttons: Buttons) -> Self {
        Self {
            held: buttons,
            pressed: buttons,
        }
    }
}

/// Edge detector with autorepeat for the D-pad.
#[derive(Clone, Debug)]
pub struct Pad {
    autorepeat: Autorepeat,
    previous: Buttons,
    /// Frames the current D-pad combination has been held.
    hold_frames: u32,
}

impl Pad {
    pub fn new(autorepeat: Autorepeat) -> Self {
        Self {
            autorepeat,
            previous: Buttons::NONE,
            hold_frames: 0,
        }
    }

    /// Feed the buttons held this frame and get the resulting pad state.
    pub fn update(&mut self, held: Buttons) -> PadState {
        let mut pressed = held & !self.previous;

        let dpad = held & Buttons::DPAD;
        if !dpad.is_empty() && dpad == (self.previous & Buttons::DPAD) {
            self.hold_frames = self.hold_frames.saturating_add(1);
            let Autorepeat { delay, interval } = self.autorepeat;
            let repeating = self.hold_frames >= delay
                && interval > 0
                && (self.hold_frames - delay) % interval == 0;
            if repeating {
                pressed |= dpad;
            }
        } else {
            self.hold_frames = 0;
        }

        self.previous = held;
        PadState { held, pressed }
    }
}

// ── Terminal key tracking ────────────────────────────────────────────────────

/// Frames a key stays live after a `Repeat` (or a re-sent `Press`) when the
/// terminal never reports releases. OS key repeat runs at 15 Hz or more, so
/// the next repeat lands before this runs out.
pub const HOLD_WINDOW: u64 = 8;

/// Frames a key stays live after its first `Press` when the terminal never
/// reports releases. Covers the OS initial repeat delay (up to about 660 ms
/// at 60 fps) so the first repeat continues the hold instead of starting a
/// new one.
pub const PRESS_HOLD: u64 = 40;

#[derive(Clone, Copy, Debug)]
struct KeyHold {
    last: u64,
    window: u64,
    released: bool,
}

/// Tracks which keys are down from a stream of `crossterm` key events.
///
/// With `reports_release` set (keyboard-enhanced terminals) a key is held
/// from its `Press` until its `Release`. Otherwise keys expire after a
/// stretch of silence: `PRESS_HOLD` frames after the first press, then
/// `HOLD_WINDOW` frames after each repeat.
#[derive(Debug, Default)]
pub struct KeyTracker {
    reports_release: bool,
    keys: HashMap<KeyCode, KeyHold>,
    quit: bool,
}

impl KeyTracker {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            ..Self::default()
        }
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    pub fn handle(&mut self, event: KeyEvent, frame: u64) {
        let code = normalize(event.code);
        match event.kind {
            KeyEventKind::Press => {
                if is_quit(&event) {
                    self.quit = true;
                }
                // Classic terminals repeat by re-sending Press
                let window = if self.is_live(&code, frame) {
                    HOLD_WINDOW
                } else {
                    PRESS_HOLD
                };
                self.keys.insert(
                    code,
                    KeyHold {
                        last: frame,
                        window,
                        released: false,
                    },
                );
            }
            KeyEventKind::Repeat => {
                self.keys.insert(
                    code,
                    KeyHold {
                        last: frame,
                        window: HOLD_WINDOW,
                        released: false,
                    },
                );
            }
            KeyEventKind::Release => match self.keys.get_mut(&code) {
                // A tap within one frame still counts for that frame
                Some(hold) if hold.last == frame => {
                    hold.window = 0;
                    hold.released = true;
                }
                _ => {
                    self.keys.remove(&code);
                }
            },
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Buttons whose keys are still live at `frame`.
    pub fn held(&self, frame: u64) -> Buttons {
        self.keys
            .keys()
            .filter(|code| self.is_live(code, frame))
            .fold(Buttons::NONE, |acc, code| acc | button_for(code))
    }

    fn is_live(&self, code: &KeyCode, frame: u64) -> bool {
        match self.keys.get(code) {
            None => false,
            Some(hold) if self.reports_release && !hold.released => true,
            Some(hold) => frame.saturating_sub(hold.last) <= hold.window,
        }
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') | KeyCode::Char('C') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

fn button_for(code: &KeyCode) -> Buttons {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Buttons::UP,
        KeyCode::Down | KeyCode::Char('s') => Buttons::DOWN,
        KeyCode::Left | KeyCode::Char('a') => Buttons::LEFT,
        KeyCode::Right | KeyCode::Char('d') => Buttons::RIGHT,
        KeyCode::Char(' ') | KeyCode::Char('j') => Buttons::CROSS,
        KeyCode::Enter | KeyCode::Char('p') => Buttons::START,
        _ => Buttons::NONE,
    }
}
