//! Per-frame input accumulation.
//!
//! The host feeds normalized input through these setters once per frame,
//! before `Context::begin`. Edge state ("pressed this frame") is derived here,
//! so hosts that can only poll a button bitmask never have to track edges.

use bitflags::bitflags;

use crate::primitives::Point;

bitflags! {
    /// Mouse buttons held or pressed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 0x1;
        const RIGHT = 0x2;
        const MIDDLE = 0x4;
    }
}

bitflags! {
    /// Modifier and editing keys the engine reacts to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Keys: u8 {
        const SHIFT = 0x1;
        const CTRL = 0x2;
        const ALT = 0x4;
        const BACKSPACE = 0x8;
        const RETURN = 0x10;
    }
}

/// Input state for the frame being built.
#[derive(Debug, Clone, Default)]
pub struct Input {
    pub(crate) mouse_pos: Point,
    last_mouse_pos: Point,
    pub(crate) mouse_delta: Point,
    pub(crate) scroll_delta: Point,
    pub(crate) mouse_down: MouseButtons,
    pub(crate) mouse_pressed: MouseButtons,
    pub(crate) key_down: Keys,
    pub(crate) key_pressed: Keys,
    pub(crate) text: String,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        self.mouse_pos = Point::new(x, y);
    }

    /// Accumulate wheel movement; positive `y` scrolls content down.
    pub fn scroll(&mut self, x: f32, y: f32) {
        self.scroll_delta.x += x;
        self.scroll_delta.y += y;
    }

    pub fn mouse_down(&mut self, x: f32, y: f32, buttons: MouseButtons) {
        self.mouse_move(x, y);
        self.mouse_down |= buttons;
        self.mouse_pressed |= buttons;
    }

    pub fn mouse_up(&mut self, x: f32, y: f32, buttons: MouseButtons) {
        self.mouse_move(x, y);
        self.mouse_down &= !buttons;
    }

    /// Replace the held-button state with a polled mask. Buttons that flipped
    /// from up to down since the last call count as pressed this frame.
    pub fn set_button_mask(&mut self, mask: MouseButtons) {
        let changed = mask ^ self.mouse_down;
        self.mouse_pressed |= changed & mask;
        self.mouse_down = mask;
    }

    pub fn key_down(&mut self, keys: Keys) {
        self.key_down |= keys;
        self.key_pressed |= keys;
    }

    pub fn key_up(&mut self, keys: Keys) {
        self.key_down &= !keys;
    }

    /// Polled counterpart of `key_down`/`key_up`, with the same edge rule as
    /// `set_button_mask`.
    pub fn set_key_mask(&mut self, mask: Keys) {
        let changed = mask ^ self.key_down;
        self.key_pressed |= changed & mask;
        self.key_down = mask;
    }

    /// Append typed or pasted text.
    pub fn input_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn mouse_pos(&self) -> Point {
        self.mouse_pos
    }

    pub fn mouse_delta(&self) -> Point {
        self.mouse_delta
    }

    pub fn mouse_held(&self) -> MouseButtons {
        self.mouse_down
    }

    pub fn mouse_pressed(&self) -> MouseButtons {
        self.mouse_pressed
    }

    pub fn keys_held(&self) -> Keys {
        self.key_down
    }

    pub fn keys_pressed(&self) -> Keys {
        self.key_pressed
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn begin_frame(&mut self) {
        self.mouse_delta = self.mouse_pos - self.last_mouse_pos;
    }

    /// Drop single-frame edges once the frame has consumed them.
    pub(crate) fn end_frame(&mut self) {
        self.key_pressed = Keys::empty();
        self.mouse_pressed = MouseButtons::empty();
        self.text.clear();
        self.scroll_delta = Point::ORIGIN;
        self.last_mouse_pos = self.mouse_pos;
    }
}
