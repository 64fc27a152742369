//! Clip region stack.

use crate::error::{StackKind, UiError, contract_violation};
use crate::primitives::Rect;

/// How a rectangle relates to the active clip region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipVisibility {
    /// Entirely inside: draw without touching the clip state.
    Visible,
    /// Straddles the edge: bracket the draw with clip commands.
    Partial,
    /// Entirely outside: skip the draw.
    Hidden,
}

/// Stack of clip rectangles, each the intersection of itself with its parent.
#[derive(Debug, Default)]
pub struct ClipStack {
    stack: Vec<Rect>,
}

impl ClipStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `rect` intersected with the current region.
    pub fn push(&mut self, rect: Rect) {
        let clipped = rect.clip_to(&self.current());
        self.stack.push(clipped);
    }

    /// Push a region without intersecting it with the parent. Root containers
    /// use this so a popup opened from inside a window escapes its clip.
    pub fn push_unclipped(&mut self) {
        self.stack.push(Rect::UNCLIPPED);
    }

    pub fn pop(&mut self) -> Rect {
        match self.stack.pop() {
            Some(rect) => rect,
            None => contract_violation(UiError::StackUnderflow(StackKind::Clip)),
        }
    }

    /// The active region; everything is visible when the stack is empty.
    pub fn current(&self) -> Rect {
        self.stack.last().copied().unwrap_or(Rect::UNCLIPPED)
    }

    pub fn classify(&self, rect: &Rect) -> ClipVisibility {
        let clip = self.current();
        if clip.misses(rect) {
            ClipVisibility::Hidden
        } else if clip.encloses(rect) {
            ClipVisibility::Visible
        } else {
            ClipVisibility::Partial
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn clear(&mut self) {
        self.stack.clear();
    }
}
