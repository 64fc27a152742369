//! Engine error types.
//!
//! Every variant is a caller bug (mismatched begin/end or push/pop). Runtime
//! conditions such as an unparsable number edit never surface here.

use std::fmt;

use thiserror::Error;

use crate::id::Id;

/// One of the engine's per-frame stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackKind {
    Container,
    Clip,
    Id,
    Layout,
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StackKind::Container => "container",
            StackKind::Clip => "clip",
            StackKind::Id => "id",
            StackKind::Layout => "layout",
        };
        f.write_str(name)
    }
}

/// Depth of each per-frame stack, reported when a frame ends unbalanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackDepths {
    pub container: usize,
    pub clip: usize,
    pub id: usize,
    pub layout: usize,
}

impl StackDepths {
    pub fn is_balanced(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for StackDepths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "container={} clip={} id={} layout={}",
            self.container, self.clip, self.id, self.layout
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UiError {
    #[error("{0} stack underflow")]
    StackUnderflow(StackKind),

    #[error("frame ended with unbalanced stacks ({0})")]
    UnbalancedStacks(StackDepths),

    #[error("layout call with no active layout frame")]
    EmptyLayoutStack,

    #[error("jump command at index {0} was never resolved")]
    UnresolvedJump(usize),

    #[error("command at index {0} is not a jump")]
    NotAJump(usize),

    #[error("root container {0:?} was begun more than once in one frame")]
    DuplicateRoot(Id),

    #[error("begin() called while a frame is already being built")]
    FrameInProgress,

    #[error("end() called without a matching begin()")]
    NoFrameInProgress,
}

/// Abort on a contract violation detected mid-frame.
#[track_caller]
pub(crate) fn contract_violation(err: UiError) -> ! {
    tracing::error!("ui contract violation: {}", err);
    panic!("{err}");
}
