//! Widget/container option flags and widget results.

use bitflags::bitflags;

bitflags! {
    /// Behaviour switches accepted by widgets and containers. Some pairs are
    /// only exclusive by convention (e.g. `ALIGN_CENTER` with `ALIGN_RIGHT`:
    /// center wins).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Options: u32 {
        const ALIGN_CENTER = 1 << 0;
        const ALIGN_RIGHT = 1 << 1;
        const NO_INTERACT = 1 << 2;
        const NO_FRAME = 1 << 3;
        const NO_RESIZE = 1 << 4;
        const NO_SCROLL = 1 << 5;
        const NO_CLOSE = 1 << 6;
        const NO_TITLE = 1 << 7;
        /// Keep focus after the mouse button is released (text boxes).
        const HOLD_FOCUS = 1 << 8;
        /// Resize the window to its content every frame.
        const AUTO_SIZE = 1 << 9;
        const POPUP = 1 << 10;
        /// Do not create the container if it does not exist yet.
        const CLOSED = 1 << 11;
        /// Headers and tree nodes start out expanded.
        const EXPANDED = 1 << 12;
        /// Closing this window asks the host loop to stop.
        const STOP_ON_CLOSE = 1 << 13;
    }
}

bitflags! {
    /// What happened to a widget this frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Response: u8 {
        /// Open/expanded containers and nodes.
        const ACTIVE = 1 << 0;
        /// Clicked, or return pressed in a text box.
        const SUBMIT = 1 << 1;
        /// The bound value changed.
        const CHANGE = 1 << 2;
    }
}

impl Response {
    pub fn active(self) -> bool {
        self.contains(Self::ACTIVE)
    }

    pub fn submitted(self) -> bool {
        self.contains(Self::SUBMIT)
    }

    pub fn changed(self) -> bool {
        self.contains(Self::CHANGE)
    }
}
