//! nexus-imui: an immediate-mode UI engine.
//!
//! The caller re-declares the whole interface every frame; the engine keeps
//! only what must survive between frames (hover, focus, window placement,
//! scroll offsets, expanded tree nodes) and turns each frame's declarations
//! into a flat list of draw commands for the host renderer.
//!
//! # Frame protocol
//!
//! ```ignore
//! use nexus_imui::{Context, MonospaceMetrics, Options, Rect};
//!
//! let mut ctx = Context::new(MonospaceMetrics::default());
//! loop {
//!     // feed ctx.input from platform events
//!     ctx.begin();
//!     if ctx.begin_window("Demo", Rect::new(40.0, 40.0, 300.0, 200.0), Options::empty()) {
//!         if ctx.button("Press me").submitted() { /* ... */ }
//!         ctx.end_window();
//!     }
//!     ctx.end()?;
//!     for cmd in ctx.commands() { /* paint */ }
//! }
//! ```
//!
//! Windows and popups are painted back to front by z-order regardless of
//! the order they were declared in. The engine installs no `tracing`
//! subscriber; hosts choose their own.

// Geometry and identity
pub mod primitives;
pub mod id;
pub mod error;

// Per-frame machinery
pub mod input;
pub mod command;
pub mod clip;
pub mod layout;

// Look and measurement
pub mod style;
pub mod text;
pub mod options;

// Engine
pub mod context;
pub mod container;
pub mod widgets;

// Persistence
pub mod settings;

pub use clip::ClipVisibility;
pub use command::{Command, CommandList, Commands, DrawCommand, Icon};
pub use container::Container;
pub use context::{ColorOverride, Context};
pub use error::{StackDepths, StackKind, UiError};
pub use id::Id;
pub use input::{Input, Keys, MouseButtons};
pub use layout::{Layout, NextCell};
pub use options::{Options, Response};
pub use primitives::{Color, Point, Rect, Size};
pub use settings::{SettingsError, UiSettings, WindowPlacement};
pub use style::{ColorRole, FontId, Palette, Style};
pub use text::{MonospaceMetrics, TextMetrics, wrap_text};
