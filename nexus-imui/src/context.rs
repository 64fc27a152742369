//! The engine context and frame protocol.
//!
//! A `Context` is created once per UI instance. Each frame the host feeds
//! input, calls `begin`, lets the caller declare widgets, calls `end`, then
//! paints `commands()`. Everything transient (stacks, root list, command
//! list) lives between `begin` and `end`; hover, focus, containers and
//! expansion state persist across frames.

use std::collections::{HashMap, HashSet};
use std::ops::{Deref, DerefMut};

use tracing::{debug, trace};

use crate::clip::{ClipStack, ClipVisibility};
use crate::command::{Command, CommandList, Commands, Icon};
use crate::container::Container;
use crate::error::{StackDepths, StackKind, UiError, contract_violation};
use crate::id::{Id, IdStack};
use crate::input::{Input, MouseButtons};
use crate::layout::{Layout, NextCell};
use crate::options::Options;
use crate::primitives::{Color, Point, Rect};
use crate::style::{ColorRole, FontId, Style};
use crate::text::TextMetrics;

/// A number being typed into a slider or number field after shift-click.
#[derive(Debug, Clone)]
pub(crate) struct NumberEdit {
    pub id: Id,
    pub buffer: String,
}

pub struct Context {
    metrics: Box<dyn TextMetrics>,
    pub style: Style,
    pub input: Input,

    building: bool,
    frame: u64,
    stop_requested: bool,

    pub(crate) commands: CommandList,
    pub(crate) root_list: Vec<Id>,
    pub(crate) container_stack: Vec<Id>,
    pub(crate) clips: ClipStack,
    pub(crate) ids: IdStack,
    pub(crate) layouts: Vec<Layout>,

    pub(crate) containers: HashMap<Id, Container>,
    pub(crate) expanded: HashSet<Id>,
    pub(crate) number_edit: Option<NumberEdit>,

    pub(crate) hover: Option<Id>,
    pub(crate) focus: Option<Id>,
    updated_focus: bool,
    pub(crate) hover_root: Option<Id>,
    pub(crate) next_hover_root: Option<Id>,
    pub(crate) scroll_target: Option<Id>,
    pub(crate) last_zindex: i32,
    last_rect: Rect,
}

impl Context {
    pub fn new(metrics: impl TextMetrics + 'static) -> Self {
        Self {
            metrics: Box::new(metrics),
            style: Style::default(),
            input: Input::new(),
            building: false,
            frame: 0,
            stop_requested: false,
            commands: CommandList::new(),
            root_list: Vec::new(),
            container_stack: Vec::new(),
            clips: ClipStack::new(),
            ids: IdStack::new(),
            layouts: Vec::new(),
            containers: HashMap::new(),
            expanded: HashSet::new(),
            number_edit: None,
            hover: None,
            focus: None,
            updated_focus: false,
            hover_root: None,
            next_hover_root: None,
            scroll_target: None,
            last_zindex: 0,
            last_rect: Rect::ZERO,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    // =====================================================================
    // Frame protocol
    // =====================================================================

    pub fn begin(&mut self) {
        if self.building {
            contract_violation(UiError::FrameInProgress);
        }
        self.commands.clear();
        self.root_list.clear();
        self.scroll_target = None;
        self.hover_root = self.next_hover_root.take();
        self.input.begin_frame();
        self.frame += 1;
        self.building = true;
    }

    /// Finish the frame and resolve paint order.
    ///
    /// Unbalanced stacks or an unresolved jump discard the frame: the
    /// command list is emptied and the context returns to idle.
    pub fn end(&mut self) -> Result<(), UiError> {
        if !self.building {
            return Err(UiError::NoFrameInProgress);
        }

        let depths = self.stack_depths();
        if !depths.is_balanced() {
            self.discard_frame();
            return Err(UiError::UnbalancedStacks(depths));
        }

        if let Some(id) = self.duplicate_root() {
            self.discard_frame();
            return Err(UiError::DuplicateRoot(id));
        }

        if let Some(target) = self.scroll_target {
            let delta = self.input.scroll_delta;
            if let Some(cnt) = self.containers.get_mut(&target) {
                cnt.scroll_by(delta);
            }
        }

        if !self.updated_focus {
            self.focus = None;
        }
        self.updated_focus = false;

        // A press inside a lower root container raises it.
        if !self.input.mouse_pressed.is_empty() {
            let lower = self.next_hover_root.filter(|id| {
                self.containers
                    .get(id)
                    .is_some_and(|cnt| cnt.zindex < self.last_zindex)
            });
            if let Some(id) = lower {
                self.bring_to_front(id);
            }
        }

        self.input.end_frame();
        self.splice_roots();
        self.building = false;

        if let Err(err) = self.commands.check_resolved() {
            self.discard_frame();
            return Err(err);
        }

        trace!(
            frame = self.frame,
            commands = self.commands.len(),
            roots = self.root_list.len(),
            "frame complete"
        );
        Ok(())
    }

    fn discard_frame(&mut self) {
        debug!(frame = self.frame, "discarding frame");
        self.commands.clear();
        self.root_list.clear();
        self.container_stack.clear();
        self.clips.clear();
        self.ids.clear();
        self.layouts.clear();
        self.input.end_frame();
        self.building = false;
    }

    /// First root container declared twice this frame. Its first span's tail
    /// jump would otherwise never be patched.
    fn duplicate_root(&self) -> Option<Id> {
        let mut seen = HashSet::new();
        self.root_list.iter().copied().find(|id| !seen.insert(*id))
    }

    /// Chain root containers back to front by patching their jump commands.
    fn splice_roots(&mut self) {
        let mut roots: Vec<(i32, usize, usize)> = self
            .root_list
            .iter()
            .filter_map(|id| {
                let cnt = self.containers.get(id)?;
                Some((cnt.zindex, cnt.head?, cnt.tail?))
            })
            .collect();
        if roots.is_empty() {
            return;
        }
        roots.sort_by_key(|&(zindex, _, _)| zindex);

        // Loose commands replay first, then this entry jump hands over to
        // the back-most container.
        let entry = self.commands.push_jump();
        self.commands.set_jump(entry, roots[0].1 + 1);
        for pair in roots.windows(2) {
            self.commands.set_jump(pair[0].2, pair[1].1 + 1);
        }
        let end = self.commands.len();
        self.commands.set_jump(roots[roots.len() - 1].2, end);
    }

    pub fn stack_depths(&self) -> StackDepths {
        StackDepths {
            container: self.container_stack.len(),
            clip: self.clips.depth(),
            id: self.ids.depth(),
            layout: self.layouts.len(),
        }
    }

    pub fn is_building(&self) -> bool {
        self.building
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Paint-order replay of the last completed frame.
    pub fn commands(&self) -> Commands<'_> {
        self.commands.iter()
    }

    pub fn command_list(&self) -> &CommandList {
        &self.commands
    }

    /// Ask the host loop to stop once the current frame has been painted.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    // =====================================================================
    // Identity, hover and focus
    // =====================================================================

    pub fn get_id(&mut self, name: &str) -> Id {
        self.ids.resolve(name)
    }

    pub fn push_id(&mut self, name: &str) -> Id {
        self.ids.push_name(name)
    }

    /// Scope ids by an integer key, e.g. a loop index.
    pub fn push_id_index(&mut self, index: u64) -> Id {
        self.ids.push_index(index)
    }

    pub fn pop_id(&mut self) {
        self.ids.pop();
    }

    pub fn last_id(&self) -> Option<Id> {
        self.ids.last()
    }

    pub fn hover(&self) -> Option<Id> {
        self.hover
    }

    pub fn focus(&self) -> Option<Id> {
        self.focus
    }

    pub fn set_focus(&mut self, id: Option<Id>) {
        self.focus = id;
        self.updated_focus = true;
    }

    pub fn hover_root(&self) -> Option<Id> {
        self.hover_root
    }

    /// True if the container on top of the stack belongs to the hover root.
    fn in_hover_root(&self) -> bool {
        for id in self.container_stack.iter().rev() {
            if Some(*id) == self.hover_root {
                return true;
            }
            // Only panels nest inside a root; stop at the first root.
            if self.containers.get(id).is_some_and(|cnt| cnt.root) {
                break;
            }
        }
        false
    }

    pub fn mouse_over(&self, rect: Rect) -> bool {
        let mouse = self.input.mouse_pos;
        rect.contains(mouse) && self.clips.current().contains(mouse) && self.in_hover_root()
    }

    /// Shared hover/focus state machine for interactive widgets.
    pub fn update_control(&mut self, id: Id, rect: Rect, opts: Options) {
        let mouse_over = self.mouse_over(rect);

        if self.focus == Some(id) {
            self.updated_focus = true;
        }
        if opts.contains(Options::NO_INTERACT) {
            return;
        }
        if mouse_over && self.input.mouse_down.is_empty() {
            self.hover = Some(id);
        }

        if self.focus == Some(id) {
            if !self.input.mouse_pressed.is_empty() && !mouse_over {
                self.set_focus(None);
            }
            if self.input.mouse_down.is_empty() && !opts.contains(Options::HOLD_FOCUS) {
                self.set_focus(None);
            }
        }

        if self.hover == Some(id) {
            if !self.input.mouse_pressed.is_empty() {
                self.set_focus(Some(id));
            } else if !mouse_over {
                self.hover = None;
            }
        }
    }

    pub(crate) fn left_pressed(&self) -> bool {
        self.input.mouse_pressed == MouseButtons::LEFT
    }

    pub(crate) fn left_held(&self) -> bool {
        self.input.mouse_down == MouseButtons::LEFT
    }

    // =====================================================================
    // Clipping
    // =====================================================================

    pub fn push_clip_rect(&mut self, rect: Rect) {
        self.clips.push(rect);
    }

    pub fn pop_clip_rect(&mut self) {
        self.clips.pop();
    }

    pub fn clip_rect(&self) -> Rect {
        self.clips.current()
    }

    pub fn check_clip(&self, rect: Rect) -> ClipVisibility {
        self.clips.classify(&rect)
    }

    // =====================================================================
    // Layout
    // =====================================================================

    pub fn layout(&self) -> &Layout {
        match self.layouts.last() {
            Some(layout) => layout,
            None => contract_violation(UiError::EmptyLayoutStack),
        }
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        match self.layouts.last_mut() {
            Some(layout) => layout,
            None => contract_violation(UiError::EmptyLayoutStack),
        }
    }

    pub(crate) fn pop_layout(&mut self) -> Layout {
        match self.layouts.pop() {
            Some(layout) => layout,
            None => contract_violation(UiError::StackUnderflow(StackKind::Layout)),
        }
    }

    /// Declare the next row. `None` reuses the previous row's widths.
    /// Zero means the style's default size; negative extends to the body's
    /// right edge plus the value.
    pub fn layout_row(&mut self, widths: Option<&[f32]>, height: f32) {
        self.layout_mut().row(widths, height);
    }

    pub fn layout_width(&mut self, width: f32) {
        self.layout_mut().set_width(width);
    }

    pub fn layout_height(&mut self, height: f32) {
        self.layout_mut().set_height(height);
    }

    pub fn layout_next(&mut self) -> Rect {
        let rect = match self.layouts.last_mut() {
            Some(layout) => layout.next(&self.style),
            None => contract_violation(UiError::EmptyLayoutStack),
        };
        self.last_rect = rect;
        rect
    }

    /// The cell `layout_next` would hand out, without consuming it.
    pub fn peek_next_cell(&self) -> Rect {
        self.layout().peek(&self.style)
    }

    /// Replace the next cell with `rect`, given relative to the body origin.
    pub fn override_next_cell(&mut self, rect: Rect) {
        self.layout_mut().set_next(NextCell::Relative(rect));
    }

    /// Replace the next cell with `rect` in screen coordinates.
    pub fn override_next_cell_absolute(&mut self, rect: Rect) {
        self.layout_mut().set_next(NextCell::Absolute(rect));
    }

    pub fn layout_begin_column(&mut self) {
        let cell = self.layout_next();
        self.layouts.push(Layout::new(cell, Point::ORIGIN));
    }

    pub fn layout_end_column(&mut self) {
        let column = self.pop_layout();
        self.layout_mut().absorb_column(&column);
    }

    pub fn last_rect(&self) -> Rect {
        self.last_rect
    }

    // =====================================================================
    // Drawing
    // =====================================================================

    pub fn text_width(&self, text: &str) -> f32 {
        self.metrics.text_width(self.style.font, text)
    }

    pub fn text_height(&self) -> f32 {
        self.metrics.text_height(self.style.font)
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    pub fn set_clip(&mut self, rect: Rect) {
        self.commands.push(Command::Clip { rect });
    }

    /// Emit `command` covering `rect`, bracketed by clip commands when it
    /// straddles the clip edge and dropped when it is fully hidden.
    fn push_clipped(&mut self, rect: Rect, command: Command) {
        let visibility = self.clips.classify(&rect);
        if visibility == ClipVisibility::Hidden {
            return;
        }
        let partial = visibility == ClipVisibility::Partial;
        if partial {
            let clip = self.clips.current();
            self.set_clip(clip);
        }
        self.commands.push(command);
        if partial {
            self.set_clip(Rect::UNCLIPPED);
        }
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        let rect = rect.clip_to(&self.clips.current());
        if !rect.is_empty() {
            self.commands.push(Command::Rect { rect, color });
        }
    }

    /// One-pixel outline just inside `rect`.
    pub fn draw_box(&mut self, rect: Rect, color: Color) {
        let Rect {
            x,
            y,
            width: w,
            height: h,
        } = rect;
        self.draw_rect(Rect::new(x + 1.0, y, w - 2.0, 1.0), color);
        self.draw_rect(Rect::new(x + 1.0, y + h - 1.0, w - 2.0, 1.0), color);
        self.draw_rect(Rect::new(x, y, 1.0, h), color);
        self.draw_rect(Rect::new(x + w - 1.0, y, 1.0, h), color);
    }

    pub fn draw_text(&mut self, font: FontId, text: &str, pos: Point, color: Color) {
        let rect = Rect::new(
            pos.x,
            pos.y,
            self.metrics.text_width(font, text),
            self.metrics.text_height(font),
        );
        self.push_clipped(
            rect,
            Command::Text {
                font,
                pos,
                color,
                text: text.to_owned(),
            },
        );
    }

    pub fn draw_icon(&mut self, icon: Icon, rect: Rect, color: Color) {
        self.push_clipped(rect, Command::Icon { icon, rect, color });
    }

    /// Reserve `rect` for host-side painting identified by `id`.
    pub fn draw_custom(&mut self, rect: Rect, id: Id) {
        self.push_clipped(rect, Command::Custom { rect, id });
    }

    /// Filled frame with a border, unless the role is borderless.
    pub fn draw_frame(&mut self, rect: Rect, role: ColorRole) {
        self.draw_rect(rect, self.style.color(role));
        if role.is_borderless() {
            return;
        }
        let border = self.style.color(ColorRole::Border);
        if !border.is_transparent() {
            self.draw_box(rect.expand(1.0), border);
        }
    }

    /// Frame whose color follows the control's hover/focus state.
    pub fn draw_control_frame(&mut self, id: Id, rect: Rect, role: ColorRole, opts: Options) {
        if opts.contains(Options::NO_FRAME) {
            return;
        }
        let role = if self.focus == Some(id) {
            role.focused()
        } else if self.hover == Some(id) {
            role.hovered()
        } else {
            role
        };
        self.draw_frame(rect, role);
    }

    /// Vertically centered text inside `rect`, clipped to it.
    pub fn draw_control_text(&mut self, text: &str, rect: Rect, role: ColorRole, opts: Options) {
        let font = self.style.font;
        let width = self.metrics.text_width(font, text);
        let height = self.metrics.text_height(font);
        let y = rect.y + (rect.height - height) / 2.0;
        let x = if opts.contains(Options::ALIGN_CENTER) {
            rect.x + (rect.width - width) / 2.0
        } else if opts.contains(Options::ALIGN_RIGHT) {
            rect.x + rect.width - width - self.style.padding
        } else {
            rect.x + self.style.padding
        };
        self.push_clip_rect(rect);
        self.draw_text(font, text, Point::new(x, y), self.style.color(role));
        self.pop_clip_rect();
    }

    // =====================================================================
    // Scoped style overrides
    // =====================================================================

    /// Temporarily replace one palette entry. The previous color comes back
    /// when the returned guard is dropped.
    pub fn push_color(&mut self, role: ColorRole, color: Color) -> ColorOverride<'_> {
        let previous = std::mem::replace(&mut self.style.colors[role], color);
        ColorOverride {
            ctx: self,
            role,
            previous,
        }
    }
}

/// Guard returned by `Context::push_color`. Derefs to the context so widgets
/// can be drawn through it.
pub struct ColorOverride<'a> {
    ctx: &'a mut Context,
    role: ColorRole,
    previous: Color,
}

impl Deref for ColorOverride<'_> {
    type Target = Context;
    fn deref(&self) -> &Context {
        self.ctx
    }
}

impl DerefMut for ColorOverride<'_> {
    fn deref_mut(&mut self) -> &mut Context {
        self.ctx
    }
}

impl Drop for ColorOverride<'_> {
    fn drop(&mut self) {
        self.ctx.style.colors[self.role] = self.previous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::DrawCommand;
    use crate::text::MonospaceMetrics;

    fn ctx() -> Context {
        Context::new(MonospaceMetrics::new(8.0, 14.0))
    }

    // =========================================================================
    // Frame protocol
    // =========================================================================

    #[test]
    fn empty_frame_is_balanced() {
        let mut ctx = ctx();
        ctx.begin();
        assert!(ctx.is_building());
        assert!(ctx.end().is_ok());
        assert!(!ctx.is_building());
        assert_eq!(ctx.commands().count(), 0);
    }

    #[test]
    fn end_without_begin_is_an_error() {
        assert_eq!(ctx().end(), Err(UiError::NoFrameInProgress));
    }

    #[test]
    #[should_panic(expected = "already being built")]
    fn nested_begin_is_fatal() {
        let mut ctx = ctx();
        ctx.begin();
        ctx.begin();
    }

    #[test]
    fn unbalanced_id_stack_fails_and_discards() {
        let mut ctx = ctx();
        ctx.begin();
        ctx.push_id("dangling");
        let err = ctx.end().unwrap_err();
        assert_eq!(
            err,
            UiError::UnbalancedStacks(StackDepths {
                id: 1,
                ..StackDepths::default()
            })
        );
        assert!(!ctx.is_building());
        assert!(ctx.stack_depths().is_balanced());

        // The context is usable again.
        ctx.begin();
        assert!(ctx.end().is_ok());
    }

    #[test]
    fn unbalanced_clip_stack_fails() {
        let mut ctx = ctx();
        ctx.begin();
        ctx.push_clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(matches!(ctx.end(), Err(UiError::UnbalancedStacks(d)) if d.clip == 1));
    }

    #[test]
    fn window_declared_twice_fails_and_discards() {
        let mut ctx = ctx();
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        ctx.begin();
        for _ in 0..2 {
            assert!(ctx.begin_window("W", rect, Options::empty()));
            ctx.end_window();
        }
        assert_eq!(ctx.end(), Err(UiError::DuplicateRoot(Id::of("W"))));
        assert!(!ctx.is_building());
        assert_eq!(ctx.commands().count(), 0);

        ctx.begin();
        assert!(ctx.begin_window("W", rect, Options::empty()));
        ctx.end_window();
        assert!(ctx.end().is_ok());
        assert!(ctx.commands().count() > 0);
    }

    #[test]
    fn balanced_pushes_and_pops_end_cleanly() {
        let mut ctx = ctx();
        ctx.begin();
        for depth in 1..5u64 {
            for i in 0..depth {
                ctx.push_id_index(i);
                ctx.push_clip_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
            }
            for _ in 0..depth {
                ctx.pop_clip_rect();
                ctx.pop_id();
            }
        }
        assert!(ctx.end().is_ok());
    }

    #[test]
    #[should_panic(expected = "layout call with no active layout frame")]
    fn layout_outside_container_is_fatal() {
        let mut ctx = ctx();
        ctx.begin();
        ctx.layout_next();
    }

    // =========================================================================
    // Drawing and clipping
    // =========================================================================

    #[test]
    fn visible_text_needs_no_clip_commands() {
        let mut ctx = ctx();
        ctx.begin();
        ctx.push_clip_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        ctx.draw_text(FontId(0), "hi", Point::new(10.0, 10.0), Color::WHITE);
        ctx.pop_clip_rect();
        ctx.end().unwrap();
        let cmds: Vec<_> = ctx.commands().collect();
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], DrawCommand::Text { text: "hi", .. }));
    }

    #[test]
    fn partially_clipped_text_is_bracketed() {
        let mut ctx = ctx();
        ctx.begin();
        let clip = Rect::new(0.0, 0.0, 20.0, 100.0);
        ctx.push_clip_rect(clip);
        ctx.draw_text(FontId(0), "overflowing", Point::new(10.0, 10.0), Color::WHITE);
        ctx.pop_clip_rect();
        ctx.end().unwrap();
        let cmds: Vec<_> = ctx.commands().collect();
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[0], DrawCommand::Clip(clip));
        assert_eq!(cmds[2], DrawCommand::Clip(Rect::UNCLIPPED));
    }

    #[test]
    fn hidden_draws_are_dropped() {
        let mut ctx = ctx();
        ctx.begin();
        ctx.push_clip_rect(Rect::new(0.0, 0.0, 20.0, 20.0));
        ctx.draw_text(FontId(0), "far", Point::new(500.0, 500.0), Color::WHITE);
        ctx.draw_icon(Icon::Check, Rect::new(500.0, 0.0, 10.0, 10.0), Color::WHITE);
        ctx.draw_rect(Rect::new(500.0, 0.0, 10.0, 10.0), Color::WHITE);
        ctx.pop_clip_rect();
        ctx.end().unwrap();
        assert_eq!(ctx.commands().count(), 0);
    }

    #[test]
    fn rects_are_cut_to_the_clip_region() {
        let mut ctx = ctx();
        ctx.begin();
        ctx.push_clip_rect(Rect::new(0.0, 0.0, 20.0, 20.0));
        ctx.draw_rect(Rect::new(10.0, 10.0, 50.0, 50.0), Color::WHITE);
        ctx.pop_clip_rect();
        ctx.end().unwrap();
        let cmds: Vec<_> = ctx.commands().collect();
        assert_eq!(
            cmds,
            vec![DrawCommand::Rect {
                rect: Rect::new(10.0, 10.0, 10.0, 10.0),
                color: Color::WHITE
            }]
        );
    }

    // =========================================================================
    // Style overrides
    // =========================================================================

    #[test]
    fn color_override_restores_on_drop() {
        let mut ctx = ctx();
        let original = ctx.style.color(ColorRole::Button);
        {
            let guard = ctx.push_color(ColorRole::Button, Color::WHITE);
            assert_eq!(guard.style.color(ColorRole::Button), Color::WHITE);
        }
        assert_eq!(ctx.style.color(ColorRole::Button), original);
    }

    #[test]
    fn stop_request_is_sticky() {
        let mut ctx = ctx();
        assert!(!ctx.stop_requested());
        ctx.request_stop();
        assert!(ctx.stop_requested());
    }
}
