//! Containers: windows, popups and panels.
//!
//! A container record persists across frames, keyed by id. Root containers
//! (windows and popups) own a contiguous span of the command list bracketed
//! by a head and tail jump, which `Context::end` rewires to paint roots in
//! z-order. Panels nest inside a root and share its span.

use tracing::debug;

use crate::command::Icon;
use crate::context::Context;
use crate::error::{StackKind, UiError, contract_violation};
use crate::id::Id;
use crate::layout::Layout;
use crate::options::Options;
use crate::primitives::{Point, Rect, Size};
use crate::style::ColorRole;

/// Smallest size a window can be resized to by dragging its corner.
const MIN_WINDOW_SIZE: Size = Size::new(96.0, 64.0);

/// Persistent state of one window, popup or panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    /// Outer rectangle, including title bar.
    pub rect: Rect,
    /// Area left for content after title bar and scrollbars.
    pub body: Rect,
    /// Extent of the content laid out last frame.
    pub content_size: Size,
    pub scroll: Point,
    pub zindex: i32,
    pub open: bool,
    pub(crate) root: bool,
    pub(crate) head: Option<usize>,
    pub(crate) tail: Option<usize>,
    /// Largest valid scroll offset computed by the last scrollbar pass.
    pub(crate) scroll_max: Point,
}

impl Container {
    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Apply a wheel delta, keeping the offset inside the scrollable range.
    pub(crate) fn scroll_by(&mut self, delta: Point) {
        self.scroll.x = (self.scroll.x + delta.x).min(self.scroll_max.x).max(0.0);
        self.scroll.y = (self.scroll.y + delta.y).min(self.scroll_max.y).max(0.0);
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn of_size(self, size: Size) -> f32 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }

    fn of_point(self, point: Point) -> f32 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
        }
    }

    fn point_mut(self, point: &mut Point) -> &mut f32 {
        match self {
            Axis::X => &mut point.x,
            Axis::Y => &mut point.y,
        }
    }

    fn id_name(self) -> &'static str {
        match self {
            Axis::X => "!scrollbarx",
            Axis::Y => "!scrollbary",
        }
    }
}

impl Context {
    // =====================================================================
    // Container records
    // =====================================================================

    pub fn container(&self, id: Id) -> Option<&Container> {
        self.containers.get(&id)
    }

    pub fn container_mut(&mut self, id: Id) -> Option<&mut Container> {
        self.containers.get_mut(&id)
    }

    /// Every container ever created, including dormant ones.
    pub fn containers(&self) -> impl Iterator<Item = (Id, &Container)> {
        self.containers.iter().map(|(id, cnt)| (*id, cnt))
    }

    /// Look up a container, creating it on first use unless `CLOSED` is set.
    pub fn get_or_create_container(&mut self, id: Id, opts: Options) -> Option<&mut Container> {
        if !self.containers.contains_key(&id) {
            if opts.contains(Options::CLOSED) {
                return None;
            }
            self.last_zindex += 1;
            debug!(?id, zindex = self.last_zindex, "creating container");
            self.containers.insert(
                id,
                Container {
                    open: true,
                    zindex: self.last_zindex,
                    ..Container::default()
                },
            );
        }
        self.containers.get_mut(&id)
    }

    /// Record of a container already created this session.
    pub(crate) fn cnt(&mut self, id: Id) -> &mut Container {
        self.containers.entry(id).or_default()
    }

    pub fn current_container(&self) -> Option<Id> {
        self.container_stack.last().copied()
    }

    /// Raise a container above every other root container, creating it
    /// open if it does not exist yet.
    pub fn bring_to_front(&mut self, id: Id) {
        if !self.containers.contains_key(&id) {
            // Fresh containers are created topmost.
            self.get_or_create_container(id, Options::empty());
            return;
        }
        self.last_zindex += 1;
        let zindex = self.last_zindex;
        self.cnt(id).zindex = zindex;
    }

    /// Rectangle of the top-level window called `name`, if it exists.
    pub fn window_rect(&self, name: &str) -> Option<Rect> {
        self.containers.get(&Id::of(name)).map(|cnt| cnt.rect)
    }

    /// Place a top-level window before it is first shown.
    pub fn restore_window(&mut self, name: &str, rect: Rect) {
        if let Some(cnt) = self.get_or_create_container(Id::of(name), Options::empty()) {
            cnt.rect = rect;
        }
    }

    /// Close a window or popup by id; it stays closed until reopened.
    pub fn close_container(&mut self, id: Id) {
        if let Some(cnt) = self.containers.get_mut(&id) {
            cnt.open = false;
        }
    }

    /// Close the top-level window called `name`.
    pub fn close_window(&mut self, name: &str) {
        self.close_container(Id::of(name));
    }

    pub fn open_container(&mut self, id: Id) {
        if let Some(cnt) = self.get_or_create_container(id, Options::empty()) {
            cnt.open = true;
        }
    }

    // =====================================================================
    // Stack plumbing
    // =====================================================================

    fn begin_root_container(&mut self, id: Id) {
        self.container_stack.push(id);
        self.root_list.push(id);
        let head = self.commands.push_jump();

        let cnt = self.cnt(id);
        cnt.root = true;
        cnt.head = Some(head);
        cnt.tail = None;
        let (rect, zindex) = (cnt.rect, cnt.zindex);

        // Topmost root under the mouse becomes next frame's hover root.
        let mouse = self.input.mouse_pos;
        if rect.contains(mouse) {
            let above = self
                .next_hover_root
                .and_then(|top| self.containers.get(&top))
                .is_none_or(|top| zindex > top.zindex);
            if above {
                self.next_hover_root = Some(id);
            }
        }

        // Root containers start from an unclipped region regardless of what
        // the caller pushed outside them.
        self.clips.push_unclipped();
    }

    fn end_root_container(&mut self) {
        let Some(id) = self.current_container() else {
            contract_violation(UiError::StackUnderflow(StackKind::Container));
        };
        let tail = self.commands.push_jump();
        let after = self.commands.len();
        let cnt = self.cnt(id);
        cnt.tail = Some(tail);
        let head = cnt.head;
        if let Some(head) = head {
            self.commands.set_jump(head, after);
        }
        self.pop_clip_rect();
        self.pop_container();
    }

    fn pop_container(&mut self) {
        let Some(id) = self.container_stack.pop() else {
            contract_violation(UiError::StackUnderflow(StackKind::Container));
        };
        let layout = self.pop_layout();
        self.cnt(id).content_size = layout.content_size();
        self.ids.pop();
    }

    fn push_container_body(&mut self, id: Id, body: Rect, opts: Options) {
        let body = if opts.contains(Options::NO_SCROLL) {
            body
        } else {
            self.scrollbars(id, body)
        };
        let padding = self.style.padding;
        let cnt = self.cnt(id);
        cnt.body = body;
        let scroll = cnt.scroll;
        self.layouts.push(Layout::new(body.expand(-padding), scroll));
    }

    // =====================================================================
    // Scrollbars
    // =====================================================================

    /// Shrink `body` for whichever scrollbars are needed and draw them.
    fn scrollbars(&mut self, id: Id, body: Rect) -> Rect {
        let size = self.style.scrollbar_size;
        let padding = self.style.padding;
        let cnt = self.cnt(id);
        let content = Size::new(
            cnt.content_size.width + padding * 2.0,
            cnt.content_size.height + padding * 2.0,
        );
        let previous = cnt.body;

        self.push_clip_rect(body);
        let mut body = body;
        if content.height > previous.height {
            body.width -= size;
        }
        if content.width > previous.width {
            body.height -= size;
        }
        self.scrollbar(id, body, content, Axis::Y);
        self.scrollbar(id, body, content, Axis::X);
        self.pop_clip_rect();
        body
    }

    fn scrollbar(&mut self, id: Id, body: Rect, content: Size, axis: Axis) {
        let extent = axis.of_size(body.size());
        let content_extent = axis.of_size(content);
        let max_scroll = content_extent - extent;

        if max_scroll <= 0.0 || extent <= 0.0 {
            let cnt = self.cnt(id);
            *axis.point_mut(&mut cnt.scroll) = 0.0;
            *axis.point_mut(&mut cnt.scroll_max) = 0.0;
            return;
        }

        let bar_size = self.style.scrollbar_size;
        let base = match axis {
            Axis::Y => Rect::new(body.right(), body.y, bar_size, body.height),
            Axis::X => Rect::new(body.x, body.bottom(), body.width, bar_size),
        };
        let base_extent = axis.of_size(base.size());

        let bar_id = self.get_id(axis.id_name());
        self.update_control(bar_id, base, Options::empty());
        let dragging = self.focus == Some(bar_id) && self.left_held();
        let delta = axis.of_point(self.input.mouse_delta);

        let cnt = self.cnt(id);
        let scroll = axis.point_mut(&mut cnt.scroll);
        if dragging {
            *scroll += delta * content_extent / base_extent;
        }
        *scroll = scroll.min(max_scroll).max(0.0);
        let offset = *scroll;
        *axis.point_mut(&mut cnt.scroll_max) = max_scroll;

        self.draw_frame(base, ColorRole::ScrollBase);
        let thumb_extent = self
            .style
            .thumb_size
            .max(base_extent * extent / content_extent);
        let travel = offset * (base_extent - thumb_extent) / max_scroll;
        let thumb = match axis {
            Axis::Y => Rect::new(base.x, base.y + travel, base.width, thumb_extent),
            Axis::X => Rect::new(base.x + travel, base.y, thumb_extent, base.height),
        };
        self.draw_frame(thumb, ColorRole::ScrollThumb);

        if self.mouse_over(body) {
            self.scroll_target = Some(id);
        }
    }

    // =====================================================================
    // Windows
    // =====================================================================

    /// Begin a top-level window. Returns false (and must not be paired with
    /// `end_window`) when the window is closed.
    ///
    /// `rect` only applies the first time the window is shown; afterwards
    /// the window keeps whatever position and size the user gave it.
    pub fn begin_window(&mut self, title: &str, rect: Rect, opts: Options) -> bool {
        let id = self.get_id(title);
        match self.get_or_create_container(id, opts) {
            Some(cnt) if cnt.open => {
                if cnt.rect.width == 0.0 {
                    cnt.rect = rect;
                }
            }
            _ => return false,
        }
        self.ids.push(id);
        self.begin_root_container(id);

        let rect = self.cnt(id).rect;
        let mut body = rect;

        if !opts.contains(Options::NO_FRAME) {
            self.draw_frame(rect, ColorRole::WindowBg);
        }

        if !opts.contains(Options::NO_TITLE) {
            let mut title_rect = rect;
            title_rect.height = self.style.title_height;
            self.draw_frame(title_rect, ColorRole::TitleBg);

            let title_id = self.get_id("!title");
            self.update_control(title_id, title_rect, opts);
            self.draw_control_text(title, title_rect, ColorRole::TitleText, opts);
            if self.focus == Some(title_id) && self.left_held() {
                let delta = self.input.mouse_delta;
                let cnt = self.cnt(id);
                cnt.rect.x += delta.x;
                cnt.rect.y += delta.y;
            }
            body.y += title_rect.height;
            body.height -= title_rect.height;

            if !opts.contains(Options::NO_CLOSE) {
                let close_id = self.get_id("!close");
                let side = title_rect.height;
                let close = Rect::new(title_rect.right() - side, title_rect.y, side, side);
                self.draw_icon(Icon::Close, close, self.style.color(ColorRole::TitleText));
                self.update_control(close_id, close, opts);
                if self.left_pressed() && self.focus == Some(close_id) {
                    debug!(title, "window closed");
                    self.cnt(id).open = false;
                    if opts.contains(Options::STOP_ON_CLOSE) {
                        self.request_stop();
                    }
                }
            }
        }

        self.push_container_body(id, body, opts);

        if !opts.contains(Options::NO_RESIZE) {
            let side = self.style.title_height;
            let resize_id = self.get_id("!resize");
            let handle = Rect::new(rect.right() - side, rect.bottom() - side, side, side);
            self.update_control(resize_id, handle, opts);
            self.draw_icon(Icon::Resize, handle, self.style.color(ColorRole::Text));
            if self.focus == Some(resize_id) && self.left_held() {
                let delta = self.input.mouse_delta;
                let cnt = self.cnt(id);
                cnt.rect.width = (cnt.rect.width + delta.x).max(MIN_WINDOW_SIZE.width);
                cnt.rect.height = (cnt.rect.height + delta.y).max(MIN_WINDOW_SIZE.height);
            }
        }

        if opts.contains(Options::AUTO_SIZE) {
            let inner = self.layout().body;
            let cnt = self.cnt(id);
            cnt.rect.width = cnt.content_size.width + (cnt.rect.width - inner.width);
            cnt.rect.height = cnt.content_size.height + (cnt.rect.height - inner.height);
        }

        // Popups close on any click outside them. They still render this
        // frame and disappear on the next.
        if opts.contains(Options::POPUP)
            && !self.input.mouse_pressed.is_empty()
            && self.hover_root != Some(id)
        {
            debug!(title, "popup dismissed");
            self.cnt(id).open = false;
        }

        let body = self.cnt(id).body;
        self.push_clip_rect(body);
        true
    }

    pub fn end_window(&mut self) {
        self.pop_clip_rect();
        self.end_root_container();
    }

    // =====================================================================
    // Popups
    // =====================================================================

    /// Open the popup `name` at the mouse position, above everything else.
    pub fn open_popup(&mut self, name: &str) {
        let id = self.get_id(name);
        let mouse = self.input.mouse_pos;
        self.hover_root = Some(id);
        self.next_hover_root = Some(id);
        if let Some(cnt) = self.get_or_create_container(id, Options::empty()) {
            cnt.rect = Rect::new(mouse.x, mouse.y, 1.0, 1.0);
            cnt.open = true;
        }
        self.bring_to_front(id);
        debug!(name, "popup opened");
    }

    pub fn begin_popup(&mut self, name: &str) -> bool {
        let opts = Options::POPUP
            | Options::AUTO_SIZE
            | Options::NO_RESIZE
            | Options::NO_SCROLL
            | Options::NO_TITLE
            | Options::CLOSED;
        self.begin_window(name, Rect::ZERO, opts)
    }

    pub fn end_popup(&mut self) {
        self.end_window();
    }

    // =====================================================================
    // Panels
    // =====================================================================

    /// Begin a scrollable sub-region occupying the next layout cell.
    pub fn begin_panel(&mut self, name: &str, opts: Options) {
        let id = self.push_id(name);
        self.get_or_create_container(id, opts - Options::CLOSED);
        let rect = self.layout_next();
        self.cnt(id).rect = rect;
        if !opts.contains(Options::NO_FRAME) {
            self.draw_frame(rect, ColorRole::PanelBg);
        }
        self.container_stack.push(id);
        self.push_container_body(id, rect, opts);
        let body = self.cnt(id).body;
        self.push_clip_rect(body);
    }

    pub fn end_panel(&mut self) {
        self.pop_clip_rect();
        self.pop_container();
    }
}
