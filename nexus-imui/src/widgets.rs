//! Built-in widgets.
//!
//! Every widget takes the next layout cell, runs `update_control` with its
//! id, draws itself and reports what happened through `Response`. Values are
//! borrowed from the caller for the duration of the call only.

use tracing::debug;

use crate::command::Icon;
use crate::context::{Context, NumberEdit};
use crate::id::Id;
use crate::input::{Keys, MouseButtons};
use crate::options::{Options, Response};
use crate::primitives::{Point, Rect};
use crate::style::ColorRole;
use crate::text::wrap_text;

/// Format used when a number field switches into text editing. `Display`
/// is the shortest text that parses back to the same value.
fn format_number(value: f64) -> String {
    value.to_string()
}

impl Context {
    // =====================================================================
    // Text
    // =====================================================================

    pub fn label(&mut self, text: &str) {
        self.label_ex(text, Options::empty());
    }

    pub fn label_ex(&mut self, text: &str, opts: Options) {
        let cell = self.layout_next();
        self.draw_control_text(text, cell, ColorRole::Text, opts);
    }

    /// Word-wrapped paragraph filling the width of the next cell.
    pub fn text(&mut self, text: &str) {
        let font = self.style.font;
        let color = self.style.color(ColorRole::Text);
        self.layout_begin_column();
        let line_height = self.text_height();
        self.layout_row(Some(&[-1.0]), line_height);
        let width = self.peek_next_cell().width;
        let lines = wrap_text(self.metrics(), font, text, width);
        for line in lines {
            let cell = self.layout_next();
            self.draw_text(font, line, cell.origin(), color);
        }
        self.layout_end_column();
    }

    // =====================================================================
    // Buttons
    // =====================================================================

    pub fn button(&mut self, label: &str) -> Response {
        self.button_ex(label, Options::ALIGN_CENTER)
    }

    pub fn button_ex(&mut self, label: &str, opts: Options) -> Response {
        let id = self.get_id(label);
        self.button_raw(id, Some(label), None, opts)
    }

    /// Button showing only `icon`; `name` is used for its id.
    pub fn icon_button(&mut self, name: &str, icon: Icon) -> Response {
        let id = self.get_id(name);
        self.button_raw(id, None, Some(icon), Options::ALIGN_CENTER)
    }

    fn button_raw(
        &mut self,
        id: Id,
        label: Option<&str>,
        icon: Option<Icon>,
        opts: Options,
    ) -> Response {
        let cell = self.layout_next();
        self.update_control(id, cell, opts);
        let mut res = Response::empty();
        if self.left_pressed() && self.focus == Some(id) {
            res |= Response::SUBMIT;
        }
        self.draw_control_frame(id, cell, ColorRole::Button, opts);
        if let Some(label) = label {
            self.draw_control_text(label, cell, ColorRole::Text, opts);
        }
        if let Some(icon) = icon {
            self.draw_icon(icon, cell, self.style.color(ColorRole::Text));
        }
        res
    }

    /// Button that flips `state` when clicked and is drawn in its focus
    /// color while on.
    pub fn toggle_button(&mut self, label: &str, state: &mut bool) -> Response {
        let mut res = if *state {
            let on = self.style.color(ColorRole::ButtonFocus);
            let mut guard = self.push_color(ColorRole::Button, on);
            let mut guard = guard.push_color(ColorRole::ButtonHover, on);
            guard.button(label)
        } else {
            self.button(label)
        };
        if res.submitted() {
            *state = !*state;
            res |= Response::CHANGE;
        }
        res
    }

    pub fn checkbox(&mut self, label: &str, state: &mut bool) -> Response {
        let id = self.get_id(label);
        let cell = self.layout_next();
        let side = cell.height;
        let check = Rect::new(cell.x, cell.y, side, side);
        self.update_control(id, cell, Options::empty());

        let mut res = Response::empty();
        if self.left_pressed() && self.focus == Some(id) {
            res |= Response::CHANGE;
            *state = !*state;
        }

        self.draw_control_frame(id, check, ColorRole::Base, Options::empty());
        if *state {
            self.draw_icon(Icon::Check, check, self.style.color(ColorRole::Text));
        }
        let text = Rect::new(cell.x + side, cell.y, cell.width - side, cell.height);
        self.draw_control_text(label, text, ColorRole::Text, Options::empty());
        res
    }

    /// Claim the next cell for host-side painting.
    ///
    /// Emits a `Custom` command carrying the returned id and behaves like a
    /// button: `SUBMIT` on click, `ACTIVE` while focused.
    pub fn custom(&mut self, name: &str, opts: Options) -> (Id, Response) {
        let id = self.get_id(name);
        let cell = self.layout_next();
        self.update_control(id, cell, opts);
        let mut res = Response::empty();
        if self.focus == Some(id) {
            res |= Response::ACTIVE;
            if self.left_pressed() {
                res |= Response::SUBMIT;
            }
        }
        self.draw_custom(cell, id);
        (id, res)
    }

    // =====================================================================
    // Text boxes
    // =====================================================================

    pub fn textbox(&mut self, name: &str, buf: &mut String) -> Response {
        self.textbox_ex(name, buf, None, Options::empty())
    }

    /// Single-line editor. `max_len` bounds the buffer in characters.
    pub fn textbox_ex(
        &mut self,
        name: &str,
        buf: &mut String,
        max_len: Option<usize>,
        opts: Options,
    ) -> Response {
        let id = self.get_id(name);
        let cell = self.layout_next();
        self.textbox_raw(buf, max_len, id, cell, opts)
    }

    fn textbox_raw(
        &mut self,
        buf: &mut String,
        max_len: Option<usize>,
        id: Id,
        rect: Rect,
        opts: Options,
    ) -> Response {
        let mut res = Response::empty();
        self.update_control(id, rect, opts | Options::HOLD_FOCUS);

        if self.focus == Some(id) {
            let room = max_len.map_or(usize::MAX, |max| max.saturating_sub(buf.chars().count()));
            let before = buf.len();
            buf.extend(self.input.text.chars().take(room));
            if buf.len() != before {
                res |= Response::CHANGE;
            }
            if self.input.key_pressed.contains(Keys::BACKSPACE) && buf.pop().is_some() {
                res |= Response::CHANGE;
            }
            if self.input.key_pressed.contains(Keys::RETURN) {
                self.set_focus(None);
                res |= Response::SUBMIT;
            }
        }

        self.draw_control_frame(id, rect, ColorRole::Base, opts);
        if self.focus == Some(id) {
            let font = self.style.font;
            let padding = self.style.padding;
            let color = self.style.color(ColorRole::Text);
            let width = self.text_width(buf);
            let height = self.text_height();
            // Keep the caret in view by sliding long text left.
            let x = rect.x + (rect.width - padding - width - 1.0).min(padding);
            let y = rect.y + (rect.height - height) / 2.0;
            self.push_clip_rect(rect);
            self.draw_text(font, buf, Point::new(x, y), color);
            self.draw_rect(Rect::new(x + width, y, 1.0, height), color);
            self.pop_clip_rect();
        } else {
            self.draw_control_text(buf, rect, ColorRole::Text, opts);
        }
        res
    }

    /// Text-edit mode shared by sliders and number fields. Returns true while
    /// the field is being typed into and should skip its normal behaviour.
    fn number_textbox(&mut self, value: &mut f64, rect: Rect, id: Id) -> bool {
        let shift_click = self.input.mouse_pressed == MouseButtons::LEFT
            && self.input.key_down.contains(Keys::SHIFT)
            && self.hover == Some(id);
        if shift_click {
            self.number_edit = Some(NumberEdit {
                id,
                buffer: format_number(*value),
            });
        }

        let Some(mut edit) = self.number_edit.take_if(|edit| edit.id == id) else {
            return false;
        };
        let res = self.textbox_raw(&mut edit.buffer, None, id, rect, Options::empty());
        if !res.submitted() && self.focus == Some(id) {
            self.number_edit = Some(edit);
            return true;
        }

        match edit.buffer.trim().parse::<f64>() {
            Ok(parsed) => *value = parsed,
            Err(_) => debug!(buffer = %edit.buffer, "ignoring unparsable number edit"),
        }
        false
    }

    // =====================================================================
    // Sliders and number fields
    // =====================================================================

    pub fn slider(&mut self, name: &str, value: &mut f64, low: f64, high: f64) -> Response {
        self.slider_ex(name, value, low, high, None, 2, Options::ALIGN_CENTER)
    }

    /// Horizontal slider. A positive `step` snaps every value, dragged, typed
    /// or passed in, to `low + k * step`. The stored value is always clamped to `[low, high]`.
    #[allow(clippy::too_many_arguments)]
    pub fn slider_ex(
        &mut self,
        name: &str,
        value: &mut f64,
        low: f64,
        high: f64,
        step: Option<f64>,
        precision: usize,
        opts: Options,
    ) -> Response {
        let id = self.get_id(name);
        let base = self.layout_next();
        let last = *value;
        let mut v = last;

        if self.number_textbox(&mut v, base, id) {
            return Response::empty();
        }

        self.update_control(id, base, opts);
        if self.focus == Some(id) && (self.input.mouse_down | self.input.mouse_pressed) == MouseButtons::LEFT {
            let mouse_x = f64::from(self.input.mouse_pos.x - base.x);
            v = low + mouse_x * (high - low) / f64::from(base.width);
        }
        if let Some(step) = step.filter(|step| *step > 0.0) {
            // Values already on the grid keep their exact bits.
            let snapped = low + ((v - low) / step).round() * step;
            if (snapped - v).abs() > step * 1e-9 {
                v = snapped;
            }
        }
        v = v.max(low).min(high);
        *value = v;

        let mut res = Response::empty();
        if v != last {
            res |= Response::CHANGE;
        }

        self.draw_control_frame(id, base, ColorRole::Base, opts);
        let thumb_width = self.style.thumb_size;
        let travel = if high > low {
            ((v - low) * f64::from(base.width - thumb_width) / (high - low)) as f32
        } else {
            0.0
        };
        let thumb = Rect::new(base.x + travel, base.y, thumb_width, base.height);
        self.draw_control_frame(id, thumb, ColorRole::Button, opts);
        let text = format!("{v:.precision$}");
        self.draw_control_text(&text, base, ColorRole::Text, opts);
        res
    }

    pub fn number(&mut self, name: &str, value: &mut f64, step: f64) -> Response {
        self.number_ex(name, value, step, 2, Options::ALIGN_CENTER)
    }

    /// Drag horizontally to change `value` by `step` per pixel.
    pub fn number_ex(
        &mut self,
        name: &str,
        value: &mut f64,
        step: f64,
        precision: usize,
        opts: Options,
    ) -> Response {
        let id = self.get_id(name);
        let base = self.layout_next();
        let last = *value;

        if self.number_textbox(value, base, id) {
            return Response::empty();
        }

        self.update_control(id, base, opts);
        if self.focus == Some(id) && self.left_held() {
            *value += f64::from(self.input.mouse_delta.x) * step;
        }

        let mut res = Response::empty();
        if *value != last {
            res |= Response::CHANGE;
        }

        self.draw_control_frame(id, base, ColorRole::Base, opts);
        let text = format!("{:.*}", precision, *value);
        self.draw_control_text(&text, base, ColorRole::Text, opts);
        res
    }

    // =====================================================================
    // Headers and tree nodes
    // =====================================================================

    /// Collapsible full-width header. Returns true while expanded.
    pub fn header(&mut self, label: &str, opts: Options) -> bool {
        self.header_raw(label, false, opts).1
    }

    /// Indented, id-scoped subtree. Pair a true return with `end_treenode`.
    pub fn begin_treenode(&mut self, label: &str, opts: Options) -> bool {
        let (id, expanded) = self.header_raw(label, true, opts);
        if expanded {
            self.layout_mut().indent += self.style.indent;
            self.ids.push(id);
        }
        expanded
    }

    pub fn end_treenode(&mut self) {
        self.layout_mut().indent -= self.style.indent;
        self.pop_id();
    }

    fn header_raw(&mut self, label: &str, treenode: bool, opts: Options) -> (Id, bool) {
        let id = self.get_id(label);
        self.layout_row(Some(&[-1.0]), 0.0);
        let mut cell = self.layout_next();
        self.update_control(id, cell, Options::empty());

        // The set records nodes whose state differs from their default.
        let mut toggled = self.expanded.contains(&id);
        if self.left_pressed() && self.focus == Some(id) {
            toggled = !toggled;
            debug!(?id, label, "header toggled");
        }
        if toggled {
            self.expanded.insert(id);
        } else {
            self.expanded.remove(&id);
        }
        let expanded = toggled != opts.contains(Options::EXPANDED);

        if treenode {
            if self.hover == Some(id) {
                self.draw_frame(cell, ColorRole::ButtonHover);
            }
        } else {
            self.draw_control_frame(id, cell, ColorRole::Button, Options::empty());
        }
        let icon = if expanded {
            Icon::Expanded
        } else {
            Icon::Collapsed
        };
        let icon_rect = Rect::new(cell.x, cell.y, cell.height, cell.height);
        self.draw_icon(icon, icon_rect, self.style.color(ColorRole::Text));

        let shift = cell.height - self.style.padding;
        cell.x += shift;
        cell.width -= shift;
        self.draw_control_text(label, cell, ColorRole::Text, Options::empty());
        (id, expanded)
    }
}
