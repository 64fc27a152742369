//! Command buffer.
//!
//! Draw commands are appended in call order. Paint order is decided later by
//! patching `Jump` destinations: each root container's commands are bracketed
//! by a head jump (which skips the region during linear replay) and a tail jump
//! (which chains to the next container in z-order). Destinations are indices
//! into the same arena, resolved in `Context::end`.

use crate::error::{UiError, contract_violation};
use crate::id::Id;
use crate::primitives::{Color, Point, Rect};
use crate::style::FontId;

/// Built-in icons the host is expected to know how to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Close,
    Check,
    Collapsed,
    Expanded,
    Resize,
}

/// A recorded command, including the internal jump markers.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Jump { dst: Option<usize> },
    Clip { rect: Rect },
    Rect { rect: Rect, color: Color },
    Text { font: FontId, pos: Point, color: Color, text: String },
    Icon { icon: Icon, rect: Rect, color: Color },
    Custom { rect: Rect, id: Id },
}

/// What a draw consumer sees. Jumps are followed, never yielded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand<'a> {
    Clip(Rect),
    Rect { rect: Rect, color: Color },
    Text { font: FontId, pos: Point, color: Color, text: &'a str },
    Icon { icon: Icon, rect: Rect, color: Color },
    Custom { rect: Rect, id: Id },
}

/// Append-only command arena for one frame.
#[derive(Debug, Default)]
pub struct CommandList {
    commands: Vec<Command>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Append a command, returning its index.
    pub fn push(&mut self, command: Command) -> usize {
        self.commands.push(command);
        self.commands.len() - 1
    }

    /// Append a jump whose destination is filled in later.
    pub fn push_jump(&mut self) -> usize {
        self.push(Command::Jump { dst: None })
    }

    pub fn set_jump(&mut self, index: usize, dst: usize) {
        match self.commands.get_mut(index) {
            Some(Command::Jump { dst: slot }) => *slot = Some(dst),
            _ => contract_violation(UiError::NotAJump(index)),
        }
    }

    /// First jump whose destination was never patched, if any.
    pub fn check_resolved(&self) -> Result<(), UiError> {
        match self
            .commands
            .iter()
            .position(|c| matches!(c, Command::Jump { dst: None }))
        {
            Some(index) => Err(UiError::UnresolvedJump(index)),
            None => Ok(()),
        }
    }

    /// Raw arena access, in append order.
    pub fn raw(&self) -> &[Command] {
        &self.commands
    }

    /// Replay the list in paint order, following jumps.
    pub fn iter(&self) -> Commands<'_> {
        Commands {
            commands: &self.commands,
            pos: 0,
        }
    }
}

/// Iterator over a frame's commands in paint order.
///
/// Restartable: calling `CommandList::iter` again replays from the start.
pub struct Commands<'a> {
    commands: &'a [Command],
    pos: usize,
}

impl<'a> Iterator for Commands<'a> {
    type Item = DrawCommand<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let command = self.commands.get(self.pos)?;
            self.pos += 1;
            let draw = match command {
                Command::Jump { dst: Some(dst) } => {
                    self.pos = *dst;
                    continue;
                }
                Command::Jump { dst: None } => continue,
                Command::Clip { rect } => DrawCommand::Clip(*rect),
                Command::Rect { rect, color } => DrawCommand::Rect {
                    rect: *rect,
                    color: *color,
                },
                Command::Text {
                    font,
                    pos,
                    color,
                    text,
                } => DrawCommand::Text {
                    font: *font,
                    pos: *pos,
                    color: *color,
                    text,
                },
                Command::Icon { icon, rect, color } => DrawCommand::Icon {
                    icon: *icon,
                    rect: *rect,
                    color: *color,
                },
                Command::Custom { rect, id } => DrawCommand::Custom {
                    rect: *rect,
                    id: *id,
                },
            };
            return Some(draw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_cmd(x: f32) -> Command {
        Command::Rect {
            rect: Rect::new(x, 0.0, 1.0, 1.0),
            color: Color::WHITE,
        }
    }

    fn xs(list: &CommandList) -> Vec<f32> {
        list.iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { rect, .. } => Some(rect.x),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn linear_replay_without_jumps() {
        let mut list = CommandList::new();
        list.push(rect_cmd(1.0));
        list.push(rect_cmd(2.0));
        assert_eq!(xs(&list), vec![1.0, 2.0]);
    }

    #[test]
    fn jumps_reorder_regions() {
        // [A-head, a, A-tail, B-head, b, B-tail, entry]
        let mut list = CommandList::new();
        let a_head = list.push_jump();
        list.push(rect_cmd(1.0));
        let a_tail = list.push_jump();
        list.set_jump(a_head, list.len());
        let b_head = list.push_jump();
        list.push(rect_cmd(2.0));
        let b_tail = list.push_jump();
        list.set_jump(b_head, list.len());
        let entry = list.push_jump();

        // Paint B before A.
        list.set_jump(entry, b_head + 1);
        list.set_jump(b_tail, a_head + 1);
        list.set_jump(a_tail, list.len());

        assert!(list.check_resolved().is_ok());
        assert_eq!(xs(&list), vec![2.0, 1.0]);
        // Restartable.
        assert_eq!(xs(&list), vec![2.0, 1.0]);
    }

    #[test]
    fn unresolved_jump_is_reported() {
        let mut list = CommandList::new();
        list.push(rect_cmd(1.0));
        list.push_jump();
        assert_eq!(list.check_resolved(), Err(UiError::UnresolvedJump(1)));
    }

    #[test]
    #[should_panic(expected = "command at index 0 is not a jump")]
    fn patching_a_draw_command_is_a_violation() {
        let mut list = CommandList::new();
        list.push(rect_cmd(1.0));
        list.set_jump(0, 1);
    }

    #[test]
    #[should_panic(expected = "command at index 3 is not a jump")]
    fn patching_past_the_end_is_a_violation() {
        let mut list = CommandList::new();
        list.push_jump();
        list.set_jump(3, 1);
    }

    #[test]
    fn jumps_are_never_yielded() {
        let mut list = CommandList::new();
        let j = list.push_jump();
        list.set_jump(j, 1);
        list.push(Command::Clip { rect: Rect::UNCLIPPED });
        let all: Vec<_> = list.iter().collect();
        assert_eq!(all, vec![DrawCommand::Clip(Rect::UNCLIPPED)]);
    }
}
