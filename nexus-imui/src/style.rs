//! Visual style: metrics and the semantic color palette.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::primitives::{Color, Size};

/// Handle to a host font. The engine only passes it back to `TextMetrics`
/// and into text commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FontId(pub u32);

/// Semantic color roles. The three-state roles (`Button*`, `Base*`) are laid
/// out normal, hover, focus so a control can pick its state variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorRole {
    Text,
    Border,
    WindowBg,
    TitleBg,
    TitleText,
    PanelBg,
    Button,
    ButtonHover,
    ButtonFocus,
    Base,
    BaseHover,
    BaseFocus,
    ScrollBase,
    ScrollThumb,
}

impl ColorRole {
    pub const COUNT: usize = 14;

    /// Hover variant of a three-state role; other roles are returned as is.
    pub fn hovered(self) -> Self {
        match self {
            Self::Button => Self::ButtonHover,
            Self::Base => Self::BaseHover,
            other => other,
        }
    }

    /// Focus variant of a three-state role; other roles are returned as is.
    pub fn focused(self) -> Self {
        match self {
            Self::Button | Self::ButtonHover => Self::ButtonFocus,
            Self::Base | Self::BaseHover => Self::BaseFocus,
            other => other,
        }
    }

    /// Frames in these roles are drawn without a border.
    pub fn is_borderless(self) -> bool {
        matches!(self, Self::ScrollBase | Self::ScrollThumb | Self::TitleBg)
    }
}

/// One color per `ColorRole`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette([Color; ColorRole::COUNT]);

impl Index<ColorRole> for Palette {
    type Output = Color;
    fn index(&self, role: ColorRole) -> &Color {
        &self.0[role as usize]
    }
}

impl IndexMut<ColorRole> for Palette {
    fn index_mut(&mut self, role: ColorRole) -> &mut Color {
        &mut self.0[role as usize]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self([
            Color::rgb8(230, 230, 230),   // Text
            Color::rgb8(25, 25, 25),      // Border
            Color::rgb8(50, 50, 50),      // WindowBg
            Color::rgb8(25, 25, 25),      // TitleBg
            Color::rgb8(240, 240, 240),   // TitleText
            Color::rgba8(0, 0, 0, 0),     // PanelBg
            Color::rgb8(75, 75, 75),      // Button
            Color::rgb8(95, 95, 95),      // ButtonHover
            Color::rgb8(115, 115, 115),   // ButtonFocus
            Color::rgb8(30, 30, 30),      // Base
            Color::rgb8(35, 35, 35),      // BaseHover
            Color::rgb8(40, 40, 40),      // BaseFocus
            Color::rgb8(43, 43, 43),      // ScrollBase
            Color::rgb8(30, 30, 30),      // ScrollThumb
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub font: FontId,
    /// Base widget size, before padding.
    pub size: Size,
    pub padding: f32,
    pub spacing: f32,
    pub indent: f32,
    pub title_height: f32,
    pub scrollbar_size: f32,
    pub thumb_size: f32,
    pub colors: Palette,
}

impl Style {
    pub fn color(&self, role: ColorRole) -> Color {
        self.colors[role]
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: FontId(0),
            size: Size::new(68.0, 10.0),
            padding: 5.0,
            spacing: 4.0,
            indent: 24.0,
            title_height: 24.0,
            scrollbar_size: 12.0,
            thumb_size: 8.0,
            colors: Palette::default(),
        }
    }
}
