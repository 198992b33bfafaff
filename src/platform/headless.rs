//! Headless backend
//!
//! Records draw calls and sounds instead of producing them. Drives the
//! native demo run and the presentation tests.

use glam::IVec2;

use super::{Audio, Color, Renderer, SoundEffect};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Clear(Color),
    Line { from: IVec2, to: IVec2, color: Color },
    Rectangle { pos: IVec2, size: IVec2, color: Color },
    Circle { center: IVec2, radius: i32, color: Color },
    Text { text: String, pos: IVec2, size: i32, color: Color },
}

/// Keeps the draw calls of the most recent frame
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
    /// Completed frames
    pub frames: u64,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn lines_with(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { color: line, .. } if *line == color))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn begin(&mut self) {
        self.commands.clear();
    }

    fn end(&mut self) {
        self.frames += 1;
    }

    fn clear_background(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_line(&mut self, from: IVec2, to: IVec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_rectangle(&mut self, pos: IVec2, size: IVec2, color: Color) {
        self.commands.push(DrawCommand::Rectangle { pos, size, color });
    }

    fn draw_circle(&mut self, center: IVec2, radius: i32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, pos: IVec2, size: i32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            pos,
            size,
            color,
        });
    }
}

/// Audio backend that only remembers what it was asked to play
#[derive(Debug, Default)]
pub struct SilentAudio {
    pub played: Vec<SoundEffect>,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.iter().filter(|&&e| e == effect).count()
    }
}

impl Audio for SilentAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("(silent) {effect:?}");
        self.played.push(effect);
    }
}
