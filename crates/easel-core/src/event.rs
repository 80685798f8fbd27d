use crate::error::BackendError;
use crate::geom::{Rect, Size};

/// Window lifecycle stage, ordered from least to most active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Dead,
    Alive,
    Visible,
    Focused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub from: Stage,
    pub to: Stage,
}

/// New window dimensions in physical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizeEvent {
    pub width_px: u32,
    pub height_px: u32,
    pub pixels_per_pt: f32,
}

impl SizeEvent {
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width_px, self.height_px)
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.size().bounds()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    None,
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    None,
    Left,
    Middle,
    Right,
    Other(u16),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub x: f32,
    pub y: f32,
    pub button: MouseButton,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub direction: Direction,
}

/// Repaint request. `external` is set when the OS asked for it rather than the app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintEvent {
    pub external: bool,
}

/// Everything a backend window can deliver through `Window::next_event`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Lifecycle(LifecycleEvent),
    Size(SizeEvent),
    Mouse(MouseEvent),
    Key(KeyEvent),
    Paint(PaintEvent),
    Error(BackendError),
}

impl Event {
    /// Events that end the session: the window reaching `Stage::Dead`, or Escape pressed.
    pub fn is_terminal(&self) -> bool {
        match self {
            Event::Lifecycle(e) => e.to == Stage::Dead,
            Event::Key(e) => e.code == KeyCode::Escape && e.direction == Direction::Press,
            Event::Size(_) | Event::Mouse(_) | Event::Paint(_) | Event::Error(_) => false,
        }
    }

    #[inline]
    pub fn paint() -> Self {
        Event::Paint(PaintEvent { external: false })
    }
}
