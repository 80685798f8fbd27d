pub mod canvas;
pub mod color;
pub mod error;
pub mod event;
pub mod geom;
pub mod screen;
pub mod sync;
pub mod texture;

pub use crate::canvas::Canvas;
pub use crate::color::Color;
pub use crate::error::{BackendError, BackendResult};
pub use crate::event::{
    Direction, Event, KeyCode, KeyEvent, LifecycleEvent, MouseButton, MouseEvent, PaintEvent,
    SizeEvent, Stage,
};
pub use crate::geom::{Point, Rect, Size};
pub use crate::screen::{DrawOp, PublishResult, Screen, Window, WindowOptions};
pub use crate::sync::ShutdownSignal;
pub use crate::texture::Texture;
