use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use easel_core::{
    BackendResult, Canvas, Direction, Event, KeyCode, MouseButton, PublishResult, WindowOptions,
};
use parking_lot::Mutex;
use winit::{event::ElementState, keyboard, window::WindowId};

/// Requests posted from the session thread to the event loop.
pub(crate) enum DriverEvent {
    CreateWindow {
        opts: WindowOptions,
        reply: Sender<BackendResult<WindowParts>>,
    },
    /// Queue an event on a window, behind whatever the OS already delivered.
    Post { id: WindowId, event: Event },
    Present {
        id: WindowId,
        reply: Sender<PublishResult>,
    },
    Close { id: WindowId },
    SessionEnded,
}

/// What the session side gets back for a freshly opened window.
pub(crate) struct WindowParts {
    pub id: WindowId,
    pub canvas: Arc<Mutex<Canvas>>,
    pub events: Receiver<Event>,
}

pub(crate) fn key_code(code: keyboard::KeyCode) -> KeyCode {
    match code {
        keyboard::KeyCode::Escape => KeyCode::Escape,
        keyboard::KeyCode::Enter | keyboard::KeyCode::NumpadEnter => KeyCode::Enter,
        keyboard::KeyCode::Space => KeyCode::Space,
        keyboard::KeyCode::Tab => KeyCode::Tab,
        keyboard::KeyCode::Backspace => KeyCode::Backspace,
        _ => KeyCode::Unknown,
    }
}

pub(crate) fn physical_key(key: keyboard::PhysicalKey) -> KeyCode {
    match key {
        keyboard::PhysicalKey::Code(code) => key_code(code),
        keyboard::PhysicalKey::Unidentified(_) => KeyCode::Unknown,
    }
}

pub(crate) fn mouse_button(b: winit::event::MouseButton) -> MouseButton {
    use winit::event::MouseButton as W;
    match b {
        W::Left => MouseButton::Left,
        W::Right => MouseButton::Right,
        W::Middle => MouseButton::Middle,
        W::Back => MouseButton::Other(3),
        W::Forward => MouseButton::Other(4),
        W::Other(n) => MouseButton::Other(n),
    }
}

/// Key repeats carry no press/release edge.
pub(crate) fn direction(state: ElementState, repeat: bool) -> Direction {
    match (state, repeat) {
        (_, true) => Direction::None,
        (ElementState::Pressed, false) => Direction::Press,
        (ElementState::Released, false) => Direction::Release,
    }
}
