use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver};
use easel_core::{
    BackendError, BackendResult, Canvas, Color, DrawOp, Event, LifecycleEvent, PublishResult,
    Rect, Screen, Size, Stage, Texture, Window, WindowOptions,
};
use parking_lot::Mutex;
use winit::event_loop::EventLoopProxy;
use winit::window::WindowId;

use crate::events::{DriverEvent, WindowParts};

/// Screen handed to the session callback by [`crate::run`].
pub struct WinitScreen {
    proxy: Mutex<EventLoopProxy<DriverEvent>>,
}

impl WinitScreen {
    pub(crate) fn new(proxy: EventLoopProxy<DriverEvent>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
        }
    }
}

impl Screen for WinitScreen {
    fn new_window(&self, opts: &WindowOptions) -> BackendResult<Arc<dyn Window>> {
        let (reply, rx) = bounded(1);
        let proxy = self.proxy.lock().clone();
        proxy
            .send_event(DriverEvent::CreateWindow {
                opts: opts.clone(),
                reply,
            })
            .map_err(|_| BackendError::Closed)?;

        let parts = rx.recv().map_err(|_| BackendError::Closed)??;
        Ok(Arc::new(WinitWindow::new(parts, proxy)))
    }
}

/// Session-side handle of an OS window.
///
/// Events arrive on a channel fed by the event loop; the channel disconnects
/// when the loop drops the window, which reads as a transition to `Dead`.
pub struct WinitWindow {
    id: WindowId,
    proxy: Mutex<EventLoopProxy<DriverEvent>>,
    canvas: Arc<Mutex<Canvas>>,
    events: Receiver<Event>,
    released: AtomicBool,
}

impl WinitWindow {
    fn new(parts: WindowParts, proxy: EventLoopProxy<DriverEvent>) -> Self {
        Self {
            id: parts.id,
            proxy: Mutex::new(proxy),
            canvas: parts.canvas,
            events: parts.events,
            released: AtomicBool::new(false),
        }
    }

    fn post(&self, ev: DriverEvent) -> BackendResult<()> {
        self.proxy
            .lock()
            .send_event(ev)
            .map_err(|_| BackendError::Closed)
    }
}

impl Window for WinitWindow {
    fn next_event(&self) -> Event {
        if self.released.load(Ordering::Acquire) {
            return dead();
        }
        self.events.recv().unwrap_or_else(|_| dead())
    }

    fn send(&self, event: Event) {
        if let Err(e) = self.post(DriverEvent::Post { id: self.id, event }) {
            log::debug!("send on window {:?} dropped: {e}", self.id);
        }
    }

    fn size(&self) -> Size {
        self.canvas.lock().size()
    }

    fn fill(&self, r: Rect, c: Color, op: DrawOp) {
        self.canvas.lock().fill(r, c, op);
    }

    fn scale(&self, dst: Rect, src: &Texture, src_rect: Rect, op: DrawOp) {
        self.canvas.lock().scale(dst, src, src_rect, op);
    }

    fn publish(&self) -> PublishResult {
        let (reply, rx) = bounded(1);
        self.post(DriverEvent::Present { id: self.id, reply })?;
        rx.recv().map_err(|_| BackendError::Closed)?
    }

    fn release(&self) {
        if self.released.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Err(e) = self.post(DriverEvent::Close { id: self.id }) {
            log::debug!("close on window {:?} dropped: {e}", self.id);
        }
    }
}

fn dead() -> Event {
    Event::Lifecycle(LifecycleEvent {
        from: Stage::Visible,
        to: Stage::Dead,
    })
}
