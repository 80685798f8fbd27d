use std::collections::HashMap;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Sender};
use easel_core::{
    BackendError, BackendResult, Canvas, Direction, Event, KeyEvent, LifecycleEvent, MouseButton,
    MouseEvent, PaintEvent, PublishResult, Screen, Size, SizeEvent, Stage, WindowOptions,
};
use parking_lot::Mutex;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::events::{self, DriverEvent, WindowParts};
use crate::screen::WinitScreen;

/// Run the OS event loop on the calling thread and `session` on a worker
/// thread with a live screen. Returns once `session` has returned and the
/// loop has shut down.
///
/// Must be called from the main thread on platforms that require it.
pub fn run<F>(session: F) -> BackendResult<()>
where
    F: FnOnce(&dyn Screen) + Send + 'static,
{
    let event_loop = EventLoop::<DriverEvent>::with_user_event()
        .build()
        .map_err(|e| BackendError::EventLoop(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let proxy = event_loop.create_proxy();
    let screen = WinitScreen::new(proxy.clone());

    let worker = thread::Builder::new()
        .name("easel-session".into())
        .spawn(move || {
            // Ends the event loop even if the session unwinds.
            let _end = OnDrop::new(move || {
                let _ = proxy.send_event(DriverEvent::SessionEnded);
            });
            session(&screen);
        })
        .map_err(|e| BackendError::EventLoop(format!("spawn session thread: {e}")))?;

    let mut app = DriverApp::new();
    let loop_result = event_loop.run_app(&mut app);

    // Dropping the windows disconnects their event channels so the session unblocks.
    drop(app);

    let joined = worker.join();
    loop_result.map_err(|e| BackendError::EventLoop(e.to_string()))?;
    joined.map_err(|_| BackendError::EventLoop("session thread panicked".into()))
}

/// Runs a closure when dropped, including during unwinding.
struct OnDrop<F: FnOnce()> {
    f: Option<F>,
}

impl<F: FnOnce()> OnDrop<F> {
    fn new(f: F) -> Self {
        Self { f: Some(f) }
    }
}

impl<F: FnOnce()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        if let Some(f) = self.f.take() {
            f();
        }
    }
}

struct WindowSlot {
    // Field order matters: the surface must drop before the window and context.
    surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
    _context: softbuffer::Context<Rc<Window>>,
    window: Rc<Window>,

    canvas: Arc<Mutex<Canvas>>,
    events: Sender<Event>,

    stage: Stage,
    cursor: (f32, f32),
}

impl WindowSlot {
    fn forward(&self, e: Event) {
        let _ = self.events.send(e);
    }

    fn transition(&mut self, to: Stage) {
        if self.stage == to {
            return;
        }
        let from = self.stage;
        self.stage = to;
        self.forward(Event::Lifecycle(LifecycleEvent { from, to }));
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.canvas.lock().resize(Size::new(size.width, size.height));
        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            if let Err(e) = self.surface.resize(w, h) {
                self.forward(Event::Error(BackendError::Surface(e.to_string())));
            }
        }
        self.forward(Event::Size(SizeEvent {
            width_px: size.width,
            height_px: size.height,
            pixels_per_pt: self.window.scale_factor() as f32,
        }));
    }

    fn present(&mut self) -> PublishResult {
        let canvas = self.canvas.lock();
        let size = canvas.size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };

        self.surface
            .resize(w, h)
            .map_err(|e| BackendError::Surface(e.to_string()))?;
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| BackendError::Surface(e.to_string()))?;
        canvas.copy_xrgb_into(&mut buffer);
        buffer
            .present()
            .map_err(|e| BackendError::Present(e.to_string()))
    }
}

struct DriverApp {
    windows: HashMap<WindowId, WindowSlot>,
    resumed: bool,
    /// Window requests that arrived before the platform allowed window creation.
    deferred: Vec<DriverEvent>,
}

impl DriverApp {
    fn new() -> Self {
        Self {
            windows: HashMap::new(),
            resumed: false,
            deferred: Vec::new(),
        }
    }

    fn open_window(&mut self, el: &ActiveEventLoop, opts: &WindowOptions) -> BackendResult<WindowParts> {
        let attrs = WindowAttributes::default()
            .with_title(opts.title.clone())
            .with_inner_size(LogicalSize::new(opts.width, opts.height));

        let window = Rc::new(
            el.create_window(attrs)
                .map_err(|e| BackendError::WindowCreation(e.to_string()))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| BackendError::WindowCreation(format!("softbuffer context: {e}")))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| BackendError::WindowCreation(format!("softbuffer surface: {e}")))?;

        let id = window.id();
        let canvas = Arc::new(Mutex::new(Canvas::new(Size::default())));
        let (tx, rx) = unbounded();

        let mut slot = WindowSlot {
            surface,
            _context: context,
            window,
            canvas: canvas.clone(),
            events: tx,
            stage: Stage::Dead,
            cursor: (0.0, 0.0),
        };
        slot.transition(Stage::Visible);
        let inner = slot.window.inner_size();
        slot.resize(inner);

        log::info!(
            "window created: '{}' {}x{} (id: {:?})",
            opts.title,
            inner.width,
            inner.height,
            id
        );
        self.windows.insert(id, slot);

        Ok(WindowParts {
            id,
            canvas,
            events: rx,
        })
    }

    fn handle(&mut self, el: &ActiveEventLoop, ev: DriverEvent) {
        match ev {
            DriverEvent::CreateWindow { opts, reply } => {
                if !self.resumed {
                    self.deferred.push(DriverEvent::CreateWindow { opts, reply });
                    return;
                }
                let res = self.open_window(el, &opts);
                if let Err(e) = &res {
                    log::error!("failed to create window '{}': {e}", opts.title);
                }
                let _ = reply.send(res);
            }
            DriverEvent::Post { id, event } => {
                if let Some(slot) = self.windows.get(&id) {
                    slot.forward(event);
                }
            }
            DriverEvent::Present { id, reply } => {
                let res = match self.windows.get_mut(&id) {
                    Some(slot) => slot.present(),
                    None => Err(BackendError::Closed),
                };
                let _ = reply.send(res);
            }
            DriverEvent::Close { id } => {
                if self.windows.remove(&id).is_some() {
                    log::debug!("window {:?} closed", id);
                }
            }
            DriverEvent::SessionEnded => {
                log::debug!("session ended, leaving event loop");
                el.exit();
            }
        }
    }
}

impl ApplicationHandler<DriverEvent> for DriverApp {
    fn resumed(&mut self, el: &ActiveEventLoop) {
        if self.resumed {
            return;
        }
        self.resumed = true;

        for ev in std::mem::take(&mut self.deferred) {
            self.handle(el, ev);
        }
    }

    fn user_event(&mut self, el: &ActiveEventLoop, ev: DriverEvent) {
        self.handle(el, ev);
    }

    fn window_event(&mut self, _el: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(slot) = self.windows.get_mut(&id) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => slot.transition(Stage::Dead),
            WindowEvent::Focused(true) => slot.transition(Stage::Focused),
            WindowEvent::Focused(false) => {
                if slot.stage == Stage::Focused {
                    slot.transition(Stage::Visible);
                }
            }
            WindowEvent::Resized(size) => slot.resize(size),
            WindowEvent::RedrawRequested => slot.forward(Event::Paint(PaintEvent { external: true })),
            WindowEvent::CursorMoved { position, .. } => {
                slot.cursor = (position.x as f32, position.y as f32);
                slot.forward(Event::Mouse(MouseEvent {
                    x: slot.cursor.0,
                    y: slot.cursor.1,
                    button: MouseButton::None,
                    direction: Direction::None,
                }));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                slot.forward(Event::Mouse(MouseEvent {
                    x: slot.cursor.0,
                    y: slot.cursor.1,
                    button: events::mouse_button(button),
                    direction: events::direction(state, false),
                }));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                slot.forward(Event::Key(KeyEvent {
                    code: events::physical_key(event.physical_key),
                    direction: events::direction(event.state, event.repeat),
                }));
            }
            _ => {}
        }
    }
}
