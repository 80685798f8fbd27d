use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender};
use easel_core::{Screen, ShutdownSignal, Texture, Window, WindowOptions};

use crate::config::HostConfig;
use crate::error::{HostError, HostResult};
use crate::pump::{spawn_listener, Session};

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 800;

pub type ScreenReadyFn = Box<dyn FnOnce(&dyn Screen) + Send + 'static>;

/// Owns one window session.
///
/// Build it, grab any [`TextureUpdater`]s and the [`ShutdownSignal`] you need,
/// then call [`Host::run`] (or [`Host::run_on`] with your own screen). Running
/// consumes the host, so a host runs at most once.
pub struct Host {
    title: String,
    debug: bool,
    on_screen_ready: Option<ScreenReadyFn>,

    updates_tx: Sender<Arc<Texture>>,
    updates_rx: Receiver<Arc<Texture>>,
    done: ShutdownSignal,
}

impl Host {
    pub fn new(cfg: HostConfig) -> Self {
        // Rendezvous: an update is handed over only when the pump takes it.
        let (updates_tx, updates_rx) = bounded(0);
        Self {
            title: cfg.title,
            debug: cfg.debug,
            on_screen_ready: None,
            updates_tx,
            updates_rx,
            done: ShutdownSignal::new(),
        }
    }

    /// Called once with the live screen, after the window opens and before
    /// events are pumped. Pushing a texture synchronously from here would
    /// block forever; start a producer thread instead.
    pub fn on_screen_ready<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&dyn Screen) + Send + 'static,
    {
        self.on_screen_ready = Some(Box::new(f));
        self
    }

    #[inline]
    pub fn updater(&self) -> TextureUpdater {
        TextureUpdater {
            tx: self.updates_tx.clone(),
        }
    }

    /// Fires once the window has been released.
    #[inline]
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.done.clone()
    }

    /// Open the desktop backend on the calling thread and run the session
    /// until the window dies or Escape is pressed.
    pub fn run(self) -> HostResult<()> {
        let (result_tx, result_rx) = bounded(1);

        easel_platform_winit::run(move |screen| {
            let _ = result_tx.send(self.run_on(screen));
        })?;

        result_rx
            .try_recv()
            .map_err(|_| HostError::Driver(easel_core::BackendError::Closed))?
    }

    /// Run the session on an already-live screen. Blocks until the session ends.
    pub fn run_on(self, screen: &dyn Screen) -> HostResult<()> {
        let Host {
            title,
            debug,
            on_screen_ready,
            updates_tx,
            updates_rx,
            done,
        } = self;
        // Keeps the update channel connected even if every updater is dropped.
        let _updates_tx = updates_tx;

        let opts = WindowOptions {
            title,
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
        };
        let window = match screen.new_window(&opts) {
            Ok(w) => w,
            Err(e) => {
                log::error!("failed to initialize the app window: {e}");
                done.fire();
                return Err(HostError::WindowCreation(e));
            }
        };
        let _teardown = Teardown {
            window: window.clone(),
            done,
        };

        if let Some(f) = on_screen_ready {
            f(screen);
        }

        let (events, listener) = spawn_listener(window.clone(), debug)?;

        let mut session = Session::new(window, debug);
        session.pump(&events, &updates_rx);

        if listener.join().is_err() {
            log::warn!("listener thread panicked");
        }
        log::info!("session ended");
        Ok(())
    }
}

/// Release the window and signal completion however the session exits.
struct Teardown {
    window: Arc<dyn Window>,
    done: ShutdownSignal,
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.window.release();
        if self.done.fire() {
            log::info!("shutdown complete");
        }
    }
}

/// Cloneable handle for pushing textures into a running host.
#[derive(Clone)]
pub struct TextureUpdater {
    tx: Sender<Arc<Texture>>,
}

impl TextureUpdater {
    /// Blocks until the pump takes `t`. Fails once the host has stopped.
    pub fn update(&self, t: Arc<Texture>) -> HostResult<()> {
        self.tx.send(t).map_err(|_| HostError::UpdateClosed)
    }
}
