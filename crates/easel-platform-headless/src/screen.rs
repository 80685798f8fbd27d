use std::sync::Arc;

use easel_core::{BackendError, BackendResult, Screen, Window, WindowOptions};
use parking_lot::Mutex;

use crate::window::HeadlessWindow;

/// Screen whose first `new_window` returns a window the caller can grab
/// beforehand with [`HeadlessScreen::primary`].
pub struct HeadlessScreen {
    primary: Arc<HeadlessWindow>,
    primary_taken: Mutex<bool>,
    created: Mutex<Vec<WindowOptions>>,
    fail_with: Option<String>,
}

impl HeadlessScreen {
    pub fn new() -> Self {
        Self {
            primary: Arc::new(HeadlessWindow::new()),
            primary_taken: Mutex::new(false),
            created: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    /// Screen that refuses to open windows.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Self::new()
        }
    }

    #[inline]
    pub fn primary(&self) -> Arc<HeadlessWindow> {
        self.primary.clone()
    }

    /// Options of every window opened so far, in order.
    pub fn created(&self) -> Vec<WindowOptions> {
        self.created.lock().clone()
    }
}

impl Default for HeadlessScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for HeadlessScreen {
    fn new_window(&self, opts: &WindowOptions) -> BackendResult<Arc<dyn Window>> {
        if let Some(reason) = &self.fail_with {
            return Err(BackendError::WindowCreation(reason.clone()));
        }

        self.created.lock().push(opts.clone());

        let mut taken = self.primary_taken.lock();
        let window = if *taken {
            Arc::new(HeadlessWindow::new())
        } else {
            *taken = true;
            self.primary.clone()
        };

        log::debug!("headless window opened: '{}' {}x{}", opts.title, opts.width, opts.height);
        window.open(opts);
        Ok(window)
    }
}
