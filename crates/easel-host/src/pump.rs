use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, select, Receiver};
use easel_core::{Direction, DrawOp, Event, MouseButton, Rect, SizeEvent, Texture, Window};

use crate::default_ui;
use crate::error::{HostError, HostResult};

/// Publish and keep going on failure; a lost frame is not worth ending the session over.
pub(crate) fn publish(window: &dyn Window) {
    if let Err(e) = window.publish() {
        log::warn!("publish failed: {e}");
    }
}

/// Pull events off the window on a dedicated thread and hand them over one at a time.
///
/// The returned channel closes on the first terminal event (window dead or
/// Escape pressed); nothing is forwarded after that.
pub(crate) fn spawn_listener(
    window: Arc<dyn Window>,
    debug: bool,
) -> HostResult<(Receiver<Event>, JoinHandle<()>)> {
    let (tx, rx) = bounded::<Event>(0);

    let handle = thread::Builder::new()
        .name("easel-listener".into())
        .spawn(move || loop {
            let e = window.next_event();
            if debug {
                log::debug!("new event: {e:?}");
            }
            if e.is_terminal() {
                log::info!("termination requested: {e:?}");
                break;
            }
            if tx.send(e).is_err() {
                break;
            }
        })
        .map_err(|e| HostError::Listener(e.to_string()))?;

    Ok((rx, handle))
}

/// Pump-side session state. Only the pump thread touches it.
pub(crate) struct Session {
    window: Arc<dyn Window>,
    debug: bool,

    size: SizeEvent,
    pos: Rect,
    texture: Option<Arc<Texture>>,
}

impl Session {
    pub(crate) fn new(window: Arc<dyn Window>, debug: bool) -> Self {
        let size = window.size();
        Self {
            window,
            debug,
            size: SizeEvent {
                width_px: size.width,
                height_px: size.height,
                pixels_per_pt: 1.0,
            },
            pos: default_ui::initial_position(),
            texture: None,
        }
    }

    /// Run until the listener closes the event channel.
    pub(crate) fn pump(&mut self, events: &Receiver<Event>, updates: &Receiver<Arc<Texture>>) {
        loop {
            select! {
                recv(events) -> msg => {
                    let Ok(e) = msg else {
                        return;
                    };
                    self.handle_event(e);
                    if self.debug {
                        log::debug!("window size: {}", self.size.size());
                    }
                }
                recv(updates) -> msg => {
                    // The host keeps a sender alive for the whole session.
                    if let Ok(t) = msg {
                        self.texture = Some(t);
                        self.window.send(Event::paint());
                    }
                }
            }
        }
    }

    pub(crate) fn handle_event(&mut self, e: Event) {
        match e {
            Event::Size(sz) => self.size = sz,
            Event::Error(err) => log::error!("backend error: {err}"),
            Event::Mouse(m) => {
                if m.button == MouseButton::Left && m.direction == Direction::Press {
                    self.pos = default_ui::centered_on(m.x, m.y);
                    self.window.send(Event::paint());
                }
            }
            Event::Paint(_) => self.paint(),
            Event::Lifecycle(_) | Event::Key(_) => {}
        }
    }

    fn paint(&self) {
        let bounds = self.size.bounds();
        match &self.texture {
            None => default_ui::draw(self.window.as_ref(), bounds, self.pos),
            Some(t) => self.window.scale(bounds, t, t.bounds(), DrawOp::Src),
        }
        publish(self.window.as_ref());
    }

    #[cfg(test)]
    pub(crate) fn position(&self) -> Rect {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::{BackendError, Color, MouseEvent, Point, PublishResult, Size};
    use std::sync::Mutex;

    /// Records call names and queued sends.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
        sent: Mutex<Vec<Event>>,
        fail_publish: Mutex<bool>,
    }

    impl Window for Recorder {
        fn next_event(&self) -> Event {
            Event::paint()
        }
        fn send(&self, event: Event) {
            self.sent.lock().unwrap().push(event);
        }
        fn size(&self) -> Size {
            Size::new(800, 800)
        }
        fn fill(&self, r: Rect, _c: Color, _op: DrawOp) {
            self.calls.lock().unwrap().push(format!("fill {r}"));
        }
        fn scale(&self, dst: Rect, _src: &Texture, src_rect: Rect, _op: DrawOp) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("scale {dst} <- {src_rect}"));
        }
        fn publish(&self) -> PublishResult {
            self.calls.lock().unwrap().push("publish".into());
            if *self.fail_publish.lock().unwrap() {
                return Err(BackendError::Present("lost".into()));
            }
            Ok(())
        }
        fn release(&self) {}
    }

    fn press(x: f32, y: f32, button: MouseButton) -> Event {
        Event::Mouse(MouseEvent {
            x,
            y,
            button,
            direction: Direction::Press,
        })
    }

    #[test]
    fn primary_press_recenters_and_requests_paint() {
        let w = Arc::new(Recorder::default());
        let mut s = Session::new(w.clone(), false);

        s.handle_event(press(300.0, 200.0, MouseButton::Left));

        assert_eq!(s.position().min, Point::new(100, 75));
        assert_eq!(s.position().max, Point::new(500, 325));
        assert_eq!(*w.sent.lock().unwrap(), vec![Event::paint()]);
        assert!(w.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn other_buttons_and_releases_are_ignored() {
        let w = Arc::new(Recorder::default());
        let mut s = Session::new(w.clone(), false);

        s.handle_event(press(300.0, 200.0, MouseButton::Right));
        s.handle_event(Event::Mouse(MouseEvent {
            x: 1.0,
            y: 1.0,
            button: MouseButton::Left,
            direction: Direction::Release,
        }));

        assert_eq!(s.position(), default_ui::initial_position());
        assert!(w.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn resize_updates_paint_bounds() {
        let w = Arc::new(Recorder::default());
        let mut s = Session::new(w.clone(), false);
        s.texture = Some(Arc::new(Texture::new(Size::new(8, 4))));

        s.handle_event(Event::Size(SizeEvent {
            width_px: 640,
            height_px: 480,
            pixels_per_pt: 1.0,
        }));
        s.handle_event(Event::paint());

        assert_eq!(
            *w.calls.lock().unwrap(),
            vec![
                "scale (0,0)-(640,480) <- (0,0)-(8,4)".to_string(),
                "publish".to_string(),
            ]
        );
    }

    #[test]
    fn errors_and_failed_publishes_do_not_stop_painting() {
        let w = Arc::new(Recorder::default());
        *w.fail_publish.lock().unwrap() = true;
        let mut s = Session::new(w.clone(), false);

        s.handle_event(Event::Error(BackendError::Surface("boom".into())));
        s.handle_event(Event::paint());
        s.handle_event(Event::paint());

        // Default UI publishes twice per paint.
        let publishes = w
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == "publish")
            .count();
        assert_eq!(publishes, 4);
    }
}
