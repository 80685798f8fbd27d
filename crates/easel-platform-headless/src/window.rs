use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{unbounded, Receiver, Sender};
use easel_core::{
    BackendError, Canvas, Color, DrawOp, Event, LifecycleEvent, PublishResult, Rect, Size,
    SizeEvent, Stage, Texture, Window, WindowOptions,
};
use parking_lot::Mutex;

/// One recorded call on a headless window.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawRecord {
    Fill { rect: Rect, color: Color, op: DrawOp },
    Scale { dst: Rect, src: Rect, texture_size: Size, op: DrawOp },
    Publish,
    Release,
}

pub struct HeadlessWindow {
    tx: Sender<Event>,
    rx: Receiver<Event>,

    canvas: Mutex<Canvas>,
    records: Mutex<Vec<DrawRecord>>,
    frames: Mutex<Vec<Canvas>>,
    publish_error: Mutex<Option<BackendError>>,

    released: AtomicBool,
}

impl HeadlessWindow {
    pub(crate) fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            canvas: Mutex::new(Canvas::new(Size::default())),
            records: Mutex::new(Vec::new()),
            frames: Mutex::new(Vec::new()),
            publish_error: Mutex::new(None),
            released: AtomicBool::new(false),
        }
    }

    /// Size the canvas and queue the opening lifecycle + size events.
    pub(crate) fn open(&self, opts: &WindowOptions) {
        self.canvas.lock().resize(Size::new(opts.width, opts.height));
        let _ = self.tx.send(Event::Lifecycle(LifecycleEvent {
            from: Stage::Dead,
            to: Stage::Visible,
        }));
        let _ = self.tx.send(Event::Size(SizeEvent {
            width_px: opts.width,
            height_px: opts.height,
            pixels_per_pt: 1.0,
        }));
    }

    /// Simulate an OS resize: the back buffer follows and a size event is queued.
    pub fn resize(&self, size: Size) {
        self.canvas.lock().resize(size);
        self.send(Event::Size(SizeEvent {
            width_px: size.width,
            height_px: size.height,
            pixels_per_pt: 1.0,
        }));
    }

    /// Make the next `publish` fail with `err`.
    pub fn fail_next_publish(&self, err: BackendError) {
        *self.publish_error.lock() = Some(err);
    }

    /// Draw calls so far.
    pub fn records(&self) -> Vec<DrawRecord> {
        self.records.lock().clone()
    }

    /// Drain and return draw calls so far.
    pub fn take_records(&self) -> Vec<DrawRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    /// Snapshots of the canvas taken at each successful publish.
    pub fn frames(&self) -> Vec<Canvas> {
        self.frames.lock().clone()
    }

    pub fn last_frame(&self) -> Option<Canvas> {
        self.frames.lock().last().cloned()
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    /// Events queued but not yet taken by `next_event`.
    #[inline]
    pub fn pending_events(&self) -> usize {
        self.rx.len()
    }

    fn record(&self, r: DrawRecord) {
        self.records.lock().push(r);
    }
}

impl Window for HeadlessWindow {
    fn next_event(&self) -> Event {
        if self.is_released() {
            return dead();
        }
        self.rx.recv().unwrap_or_else(|_| dead())
    }

    fn send(&self, event: Event) {
        let _ = self.tx.send(event);
    }

    fn size(&self) -> Size {
        self.canvas.lock().size()
    }

    fn fill(&self, r: Rect, c: Color, op: DrawOp) {
        self.canvas.lock().fill(r, c, op);
        self.record(DrawRecord::Fill { rect: r, color: c, op });
    }

    fn scale(&self, dst: Rect, src: &Texture, src_rect: Rect, op: DrawOp) {
        self.canvas.lock().scale(dst, src, src_rect, op);
        self.record(DrawRecord::Scale {
            dst,
            src: src_rect,
            texture_size: src.size(),
            op,
        });
    }

    fn publish(&self) -> PublishResult {
        // The frame is stored before the record so observers of `Publish` see it.
        let result = match self.publish_error.lock().take() {
            Some(err) => Err(err),
            None => {
                let snapshot = self.canvas.lock().clone();
                self.frames.lock().push(snapshot);
                Ok(())
            }
        };
        self.record(DrawRecord::Publish);
        result
    }

    fn release(&self) {
        if self.released.swap(true, Ordering::AcqRel) {
            return;
        }
        self.record(DrawRecord::Release);
        // Wake a listener parked in next_event.
        let _ = self.tx.send(dead());
    }
}

fn dead() -> Event {
    Event::Lifecycle(LifecycleEvent {
        from: Stage::Visible,
        to: Stage::Dead,
    })
}
