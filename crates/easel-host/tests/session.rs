use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use easel_core::{
    BackendError, Color, Direction, DrawOp, Event, KeyCode, KeyEvent, LifecycleEvent,
    MouseButton, MouseEvent, Rect, Size, Stage, Texture, Window, WindowOptions,
};
use easel_host::{Host, HostConfig, HostError, HostResult};
use easel_platform_headless::{DrawRecord, HeadlessScreen, HeadlessWindow};

const TIMEOUT: Duration = Duration::from_secs(5);

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config() -> HostConfig {
    HostConfig {
        title: "session test".into(),
        debug: true,
    }
}

struct Running {
    screen: Arc<HeadlessScreen>,
    window: Arc<HeadlessWindow>,
    handle: JoinHandle<HostResult<()>>,
}

fn start(host: Host) -> Running {
    start_on(host, Arc::new(HeadlessScreen::new()))
}

fn start_on(host: Host, screen: Arc<HeadlessScreen>) -> Running {
    init_logs();
    let window = screen.primary();
    let s = screen.clone();
    let handle = thread::spawn(move || host.run_on(s.as_ref()));
    assert!(wait_until(|| !screen.created().is_empty()));
    Running {
        screen,
        window,
        handle,
    }
}

fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + TIMEOUT;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}

fn publishes(w: &HeadlessWindow) -> usize {
    w.records()
        .iter()
        .filter(|r| **r == DrawRecord::Publish)
        .count()
}

/// Both the publish records and their frame snapshots have reached `n`.
fn published(w: &HeadlessWindow, n: usize) -> bool {
    publishes(w) == n && w.frames().len() == n
}

fn escape() -> Event {
    Event::Key(KeyEvent {
        code: KeyCode::Escape,
        direction: Direction::Press,
    })
}

fn press(x: f32, y: f32) -> Event {
    Event::Mouse(MouseEvent {
        x,
        y,
        button: MouseButton::Left,
        direction: Direction::Press,
    })
}

fn solid(size: Size, c: Color) -> Arc<Texture> {
    let mut t = Texture::new(size);
    t.fill(t.bounds(), c);
    Arc::new(t)
}

fn fill(rect: Rect, color: Color) -> DrawRecord {
    DrawRecord::Fill {
        rect,
        color,
        op: DrawOp::Src,
    }
}

fn stop(r: Running) {
    r.window.send(escape());
    r.handle.join().unwrap().unwrap();
}

#[test]
fn opens_one_fixed_size_window_with_title() {
    let r = start(Host::new(config()));

    assert_eq!(
        r.screen.created(),
        vec![WindowOptions {
            title: "session test".into(),
            width: 800,
            height: 800,
        }]
    );
    stop(r);
}

#[test]
fn escape_ends_session_without_further_drawing() {
    let host = Host::new(config());
    let done = host.shutdown_signal();
    let r = start(host);

    r.window.send(escape());
    r.window.send(Event::paint());

    assert!(done.wait_timeout(TIMEOUT));
    r.handle.join().unwrap().unwrap();

    assert!(r.window.is_released());
    assert_eq!(r.window.records(), vec![DrawRecord::Release]);
}

#[test]
fn dead_lifecycle_ends_session() {
    let host = Host::new(config());
    let done = host.shutdown_signal();
    let r = start(host);

    r.window.send(Event::Lifecycle(LifecycleEvent {
        from: Stage::Focused,
        to: Stage::Dead,
    }));

    assert!(done.wait_timeout(TIMEOUT));
    r.handle.join().unwrap().unwrap();
    assert!(r.window.is_released());
}

#[test]
fn escape_release_does_not_end_session() {
    let host = Host::new(config());
    let done = host.shutdown_signal();
    let r = start(host);

    r.window.send(Event::Key(KeyEvent {
        code: KeyCode::Escape,
        direction: Direction::Release,
    }));
    r.window.send(Event::paint());

    assert!(wait_until(|| publishes(&r.window) == 2));
    assert!(!done.is_fired());
    stop(r);
}

#[test]
fn resize_and_errors_keep_session_alive() {
    let host = Host::new(config());
    let done = host.shutdown_signal();
    let r = start(host);

    r.window.resize(Size::new(640, 480));
    r.window
        .send(Event::Error(BackendError::Surface("transient".into())));
    r.window.send(Event::paint());

    assert!(wait_until(|| publishes(&r.window) == 2));
    assert!(!done.is_fired());
    assert!(!r.window.is_released());

    let records = r.window.records();
    assert_eq!(records[0], fill(Rect::new(0, 0, 640, 480), Color::BLACK));
    stop(r);
}

#[test]
fn default_ui_draw_order() {
    let r = start(Host::new(config()));

    r.window.send(Event::paint());
    assert!(wait_until(|| published(&r.window, 2)));

    let bounds = Rect::new(0, 0, 800, 800);
    let [top, bottom, left, right] = bounds.border(10);
    assert_eq!(
        r.window.records(),
        vec![
            fill(bounds, Color::BLACK),
            fill(Rect::new(0, 0, 400, 20), Color::WHITE),
            fill(Rect::new(180, 20, 220, 220), Color::WHITE),
            DrawRecord::Publish,
            fill(top, Color::WHITE),
            fill(bottom, Color::WHITE),
            fill(left, Color::WHITE),
            fill(right, Color::WHITE),
            DrawRecord::Publish,
        ]
    );

    let frame = r.window.last_frame().unwrap();
    assert_eq!(frame.pixel(400, 400), Some(Color::BLACK));
    assert_eq!(frame.pixel(5, 400), Some(Color::WHITE));
    assert_eq!(frame.pixel(200, 100), Some(Color::WHITE));
    stop(r);
}

#[test]
fn primary_click_moves_the_figure() {
    let r = start(Host::new(config()));

    r.window.send(press(400.0, 400.0));
    assert!(wait_until(|| publishes(&r.window) == 2));

    let records = r.window.records();
    assert_eq!(records[1], fill(Rect::new(200, 275, 600, 295), Color::WHITE));
    assert_eq!(records[2], fill(Rect::new(380, 295, 420, 495), Color::WHITE));
    stop(r);
}

#[test]
fn far_out_press_keeps_pump_alive() {
    let host = Host::new(config());
    let done = host.shutdown_signal();
    let r = start(host);

    r.window.send(press(3.0e9, -3.0e9));
    assert!(wait_until(|| publishes(&r.window) == 2));
    assert!(!done.is_fired());

    // The pump still answers after the clamped re-centering.
    r.window.take_records();
    r.window.send(Event::paint());
    assert!(wait_until(|| publishes(&r.window) == 2));
    stop(r);
}

#[test]
fn pushed_texture_is_scaled_to_window() {
    let host = Host::new(config());
    let updater = host.updater();
    let r = start(host);

    let red = Color::rgb(255, 0, 0);
    updater.update(solid(Size::new(10, 10), red)).unwrap();

    assert!(wait_until(|| published(&r.window, 1)));
    assert_eq!(
        r.window.records(),
        vec![
            DrawRecord::Scale {
                dst: Rect::new(0, 0, 800, 800),
                src: Rect::new(0, 0, 10, 10),
                texture_size: Size::new(10, 10),
                op: DrawOp::Src,
            },
            DrawRecord::Publish,
        ]
    );

    let frame = r.window.last_frame().unwrap();
    assert_eq!(frame.pixel(0, 0), Some(red));
    assert_eq!(frame.pixel(799, 799), Some(red));

    // Later paint requests keep using the texture.
    r.window.take_records();
    r.window.send(Event::paint());
    assert!(wait_until(|| publishes(&r.window) == 1));
    assert!(matches!(r.window.records()[0], DrawRecord::Scale { .. }));
    stop(r);
}

#[test]
fn update_blocks_until_pump_receives() {
    init_logs();
    let host = Host::new(config());
    let updater = host.updater();

    let accepted = Arc::new(AtomicBool::new(false));
    let pusher = {
        let updater = updater.clone();
        let accepted = accepted.clone();
        thread::spawn(move || {
            updater
                .update(solid(Size::new(2, 2), Color::WHITE))
                .unwrap();
            accepted.store(true, Ordering::SeqCst);
        })
    };

    // No pump yet: the first push cannot complete.
    thread::sleep(Duration::from_millis(100));
    assert!(!accepted.load(Ordering::SeqCst));

    let r = start(host);
    assert!(wait_until(|| accepted.load(Ordering::SeqCst)));
    pusher.join().unwrap();

    // Second push returns only once the pump has it; its paint uses the new texture.
    updater
        .update(solid(Size::new(3, 5), Color::BLACK))
        .unwrap();
    assert!(wait_until(|| r.window.records().iter().any(|rec| matches!(
        rec,
        DrawRecord::Scale { texture_size, .. } if *texture_size == Size::new(3, 5)
    ))));
    stop(r);
}

#[test]
fn update_after_shutdown_is_rejected() {
    let host = Host::new(config());
    let updater = host.updater();
    let r = start(host);
    stop(r);

    let err = updater
        .update(solid(Size::new(1, 1), Color::WHITE))
        .unwrap_err();
    assert!(matches!(err, HostError::UpdateClosed));
}

#[test]
fn window_creation_failure_is_reported() {
    init_logs();
    let host = Host::new(config());
    let done = host.shutdown_signal();
    let screen = HeadlessScreen::failing("no display");

    let err = host.run_on(&screen).unwrap_err();
    assert!(matches!(
        err,
        HostError::WindowCreation(BackendError::WindowCreation(_))
    ));
    assert!(done.is_fired());
}

#[test]
fn screen_ready_runs_once_before_events() {
    let calls = Arc::new(AtomicUsize::new(0));
    let screen = Arc::new(HeadlessScreen::new());

    let host = {
        let calls = calls.clone();
        let window = screen.primary();
        Host::new(config()).on_screen_ready(move |_screen| {
            // Window is open but nothing has been painted yet.
            assert!(window.records().is_empty());
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };
    let r = start_on(host, screen);

    r.window.send(Event::paint());
    assert!(wait_until(|| publishes(&r.window) == 2));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    stop(r);
}
