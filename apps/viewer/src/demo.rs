use std::io;
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use easel_core::{Color, Size, Texture};
use easel_host::TextureUpdater;

const GRADIENT_SIZE: Size = Size::new(256, 256);

pub fn load_png(path: &Path) -> Result<Texture> {
    let img = image::open(path)
        .with_context(|| format!("open texture {}", path.display()))?
        .to_rgba8();
    let size = Size::new(img.width(), img.height());
    Texture::from_rgba8(size, img.as_raw()).with_context(|| format!("decode {}", path.display()))
}

/// Diagonal gradient whose hue drifts with `frame`.
pub fn gradient(frame: u32) -> Texture {
    let mut t = Texture::new(GRADIENT_SIZE);
    let shift = (frame % 256) as u8;
    for y in 0..GRADIENT_SIZE.height {
        for x in 0..GRADIENT_SIZE.width {
            let c = Color::rgb(
                (x as u8).wrapping_add(shift),
                (y as u8).wrapping_sub(shift),
                ((x + y) / 2) as u8,
            );
            t.set(x, y, c);
        }
    }
    t
}

/// Push one texture from a helper thread; the push blocks until the pump takes it.
pub fn push_once(updater: TextureUpdater, t: Texture) -> JoinHandle<()> {
    thread::spawn(move || {
        if let Err(e) = updater.update(Arc::new(t)) {
            log::warn!("texture not delivered: {e}");
        }
    })
}

/// Stream gradients until the host stops accepting them.
pub fn spawn_producer(updater: TextureUpdater, interval: Duration) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("easel-demo-producer".into())
        .spawn(move || {
            let mut frame = 0u32;
            while updater.update(Arc::new(gradient(frame))).is_ok() {
                frame = frame.wrapping_add(1);
                thread::sleep(interval);
            }
            log::debug!("producer stopped after {frame} frames");
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_shifts_with_frame() {
        let a = gradient(0);
        let b = gradient(10);
        assert_eq!(a.size(), GRADIENT_SIZE);
        assert_eq!(a.pixel(0, 0), Some(Color::rgb(0, 0, 0)));
        assert_eq!(b.pixel(0, 0), Some(Color::rgb(10, 246, 0)));
    }

    #[test]
    fn missing_png_is_an_error() {
        assert!(load_png(Path::new("no/such/texture.png")).is_err());
    }
}
