//! Built-in picture shown until the first texture arrives: a white T-shaped
//! pair of bars on black, anchored at the last primary click, with a white
//! frame around the window.

use easel_core::{Color, DrawOp, Point, Rect, Window};

use crate::pump::publish;

/// Box re-centered on each primary click.
pub const FIGURE_WIDTH: i32 = 400;
pub const FIGURE_HEIGHT: i32 = 250;

pub const BAR_H_WIDTH: i32 = 400;
pub const BAR_H_HEIGHT: i32 = 20;
pub const BAR_V_WIDTH: i32 = 40;
pub const BAR_V_HEIGHT: i32 = 200;
/// Offset of the vertical bar from the horizontal bar's origin.
pub const BAR_V_OFFSET: Point = Point::new(180, 20);

pub const BORDER_WIDTH: i32 = 10;

/// Anchor before the first click.
pub const fn initial_position() -> Rect {
    Rect::new(0, 0, 200, 200)
}

/// Figure box centered on a press at `(x, y)`.
pub fn centered_on(x: f32, y: f32) -> Rect {
    // `as` saturates out-of-range floats; keep the offsets saturating too.
    let min = Point::new(
        (x as i32).saturating_sub(FIGURE_WIDTH / 2),
        (y as i32).saturating_sub(FIGURE_HEIGHT / 2),
    );
    Rect::from_origin(min, FIGURE_WIDTH, FIGURE_HEIGHT)
}

pub fn horizontal_bar(pos: Rect) -> Rect {
    Rect::from_origin(pos.min, BAR_H_WIDTH, BAR_H_HEIGHT)
}

pub fn vertical_bar(pos: Rect) -> Rect {
    let origin = Point::new(pos.min.x + BAR_V_OFFSET.x, pos.min.y + BAR_V_OFFSET.y);
    Rect::from_origin(origin, BAR_V_WIDTH, BAR_V_HEIGHT)
}

/// Background, both bars, publish, then the frame. The caller publishes the frame.
pub fn draw(window: &dyn Window, bounds: Rect, pos: Rect) {
    window.fill(bounds, Color::BLACK, DrawOp::Src);

    window.fill(horizontal_bar(pos), Color::WHITE, DrawOp::Src);
    window.fill(vertical_bar(pos), Color::WHITE, DrawOp::Src);

    publish(window);

    for strip in bounds.border(BORDER_WIDTH) {
        window.fill(strip, Color::WHITE, DrawOp::Src);
    }
}
