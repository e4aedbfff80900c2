//! Angular hit-testing: map a release vector to a menu section.

use std::f32::consts::{FRAC_PI_2, TAU};

use macrodeck_protocol::Point;

/// Map a release point to the selected section of an `N`-way radial menu.
///
/// Sections are equal angular sectors: section 0 is centered on twelve
/// o'clock and numbering proceeds clockwise. Returns `None` when the
/// release lands inside the dead zone (gesture cancelled) or when there
/// are no items. A release exactly on the boundary between sections `k`
/// and `k + 1` resolves to `(k + 1) % N`.
///
/// Pure; screen coordinates (y grows downward).
pub fn select_section<T>(
    items: &[T],
    center: Point,
    release: Point,
    dead_zone_radius: f32,
) -> Option<usize> {
    if items.is_empty() {
        return None;
    }

    let dx = release.x - center.x;
    let dy = release.y - center.y;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance < dead_zone_radius {
        return None;
    }

    let mut angle = dy.atan2(dx);

    // Move the origin to twelve o'clock, wrapping first so the atan2
    // discontinuity at the top does not split section 0.
    if angle < -FRAC_PI_2 {
        angle += TAU;
    }
    angle += FRAC_PI_2;

    // Rotate by half a sector so boundaries fall between item directions.
    let sector = TAU / items.len() as f32;
    angle += sector / 2.0;
    angle %= TAU;

    Some(((angle / sector).floor() as usize) % items.len())
}
