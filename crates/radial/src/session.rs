//! State of one open radial menu gesture.

use config::RadialMenuItem;
use macrodeck_protocol::Point;
use tracing::debug;

use crate::sector::select_section;

/// Default minimum release distance from the menu center, in pixels.
pub const DEFAULT_DEAD_ZONE_RADIUS: f32 = 50.0;

/// One open radial menu: the items shown, the center the menu was shown
/// at, and the dead-zone radius in effect.
///
/// Sessions are single-flight per device: the engine holds at most one
/// and replaces it wholesale when a new menu opens. The session owns
/// clones of the menu items, so a config reload mid-gesture cannot pull
/// the tree out from under an in-flight selection.
#[derive(Debug, Clone)]
pub struct MenuSession {
    items: Vec<RadialMenuItem>,
    center: Point,
    dead_zone_radius: f32,
}

impl MenuSession {
    /// Open a session for `items` centered at `center`.
    pub fn new(items: Vec<RadialMenuItem>, center: Point, dead_zone_radius: f32) -> Self {
        Self {
            items,
            center,
            dead_zone_radius,
        }
    }

    /// Section labels in section order, for the show-menu request.
    pub fn labels(&self) -> Vec<String> {
        self.items.iter().map(|i| i.label.clone()).collect()
    }

    /// The recorded menu center, used as the hit-test origin.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Hit-test a release point against this session's items.
    pub fn select(&self, release: Point) -> Option<usize> {
        select_section(&self.items, self.center, release, self.dead_zone_radius)
    }

    /// Conclude the gesture: hit-test and hand out the selected item.
    /// `None` means the gesture was cancelled (dead zone or empty menu).
    pub fn resolve(mut self, release: Point) -> Option<RadialMenuItem> {
        let section = self.select(release)?;
        debug!(section, label = %self.items[section].label, "radial_select");
        Some(self.items.swap_remove(section))
    }
}
