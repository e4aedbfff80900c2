//! Radial menu geometry and gesture session state.
//!
//! [`select_section`] is the pure angular hit-test; [`MenuSession`]
//! carries the state of one open menu (items plus the center recorded
//! when it was shown) between the show request and the release gesture.

mod sector;
mod session;

pub use sector::select_section;
pub use session::{DEFAULT_DEAD_ZONE_RADIUS, MenuSession};
