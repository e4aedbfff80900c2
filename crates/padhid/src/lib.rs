//! Input report decoding for the macropad.
//!
//! The pad sends a 2-byte input report on every change: bits 0..11 are
//! the button levels, bits 12..13 a 2-bit signed encoder delta. Reports
//! carry full state rather than deltas, so a dropped report is healed by
//! the next accurate one. Decoding is pure over `(previous state,
//! report)` and fully testable without a device.

use std::time::Instant;

use macrodeck_protocol::{Action, BUTTON_COUNT, ENCODER_COUNT};
use tracing::{trace, warn};

/// USB vendor id of the pad.
pub const VENDOR_ID: u16 = 0x1209;
/// USB product id of the pad.
pub const PRODUCT_ID: u16 = 0x0001;
/// HID usage page the input reports arrive on.
pub const USAGE_PAGE: u16 = 0xFF;
/// HID usage the input reports arrive on.
pub const USAGE: u16 = 0x01;

/// Level of one button, with the press timestamp while held.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ButtonState {
    /// Button is up.
    #[default]
    Released,
    /// Button is down.
    Held {
        /// When the press edge was observed.
        pressed_at: Instant,
    },
}

/// Last observed pad state, carried between reports for edge detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct PadState {
    /// Per-button level.
    pub buttons: [ButtonState; BUTTON_COUNT as usize],
    /// Last encoder delta per encoder.
    pub encoders: [i8; ENCODER_COUNT as usize],
}

/// Decode one input report against the previous state.
///
/// Returns the new state and the action the report encodes, if any.
/// A report should carry a single change event; if it somehow carries
/// several, the last one decoded wins. Button releases update state but
/// produce no action (the schema has no release trigger).
pub fn decode_report(previous: &PadState, report: [u8; 2]) -> (PadState, Option<Action>) {
    // Bits 0..11: button levels.
    let buttons = ((report[1] as u16) << 8) | (report[0] as u16);
    // Bits 12..13: 2-bit signed encoder delta.
    let encoder_bits = (report[1] >> 4) & 0b11;
    let delta: i8 = match encoder_bits {
        0b00 => 0,
        0b01 => 1,
        0b11 => -1,
        invalid => {
            warn!(bits = invalid, "invalid encoder field in report");
            0
        }
    };

    let mut next = *previous;
    let mut action = None;

    for i in 0..BUTTON_COUNT as usize {
        let pressed = (buttons & (1 << i)) != 0;
        match (previous.buttons[i], pressed) {
            (ButtonState::Released, true) => {
                trace!(button = i, "button_press");
                next.buttons[i] = ButtonState::Held {
                    pressed_at: Instant::now(),
                };
                action = Some(Action::ButtonPress { button: i as u8 });
            }
            (ButtonState::Held { .. }, false) => {
                trace!(button = i, "button_release");
                next.buttons[i] = ButtonState::Released;
            }
            _ => {}
        }
    }

    for i in 0..ENCODER_COUNT as usize {
        match (previous.encoders[i], delta) {
            (0, 1) => {
                trace!(encoder = i, "encoder_increment");
                action = Some(Action::EncoderIncrement { id: i as u8 });
            }
            (0, -1) => {
                trace!(encoder = i, "encoder_decrement");
                action = Some(Action::EncoderDecrement { id: i as u8 });
            }
            _ => {}
        }
        next.encoders[i] = delta;
    }

    (next, action)
}
