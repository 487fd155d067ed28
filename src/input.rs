//! Turning the analog input into player moves.
//!
//! The four buttons sit on a resistor ladder feeding one analog channel, so each button
//! produces a reading in its own narrow window.

use crate::hal::{AnalogInput, Delay};
use crate::sequence::Move;

/// Settle time after every sample, against contact bounce.
const SETTLE_US: u32 = 1000;

/// Inclusive raw sample windows for each move.
const WINDOWS: [(u16, u16, Move); 4] = [
    (500, 520, Move::First),
    (600, 620, Move::Second),
    (660, 680, Move::Third),
    (710, 730, Move::Fourth),
];

/// Map a raw sample onto a move. Samples outside every window mean no button is pressed.
pub fn decode(raw: u16) -> Option<Move> {
    WINDOWS
        .iter()
        .find(|(low, high, _)| (*low..=*high).contains(&raw))
        .map(|(_, _, m)| *m)
}

/// Edge-triggered decoder: a held button is reported once, on the sample where it first
/// shows up.
///
/// Keeps its own memory of the last accepted reading, so one decoder must not be shared
/// between separate inputs.
#[derive(Debug, Default, Clone)]
pub struct InputDecoder {
    previous: Option<Move>,
}

impl InputDecoder {
    pub fn new() -> Self {
        InputDecoder { previous: None }
    }

    /// Decode `raw`, reporting it only if it differs from the previously accepted reading.
    pub fn accept(&mut self, raw: u16) -> Option<Move> {
        let current = decode(raw);
        if current == self.previous {
            None
        } else {
            self.previous = current;
            current
        }
    }

    /// Take one sample from the input, let it settle, and decode it.
    pub fn poll<H: AnalogInput + Delay>(&mut self, hw: &mut H) -> Option<Move> {
        let raw = hw.read_analog();
        hw.delay_us(SETTLE_US);
        self.accept(raw)
    }
}
