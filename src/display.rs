//! Encoding moves for the charlieplexed display, and the animations built on it.
//!
//! Four indicators hang off three drive lines. Each one lights for a particular combination
//! of line levels, so a move is shown by writing a 3 bit pattern to the lines. The exact
//! patterns follow how the indicators are wired.

use crate::hal::{Delay, Indicators};
use crate::sequence::Move;

/// How long each indicator of the idle cascade stays lit.
const CASCADE_ON_MS: u32 = 100;
/// Dark gap between two cascade frames.
const CASCADE_GAP_MS: u32 = 50;
/// Number of multiplexing rounds in a sweep.
const SWEEP_ROUNDS: u32 = 100;
/// Time each indicator is lit within a sweep round.
const SWEEP_ON_US: u32 = 100;
const SWEEP_GAP_US: u32 = 10;
/// Half period of the error blink.
const ERROR_BLINK_MS: u32 = 100;

/// Levels for the three drive lines, one bit per line (bit 0 is line 0).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DrivePattern(u8);

impl DrivePattern {
    /// Every line low: nothing lit.
    pub const BLANK: DrivePattern = DrivePattern(0b000);

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Level of drive line `line` (0-2).
    pub fn line(self, line: u8) -> bool {
        self.0 & (1 << line) != 0
    }

    pub fn is_blank(self) -> bool {
        self == Self::BLANK
    }
}

/// Translate a raw one-hot move value into the pattern that lights its indicator. Anything
/// that is not exactly one of 1, 2, 4 or 8 gives the blank pattern.
pub fn encode(value: u8) -> DrivePattern {
    match value {
        0x01 => DrivePattern(0b011),
        0x02 => DrivePattern(0b100),
        0x04 => DrivePattern(0b110),
        0x08 => DrivePattern(0b001),
        _ => DrivePattern::BLANK,
    }
}

/// Light `m` for `on_ms`, then leave the display dark for `gap_ms`.
pub fn show_move<H: Indicators + Delay>(hw: &mut H, m: Move, on_ms: u32, gap_ms: u32) {
    hw.set_display(m.pattern());
    hw.delay_ms(on_ms);
    hw.clear_display();
    hw.delay_ms(gap_ms);
}

/// Double flash of `m` used to acknowledge a player's move. Ends dark.
pub fn flash<H: Indicators + Delay>(hw: &mut H, m: Move, period_ms: u32) {
    hw.set_display(m.pattern());
    hw.delay_ms(period_ms);
    hw.clear_display();
    hw.delay_ms(period_ms);
    hw.set_display(m.pattern());
    hw.delay_ms(period_ms);
    hw.clear_display();
}

/// Cycle through all four indicators fast enough that they look lit at once.
pub fn sweep<H: Indicators + Delay>(hw: &mut H) {
    for _ in 0..SWEEP_ROUNDS {
        for &m in Move::ALL.iter() {
            hw.set_display(m.pattern());
            hw.delay_us(SWEEP_ON_US);
            hw.clear_display();
            hw.delay_us(SWEEP_GAP_US);
        }
    }
}

/// Two sweeps, used when a game starts and when it is lost.
pub fn double_sweep<H: Indicators + Delay>(hw: &mut H) {
    sweep(hw);
    hw.delay_ms(100);
    sweep(hw);
    hw.delay_ms(500);
}

/// One period of the "something is wrong" signal: the first and last indicator in turn.
pub fn error_blink<H: Indicators + Delay>(hw: &mut H) {
    show_move(hw, Move::First, ERROR_BLINK_MS, ERROR_BLINK_MS);
    show_move(hw, Move::Fourth, ERROR_BLINK_MS, ERROR_BLINK_MS);
}

/// The idle animation: a single lit indicator bouncing 0, 1, 2, 3, 2, 1, 0, ... one position
/// per frame.
#[derive(Debug, Clone)]
pub struct Cascade {
    position: u8,
    rising: bool,
}

impl Cascade {
    pub fn new() -> Self {
        Cascade {
            position: 0,
            rising: true,
        }
    }

    /// The indicator lit by the next frame. Does not touch the display.
    pub fn next_move(&mut self) -> Move {
        let m = Move::from_index(self.position);
        if self.position == 3 {
            self.rising = false;
        } else if self.position == 0 {
            self.rising = true;
        }
        if self.rising {
            self.position += 1;
        } else {
            self.position -= 1;
        }
        m
    }

    /// Show one frame of the animation.
    pub fn step<H: Indicators + Delay>(&mut self, hw: &mut H) {
        let m = self.next_move();
        show_move(hw, m, CASCADE_ON_MS, CASCADE_GAP_MS);
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new()
    }
}
