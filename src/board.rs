//! The game's hardware on a micro:bit v2.
//!
//! Pin assignment:
//! - drive lines 0, 1, 2: edge connector P13 (P0.17), P14 (P0.01), P15 (P0.13)
//! - button ladder: edge connector P0 (P0.02, AIN0), sampled at 10 bits against VDD/4 with
//!   1/4 gain, so full scale is VDD. The ladder hangs off the same supply, which keeps the
//!   readings a ratio of the supply voltage and the decoder windows independent of battery
//!   level.
//! - the 5x5 LED matrix shows the score after a lost game

use core::cmp::min;
use microbit::display::blocking::Display;
use microbit::hal::gpio::p0::P0_02;
use microbit::hal::gpio::{Floating, Input, Level, Output, Pin, PushPull};
use microbit::hal::prelude::*;
use microbit::hal::saadc::{Gain, Reference, Resolution, Saadc, SaadcConfig};
use microbit::hal::Timer;
use microbit::pac::TIMER0;
use microbit::Board;

use memory_game::{
    AnalogInput, Delay, DrivePattern, Indicators, PersistentStore, WordLog,
};

use crate::flash::NvmcPage;

/// Number of rows in the LED matrix
const N_ROWS: usize = 5;
/// Number of columns in the LED matrix
const N_COLS: usize = 5;
/// How long the score stays on the matrix.
const SCORE_MS: u32 = 1000;

pub(crate) struct GameBoard {
    lines: [Pin<Output<PushPull>>; 3],
    saadc: Saadc,
    ladder: P0_02<Input<Floating>>,
    timer: Timer<TIMER0>,
    matrix: Display,
    store: WordLog<NvmcPage>,
}

impl GameBoard {
    pub(crate) fn new(board: Board) -> Self {
        let lines = [
            board.pins.p0_17.into_push_pull_output(Level::Low).degrade(),
            board.pins.p0_01.into_push_pull_output(Level::Low).degrade(),
            board.pins.p0_13.into_push_pull_output(Level::Low).degrade(),
        ];
        let config = SaadcConfig {
            resolution: Resolution::_10BIT,
            reference: Reference::VDD1_4,
            gain: Gain::GAIN1_4,
            ..SaadcConfig::default()
        };
        GameBoard {
            lines,
            saadc: Saadc::new(board.SAADC, config),
            ladder: board.edge.e00.into_floating_input(),
            timer: Timer::new(board.TIMER0),
            matrix: Display::new(board.display_pins),
            store: WordLog::new(NvmcPage::new(board.NVMC)),
        }
    }

    /// Show `score` on the LED matrix by lighting that many LEDs, going left->right and
    /// top->bottom. Scores past 25 light the whole matrix.
    pub(crate) fn show_score(&mut self, score: usize) {
        self.matrix.show(&mut self.timer, score_matrix(score, 9), SCORE_MS);
        self.matrix.clear();
    }
}

fn score_matrix(score: usize, brightness: u8) -> [[u8; N_COLS]; N_ROWS] {
    let score = min(score, N_ROWS * N_COLS);
    let mut values = [[0u8; N_COLS]; N_ROWS];
    let full_rows = score / N_COLS;
    for r in 0..full_rows {
        values[r] = [brightness; N_COLS];
    }
    for c in 0..score % N_COLS {
        values[full_rows][c] = brightness;
    }
    values
}

impl Indicators for GameBoard {
    fn set_display(&mut self, pattern: DrivePattern) {
        for (i, line) in self.lines.iter_mut().enumerate() {
            if pattern.line(i as u8) {
                line.set_high().ok();
            } else {
                line.set_low().ok();
            }
        }
    }

    fn clear_display(&mut self) {
        for line in self.lines.iter_mut() {
            line.set_low().ok();
        }
    }
}

impl AnalogInput for GameBoard {
    fn read_analog(&mut self) -> u16 {
        // Single ended readings can dip slightly below zero; a failed conversion reads as
        // no button.
        nb::block!(self.saadc.read(&mut self.ladder))
            .map(|raw| raw.max(0) as u16)
            .unwrap_or(0)
    }
}

impl Delay for GameBoard {
    fn delay_ms(&mut self, ms: u32) {
        self.timer.delay_ms(ms);
    }

    fn delay_us(&mut self, us: u32) {
        self.timer.delay_us(us);
    }
}

impl PersistentStore for GameBoard {
    fn read_word(&mut self, address: u16) -> u16 {
        self.store.read_word(address)
    }

    fn write_word(&mut self, address: u16, value: u16) {
        self.store.write_word(address, value);
    }
}
