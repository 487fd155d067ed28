//! The narrow slice of the board the game needs. The firmware implements these on real
//! peripherals; tests implement them on a recording mock.

use crate::display::DrivePattern;
use crate::store::PersistentStore;

/// The three drive lines of the indicator display.
pub trait Indicators {
    /// Drive the lines with the given pattern.
    fn set_display(&mut self, pattern: DrivePattern);

    /// Turn every indicator off.
    fn clear_display(&mut self);
}

/// The single analog input channel.
pub trait AnalogInput {
    /// Blocking single-shot conversion. Typically 10 bits (0-1023).
    fn read_analog(&mut self) -> u16;
}

/// Busy-wait delays.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
    fn delay_us(&mut self, us: u32);
}

/// Everything the game controller drives.
pub trait Hardware: Indicators + AnalogInput + Delay + PersistentStore {}

impl<T: Indicators + AnalogInput + Delay + PersistentStore> Hardware for T {}
