#![cfg_attr(not(test), no_std)]

//! Game flow for a "repeat the sequence" memory game on a board with three
//! charlieplexed drive lines (four indicators) and one analog input channel.
//!
//! The library is hardware agnostic: the board is injected through the traits
//! in [`hal`] and [`store`], so the whole game runs on a host under test. The
//! firmware binary wires those traits to a micro:bit v2.

pub mod display;
pub mod error;
pub mod game;
pub mod hal;
pub mod input;
pub mod rng;
pub mod sequence;
pub mod store;

pub use crate::display::{encode, DrivePattern};
pub use crate::error::Error;
pub use crate::game::{Game, GameState, StepEvent};
pub use crate::hal::{AnalogInput, Delay, Hardware, Indicators};
pub use crate::input::InputDecoder;
pub use crate::rng::Lcg;
pub use crate::sequence::{Move, MoveSequence, MAX_MOVES};
pub use crate::store::{FlashPage, PersistentStore, WordLog, SEED_ADDRESS};
