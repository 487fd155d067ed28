#![no_main]
#![no_std]

mod board;
mod flash;

use cortex_m_rt::entry;
use microbit::Board;
use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};

use memory_game::{Game, StepEvent, MAX_MOVES};

use crate::board::GameBoard;

#[entry]
fn main() -> ! {
    rtt_init_print!();
    let board = Board::take().unwrap();
    let mut game = Game::new(GameBoard::new(board));
    rprintln!("Memory game ready, seed {}", game.seed());

    let mut faulted = false;
    loop {
        match game.step() {
            StepEvent::Waiting | StepEvent::Listening | StepEvent::Correct { .. } => (),
            StepEvent::Started { seed } => rprintln!("New game, seed {}", seed),
            StepEvent::Replayed { length } => rprintln!("Replayed {} moves", length),
            StepEvent::RoundComplete { length } => rprintln!("Repeated all {} moves", length),
            StepEvent::Lost {
                score,
                expected,
                pressed,
            } => {
                rprintln!("Lost at {}: expected {:?}, got {:?}", score, expected, pressed);
                game.hardware_mut().show_score(score);
            }
            StepEvent::SequenceFull => {
                rprintln!("All {} moves repeated, starting over", MAX_MOVES)
            }
            StepEvent::Fault => {
                if !faulted {
                    rprintln!("Game state inconsistent, reset the board");
                    faulted = true;
                }
            }
        }
    }
}
