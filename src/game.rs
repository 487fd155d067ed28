use crate::display::{self, Cascade};
use crate::hal::Hardware;
use crate::input::InputDecoder;
use crate::rng::Lcg;
use crate::sequence::{Judgement, Move, MoveSequence};
use crate::store::SEED_ADDRESS;

/// Raw analog reading above which a press starts a new game.
const START_THRESHOLD: u16 = 200;
/// How long each move stays lit while the computer replays the sequence.
const REPLAY_ON_MS: u32 = 500;
/// Dark gap between two replayed moves.
const REPLAY_GAP_MS: u32 = 100;
/// Pause after a replay before listening to the player.
const REPLAY_SETTLE_MS: u32 = 10;
/// Pause after the player repeats the whole sequence, before the computer's next turn.
const TURN_PAUSE_MS: u32 = 1000;
/// Half period of the flash acknowledging a player's move.
const FEEDBACK_FLASH_MS: u32 = 50;

/// Whose turn it is.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameState {
    /// No game running. The display cascades and the seed drifts until a button is pressed.
    Idle,
    /// The computer adds a move and replays the whole sequence.
    ComputerTurn,
    /// Waiting for the player to repeat the sequence.
    PlayerTurn,
}

/// What a single step of the game did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StepEvent {
    /// Idle, no button pressed.
    Waiting,
    /// A button press started a new game, from this generator state.
    Started { seed: u16 },
    /// The computer added a move and replayed a sequence of `length` moves.
    Replayed { length: usize },
    /// Player's turn, but no new button press.
    Listening,
    /// The player correctly repeated the move at `index`, and there are more to go.
    Correct { index: usize },
    /// The player repeated the whole sequence of `length` moves.
    RoundComplete { length: usize },
    /// The player pressed the wrong button. `score` is the length of the sequence they were
    /// repeating.
    Lost {
        score: usize,
        expected: Move,
        pressed: Move,
    },
    /// The sequence could not grow any further; the game was reset.
    SequenceFull,
    /// The game's bookkeeping is inconsistent. The error blink was shown and nothing moved on.
    Fault,
}

/// Struct to hold game state and the hardware it plays on.
pub struct Game<H> {
    hw: H,
    state: GameState,
    rng: Lcg,
    sequence: MoveSequence,
    decoder: InputDecoder,
    cascade: Cascade,
}

impl<H: Hardware> Game<H> {
    /// Set up an idle game, seeding the generator from the persisted seed.
    pub fn new(mut hw: H) -> Self {
        let rng = Lcg::from_seed(hw.read_word(SEED_ADDRESS));
        Game {
            hw,
            state: GameState::Idle,
            rng,
            sequence: MoveSequence::new(),
            decoder: InputDecoder::new(),
            cascade: Cascade::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn sequence(&self) -> &MoveSequence {
        &self.sequence
    }

    /// Current generator state.
    pub fn seed(&self) -> u16 {
        self.rng.state()
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn into_hardware(self) -> H {
        self.hw
    }

    /// Run one iteration of the game loop.
    pub fn step(&mut self) -> StepEvent {
        if !self.is_consistent() {
            display::error_blink(&mut self.hw);
            return StepEvent::Fault;
        }
        match self.state {
            GameState::Idle => self.idle_step(),
            GameState::ComputerTurn => self.computer_step(),
            GameState::PlayerTurn => self.player_step(),
        }
    }

    fn is_consistent(&self) -> bool {
        self.sequence.is_consistent()
            && !(self.state == GameState::PlayerTurn && self.sequence.is_empty())
    }

    fn persist_seed(&mut self) {
        self.hw.write_word(SEED_ADDRESS, self.rng.state());
    }

    fn idle_step(&mut self) -> StepEvent {
        self.rng.drift();
        self.persist_seed();
        self.cascade.step(&mut self.hw);
        if self.hw.read_analog() > START_THRESHOLD {
            self.state = GameState::ComputerTurn;
            display::double_sweep(&mut self.hw);
            StepEvent::Started {
                seed: self.rng.state(),
            }
        } else {
            StepEvent::Waiting
        }
    }

    fn computer_step(&mut self) -> StepEvent {
        let next = self.rng.draw();
        self.persist_seed();
        if self.sequence.push(next).is_err() {
            self.reset();
            display::error_blink(&mut self.hw);
            return StepEvent::SequenceFull;
        }

        for &m in self.sequence.moves() {
            display::show_move(&mut self.hw, m, REPLAY_ON_MS, REPLAY_GAP_MS);
        }
        self.hw.delay_ms(REPLAY_SETTLE_MS);
        self.state = GameState::PlayerTurn;
        StepEvent::Replayed {
            length: self.sequence.len(),
        }
    }

    fn player_step(&mut self) -> StepEvent {
        let pressed = match self.decoder.poll(&mut self.hw) {
            Some(m) => m,
            None => {
                self.hw.clear_display();
                return StepEvent::Listening;
            }
        };
        display::flash(&mut self.hw, pressed, FEEDBACK_FLASH_MS);

        let index = self.sequence.replay_index();
        match self.sequence.judge(pressed) {
            Some(Judgement::Advance) => StepEvent::Correct { index },
            Some(Judgement::Complete) => {
                self.hw.delay_ms(TURN_PAUSE_MS);
                self.state = GameState::ComputerTurn;
                StepEvent::RoundComplete {
                    length: self.sequence.len(),
                }
            }
            Some(Judgement::Mismatch(expected)) => {
                let score = self.sequence.len();
                self.reset();
                display::double_sweep(&mut self.hw);
                StepEvent::Lost {
                    score,
                    expected,
                    pressed,
                }
            }
            // Ruled out by `is_consistent`, but treat it like any other inconsistency.
            None => {
                display::error_blink(&mut self.hw);
                StepEvent::Fault
            }
        }
    }

    /// Abandon the current game and go back to idling. The generator keeps its state.
    fn reset(&mut self) {
        self.sequence.reset();
        self.state = GameState::Idle;
    }
}
