use core::convert::TryFrom;
use heapless::Vec;

use crate::display::{encode, DrivePattern};
use crate::error::Error;

/// Longest sequence the game will ever build.
pub const MAX_MOVES: usize = 100;

/// One of the four moves, stored as its one-hot value (1, 2, 4 or 8). Each move is shown on
/// its own indicator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Move {
    First = 0x01,
    Second = 0x02,
    Third = 0x04,
    Fourth = 0x08,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::First, Move::Second, Move::Third, Move::Fourth];

    /// The move shown on indicator `index`. Only the low two bits are used, so any value maps
    /// to a move.
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index & 0x03) as usize]
    }

    pub fn index(self) -> u8 {
        (self as u8).trailing_zeros() as u8
    }

    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Drive pattern that lights this move's indicator.
    pub fn pattern(self) -> DrivePattern {
        encode(self.bits())
    }
}

impl TryFrom<u8> for Move {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            0x01 => Ok(Move::First),
            0x02 => Ok(Move::Second),
            0x04 => Ok(Move::Third),
            0x08 => Ok(Move::Fourth),
            other => Err(Error::InvalidMove(other)),
        }
    }
}

/// What the player's move means for the current turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Judgement {
    /// Right move, more to come.
    Advance,
    /// Right move, and the whole sequence has now been repeated.
    Complete,
    /// Wrong move. Carries the move that was expected.
    Mismatch(Move),
}

/// The computer's moves so far, plus how far the player has got repeating them.
///
/// Holds `replay_index <= len() <= MAX_MOVES` at all times.
#[derive(Debug, Default, Clone)]
pub struct MoveSequence {
    moves: Vec<Move, MAX_MOVES>,
    replay_index: usize,
}

impl MoveSequence {
    pub fn new() -> Self {
        MoveSequence {
            moves: Vec::new(),
            replay_index: 0,
        }
    }

    /// Append a move. Fails, leaving the sequence untouched, once `MAX_MOVES` is reached.
    pub fn push(&mut self, m: Move) -> Result<(), Error> {
        self.moves.push(m).map_err(|_| Error::SequenceFull)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.moves.is_full()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn replay_index(&self) -> usize {
        self.replay_index
    }

    /// The move the player has to make next, if any.
    pub fn expected(&self) -> Option<Move> {
        self.moves.get(self.replay_index).copied()
    }

    /// Check the player's move against the expected one and update the replay index: a
    /// correct move advances it, completing the sequence rewinds it to zero. A mismatch
    /// leaves everything as is; the caller decides how to reset.
    ///
    /// Returns `None` when there is nothing to repeat.
    pub fn judge(&mut self, m: Move) -> Option<Judgement> {
        let expected = self.expected()?;
        if m != expected {
            return Some(Judgement::Mismatch(expected));
        }
        if self.replay_index + 1 == self.moves.len() {
            self.replay_index = 0;
            Some(Judgement::Complete)
        } else {
            self.replay_index += 1;
            Some(Judgement::Advance)
        }
    }

    /// Forget every move and the replay progress.
    pub fn reset(&mut self) {
        self.moves.clear();
        self.replay_index = 0;
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.replay_index <= self.moves.len() && self.moves.len() <= MAX_MOVES
    }

    #[cfg(test)]
    pub(crate) fn force_replay_index(&mut self, index: usize) {
        self.replay_index = index;
    }
}
