use core::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error {
    /// The move buffer already holds `MAX_MOVES` moves.
    SequenceFull,
    /// A raw value that is not one of the four one-hot moves.
    InvalidMove(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SequenceFull => write!(f, "move sequence is full"),
            Error::InvalidMove(bits) => write!(f, "{:#04x} is not a one-hot move", bits),
        }
    }
}
