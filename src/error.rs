use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed facelet string")]
    MalformedFacelets,
    #[error("There is not exactly one facelet of each colour")]
    WrongColorCount,
    #[error("Not all 12 edges exist exactly once")]
    MissingEdge,
    #[error("Flip error: One edge has to be flipped")]
    EdgeFlip,
    #[error("Not all 8 corners exist exactly once")]
    MissingCorner,
    #[error("Twist error: One corner has to be twisted")]
    CornerTwist,
    #[error("Parity error: Two corners or two edges have to be exchanged")]
    Parity,
    #[error("No solution exists for the given maximum depth")]
    NoSolution,
    #[error("Probe limit exceeded, no solution within given probe limit")]
    ProbeLimit,
    #[error("Invalid scramble")]
    InvalidScramble,
    #[error("No search to continue, call solve first")]
    NoActiveSearch,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encode(#[from] bincode::error::EncodeError),
    #[error(transparent)]
    Decode(#[from] bincode::error::DecodeError),
}

impl Error {
    /// Numeric error indicator, 1 to 8. Errors outside the validation and search kinds give 0.
    pub fn code(&self) -> u8 {
        match self {
            Error::MalformedFacelets | Error::WrongColorCount => 1,
            Error::MissingEdge => 2,
            Error::EdgeFlip => 3,
            Error::MissingCorner => 4,
            Error::CornerTwist => 5,
            Error::Parity => 6,
            Error::NoSolution => 7,
            Error::ProbeLimit => 8,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::error::*;

    #[test]
    fn test_codes() {
        assert_eq!(Error::WrongColorCount.code(), 1);
        assert_eq!(Error::Parity.code(), 6);
        assert_eq!(Error::NoSolution.code(), 7);
        assert_eq!(Error::ProbeLimit.code(), 8);
        assert_eq!(Error::InvalidScramble.code(), 0);
    }
}
