use anchor_lang::prelude::*;

/// Every way a poll instruction can be rejected.
/// Clients match on the error code, so variants are only ever appended.
#[error_code]
pub enum VotingError {
    #[msg("Title too long")]
    TitleTooLong,

    #[msg("Description too long")]
    DescriptionTooLong,

    #[msg("Option count must be between 1 and 4")]
    OptionCountLimitExceeded,

    #[msg("Option text too long")]
    OptionTooLong,

    #[msg("A poll with this title already exists for this authority")]
    PollAlreadyExists,

    #[msg("User has already voted")]
    AlreadyVoted,

    #[msg("Poll is closed")]
    PollClosed,

    #[msg("Poll has already been closed")]
    PollAlreadyClosed,

    #[msg("Poll has expired")]
    PollExpired,

    #[msg("Invalid option index")]
    InvalidOptionIndex,

    #[msg("Only the poll authority can perform this action")]
    Unauthorized,

    #[msg("Vote counter overflow")]
    MathOverflow,
}

impl VotingError {
    /// Human-readable group for log output
    pub fn category(&self) -> &'static str {
        match self {
            VotingError::TitleTooLong
            | VotingError::DescriptionTooLong
            | VotingError::OptionCountLimitExceeded
            | VotingError::OptionTooLong
            | VotingError::PollAlreadyExists => "Poll Creation",

            VotingError::AlreadyVoted
            | VotingError::PollClosed
            | VotingError::PollExpired
            | VotingError::InvalidOptionIndex => "Voting",

            VotingError::PollAlreadyClosed | VotingError::Unauthorized => "Poll Closing",

            VotingError::MathOverflow => "Arithmetic",
        }
    }
}

/// Log a rejection with its code and category, then evaluate to the error
#[macro_export]
macro_rules! log_error {
    ($error:expr, $context:expr) => {{
        let error: $crate::error::VotingError = $error;
        ::anchor_lang::prelude::msg!(
            "Error {}: {} in context: {}",
            u32::from(error),
            error.category(),
            $context
        );
        ::anchor_lang::error::Error::from(error)
    }};
}

/// Increment a vote counter without wrapping
pub fn safe_increment(counter: u64) -> Result<u64> {
    counter
        .checked_add(1)
        .ok_or_else(|| log_error!(VotingError::MathOverflow, "vote counter"))
}
