// PDA Seeds for deterministic address generation

// Domain separator for Poll PDAs: [sha256(title), "POLL_SEED", authority.key()]
// One authority can run many polls, one per distinct title
pub const POLL_SEED: &[u8] = b"POLL_SEED";

// Domain separator for Vote Record PDAs: ["VOTE_SEED", poll.key(), voter.key()]
// At most one vote record can ever exist per voter per poll
pub const VOTE_SEED: &[u8] = b"VOTE_SEED";

// Input bounds (in bytes, not characters)
pub const TITLE_MAX_LEN: usize = 32;
pub const DESCRIPTION_MAX_LEN: usize = 500;
pub const OPTION_MAX_LEN: usize = 32;

// Option count bounds
pub const MIN_OPTIONS: usize = 1;
pub const MAX_OPTIONS: usize = 4;

/// How long a poll accepts votes after creation (24 hours in seconds)
pub const POLL_DURATION: i64 = 24 * 60 * 60;

// Anchor discriminator size (8 bytes)
pub const DISCRIMINATOR_SIZE: usize = 8;

/// Check a title fits the stored bound
pub fn is_valid_title(title: &str) -> bool {
    title.len() <= TITLE_MAX_LEN
}

/// Check a description fits the stored bound
pub fn is_valid_description(description: &str) -> bool {
    description.len() <= DESCRIPTION_MAX_LEN
}

/// Check the number of options is within [MIN_OPTIONS, MAX_OPTIONS]
pub fn is_valid_option_count(count: usize) -> bool {
    (MIN_OPTIONS..=MAX_OPTIONS).contains(&count)
}

/// Check a single option label fits the stored bound
pub fn is_valid_option(option: &str) -> bool {
    option.len() <= OPTION_MAX_LEN
}
