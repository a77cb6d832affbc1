use anchor_lang::prelude::*;

#[event]
#[derive(Clone, Debug)]
pub struct PollCreated {
    pub poll: Pubkey,
    pub authority: Pubkey,
    pub option_count: u8,
    pub expires_at: i64,
}

#[event]
#[derive(Clone, Debug)]
pub struct VoteCast {
    pub poll: Pubkey,
    pub voter: Pubkey,
    pub option_index: u8,
    /// Poll total after this vote was counted
    pub total_votes: u64,
}

#[event]
#[derive(Clone, Debug)]
pub struct PollClosed {
    pub poll: Pubkey,
    pub authority: Pubkey,
    pub total_votes: u64,
    pub closed_at: i64,
}
