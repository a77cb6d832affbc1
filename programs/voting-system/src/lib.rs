use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod state;
pub mod instructions;

use instructions::*;

declare_id!("DXTPbGjqNv3oz88h8tM8TqcRNaRrPfDG5xnzUL7mqSBb");

#[program]
pub mod voting_system {
    use super::*;

    /// Open a poll with up to four options; the signer becomes its authority
    pub fn create_poll(
        ctx: Context<CreatePoll>,
        title: String,
        description: String,
        options: Vec<String>,
    ) -> Result<()> {
        ctx.accounts.create_poll(title, description, options, &ctx.bumps)
    }

    /// Cast the signer's single vote on an open poll
    pub fn cast_vote(ctx: Context<CastVote>, option_index: u8) -> Result<()> {
        ctx.accounts.cast_vote(option_index, &ctx.bumps)
    }

    /// Close a poll (authority only, once)
    pub fn close_poll(ctx: Context<ClosePoll>) -> Result<()> {
        ctx.accounts.close_poll()
    }
}
