use anchor_lang::prelude::*;
use crate::{
    constants::*,
    events::VoteCast,
    state::{Poll, VoteRecord},
};

// Accounts needed for casting a vote
#[derive(Accounts)]
pub struct CastVote<'info> {
    // The person casting the vote (must sign and pays for the vote record)
    #[account(mut)]
    pub voter: Signer<'info>,

    // The poll being voted on, checked against its own seeds
    #[account(
        mut,
        seeds = [poll.title_seed().as_ref(), POLL_SEED, poll.authority.as_ref()],
        bump = poll.bump
    )]
    pub poll: Account<'info, Poll>,

    // Vote record PDA, one address per (poll, voter).
    // Loaded rather than failing when it already exists so the handler can
    // report AlreadyVoted.
    #[account(
        init_if_needed,
        payer = voter,
        space = DISCRIMINATOR_SIZE + VoteRecord::INIT_SPACE,
        seeds = [VOTE_SEED, poll.key().as_ref(), voter.key().as_ref()],
        bump
    )]
    pub vote_record: Account<'info, VoteRecord>,

    pub system_program: Program<'info, System>,
}

impl<'info> CastVote<'info> {
    pub fn cast_vote(&mut self, option_index: u8, bumps: &CastVoteBumps) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let poll_key = self.poll.key();

        self.vote_record.consume(
            &mut self.poll,
            poll_key,
            self.voter.key(),
            option_index,
            now,
            bumps.vote_record,
        )?;

        let index = option_index as usize;
        msg!("Vote cast by {} on poll {}", self.voter.key(), self.poll.key());
        msg!(
            "Option {} ('{}') now has {} votes",
            index,
            self.poll.options[index],
            self.poll.votes[index]
        );
        msg!("Total votes in poll: {}", self.poll.total_votes);

        emit!(VoteCast {
            poll: self.poll.key(),
            voter: self.voter.key(),
            option_index,
            total_votes: self.poll.total_votes,
        });

        Ok(())
    }
}
