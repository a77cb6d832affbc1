use anchor_lang::prelude::*;
use crate::{constants::*, error::VotingError, events::PollClosed, state::Poll};

// Accounts needed for closing a poll
#[derive(Accounts)]
pub struct ClosePoll<'info> {
    // Must be the poll's recorded authority
    pub authority: Signer<'info>,

    // Seeds are rebuilt from the poll's own data so a foreign signer is
    // reported by has_one as Unauthorized, not as a seeds mismatch
    #[account(
        mut,
        seeds = [poll.title_seed().as_ref(), POLL_SEED, poll.authority.as_ref()],
        bump = poll.bump,
        has_one = authority @ VotingError::Unauthorized,
    )]
    pub poll: Account<'info, Poll>,
}

impl<'info> ClosePoll<'info> {
    pub fn close_poll(&mut self) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        Poll::close(&mut self.poll, self.authority.key(), now)?;

        msg!("Poll closed: {}", self.poll.title);
        msg!("Total votes: {}", self.poll.total_votes);

        for (index, (option, votes)) in self.poll.results().enumerate() {
            msg!("Option {}: '{}' - {} votes", index, option, votes);
        }

        match self.poll.leading_option() {
            Some((index, votes)) => {
                msg!("Leading: '{}' with {} votes", self.poll.options[index], votes)
            }
            None => msg!("No votes were cast on this poll."),
        }

        emit!(PollClosed {
            poll: self.poll.key(),
            authority: self.authority.key(),
            total_votes: self.poll.total_votes,
            closed_at: now,
        });

        Ok(())
    }
}
