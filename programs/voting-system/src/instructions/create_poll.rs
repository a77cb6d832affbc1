use anchor_lang::prelude::*;
use crate::{
    constants::*,
    error::VotingError,
    events::PollCreated,
    log_error,
    state::{title_seed, Poll},
};

// Accounts needed for creating a new poll
#[derive(Accounts)]
#[instruction(title: String)]
pub struct CreatePoll<'info> {
    // The person creating the poll (must sign and pays for the account)
    #[account(mut)]
    pub authority: Signer<'info>,

    // The poll account (PDA). `init_if_needed` lets an existing poll surface
    // as PollAlreadyExists instead of a bare allocation failure.
    #[account(
        init_if_needed,
        payer = authority,
        space = DISCRIMINATOR_SIZE + Poll::INIT_SPACE,
        seeds = [title_seed(&title).as_ref(), POLL_SEED, authority.key().as_ref()],
        bump
    )]
    pub poll: Account<'info, Poll>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreatePoll<'info> {
    pub fn create_poll(
        &mut self,
        title: String,
        description: String,
        options: Vec<String>,
        bumps: &CreatePollBumps,
    ) -> Result<()> {
        validate_poll_inputs(&title, &description, &options)?;

        if self.poll.is_initialized() {
            return Err(log_error!(VotingError::PollAlreadyExists, "create_poll"));
        }

        let now = Clock::get()?.unix_timestamp;

        self.poll.set_inner(Poll::new(
            self.authority.key(),
            title,
            description,
            options,
            now,
            bumps.poll,
        ));

        msg!("Poll created: {}", self.poll.title);
        msg!("Authority: {}", self.authority.key());
        msg!("Options: {}", self.poll.options.len());
        msg!("Expires at: {}", self.poll.expires_at);

        emit!(PollCreated {
            poll: self.poll.key(),
            authority: self.authority.key(),
            option_count: self.poll.options.len() as u8,
            expires_at: self.poll.expires_at,
        });

        Ok(())
    }
}

/// Check every creation bound, in a fixed order, before anything is written
pub fn validate_poll_inputs(title: &str, description: &str, options: &[String]) -> Result<()> {
    if !is_valid_title(title) {
        msg!("Title is {} bytes, maximum is {}", title.len(), TITLE_MAX_LEN);
        return Err(log_error!(VotingError::TitleTooLong, "create_poll"));
    }

    if !is_valid_description(description) {
        msg!(
            "Description is {} bytes, maximum is {}",
            description.len(),
            DESCRIPTION_MAX_LEN
        );
        return Err(log_error!(VotingError::DescriptionTooLong, "create_poll"));
    }

    if !is_valid_option_count(options.len()) {
        msg!(
            "Got {} options, expected {} to {}",
            options.len(),
            MIN_OPTIONS,
            MAX_OPTIONS
        );
        return Err(log_error!(VotingError::OptionCountLimitExceeded, "create_poll"));
    }

    if let Some(option) = options.iter().find(|option| !is_valid_option(option)) {
        msg!("Option is {} bytes, maximum is {}", option.len(), OPTION_MAX_LEN);
        return Err(log_error!(VotingError::OptionTooLong, "create_poll"));
    }

    Ok(())
}
