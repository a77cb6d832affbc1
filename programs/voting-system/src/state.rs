use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

use crate::{
    constants::*,
    error::{safe_increment, VotingError},
    log_error,
};

/// Hash a title into a fixed 32-byte PDA seed.
/// Seeds are capped at 32 bytes, so raw titles would fail address derivation
/// before the length check could report `TitleTooLong`.
pub fn title_seed(title: &str) -> [u8; 32] {
    hash(title.as_bytes()).to_bytes()
}

// The Poll account stores one ballot, its options and running tallies
#[account]
#[derive(InitSpace)]
pub struct Poll {
    // Creator of the poll, the only key allowed to close it
    pub authority: Pubkey,

    #[max_len(32)]
    pub title: String,

    #[max_len(500)]
    pub description: String,

    // Ballot options, 1 to 4 entries of up to 32 bytes each
    #[max_len(4, 32)]
    pub options: Vec<String>,

    // Vote counts for each option (parallel to options vec)
    #[max_len(4)]
    pub votes: Vec<u64>,

    // Always equal to the sum of votes
    pub total_votes: u64,

    pub is_closed: bool,

    pub created_at: i64,

    // Votes are rejected from this timestamp on
    pub expires_at: i64,

    // 0 until the authority closes the poll
    pub closed_at: i64,

    pub bump: u8,
}

// Vote Record - proves that a voter has used their vote on a specific poll.
// Its address is unique per (poll, voter), which is what stops double voting.
#[account]
#[derive(InitSpace, Default)]
pub struct VoteRecord {
    pub voter: Pubkey,
    pub poll: Pubkey,
    pub option_index: u8,
    pub voted_at: i64,
    pub bump: u8,
}

impl Poll {
    /// Derive the poll PDA for a title created by `authority`
    pub fn address(title: &str, authority: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[title_seed(title).as_ref(), POLL_SEED, authority.as_ref()],
            &crate::ID,
        )
    }

    /// Build a fresh, open poll with zeroed counters.
    /// Inputs are expected to have passed `validate_poll_inputs`.
    pub fn new(
        authority: Pubkey,
        title: String,
        description: String,
        options: Vec<String>,
        now: i64,
        bump: u8,
    ) -> Self {
        let votes = vec![0u64; options.len()];

        Self {
            authority,
            title,
            description,
            options,
            votes,
            total_votes: 0,
            is_closed: false,
            created_at: now,
            expires_at: now.saturating_add(POLL_DURATION),
            closed_at: 0,
            bump,
        }
    }

    pub fn title_seed(&self) -> [u8; 32] {
        title_seed(&self.title)
    }

    /// A zeroed account (freshly allocated by `init_if_needed`) has no authority yet
    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }

    /// Whether a vote at `now` would pass the open checks of `record_vote`.
    /// Read helper for clients; keep in step with `record_vote`.
    pub fn is_open(&self, now: i64) -> bool {
        !self.is_closed && now < self.expires_at
    }

    /// Apply one vote for `option_index`.
    /// Every check runs before either counter is written.
    pub fn record_vote(&mut self, option_index: u8, now: i64) -> Result<()> {
        if self.is_closed {
            return Err(log_error!(VotingError::PollClosed, "cast_vote"));
        }

        if now >= self.expires_at {
            msg!("Poll expired at {}, now {}", self.expires_at, now);
            return Err(log_error!(VotingError::PollExpired, "cast_vote"));
        }

        let index = option_index as usize;
        if index >= self.options.len() {
            msg!(
                "Option index {} out of range for {} options",
                index,
                self.options.len()
            );
            return Err(log_error!(VotingError::InvalidOptionIndex, "cast_vote"));
        }

        let option_votes = safe_increment(self.votes[index])?;
        let total_votes = safe_increment(self.total_votes)?;

        self.votes[index] = option_votes;
        self.total_votes = total_votes;

        Ok(())
    }

    /// Freeze the poll. Only the authority may close, and only once.
    pub fn close(&mut self, caller: Pubkey, now: i64) -> Result<()> {
        if caller != self.authority {
            msg!("Caller {} is not the poll authority {}", caller, self.authority);
            return Err(log_error!(VotingError::Unauthorized, "close_poll"));
        }

        if self.is_closed {
            return Err(log_error!(VotingError::PollAlreadyClosed, "close_poll"));
        }

        self.is_closed = true;
        self.closed_at = now;

        Ok(())
    }

    /// Option labels paired with their current counts
    pub fn results(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.options
            .iter()
            .map(String::as_str)
            .zip(self.votes.iter().copied())
    }

    /// The option with the most votes (lowest index wins ties), or None if nobody voted
    pub fn leading_option(&self) -> Option<(usize, u64)> {
        if self.total_votes == 0 {
            return None;
        }

        let mut leader = (0, self.votes[0]);
        for (index, &votes) in self.votes.iter().enumerate().skip(1) {
            if votes > leader.1 {
                leader = (index, votes);
            }
        }

        Some(leader)
    }
}

impl VoteRecord {
    /// Derive the vote record PDA for `voter` on `poll`
    pub fn address(poll: &Pubkey, voter: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[VOTE_SEED, poll.as_ref(), voter.as_ref()],
            &crate::ID,
        )
    }

    /// Reject if this record has already been written by an earlier vote
    pub fn ensure_unused(&self) -> Result<()> {
        if self.voter != Pubkey::default() {
            return Err(log_error!(VotingError::AlreadyVoted, "cast_vote"));
        }
        Ok(())
    }

    /// Spend this record on `poll`: the already-voted guard, then the poll's
    /// own checks, then both writes. Nothing is written if any check fails.
    pub fn consume(
        &mut self,
        poll: &mut Poll,
        poll_key: Pubkey,
        voter: Pubkey,
        option_index: u8,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        self.ensure_unused()?;
        poll.record_vote(option_index, now)?;

        *self = VoteRecord {
            voter,
            poll: poll_key,
            option_index,
            voted_at: now,
            bump,
        };

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn language_poll() -> Poll {
        Poll::new(
            Pubkey::new_unique(),
            "Favorite Programming".to_string(),
            "Vote for your favorite programming language.".to_string(),
            vec![
                "Rust".to_string(),
                "Typescript".to_string(),
                "JavaScript".to_string(),
                "Python".to_string(),
            ],
            NOW,
            255,
        )
    }

    #[test]
    fn test_new_poll_is_open_and_zeroed() {
        let poll = language_poll();

        assert!(poll.is_initialized());
        assert!(poll.is_open(NOW));
        assert_eq!(poll.votes, vec![0, 0, 0, 0]);
        assert_eq!(poll.votes.len(), poll.options.len());
        assert_eq!(poll.total_votes, 0);
        assert_eq!(poll.expires_at, NOW + POLL_DURATION);
        assert_eq!(poll.closed_at, 0);
        assert_eq!(poll.leading_option(), None);
    }

    #[test]
    fn test_record_vote_keeps_totals_consistent() {
        let mut poll = language_poll();

        for index in [0u8, 2, 0, 3, 0, 2] {
            poll.record_vote(index, NOW + 60).unwrap();
        }

        assert_eq!(poll.votes, vec![3, 0, 2, 1]);
        assert_eq!(poll.total_votes, poll.votes.iter().sum::<u64>());
        assert_eq!(poll.leading_option(), Some((0, 3)));

        let results: Vec<(&str, u64)> = poll.results().collect();
        assert_eq!(results[2], ("JavaScript", 2));
    }

    #[test]
    fn test_record_vote_rejects_bad_index() {
        let mut poll = language_poll();

        assert_eq!(
            poll.record_vote(5, NOW).unwrap_err(),
            VotingError::InvalidOptionIndex.into()
        );
        // Index equal to the option count is one past the end
        assert_eq!(
            poll.record_vote(4, NOW).unwrap_err(),
            VotingError::InvalidOptionIndex.into()
        );
        assert_eq!(poll.total_votes, 0);
    }

    #[test]
    fn test_record_vote_after_expiry() {
        let mut poll = language_poll();

        assert!(!poll.is_open(poll.expires_at));
        assert_eq!(
            poll.record_vote(0, poll.expires_at).unwrap_err(),
            VotingError::PollExpired.into()
        );
        assert_eq!(poll.votes, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_expired_poll_rejects_votes_but_can_be_closed() {
        let mut poll = language_poll();
        poll.record_vote(2, NOW).unwrap();

        let expired = poll.expires_at + 1;
        assert_eq!(
            poll.record_vote(0, expired).unwrap_err(),
            VotingError::PollExpired.into()
        );
        assert_eq!(poll.votes, vec![0, 0, 1, 0]);
        assert_eq!(poll.total_votes, 1);

        poll.close(poll.authority, expired).unwrap();
        assert!(poll.is_closed);
        assert_eq!(poll.closed_at, expired);
    }

    #[test]
    fn test_is_open_agrees_with_record_vote() {
        let open = language_poll();
        let mut closed = language_poll();
        closed.close(closed.authority, NOW).unwrap();

        for poll in [&open, &closed] {
            for now in [NOW, poll.expires_at - 1, poll.expires_at, poll.expires_at + 1] {
                let accepted = poll.clone().record_vote(0, now).is_ok();
                assert_eq!(poll.is_open(now), accepted);
            }
        }
    }

    #[test]
    fn test_overflow_leaves_counters_untouched() {
        let mut poll = language_poll();
        poll.votes[1] = 7;
        poll.total_votes = u64::MAX;

        assert_eq!(
            poll.record_vote(1, NOW).unwrap_err(),
            VotingError::MathOverflow.into()
        );
        assert_eq!(poll.votes[1], 7);
    }

    #[test]
    fn test_close_by_authority_only_once() {
        let mut poll = language_poll();
        let authority = poll.authority;

        assert_eq!(
            poll.close(Pubkey::new_unique(), NOW).unwrap_err(),
            VotingError::Unauthorized.into()
        );
        assert!(!poll.is_closed);

        poll.close(authority, NOW + 10).unwrap();
        assert!(poll.is_closed);
        assert_eq!(poll.closed_at, NOW + 10);

        assert_eq!(
            poll.close(authority, NOW + 20).unwrap_err(),
            VotingError::PollAlreadyClosed.into()
        );
        assert_eq!(poll.closed_at, NOW + 10);
    }

    #[test]
    fn test_closed_poll_rejects_votes() {
        let mut poll = language_poll();
        poll.record_vote(1, NOW).unwrap();
        poll.close(poll.authority, NOW).unwrap();

        assert_eq!(
            poll.record_vote(1, NOW).unwrap_err(),
            VotingError::PollClosed.into()
        );
        assert_eq!(poll.votes, vec![0, 1, 0, 0]);
        assert_eq!(poll.total_votes, 1);
    }

    #[test]
    fn test_poll_address_is_per_title_and_authority() {
        let authority = Pubkey::new_unique();
        let other = Pubkey::new_unique();

        let (a, _) = Poll::address("Favorite Programming", &authority);
        let (b, _) = Poll::address("Favorite Programming", &authority);
        let (c, _) = Poll::address("Favorite Editor", &authority);
        let (d, _) = Poll::address("Favorite Programming", &other);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);

        // Long titles still derive an address; the length check rejects them later
        let long_title = "This title is too long bla bla bla bla bla bla bla";
        let (e, _) = Poll::address(long_title, &authority);
        assert_ne!(a, e);
    }

    #[test]
    fn test_consume_writes_record_once() {
        let mut poll = language_poll();
        let poll_key = Pubkey::new_unique();
        let voter = Pubkey::new_unique();
        let mut record = VoteRecord::default();

        record.consume(&mut poll, poll_key, voter, 1, NOW, 253).unwrap();
        assert_eq!(record.voter, voter);
        assert_eq!(record.poll, poll_key);
        assert_eq!(record.option_index, 1);
        assert_eq!(record.voted_at, NOW);
        assert_eq!(poll.votes, vec![0, 1, 0, 0]);

        assert_eq!(
            record.consume(&mut poll, poll_key, voter, 2, NOW, 253).unwrap_err(),
            VotingError::AlreadyVoted.into()
        );
        assert_eq!(record.option_index, 1);
        assert_eq!(poll.total_votes, 1);
    }

    #[test]
    fn test_consume_leaves_record_unused_on_rejection() {
        let mut poll = language_poll();
        let mut record = VoteRecord::default();

        assert_eq!(
            record
                .consume(&mut poll, Pubkey::new_unique(), Pubkey::new_unique(), 9, NOW, 0)
                .unwrap_err(),
            VotingError::InvalidOptionIndex.into()
        );
        assert!(record.ensure_unused().is_ok());
        assert_eq!(poll.total_votes, 0);
    }

    #[test]
    fn test_vote_record_usage() {
        let fresh = VoteRecord::default();
        assert!(fresh.ensure_unused().is_ok());

        let used = VoteRecord {
            voter: Pubkey::new_unique(),
            poll: Pubkey::new_unique(),
            option_index: 2,
            voted_at: NOW,
            bump: 254,
        };
        assert_eq!(
            used.ensure_unused().unwrap_err(),
            VotingError::AlreadyVoted.into()
        );

        let poll = Pubkey::new_unique();
        let voter = Pubkey::new_unique();
        assert_eq!(
            VoteRecord::address(&poll, &voter),
            VoteRecord::address(&poll, &voter)
        );
        assert_ne!(
            VoteRecord::address(&poll, &voter).0,
            VoteRecord::address(&poll, &Pubkey::new_unique()).0
        );
    }
}
