use super::set_winner::evaluate;
use super::types::{MatchAnalysis, MatchOutcome, SetScore, SetWinner};

pub const SETS_TO_WIN_MATCH: u32 = 2;

/// Tallies set wins over an ordered list of sets and decides the match.
///
/// Only the final tally matters: exactly two sets for the player is a win,
/// checked before exactly two sets for the opponent. Any other tally,
/// including three or more sets for one side, stays pending.
pub fn analyze(sets: &[SetScore]) -> MatchAnalysis {
    let mut self_sets_won = 0;
    let mut opponent_sets_won = 0;

    for set in sets {
        match evaluate(*set) {
            SetWinner::SelfPlayer => self_sets_won += 1,
            SetWinner::Opponent => opponent_sets_won += 1,
            SetWinner::None => {}
        }
    }

    let outcome = decide(self_sets_won, opponent_sets_won);

    MatchAnalysis {
        self_sets_won,
        opponent_sets_won,
        outcome,
        is_finished: outcome.is_decided(),
    }
}

fn decide(self_sets_won: u32, opponent_sets_won: u32) -> MatchOutcome {
    if self_sets_won == SETS_TO_WIN_MATCH {
        MatchOutcome::Win
    } else if opponent_sets_won == SETS_TO_WIN_MATCH {
        MatchOutcome::Loss
    } else {
        MatchOutcome::Pending
    }
}
