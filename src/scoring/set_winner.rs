use super::types::{Games, SetScore, SetWinner};

const GAMES_TO_WIN_SET: Games = 6;
const WINNING_MARGIN: Games = 2;
const TIEBREAK_GAMES: Games = 7;

/// Decides which side won a set, if either.
///
/// Total over every pair of game counts: combinations that are not a
/// finished set under standard scoring yield `SetWinner::None`. Counts above
/// seven only decide a set with a two-game lead, so 8-7 stays undecided.
pub fn evaluate(set: SetScore) -> SetWinner {
    let own = set.games_won_by_self;
    let opp = set.games_won_by_opponent;

    if wins_by_margin(own, opp) {
        return SetWinner::SelfPlayer;
    }
    if wins_by_margin(opp, own) {
        return SetWinner::Opponent;
    }
    if own == TIEBREAK_GAMES && (opp == 5 || opp == 6) {
        return SetWinner::SelfPlayer;
    }
    if opp == TIEBREAK_GAMES && (own == 5 || own == 6) {
        return SetWinner::Opponent;
    }

    SetWinner::None
}

fn wins_by_margin(winner: Games, loser: Games) -> bool {
    winner >= GAMES_TO_WIN_SET
        && winner
            .checked_sub(loser)
            .is_some_and(|lead| lead >= WINNING_MARGIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_set_win() {
        assert_eq!(evaluate(SetScore::new(6, 4)), SetWinner::SelfPlayer);
        assert_eq!(evaluate(SetScore::new(6, 0)), SetWinner::SelfPlayer);
        assert_eq!(evaluate(SetScore::new(2, 6)), SetWinner::Opponent);
    }

    #[test]
    fn test_seven_five() {
        assert_eq!(evaluate(SetScore::new(7, 5)), SetWinner::SelfPlayer);
        assert_eq!(evaluate(SetScore::new(5, 7)), SetWinner::Opponent);
    }

    #[test]
    fn test_tiebreak_seven_six() {
        assert_eq!(evaluate(SetScore::new(7, 6)), SetWinner::SelfPlayer);
        assert_eq!(evaluate(SetScore::new(6, 7)), SetWinner::Opponent);
    }

    #[test]
    fn test_undecided_sets() {
        assert_eq!(evaluate(SetScore::new(0, 0)), SetWinner::None);
        assert_eq!(evaluate(SetScore::new(6, 5)), SetWinner::None);
        assert_eq!(evaluate(SetScore::new(5, 6)), SetWinner::None);
        assert_eq!(evaluate(SetScore::new(6, 6)), SetWinner::None);
        assert_eq!(evaluate(SetScore::new(4, 3)), SetWinner::None);
        assert_eq!(evaluate(SetScore::new(7, 7)), SetWinner::None);
    }

    #[test]
    fn test_counts_above_seven_need_two_game_lead() {
        assert_eq!(evaluate(SetScore::new(10, 8)), SetWinner::SelfPlayer);
        assert_eq!(evaluate(SetScore::new(8, 7)), SetWinner::None);
        assert_eq!(evaluate(SetScore::new(9, 8)), SetWinner::None);
    }

    #[test]
    fn test_large_counts_do_not_overflow() {
        assert_eq!(evaluate(SetScore::new(Games::MAX, Games::MAX)), SetWinner::None);
        assert_eq!(evaluate(SetScore::new(Games::MAX, 0)), SetWinner::SelfPlayer);
        assert_eq!(evaluate(SetScore::new(0, Games::MAX)), SetWinner::Opponent);
    }

    #[test]
    fn test_evaluation_is_symmetric() {
        for own in 0..=12 {
            for opp in 0..=12 {
                let set = SetScore::new(own, opp);
                let forward = evaluate(set);
                let backward = evaluate(set.flipped());
                assert_eq!(
                    forward == SetWinner::SelfPlayer,
                    backward == SetWinner::Opponent,
                    "asymmetric at {}",
                    set
                );
                assert_eq!(forward == SetWinner::None, backward == SetWinner::None);
            }
        }
    }
}
