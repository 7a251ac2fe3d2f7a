pub mod analyzer;
pub mod set_winner;
pub mod types;

pub use analyzer::analyze;
pub use set_winner::evaluate;
pub use types::{Games, MatchAnalysis, MatchOutcome, ParseOutcomeError, SetScore, SetWinner};
