pub mod entry;
pub mod filter;
pub mod models;

pub use entry::{needs_third_set, score_entry, MatchEntryForm, ScoredEntry};
pub use filter::{available_years, HistoryFilter, ResultFilter};
pub use models::{display_name, CurrentUser, Match, MatchId, NewMatch, UserId};
