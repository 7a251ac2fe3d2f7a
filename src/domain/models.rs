use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{MatchOutcome, SetScore};

pub type UserId = i64;
pub type MatchId = i64;

/// The authenticated user a request acts for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl CurrentUser {
    /// Name shown in greetings and stored alongside recorded matches
    pub fn display_name(&self) -> String {
        display_name(Some(&self.name), Some(&self.email))
    }
}

/// Falls back from the profile name to the email's local part, then to "User".
pub fn display_name(name: Option<&str>, email: Option<&str>) -> String {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .or_else(|| {
            email
                .and_then(|e| e.split('@').next())
                .map(str::trim)
                .filter(|local| !local.is_empty())
        })
        .unwrap_or("User")
        .to_string()
}

/// A recorded match as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub user_id: UserId,
    pub user_name: String,
    pub opponent_name: String,
    pub sets: Vec<SetScore>,
    pub outcome: MatchOutcome,
    pub is_finished: bool,
    pub created_at: DateTime<Utc>,
}

/// A match that passed score analysis and has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub user_id: UserId,
    pub user_name: String,
    pub opponent_name: String,
    pub sets: Vec<SetScore>,
    pub outcome: MatchOutcome,
    pub is_finished: bool,
    pub created_at: DateTime<Utc>,
}

impl NewMatch {
    pub fn into_match(self, id: MatchId) -> Match {
        Match {
            id,
            user_id: self.user_id,
            user_name: self.user_name,
            opponent_name: self.opponent_name,
            sets: self.sets,
            outcome: self.outcome,
            is_finished: self.is_finished,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_profile_name() {
        assert_eq!(display_name(Some("Ana"), Some("ana.silva@example.com")), "Ana");
    }

    #[test]
    fn test_display_name_falls_back_to_email_local_part() {
        assert_eq!(display_name(Some("  "), Some("ana.silva@example.com")), "ana.silva");
        assert_eq!(display_name(None, Some("bruno@example.com")), "bruno");
    }

    #[test]
    fn test_display_name_default() {
        assert_eq!(display_name(None, None), "User");
        assert_eq!(display_name(None, Some("@example.com")), "User");
    }

    #[test]
    fn test_current_user_display_name() {
        let user = CurrentUser {
            id: 1,
            name: String::new(),
            email: "carla@example.com".to_string(),
        };
        assert_eq!(user.display_name(), "carla");
    }
}
