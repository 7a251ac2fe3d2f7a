use chrono::{DateTime, Utc};

use crate::domain::CurrentUser;

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    pub fn to_current_user(&self) -> CurrentUser {
        CurrentUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionRow {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}
