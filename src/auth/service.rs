use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::password::{hash_password, verify_password};
use crate::config::settings::AuthSettings;
use crate::database::{self, sessions, users, DbPool};
use crate::domain::CurrentUser;
use crate::errors::TrackerError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: CurrentUser,
    pub expires_at: DateTime<Utc>,
}

/// Account details submitted at sign-up
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "Name must have at least 3 characters"))]
    pub name: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must have at least 6 characters"))]
    pub password: String,
}

impl RegisterRequest {
    fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password.clone(),
        }
    }
}

/// Local stand-in for a managed identity provider: accounts, password
/// checks and bearer sessions stored next to the match data.
#[derive(Clone)]
pub struct AuthService {
    pool: DbPool,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(pool: DbPool, settings: AuthSettings) -> Self {
        Self { pool, settings }
    }

    pub fn register(&self, request: &RegisterRequest) -> Result<CurrentUser> {
        let request = request.normalized();
        request.validate().map_err(TrackerError::from)?;

        let mut conn = database::get_connection(&self.pool)?;
        if users::find_by_email(&mut conn, &request.email)?.is_some() {
            warn!("Registration refused, email already in use");
            return Err(TrackerError::EmailTaken.into());
        }

        let password_hash = hash_password(&request.password)?;
        let user = users::insert_user(
            &mut conn,
            &request.name,
            &request.email,
            &password_hash,
            Utc::now(),
        )?;
        info!("Registered user {}", user.id);
        Ok(user.to_current_user())
    }

    /// Checks email and password without opening a session
    pub fn verify_credentials(&self, email: &str, password: &str) -> Result<CurrentUser> {
        let email = normalize_email(email);
        let mut conn = database::get_connection(&self.pool)?;

        let user = users::find_by_email(&mut conn, &email)?.ok_or(TrackerError::InvalidCredentials)?;
        if !verify_password(password, &user.password_hash)? {
            warn!("Failed login for user {}", user.id);
            return Err(TrackerError::InvalidCredentials.into());
        }
        Ok(user.to_current_user())
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Session> {
        let user = self.verify_credentials(email, password)?;

        let now = Utc::now();
        let expires_at = now + Duration::hours(self.settings.session_ttl_hours);
        let token = Uuid::new_v4().to_string();
        let mut conn = database::get_connection(&self.pool)?;
        sessions::insert_session(&mut conn, &token, user.id, now, expires_at)?;

        info!("User {} logged in", user.id);
        Ok(Session {
            token,
            user,
            expires_at,
        })
    }

    /// Ends the session; unknown tokens are ignored
    pub fn logout(&self, token: &str) -> Result<()> {
        let mut conn = database::get_connection(&self.pool)?;
        if sessions::delete_session(&mut conn, token)? {
            info!("Session closed");
        }
        Ok(())
    }

    pub fn current_user(&self, token: &str) -> Result<Option<CurrentUser>> {
        let mut conn = database::get_connection(&self.pool)?;
        let Some(session) = sessions::find_valid(&mut conn, token, Utc::now())? else {
            return Ok(None);
        };
        let user = users::find_by_id(&mut conn, session.user_id)?;
        Ok(user.map(|u| u.to_current_user()))
    }

    pub fn purge_expired_sessions(&self) -> Result<usize> {
        let mut conn = database::get_connection(&self.pool)?;
        let purged = sessions::delete_expired(&mut conn, Utc::now())?;
        if purged > 0 {
            info!("Purged {} expired sessions", purged);
        }
        Ok(purged)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, setup::init_database};
    use crate::errors::tracker_error;

    fn service() -> AuthService {
        let pool = create_memory_pool().unwrap();
        let mut conn = database::get_connection(&pool).unwrap();
        init_database(&mut conn).unwrap();
        drop(conn);
        AuthService::new(pool, AuthSettings::default())
    }

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn session_count(auth: &AuthService) -> i64 {
        let conn = database::get_connection(&auth.pool).unwrap();
        conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_register_login_and_resolve_user() {
        let auth = service();
        let user = auth.register(&request("Ana Silva", " Ana@Example.com ", "secret1")).unwrap();
        assert_eq!(user.email, "ana@example.com");

        let session = auth.login("ana@example.com", "secret1").unwrap();
        assert_eq!(session.user, user);

        let current = auth.current_user(&session.token).unwrap();
        assert_eq!(current, Some(user));
    }

    #[test]
    fn test_register_rejects_duplicate_email() {
        let auth = service();
        auth.register(&request("Ana Silva", "ana@example.com", "secret1")).unwrap();
        let err = auth.register(&request("Other", "ANA@example.com", "secret2")).unwrap_err();
        assert_eq!(tracker_error(&err), Some(&TrackerError::EmailTaken));
    }

    #[test]
    fn test_register_validates_fields() {
        let auth = service();
        for (name, email, password, field) in [
            ("An", "ana@example.com", "secret1", "name"),
            ("  An  ", "ana@example.com", "secret1", "name"),
            ("Ana", "ana.example.com", "secret1", "email"),
            ("Ana", "ana@@example.com", "secret1", "email"),
            ("Ana", "ana@example.com", "12345", "password"),
        ] {
            let err = auth.register(&request(name, email, password)).unwrap_err();
            match tracker_error(&err) {
                Some(TrackerError::InvalidInput(message)) => assert!(message.starts_with(field)),
                other => panic!("unexpected error for {}: {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_login_with_bad_credentials() {
        let auth = service();
        auth.register(&request("Ana Silva", "ana@example.com", "secret1")).unwrap();

        let wrong_password = auth.login("ana@example.com", "nope123").unwrap_err();
        assert_eq!(tracker_error(&wrong_password), Some(&TrackerError::InvalidCredentials));

        let unknown = auth.login("bia@example.com", "secret1").unwrap_err();
        assert_eq!(tracker_error(&unknown), Some(&TrackerError::InvalidCredentials));
    }

    #[test]
    fn test_logout_ends_session() {
        let auth = service();
        auth.register(&request("Ana Silva", "ana@example.com", "secret1")).unwrap();
        let session = auth.login("ana@example.com", "secret1").unwrap();

        auth.logout(&session.token).unwrap();
        auth.logout(&session.token).unwrap();

        assert!(auth.current_user(&session.token).unwrap().is_none());
    }

    #[test]
    fn test_expired_sessions_are_absent() {
        let pool = create_memory_pool().unwrap();
        let mut conn = database::get_connection(&pool).unwrap();
        init_database(&mut conn).unwrap();
        drop(conn);
        let settings = AuthSettings {
            session_ttl_hours: -1,
        };
        let auth = AuthService::new(pool, settings);
        auth.register(&request("Ana Silva", "ana@example.com", "secret1")).unwrap();
        let session = auth.login("ana@example.com", "secret1").unwrap();

        assert!(auth.current_user(&session.token).unwrap().is_none());
        assert_eq!(auth.purge_expired_sessions().unwrap(), 1);
    }

    #[test]
    fn test_verify_credentials_leaves_sessions_untouched() {
        let auth = service();
        let user = auth.register(&request("Ana Silva", "ana@example.com", "secret1")).unwrap();

        let verified = auth.verify_credentials(" ANA@example.com", "secret1").unwrap();
        assert_eq!(verified, user);
        assert_eq!(session_count(&auth), 0);

        let err = auth.verify_credentials("ana@example.com", "wrong12").unwrap_err();
        assert_eq!(tracker_error(&err), Some(&TrackerError::InvalidCredentials));

        auth.login("ana@example.com", "secret1").unwrap();
        assert_eq!(session_count(&auth), 1);
    }
}
