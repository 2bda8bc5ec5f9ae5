use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{info, warn};

use solace_db::Database;
use solace_types::models::User;

use crate::password::{hash_password, verify_password};
use crate::{AuthError, TokenIssuer};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Register, login and token verification over the credential store.
/// Every call makes at most one store round trip and caches nothing.
/// Methods block (SQLite, argon2); call them from `spawn_blocking`.
pub struct AuthService {
    db: Database,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(db: Database, tokens: TokenIssuer) -> Self {
        Self { db, tokens }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let password_hash = hash_password(password)?;
        let row = self.db.create_user(username, &password_hash)?;

        info!("Registered user {} ({})", row.username, row.id);
        Ok(User {
            id: row.id,
            created_at: parse_created_at(&row.created_at, row.id),
            username: row.username,
        })
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let row = self
            .db
            .get_user_by_username(username)?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(password, &row.password)? {
            return Err(AuthError::InvalidCredential);
        }

        let token = self.tokens.issue(row.id, &row.username)?;

        Ok(Session {
            token,
            user: User {
                id: row.id,
                created_at: parse_created_at(&row.created_at, row.id),
                username: row.username,
            },
        })
    }

    /// Resolves the token's user from the store rather than from the claims,
    /// so a token for a user that no longer exists is invalid.
    pub fn verify_token(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.tokens.verify(token)?;

        let row = self
            .db
            .get_user_by_id(claims.sub)?
            .ok_or(AuthError::InvalidToken)?;

        Ok(User {
            id: row.id,
            created_at: parse_created_at(&row.created_at, row.id),
            username: row.username,
        })
    }
}

fn parse_created_at(raw: &str, user_id: i64) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite's datetime('now') has no timezone: "YYYY-MM-DD HH:MM:SS" in UTC.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}' on user {}: {}", raw, user_id, e);
            DateTime::default()
        })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn service() -> AuthService {
        AuthService::new(
            Database::open_in_memory().unwrap(),
            TokenIssuer::new("test-secret"),
        )
    }

    #[test]
    fn register_twice_fails_with_duplicate() {
        let auth = service();
        let user = auth.register("alice", "secret1").unwrap();
        assert_eq!(user.username, "alice");

        let err = auth.register("alice", "other1").unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUser));
    }

    #[test]
    fn login_checks_password() {
        let auth = service();
        auth.register("alice", "secret1").unwrap();

        assert!(matches!(
            auth.login("alice", "wrong"),
            Err(AuthError::InvalidCredential)
        ));
        assert!(matches!(
            auth.login("bob", "secret1"),
            Err(AuthError::UserNotFound)
        ));

        let session = auth.login("alice", "secret1").unwrap();
        assert_eq!(session.user.username, "alice");
        assert!(!session.token.is_empty());
    }

    #[test]
    fn verified_token_resolves_issuing_user() {
        let auth = service();
        let registered = auth.register("alice", "secret1").unwrap();
        auth.register("bob", "secret2").unwrap();

        let session = auth.login("alice", "secret1").unwrap();
        let user = auth.verify_token(&session.token).unwrap();
        assert_eq!(user, registered);
    }

    #[test]
    fn token_for_unknown_user_is_invalid() {
        let auth = service();
        let token = auth.tokens().issue(999, "ghost").unwrap();
        assert!(matches!(auth.verify_token(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_invalid() {
        let auth = AuthService::new(
            Database::open_in_memory().unwrap(),
            TokenIssuer::with_ttl("test-secret", Duration::hours(-2)),
        );
        auth.register("alice", "secret1").unwrap();
        let session = auth.login("alice", "secret1").unwrap();

        assert!(matches!(
            auth.verify_token(&session.token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn sqlite_timestamp_parses_as_utc() {
        let ts = parse_created_at("2024-05-01 12:30:00", 1);
        assert_eq!(ts.to_rfc3339(), "2024-05-01T12:30:00+00:00");
    }
}
