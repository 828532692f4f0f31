use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{
    password::{hash_password, verify_password},
    repo_types::{User, UserRepo, UserType, UserUpdate},
};
use crate::error::{AppError, AppResult};

pub const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registration input as received from the client.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

/// Credential checks and identity mutations over the user store.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepo,
}

impl AuthService {
    pub fn new(users: UserRepo) -> Self {
        Self { users }
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let email = normalize_email(email);
        self.users.find_one(&|u: &User| u.email == email)
    }

    pub fn get_user(&self, id: &str) -> AppResult<User> {
        self.users
            .get(id)
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// Returns the user only when the email exists and the password matches.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        let Some(user) = self.find_by_email(email) else {
            warn!(email = %normalize_email(email), "login unknown email");
            return None;
        };
        match verify_password(password, &user.password_hash) {
            Ok(true) => Some(user),
            Ok(false) => {
                warn!(user_id = %user.id, "login invalid password");
                None
            }
            Err(e) => {
                error!(error = %e, user_id = %user.id, "stored password hash unreadable");
                None
            }
        }
    }

    pub fn register(&self, new: NewUser) -> AppResult<User> {
        let email = normalize_email(&new.email);
        let name = new.name.trim().to_string();

        if name.is_empty() {
            return Err(AppError::InvalidInput("Name is required".into()));
        }
        if !is_valid_email(&email) {
            return Err(AppError::InvalidInput("Invalid email".into()));
        }
        if new.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::InvalidInput("Password too short".into()));
        }
        if self.find_by_email(&email).is_some() {
            warn!(email = %email, "email already registered");
            return Err(AppError::AlreadyExists("Email already registered".into()));
        }

        let hash = hash_password(&new.password)?;
        let user = User::new(Uuid::new_v4().to_string(), name, email, hash, new.user_type);

        // re-checked under the store lock for concurrent sign-ups
        let email = user.email.clone();
        if !self.users.insert_if_absent(user.clone(), &|u: &User| u.email == email) {
            warn!(email = %email, "email registered concurrently");
            return Err(AppError::AlreadyExists("Email already registered".into()));
        }

        info!(user_id = %user.id, user_type = %user.user_type, "user registered");
        Ok(user)
    }

    pub fn update_user(&self, id: &str, update: UserUpdate) -> AppResult<User> {
        if matches!(&update.name, Some(n) if n.trim().is_empty()) {
            return Err(AppError::InvalidInput("Name cannot be empty".into()));
        }
        let mut update = Some(update);
        let user = self
            .users
            .update(id, &mut |user: &mut User| {
                if let Some(update) = update.take() {
                    update.apply_to(user);
                }
            })
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        info!(user_id = %user.id, "profile updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryRepository;
    use std::sync::Arc;

    fn service() -> AuthService {
        AuthService::new(Arc::new(InMemoryRepository::<User>::new()))
    }

    fn new_user(email: &str, user_type: UserType) -> NewUser {
        NewUser {
            name: "Asha Patil".into(),
            email: email.into(),
            password: "correct-horse".into(),
            user_type,
        }
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two words@x.io"));
    }

    #[test]
    fn authenticate_accepts_only_the_right_password() {
        let auth = service();
        let user = auth.register(new_user("Asha@Example.com ", UserType::Worker)).unwrap();
        assert_eq!(user.email, "asha@example.com");

        let found = auth.authenticate("asha@example.com", "correct-horse").unwrap();
        assert_eq!(found.id, user.id);
        assert!(auth.authenticate("asha@example.com", "wrong-horse").is_none());
        assert!(auth.authenticate("nobody@example.com", "correct-horse").is_none());
    }

    #[test]
    fn duplicate_email_is_always_rejected() {
        let auth = service();
        auth.register(new_user("dup@example.com", UserType::Worker)).unwrap();

        let mut again = new_user("DUP@example.com", UserType::Employer);
        again.name = "Someone Else".into();
        again.password = "another-password".into();
        assert!(matches!(auth.register(again), Err(AppError::AlreadyExists(_))));
    }

    #[test]
    fn register_validates_input() {
        let auth = service();
        let mut short = new_user("s@example.com", UserType::Worker);
        short.password = "short".into();
        assert!(matches!(auth.register(short), Err(AppError::InvalidInput(_))));

        let mut nameless = new_user("n@example.com", UserType::Worker);
        nameless.name = "   ".into();
        assert!(matches!(auth.register(nameless), Err(AppError::InvalidInput(_))));

        assert!(matches!(
            auth.register(new_user("bad-email", UserType::Worker)),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn update_user_merges_only_given_fields() {
        let auth = service();
        let user = auth.register(new_user("m@example.com", UserType::Worker)).unwrap();

        let updated = auth
            .update_user(
                &user.id,
                UserUpdate {
                    location: Some("Pune, Maharashtra".into()),
                    skills: Some(vec!["s1".into(), "s2".into(), "s1".into()]),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Asha Patil");
        assert_eq!(updated.location.as_deref(), Some("Pune, Maharashtra"));
        assert_eq!(updated.skills, vec!["s1", "s2"]);

        let again = auth
            .update_user(
                &user.id,
                UserUpdate {
                    bio: Some("Carpenter".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(again.location.as_deref(), Some("Pune, Maharashtra"));
        assert_eq!(again.bio.as_deref(), Some("Carpenter"));
    }

    #[test]
    fn update_unknown_user_is_not_found() {
        let auth = service();
        assert!(matches!(
            auth.update_user("ghost", UserUpdate::default()),
            Err(AppError::NotFound(_))
        ));
    }
}
