//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword, user_role::UserRole,
};

/// Registered account
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique login handle
    pub user_name: UserName,
    /// Display name, defaults to the user name
    pub nickname: String,
    /// Unique, lower-cased
    pub email: Email,
    pub password_hash: UserPassword,
    pub avatar: String,
    pub description: String,
    pub face_photo: String,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update; `None` or blank fields keep their current value
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub description: Option<String>,
    pub face_photo: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        [
            &self.nickname,
            &self.avatar,
            &self.description,
            &self.face_photo,
        ]
        .iter()
        .all(|field| provided(field).is_none())
    }
}

fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl User {
    /// New account with role `user` and nickname = user name
    pub fn new(user_name: UserName, email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            nickname: user_name.as_str().to_owned(),
            user_name,
            email,
            password_hash,
            avatar: String::new(),
            description: String::new(),
            face_photo: String::new(),
            user_role: UserRole::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite only the provided, non-blank fields. Returns whether anything changed.
    pub fn apply_profile(&mut self, patch: &ProfilePatch) -> bool {
        let mut changed = false;

        for (slot, value) in [
            (&mut self.nickname, &patch.nickname),
            (&mut self.avatar, &patch.avatar),
            (&mut self.description, &patch.description),
            (&mut self.face_photo, &patch.face_photo),
        ] {
            if let Some(v) = provided(value) {
                if slot != v {
                    *slot = v.to_owned();
                    changed = true;
                }
            }
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn user() -> User {
        let raw = RawPassword::new("secret123".to_string()).unwrap();
        User::new(
            UserName::new("user1").unwrap(),
            Email::new("user1@example.com").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = user();
        assert_eq!(user.nickname, "user1");
        assert_eq!(user.user_role, UserRole::User);
        assert!(user.avatar.is_empty());
    }

    #[test]
    fn test_apply_profile_only_provided_fields() {
        let mut user = user();
        user.description = "hello".to_string();

        let changed = user.apply_profile(&ProfilePatch {
            nickname: Some("X".to_string()),
            avatar: Some("   ".to_string()),
            ..Default::default()
        });

        assert!(changed);
        assert_eq!(user.nickname, "X");
        assert_eq!(user.avatar, "");
        assert_eq!(user.description, "hello");
    }

    #[test]
    fn test_empty_patch() {
        let patch = ProfilePatch {
            face_photo: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.is_empty());
        assert!(!user().apply_profile(&patch));
    }
}
