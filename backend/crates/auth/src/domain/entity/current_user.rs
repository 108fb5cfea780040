//! Authenticated caller, decoded from a verified token

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub user_name: String,
    pub user_role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.user_name.as_str().to_owned(),
            user_role: user.user_role,
        }
    }
}
