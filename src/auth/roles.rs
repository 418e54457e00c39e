// src/auth/roles.rs
use std::fmt;

use crate::auth::context::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Vle,
    Rbi,
    Admin,
    SubAdmin,
}

pub const ALL_ROLES: [Role; 4] = [Role::Admin, Role::SubAdmin, Role::Rbi, Role::Vle];

impl Role {
    /// Parse the backend's `user_type`. Separators and case vary.
    pub fn parse(user_type: &str) -> Option<Role> {
        let key: String = user_type
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "vle" => Some(Role::Vle),
            "rbi" => Some(Role::Rbi),
            "admin" => Some(Role::Admin),
            "subadmin" => Some(Role::SubAdmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Vle => "vle",
            Role::Rbi => "rbi",
            Role::Admin => "admin",
            Role::SubAdmin => "subadmin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Vle => "VLE",
            Role::Rbi => "RBI",
            Role::Admin => "Admin",
            Role::SubAdmin => "Sub-Admin",
        }
    }

    pub fn default_route(&self) -> &'static str {
        match self {
            Role::Vle => "/vle",
            Role::Rbi => "/rbi",
            Role::Admin => "/admin",
            Role::SubAdmin => "/subadmin",
        }
    }

    pub fn from_route(path: &str) -> Option<Role> {
        ALL_ROLES
            .into_iter()
            .find(|r| r.default_route() == path)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of the route guard.
#[derive(Debug, PartialEq, Eq)]
pub enum Access<'a> {
    Granted(&'a Session),
    RedirectLogin,
    Redirect(&'static str),
}

/// No session -> login; role outside `allowed` -> the role's home.
pub fn authorize<'a>(current: Option<&'a Session>, allowed: &[Role]) -> Access<'a> {
    match current {
        None => Access::RedirectLogin,
        Some(session) if allowed.contains(&session.role) => Access::Granted(session),
        Some(session) => Access::Redirect(session.role.default_route()),
    }
}
