use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AuthError;

/// Label shown for a subject without a recognized role.
pub const UNKNOWN_ROLE_LABEL: &str = "Desconocido";

/// League role. A user holds exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    Organizer,
    Delegate,
    Player,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Administrator,
        Role::Organizer,
        Role::Delegate,
        Role::Player,
    ];

    /// Numeric id used by the league backend (`rol` column / claim).
    pub fn id(self) -> i64 {
        match self {
            Role::Administrator => 1,
            Role::Organizer => 2,
            Role::Delegate => 3,
            Role::Player => 4,
        }
    }

    pub fn from_id(id: i64) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Organizer => "organizer",
            Role::Delegate => "delegate",
            Role::Player => "player",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Role::Administrator => "Administrador",
            Role::Organizer => "Organizador",
            Role::Delegate => "Delegado",
            Role::Player => "Jugador",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Role {
    type Err = AuthError;

    /// Accepts the numeric id or a role name (English or Spanish).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i64>() {
            return Role::from_id(id)
                .ok_or_else(|| AuthError::InvalidInput(format!("unknown role id: {id}")));
        }
        match s.to_lowercase().as_str() {
            "administrator" | "administrador" | "admin" => Ok(Role::Administrator),
            "organizer" | "organizador" => Ok(Role::Organizer),
            "delegate" | "delegado" => Ok(Role::Delegate),
            "player" | "jugador" => Ok(Role::Player),
            _ => Err(AuthError::InvalidInput(format!("unknown role: {s}"))),
        }
    }
}

/// Who is asking. An absent role is its own variant so every check has to
/// handle it, and it never holds a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Authenticated(Role),
    #[default]
    Anonymous,
}

impl Subject {
    pub fn role(self) -> Option<Role> {
        match self {
            Subject::Authenticated(role) => Some(role),
            Subject::Anonymous => None,
        }
    }

    /// Decode a role id received from outside the process (session payload,
    /// backend response). Missing or unrecognized ids become `Anonymous`.
    pub fn from_role_id(id: Option<i64>) -> Subject {
        match id {
            Some(id) => match Role::from_id(id) {
                Some(role) => Subject::Authenticated(role),
                None => {
                    tracing::warn!(role_id = id, "unrecognized role id, treating as anonymous");
                    Subject::Anonymous
                }
            },
            None => Subject::Anonymous,
        }
    }
}

impl From<Role> for Subject {
    fn from(role: Role) -> Self {
        Subject::Authenticated(role)
    }
}

impl From<Option<Role>> for Subject {
    fn from(role: Option<Role>) -> Self {
        role.map_or(Subject::Anonymous, Subject::Authenticated)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Authenticated(role) => write!(f, "{role}"),
            Subject::Anonymous => write!(f, "anonymous"),
        }
    }
}
