use serde::{Deserialize, Serialize};

/// Account role as issued by the backend.
///
/// The wire format is the uppercase role string from the token claims and
/// the user DTOs. Anything the client does not recognize is preserved as
/// `Unknown` and denied by every membership check (fail closed, but keep
/// the original string around for logging).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    User,
    Unknown(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
            Role::Unknown(other) => other,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ADMIN" => Role::Admin,
            "USER" => Role::User,
            _ => Role::Unknown(value),
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_round_trip() {
        let admin: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(admin, Role::Admin);
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"USER\"");
    }

    #[test]
    fn unrecognized_role_is_preserved_not_rejected() {
        let role: Role = serde_json::from_str("\"AUDITOR\"").unwrap();
        assert_eq!(role, Role::Unknown("AUDITOR".to_string()));
        assert_eq!(role.as_str(), "AUDITOR");
    }
}
