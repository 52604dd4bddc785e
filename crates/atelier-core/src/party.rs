//! # Parties and Roles
//!
//! The authenticated identity attached to every command. The identity
//! provider (API auth layer) resolves credentials into an [`Actor`];
//! downstream code trusts it for authorization checks.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::identity::PartyId;

/// The role a party acts under for a given request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A shopper placing and receiving orders.
    Customer,
    /// A designer listing items and fulfilling orders.
    Designer,
    /// Marketplace staff with review and resolution powers.
    Admin,
}

impl Role {
    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Designer => "designer",
            Self::Admin => "admin",
        }
    }

    /// Parse a role from its canonical string name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRole`] for unknown names.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "customer" => Ok(Self::Customer),
            "designer" => Ok(Self::Designer),
            "admin" => Ok(Self::Admin),
            other => Err(CoreError::InvalidRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated party attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The party's identifier.
    pub id: PartyId,
    /// The role the party acts under.
    pub role: Role,
}

impl Actor {
    /// Construct an actor.
    pub fn new(id: PartyId, role: Role) -> Self {
        Self { id, role }
    }

    /// Whether this actor holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_string_roundtrip() {
        for role in [Role::Customer, Role::Designer, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_rejected() {
        assert!(Role::parse("owner").is_err());
        assert!(Role::parse("").is_err());
        assert!(Role::parse("Admin").is_err());
    }

    #[test]
    fn admin_check() {
        let admin = Actor::new(PartyId::new(), Role::Admin);
        let customer = Actor::new(PartyId::new(), Role::Customer);
        assert!(admin.is_admin());
        assert!(!customer.is_admin());
    }

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::Designer).unwrap();
        assert_eq!(json, "\"designer\"");
    }
}
