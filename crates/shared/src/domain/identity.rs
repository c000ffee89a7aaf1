use crate::errors::ServiceError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }

    /// Registration falls back to `Buyer` for anything it does not recognise.
    pub fn from_registration(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or(Role::Buyer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            other => Err(ServiceError::Validation(vec![format!(
                "Unknown role '{other}'"
            )])),
        }
    }
}

/// Identity attached to a request once its bearer token has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Buyer-scoped routes carry the target user in the path; only that user may act on it.
    pub fn ensure_owner(&self, user_id: i32) -> Result<(), ServiceError> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(format!(
                "User {} may not act on behalf of user {}",
                self.user_id, user_id
            )))
        }
    }

    pub fn ensure_role(&self, role: Role) -> Result<(), ServiceError> {
        if self.role == role {
            Ok(())
        } else {
            Err(ServiceError::Forbidden("Insufficient permissions".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn buyer(user_id: i32) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id,
            email: "buyer@example.com".into(),
            role: Role::Buyer,
        }
    }

    #[rstest]
    #[case(Some("seller"), Role::Seller)]
    #[case(Some("buyer"), Role::Buyer)]
    #[case(Some("admin"), Role::Buyer)]
    #[case(None, Role::Buyer)]
    fn registration_role_defaults_to_buyer(#[case] raw: Option<&str>, #[case] expected: Role) {
        assert_eq!(Role::from_registration(raw), expected);
    }

    #[test]
    fn owner_check_rejects_other_users() {
        let identity = buyer(4);
        assert!(identity.ensure_owner(4).is_ok());
        assert!(matches!(
            identity.ensure_owner(5),
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[test]
    fn role_check_requires_exact_role() {
        assert!(matches!(
            buyer(1).ensure_role(Role::Seller),
            Err(ServiceError::Forbidden(_))
        ));
    }
}
