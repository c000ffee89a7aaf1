use serde::{Deserialize, Serialize};
use shared::errors::ServiceError;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Order-level status. Placement only ever creates `pending` orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-line state moved forward by the seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentStatus {
    Pending,
    Completed,
}

impl FulfillmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentStatus::Pending => "pending",
            FulfillmentStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FulfillmentStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(FulfillmentStatus::Pending),
            "completed" => Ok(FulfillmentStatus::Completed),
            other => Err(ServiceError::Validation(vec![format!(
                "Invalid status '{other}', expected 'pending' or 'completed'"
            )])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pending", FulfillmentStatus::Pending)]
    #[case("completed", FulfillmentStatus::Completed)]
    fn fulfillment_status_parses_known_values(
        #[case] raw: &str,
        #[case] expected: FulfillmentStatus,
    ) {
        assert_eq!(raw.parse::<FulfillmentStatus>().ok(), Some(expected));
    }

    #[rstest]
    #[case("shipped")]
    #[case("Completed")]
    #[case("")]
    fn fulfillment_status_rejects_anything_else(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<FulfillmentStatus>(),
            Err(ServiceError::Validation(_))
        ));
    }
}
