use shared::{
    errors::{RepositoryError, ServiceError},
    utils::PlacementOutcome,
};
use std::time::Duration;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum OrderPlacementError {
    #[error("{0}")]
    Invalid(String),

    #[error("Insufficient stock for {product_name}")]
    InsufficientStock {
        product_id: i32,
        product_name: String,
        requested: i32,
        available: i32,
    },

    /// Stock or cart moved between the snapshot and the write. A fresh attempt may succeed.
    #[error("{0}")]
    ConsistencyConflict(String),

    #[error("Product {0} not found")]
    NotFound(i32),

    #[error("Order placement timed out after {0:?}")]
    TimedOut(Duration),

    #[error("{0}")]
    Internal(String),
}

impl OrderPlacementError {
    pub fn stock_conflict(product_name: &str) -> Self {
        OrderPlacementError::ConsistencyConflict(format!(
            "Stock for {product_name} changed while the order was being placed, please retry"
        ))
    }

    pub fn cart_conflict() -> Self {
        OrderPlacementError::ConsistencyConflict(
            "Cart changed while the order was being placed, please retry".to_string(),
        )
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderPlacementError::ConsistencyConflict(_))
    }

    pub fn outcome(&self) -> PlacementOutcome {
        match self {
            OrderPlacementError::Invalid(_) | OrderPlacementError::InsufficientStock { .. } => {
                PlacementOutcome::Rejected
            }
            OrderPlacementError::ConsistencyConflict(_) => PlacementOutcome::Conflict,
            OrderPlacementError::NotFound(_) => PlacementOutcome::NotFound,
            OrderPlacementError::TimedOut(_) | OrderPlacementError::Internal(_) => {
                PlacementOutcome::Failed
            }
        }
    }
}

impl From<RepositoryError> for OrderPlacementError {
    fn from(err: RepositoryError) -> Self {
        error!("❌ Storage failure during order placement: {:?}", err);
        OrderPlacementError::Internal("Failed to place order".to_string())
    }
}

impl From<OrderPlacementError> for ServiceError {
    fn from(err: OrderPlacementError) -> Self {
        let message = err.to_string();
        match err {
            OrderPlacementError::Invalid(_) => ServiceError::Validation(vec![message]),
            OrderPlacementError::InsufficientStock { .. } => {
                ServiceError::InsufficientStock(message)
            }
            OrderPlacementError::ConsistencyConflict(_) => ServiceError::StockConflict(message),
            OrderPlacementError::NotFound(_) => ServiceError::NotFound(message),
            OrderPlacementError::TimedOut(_) => ServiceError::Timeout(message),
            OrderPlacementError::Internal(_) => ServiceError::Internal(message),
        }
    }
}
