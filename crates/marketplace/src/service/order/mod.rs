mod error;
mod placement;
pub mod plan;
mod query;

pub use self::error::OrderPlacementError;
pub use self::placement::{OrderPlacementService, OrderPlacementServiceDeps, PlacementState};
pub use self::query::{OrderQueryService, OrderQueryServiceDeps};
