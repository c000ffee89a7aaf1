#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use self::memory::{FailPoint, MemoryOrderPlacementStore};
pub use self::postgres::{PostgresOrderPlacementSession, PostgresOrderPlacementStore};
