mod order;
mod product;

pub use self::order::{SellerOrderService, SellerOrderServiceDeps};
pub use self::product::{SellerProductService, SellerProductServiceDeps};
