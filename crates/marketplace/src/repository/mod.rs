pub mod cart;
pub mod order;
pub mod order_placement;
pub mod product;
pub mod seller;
pub mod user;
