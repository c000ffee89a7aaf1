pub mod auth;
pub mod cart;
pub mod order_item;
pub mod product;
