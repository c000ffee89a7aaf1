pub mod cart_item;
pub mod dashboard;
pub mod order;
pub mod order_item;
pub mod product;
pub mod user;
