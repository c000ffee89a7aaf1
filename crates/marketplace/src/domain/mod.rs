pub mod placement;
pub mod requests;
pub mod response;
pub mod status;
