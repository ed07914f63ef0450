pub mod store;
pub mod transmission;
