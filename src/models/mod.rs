pub mod currency;
pub mod packing_list;
pub mod store;
pub mod store_stock;
