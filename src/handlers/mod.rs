pub mod packing_list;
pub mod store;
pub mod transmission;
