pub mod stored_item;

pub use stored_item::StoredItem;
