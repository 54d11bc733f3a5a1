//! View Components

mod item_detail;
mod item_list;

pub use item_detail::ItemDetail;
pub use item_list::ItemList;
