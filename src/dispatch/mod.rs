pub mod menu_index;
pub mod ranking;
pub mod service;

pub use menu_index::*;
pub use ranking::*;
pub use service::*;
