pub mod cache;
pub mod client;
pub mod distance;
pub mod error;
pub mod models;
pub mod repository;

pub use cache::*;
pub use client::*;
pub use distance::*;
pub use error::*;
pub use models::*;
pub use repository::*;
