pub mod client;
pub mod postgrest;

pub use client::{Order, Query, StoreError, StoreResult, TableStore};
pub use postgrest::PostgrestStore;
