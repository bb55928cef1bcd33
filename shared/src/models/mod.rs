//! Wire models
//!
//! Shared between coop-server and the web client (via API).
//! Amounts are `f64` and timestamps RFC 3339 strings on the wire; the
//! server keeps `Decimal` / epoch millis internally and converts in one place.

pub mod news;
pub mod order;
pub mod paging;
pub mod product;
pub mod sales;
pub mod user;

// Re-exports
pub use news::*;
pub use order::*;
pub use paging::*;
pub use product::*;
pub use sales::*;
pub use user::*;
