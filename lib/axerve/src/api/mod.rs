//! Endpoint routers.
//!
//! Each router borrows an [`AxerveClient`](crate::AxerveClient) and exposes
//! one group of gateway endpoints.

mod check;
mod payment;
mod shop;

pub use check::Check;
pub use payment::{LOOKUP_KEYS, Payment};
pub use shop::Shop;
