//! Ordering core: data model, cart identity, pricing, cart state, validation.

pub mod cart;
pub mod key;
pub mod pricing;
pub mod types;
pub mod validate;
