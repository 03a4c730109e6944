//! Domain models for storefront.

pub mod session;
mod visitor;

pub use session::{Flash, FlashKind, keys as session_keys};
pub use visitor::VisitorId;
