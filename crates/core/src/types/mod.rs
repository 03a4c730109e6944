//! Core types for Fake Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod options;
pub mod price;
pub mod product;

pub use email::{Email, EmailError};
pub use id::ProductId;
pub use options::OptionSet;
pub use price::{Price, PriceError};
pub use product::{Product, Rating};
