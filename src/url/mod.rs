//! URL handling module for trundle
//!
//! Validates URLs and reduces them to the canonical `host ++ path` key that
//! identifies one logical page in the registry.

mod normalize;

pub use normalize::{validate_url, CanonicalUrl};
