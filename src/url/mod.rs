//! URL handling module for Pagewalk
//!
//! This module provides the URL value type, normalization, scope-domain
//! checks and the non-document extension filter.

mod domain;
mod extension;
mod normalize;
mod parsed;

// Re-export main functions
pub use domain::{is_web_scheme, ScopeDomain};
pub use extension::has_excluded_extension;
pub use normalize::{normalize_url, page_key, strip_trailing_slash};
pub use parsed::ParsedUrl;
