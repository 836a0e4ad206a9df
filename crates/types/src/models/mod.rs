//! Shared domain models

pub mod secret_string;
pub mod variant;

pub use secret_string::SecretString;
pub use variant::{VariantQuery, DEFAULT_TUMOR_TYPE};
