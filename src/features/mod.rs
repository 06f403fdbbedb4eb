//! Feature extraction and encoding
//!
//! Converts a customer profile into a model-ready feature row.

pub mod encoding;
pub mod schema;

pub use encoding::{encode, FeatureVector};
pub use schema::FeatureSchema;
