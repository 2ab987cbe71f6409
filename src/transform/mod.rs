//! Path transformation module
//!
//! This module contains the transformer that rewrites candidate paths using a
//! named-group pattern and a `${name}` format template.

mod path;

pub use path::PathTransformer;
