//! dictd format adapter.
//!
//! A dictionary in this format is a pair of files: a `*.index` file
//! listing headwords with the position and length of their article, and
//! a `*.dict.dz` file holding the article data as a dictzip (randomly
//! accessible gzip) member. This crate validates and opens such pairs,
//! discovers them across the configured directories, and serves prefix
//! searches through the `inkdict_core::dictionary::Dictionary` trait.

pub mod data;
pub mod dictionary;
pub mod discover;
pub mod error;
pub mod index;

pub use dictionary::DictdDictionary;
pub use discover::discover;
pub use error::{DictdError, Result};
pub use index::SortMode;
