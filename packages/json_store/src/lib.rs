//! Read and modify JSON documents stored in files, addressing nested values with dot
//! paths like `"a.b.c"`.
//!
//! [`JsonFile`] is the entry point. The lower layers are public as well:
//! [`resolve`] locates values in a decoded document, [`mutation`] applies structural
//! edits to it and [`persistence`] moves whole documents between memory and disk.

pub mod error;
pub mod mutation;
pub mod options;
pub mod path;
pub mod persistence;
pub mod resolve;
pub mod sparse;
pub mod store;

pub use error::{Error, Result};
pub use mutation::{Applied, Operation};
pub use options::StoreOptions;
pub use path::DotPath;
pub use store::JsonFile;

pub use serde_json::Value;
