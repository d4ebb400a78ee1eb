//! # ghrest core
//!
//! Response materialization for GitHub REST payloads: typed field extraction,
//! entity mapping, collection pages and the text/JSON/object format
//! dispatcher. Also hosts the client configuration and credential discovery
//! shared by the library and the CLI.

pub mod config;
pub mod consts;
pub mod creds;
pub mod error;
pub mod format;
pub mod json;
pub mod mapping;
pub mod page;

pub use config::{ClientSettings, ConfigDirs};
pub use error::MappingError;
pub use format::{Materialized, ReturnFormat, materialize};
pub use json::JsonObject;
pub use mapping::{FromJson, Mapper, map_entity, map_list, parse_document};
pub use page::{Listed, Page};
