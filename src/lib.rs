//! Automatic untaint category assignment for ORM entity columns.
//!
//! Binding form input to a database record means deciding, for every column,
//! how untrusted strings should be validated: free text, integers, dates and
//! so on. This crate makes that decision from the column's SQL type and name
//! so it does not have to be spelled out by hand.
//!
//! - **Resolution**: [`resolve`] assigns each column an untaint [`Category`]
//!   from a layered [`UntaintConfig`]
//! - **Registration**: [`AutoUntaint::auto_untaint`] resolves and hands the
//!   resulting [`UntaintGroups`] to the host ORM
//! - **Defaults**: [`TypeMap::standard`] maps common SQL type families to
//!   `printable`, `integer` and `date`
//!
//! # Rule priority
//!
//! For every column that is not skipped, the first of these that applies wins:
//!
//! 1. a per-column override
//! 2. a per-type override (exact type, then type family)
//! 3. the default type table (exact type, then type family)
//! 4. the first matching type pattern
//! 5. the first matching column-name pattern
//!
//! A column nothing matches is dropped with a warning, or is an error in
//! strict mode.
//!
//! # Examples
//!
//! ```
//! use auto_untaint::{AutoUntaint, TableSchema, UntaintConfig};
//!
//! let mut film = TableSchema::new("Film")
//!     .column("title", "varchar(255)")
//!     .column("year", "int(4)")
//!     .column("secret_notes", "text");
//!
//! let config = UntaintConfig::builder()
//!     .skip("secret_notes")
//!     .build()
//!     .expect("no patterns to compile");
//!
//! let resolution = film.auto_untaint(&config).expect("every column resolves");
//!
//! let groups = resolution.groups();
//! assert_eq!(groups.category_of("title").unwrap(), "printable");
//! assert_eq!(groups.category_of("year").unwrap(), "integer");
//! assert!(groups.category_of("secret_notes").is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod column;
mod config;
mod entity;
mod error;
mod logging;
mod resolver;
mod rule;
mod type_map;

#[cfg(test)]
mod test_utils;

pub use category::Category;
pub use column::{type_family, Column};
pub use config::{UntaintConfig, UntaintConfigBuilder};
pub use entity::{AutoUntaint, ColumnIntrospect, MemoryRegistry, TableSchema, UntaintRegistry};
pub use error::{Error, ErrorKind};
pub use resolver::{resolve, Resolution, UnresolvedColumn, UntaintGroups};
pub use rule::{PatternRule, PatternRules};
pub use type_map::TypeMap;
