//! Build permutation engine
//!
//! Projects declare named configuration fields. A build pins some of them to
//! a single value and opens others to a list of values; the engine then
//! enumerates every combination as a [`Permutation`] with a stable hash used
//! to name the artifact built for it.
//!
//! # Architecture
//!
//! - [`FieldValue`](value::FieldValue) - scalar value a field can take
//! - [`FieldDecl`](field::FieldDecl) / [`Field`](field::Field) - declared and registered fields
//! - [`Session`](session::Session) - registry, pin/open operations, enumeration
//! - [`Permutation`](combination::Permutation) - one variant with its checksum
//! - [`ExportTable`](export::ExportTable) - runtime description of the field space
//! - [`PermutationContext`](context::PermutationContext) - per-thread current variant

pub mod checksum;
pub mod combination;
pub mod context;
pub mod error;
pub mod export;
pub mod field;
pub mod session;
pub mod value;

pub use combination::{Permutation, HASH_LEN};
pub use context::PermutationContext;
pub use error::{ConfigError, ConfigResult};
pub use export::{ExportRecord, ExportTable};
pub use field::{is_valid_field_name, Check, CheckSpec, Field, FieldDecl};
pub use session::{Scope, Session};
pub use value::FieldValue;
