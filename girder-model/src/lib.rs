//! Dynamic row model for the Girder tabular engine
//!
//! List pages receive rows from REST endpoints as loosely-shaped JSON. This
//! crate gives those rows a typed home: a dynamic [`Value`](model::Value),
//! an opaque keyed [`Record`](model::Record), a total dot-path accessor
//! ([`FieldPath`](model::FieldPath)), and the heterogeneous comparator the
//! table engine sorts with.

pub mod compare;
pub mod error;
pub mod model;

pub use compare::{Direction, compare_values};
pub use error::FieldError;
pub use model::{FieldPath, Record, Value};
