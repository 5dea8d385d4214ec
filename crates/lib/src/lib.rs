//!
//! valmap: ordered associative containers over dynamic values.
//! This library provides one keyed, insertion-ordered data structure with three faces.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: A closed sum type of scalars, plain sequences (`Value::List`)
//!   and nested containers (`Value::Map`). Equality is strict: variant and payload must match.
//! * **Keys (`key::Key`)**: Either a sequence position (`Key::Index`) or a named slot (`Key::Name`).
//! * **Map (`map::Map`)**: The ordered associative container. It offers JavaScript `Array`
//!   semantics (negative indices, splice, flat, stable sort, join) on top of `Map` semantics
//!   (arbitrary keys, insertion order, size). Most transformations return a new container;
//!   the documented mutators (`push`, `pop`, `shift`, `unshift`, `splice`, `set`, `delete`,
//!   `copy_within`, `clear`) change the receiver.
//! * **Set (`set::Set`)**: A deduplicating container using the same strict equality.
//! * **Collection (`collection::Collection`)**: A generic enumerable with `first`/`first_where`.
//!
//! ```
//! use valmap::{Depth, Map, Value};
//!
//! let map = Map::of([Value::from(1), Value::from(2), Value::from(vec![3, 4])]);
//! assert_eq!(map.flat(Depth::Infinite).join(","), "1,2,3,4");
//! ```

pub mod collection;
pub mod errors;
pub mod key;
pub mod map;
pub mod set;
pub mod value;

pub use collection::{Collection, Operator};
pub use errors::MapError;
pub use key::Key;
pub use map::{Depth, JsonFormat, Map, SortMode};
pub use set::Set;
pub use value::Value;

/// Result type used throughout the valmap library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the valmap library.
///
/// JSON failures surface through [`MapError::Parse`] and [`MapError::Encoding`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Structured container errors
    #[error(transparent)]
    Map(MapError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Map(_) => "map",
        }
    }

    /// Check if this error is a coercion failure.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Map(map_err) => map_err.is_type_error(),
        }
    }

    /// Check if this error came from JSON parsing.
    pub fn is_parse_error(&self) -> bool {
        match self {
            Error::Map(map_err) => map_err.is_parse_error(),
        }
    }

    /// Check if this error came from JSON encoding.
    pub fn is_encoding_error(&self) -> bool {
        match self {
            Error::Map(map_err) => map_err.is_encoding_error(),
        }
    }

    /// Check if this error is an unknown property access.
    pub fn is_undefined_property(&self) -> bool {
        match self {
            Error::Map(map_err) => map_err.is_undefined_property(),
        }
    }
}
