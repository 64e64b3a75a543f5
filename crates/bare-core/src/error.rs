//! # Error Hierarchy
//!
//! Structured error types for the codec, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Two disjoint families describe runtime failures:
//!
//! - [`ValidationError`] — a value disagrees with its [`TypeDescriptor`].
//!   Nested failures are wrapped with the path that led to them (field name,
//!   element index, map key) so the caller can see *where* a tree is invalid.
//! - [`DecodeError`] — the wire bytes are malformed or insufficient.
//!
//! [`EncodeError`] is either a validation failure discovered while walking
//! the value or a sink I/O failure. [`SchemaError`] covers declaration-time
//! mistakes made through the [`SchemaBuilder`](crate::SchemaBuilder).
//!
//! [`TypeDescriptor`]: crate::TypeDescriptor

use thiserror::Error;

use crate::config::ConfigError;

/// Top-level error type for the codec.
#[derive(Error, Debug)]
pub enum BareError {
    /// A value does not conform to its descriptor.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The input bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The value could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// A schema declaration was rejected.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The codec configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A runtime value disagrees with its type descriptor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The value's native kind does not match the descriptor.
    #[error("expected {expected}, found {found}")]
    KindMismatch {
        /// Rendering of the expected descriptor.
        expected: String,
        /// Kind name of the value that was supplied.
        found: &'static str,
    },

    /// An integer does not fit the declared width/signedness.
    #[error("integer {value} out of range for {kind}")]
    OutOfRange {
        /// The offending value, widened so both signed and unsigned fit.
        value: i128,
        /// Rendering of the integer kind.
        kind: String,
    },

    /// A fixed-length array or data block has the wrong length.
    #[error("expected exactly {expected} elements, found {found}")]
    LengthMismatch {
        /// Declared length.
        expected: usize,
        /// Supplied length.
        found: usize,
    },

    /// No member of a union accepts the value.
    #[error("no member of union {union} accepts the value")]
    NoMatchingMember {
        /// Union name.
        union: String,
    },

    /// An enum value is not in the declared set.
    #[error("value {value} is not a declared member of enum {name}")]
    EnumValueNotAllowed {
        /// Enum name.
        name: String,
        /// The offending value.
        value: i128,
    },

    /// A map is keyed by a type that has no stable equality.
    #[error("{kind} is not a legal map key type")]
    IllegalMapKey {
        /// Rendering of the key descriptor.
        kind: String,
    },

    /// A struct, union, or map value was built from a different schema.
    #[error("value was built for {found}, expected {expected}")]
    SchemaMismatch {
        /// Expected schema name.
        expected: String,
        /// Schema name carried by the value.
        found: String,
    },

    /// A named field does not exist in the struct schema.
    #[error("struct {schema} has no field named '{field}'")]
    UnknownField {
        /// Struct name.
        schema: String,
        /// The unknown field name.
        field: String,
    },

    /// A field with no zero value was omitted at construction.
    #[error("field '{field}' of struct {schema} has no default and must be supplied")]
    MissingField {
        /// Struct name.
        schema: String,
        /// The omitted field name.
        field: String,
    },

    /// A positional struct construction supplied the wrong number of values.
    #[error("struct {schema} declares {expected} fields, found {found} values")]
    FieldCount {
        /// Struct name.
        schema: String,
        /// Declared field count.
        expected: usize,
        /// Supplied value count.
        found: usize,
    },

    /// Failure inside a named struct field.
    #[error("field '{field}': {source}")]
    Field {
        /// Field name.
        field: String,
        /// Underlying failure.
        source: Box<ValidationError>,
    },

    /// Failure inside an array element.
    #[error("element {index}: {source}")]
    Element {
        /// Zero-based element index.
        index: usize,
        /// Underlying failure.
        source: Box<ValidationError>,
    },

    /// Failure on a map key.
    #[error("map key {key}: {source}")]
    MapKey {
        /// Rendering of the key.
        key: String,
        /// Underlying failure.
        source: Box<ValidationError>,
    },

    /// Failure on the value stored under a map key.
    #[error("map value at key {key}: {source}")]
    MapValue {
        /// Rendering of the key.
        key: String,
        /// Underlying failure.
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Wrap this error with the struct field it occurred in.
    pub fn in_field(self, field: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// Wrap this error with the array index it occurred at.
    pub fn in_element(self, index: usize) -> Self {
        Self::Element {
            index,
            source: Box::new(self),
        }
    }

    /// Innermost error, with every path wrapper removed.
    pub fn root_cause(&self) -> &ValidationError {
        match self {
            Self::Field { source, .. }
            | Self::Element { source, .. }
            | Self::MapKey { source, .. }
            | Self::MapValue { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Malformed or insufficient wire bytes.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The source was exhausted mid-value.
    #[error("input truncated at offset {offset}: needed {needed} more bytes")]
    Truncated {
        /// Bytes consumed before the failing read.
        offset: u64,
        /// Size of the read that could not be satisfied.
        needed: usize,
    },

    /// A varint carries more than 64 significant bits.
    #[error("varint overflow: value exceeds 64 bits")]
    VarintOverflow,

    /// A varint was not encoded in its minimal form.
    #[error("non-canonical varint encoding")]
    NonCanonicalVarint,

    /// String bytes are not valid UTF-8.
    #[error("invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A union tag names no declared member.
    #[error("unknown union tag {tag}: union declares {members} members")]
    UnknownUnionTag {
        /// Tag read from the wire.
        tag: u64,
        /// Declared member count.
        members: usize,
    },

    /// A bool byte was neither `0x00` nor `0x01`.
    #[error("invalid bool byte {0:#04x}")]
    InvalidBool(u8),

    /// An optional presence byte was neither `0x00` nor `0x01`.
    #[error("invalid optional presence byte {0:#04x}")]
    InvalidPresence(u8),

    /// A length prefix exceeds the configured limit.
    #[error("length {length} exceeds the configured limit of {limit}")]
    LengthLimitExceeded {
        /// Length read from the wire.
        length: u64,
        /// Configured `max_length`.
        limit: u64,
    },

    /// A map carried the same key twice.
    #[error("duplicate map key {key}")]
    DuplicateMapKey {
        /// Rendering of the repeated key.
        key: String,
    },

    /// Input remained after one complete value.
    #[error("{count} trailing bytes after a complete value")]
    TrailingBytes {
        /// Number of unread bytes.
        count: usize,
    },

    /// The decoded bytes form a value its schema rejects.
    #[error("decoded value is invalid: {0}")]
    Invalid(#[from] ValidationError),

    /// The byte source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while encoding a value.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The value does not conform to its descriptor.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The byte sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EncodeError {
    /// Wrap a validation failure with the struct field it occurred in.
    pub fn in_field(self, field: &str) -> Self {
        match self {
            Self::Validation(e) => Self::Validation(e.in_field(field)),
            other => other,
        }
    }

    /// Wrap a validation failure with the array index it occurred at.
    pub fn in_element(self, index: usize) -> Self {
        match self {
            Self::Validation(e) => Self::Validation(e.in_element(index)),
            other => other,
        }
    }
}

/// A schema declaration was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Two struct fields share a name.
    #[error("struct {schema} declares field '{field}' more than once")]
    DuplicateField {
        /// Struct name.
        schema: String,
        /// The repeated field name.
        field: String,
    },

    /// Two enum variants share an integer value.
    #[error("enum {name}: value {value} is used by both '{first}' and '{second}'")]
    DuplicateEnumValue {
        /// Enum name.
        name: String,
        /// The repeated value.
        value: i64,
        /// First variant using the value.
        first: String,
        /// Second variant using the value.
        second: String,
    },

    /// Two enum variants share a name.
    #[error("enum {name} declares variant '{variant}' more than once")]
    DuplicateEnumName {
        /// Enum name.
        name: String,
        /// The repeated variant name.
        variant: String,
    },

    /// An enum variant does not fit the underlying integer type.
    #[error("enum {name}: variant '{variant}' = {value} does not fit {repr}")]
    EnumValueOutOfRange {
        /// Enum name.
        name: String,
        /// Variant name.
        variant: String,
        /// Declared value.
        value: i64,
        /// Rendering of the underlying integer type.
        repr: String,
    },

    /// An enum declares no variants.
    #[error("enum {name} declares no variants")]
    EmptyEnum {
        /// Enum name.
        name: String,
    },

    /// A union declares no members.
    #[error("union {name} declares no members")]
    EmptyUnion {
        /// Union name.
        name: String,
    },

    /// A map is declared with an illegal key type.
    #[error("{kind} is not a legal map key type")]
    IllegalMapKey {
        /// Rendering of the key descriptor.
        kind: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_wrapping_renders_path() {
        let err = ValidationError::LengthMismatch {
            expected: 3,
            found: 2,
        }
        .in_element(1)
        .in_field("points");
        assert_eq!(
            err.to_string(),
            "field 'points': element 1: expected exactly 3 elements, found 2"
        );
    }

    #[test]
    fn root_cause_strips_wrappers() {
        let inner = ValidationError::OutOfRange {
            value: 300,
            kind: "u8".to_string(),
        };
        let err = inner.clone().in_field("a").in_element(0);
        assert_eq!(err.root_cause(), &inner);
    }

    #[test]
    fn encode_error_wraps_only_validation() {
        let io = EncodeError::Io(std::io::Error::other("disk full"));
        assert!(matches!(io.in_field("x"), EncodeError::Io(_)));

        let v = EncodeError::Validation(ValidationError::LengthMismatch {
            expected: 1,
            found: 0,
        });
        match v.in_field("x") {
            EncodeError::Validation(ValidationError::Field { field, .. }) => {
                assert_eq!(field, "x")
            }
            other => panic!("expected field wrapper, got: {other}"),
        }
    }

    #[test]
    fn decode_error_display() {
        let err = DecodeError::UnknownUnionTag { tag: 5, members: 3 };
        assert!(err.to_string().contains("unknown union tag 5"));
        let err = DecodeError::InvalidBool(0x02);
        assert_eq!(err.to_string(), "invalid bool byte 0x02");
    }
}
