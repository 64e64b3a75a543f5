//! # Schema Builder
//!
//! The user-facing modeling layer. Named types are declared by explicit,
//! ordered registration calls:
//!
//! ```
//! use bare_core::{IntRepr, SchemaBuilder, TypeDescriptor};
//!
//! let schema = SchemaBuilder::default();
//! let color = schema
//!     .enumeration("Color", IntRepr::UINT)
//!     .variant("RED", 0)
//!     .variant("GREEN", 1)
//!     .build()
//!     .unwrap();
//! let pixel = schema
//!     .structure("Pixel")
//!     .field("x", TypeDescriptor::u16())
//!     .field("y", TypeDescriptor::u16())
//!     .field("color", color.into())
//!     .build()
//!     .unwrap();
//! assert_eq!(pixel.declaration(), "type Pixel struct { x: u16 y: u16 color: Color }");
//! ```
//!
//! Declaration order is wire order. Built schemas are returned behind `Arc`
//! and are read-only from then on.

use std::sync::Arc;

use crate::config::{CodecConfig, MapKeyPolicy};
use crate::descriptor::{
    EnumSchema, EnumVariant, FieldDescriptor, FloatWidth, IntRepr, MapSchema, StructSchema,
    TypeDescriptor, UnionSchema,
};
use crate::error::SchemaError;
use crate::value::{MapValue, StructValue, Value};

/// Entry point for declaring named types.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaBuilder {
    map_key_policy: MapKeyPolicy,
}

impl SchemaBuilder {
    /// Create a builder that applies the configured map key policy.
    pub fn new(config: CodecConfig) -> Self {
        Self {
            map_key_policy: config.map_key_policy,
        }
    }

    /// Begin a struct declaration.
    pub fn structure(&self, name: impl Into<String>) -> StructBuilder {
        StructBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Begin an enum declaration over `repr`.
    pub fn enumeration(&self, name: impl Into<String>, repr: IntRepr) -> EnumBuilder {
        EnumBuilder {
            name: name.into(),
            repr,
            variants: Vec::new(),
        }
    }

    /// Begin a union declaration.
    pub fn union(&self, name: impl Into<String>) -> UnionBuilder {
        UnionBuilder {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Declare `map<key><value>`, rejecting key types the policy does not admit.
    pub fn map(&self, key: TypeDescriptor, value: TypeDescriptor) -> Result<TypeDescriptor, SchemaError> {
        if !key.is_legal_map_key(self.map_key_policy) {
            return Err(SchemaError::IllegalMapKey {
                kind: key.to_string(),
            });
        }
        Ok(TypeDescriptor::Map(Arc::new(MapSchema { key, value })))
    }
}

/// Ordered field registration for a struct.
#[derive(Debug, Clone)]
#[must_use]
pub struct StructBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl StructBuilder {
    /// Append a field. Fields are encoded in the order they are added.
    pub fn field(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.fields.push(FieldDescriptor::new(name, ty));
        self
    }

    /// Finish the declaration.
    pub fn build(self) -> Result<Arc<StructSchema>, SchemaError> {
        let schema = StructSchema::new(self.name, self.fields)?;
        tracing::debug!(name = schema.name(), fields = schema.field_count(), "declared struct");
        Ok(Arc::new(schema))
    }
}

/// Ordered variant registration for an enum.
#[derive(Debug, Clone)]
#[must_use]
pub struct EnumBuilder {
    name: String,
    repr: IntRepr,
    variants: Vec<EnumVariant>,
}

impl EnumBuilder {
    /// Append a named value.
    pub fn variant(mut self, name: impl Into<String>, value: i64) -> Self {
        self.variants.push(EnumVariant {
            name: name.into(),
            value,
        });
        self
    }

    /// Finish the declaration.
    pub fn build(self) -> Result<Arc<EnumSchema>, SchemaError> {
        let schema = EnumSchema::new(self.name, self.repr, self.variants)?;
        tracing::debug!(
            name = schema.name(),
            repr = %schema.repr(),
            variants = schema.variants().len(),
            "declared enum"
        );
        Ok(Arc::new(schema))
    }
}

/// Ordered member registration for a union. Position is the wire tag.
#[derive(Debug, Clone)]
#[must_use]
pub struct UnionBuilder {
    name: String,
    members: Vec<TypeDescriptor>,
}

impl UnionBuilder {
    /// Append a member.
    pub fn member(mut self, ty: TypeDescriptor) -> Self {
        self.members.push(ty);
        self
    }

    /// Finish the declaration.
    pub fn build(self) -> Result<Arc<UnionSchema>, SchemaError> {
        let schema = UnionSchema::new(self.name, self.members)?;
        tracing::debug!(name = schema.name(), members = schema.members().len(), "declared union");
        Ok(Arc::new(schema))
    }
}

/// A freshly allocated default for `desc`, or `None` if the type has no
/// meaningful default (`void`, enums, unions, and anything containing one
/// in a position that cannot be left empty).
pub fn zero_value(desc: &TypeDescriptor) -> Option<Value> {
    match desc {
        TypeDescriptor::Void | TypeDescriptor::Enum(_) | TypeDescriptor::Union(_) => None,
        TypeDescriptor::Bool => Some(Value::Bool(false)),
        TypeDescriptor::FixedInt { signed: true, .. } | TypeDescriptor::VarInt { signed: true } => {
            Some(Value::Int(0))
        }
        TypeDescriptor::FixedInt { signed: false, .. } | TypeDescriptor::VarInt { signed: false } => {
            Some(Value::Uint(0))
        }
        TypeDescriptor::Float { width } => Some(match width {
            FloatWidth::W32 => Value::F32(0.0),
            FloatWidth::W64 => Value::F64(0.0),
        }),
        TypeDescriptor::String => Some(Value::String(String::new())),
        TypeDescriptor::Data { fixed_length } => Some(Value::Data(vec![0; fixed_length.unwrap_or(0)])),
        TypeDescriptor::Optional { .. } => Some(Value::Optional(None)),
        TypeDescriptor::Array { fixed_length: None, .. } => Some(Value::Array(Vec::new())),
        TypeDescriptor::Array { element, fixed_length: Some(n) } => (0..*n)
            .map(|_| zero_value(element))
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        TypeDescriptor::Map(schema) => Some(Value::Map(MapValue::new(schema))),
        TypeDescriptor::Struct(schema) => schema
            .fields()
            .iter()
            .map(|f| zero_value(&f.ty))
            .collect::<Option<Vec<_>>>()
            .map(|values| Value::Struct(StructValue::from_parts(Arc::clone(schema), values))),
    }
}
