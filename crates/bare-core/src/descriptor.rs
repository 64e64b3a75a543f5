//! # Type Descriptors — The Schema Model
//!
//! A [`TypeDescriptor`] describes exactly one wire type. It is a closed enum
//! with one variant per wire kind, each carrying only its own parameters,
//! so every consumer dispatches with an exhaustive `match`.
//!
//! ## Sharing
//!
//! Descriptors are immutable once built. Composite parameters sit behind
//! `Arc`, which makes a descriptor cheap to clone and safe to read from many
//! threads at once without locking. Struct, union, and map values keep an
//! `Arc` to the schema they were built from.
//!
//! ## Declaration invariants
//!
//! [`StructSchema`], [`EnumSchema`], and [`UnionSchema`] can only be built
//! through checked constructors (and the [`SchemaBuilder`](crate::SchemaBuilder)
//! that wraps them). Deserializing a descriptor tree re-runs the same checks.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::MapKeyPolicy;
use crate::error::SchemaError;

/// Width of a fixed-size integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntWidth {
    /// 8 bits.
    #[serde(rename = "8")]
    W8,
    /// 16 bits.
    #[serde(rename = "16")]
    W16,
    /// 32 bits.
    #[serde(rename = "32")]
    W32,
    /// 64 bits.
    #[serde(rename = "64")]
    W64,
}

impl IntWidth {
    /// Width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    /// Width in bytes on the wire.
    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Look up a width by bit count.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Self::W8),
            16 => Some(Self::W16),
            32 => Some(Self::W32),
            64 => Some(Self::W64),
            _ => None,
        }
    }
}

/// Width of an IEEE-754 float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloatWidth {
    /// Single precision.
    #[serde(rename = "32")]
    W32,
    /// Double precision.
    #[serde(rename = "64")]
    W64,
}

/// Inclusive range of an integer kind. `None` width means the 64-bit varint domain.
pub(crate) fn int_range(width: Option<IntWidth>, signed: bool) -> (i128, i128) {
    let bits = width.map_or(64, IntWidth::bits);
    if signed {
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    } else {
        (0, (1i128 << bits) - 1)
    }
}

/// The integer type underlying an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "encoding", rename_all = "snake_case")]
pub enum IntRepr {
    /// Little-endian fixed width.
    Fixed {
        /// Integer width.
        width: IntWidth,
        /// Two's complement when set.
        signed: bool,
    },
    /// Varint (zigzag when signed).
    Var {
        /// Zigzag-mapped when set.
        signed: bool,
    },
}

impl IntRepr {
    /// `uint`, the conventional enum representation.
    pub const UINT: Self = Self::Var { signed: false };
    /// `int`.
    pub const INT: Self = Self::Var { signed: true };
    /// `u8`.
    pub const U8: Self = Self::Fixed {
        width: IntWidth::W8,
        signed: false,
    };
    /// `u16`.
    pub const U16: Self = Self::Fixed {
        width: IntWidth::W16,
        signed: false,
    };
    /// `u32`.
    pub const U32: Self = Self::Fixed {
        width: IntWidth::W32,
        signed: false,
    };
    /// `i32`.
    pub const I32: Self = Self::Fixed {
        width: IntWidth::W32,
        signed: true,
    };

    /// Whether values of this representation are signed.
    pub const fn is_signed(self) -> bool {
        match self {
            Self::Fixed { signed, .. } | Self::Var { signed } => signed,
        }
    }

    /// Inclusive value range.
    pub(crate) fn range(self) -> (i128, i128) {
        match self {
            Self::Fixed { width, signed } => int_range(Some(width), signed),
            Self::Var { signed } => int_range(None, signed),
        }
    }

    /// The descriptor with the same wire form.
    pub fn descriptor(self) -> TypeDescriptor {
        match self {
            Self::Fixed { width, signed } => TypeDescriptor::FixedInt { width, signed },
            Self::Var { signed } => TypeDescriptor::VarInt { signed },
        }
    }
}

impl fmt::Display for IntRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.descriptor(), f)
    }
}

/// An immutable schema node describing one wire type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// Zero bytes on the wire.
    Void,
    /// One byte, `0x00` or `0x01`.
    Bool,
    /// Little-endian fixed-width integer.
    FixedInt {
        /// Integer width.
        width: IntWidth,
        /// Two's complement when set.
        signed: bool,
    },
    /// Arbitrary-range `uint`/`int`, always varint encoded.
    VarInt {
        /// Zigzag-mapped when set.
        signed: bool,
    },
    /// IEEE-754 little-endian float.
    Float {
        /// Float width.
        width: FloatWidth,
    },
    /// Length-prefixed UTF-8 string.
    String,
    /// Raw bytes, length-prefixed unless a fixed length is declared.
    Data {
        /// Schema-only length; never written to the wire.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fixed_length: Option<usize>,
    },
    /// Presence byte followed by the payload when present.
    Optional {
        /// Payload type.
        inner: Arc<TypeDescriptor>,
    },
    /// Sequence of elements, count-prefixed unless a fixed length is declared.
    Array {
        /// Element type.
        element: Arc<TypeDescriptor>,
        /// Schema-only length; never written to the wire.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fixed_length: Option<usize>,
    },
    /// Count-prefixed key/value pairs in insertion order.
    Map(Arc<MapSchema>),
    /// Varint member index followed by the member's payload.
    Union(Arc<UnionSchema>),
    /// Concatenation of fields in declared order.
    Struct(Arc<StructSchema>),
    /// An integer restricted to a declared value set.
    Enum(Arc<EnumSchema>),
}

impl TypeDescriptor {
    /// `u8`.
    pub fn u8() -> Self {
        Self::FixedInt { width: IntWidth::W8, signed: false }
    }
    /// `u16`.
    pub fn u16() -> Self {
        Self::FixedInt { width: IntWidth::W16, signed: false }
    }
    /// `u32`.
    pub fn u32() -> Self {
        Self::FixedInt { width: IntWidth::W32, signed: false }
    }
    /// `u64`.
    pub fn u64() -> Self {
        Self::FixedInt { width: IntWidth::W64, signed: false }
    }
    /// `i8`.
    pub fn i8() -> Self {
        Self::FixedInt { width: IntWidth::W8, signed: true }
    }
    /// `i16`.
    pub fn i16() -> Self {
        Self::FixedInt { width: IntWidth::W16, signed: true }
    }
    /// `i32`.
    pub fn i32() -> Self {
        Self::FixedInt { width: IntWidth::W32, signed: true }
    }
    /// `i64`.
    pub fn i64() -> Self {
        Self::FixedInt { width: IntWidth::W64, signed: true }
    }
    /// `uint`.
    pub fn uint() -> Self {
        Self::VarInt { signed: false }
    }
    /// `int`.
    pub fn int() -> Self {
        Self::VarInt { signed: true }
    }
    /// `f32`.
    pub fn f32() -> Self {
        Self::Float { width: FloatWidth::W32 }
    }
    /// `f64`.
    pub fn f64() -> Self {
        Self::Float { width: FloatWidth::W64 }
    }
    /// `str`.
    pub fn string() -> Self {
        Self::String
    }
    /// Variable-length `data`.
    pub fn data() -> Self {
        Self::Data { fixed_length: None }
    }
    /// `data[len]`.
    pub fn data_fixed(len: usize) -> Self {
        Self::Data { fixed_length: Some(len) }
    }
    /// `optional<inner>`.
    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::Optional { inner: Arc::new(inner) }
    }
    /// `list<element>`.
    pub fn array(element: TypeDescriptor) -> Self {
        Self::Array { element: Arc::new(element), fixed_length: None }
    }
    /// `list<element>[len]`.
    pub fn array_fixed(element: TypeDescriptor, len: usize) -> Self {
        Self::Array { element: Arc::new(element), fixed_length: Some(len) }
    }
    /// `map<key><value>`, without the key-type check.
    ///
    /// Use [`SchemaBuilder::map`](crate::SchemaBuilder::map) to reject
    /// illegal key types at declaration time.
    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Map(Arc::new(MapSchema { key, value }))
    }

    /// The struct schema, if this is a struct descriptor.
    pub fn as_struct(&self) -> Option<&Arc<StructSchema>> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// The union schema, if this is a union descriptor.
    pub fn as_union(&self) -> Option<&Arc<UnionSchema>> {
        match self {
            Self::Union(u) => Some(u),
            _ => None,
        }
    }

    /// The map schema, if this is a map descriptor.
    pub fn as_map(&self) -> Option<&Arc<MapSchema>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// The enum schema, if this is an enum descriptor.
    pub fn as_enum(&self) -> Option<&Arc<EnumSchema>> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Short name of the wire kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::FixedInt { .. } => "fixed-width integer",
            Self::VarInt { .. } => "varint",
            Self::Float { .. } => "float",
            Self::String => "string",
            Self::Data { .. } => "data",
            Self::Optional { .. } => "optional",
            Self::Array { .. } => "array",
            Self::Map(_) => "map",
            Self::Union(_) => "union",
            Self::Struct(_) => "struct",
            Self::Enum(_) => "enum",
        }
    }

    /// Whether every value of this type encodes to zero bytes.
    pub fn is_zero_sized(&self) -> bool {
        match self {
            Self::Void => true,
            Self::Data { fixed_length: Some(n) } => *n == 0,
            Self::Array {
                element,
                fixed_length: Some(n),
            } => *n == 0 || element.is_zero_sized(),
            Self::Struct(s) => s.fields().iter().all(|f| f.ty.is_zero_sized()),
            _ => false,
        }
    }

    /// Whether this descriptor may key a map under `policy`.
    ///
    /// Keys need a total, stable equality: strings, bools, and integer kinds
    /// always qualify; `data` only under [`MapKeyPolicy::Permissive`].
    pub fn is_legal_map_key(&self, policy: MapKeyPolicy) -> bool {
        match self {
            Self::String
            | Self::Bool
            | Self::FixedInt { .. }
            | Self::VarInt { .. }
            | Self::Enum(_) => true,
            Self::Data { .. } => policy == MapKeyPolicy::Permissive,
            Self::Void
            | Self::Float { .. }
            | Self::Optional { .. }
            | Self::Array { .. }
            | Self::Map(_)
            | Self::Union(_)
            | Self::Struct(_) => false,
        }
    }
}

impl From<Arc<StructSchema>> for TypeDescriptor {
    fn from(schema: Arc<StructSchema>) -> Self {
        Self::Struct(schema)
    }
}

impl From<Arc<UnionSchema>> for TypeDescriptor {
    fn from(schema: Arc<UnionSchema>) -> Self {
        Self::Union(schema)
    }
}

impl From<Arc<EnumSchema>> for TypeDescriptor {
    fn from(schema: Arc<EnumSchema>) -> Self {
        Self::Enum(schema)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Bool => f.write_str("bool"),
            Self::FixedInt { width, signed } => {
                write!(f, "{}{}", if *signed { 'i' } else { 'u' }, width.bits())
            }
            Self::VarInt { signed: true } => f.write_str("int"),
            Self::VarInt { signed: false } => f.write_str("uint"),
            Self::Float { width: FloatWidth::W32 } => f.write_str("f32"),
            Self::Float { width: FloatWidth::W64 } => f.write_str("f64"),
            Self::String => f.write_str("str"),
            Self::Data { fixed_length: None } => f.write_str("data"),
            Self::Data { fixed_length: Some(n) } => write!(f, "data[{n}]"),
            Self::Optional { inner } => write!(f, "optional<{inner}>"),
            Self::Array { element, fixed_length: None } => write!(f, "list<{element}>"),
            Self::Array { element, fixed_length: Some(n) } => write!(f, "list<{element}>[{n}]"),
            Self::Map(m) => write!(f, "map<{}><{}>", m.key, m.value),
            Self::Union(u) => f.write_str(&u.name),
            Self::Struct(s) => f.write_str(&s.name),
            Self::Enum(e) => f.write_str(&e.name),
        }
    }
}

/// Key and value types of a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSchema {
    /// Key type.
    pub key: TypeDescriptor,
    /// Value type.
    pub value: TypeDescriptor,
}

/// A named field of a struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

impl FieldDescriptor {
    /// Create a field.
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self { name: name.into(), ty }
    }
}

/// An ordered list of named fields. Declaration order is wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StructDecl")]
pub struct StructSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
}

#[derive(Deserialize)]
struct StructDecl {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl TryFrom<StructDecl> for StructSchema {
    type Error = SchemaError;

    fn try_from(decl: StructDecl) -> Result<Self, Self::Error> {
        Self::new(decl.name, decl.fields)
    }
}

impl StructSchema {
    /// Create a struct schema, rejecting duplicate field names.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut seen = BTreeSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    schema: name,
                    field: field.name.clone(),
                });
            }
        }
        Ok(Self { name, fields })
    }

    /// Struct name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declared (wire) order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position of a field by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Render the full declaration, e.g. `type Person struct { id: u32 name: str }`.
    pub fn declaration(&self) -> String {
        let body: Vec<String> = self.fields.iter().map(|f| format!("{}: {}", f.name, f.ty)).collect();
        format!("type {} struct {{ {} }}", self.name, body.join(" "))
    }
}

/// An ordered list of member types. A member's position is its wire tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UnionDecl")]
pub struct UnionSchema {
    name: String,
    members: Vec<TypeDescriptor>,
}

#[derive(Deserialize)]
struct UnionDecl {
    name: String,
    members: Vec<TypeDescriptor>,
}

impl TryFrom<UnionDecl> for UnionSchema {
    type Error = SchemaError;

    fn try_from(decl: UnionDecl) -> Result<Self, Self::Error> {
        Self::new(decl.name, decl.members)
    }
}

impl UnionSchema {
    /// Create a union schema. At least one member is required.
    pub fn new(name: impl Into<String>, members: Vec<TypeDescriptor>) -> Result<Self, SchemaError> {
        let name = name.into();
        if members.is_empty() {
            return Err(SchemaError::EmptyUnion { name });
        }
        Ok(Self { name, members })
    }

    /// Union name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in tag order.
    pub fn members(&self) -> &[TypeDescriptor] {
        &self.members
    }

    /// Member for a wire tag.
    pub fn member(&self, tag: usize) -> Option<&TypeDescriptor> {
        self.members.get(tag)
    }

    /// Render the full declaration, e.g. `type Shape union { Circle | Square }`.
    pub fn declaration(&self) -> String {
        let body: Vec<String> = self.members.iter().map(ToString::to_string).collect();
        format!("type {} union {{ {} }}", self.name, body.join(" | "))
    }
}

/// One named value of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumVariant {
    /// Variant name.
    pub name: String,
    /// Integer value.
    pub value: i64,
}

/// An integer type restricted to a declared set of named values.
///
/// The set is enforced at validation time only; on the wire an enum is
/// indistinguishable from its underlying integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EnumDecl")]
pub struct EnumSchema {
    name: String,
    repr: IntRepr,
    variants: Vec<EnumVariant>,
    #[serde(skip)]
    allowed: BTreeSet<i64>,
}

#[derive(Deserialize)]
struct EnumDecl {
    name: String,
    repr: IntRepr,
    variants: Vec<EnumVariant>,
}

impl TryFrom<EnumDecl> for EnumSchema {
    type Error = SchemaError;

    fn try_from(decl: EnumDecl) -> Result<Self, Self::Error> {
        Self::new(decl.name, decl.repr, decl.variants)
    }
}

impl EnumSchema {
    /// Create an enum schema.
    ///
    /// Fails if there are no variants, if a name or value repeats, or if a
    /// value does not fit `repr`.
    pub fn new(
        name: impl Into<String>,
        repr: IntRepr,
        variants: Vec<EnumVariant>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        if variants.is_empty() {
            return Err(SchemaError::EmptyEnum { name });
        }

        let (min, max) = repr.range();
        let mut allowed = BTreeSet::new();
        let mut names = BTreeSet::new();
        for (i, variant) in variants.iter().enumerate() {
            if !names.insert(variant.name.as_str()) {
                return Err(SchemaError::DuplicateEnumName {
                    name,
                    variant: variant.name.clone(),
                });
            }
            let v = i128::from(variant.value);
            if v < min || v > max {
                return Err(SchemaError::EnumValueOutOfRange {
                    name,
                    variant: variant.name.clone(),
                    value: variant.value,
                    repr: repr.to_string(),
                });
            }
            if !allowed.insert(variant.value) {
                let first = variants[..i]
                    .iter()
                    .find(|v| v.value == variant.value)
                    .map(|v| v.name.clone())
                    .unwrap_or_default();
                return Err(SchemaError::DuplicateEnumValue {
                    name,
                    value: variant.value,
                    first,
                    second: variant.name.clone(),
                });
            }
        }

        Ok(Self {
            name,
            repr,
            variants,
            allowed,
        })
    }

    /// Enum name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying integer type.
    pub fn repr(&self) -> IntRepr {
        self.repr
    }

    /// Variants in declared order.
    pub fn variants(&self) -> &[EnumVariant] {
        &self.variants
    }

    /// Whether `value` is a declared member.
    pub fn contains(&self, value: i64) -> bool {
        self.allowed.contains(&value)
    }

    /// Value of a named variant.
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.variants.iter().find(|v| v.name == name).map(|v| v.value)
    }

    /// Name of the variant with `value`.
    pub fn name_of(&self, value: i64) -> Option<&str> {
        self.variants.iter().find(|v| v.value == value).map(|v| v.name.as_str())
    }

    /// Render the full declaration, e.g. `type Color enum : uint { RED = 0 }`.
    pub fn declaration(&self) -> String {
        let body: Vec<String> = self
            .variants
            .iter()
            .map(|v| format!("{} = {}", v.name, v.value))
            .collect();
        format!("type {} enum : {} {{ {} }}", self.name, self.repr, body.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(name: &str, value: i64) -> EnumVariant {
        EnumVariant {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn display_uses_schema_notation() {
        assert_eq!(TypeDescriptor::u32().to_string(), "u32");
        assert_eq!(TypeDescriptor::i8().to_string(), "i8");
        assert_eq!(TypeDescriptor::uint().to_string(), "uint");
        assert_eq!(TypeDescriptor::data_fixed(16).to_string(), "data[16]");
        assert_eq!(
            TypeDescriptor::optional(TypeDescriptor::string()).to_string(),
            "optional<str>"
        );
        assert_eq!(
            TypeDescriptor::array_fixed(TypeDescriptor::f64(), 3).to_string(),
            "list<f64>[3]"
        );
        assert_eq!(
            TypeDescriptor::map(TypeDescriptor::string(), TypeDescriptor::uint()).to_string(),
            "map<str><uint>"
        );
    }

    #[test]
    fn int_ranges() {
        assert_eq!(int_range(Some(IntWidth::W8), false), (0, 255));
        assert_eq!(int_range(Some(IntWidth::W8), true), (-128, 127));
        assert_eq!(int_range(None, false), (0, u64::MAX as i128));
        assert_eq!(int_range(None, true), (i64::MIN as i128, i64::MAX as i128));
    }

    #[test]
    fn struct_rejects_duplicate_fields() {
        let err = StructSchema::new(
            "Point",
            vec![
                FieldDescriptor::new("x", TypeDescriptor::i32()),
                FieldDescriptor::new("x", TypeDescriptor::i32()),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
    }

    #[test]
    fn struct_field_lookup_preserves_order() {
        let schema = StructSchema::new(
            "Person",
            vec![
                FieldDescriptor::new("id", TypeDescriptor::u32()),
                FieldDescriptor::new("name", TypeDescriptor::string()),
            ],
        )
        .unwrap();
        assert_eq!(schema.field_index("name"), Some(1));
        assert_eq!(schema.field("id").map(|f| &f.ty), Some(&TypeDescriptor::u32()));
        assert_eq!(schema.declaration(), "type Person struct { id: u32 name: str }");
    }

    #[test]
    fn enum_rejects_repeated_values() {
        let err = EnumSchema::new(
            "Color",
            IntRepr::UINT,
            vec![variant("RED", 0), variant("GREEN", 1), variant("CRIMSON", 0)],
        )
        .unwrap_err();
        match err {
            SchemaError::DuplicateEnumValue { value, first, second, .. } => {
                assert_eq!(value, 0);
                assert_eq!(first, "RED");
                assert_eq!(second, "CRIMSON");
            }
            other => panic!("expected DuplicateEnumValue, got: {other}"),
        }
    }

    #[test]
    fn enum_rejects_values_outside_repr() {
        let err = EnumSchema::new("Small", IntRepr::U8, vec![variant("BIG", 256)]).unwrap_err();
        assert!(matches!(err, SchemaError::EnumValueOutOfRange { .. }));

        let err = EnumSchema::new("Unsigned", IntRepr::UINT, vec![variant("NEG", -1)]).unwrap_err();
        assert!(matches!(err, SchemaError::EnumValueOutOfRange { .. }));
    }

    #[test]
    fn enum_rejects_empty_and_duplicate_names() {
        assert!(matches!(
            EnumSchema::new("E", IntRepr::UINT, vec![]),
            Err(SchemaError::EmptyEnum { .. })
        ));
        assert!(matches!(
            EnumSchema::new("E", IntRepr::UINT, vec![variant("A", 0), variant("A", 1)]),
            Err(SchemaError::DuplicateEnumName { .. })
        ));
    }

    #[test]
    fn enum_lookups() {
        let e = EnumSchema::new("Color", IntRepr::UINT, vec![variant("RED", 0), variant("BLUE", 2)])
            .unwrap();
        assert!(e.contains(2));
        assert!(!e.contains(1));
        assert_eq!(e.value_of("BLUE"), Some(2));
        assert_eq!(e.name_of(0), Some("RED"));
        assert_eq!(e.declaration(), "type Color enum : uint { RED = 0 BLUE = 2 }");
    }

    #[test]
    fn union_requires_members() {
        assert!(matches!(
            UnionSchema::new("Empty", vec![]),
            Err(SchemaError::EmptyUnion { .. })
        ));
    }

    #[test]
    fn map_key_legality() {
        use MapKeyPolicy::{Permissive, Strict};
        assert!(TypeDescriptor::string().is_legal_map_key(Strict));
        assert!(TypeDescriptor::u8().is_legal_map_key(Strict));
        assert!(TypeDescriptor::Bool.is_legal_map_key(Strict));
        assert!(!TypeDescriptor::data().is_legal_map_key(Strict));
        assert!(TypeDescriptor::data().is_legal_map_key(Permissive));
        assert!(!TypeDescriptor::f64().is_legal_map_key(Permissive));
        assert!(!TypeDescriptor::Void.is_legal_map_key(Permissive));
        assert!(!TypeDescriptor::optional(TypeDescriptor::u8()).is_legal_map_key(Permissive));
    }

    #[test]
    fn zero_sized_types() {
        let empty = TypeDescriptor::Struct(Arc::new(StructSchema::new("Empty", vec![]).unwrap()));
        assert!(TypeDescriptor::Void.is_zero_sized());
        assert!(empty.is_zero_sized());
        assert!(TypeDescriptor::data_fixed(0).is_zero_sized());
        assert!(TypeDescriptor::array_fixed(TypeDescriptor::u8(), 0).is_zero_sized());
        assert!(TypeDescriptor::array_fixed(empty, 4).is_zero_sized());
        assert!(!TypeDescriptor::array(TypeDescriptor::Void).is_zero_sized());
        assert!(!TypeDescriptor::optional(TypeDescriptor::Void).is_zero_sized());
        assert!(!TypeDescriptor::u8().is_zero_sized());
    }

    #[test]
    fn descriptor_json_round_trip() {
        let person = StructSchema::new(
            "Person",
            vec![
                FieldDescriptor::new("id", TypeDescriptor::u32()),
                FieldDescriptor::new("tags", TypeDescriptor::array(TypeDescriptor::string())),
            ],
        )
        .unwrap();
        let desc = TypeDescriptor::Struct(Arc::new(person));
        let json = serde_json::to_string(&desc).unwrap();
        let back: TypeDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, desc);
    }

    #[test]
    fn enum_json_round_trip_rebuilds_allowed_set() {
        let e = EnumSchema::new("Color", IntRepr::U8, vec![variant("RED", 1), variant("BLUE", 2)])
            .unwrap();
        let desc = TypeDescriptor::Enum(Arc::new(e));
        let json = serde_json::to_string(&desc).unwrap();
        let back: TypeDescriptor = serde_json::from_str(&json).unwrap();
        match &back {
            TypeDescriptor::Enum(e) => assert!(e.contains(2)),
            other => panic!("expected enum, got {other}"),
        }
        assert_eq!(back, desc);
    }

    #[test]
    fn deserialization_rechecks_declarations() {
        let json = r#"{"kind":"enum","name":"E","repr":{"encoding":"var","signed":false},
            "variants":[{"name":"A","value":1},{"name":"B","value":1}]}"#;
        assert!(serde_json::from_str::<TypeDescriptor>(json).is_err());

        let json = r#"{"kind":"union","name":"U","members":[]}"#;
        assert!(serde_json::from_str::<TypeDescriptor>(json).is_err());
    }

    #[test]
    fn scalar_json_shape() {
        let json = serde_json::to_value(TypeDescriptor::u16()).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "fixed_int", "width": "16", "signed": false}));
    }
}
