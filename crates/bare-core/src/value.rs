//! # Runtime Values
//!
//! A [`Value`] is the dynamic counterpart of a [`TypeDescriptor`]. Scalars,
//! strings, data, optionals, and arrays carry no schema. Struct, union, and
//! map values keep an `Arc` to the schema they were built from so that every
//! later mutation can be re-validated against it.
//!
//! Integer kinds are strict: signed descriptors (`i8..i64`, `int`, signed
//! enums) take [`Value::Int`]; unsigned ones take [`Value::Uint`]. The decoder
//! always produces the native variant.
//!
//! None of the composite values can be observed in an invalid state. Their
//! constructors and mutators validate first and change nothing on failure.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::config::{CodecConfig, MapKeyPolicy};
use crate::descriptor::{MapSchema, StructSchema, TypeDescriptor, UnionSchema};
use crate::error::ValidationError;
use crate::schema::zero_value;
use crate::validate::Validator;

/// A runtime value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The single value of `void`.
    Void,
    /// `bool`.
    Bool(bool),
    /// Any signed integer kind.
    Int(i64),
    /// Any unsigned integer kind.
    Uint(u64),
    /// `f32`.
    F32(f32),
    /// `f64`.
    F64(f64),
    /// `str`.
    String(String),
    /// `data` and `data[n]`.
    Data(Vec<u8>),
    /// `optional<T>`; `None` is absent.
    Optional(Option<Box<Value>>),
    /// `list<T>` and `list<T>[n]`.
    Array(Vec<Value>),
    /// `map<K><V>`.
    Map(MapValue),
    /// A union instance.
    Union(UnionValue),
    /// A struct instance.
    Struct(StructValue),
}

impl Value {
    /// An absent optional.
    pub fn none() -> Self {
        Self::Optional(None)
    }

    /// A present optional.
    pub fn some(value: impl Into<Value>) -> Self {
        Self::Optional(Some(Box::new(value.into())))
    }

    /// Short name of the value's native kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool(_) => "bool",
            Self::Int(_) => "signed integer",
            Self::Uint(_) => "unsigned integer",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::String(_) => "string",
            Self::Data(_) => "data",
            Self::Optional(_) => "optional",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Union(_) => "union",
            Self::Struct(_) => "struct",
        }
    }

    /// Signed integer payload.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Unsigned integer payload.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// String payload.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Struct payload.
    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Render as JSON for inspection tooling.
    ///
    /// Data becomes a lowercase hex string, absent optionals become `null`,
    /// non-finite floats become `null`, and a union becomes
    /// `{"tag": n, "value": ...}`. Map keys are rendered as strings.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Self::Void => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Int(v) => Json::from(*v),
            Self::Uint(v) => Json::from(*v),
            Self::F32(v) => float_json(f64::from(*v)),
            Self::F64(v) => float_json(*v),
            Self::String(s) => Json::String(s.clone()),
            Self::Data(d) => Json::String(to_hex(d)),
            Self::Optional(None) => Json::Null,
            Self::Optional(Some(inner)) => inner.to_json(),
            Self::Array(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Self::Map(m) => Json::Object(
                m.iter()
                    .map(|(k, v)| (k.json_key(), v.to_json()))
                    .collect(),
            ),
            Self::Union(u) => serde_json::json!({
                "tag": u.tag(),
                "value": u.value().to_json(),
            }),
            Self::Struct(s) => Json::Object(
                s.fields()
                    .map(|(name, v)| (name.to_string(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

fn float_json(v: f64) -> serde_json::Value {
    serde_json::Number::from_f64(v)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

pub(crate) fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($t:ty),+) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::$variant(<$target>::from(v))
            }
        })+
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64);
impl_from_int!(Uint, u64, u8, u16, u32, u64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Data(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<StructValue> for Value {
    fn from(v: StructValue) -> Self {
        Self::Struct(v)
    }
}

impl From<UnionValue> for Value {
    fn from(v: UnionValue) -> Self {
        Self::Union(v)
    }
}

impl From<MapValue> for Value {
    fn from(v: MapValue) -> Self {
        Self::Map(v)
    }
}

// ---------------------------------------------------------------------------
// Map keys
// ---------------------------------------------------------------------------

/// The hashable subset of [`Value`] that may key a map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
    /// `bool` key.
    Bool(bool),
    /// Signed integer or signed enum key.
    Int(i64),
    /// Unsigned integer or unsigned enum key.
    Uint(u64),
    /// `str` key.
    String(String),
    /// `data` key (permissive policy only).
    Data(Vec<u8>),
}

impl MapKey {
    /// Convert a value into a key, if its kind is hashable.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Int(v) => Some(Self::Int(*v)),
            Value::Uint(v) => Some(Self::Uint(*v)),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Data(d) => Some(Self::Data(d.clone())),
            _ => None,
        }
    }

    /// The key as a value, for validation and encoding against the key descriptor.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(v) => Value::Int(*v),
            Self::Uint(v) => Value::Uint(*v),
            Self::String(s) => Value::String(s.clone()),
            Self::Data(d) => Value::Data(d.clone()),
        }
    }

    fn json_key(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Data(d) => to_hex(d),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Data(d) => write!(f, "0x{}", to_hex(d)),
        }
    }
}

impl From<&str> for MapKey {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for MapKey {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<bool> for MapKey {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for MapKey {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for MapKey {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<Vec<u8>> for MapKey {
    fn from(v: Vec<u8>) -> Self {
        Self::Data(v)
    }
}

// ---------------------------------------------------------------------------
// Map values
// ---------------------------------------------------------------------------

/// An insertion-ordered map bound to its [`MapSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapValue {
    schema: Arc<MapSchema>,
    entries: IndexMap<MapKey, Value>,
}

impl MapValue {
    /// An empty map.
    pub fn new(schema: &Arc<MapSchema>) -> Self {
        Self {
            schema: Arc::clone(schema),
            entries: IndexMap::new(),
        }
    }

    /// Build a map from entries, validating each one. A repeated key keeps
    /// its first position and takes the last value. Key types are admitted
    /// as in [`insert`](Self::insert).
    pub fn from_entries<I>(schema: &Arc<MapSchema>, entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (MapKey, Value)>,
    {
        let validator = entry_validator();
        let mut map = Self::new(schema);
        for (key, value) in entries {
            map.insert_with(&validator, key, value)?;
        }
        Ok(map)
    }

    /// The schema this map is bound to.
    pub fn schema(&self) -> &Arc<MapSchema> {
        &self.schema
    }

    /// Insert an entry after validating the key and value. Returns the
    /// previous value for the key, if any.
    ///
    /// Any key type some [`MapKeyPolicy`] admits is accepted here, so maps
    /// with `data` keys can be filled. The encoder and decoder enforce their
    /// configured policy. Use [`insert_with`](Self::insert_with) to apply a
    /// specific policy at insertion.
    pub fn insert(
        &mut self,
        key: impl Into<MapKey>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, ValidationError> {
        self.insert_with(&entry_validator(), key.into(), value.into())
    }

    /// [`insert`](Self::insert) with an explicitly configured validator.
    pub fn insert_with(
        &mut self,
        validator: &Validator,
        key: MapKey,
        value: Value,
    ) -> Result<Option<Value>, ValidationError> {
        validator.validate_entry(&self.schema, &key, &value)?;
        Ok(self.entries.insert(key, value))
    }

    /// Remove an entry, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &MapKey) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Look up a key.
    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&MapKey, &Value)> {
        self.entries.iter()
    }

    /// Append an already-validated entry. Returns `false` if the key exists.
    pub(crate) fn push_unique(&mut self, key: MapKey, value: Value) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value);
        true
    }
}

fn entry_validator() -> Validator {
    Validator::new(CodecConfig::default().with_map_key_policy(MapKeyPolicy::Permissive))
}

// ---------------------------------------------------------------------------
// Union values
// ---------------------------------------------------------------------------

/// A union instance: one value plus the member it was matched to.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionValue {
    schema: Arc<UnionSchema>,
    tag: usize,
    value: Box<Value>,
}

impl UnionValue {
    /// Wrap `value`, selecting the first member that accepts it.
    pub fn new(schema: &Arc<UnionSchema>, value: impl Into<Value>) -> Result<Self, ValidationError> {
        Self::new_with(&Validator::default(), schema, value.into())
    }

    /// [`new`](Self::new) with an explicitly configured validator.
    pub fn new_with(
        validator: &Validator,
        schema: &Arc<UnionSchema>,
        value: Value,
    ) -> Result<Self, ValidationError> {
        let tag = validator.select_member(schema, &value)?;
        Ok(Self {
            schema: Arc::clone(schema),
            tag,
            value: Box::new(value),
        })
    }

    /// Wrap `value` as member `tag`, checking it against that member only.
    /// The decoder uses this so the tag read from the wire is kept.
    pub(crate) fn with_tag(
        validator: &Validator,
        schema: &Arc<UnionSchema>,
        tag: usize,
        value: Value,
    ) -> Result<Self, ValidationError> {
        let member = schema.member(tag).ok_or_else(|| ValidationError::NoMatchingMember {
            union: schema.name().to_string(),
        })?;
        validator.validate(member, &value)?;
        Ok(Self {
            schema: Arc::clone(schema),
            tag,
            value: Box::new(value),
        })
    }

    /// The schema this union is bound to.
    pub fn schema(&self) -> &Arc<UnionSchema> {
        &self.schema
    }

    /// Zero-based index of the selected member.
    pub fn tag(&self) -> usize {
        self.tag
    }

    /// The wrapped value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Unwrap the inner value.
    pub fn into_value(self) -> Value {
        *self.value
    }
}

// ---------------------------------------------------------------------------
// Struct values
// ---------------------------------------------------------------------------

/// A struct instance. Field values are stored in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    schema: Arc<StructSchema>,
    values: Vec<Value>,
}

impl StructValue {
    /// Build an instance from named field values.
    ///
    /// Omitted fields take their type's zero value. Fails without producing
    /// an instance if a name is unknown, a field without a zero value is
    /// omitted, or any supplied value is invalid.
    pub fn new<I, K>(schema: &Arc<StructSchema>, fields: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        Self::new_with(&Validator::default(), schema, fields)
    }

    /// [`new`](Self::new) with an explicitly configured validator.
    pub fn new_with<I, K>(
        validator: &Validator,
        schema: &Arc<StructSchema>,
        fields: I,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut supplied: Vec<Option<Value>> = vec![None; schema.field_count()];
        for (name, value) in fields {
            let name = name.as_ref();
            let index = schema.field_index(name).ok_or_else(|| ValidationError::UnknownField {
                schema: schema.name().to_string(),
                field: name.to_string(),
            })?;
            supplied[index] = Some(value);
        }

        let mut values = Vec::with_capacity(supplied.len());
        for (field, slot) in schema.fields().iter().zip(supplied) {
            let value = match slot {
                Some(value) => {
                    validator
                        .validate(&field.ty, &value)
                        .map_err(|e| e.in_field(&field.name))?;
                    value
                }
                None => zero_value(&field.ty).ok_or_else(|| ValidationError::MissingField {
                    schema: schema.name().to_string(),
                    field: field.name.clone(),
                })?,
            };
            values.push(value);
        }

        Ok(Self {
            schema: Arc::clone(schema),
            values,
        })
    }

    /// Build an instance from one value per field, in declared order.
    pub fn from_values(schema: &Arc<StructSchema>, values: Vec<Value>) -> Result<Self, ValidationError> {
        Self::from_values_with(&Validator::default(), schema, values)
    }

    /// [`from_values`](Self::from_values) with an explicitly configured validator.
    pub fn from_values_with(
        validator: &Validator,
        schema: &Arc<StructSchema>,
        values: Vec<Value>,
    ) -> Result<Self, ValidationError> {
        if values.len() != schema.field_count() {
            return Err(ValidationError::FieldCount {
                schema: schema.name().to_string(),
                expected: schema.field_count(),
                found: values.len(),
            });
        }
        for (field, value) in schema.fields().iter().zip(&values) {
            validator
                .validate(&field.ty, value)
                .map_err(|e| e.in_field(&field.name))?;
        }
        Ok(Self {
            schema: Arc::clone(schema),
            values,
        })
    }

    /// Assemble an instance whose values are valid by construction.
    pub(crate) fn from_parts(schema: Arc<StructSchema>, values: Vec<Value>) -> Self {
        Self { schema, values }
    }

    /// The schema this instance is bound to.
    pub fn schema(&self) -> &Arc<StructSchema> {
        &self.schema
    }

    /// Current value of a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.field_index(name).map(|i| &self.values[i])
    }

    /// Replace a field's value. The instance is unchanged on failure.
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ValidationError> {
        self.set_field_with(&Validator::default(), name, value.into())
    }

    /// [`set_field`](Self::set_field) with an explicitly configured validator.
    pub fn set_field_with(
        &mut self,
        validator: &Validator,
        name: &str,
        value: Value,
    ) -> Result<(), ValidationError> {
        let index = self
            .schema
            .field_index(name)
            .ok_or_else(|| ValidationError::UnknownField {
                schema: self.schema.name().to_string(),
                field: name.to_string(),
            })?;
        validator
            .validate(&self.schema.fields()[index].ty, &value)
            .map_err(|e| e.in_field(name))?;
        self.values[index] = value;
        Ok(())
    }

    /// A copy with one field replaced.
    pub fn with_field(&self, name: &str, value: impl Into<Value>) -> Result<Self, ValidationError> {
        let mut copy = self.clone();
        copy.set_field(name, value)?;
        Ok(copy)
    }

    /// `(name, value)` pairs in declared order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name.as_str())
            .zip(self.values.iter())
    }

    /// Field values in declared order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the instance, returning its field values in declared order.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl TypeDescriptor {
    /// Whether `value` conforms to this descriptor under the default policies.
    pub fn accepts(&self, value: &Value) -> bool {
        Validator::default().validate(self, value).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldDescriptor;

    fn person() -> Arc<StructSchema> {
        Arc::new(
            StructSchema::new(
                "Person",
                vec![
                    FieldDescriptor::new("id", TypeDescriptor::u32()),
                    FieldDescriptor::new("name", TypeDescriptor::string()),
                    FieldDescriptor::new("email", TypeDescriptor::optional(TypeDescriptor::string())),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn omitted_fields_take_zero_values() {
        let p = StructValue::new(&person(), [("id", Value::from(7u32))]).unwrap();
        assert_eq!(p.get("id"), Some(&Value::Uint(7)));
        assert_eq!(p.get("name"), Some(&Value::String(String::new())));
        assert_eq!(p.get("email"), Some(&Value::none()));
    }

    #[test]
    fn construction_is_atomic() {
        let err = StructValue::new(
            &person(),
            [("id", Value::from(1u32)), ("name", Value::from(5u8))],
        )
        .unwrap_err();
        match err {
            ValidationError::Field { field, .. } => assert_eq!(field, "name"),
            other => panic!("expected field error, got: {other}"),
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = StructValue::new(&person(), [("age", Value::from(30u32))]).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownField { .. }));
    }

    #[test]
    fn set_field_validates_and_leaves_instance_unchanged_on_failure() {
        let mut p = StructValue::new(&person(), [("id", Value::from(1u32))]).unwrap();
        assert!(p.set_field("id", Value::Uint(u64::from(u32::MAX) + 1)).is_err());
        assert_eq!(p.get("id"), Some(&Value::Uint(1)));

        p.set_field("name", "Al").unwrap();
        assert_eq!(p.get("name").and_then(Value::as_str), Some("Al"));
    }

    #[test]
    fn with_field_returns_a_copy() {
        let p = StructValue::new(&person(), [("id", Value::from(1u32))]).unwrap();
        let q = p.with_field("id", 2u32).unwrap();
        assert_eq!(p.get("id"), Some(&Value::Uint(1)));
        assert_eq!(q.get("id"), Some(&Value::Uint(2)));
    }

    #[test]
    fn fields_iterate_in_declared_order() {
        let p = StructValue::new(&person(), [("name", Value::from("Al")), ("id", Value::from(1u32))])
            .unwrap();
        let names: Vec<&str> = p.fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["id", "name", "email"]);
    }

    #[test]
    fn from_values_checks_arity() {
        let err = StructValue::from_values(&person(), vec![Value::Uint(1)]).unwrap_err();
        assert!(matches!(err, ValidationError::FieldCount { expected: 3, found: 1, .. }));
    }

    #[test]
    fn union_selects_first_matching_member() {
        let u = Arc::new(
            UnionSchema::new("Num", vec![TypeDescriptor::u8(), TypeDescriptor::u16(), TypeDescriptor::string()])
                .unwrap(),
        );
        assert_eq!(UnionValue::new(&u, 5u8).unwrap().tag(), 0);
        assert_eq!(UnionValue::new(&u, 300u16).unwrap().tag(), 1);
        assert_eq!(UnionValue::new(&u, "x").unwrap().tag(), 2);
        assert!(matches!(
            UnionValue::new(&u, true),
            Err(ValidationError::NoMatchingMember { .. })
        ));
    }

    #[test]
    fn map_preserves_insertion_order() {
        let schema = Arc::new(MapSchema {
            key: TypeDescriptor::string(),
            value: TypeDescriptor::u8(),
        });
        let mut m = MapValue::new(&schema);
        m.insert("b", 2u8).unwrap();
        m.insert("a", 1u8).unwrap();
        let keys: Vec<String> = m.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["\"b\"", "\"a\""]);
    }

    #[test]
    fn map_insert_validates_key_and_value() {
        let schema = Arc::new(MapSchema {
            key: TypeDescriptor::string(),
            value: TypeDescriptor::u8(),
        });
        let mut m = MapValue::new(&schema);
        assert!(matches!(
            m.insert(1u64, 1u8),
            Err(ValidationError::MapKey { .. })
        ));
        assert!(matches!(
            m.insert("a", 300u16),
            Err(ValidationError::MapValue { .. })
        ));
        assert!(m.is_empty());
    }

    #[test]
    fn data_keyed_maps_accept_plain_insert() {
        let schema = Arc::new(MapSchema {
            key: TypeDescriptor::data(),
            value: TypeDescriptor::u8(),
        });
        let mut m = MapValue::new(&schema);
        m.insert(vec![0xAB], 1u8).unwrap();
        assert_eq!(m.len(), 1);

        let strict = Validator::default();
        assert!(matches!(
            m.insert_with(&strict, MapKey::from(vec![0xCD]), Value::from(2u8)),
            Err(ValidationError::IllegalMapKey { .. })
        ));

        let optional_keys = Arc::new(MapSchema {
            key: TypeDescriptor::optional(TypeDescriptor::u8()),
            value: TypeDescriptor::u8(),
        });
        assert!(matches!(
            MapValue::from_entries(&optional_keys, [(MapKey::from(1u64), Value::from(1u8))]),
            Err(ValidationError::IllegalMapKey { .. })
        ));
    }

    #[test]
    fn json_rendering() {
        let p = StructValue::new(&person(), [("id", Value::from(1u32)), ("name", Value::from("Al"))])
            .unwrap();
        let json = Value::Struct(p).to_json();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "Al", "email": null}));
        assert_eq!(Value::Data(vec![0xde, 0xad]).to_json(), serde_json::json!("dead"));
        assert_eq!(Value::F64(f64::NAN).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn map_key_conversions() {
        assert_eq!(MapKey::from_value(&Value::Int(-3)), Some(MapKey::Int(-3)));
        assert_eq!(MapKey::from_value(&Value::F32(1.0)), None);
        assert_eq!(MapKey::Data(vec![1]).to_value(), Value::Data(vec![1]));
        assert_eq!(MapKey::Data(vec![0xab]).to_string(), "0xab");
    }
}
