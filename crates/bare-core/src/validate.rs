//! # Validator
//!
//! Recursively checks a [`Value`] against a [`TypeDescriptor`]. The same
//! checks guard struct construction, field mutation, union member selection,
//! map insertion, and every leaf the encoder writes.
//!
//! Union membership is decided by trying each member in declared order and
//! taking the first that accepts the value. That rule is part of the wire
//! contract: the encoder writes the index it produces.

use std::sync::Arc;

use crate::config::{CodecConfig, MapKeyPolicy};
use crate::descriptor::{int_range, FloatWidth, IntRepr, IntWidth, MapSchema, TypeDescriptor, UnionSchema};
use crate::error::ValidationError;
use crate::value::{MapKey, Value};

/// Checks values against descriptors under a configured map key policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    map_key_policy: MapKeyPolicy,
}

impl Validator {
    /// Create a validator from the codec configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self {
            map_key_policy: config.map_key_policy,
        }
    }

    /// The map key policy in force.
    pub fn map_key_policy(&self) -> MapKeyPolicy {
        self.map_key_policy
    }

    /// Check `value` against `desc`.
    ///
    /// Nested failures are wrapped with the field, element, or map key that
    /// led to them. Struct fields are checked in declared order and the first
    /// failure is reported.
    pub fn validate(&self, desc: &TypeDescriptor, value: &Value) -> Result<(), ValidationError> {
        match (desc, value) {
            (TypeDescriptor::Void, Value::Void) | (TypeDescriptor::Bool, Value::Bool(_)) => Ok(()),

            (TypeDescriptor::FixedInt { width, signed }, _) => {
                check_int(desc, value, Some(*width), *signed)
            }
            (TypeDescriptor::VarInt { signed }, _) => check_int(desc, value, None, *signed),

            (TypeDescriptor::Float { width: FloatWidth::W32 }, Value::F32(_))
            | (TypeDescriptor::Float { width: FloatWidth::W64 }, Value::F64(_))
            | (TypeDescriptor::String, Value::String(_)) => Ok(()),

            (TypeDescriptor::Data { fixed_length }, Value::Data(bytes)) => {
                check_length(*fixed_length, bytes.len())
            }

            (TypeDescriptor::Optional { .. }, Value::Optional(None)) => Ok(()),
            (TypeDescriptor::Optional { inner }, Value::Optional(Some(v))) => self.validate(inner, v),

            (TypeDescriptor::Array { element, fixed_length }, Value::Array(items)) => {
                check_length(*fixed_length, items.len())?;
                for (i, item) in items.iter().enumerate() {
                    self.validate(element, item).map_err(|e| e.in_element(i))?;
                }
                Ok(())
            }

            (TypeDescriptor::Map(schema), Value::Map(map)) => {
                self.check_map_key_type(&schema.key)?;
                check_schema(desc, schema, map.schema(), || {
                    format!("map<{}><{}>", map.schema().key, map.schema().value)
                })?;
                for (key, v) in map.iter() {
                    self.validate_entry(schema, key, v)?;
                }
                Ok(())
            }

            (TypeDescriptor::Union(schema), Value::Union(u)) => {
                check_schema(desc, schema, u.schema(), || u.schema().name().to_string())?;
                self.select_member(schema, u.value()).map(|_| ())
            }

            (TypeDescriptor::Struct(schema), Value::Struct(s)) => {
                check_schema(desc, schema, s.schema(), || s.schema().name().to_string())?;
                let values = s.values();
                if values.len() != schema.field_count() {
                    return Err(ValidationError::FieldCount {
                        schema: schema.name().to_string(),
                        expected: schema.field_count(),
                        found: values.len(),
                    });
                }
                for (field, v) in schema.fields().iter().zip(values) {
                    self.validate(&field.ty, v).map_err(|e| e.in_field(&field.name))?;
                }
                Ok(())
            }

            (TypeDescriptor::Enum(schema), _) => {
                let (width, signed) = match schema.repr() {
                    IntRepr::Fixed { width, signed } => (Some(width), signed),
                    IntRepr::Var { signed } => (None, signed),
                };
                let raw = int_value(desc, value, width, signed)?;
                match i64::try_from(raw) {
                    Ok(v) if schema.contains(v) => Ok(()),
                    _ => Err(ValidationError::EnumValueNotAllowed {
                        name: schema.name().to_string(),
                        value: raw,
                    }),
                }
            }

            _ => Err(mismatch(desc, value)),
        }
    }

    /// Index of the first member of `schema` that accepts `value`.
    pub fn select_member(&self, schema: &UnionSchema, value: &Value) -> Result<usize, ValidationError> {
        for (tag, member) in schema.members().iter().enumerate() {
            if self.validate(member, value).is_ok() {
                tracing::trace!(union = schema.name(), tag, member = %member, "selected union member");
                return Ok(tag);
            }
        }
        Err(ValidationError::NoMatchingMember {
            union: schema.name().to_string(),
        })
    }

    /// Reject key descriptors the policy does not admit.
    pub fn check_map_key_type(&self, key: &TypeDescriptor) -> Result<(), ValidationError> {
        if key.is_legal_map_key(self.map_key_policy) {
            Ok(())
        } else {
            Err(ValidationError::IllegalMapKey {
                kind: key.to_string(),
            })
        }
    }

    /// Check one map entry. Key and value failures are wrapped separately.
    pub(crate) fn validate_entry(
        &self,
        schema: &MapSchema,
        key: &MapKey,
        value: &Value,
    ) -> Result<(), ValidationError> {
        self.check_map_key_type(&schema.key)?;
        self.validate(&schema.key, &key.to_value())
            .map_err(|e| ValidationError::MapKey {
                key: key.to_string(),
                source: Box::new(e),
            })?;
        self.validate(&schema.value, value)
            .map_err(|e| ValidationError::MapValue {
                key: key.to_string(),
                source: Box::new(e),
            })
    }
}

/// Check `value` against `desc` under the default configuration.
pub fn validate(desc: &TypeDescriptor, value: &Value) -> Result<(), ValidationError> {
    Validator::default().validate(desc, value)
}

fn mismatch(desc: &TypeDescriptor, value: &Value) -> ValidationError {
    ValidationError::KindMismatch {
        expected: desc.to_string(),
        found: value.kind_name(),
    }
}

fn check_length(fixed: Option<usize>, found: usize) -> Result<(), ValidationError> {
    match fixed {
        Some(expected) if expected != found => Err(ValidationError::LengthMismatch { expected, found }),
        _ => Ok(()),
    }
}

/// Values built from a schema are accepted for a descriptor that is the same
/// `Arc` or a structurally equal declaration.
pub(crate) fn check_schema<T: PartialEq>(
    desc: &TypeDescriptor,
    expected: &Arc<T>,
    found: &Arc<T>,
    found_name: impl FnOnce() -> String,
) -> Result<(), ValidationError> {
    if Arc::ptr_eq(expected, found) || **expected == **found {
        Ok(())
    } else {
        Err(ValidationError::SchemaMismatch {
            expected: desc.to_string(),
            found: found_name(),
        })
    }
}

fn check_int(
    desc: &TypeDescriptor,
    value: &Value,
    width: Option<IntWidth>,
    signed: bool,
) -> Result<(), ValidationError> {
    int_value(desc, value, width, signed).map(|_| ())
}

/// Extract an integer of the expected signedness and check its range.
fn int_value(
    desc: &TypeDescriptor,
    value: &Value,
    width: Option<IntWidth>,
    signed: bool,
) -> Result<i128, ValidationError> {
    let raw = match (value, signed) {
        (Value::Int(v), true) => i128::from(*v),
        (Value::Uint(v), false) => i128::from(*v),
        _ => return Err(mismatch(desc, value)),
    };
    let (min, max) = int_range(width, signed);
    if raw < min || raw > max {
        return Err(ValidationError::OutOfRange {
            value: raw,
            kind: desc.to_string(),
        });
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{EnumSchema, EnumVariant, FieldDescriptor, IntRepr, StructSchema};
    use crate::value::{MapValue, StructValue, UnionValue};

    fn color() -> TypeDescriptor {
        TypeDescriptor::Enum(Arc::new(
            EnumSchema::new(
                "Color",
                IntRepr::UINT,
                vec![
                    EnumVariant { name: "RED".into(), value: 0 },
                    EnumVariant { name: "BLUE".into(), value: 2 },
                ],
            )
            .unwrap(),
        ))
    }

    #[test]
    fn fixed_int_ranges() {
        assert!(validate(&TypeDescriptor::u8(), &Value::Uint(255)).is_ok());
        assert!(matches!(
            validate(&TypeDescriptor::u8(), &Value::Uint(256)),
            Err(ValidationError::OutOfRange { value: 256, .. })
        ));
        assert!(validate(&TypeDescriptor::i8(), &Value::Int(-128)).is_ok());
        assert!(validate(&TypeDescriptor::i8(), &Value::Int(-129)).is_err());
        assert!(validate(&TypeDescriptor::u64(), &Value::Uint(u64::MAX)).is_ok());
    }

    #[test]
    fn integer_kinds_are_strict() {
        assert!(matches!(
            validate(&TypeDescriptor::u32(), &Value::Int(1)),
            Err(ValidationError::KindMismatch { .. })
        ));
        assert!(matches!(
            validate(&TypeDescriptor::int(), &Value::Uint(1)),
            Err(ValidationError::KindMismatch { .. })
        ));
        assert!(validate(&TypeDescriptor::int(), &Value::Int(i64::MIN)).is_ok());
        assert!(validate(&TypeDescriptor::uint(), &Value::Uint(u64::MAX)).is_ok());
    }

    #[test]
    fn float_widths_are_distinct() {
        assert!(validate(&TypeDescriptor::f32(), &Value::F32(1.5)).is_ok());
        assert!(validate(&TypeDescriptor::f32(), &Value::F64(1.5)).is_err());
    }

    #[test]
    fn fixed_lengths_must_match_exactly() {
        let arr = TypeDescriptor::array_fixed(TypeDescriptor::u8(), 3);
        let two = Value::Array(vec![Value::Uint(1), Value::Uint(2)]);
        assert!(matches!(
            validate(&arr, &two),
            Err(ValidationError::LengthMismatch { expected: 3, found: 2 })
        ));
        let data = TypeDescriptor::data_fixed(4);
        assert!(validate(&data, &Value::Data(vec![0; 4])).is_ok());
        assert!(validate(&data, &Value::Data(vec![0; 5])).is_err());
    }

    #[test]
    fn array_errors_name_the_element() {
        let arr = TypeDescriptor::array(TypeDescriptor::u8());
        let err = validate(&arr, &Value::Array(vec![Value::Uint(1), Value::Uint(999)])).unwrap_err();
        assert!(matches!(err, ValidationError::Element { index: 1, .. }));
    }

    #[test]
    fn optional_accepts_absent() {
        let opt = TypeDescriptor::optional(TypeDescriptor::string());
        assert!(validate(&opt, &Value::none()).is_ok());
        assert!(validate(&opt, &Value::some("x")).is_ok());
        assert!(validate(&opt, &Value::some(1u8)).is_err());
        assert!(validate(&opt, &Value::from("bare")).is_err());
    }

    #[test]
    fn enum_membership() {
        assert!(validate(&color(), &Value::Uint(2)).is_ok());
        assert!(matches!(
            validate(&color(), &Value::Uint(1)),
            Err(ValidationError::EnumValueNotAllowed { value: 1, .. })
        ));
        assert!(validate(&color(), &Value::Int(0)).is_err());
    }

    #[test]
    fn map_key_types_follow_policy() {
        let schema = Arc::new(MapSchema {
            key: TypeDescriptor::data(),
            value: TypeDescriptor::Bool,
        });
        let desc = TypeDescriptor::Map(Arc::clone(&schema));
        let map = Value::Map(MapValue::new(&schema));

        assert!(matches!(
            validate(&desc, &map),
            Err(ValidationError::IllegalMapKey { .. })
        ));
        let permissive = Validator::new(CodecConfig::default().with_map_key_policy(MapKeyPolicy::Permissive));
        assert!(permissive.validate(&desc, &map).is_ok());
    }

    #[test]
    fn struct_from_another_schema_is_rejected() {
        let a = Arc::new(StructSchema::new("A", vec![FieldDescriptor::new("x", TypeDescriptor::u8())]).unwrap());
        let b = Arc::new(StructSchema::new("B", vec![FieldDescriptor::new("x", TypeDescriptor::u8())]).unwrap());
        let value = Value::Struct(StructValue::new(&a, [("x", Value::Uint(1))]).unwrap());
        assert!(validate(&TypeDescriptor::Struct(a), &value).is_ok());
        assert!(matches!(
            validate(&TypeDescriptor::Struct(b), &value),
            Err(ValidationError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn structurally_equal_schemas_are_interchangeable() {
        let make = || Arc::new(StructSchema::new("P", vec![FieldDescriptor::new("x", TypeDescriptor::u8())]).unwrap());
        let value = Value::Struct(StructValue::new(&make(), [("x", Value::Uint(1))]).unwrap());
        assert!(validate(&TypeDescriptor::Struct(make()), &value).is_ok());
    }

    #[test]
    fn select_member_is_first_match() {
        let schema = UnionSchema::new("N", vec![TypeDescriptor::uint(), TypeDescriptor::u8()]).unwrap();
        // Both members accept 5; the first one wins.
        assert_eq!(Validator::default().select_member(&schema, &Value::Uint(5)), Ok(0));
    }

    #[test]
    fn union_value_is_revalidated() {
        let schema = Arc::new(UnionSchema::new("U", vec![TypeDescriptor::Bool]).unwrap());
        let u = Value::Union(UnionValue::new(&schema, true).unwrap());
        assert!(validate(&TypeDescriptor::Union(schema), &u).is_ok());
    }
}
