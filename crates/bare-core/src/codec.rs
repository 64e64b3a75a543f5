//! # Encode/Decode Engine
//!
//! [`Encoder`] walks a `(descriptor, value)` pair and writes bytes;
//! [`Decoder`] walks a `(descriptor, source)` pair and rebuilds the value.
//! Both dispatch exhaustively on [`TypeDescriptor`] and delegate leaves to
//! [`primitive`](crate::primitive) and [`varint`](crate::varint).
//!
//! ## Encoding is not transactional
//!
//! Bytes are written as the walk proceeds. If a later struct field fails
//! validation, the bytes of earlier fields stay in the sink. Callers that
//! need all-or-nothing output should encode into a scratch `Vec<u8>` (see
//! [`to_vec`]) and copy on success.
//!
//! ## Decoding never exposes invalid values
//!
//! Structs, unions, and maps are assembled from fully decoded parts and
//! re-checked through their constructors. A decode either returns a valid
//! value or an error; nothing partially built escapes.

use crate::config::CodecConfig;
use crate::descriptor::{FloatWidth, TypeDescriptor};
use crate::error::{DecodeError, EncodeError, ValidationError};
use crate::io::{ByteSink, ByteSource, CountingSource};
use crate::primitive::{
    read_bool, read_data, read_data_fixed, read_f32, read_f64, read_fixed_int, read_fixed_uint,
    read_length, read_string, write_bool, write_data, write_data_fixed, write_f32, write_f64,
    write_fixed_int, write_string,
};
use crate::validate::{check_schema, Validator};
use crate::value::{MapKey, MapValue, StructValue, UnionValue, Value};
use crate::varint::{read_svarint, read_uvarint, write_svarint, write_uvarint};

/// Optional presence byte for an absent value.
const ABSENT: u8 = 0x00;
/// Optional presence byte for a present value.
const PRESENT: u8 = 0x01;
/// Largest wire count accepted for an array whose elements encode to zero bytes.
pub const MAX_ZERO_SIZED_ELEMENTS: usize = 256;

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

/// Writes values in wire form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    validator: Validator,
}

impl Encoder {
    /// Create an encoder from the codec configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self {
            validator: Validator::new(config),
        }
    }

    /// Encode `value` as `desc` into `sink`.
    pub fn encode<S: ByteSink + ?Sized>(
        &self,
        desc: &TypeDescriptor,
        value: &Value,
        sink: &mut S,
    ) -> Result<(), EncodeError> {
        match desc {
            TypeDescriptor::Void
            | TypeDescriptor::Bool
            | TypeDescriptor::FixedInt { .. }
            | TypeDescriptor::VarInt { .. }
            | TypeDescriptor::Float { .. }
            | TypeDescriptor::String
            | TypeDescriptor::Data { .. } => {
                self.validator.validate(desc, value)?;
                write_leaf(desc, value, sink)
            }

            TypeDescriptor::Optional { inner } => match value {
                Value::Optional(None) => Ok(sink.write_bytes(&[ABSENT])?),
                Value::Optional(Some(v)) => {
                    sink.write_bytes(&[PRESENT])?;
                    self.encode(inner, v, sink)
                }
                other => Err(mismatch(desc, other)),
            },

            TypeDescriptor::Array { element, fixed_length } => {
                let Value::Array(items) = value else {
                    return Err(mismatch(desc, value));
                };
                match fixed_length {
                    Some(n) if *n != items.len() => {
                        return Err(ValidationError::LengthMismatch {
                            expected: *n,
                            found: items.len(),
                        }
                        .into());
                    }
                    Some(_) => {}
                    None => write_uvarint(sink, items.len() as u64)?,
                }
                for (i, item) in items.iter().enumerate() {
                    self.encode(element, item, sink).map_err(|e| e.in_element(i))?;
                }
                Ok(())
            }

            TypeDescriptor::Map(schema) => {
                let Value::Map(map) = value else {
                    return Err(mismatch(desc, value));
                };
                self.validator.check_map_key_type(&schema.key)?;
                check_schema(desc, schema, map.schema(), || {
                    format!("map<{}><{}>", map.schema().key, map.schema().value)
                })?;
                write_uvarint(sink, map.len() as u64)?;
                for (key, v) in map.iter() {
                    self.encode(&schema.key, &key.to_value(), sink)
                        .map_err(|e| in_map(e, key, true))?;
                    self.encode(&schema.value, v, sink)
                        .map_err(|e| in_map(e, key, false))?;
                }
                Ok(())
            }

            TypeDescriptor::Union(schema) => {
                let Value::Union(u) = value else {
                    return Err(mismatch(desc, value));
                };
                check_schema(desc, schema, u.schema(), || u.schema().name().to_string())?;
                let tag = self.validator.select_member(schema, u.value())?;
                write_uvarint(sink, tag as u64)?;
                // select_member only returns indices of declared members.
                match schema.member(tag) {
                    Some(member) => self.encode(member, u.value(), sink),
                    None => Err(ValidationError::NoMatchingMember {
                        union: schema.name().to_string(),
                    }
                    .into()),
                }
            }

            TypeDescriptor::Struct(schema) => {
                let Value::Struct(s) = value else {
                    return Err(mismatch(desc, value));
                };
                check_schema(desc, schema, s.schema(), || s.schema().name().to_string())?;
                for (field, v) in schema.fields().iter().zip(s.values()) {
                    self.encode(&field.ty, v, sink)
                        .map_err(|e| e.in_field(&field.name))?;
                }
                Ok(())
            }

            TypeDescriptor::Enum(schema) => {
                self.validator.validate(desc, value)?;
                write_leaf(&schema.repr().descriptor(), value, sink)
            }
        }
    }

    /// Encode into a fresh buffer.
    pub fn to_vec(&self, desc: &TypeDescriptor, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        self.encode(desc, value, &mut buf)?;
        Ok(buf)
    }
}

/// Write an already-validated scalar.
fn write_leaf<S: ByteSink + ?Sized>(
    desc: &TypeDescriptor,
    value: &Value,
    sink: &mut S,
) -> Result<(), EncodeError> {
    match (desc, value) {
        (TypeDescriptor::Void, Value::Void) => {}
        (TypeDescriptor::Bool, Value::Bool(b)) => write_bool(sink, *b)?,
        (TypeDescriptor::FixedInt { width, .. }, Value::Int(v)) => write_fixed_int(sink, *v as u64, *width)?,
        (TypeDescriptor::FixedInt { width, .. }, Value::Uint(v)) => write_fixed_int(sink, *v, *width)?,
        (TypeDescriptor::VarInt { signed: true }, Value::Int(v)) => write_svarint(sink, *v)?,
        (TypeDescriptor::VarInt { signed: false }, Value::Uint(v)) => write_uvarint(sink, *v)?,
        (TypeDescriptor::Float { width: FloatWidth::W32 }, Value::F32(v)) => write_f32(sink, *v)?,
        (TypeDescriptor::Float { width: FloatWidth::W64 }, Value::F64(v)) => write_f64(sink, *v)?,
        (TypeDescriptor::String, Value::String(s)) => write_string(sink, s)?,
        (TypeDescriptor::Data { fixed_length: Some(_) }, Value::Data(d)) => write_data_fixed(sink, d)?,
        (TypeDescriptor::Data { fixed_length: None }, Value::Data(d)) => write_data(sink, d)?,
        _ => return Err(mismatch(desc, value)),
    }
    Ok(())
}

fn mismatch(desc: &TypeDescriptor, value: &Value) -> EncodeError {
    EncodeError::Validation(ValidationError::KindMismatch {
        expected: desc.to_string(),
        found: value.kind_name(),
    })
}

fn in_map(err: EncodeError, key: &MapKey, is_key: bool) -> EncodeError {
    match err {
        EncodeError::Validation(source) => {
            let key = key.to_string();
            let source = Box::new(source);
            EncodeError::Validation(if is_key {
                ValidationError::MapKey { key, source }
            } else {
                ValidationError::MapValue { key, source }
            })
        }
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// Reads values from wire form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    config: CodecConfig,
    validator: Validator,
}

impl Decoder {
    /// Create a decoder from the codec configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            validator: Validator::new(config),
        }
    }

    /// Decode one value of type `desc` from `source`.
    ///
    /// Consumes exactly the bytes of that value; anything after it is left
    /// in the source.
    pub fn decode<S: ByteSource + ?Sized>(
        &self,
        desc: &TypeDescriptor,
        source: &mut S,
    ) -> Result<Value, DecodeError> {
        let mut counting = CountingSource::new(source);
        let result = self.decode_value(desc, &mut counting);
        if let Err(e) = &result {
            tracing::debug!(
                schema = %desc,
                offset = counting.consumed(),
                error = %e,
                "decode failed"
            );
        }
        result
    }

    /// Decode one value that must span all of `bytes`.
    pub fn from_slice(&self, desc: &TypeDescriptor, bytes: &[u8]) -> Result<Value, DecodeError> {
        let mut input = bytes;
        let value = self.decode(desc, &mut input)?;
        if !input.is_empty() {
            return Err(DecodeError::TrailingBytes { count: input.len() });
        }
        Ok(value)
    }

    fn length<S: ByteSource + ?Sized>(&self, source: &mut S) -> Result<usize, DecodeError> {
        read_length(source, self.config.varint_policy, self.config.max_length)
    }

    fn decode_value<S: ByteSource + ?Sized>(
        &self,
        desc: &TypeDescriptor,
        source: &mut S,
    ) -> Result<Value, DecodeError> {
        let policy = self.config.varint_policy;
        let max_length = self.config.max_length;

        let value = match desc {
            TypeDescriptor::Void => Value::Void,
            TypeDescriptor::Bool => Value::Bool(read_bool(source)?),
            TypeDescriptor::FixedInt { width, signed: true } => Value::Int(read_fixed_int(source, *width)?),
            TypeDescriptor::FixedInt { width, signed: false } => Value::Uint(read_fixed_uint(source, *width)?),
            TypeDescriptor::VarInt { signed: true } => Value::Int(read_svarint(source, policy)?),
            TypeDescriptor::VarInt { signed: false } => Value::Uint(read_uvarint(source, policy)?),
            TypeDescriptor::Float { width: FloatWidth::W32 } => Value::F32(read_f32(source)?),
            TypeDescriptor::Float { width: FloatWidth::W64 } => Value::F64(read_f64(source)?),
            TypeDescriptor::String => Value::String(read_string(source, policy, max_length)?),
            TypeDescriptor::Data { fixed_length: Some(n) } => Value::Data(read_data_fixed(source, *n)?),
            TypeDescriptor::Data { fixed_length: None } => Value::Data(read_data(source, policy, max_length)?),

            TypeDescriptor::Optional { inner } => {
                let mut presence = [0u8; 1];
                source.read_exact_into(&mut presence)?;
                match presence[0] {
                    ABSENT => Value::Optional(None),
                    PRESENT => Value::Optional(Some(Box::new(self.decode_value(inner, source)?))),
                    other => return Err(DecodeError::InvalidPresence(other)),
                }
            }

            TypeDescriptor::Array { element, fixed_length } => {
                let count = match fixed_length {
                    Some(n) => *n,
                    None => {
                        let count = self.length(source)?;
                        if count > MAX_ZERO_SIZED_ELEMENTS && element.is_zero_sized() {
                            tracing::debug!(count, element = %element, "zero-sized element count over limit");
                            return Err(DecodeError::LengthLimitExceeded {
                                length: count as u64,
                                limit: MAX_ZERO_SIZED_ELEMENTS as u64,
                            });
                        }
                        count
                    }
                };
                // Other element types consume input, so the count is bounded by the bytes read.
                let mut items = Vec::with_capacity(count.min(1024));
                for _ in 0..count {
                    items.push(self.decode_value(element, source)?);
                }
                Value::Array(items)
            }

            TypeDescriptor::Map(schema) => {
                self.validator.check_map_key_type(&schema.key)?;
                let count = self.length(source)?;
                let mut map = MapValue::new(schema);
                for _ in 0..count {
                    let raw_key = self.decode_value(&schema.key, source)?;
                    let key = MapKey::from_value(&raw_key).ok_or_else(|| ValidationError::IllegalMapKey {
                        kind: schema.key.to_string(),
                    })?;
                    let value = self.decode_value(&schema.value, source)?;
                    if !map.push_unique(key.clone(), value) {
                        return Err(DecodeError::DuplicateMapKey {
                            key: key.to_string(),
                        });
                    }
                }
                Value::Map(map)
            }

            TypeDescriptor::Union(schema) => {
                let tag = read_uvarint(source, policy)?;
                let (index, member) = usize::try_from(tag)
                    .ok()
                    .and_then(|t| schema.member(t).map(|m| (t, m)))
                    .ok_or_else(|| {
                        tracing::debug!(union = schema.name(), tag, "unknown union tag");
                        DecodeError::UnknownUnionTag {
                            tag,
                            members: schema.members().len(),
                        }
                    })?;
                let inner = self.decode_value(member, source)?;
                Value::Union(UnionValue::with_tag(&self.validator, schema, index, inner)?)
            }

            TypeDescriptor::Struct(schema) => {
                let mut values = Vec::with_capacity(schema.field_count());
                for field in schema.fields() {
                    values.push(self.decode_value(&field.ty, source)?);
                }
                Value::Struct(StructValue::from_values_with(&self.validator, schema, values)?)
            }

            TypeDescriptor::Enum(schema) => {
                let value = self.decode_value(&schema.repr().descriptor(), source)?;
                self.validator.validate(desc, &value)?;
                value
            }
        };
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Convenience entry points (default configuration)
// ---------------------------------------------------------------------------

/// Encode `value` as `desc` into `sink` under the default configuration.
pub fn encode<S: ByteSink + ?Sized>(
    desc: &TypeDescriptor,
    value: &Value,
    sink: &mut S,
) -> Result<(), EncodeError> {
    Encoder::default().encode(desc, value, sink)
}

/// Decode one value of type `desc` from `source` under the default configuration.
pub fn decode<S: ByteSource + ?Sized>(desc: &TypeDescriptor, source: &mut S) -> Result<Value, DecodeError> {
    Decoder::default().decode(desc, source)
}

/// Encode into a fresh buffer under the default configuration.
pub fn to_vec(desc: &TypeDescriptor, value: &Value) -> Result<Vec<u8>, EncodeError> {
    Encoder::default().to_vec(desc, value)
}

/// Decode one value spanning all of `bytes` under the default configuration.
pub fn from_slice(desc: &TypeDescriptor, bytes: &[u8]) -> Result<Value, DecodeError> {
    Decoder::default().from_slice(desc, bytes)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{MapKeyPolicy, VarintPolicy};
    use crate::descriptor::{FieldDescriptor, MapSchema, StructSchema, UnionSchema};

    fn person() -> Arc<StructSchema> {
        Arc::new(
            StructSchema::new(
                "Person",
                vec![
                    FieldDescriptor::new("id", TypeDescriptor::u32()),
                    FieldDescriptor::new("name", TypeDescriptor::string()),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn person_vector() {
        let schema = person();
        let desc = TypeDescriptor::Struct(Arc::clone(&schema));
        let value = Value::Struct(
            StructValue::new(&schema, [("id", Value::from(1u32)), ("name", Value::from("Al"))]).unwrap(),
        );
        let bytes = to_vec(&desc, &value).unwrap();
        assert_eq!(bytes, vec![0x01, 0x00, 0x00, 0x00, 0x02, 0x41, 0x6C]);
        assert_eq!(from_slice(&desc, &bytes).unwrap(), value);
    }

    #[test]
    fn void_is_zero_bytes() {
        assert!(to_vec(&TypeDescriptor::Void, &Value::Void).unwrap().is_empty());
    }

    #[test]
    fn optional_framing() {
        let desc = TypeDescriptor::optional(TypeDescriptor::u8());
        assert_eq!(to_vec(&desc, &Value::none()).unwrap(), vec![0x00]);
        assert_eq!(to_vec(&desc, &Value::some(7u8)).unwrap(), vec![0x01, 0x07]);
        assert!(matches!(
            from_slice(&desc, &[0x01]),
            Err(DecodeError::Truncated { offset: 1, .. })
        ));
        assert!(matches!(from_slice(&desc, &[0x02]), Err(DecodeError::InvalidPresence(0x02))));
    }

    #[test]
    fn absent_optional_consumes_only_the_presence_byte() {
        let desc = TypeDescriptor::optional(TypeDescriptor::u8());
        let mut src: &[u8] = &[0x00, 0xFF];
        assert_eq!(decode(&desc, &mut src).unwrap(), Value::none());
        assert_eq!(src, &[0xFF]);
    }

    #[test]
    fn fixed_array_has_no_count() {
        let desc = TypeDescriptor::array_fixed(TypeDescriptor::u8(), 3);
        let value = Value::Array(vec![Value::Uint(1), Value::Uint(2), Value::Uint(3)]);
        assert_eq!(to_vec(&desc, &value).unwrap(), vec![1, 2, 3]);

        let short = Value::Array(vec![Value::Uint(1), Value::Uint(2)]);
        assert!(matches!(
            to_vec(&desc, &short),
            Err(EncodeError::Validation(ValidationError::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn variable_array_has_count() {
        let desc = TypeDescriptor::array(TypeDescriptor::int());
        let value = Value::Array(vec![Value::Int(-1), Value::Int(1)]);
        assert_eq!(to_vec(&desc, &value).unwrap(), vec![0x02, 0x01, 0x02]);
    }

    #[test]
    fn union_writes_member_index() {
        let schema = Arc::new(
            UnionSchema::new(
                "U",
                vec![TypeDescriptor::Bool, TypeDescriptor::string(), TypeDescriptor::u16()],
            )
            .unwrap(),
        );
        let desc = TypeDescriptor::Union(Arc::clone(&schema));
        let value = Value::Union(UnionValue::new(&schema, 0x0102u16).unwrap());
        assert_eq!(to_vec(&desc, &value).unwrap(), vec![0x02, 0x02, 0x01]);
        assert_eq!(from_slice(&desc, &[0x02, 0x02, 0x01]).unwrap(), value);

        match from_slice(&desc, &[0x05, 0x00]) {
            Err(DecodeError::UnknownUnionTag { tag, members }) => {
                assert_eq!(tag, 5);
                assert_eq!(members, 3);
            }
            other => panic!("expected UnknownUnionTag, got: {other:?}"),
        }
    }

    #[test]
    fn decoded_union_keeps_the_wire_tag() {
        let schema = Arc::new(UnionSchema::new("N", vec![TypeDescriptor::u8(), TypeDescriptor::u16()]).unwrap());
        let desc = TypeDescriptor::Union(Arc::clone(&schema));

        let decoded = from_slice(&desc, &[0x01, 0x05, 0x00]).unwrap();
        let Value::Union(u) = &decoded else {
            panic!("expected a union, got: {decoded:?}");
        };
        assert_eq!(u.tag(), 1);
        assert_eq!(u.value(), &Value::Uint(5));
        assert_eq!(decoded.to_json()["tag"], 1);

        // Encoding still selects the first accepting member.
        assert_eq!(to_vec(&desc, &decoded).unwrap(), vec![0x00, 0x05]);
    }

    #[test]
    fn zero_sized_element_counts_are_bounded() {
        let desc = TypeDescriptor::array(TypeDescriptor::Void);
        let mut bytes = Vec::new();
        write_uvarint(&mut bytes, 2_000_000).unwrap();
        match from_slice(&desc, &bytes) {
            Err(DecodeError::LengthLimitExceeded { length, limit }) => {
                assert_eq!(length, 2_000_000);
                assert_eq!(limit, MAX_ZERO_SIZED_ELEMENTS as u64);
            }
            other => panic!("expected LengthLimitExceeded, got: {other:?}"),
        }

        let empty = Arc::new(StructSchema::new("Empty", vec![]).unwrap());
        let desc = TypeDescriptor::array(TypeDescriptor::Struct(empty));
        assert!(from_slice(&desc, &[0xAC, 0x02]).is_err());

        let desc = TypeDescriptor::array(TypeDescriptor::Void);
        let decoded = from_slice(&desc, &[0x03]).unwrap();
        assert_eq!(decoded, Value::Array(vec![Value::Void; 3]));
    }

    #[test]
    fn map_round_trips_in_insertion_order() {
        let schema = Arc::new(MapSchema {
            key: TypeDescriptor::string(),
            value: TypeDescriptor::u8(),
        });
        let desc = TypeDescriptor::Map(Arc::clone(&schema));
        let mut map = MapValue::new(&schema);
        map.insert("z", 1u8).unwrap();
        map.insert("a", 2u8).unwrap();
        let value = Value::Map(map);

        let bytes = to_vec(&desc, &value).unwrap();
        assert_eq!(bytes, vec![0x02, 0x01, b'z', 0x01, 0x01, b'a', 0x02]);
        assert_eq!(from_slice(&desc, &bytes).unwrap(), value);
    }

    #[test]
    fn duplicate_decoded_map_keys_are_rejected() {
        let desc = TypeDescriptor::map(TypeDescriptor::u8(), TypeDescriptor::u8());
        let bytes = [0x02, 0x07, 0x01, 0x07, 0x02];
        assert!(matches!(from_slice(&desc, &bytes), Err(DecodeError::DuplicateMapKey { .. })));
    }

    #[test]
    fn data_map_keys_need_the_permissive_policy() {
        let desc = TypeDescriptor::map(TypeDescriptor::data(), TypeDescriptor::u8());
        assert!(matches!(
            from_slice(&desc, &[0x00]),
            Err(DecodeError::Invalid(ValidationError::IllegalMapKey { .. }))
        ));

        let permissive = Decoder::new(CodecConfig::default().with_map_key_policy(MapKeyPolicy::Permissive));
        let value = permissive.from_slice(&desc, &[0x01, 0x01, 0xAB, 0x09]).unwrap();
        let Value::Map(map) = &value else {
            panic!("expected map, got {value:?}");
        };
        assert_eq!(map.get(&MapKey::Data(vec![0xAB])), Some(&Value::Uint(9)));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        assert!(matches!(
            from_slice(&TypeDescriptor::u8(), &[0x01, 0x02]),
            Err(DecodeError::TrailingBytes { count: 1 })
        ));
    }

    #[test]
    fn struct_encode_is_not_transactional() {
        let schema = person();
        let desc = TypeDescriptor::Struct(Arc::clone(&schema));
        // Assembled without validation so that the second field is wrong.
        let forged = StructValue::from_parts(Arc::clone(&schema), vec![Value::Uint(1), Value::Uint(2)]);
        let mut sink = Vec::new();
        let err = encode(&desc, &Value::Struct(forged), &mut sink).unwrap_err();
        assert!(matches!(err, EncodeError::Validation(ValidationError::Field { .. })));
        assert_eq!(sink, vec![0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn decoded_enum_outside_set_is_invalid() {
        let e = crate::schema::SchemaBuilder::default()
            .enumeration("Color", crate::descriptor::IntRepr::U8)
            .variant("RED", 1)
            .build()
            .unwrap();
        let desc = TypeDescriptor::Enum(e);
        assert_eq!(from_slice(&desc, &[0x01]).unwrap(), Value::Uint(1));
        assert!(matches!(
            from_slice(&desc, &[0x02]),
            Err(DecodeError::Invalid(ValidationError::EnumValueNotAllowed { .. }))
        ));
    }

    #[test]
    fn length_limit_applies_to_counts() {
        let decoder = Decoder::new(CodecConfig::default().with_max_length(2));
        let desc = TypeDescriptor::array(TypeDescriptor::u8());
        assert!(matches!(
            decoder.from_slice(&desc, &[0x03, 1, 2, 3]),
            Err(DecodeError::LengthLimitExceeded { length: 3, limit: 2 })
        ));
    }

    #[test]
    fn lenient_decoder_accepts_padded_varints() {
        let desc = TypeDescriptor::uint();
        assert!(matches!(
            from_slice(&desc, &[0x81, 0x00]),
            Err(DecodeError::NonCanonicalVarint)
        ));
        let lenient = Decoder::new(CodecConfig::default().with_varint_policy(VarintPolicy::Lenient));
        assert_eq!(lenient.from_slice(&desc, &[0x81, 0x00]).unwrap(), Value::Uint(1));
    }

    #[test]
    fn invalid_bool_byte() {
        assert!(matches!(
            from_slice(&TypeDescriptor::Bool, &[0x02]),
            Err(DecodeError::InvalidBool(0x02))
        ));
    }
}
