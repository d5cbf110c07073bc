/// Format-neutral dynamic content type for schemaless patch fields.
///
/// When a call site has no concrete content type to bind — free-form
/// `metadata` objects, extension blocks, root values decoded without any
/// schema — declare the field as `Patch<AnyValue>` and the value token is
/// kept in tree form instead of being coerced. Unlike `serde_json::Value`,
/// [`AnyValue`] carries no JSON-specific representation, so the same field
/// works through any self-describing serde backend (JSON, CBOR, ...).
///
/// Signed and unsigned integers are distinct variants to preserve numeric
/// fidelity in formats that distinguish them; equality still treats
/// `Int(42)` and `UInt(42)` as the same number so decode/encode round trips
/// compare cleanly across backends.
use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A dynamic value decoded without a schema.
#[derive(Debug, Clone)]
pub enum AnyValue {
    /// An explicit null inside the tree (the field-level null is
    /// `Patch::Present(None)`, not this variant).
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer that fits in i64.
    Int(i64),
    /// An unsigned integer above `i64::MAX`.
    UInt(u64),
    /// An IEEE 754 double.
    Float(f64),
    /// A UTF-8 string.
    Str(String),
    /// An ordered sequence.
    Array(Vec<AnyValue>),
    /// A string-keyed map with deterministic (sorted) ordering.
    Object(AnyMap),
}

/// A string-keyed map of dynamic values.
pub type AnyMap = BTreeMap<String, AnyValue>;

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            // The same number may come back from a backend in either integer
            // representation.
            (Self::Int(a), Self::UInt(b)) | (Self::UInt(b), Self::Int(a)) => {
                u64::try_from(*a).is_ok_and(|v| v == *b)
            }
            // Bit comparison so NaN == NaN and round trips stay reflexive.
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl AnyValue {
    /// Returns `true` for `AnyValue::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string slice for `AnyValue::Str`.
    pub fn as_str(&self) -> Option<&str> {
        if let Self::Str(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Returns the boolean for `AnyValue::Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    /// Returns the value as i64 when it is an integer in i64 range.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::UInt(n) => i64::try_from(*n).ok(),
            Self::Null
            | Self::Bool(_)
            | Self::Float(_)
            | Self::Str(_)
            | Self::Array(_)
            | Self::Object(_) => None,
        }
    }

    /// Returns the value as u64 when it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(n) => u64::try_from(*n).ok(),
            Self::UInt(n) => Some(*n),
            Self::Null
            | Self::Bool(_)
            | Self::Float(_)
            | Self::Str(_)
            | Self::Array(_)
            | Self::Object(_) => None,
        }
    }

    /// Returns the value as f64 for floats and integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            Self::Int(n) => Some(*n as f64),
            Self::UInt(n) => Some(*n as f64),
            Self::Null | Self::Bool(_) | Self::Str(_) | Self::Array(_) | Self::Object(_) => None,
        }
    }

    /// Returns the elements for `AnyValue::Array`.
    pub fn as_array(&self) -> Option<&[AnyValue]> {
        if let Self::Array(a) = self {
            Some(a)
        } else {
            None
        }
    }

    /// Returns the map for `AnyValue::Object`.
    pub fn as_object(&self) -> Option<&AnyMap> {
        if let Self::Object(m) = self {
            Some(m)
        } else {
            None
        }
    }

    /// Looks up `key` when this is an object.
    pub fn get(&self, key: &str) -> Option<&AnyValue> {
        self.as_object().and_then(|m| m.get(key))
    }
}

impl From<serde_json::Value> for AnyValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else if let Some(x) = n.as_f64() {
                    Self::Float(x)
                } else {
                    Self::Null
                }
            }
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(a) => Self::Array(a.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(m) => {
                Self::Object(m.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<AnyValue> for serde_json::Value {
    /// Converts into a JSON value.
    ///
    /// Lossless except for non-finite floats: JSON has no representation for
    /// NaN or infinity, so those become `Null`. A tree that came from a
    /// backend permitting them (e.g. CBOR) therefore only survives this
    /// conversion when its floats are finite.
    fn from(v: AnyValue) -> Self {
        match v {
            AnyValue::Null => Self::Null,
            AnyValue::Bool(b) => Self::Bool(b),
            AnyValue::Int(n) => Self::Number(n.into()),
            AnyValue::UInt(n) => Self::Number(n.into()),
            AnyValue::Float(x) => serde_json::Number::from_f64(x)
                .map(Self::Number)
                .unwrap_or(Self::Null),
            AnyValue::Str(s) => Self::String(s),
            AnyValue::Array(a) => Self::Array(a.into_iter().map(Self::from).collect()),
            AnyValue::Object(m) => {
                Self::Object(m.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl Serialize for AnyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::UInt(n) => serializer.serialize_u64(*n),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Str(s) => serializer.serialize_str(s),
            Self::Array(a) => a.serialize(serializer),
            Self::Object(m) => m.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for AnyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AnyValueVisitor)
    }
}

struct AnyValueVisitor;

impl<'de> Visitor<'de> for AnyValueVisitor {
    type Value = AnyValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any self-describing value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<AnyValue, E> {
        Ok(AnyValue::Bool(v))
    }

    fn visit_i8<E: de::Error>(self, v: i8) -> Result<AnyValue, E> {
        self.visit_i64(i64::from(v))
    }

    fn visit_i16<E: de::Error>(self, v: i16) -> Result<AnyValue, E> {
        self.visit_i64(i64::from(v))
    }

    fn visit_i32<E: de::Error>(self, v: i32) -> Result<AnyValue, E> {
        self.visit_i64(i64::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<AnyValue, E> {
        Ok(AnyValue::Int(v))
    }

    fn visit_u8<E: de::Error>(self, v: u8) -> Result<AnyValue, E> {
        self.visit_u64(u64::from(v))
    }

    fn visit_u16<E: de::Error>(self, v: u16) -> Result<AnyValue, E> {
        self.visit_u64(u64::from(v))
    }

    fn visit_u32<E: de::Error>(self, v: u32) -> Result<AnyValue, E> {
        self.visit_u64(u64::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<AnyValue, E> {
        // Prefer the signed variant so the common small integers compare
        // and render uniformly.
        match i64::try_from(v) {
            Ok(n) => Ok(AnyValue::Int(n)),
            Err(_) => Ok(AnyValue::UInt(v)),
        }
    }

    fn visit_f32<E: de::Error>(self, v: f32) -> Result<AnyValue, E> {
        Ok(AnyValue::Float(f64::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<AnyValue, E> {
        Ok(AnyValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<AnyValue, E> {
        Ok(AnyValue::Str(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<AnyValue, E> {
        Ok(AnyValue::Str(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<AnyValue, E> {
        Ok(AnyValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<AnyValue, E> {
        Ok(AnyValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<AnyValue, D::Error> {
        AnyValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<AnyValue, A::Error> {
        let mut elements = Vec::new();
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(AnyValue::Array(elements))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<AnyValue, A::Error> {
        let mut object = AnyMap::new();
        while let Some((key, value)) = map.next_entry()? {
            object.insert(key, value);
        }
        Ok(AnyValue::Object(object))
    }
}

impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Array(a) => write!(f, "[{} values]", a.len()),
            Self::Object(m) => write!(f, "{{{} fields}}", m.len()),
        }
    }
}
