/// Decode half of the tri-state wire contract.
///
/// Exactly one of three paths runs per field occurrence:
///
/// - key absent: serde never calls this impl; `#[serde(default)]` fills in
///   [`Patch::Undefined`].
/// - key present with the null literal: `visit_none`/`visit_unit` returns
///   `Patch::Present(None)` regardless of the content type.
/// - key present with a value token: `visit_some` delegates to the content
///   type's own `Deserialize` impl and wraps the result as
///   `Patch::Present(Some(v))`.
///
/// A content decode failure fails the whole field decode; it is never
/// downgraded to `Undefined` or null. When no concrete content type exists
/// for a call site, declare the field as `Patch<AnyValue>` and the value
/// token is kept in tree form.
use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserializer, Visitor};
use serde::Deserialize;

use crate::patch::Patch;

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(PatchVisitor(PhantomData))
    }
}

struct PatchVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for PatchVisitor<T> {
    type Value = Patch<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("null or a value for the patched field")
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Patch<T>, E> {
        Ok(Patch::Present(None))
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Patch<T>, E> {
        Ok(Patch::Present(None))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Patch<T>, D::Error> {
        T::deserialize(deserializer).map(Patch::value)
    }
}
