/// The tri-state PATCH field container.
///
/// A JSON merge-style PATCH body assigns three distinct meanings to every
/// optional field, and `Option<T>` can only express two of them:
///
/// | JSON                  | Meaning          | [`Patch<T>`]             |
/// |-----------------------|------------------|--------------------------|
/// | field absent          | leave unchanged  | `Patch::Undefined`       |
/// | `"field": null`       | clear the value  | `Patch::Present(None)`   |
/// | `"field": <value>`    | replace with `v` | `Patch::Present(Some(v))`|
///
/// The wire mapping itself lives in the crate's `Deserialize`/`Serialize`
/// impls; a field must opt in with
/// `#[serde(default, skip_serializing_if = "Patch::is_undefined")]` so that a
/// missing key becomes `Undefined` on decode and an `Undefined` field is
/// omitted on encode.
use std::fmt;

/// Error returned by [`Patch::get`] when the field is [`Patch::Undefined`].
///
/// An undefined field holds no value at all, not even null. Callers that can
/// tolerate either state should use [`Patch::is_present`] or
/// [`Patch::value_or`] instead of handling this error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndefinedError;

impl fmt::Display for UndefinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("value is undefined")
    }
}

impl std::error::Error for UndefinedError {}

/// A field value that is either undefined (absent from the payload) or
/// present, where a present value may itself be null.
///
/// There is no third physical state: explicit null and a concrete value are
/// both [`Patch::Present`], differing only in the inner `Option`. All
/// undefined values compare equal; two present values compare equal iff their
/// inner options do.
///
/// The type is an immutable value. It is `Copy` whenever `T` is, and the
/// `Undefined` variant carries no payload, so no shared allocation or
/// synchronization is involved anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Patch<T> {
    /// The key was absent from the payload. Decodes from a missing key via
    /// `#[serde(default)]`; encodes as an omitted key via
    /// `#[serde(skip_serializing_if = "Patch::is_undefined")]`.
    #[default]
    Undefined,
    /// The key was present. `None` is the explicit null literal, `Some(v)`
    /// a decoded value.
    Present(Option<T>),
}

impl<T> Patch<T> {
    /// Returns the undefined field value.
    pub fn undefined() -> Self {
        Self::Undefined
    }

    /// Wraps an already-split present value: `None` for explicit null,
    /// `Some(v)` for a concrete value.
    pub fn of(value: Option<T>) -> Self {
        Self::Present(value)
    }

    /// Wraps a concrete value. Shorthand for `Patch::of(Some(value))`.
    pub fn value(value: T) -> Self {
        Self::Present(Some(value))
    }

    /// Returns a present-null field value. Shorthand for `Patch::of(None)`.
    pub fn null() -> Self {
        Self::Present(None)
    }

    /// Returns `true` unless the field is undefined. A present-null field is
    /// present.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns `true` when the field is undefined.
    ///
    /// This is the encode-side emptiness predicate: wire it into
    /// `#[serde(skip_serializing_if = "Patch::is_undefined")]` so that only
    /// undefined fields are omitted. Present-null is not empty and must still
    /// be written.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns `true` when the field is present with an explicit null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Present(None))
    }

    /// Returns the present value (`None` meaning explicit null), or
    /// [`UndefinedError`] when the field is undefined.
    pub fn get(&self) -> Result<Option<&T>, UndefinedError> {
        match self {
            Self::Undefined => Err(UndefinedError),
            Self::Present(value) => Ok(value.as_ref()),
        }
    }

    /// Returns the present value, or `default` when the field is undefined.
    ///
    /// Presence, not truthiness, governs the result: a present-null field
    /// returns `None`, never `default`.
    pub fn value_or(self, default: Option<T>) -> Option<T> {
        match self {
            Self::Undefined => default,
            Self::Present(value) => value,
        }
    }

    /// Invokes `action` with the present value (possibly `None` for explicit
    /// null); does nothing when the field is undefined.
    pub fn if_present(&self, action: impl FnOnce(Option<&T>)) {
        if let Self::Present(value) = self {
            action(value.as_ref());
        }
    }

    /// Maps the contained value, preserving the tri-state.
    ///
    /// Undefined stays undefined and present-null stays present-null; `f` is
    /// invoked only for a present non-null value, so transforms never have to
    /// handle the null case themselves.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Undefined => Patch::Undefined,
            Self::Present(value) => Patch::Present(value.map(f)),
        }
    }

    /// Converts from `&Patch<T>` to `Patch<&T>`.
    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Self::Undefined => Patch::Undefined,
            Self::Present(value) => Patch::Present(value.as_ref()),
        }
    }

    /// Applies this patch to a stored optional value.
    ///
    /// Undefined leaves `slot` untouched, present-null clears it, and a
    /// present value replaces it. This is the merge step a PATCH handler runs
    /// per field after a successful decode.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Self::Undefined => {}
            Self::Present(value) => *slot = value,
        }
    }

    /// Converts from the nested-`Option` encoding of the same three states
    /// (`None` / `Some(None)` / `Some(Some(v))`).
    ///
    /// A named constructor rather than a `From` impl: alongside the blanket
    /// [`From<T>`] conversion, a `From<Option<Option<T>>>` impl would leave
    /// `Patch::from` ambiguous for every nested-option argument (the value
    /// could be wrapped as-is or split into the three states).
    pub fn from_nested(value: Option<Option<T>>) -> Self {
        match value {
            None => Self::Undefined,
            Some(inner) => Self::Present(inner),
        }
    }

    /// Converts into the nested-`Option` encoding; inverse of
    /// [`Patch::from_nested`].
    pub fn into_nested(self) -> Option<Option<T>> {
        match self {
            Self::Undefined => None,
            Self::Present(inner) => Some(inner),
        }
    }
}

impl<T> From<T> for Patch<T> {
    /// Wraps a concrete value as present.
    fn from(value: T) -> Self {
        Self::Present(Some(value))
    }
}

impl<T: fmt::Display> fmt::Display for Patch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("Patch.undefined"),
            Self::Present(None) => f.write_str("Patch[null]"),
            Self::Present(Some(value)) => write!(f, "Patch[{value}]"),
        }
    }
}
