/// Encode half of the tri-state wire contract.
///
/// Field omission is decided before this impl runs: pairing the field with
/// `#[serde(skip_serializing_if = "Patch::is_undefined")]` makes
/// [`Patch::is_undefined`] the sole arbiter of emptiness, so a present-null
/// field is never skipped and still writes its null literal. The default
/// serde omission rule (skip nothing, or user-chosen `Option::is_none`
/// predicates) has subtly different semantics and must not be used for this
/// type.
///
/// The normal path writes null directly for present-null (the content
/// encoder is never handed a null) and delegates a present value to the
/// content type's own `Serialize` impl, whose errors propagate unchanged. An
/// `Undefined` value reached outside a skipping field, such as a root-level
/// value, degrades to the null literal because self-describing formats have
/// no token for absence.
use serde::{Serialize, Serializer};

use crate::patch::Patch;

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Undefined => serializer.serialize_none(),
            Self::Present(None) => serializer.serialize_none(),
            Self::Present(Some(value)) => serializer.serialize_some(value),
        }
    }
}
