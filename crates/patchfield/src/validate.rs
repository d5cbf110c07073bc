/// Unwrap-by-default value extraction for declarative validation layers.
///
/// A constraint declared on a `Patch<T>` field is meant for the contained
/// `T`, not for the wrapper. This module is the extension point a validation
/// engine plugs into to see through the wrapper: the engine hands over a
/// receiver sink and the extractor either forwards the contained value once
/// (possibly null) or withholds it entirely.
///
/// The withholding rule is what makes PATCH constraints behave: an omitted
/// field contributes nothing, so a "must be present" style constraint cannot
/// fire on it, while an explicit null is forwarded as `None` and a not-null
/// constraint fires exactly then. The crate defines no constraints of its
/// own; what to check is the engine's business.
use crate::patch::Patch;

/// Sink through which an extracted value is offered to a validation engine.
///
/// Implemented for any `FnMut(Option<&T>)`, so plain closures work as
/// receivers.
pub trait ValueReceiver<T> {
    /// Receives the contained value; `None` is an explicit null.
    fn value(&mut self, value: Option<&T>);
}

impl<T, F: FnMut(Option<&T>)> ValueReceiver<T> for F {
    fn value(&mut self, value: Option<&T>) {
        self(value);
    }
}

/// Offers the contained value of `field` to `receiver`.
///
/// The receiver is called exactly once when the field reference exists and
/// the patch is present, forwarding the contained value (possibly null) under
/// no sub-path qualifier. It is never called when the field reference is
/// absent or the patch is undefined.
pub fn extract_values<T, R>(field: Option<&Patch<T>>, receiver: &mut R)
where
    R: ValueReceiver<T> + ?Sized,
{
    let Some(patch) = field else {
        return;
    };
    if let Patch::Present(value) = patch {
        receiver.value(value.as_ref());
    }
}

impl<T> Patch<T> {
    /// Typed form of the extraction contract: `None` means "contribute
    /// nothing to validation", `Some(inner)` is the contained value with
    /// `inner == None` for an explicit null.
    pub fn unwrapped(&self) -> Option<Option<&T>> {
        match self {
            Self::Undefined => None,
            Self::Present(value) => Some(value.as_ref()),
        }
    }
}
