use crate::geo::Axis;

/// Errors produced by the `relay-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A required request field was absent.
    #[error("{field}: field required")]
    MissingField { field: &'static str },

    /// A coordinate value could not be parsed as a number.
    #[error("{axis}: value is not a valid number: '{raw}'")]
    NotANumber { axis: Axis, raw: String },

    /// A coordinate value was outside its valid range, or not finite.
    #[error("{axis}: {value} is outside [-{limit}, {limit}]", limit = .axis.limit())]
    CoordinateOutOfRange { axis: Axis, value: f64 },

    /// An upstream payload that should be a JSON object was something else.
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}
