//! Geographic coordinates accepted by the weather endpoint.

use std::fmt;

use crate::error::CoreError;

/// Which coordinate a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// North/south position, `lat` on the wire.
    Latitude,
    /// East/west position, `lon` on the wire.
    Longitude,
}

impl Axis {
    /// Query-string field name for this axis.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Latitude => "lat",
            Self::Longitude => "lon",
        }
    }

    /// Largest absolute value allowed on this axis, in degrees.
    #[must_use]
    pub const fn limit(self) -> f64 {
        match self {
            Self::Latitude => 90.0,
            Self::Longitude => 180.0,
        }
    }

    fn check(self, value: f64) -> Result<f64, CoreError> {
        let limit = self.limit();
        if !value.is_finite() || !(-limit..=limit).contains(&value) {
            return Err(CoreError::CoordinateOutOfRange { axis: self, value });
        }
        Ok(value)
    }

    fn parse(self, raw: &str) -> Result<f64, CoreError> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| CoreError::NotANumber { axis: self, raw: raw.to_owned() })?;
        self.check(value)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Latitude in decimal degrees, guaranteed to lie in `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Latitude(f64);

impl Latitude {
    /// Creates a `Latitude` from a value in `[-90.0, 90.0]`.
    ///
    /// # Errors
    /// Returns [`CoreError::CoordinateOutOfRange`] for out-of-range or non-finite values.
    pub fn new(value: f64) -> Result<Self, CoreError> {
        Axis::Latitude.check(value).map(Self)
    }

    /// Parses a decimal string such as `"47.6"`.
    ///
    /// # Errors
    /// Returns [`CoreError::NotANumber`] for non-numeric text, or
    /// [`CoreError::CoordinateOutOfRange`] if the number is out of range.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Axis::Latitude.parse(raw).map(Self)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Longitude in decimal degrees, guaranteed to lie in `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Longitude(f64);

impl Longitude {
    /// Creates a `Longitude` from a value in `[-180.0, 180.0]`.
    ///
    /// # Errors
    /// Returns [`CoreError::CoordinateOutOfRange`] for out-of-range or non-finite values.
    pub fn new(value: f64) -> Result<Self, CoreError> {
        Axis::Longitude.check(value).map(Self)
    }

    /// Parses a decimal string such as `"-122.3"`.
    ///
    /// # Errors
    /// Returns [`CoreError::NotANumber`] for non-numeric text, or
    /// [`CoreError::CoordinateOutOfRange`] if the number is out of range.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Axis::Longitude.parse(raw).map(Self)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

macro_rules! coordinate_conversions {
    ($ty:ty) => {
        impl TryFrom<f64> for $ty {
            type Error = CoreError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

coordinate_conversions!(Latitude);
coordinate_conversions!(Longitude);

/// A validated coordinate pair for one weather lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherQuery {
    pub latitude: Latitude,
    pub longitude: Longitude,
}

impl WeatherQuery {
    #[must_use]
    pub const fn new(latitude: Latitude, longitude: Longitude) -> Self {
        Self { latitude, longitude }
    }

    /// Builds a query from the raw `lat` and `lon` query-string values.
    ///
    /// Latitude is validated before longitude, so a request with two bad
    /// fields reports the latitude problem.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingField`] if either value is absent, and the
    /// errors of [`Latitude::parse`] / [`Longitude::parse`] otherwise.
    pub fn parse(lat: Option<&str>, lon: Option<&str>) -> Result<Self, CoreError> {
        let lat = lat.ok_or(CoreError::MissingField { field: Axis::Latitude.field() })?;
        let latitude = Latitude::parse(lat)?;
        let lon = lon.ok_or(CoreError::MissingField { field: Axis::Longitude.field() })?;
        let longitude = Longitude::parse(lon)?;
        Ok(Self { latitude, longitude })
    }
}

impl fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_signed_decimals() {
        let q = match WeatherQuery::parse(Some("47.6"), Some("-122.3")) {
            Ok(q) => q,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert!((q.latitude.value() - 47.6).abs() < f64::EPSILON);
        assert!((q.longitude.value() + 122.3).abs() < f64::EPSILON);
        assert_eq!(q.to_string(), "47.6, -122.3");
    }

    #[test]
    fn parse_reports_missing_latitude_first() {
        let err = WeatherQuery::parse(None, None).expect_err("must fail");
        assert_eq!(err.to_string(), "lat: field required");

        let err = WeatherQuery::parse(Some("1"), None).expect_err("must fail");
        assert_eq!(err.to_string(), "lon: field required");
    }

    #[test]
    fn parse_rejects_non_numeric_text() {
        let err = WeatherQuery::parse(Some("abc"), Some("-122.3")).expect_err("must fail");
        assert!(
            matches!(err, CoreError::NotANumber { axis: Axis::Latitude, .. }),
            "expected NotANumber for lat, got {err:?}"
        );
        assert!(err.to_string().contains("'abc'"), "message must echo the raw value");
    }

    #[test]
    fn range_boundaries_are_inclusive() {
        assert!(Latitude::new(90.0).is_ok());
        assert!(Latitude::new(-90.0).is_ok());
        assert!(Longitude::new(180.0).is_ok());
        assert!(Longitude::new(-180.0).is_ok());
        assert!(Latitude::new(90.0001).is_err());
        assert!(Longitude::new(-180.5).is_err());
    }

    #[test]
    fn non_finite_values_reject() {
        assert!(Latitude::new(f64::NAN).is_err());
        assert!(Longitude::new(f64::INFINITY).is_err());
        assert!(Latitude::parse("NaN").is_err());
        assert!(Longitude::parse("inf").is_err());
    }

    #[test]
    fn out_of_range_message_names_field_and_bounds() {
        let err = Longitude::parse("200").expect_err("must fail");
        assert_eq!(err.to_string(), "lon: 200 is outside [-180, 180]");
    }

    #[test]
    fn parse_trims_whitespace() {
        assert!(Latitude::parse(" 12.5 ").is_ok());
    }

    proptest::proptest! {
        #[test]
        fn proptest_latitude_parse_never_panics(raw in ".{0,32}") {
            let _ = Latitude::parse(&raw);
        }

        #[test]
        fn proptest_in_range_values_always_accepted(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
        ) {
            proptest::prop_assert!(Latitude::new(lat).is_ok());
            proptest::prop_assert!(Longitude::new(lon).is_ok());
            let q = WeatherQuery::parse(Some(&lat.to_string()), Some(&lon.to_string()));
            proptest::prop_assert!(q.is_ok(), "formatted in-range values must parse back");
        }
    }
}
