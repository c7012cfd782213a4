use crate::{PtError, PtResult};

/// Floating point type of every temperature, length and property
pub type Real = f64;

/// Combined absolute/relative comparison tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Whether `a` and `b` agree within either bound.
    pub fn accepts(&self, a: Real, b: Real) -> bool {
        let diff = (a - b).abs();
        diff <= self.abs || diff <= self.rel * a.abs().max(b.abs())
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    tol.accepts(a, b)
}

pub fn ensure_finite(v: Real, what: &'static str) -> PtResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PtError::NonFinite { what, value: v })
    }
}

/// Finite and greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> PtResult<Real> {
    match ensure_finite(v, what)? {
        v if v > 0.0 => Ok(v),
        v => Err(PtError::NotPositive { what, value: v }),
    }
}

/// Finite and not below zero. Zero is allowed.
pub fn ensure_non_negative(v: Real, what: &'static str) -> PtResult<Real> {
    match ensure_finite(v, what)? {
        v if v >= 0.0 => Ok(v),
        v => Err(PtError::Negative { what, value: v }),
    }
}

/// Parse a user-supplied number, accepting a decimal comma ("12,5").
///
/// Returns `None` for anything that is not a finite real number.
pub fn parse_real(raw: &str) -> Option<Real> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replacen(',', ".", 1);
    normalized.parse::<Real>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tolerance_uses_looser_bound() {
        let tol = Tolerances::default();
        assert!(nearly_equal(0.0, 5e-13, tol));
        assert!(nearly_equal(79.3, 79.3 + 1e-8, tol));
        assert!(!nearly_equal(79.3, 79.31, tol));
        assert!(!Tolerances { abs: 0.0, rel: 0.0 }.accepts(1.0, 1.0 + f64::EPSILON));
    }

    #[test]
    fn non_finite_values_are_named() {
        let err = ensure_finite(Real::NAN, "inlet").unwrap_err();
        assert!(err.to_string().contains("inlet"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(0.0, "x").is_err());
        assert!(ensure_positive(-1.0, "x").is_err());
        assert!(ensure_positive(Real::INFINITY, "x").is_err());
        assert_eq!(ensure_positive(2.5, "x").unwrap(), 2.5);
    }

    #[test]
    fn ensure_non_negative_allows_zero() {
        assert_eq!(ensure_non_negative(0.0, "h").unwrap(), 0.0);
        assert!(ensure_non_negative(-1e-9, "h").is_err());
    }

    #[test]
    fn parse_real_handles_decimal_comma() {
        assert_eq!(parse_real(" 12,5 "), Some(12.5));
        assert_eq!(parse_real("-3.25"), Some(-3.25));
        assert_eq!(parse_real("abc"), None);
        assert_eq!(parse_real(""), None);
        assert_eq!(parse_real("NaN"), None);
        assert_eq!(parse_real("inf"), None);
    }

    proptest! {
        #[test]
        fn parse_real_round_trips_finite_values(v in -1.0e6f64..1.0e6) {
            let parsed = parse_real(&v.to_string()).unwrap();
            prop_assert_eq!(parsed, v);
        }
    }
}
