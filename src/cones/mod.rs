//! Cone types used to declare constraints `s ∈ K`.

use num_derive::FromPrimitive;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

// tolerance on the sum of generalized power cone exponents.
// This is the unit of least precision at 1.0
const GENPOW_SUM_TOL: f64 = f64::EPSILON;

/// Error type returned when a cone payload is out of range
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConeError {
    /// Cone dimension is zero
    #[error("dimension of {0} must be positive")]
    NonPositiveDimension(&'static str),
    /// Power cone exponent outside (0, 1)
    #[error("power cone exponent {0} must be in (0, 1)")]
    BadPower(f64),
    /// Generalized power cone has no exponents
    #[error("generalized power cone exponents must not be empty")]
    EmptyGenPower,
    /// A generalized power cone exponent outside (0, 1)
    #[error("generalized power cone exponent {0} must be in (0, 1)")]
    BadGenPower(f64),
    /// Generalized power cone exponents do not sum to one
    #[error("generalized power cone exponents must sum to one (sum = {0})")]
    BadGenPowerSum(f64),
    /// Cone dimension does not fit in `usize`
    #[error("dimension of {0} overflows")]
    DimensionOverflow(&'static str),
}

/// API type describing the type of a conic constraint.
///
/// Variants carry the cone payload.  Use the checked constructors,
/// e.g. [`SupportedCone::nonnegative`], to build a cone with a validated
/// payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SupportedCone {
    /// The zero cone (used for equality constraints).
    ///
    /// The parameter indicates the cones dimension.
    ZeroConeT(usize),
    /// The nonnegative orthant.
    ///
    /// The parameter indicates the cones dimension.
    NonnegativeConeT(usize),
    /// The second order cone / Lorenz cone / ice-cream cone.
    ///
    /// The parameter indicates the cones dimension.
    SecondOrderConeT(usize),
    /// The exponential cone in R^3.
    ///
    /// This cone takes no parameters
    ExponentialConeT,
    /// The power cone in R^3.
    ///
    /// The parameter indicates the power.
    PowerConeT(f64),
    /// The generalized power cone.
    ///
    /// The parameters are the exponents and the dimension of the
    /// second block.
    GenPowerConeT(Vec<f64>, usize),
}

/// Solver-defined discriminant of each [`SupportedCone`] variant
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
pub enum SupportedConeTag {
    ZeroConeT = 0,
    NonnegativeConeT = 1,
    SecondOrderConeT = 2,
    ExponentialConeT = 3,
    PowerConeT = 4,
    GenPowerConeT = 5,
}

impl SupportedCone {
    /// Zero cone of dimension `n`
    pub fn zero(n: usize) -> Result<Self, ConeError> {
        Self::checked(SupportedCone::ZeroConeT(n))
    }

    /// Nonnegative orthant of dimension `n`
    pub fn nonnegative(n: usize) -> Result<Self, ConeError> {
        Self::checked(SupportedCone::NonnegativeConeT(n))
    }

    /// Second order cone of dimension `n`
    pub fn second_order(n: usize) -> Result<Self, ConeError> {
        Self::checked(SupportedCone::SecondOrderConeT(n))
    }

    /// Exponential cone
    pub fn exponential() -> Self {
        SupportedCone::ExponentialConeT
    }

    /// Power cone with exponent `a ∈ (0, 1)`
    pub fn power(a: f64) -> Result<Self, ConeError> {
        Self::checked(SupportedCone::PowerConeT(a))
    }

    /// Generalized power cone with exponents `alpha` and a second block of
    /// dimension `n`
    pub fn gen_power(alpha: Vec<f64>, n: usize) -> Result<Self, ConeError> {
        Self::checked(SupportedCone::GenPowerConeT(alpha, n))
    }

    fn checked(cone: Self) -> Result<Self, ConeError> {
        cone.validate()?;
        Ok(cone)
    }

    /// Checks the cone payload.
    pub fn validate(&self) -> Result<(), ConeError> {
        match self {
            SupportedCone::ZeroConeT(n)
            | SupportedCone::NonnegativeConeT(n)
            | SupportedCone::SecondOrderConeT(n) => {
                if *n == 0 {
                    return Err(ConeError::NonPositiveDimension(self.variant_name()));
                }
            }
            SupportedCone::ExponentialConeT => {}
            SupportedCone::PowerConeT(a) => {
                if !is_open_unit(*a) {
                    return Err(ConeError::BadPower(*a));
                }
            }
            SupportedCone::GenPowerConeT(alpha, n) => {
                if alpha.is_empty() {
                    return Err(ConeError::EmptyGenPower);
                }
                if let Some(&a) = alpha.iter().find(|&&a| !is_open_unit(a)) {
                    return Err(ConeError::BadGenPower(a));
                }
                let sum: f64 = alpha.iter().sum();
                if (sum - 1.).abs() >= GENPOW_SUM_TOL {
                    return Err(ConeError::BadGenPowerSum(sum));
                }
                if *n == 0 {
                    return Err(ConeError::NonPositiveDimension(self.variant_name()));
                }
                if alpha.len().checked_add(*n).is_none() {
                    return Err(ConeError::DimensionOverflow(self.variant_name()));
                }
            }
        }
        Ok(())
    }

    /// Number of rows of `A` covered by this cone.
    ///
    /// Saturates at `usize::MAX` for a cone that fails [`SupportedCone::validate`].
    pub fn dim(&self) -> usize {
        match self {
            SupportedCone::ZeroConeT(n) => *n,
            SupportedCone::NonnegativeConeT(n) => *n,
            SupportedCone::SecondOrderConeT(n) => *n,
            SupportedCone::ExponentialConeT => 3,
            SupportedCone::PowerConeT(_) => 3,
            SupportedCone::GenPowerConeT(alpha, n) => alpha.len().saturating_add(*n),
        }
    }

    /// Solver-defined discriminant of this cone
    pub fn tag(&self) -> SupportedConeTag {
        match self {
            SupportedCone::ZeroConeT(_) => SupportedConeTag::ZeroConeT,
            SupportedCone::NonnegativeConeT(_) => SupportedConeTag::NonnegativeConeT,
            SupportedCone::SecondOrderConeT(_) => SupportedConeTag::SecondOrderConeT,
            SupportedCone::ExponentialConeT => SupportedConeTag::ExponentialConeT,
            SupportedCone::PowerConeT(_) => SupportedConeTag::PowerConeT,
            SupportedCone::GenPowerConeT(_, _) => SupportedConeTag::GenPowerConeT,
        }
    }

    /// Name of the variant, e.g. "ZeroConeT"
    pub fn variant_name(&self) -> &'static str {
        match self {
            SupportedCone::ZeroConeT(_) => "ZeroConeT",
            SupportedCone::NonnegativeConeT(_) => "NonnegativeConeT",
            SupportedCone::SecondOrderConeT(_) => "SecondOrderConeT",
            SupportedCone::ExponentialConeT => "ExponentialConeT",
            SupportedCone::PowerConeT(_) => "PowerConeT",
            SupportedCone::GenPowerConeT(_, _) => "GenPowerConeT",
        }
    }
}

impl std::fmt::Display for SupportedCone {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.variant_name())
    }
}

/// Total dimension of a collection of cones, `None` on overflow
pub fn total_dim(cones: &[SupportedCone]) -> Option<usize> {
    cones
        .iter()
        .try_fold(0usize, |total, cone| total.checked_add(cone.dim()))
}

fn is_open_unit(a: f64) -> bool {
    0. < a && a < 1.
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn test_dim() {
        assert_eq!(SupportedCone::zero(5).unwrap().dim(), 5);
        assert_eq!(SupportedCone::nonnegative(4).unwrap().dim(), 4);
        assert_eq!(SupportedCone::second_order(3).unwrap().dim(), 3);
        assert_eq!(SupportedCone::exponential().dim(), 3);
        assert_eq!(SupportedCone::power(0.6).unwrap().dim(), 3);
        assert_eq!(
            SupportedCone::gen_power(vec![0.2, 0.3, 0.5], 2).unwrap().dim(),
            5
        );
    }

    #[test]
    fn test_total_dim() {
        let cones = vec![
            SupportedCone::ExponentialConeT,
            SupportedCone::ZeroConeT(2),
            SupportedCone::GenPowerConeT(vec![0.6, 0.4], 1),
        ];
        assert_eq!(total_dim(&cones), Some(8));
        assert_eq!(total_dim(&[]), Some(0));
    }

    #[test]
    fn test_total_dim_overflow() {
        let cones = vec![
            SupportedCone::NonnegativeConeT(usize::MAX),
            SupportedCone::NonnegativeConeT(2),
        ];
        assert!(cones.iter().all(|cone| cone.validate().is_ok()));
        assert_eq!(total_dim(&cones), None);
        assert_eq!(total_dim(&cones[..1]), Some(usize::MAX));
    }

    #[test]
    fn test_gen_power_dimension_overflow() {
        let cone = SupportedCone::GenPowerConeT(vec![0.5, 0.5], usize::MAX);
        assert_eq!(
            cone.validate(),
            Err(ConeError::DimensionOverflow("GenPowerConeT"))
        );
        assert_eq!(cone.dim(), usize::MAX);
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        assert_eq!(
            SupportedCone::zero(0),
            Err(ConeError::NonPositiveDimension("ZeroConeT"))
        );
        assert_eq!(
            SupportedCone::nonnegative(0),
            Err(ConeError::NonPositiveDimension("NonnegativeConeT"))
        );
        assert_eq!(
            SupportedCone::second_order(0),
            Err(ConeError::NonPositiveDimension("SecondOrderConeT"))
        );
    }

    #[test]
    fn test_power_range() {
        assert!(SupportedCone::power(0.5).is_ok());
        assert_eq!(SupportedCone::power(0.), Err(ConeError::BadPower(0.)));
        assert_eq!(SupportedCone::power(1.), Err(ConeError::BadPower(1.)));
        assert!(SupportedCone::power(f64::NAN).is_err());
    }

    #[test]
    fn test_gen_power_payload() {
        assert!(SupportedCone::gen_power(vec![0.6, 0.4], 1).is_ok());
        assert!(SupportedCone::gen_power(vec![0.1, 0.9], 1).is_ok());
        assert_eq!(
            SupportedCone::gen_power(vec![], 1),
            Err(ConeError::EmptyGenPower)
        );
        assert_eq!(
            SupportedCone::gen_power(vec![1.5, -0.5], 1),
            Err(ConeError::BadGenPower(1.5))
        );
        assert_eq!(
            SupportedCone::gen_power(vec![0.5, 0.4], 1),
            Err(ConeError::BadGenPowerSum(0.9))
        );
        assert_eq!(
            SupportedCone::gen_power(vec![0.5, 0.5], 0),
            Err(ConeError::NonPositiveDimension("GenPowerConeT"))
        );
    }

    #[test]
    fn test_gen_power_sum_tolerance() {
        // off by more than one ulp at 1.0
        let a = 0.5 + 4. * f64::EPSILON;
        assert!(matches!(
            SupportedCone::gen_power(vec![a, 0.5], 1),
            Err(ConeError::BadGenPowerSum(_))
        ));
    }

    #[test]
    fn test_directly_built_variants_validate() {
        assert!(SupportedCone::NonnegativeConeT(0).validate().is_err());
        assert!(SupportedCone::PowerConeT(2.).validate().is_err());
        assert!(SupportedCone::ExponentialConeT.validate().is_ok());
    }

    #[test]
    fn test_tags() {
        let cones = vec![
            SupportedCone::ZeroConeT(1),
            SupportedCone::NonnegativeConeT(1),
            SupportedCone::SecondOrderConeT(1),
            SupportedCone::ExponentialConeT,
            SupportedCone::PowerConeT(0.5),
            SupportedCone::GenPowerConeT(vec![0.5, 0.5], 1),
        ];
        for (i, cone) in cones.iter().enumerate() {
            assert_eq!(cone.tag() as usize, i);
            assert_eq!(SupportedConeTag::from_usize(i), Some(cone.tag()));
        }
        assert_eq!(SupportedConeTag::from_u32(6), None);
        assert_eq!(cones[4].to_string(), "PowerConeT");
    }
}
