#![allow(missing_docs)]

//! This module defines various unit types and their conversions.
//!
//! Litres and square metres are related through rainfall depth: 1 mm of rain falling on 1 m² of
//! roof is exactly 1 L of water.
use float_cmp::{ApproxEq, F64Margin};
use serde::{Deserialize, Serialize};

macro_rules! base_unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            Default,
            Serialize,
            Deserialize,
            derive_more::Add,
            derive_more::Sub,
            derive_more::Display,
        )]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub const fn new(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Whether the underlying value is neither infinite nor NaN
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// The smaller of two quantities
            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }

            /// The larger of two quantities
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }
        }

        impl std::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl std::ops::Neg for $name {
            type Output = $name;
            fn neg(self) -> $name {
                $name(-self.0)
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                $name(iter.map(|x| x.0).sum())
            }
        }

        impl ApproxEq for $name {
            type Margin = F64Margin;

            fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
                self.0.approx_eq(other.0, margin)
            }
        }
    };
}

macro_rules! unit_struct {
    ($name:ident) => {
        base_unit_struct!($name);

        impl std::ops::Mul<Dimensionless> for $name {
            type Output = $name;
            fn mul(self, rhs: Dimensionless) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Mul<$name> for Dimensionless {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Div<Dimensionless> for $name {
            type Output = $name;
            fn div(self, rhs: Dimensionless) -> $name {
                $name(self.0 / rhs.0)
            }
        }
    };
}

macro_rules! impl_mul {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Mul<$Rhs> for $Lhs {
            type Output = $Out;
            fn mul(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 * rhs.0)
            }
        }
        impl std::ops::Mul<$Lhs> for $Rhs {
            type Output = $Out;
            fn mul(self, lhs: $Lhs) -> $Out {
                <$Out>::new(self.0 * lhs.0)
            }
        }
    };
}

macro_rules! impl_div {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Div<$Rhs> for $Lhs {
            type Output = $Out;
            fn div(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 / rhs.0)
            }
        }
    };
}

base_unit_struct!(Dimensionless);

impl std::ops::Mul for Dimensionless {
    type Output = Dimensionless;

    fn mul(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 * rhs.0)
    }
}

impl std::ops::Div for Dimensionless {
    type Output = Dimensionless;

    fn div(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 / rhs.0)
    }
}

impl Dimensionless {
    pub fn powf(self, rhs: f64) -> Self {
        Dimensionless(self.0.powf(rhs))
    }

    pub fn ceil(self) -> Self {
        Dimensionless(self.0.ceil())
    }
}

// Base quantities
unit_struct!(Money);
unit_struct!(Years);
unit_struct!(Metres);
unit_struct!(Millimetres);
unit_struct!(SquareMetres);
unit_struct!(CubicMetres);
unit_struct!(Litres);

// Derived quantities
unit_struct!(MillimetresPerHour);
unit_struct!(LitresPerHour);
unit_struct!(LitresPerSecond);
unit_struct!(LitresPerHourPerSquareMetre);
unit_struct!(MoneyPerYear);
unit_struct!(MoneyPerLitre);
unit_struct!(MoneyPerMetre);
unit_struct!(MoneyPerSquareMetre);
unit_struct!(MoneyPerCubicMetre);

// Multiplication rules
impl_mul!(SquareMetres, Millimetres, Litres);
impl_mul!(SquareMetres, MillimetresPerHour, LitresPerHour);
impl_mul!(SquareMetres, Metres, CubicMetres);
impl_mul!(Litres, MoneyPerLitre, Money);
impl_mul!(Metres, MoneyPerMetre, Money);
impl_mul!(SquareMetres, MoneyPerSquareMetre, Money);
impl_mul!(CubicMetres, MoneyPerCubicMetre, Money);
impl_mul!(MoneyPerYear, Years, Money);

// Division rules
impl_div!(LitresPerHour, LitresPerHourPerSquareMetre, SquareMetres);
impl_div!(CubicMetres, SquareMetres, Metres);
impl_div!(Money, MoneyPerYear, Years);
impl_div!(MoneyPerYear, MoneyPerYear, Dimensionless);
impl_div!(Litres, Litres, Dimensionless);

const SECONDS_PER_HOUR: f64 = 3600.0;
const LITRES_PER_CUBIC_METRE: f64 = 1000.0;
const MILLIMETRES_PER_METRE: f64 = 1000.0;

impl Litres {
    pub fn to_cubic_metres(self) -> CubicMetres {
        CubicMetres(self.0 / LITRES_PER_CUBIC_METRE)
    }
}

impl CubicMetres {
    pub fn to_litres(self) -> Litres {
        Litres(self.0 * LITRES_PER_CUBIC_METRE)
    }
}

impl Millimetres {
    pub fn to_metres(self) -> Metres {
        Metres(self.0 / MILLIMETRES_PER_METRE)
    }
}

impl LitresPerHour {
    pub fn to_litres_per_second(self) -> LitresPerSecond {
        LitresPerSecond(self.0 / SECONDS_PER_HOUR)
    }
}

impl LitresPerSecond {
    pub fn to_litres_per_hour(self) -> LitresPerHour {
        LitresPerHour(self.0 * SECONDS_PER_HOUR)
    }
}
