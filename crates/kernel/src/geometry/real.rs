//! Exact constructible real numbers.
//!
//! Every coordinate reachable with straightedge and compass lives in a tower
//! of quadratic extensions over the rationals. A [`Real`] is either a rational
//! or a surd `a + b·√d`, where `a` and `b` only use radicals that sort below
//! `√d`. Signs are decided exactly, so comparisons never need a tolerance.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::{Serialize, Serializer};

/// Largest trial factor used when pulling squares out of a rational radicand.
const SQUARE_FACTOR_LIMIT: u32 = 1_000;

/// An exact real number closed under `+ - * /` and square roots of
/// non-negative values.
///
/// The representation is not unique (two radicals may be dependent), so
/// `Real` implements `Ord` through exact sign determination but deliberately
/// not `Hash`.
#[derive(Clone)]
pub struct Real(Arc<Repr>);

enum Repr {
    Rational(BigRational),
    /// `a + b·√root`; `b` is never zero.
    Surd { a: Real, b: Real, root: Radical },
}

/// A square root introduced while building a [`Real`].
///
/// Radicals are ordered by nesting depth, then by the value of the radicand.
/// A radicand only mentions radicals of lower depth.
#[derive(Clone)]
pub struct Radical(Arc<RadicalRepr>);

struct RadicalRepr {
    depth: u32,
    radicand: Real,
}

impl Radical {
    fn new(radicand: Real) -> Self {
        Self(Arc::new(RadicalRepr {
            depth: radicand.depth() + 1,
            radicand,
        }))
    }

    pub fn depth(&self) -> u32 {
        self.0.depth
    }

    pub fn radicand(&self) -> &Real {
        &self.0.radicand
    }
}

impl PartialEq for Radical {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Radical {}

impl PartialOrd for Radical {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Radical {
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.0, &other.0) {
            return Ordering::Equal;
        }
        self.depth()
            .cmp(&other.depth())
            .then_with(|| self.radicand().cmp(other.radicand()))
    }
}

/// Two operands rewritten over a common top radical.
enum Aligned<'a> {
    Rational(&'a BigRational, &'a BigRational),
    Surd {
        root: Radical,
        lhs: (Real, Real),
        rhs: (Real, Real),
    },
}

fn align<'a>(x: &'a Real, y: &'a Real) -> Aligned<'a> {
    let root = match (&*x.0, &*y.0) {
        (Repr::Rational(p), Repr::Rational(q)) => return Aligned::Rational(p, q),
        (Repr::Surd { root, .. }, Repr::Rational(_)) | (Repr::Rational(_), Repr::Surd { root, .. }) => {
            root.clone()
        }
        (Repr::Surd { root: r, .. }, Repr::Surd { root: s, .. }) => {
            if r >= s {
                r.clone()
            } else {
                s.clone()
            }
        }
    };
    Aligned::Surd {
        lhs: x.split(&root),
        rhs: y.split(&root),
        root,
    }
}

impl Real {
    pub fn zero() -> Self {
        Self::from(BigRational::zero())
    }

    pub fn one() -> Self {
        Self::from(BigRational::one())
    }

    /// `numer / denom`. Panics if `denom` is zero.
    pub fn ratio(numer: i64, denom: i64) -> Self {
        Self::from(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    fn surd(a: Real, b: Real, root: Radical) -> Self {
        if b.is_zero() {
            a
        } else {
            Self(Arc::new(Repr::Surd { a, b, root }))
        }
    }

    /// Coefficients of `self` over `root`, which must not sort below the
    /// radical `self` is built on.
    fn split(&self, root: &Radical) -> (Real, Real) {
        match &*self.0 {
            Repr::Surd { a, b, root: own } if own == root => (a.clone(), b.clone()),
            _ => (self.clone(), Real::zero()),
        }
    }

    /// Nesting depth of the outermost radical; zero for rationals.
    pub fn depth(&self) -> u32 {
        match &*self.0 {
            Repr::Rational(_) => 0,
            Repr::Surd { root, .. } => root.depth(),
        }
    }

    pub fn is_rational(&self) -> bool {
        matches!(&*self.0, Repr::Rational(_))
    }

    pub fn as_rational(&self) -> Option<&BigRational> {
        match &*self.0 {
            Repr::Rational(q) => Some(q),
            Repr::Surd { .. } => None,
        }
    }

    /// Exact sign of the value.
    pub fn signum(&self) -> Ordering {
        match &*self.0 {
            Repr::Rational(q) => q.cmp(&BigRational::zero()),
            Repr::Surd { a, b, root } => {
                let sa = a.signum();
                let sb = b.signum();
                if sb == Ordering::Equal {
                    return sa;
                }
                if sa == Ordering::Equal || sa == sb {
                    return sb;
                }
                // Opposite signs: the larger of |a| and |b|·√d wins.
                let excess = &(a * a) - &(&(b * b) * root.radicand());
                match excess.signum() {
                    Ordering::Greater => sa,
                    Ordering::Less => sb,
                    Ordering::Equal => Ordering::Equal,
                }
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.signum() == Ordering::Equal
    }

    pub fn abs(&self) -> Real {
        if self.signum() == Ordering::Less {
            -self
        } else {
            self.clone()
        }
    }

    pub fn square(&self) -> Real {
        self * self
    }

    /// Multiplicative inverse, `None` for zero.
    pub fn recip(&self) -> Option<Real> {
        match &*self.0 {
            Repr::Rational(q) => (!q.is_zero()).then(|| Real::from(q.recip())),
            Repr::Surd { a, b, root } => {
                if self.is_zero() {
                    return None;
                }
                let norm = &(a * a) - &(&(b * b) * root.radicand());
                match norm.recip() {
                    Some(inv) => Some(Real::surd(a * &inv, -&(b * &inv), root.clone())),
                    // The conjugate vanishes, so b·√d == a and the value is 2a.
                    None => (a + a).recip(),
                }
            }
        }
    }

    pub fn checked_div(&self, rhs: &Real) -> Option<Real> {
        rhs.recip().map(|inv| self * &inv)
    }

    /// Exact square root, `None` for negative values.
    ///
    /// Roots that already exist in the current field are returned without
    /// introducing a new radical.
    pub fn sqrt(&self) -> Option<Real> {
        match self.signum() {
            Ordering::Less => return None,
            Ordering::Equal => return Some(Real::zero()),
            Ordering::Greater => {}
        }
        if let Some(root) = self.exact_sqrt() {
            return Some(root);
        }
        let root = match &*self.0 {
            Repr::Rational(q) => {
                let (coefficient, radicand) = square_free_parts(q);
                return Some(Real::surd(
                    Real::zero(),
                    Real::from(coefficient),
                    Radical::new(Real::from(radicand)),
                ));
            }
            Repr::Surd { .. } => Radical::new(self.clone()),
        };
        Some(Real::surd(Real::zero(), Real::one(), root))
    }

    /// Square root inside the field already spanned by `self`, if one exists.
    ///
    /// For `a + b·√d` this tries the denesting `√(a + b√d) = p + q√d` with
    /// `p² = (a ± √(a² - b²d)) / 2`.
    fn exact_sqrt(&self) -> Option<Real> {
        match &*self.0 {
            Repr::Rational(q) => rational_sqrt(q).map(Real::from),
            Repr::Surd { a, b, root } => {
                let norm = &(a * a) - &(&(b * b) * root.radicand());
                if norm.signum() == Ordering::Less {
                    return None;
                }
                let s = norm.exact_sqrt()?;
                let two = Real::from(2);
                for half in [&(a + &s) / &two, &(a - &s) / &two] {
                    if half.signum() != Ordering::Greater {
                        continue;
                    }
                    if let Some(p) = half.exact_sqrt() {
                        let q = b / &(&p * &two);
                        let candidate = Real::surd(p, q, root.clone());
                        return Some(if candidate.signum() == Ordering::Less {
                            -candidate
                        } else {
                            candidate
                        });
                    }
                }
                None
            }
        }
    }

    /// Floating-point approximation, for rendering only.
    pub fn to_f64(&self) -> f64 {
        match &*self.0 {
            Repr::Rational(q) => rational_to_f64(q),
            Repr::Surd { a, b, root } => a.to_f64() + b.to_f64() * root.radicand().to_f64().sqrt(),
        }
    }
}

fn perfect_sqrt(n: &BigInt) -> Option<BigInt> {
    if n.is_negative() {
        return None;
    }
    let root = n.sqrt();
    (&root * &root == *n).then_some(root)
}

fn rational_sqrt(q: &BigRational) -> Option<BigRational> {
    let numer = perfect_sqrt(q.numer())?;
    let denom = perfect_sqrt(q.denom())?;
    Some(BigRational::new(numer, denom))
}

/// Splits a positive rational so that `√q = coefficient · √radicand`.
fn square_free_parts(q: &BigRational) -> (BigRational, BigInt) {
    // √(n/d) = √(n·d) / d
    let mut radicand = q.numer() * q.denom();
    let mut coefficient = BigInt::one();
    let mut factor: u32 = 2;
    while factor <= SQUARE_FACTOR_LIMIT {
        let square = BigInt::from(factor * factor);
        if square > radicand {
            break;
        }
        while (&radicand % &square).is_zero() {
            radicand /= &square;
            coefficient *= factor;
        }
        factor += if factor == 2 { 1 } else { 2 };
    }
    if let Some(root) = perfect_sqrt(&radicand) {
        coefficient *= root;
        radicand = BigInt::one();
    }
    (BigRational::new(coefficient, q.denom().clone()), radicand)
}

fn rational_to_f64(q: &BigRational) -> f64 {
    match (q.numer().to_f64(), q.denom().to_f64()) {
        (Some(n), Some(d)) => n / d,
        _ => f64::NAN,
    }
}

impl From<BigRational> for Real {
    fn from(value: BigRational) -> Self {
        Self(Arc::new(Repr::Rational(value)))
    }
}

impl From<BigInt> for Real {
    fn from(value: BigInt) -> Self {
        Self::from(BigRational::from_integer(value))
    }
}

impl From<i64> for Real {
    fn from(value: i64) -> Self {
        Self::from(BigInt::from(value))
    }
}

impl From<i32> for Real {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Real {}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.0, &other.0) {
            return Ordering::Equal;
        }
        match (&*self.0, &*other.0) {
            (Repr::Rational(p), Repr::Rational(q)) => p.cmp(q),
            _ => (self - other).signum(),
        }
    }
}

impl Neg for &Real {
    type Output = Real;

    fn neg(self) -> Real {
        match &*self.0 {
            Repr::Rational(q) => Real::from(-q),
            Repr::Surd { a, b, root } => Real(Arc::new(Repr::Surd {
                a: -a,
                b: -b,
                root: root.clone(),
            })),
        }
    }
}

impl Neg for Real {
    type Output = Real;

    fn neg(self) -> Real {
        -&self
    }
}

impl Add<&Real> for &Real {
    type Output = Real;

    fn add(self, rhs: &Real) -> Real {
        match align(self, rhs) {
            Aligned::Rational(p, q) => Real::from(p + q),
            Aligned::Surd {
                root,
                lhs: (a1, b1),
                rhs: (a2, b2),
            } => Real::surd(&a1 + &a2, &b1 + &b2, root),
        }
    }
}

impl Sub<&Real> for &Real {
    type Output = Real;

    fn sub(self, rhs: &Real) -> Real {
        match align(self, rhs) {
            Aligned::Rational(p, q) => Real::from(p - q),
            Aligned::Surd {
                root,
                lhs: (a1, b1),
                rhs: (a2, b2),
            } => Real::surd(&a1 - &a2, &b1 - &b2, root),
        }
    }
}

impl Mul<&Real> for &Real {
    type Output = Real;

    fn mul(self, rhs: &Real) -> Real {
        match align(self, rhs) {
            Aligned::Rational(p, q) => Real::from(p * q),
            Aligned::Surd {
                root,
                lhs: (a1, b1),
                rhs: (a2, b2),
            } => {
                // (a1 + b1√d)(a2 + b2√d) = (a1a2 + b1b2·d) + (a1b2 + a2b1)√d
                let a = &(&a1 * &a2) + &(&(&b1 * &b2) * root.radicand());
                let b = &(&a1 * &b2) + &(&a2 * &b1);
                Real::surd(a, b, root)
            }
        }
    }
}

impl Div<&Real> for &Real {
    type Output = Real;

    /// Panics on division by zero, like the rational types it wraps.
    fn div(self, rhs: &Real) -> Real {
        match rhs.recip() {
            Some(inv) => self * &inv,
            None => panic!("attempt to divide by zero"),
        }
    }
}

macro_rules! forward_owned_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Real> for Real {
            type Output = Real;

            fn $method(self, rhs: Real) -> Real {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&Real> for Real {
            type Output = Real;

            fn $method(self, rhs: &Real) -> Real {
                (&self).$method(rhs)
            }
        }

        impl $imp<Real> for &Real {
            type Output = Real;

            fn $method(self, rhs: Real) -> Real {
                self.$method(&rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Mul, mul);
forward_owned_binop!(Div, div);

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            Repr::Rational(q) => write!(f, "{q}"),
            Repr::Surd { a, b, root } => {
                let radicand = root.radicand();
                let radical = if radicand.is_rational() {
                    format!("√{radicand}")
                } else {
                    format!("√({radicand})")
                };
                let negative = b.signum() == Ordering::Less;
                let magnitude = b.abs();
                let term = if magnitude == Real::one() {
                    radical
                } else {
                    format!("{magnitude}·{radical}")
                };
                match (a.is_zero(), negative) {
                    (true, false) => write!(f, "{term}"),
                    (true, true) => write!(f, "-{term}"),
                    (false, false) => write!(f, "({a} + {term})"),
                    (false, true) => write!(f, "({a} - {term})"),
                }
            }
        }
    }
}

impl fmt::Debug for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Serialize for Real {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64) -> Real {
        Real::from(n)
    }

    fn sqrt(n: i64) -> Real {
        r(n).sqrt().unwrap()
    }

    #[test]
    fn test_rational_arithmetic() {
        let sum = Real::ratio(1, 3) + Real::ratio(1, 6);
        assert_eq!(sum, Real::ratio(1, 2));
        assert!(sum.is_rational());
        assert_eq!(r(6) / r(4), Real::ratio(3, 2));
    }

    #[test]
    fn test_perfect_square_stays_rational() {
        let root = Real::ratio(9, 4).sqrt().unwrap();
        assert_eq!(root, Real::ratio(3, 2));
        assert!(root.is_rational());
    }

    #[test]
    fn test_square_factors_are_extracted() {
        let root = sqrt(12);
        assert_eq!(root, r(2) * sqrt(3));
        assert_eq!(root.to_string(), "2·√3");
    }

    #[test]
    fn test_sqrt_squared_is_exact() {
        let root = sqrt(2);
        assert_eq!(root.square(), r(2));
        assert!(root.square().is_rational());
    }

    #[test]
    fn test_negative_has_no_sqrt() {
        assert!(r(-1).sqrt().is_none());
        assert_eq!(r(0).sqrt(), Some(Real::zero()));
    }

    #[test]
    fn test_sign_of_mixed_radicals() {
        assert_eq!((sqrt(2) - sqrt(3)).signum(), Ordering::Less);
        assert_eq!((r(2) - sqrt(3)).signum(), Ordering::Greater);
        assert!(sqrt(2) < Real::ratio(3, 2));
        assert!(sqrt(2) > Real::ratio(7, 5));
    }

    #[test]
    fn test_like_radicals_collect() {
        assert_eq!(sqrt(3) + sqrt(12), r(3) * sqrt(3));
        assert!((sqrt(3) - sqrt(3)).is_rational());
    }

    #[test]
    fn test_recip_rationalises() {
        let inv = sqrt(2).recip().unwrap();
        assert_eq!(inv, sqrt(2) / r(2));
        let unit = (r(1) + sqrt(2)) * (sqrt(2) - r(1));
        assert_eq!(unit, r(1));
        assert!(Real::zero().recip().is_none());
    }

    #[test]
    fn test_denesting() {
        // √(4 + 2√3) = 1 + √3
        let nested = (r(4) + r(2) * sqrt(3)).sqrt().unwrap();
        assert_eq!(nested, r(1) + sqrt(3));
        assert_eq!(nested.depth(), 1);
    }

    #[test]
    fn test_dependent_radicals_compare_equal() {
        // √(2 + √3) = (√6 + √2) / 2, although neither form denests into the other here
        let nested = (r(2) + sqrt(3)).sqrt().unwrap();
        let flat = (sqrt(6) + sqrt(2)) / r(2);
        assert_eq!(nested.depth(), 2);
        assert_eq!(nested, flat);
        assert!(nested.square() == r(2) + sqrt(3));
    }

    #[test]
    fn test_to_f64_approximates() {
        let value = r(4) * sqrt(3);
        assert!((value.to_f64() - 6.928203230275509).abs() < 1e-12);
        assert!((Real::ratio(8, 5).to_f64() - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Real::ratio(8, 5).to_string(), "8/5");
        assert_eq!((r(1) - sqrt(2)).to_string(), "(1 - √2)");
        assert_eq!((-sqrt(5)).to_string(), "-√5");
    }
}
