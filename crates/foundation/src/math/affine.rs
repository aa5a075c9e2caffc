//! 2D affine transforms in SVG matrix order.
//!
//! A matrix `[a, b, c, d, e, f]` maps a point as
//!
//! ```text
//! x' = a*x + c*y + e
//! y' = b*x + d*y + f
//! ```
//!
//! which is the layout `SVGMatrix` / `DOMMatrix` expose for `getScreenCTM()`.

use super::Vec2;

/// Determinants smaller than this are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine2 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2 {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Composition `self * other`: applies `other` first, then `self`.
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Returns `None` for singular or non-finite matrices.
    pub fn inverse(&self) -> Option<Self> {
        if !self.is_finite() {
            return None;
        }
        let det = self.determinant();
        if det.abs() < SINGULAR_EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Affine2;
    use crate::math::Vec2;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn apply_scale_then_translate() {
        let m = Affine2::translate(10.0, 20.0).multiply(&Affine2::scale(2.0, 0.5));
        assert_eq!(m.apply(Vec2::new(3.0, 4.0)), Vec2::new(16.0, 22.0));
    }

    #[test]
    fn inverse_round_trips_points() {
        let m = Affine2::new(1.5, 0.2, -0.3, 0.8, 40.0, -12.0);
        let inv = m.inverse().unwrap();
        let p = Vec2::new(123.0, -45.5);
        assert!(close(inv.apply(m.apply(p)), p));
        assert!(close(m.multiply(&inv).apply(p), p));
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(Affine2::scale(0.0, 1.0).inverse().is_none());
        assert!(Affine2::new(1.0, 2.0, 2.0, 4.0, 0.0, 0.0).inverse().is_none());
    }

    #[test]
    fn non_finite_matrix_has_no_inverse() {
        assert!(Affine2::new(f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0).inverse().is_none());
    }
}
