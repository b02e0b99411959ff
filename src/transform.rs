//! Affine transforms over ordinates.

use crate::{ContinuousInterval, Error, Ordinate, Result};

/// A 1-D affine transform, applied as `x * scale + offset`.
///
/// Negative scales reverse direction — the model for reverse-speed warps,
/// where `scale = -1.0` plays media backwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    /// Translation applied after scaling.
    pub offset: Ordinate,
    /// Speed multiplier. `0` holds a single input value (a freeze).
    pub scale: Ordinate,
}

impl AffineTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        offset: Ordinate::ZERO,
        scale: Ordinate::ONE,
    };

    /// A pure translation by `offset`.
    #[must_use]
    pub fn from_offset(offset: Ordinate) -> Self {
        Self {
            offset,
            scale: Ordinate::ONE,
        }
    }

    /// Apply the transform to one ordinate.
    #[must_use]
    pub fn apply(&self, ord: Ordinate) -> Ordinate {
        ord * self.scale + self.offset
    }

    /// Compose with a transform applied after this one.
    #[must_use]
    pub fn then(&self, after: &Self) -> Self {
        Self {
            offset: self.offset * after.scale + after.offset,
            scale: self.scale * after.scale,
        }
    }

    /// The inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInvertible`] when `scale == 0`.
    pub fn inverted(&self) -> Result<Self> {
        if self.scale == Ordinate::ZERO {
            return Err(Error::NotInvertible);
        }
        let scale = Ordinate::ONE.checked_div(self.scale)?;
        Ok(Self {
            offset: -self.offset * scale,
            scale,
        })
    }

    /// The image of an interval, with edges re-ordered.
    ///
    /// A negative scale maps `[a, b)` onto a reversed span; the result is
    /// re-ordered so it remains a valid closed-open interval. A zero scale
    /// collapses the image to an instant at `offset`.
    #[must_use]
    pub fn applied_to_interval(&self, interval: &ContinuousInterval) -> ContinuousInterval {
        if self.scale == Ordinate::ZERO {
            return ContinuousInterval::instant(self.offset);
        }
        let a = self.apply(interval.start);
        let b = self.apply(interval.end);
        ContinuousInterval::new(a.min(b), a.max(b))
    }
}

/// A total affine function restricted to an input interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMapping {
    /// The domain over which the mapping is defined.
    pub input_bounds: ContinuousInterval,
    /// The transform carrying inputs to outputs.
    pub xform: AffineTransform,
}

impl AffineMapping {
    /// The identity mapping over `bounds`.
    #[must_use]
    pub fn identity(bounds: ContinuousInterval) -> Self {
        Self {
            input_bounds: bounds,
            xform: AffineTransform::IDENTITY,
        }
    }

    /// The image of the input bounds.
    #[must_use]
    pub fn output_bounds(&self) -> ContinuousInterval {
        self.xform.applied_to_interval(&self.input_bounds)
    }

    /// The preimage of `target` under this mapping, clipped to the input
    /// bounds. For a zero scale the preimage is the whole domain when the
    /// held value lands in `target`, and empty otherwise.
    #[must_use]
    pub fn preimage(&self, target: &ContinuousInterval) -> Option<ContinuousInterval> {
        if self.xform.scale == Ordinate::ZERO {
            let held = self.xform.offset;
            return (target.contains(held) || target.start == held)
                .then_some(self.input_bounds);
        }
        // scale != 0, so the inverse exists
        let inv = match self.xform.inverted() {
            Ok(inv) => inv,
            Err(_) => return None,
        };
        inv.applied_to_interval(target).intersect(&self.input_bounds)
    }

    /// Map one ordinate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `ord` is outside the input bounds.
    pub fn project(&self, ord: Ordinate) -> Result<Ordinate> {
        if !self.input_bounds.contains(ord) {
            return Err(Error::OutOfBounds);
        }
        Ok(self.xform.apply(ord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, end: f64) -> ContinuousInterval {
        ContinuousInterval::new(Ordinate::new(start), Ordinate::new(end))
    }

    #[test]
    fn apply_and_compose() {
        let shift = AffineTransform::from_offset(Ordinate::new(3.0));
        let double = AffineTransform {
            offset: Ordinate::ZERO,
            scale: Ordinate::new(2.0),
        };
        assert_eq!(shift.apply(Ordinate::new(4.0)), Ordinate::new(7.0));
        // (x + 3) * 2
        let composed = shift.then(&double);
        assert_eq!(composed.apply(Ordinate::new(4.0)), Ordinate::new(14.0));
    }

    #[test]
    fn inversion_round_trips() {
        let t = AffineTransform {
            offset: Ordinate::new(8.0),
            scale: Ordinate::new(-2.0),
        };
        let inv = t.inverted().unwrap();
        let x = Ordinate::new(2.5);
        assert_eq!(inv.apply(t.apply(x)), x);
    }

    #[test]
    fn freeze_is_not_invertible() {
        let freeze = AffineTransform {
            offset: Ordinate::new(5.0),
            scale: Ordinate::ZERO,
        };
        assert_eq!(freeze.inverted(), Err(Error::NotInvertible));
    }

    #[test]
    fn negative_scale_reorders_interval_image() {
        let t = AffineTransform {
            offset: Ordinate::new(8.0),
            scale: Ordinate::new(-2.0),
        };
        assert_eq!(t.applied_to_interval(&seg(0.0, 4.0)), seg(0.0, 8.0));
    }

    #[test]
    fn preimage_clips_to_domain() {
        let m = AffineMapping::identity(seg(1.0, 9.0));
        assert_eq!(m.preimage(&seg(0.0, 8.0)), Some(seg(1.0, 8.0)));
        let shifted = AffineMapping {
            input_bounds: seg(0.0, 10.0),
            xform: AffineTransform::from_offset(Ordinate::new(-3.0)),
        };
        assert_eq!(shifted.preimage(&seg(0.0, 8.0)), Some(seg(3.0, 10.0)));
    }
}
