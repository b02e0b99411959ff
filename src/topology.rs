//! Piecewise-affine mappings between temporal spaces.
//!
//! A [`Topology`] carries ordinates from one space to another over a bounded
//! (or unbounded) input domain. Joins compose two topologies end to end,
//! intersecting bounds where they disagree; this is the algebra the space
//! graph walks with.

use crate::{AffineMapping, AffineTransform, ContinuousInterval, Error, Ordinate, Result};

/// Tolerance for snapping near-integer grid positions when flooring.
///
/// Binary division means `(k / rate) * rate` can land a hair under `k`;
/// without the snap, exact sample starts would floor to the previous index.
const GRID_SNAP: f64 = 1e-9;

fn snapped_floor(x: f64) -> f64 {
    let r = x.round();
    if (x - r).abs() < GRID_SNAP {
        r
    } else {
        x.floor()
    }
}

/// A held-value staircase: inputs are quantized onto a regular grid and each
/// cell maps to one output value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepMapping {
    /// The domain over which the staircase is defined.
    pub input_bounds: ContinuousInterval,
    /// The input ordinate at which cell 0 begins.
    pub grid_origin: Ordinate,
    /// The output value of cell 0.
    pub start_value: Ordinate,
    /// The held duration of each cell.
    pub step: Ordinate,
    /// The output increase from one cell to the next.
    pub increment: Ordinate,
}

impl StepMapping {
    fn cell_of(&self, ord: Ordinate) -> Result<Ordinate> {
        let relative = (ord - self.grid_origin).checked_div(self.step)?;
        Ok(Ordinate::new(snapped_floor(relative.value())))
    }

    fn project(&self, ord: Ordinate) -> Result<Ordinate> {
        if !self.input_bounds.contains(ord) {
            return Err(Error::OutOfBounds);
        }
        Ok(self.start_value + self.increment * self.cell_of(ord)?)
    }

    fn output_hull(&self) -> ContinuousInterval {
        if !self.input_bounds.is_finite() {
            return ContinuousInterval::EVERYTHING;
        }
        // Hull of the held values, extended one increment past the last cell.
        let first = self
            .cell_of(self.input_bounds.start)
            .unwrap_or(Ordinate::ZERO);
        let end_rel = (self.input_bounds.end - self.grid_origin)
            .checked_div(self.step)
            .unwrap_or(first);
        let snapped = snapped_floor(end_rel.value());
        let mut last = Ordinate::new(snapped);
        if (end_rel.value() - snapped).abs() < GRID_SNAP {
            // The span ends exactly on a cell edge; that cell is excluded.
            last = last - Ordinate::ONE;
        }
        let last = last.max(first);
        let lo = self.start_value + self.increment * first;
        let hi = self.start_value + self.increment * last + self.increment;
        ContinuousInterval::new(lo.min(hi), lo.max(hi))
    }
}

/// A piecewise-affine mapping from an input interval to an output interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Topology {
    /// The mapping defined nowhere.
    Empty,
    /// A single affine segment over its input bounds.
    Affine(AffineMapping),
    /// A held-value staircase (the continuous-to-discrete bridge).
    Step(StepMapping),
}

impl Topology {
    /// The identity mapping over `bounds`.
    #[must_use]
    pub fn identity(bounds: ContinuousInterval) -> Self {
        Self::Affine(AffineMapping::identity(bounds))
    }

    /// The identity mapping over the entire number line.
    #[must_use]
    pub fn identity_infinite() -> Self {
        Self::identity(ContinuousInterval::EVERYTHING)
    }

    /// An affine mapping.
    #[must_use]
    pub fn affine(mapping: AffineMapping) -> Self {
        Self::Affine(mapping)
    }

    /// A staircase over `bounds`: cell 0 starts at `bounds.start` with value
    /// `start_value`, each cell holds for `step` and advances the output by
    /// `increment`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if `step` is not strictly positive
    /// and finite.
    pub fn step_mapping(
        bounds: ContinuousInterval,
        start_value: Ordinate,
        step: Ordinate,
        increment: Ordinate,
    ) -> Result<Self> {
        if step <= Ordinate::ZERO || !step.is_finite() {
            return Err(Error::InvalidBounds("step must be positive and finite"));
        }
        Ok(Self::Step(StepMapping {
            input_bounds: bounds,
            grid_origin: bounds.start,
            start_value,
            step,
            increment,
        }))
    }

    /// Whether this is the empty mapping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The domain of the mapping, if it has one.
    #[must_use]
    pub fn input_bounds(&self) -> Option<ContinuousInterval> {
        match self {
            Self::Empty => None,
            Self::Affine(m) => Some(m.input_bounds),
            Self::Step(s) => Some(s.input_bounds),
        }
    }

    /// The image of the mapping, if it has one.
    #[must_use]
    pub fn output_bounds(&self) -> Option<ContinuousInterval> {
        match self {
            Self::Empty => None,
            Self::Affine(m) => Some(m.output_bounds()),
            Self::Step(s) => Some(s.output_hull()),
        }
    }

    /// Compose two mappings end to end: the result carries `a2b`'s inputs to
    /// `b2c`'s outputs. Where `a2b`'s image exceeds `b2c`'s domain the
    /// result is restricted; where they are disjoint the result is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] for grid compositions the staircase
    /// form cannot represent (a staircase after a reversing affine, a
    /// staircase into a staircase, or a staircase escaping the next
    /// mapping's domain).
    pub fn join(a2b: &Self, b2c: &Self) -> Result<Self> {
        match (a2b, b2c) {
            (Self::Empty, _) | (_, Self::Empty) => Ok(Self::Empty),
            (Self::Affine(a), Self::Affine(b)) => {
                let Some(overlap) = a.output_bounds().intersect(&b.input_bounds) else {
                    return Ok(Self::Empty);
                };
                let Some(input) = a.preimage(&overlap) else {
                    return Ok(Self::Empty);
                };
                Ok(Self::Affine(AffineMapping {
                    input_bounds: input,
                    xform: a.xform.then(&b.xform),
                }))
            }
            (Self::Affine(a), Self::Step(s)) => {
                if a.xform.scale == Ordinate::ZERO {
                    // A held input samples a single cell.
                    let held = s.project(a.xform.offset)?;
                    return Ok(Self::Affine(AffineMapping {
                        input_bounds: a.input_bounds,
                        xform: AffineTransform {
                            offset: held,
                            scale: Ordinate::ZERO,
                        },
                    }));
                }
                if a.xform.scale < Ordinate::ZERO {
                    return Err(Error::InvalidBounds(
                        "cannot quantize through a reversing transform",
                    ));
                }
                let Some(overlap) = a.output_bounds().intersect(&s.input_bounds) else {
                    return Ok(Self::Empty);
                };
                let Some(input) = a.preimage(&overlap) else {
                    return Ok(Self::Empty);
                };
                let inv = a.xform.inverted()?;
                Ok(Self::Step(StepMapping {
                    input_bounds: input,
                    grid_origin: inv.apply(s.grid_origin),
                    start_value: s.start_value,
                    step: s.step.checked_div(a.xform.scale)?,
                    increment: s.increment,
                }))
            }
            (Self::Step(s), Self::Affine(b)) => {
                let hull = s.output_hull();
                if b.input_bounds.intersect(&hull) != Some(hull) {
                    return Err(Error::InvalidBounds(
                        "staircase outputs escape the next mapping's domain",
                    ));
                }
                Ok(Self::Step(StepMapping {
                    input_bounds: s.input_bounds,
                    grid_origin: s.grid_origin,
                    start_value: b.xform.apply(s.start_value),
                    step: s.step,
                    increment: s.increment * b.xform.scale,
                }))
            }
            (Self::Step(_), Self::Step(_)) => {
                Err(Error::InvalidBounds("cannot join two staircases"))
            }
        }
    }

    /// The piecewise inverse. Affine segments with non-zero scale invert to
    /// one segment; freezes and staircases are lossy and contribute none.
    #[must_use]
    pub fn invert(&self) -> Vec<Self> {
        match self {
            Self::Empty | Self::Step(_) => Vec::new(),
            Self::Affine(m) => match m.xform.inverted() {
                Ok(inv) => vec![Self::Affine(AffineMapping {
                    input_bounds: m.output_bounds(),
                    xform: inv,
                })],
                Err(_) => Vec::new(),
            },
        }
    }

    /// Carry one ordinate through the mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOverlap`] for the empty mapping and
    /// [`Error::OutOfBounds`] for ordinates outside the input bounds.
    pub fn project_instantaneous_cc(&self, ord: Ordinate) -> Result<Ordinate> {
        match self {
            Self::Empty => Err(Error::NoOverlap),
            Self::Affine(m) => m.project(ord),
            Self::Step(s) => s.project(ord),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, end: f64) -> ContinuousInterval {
        ContinuousInterval::new(Ordinate::new(start), Ordinate::new(end))
    }

    fn translate(input: ContinuousInterval, by: f64) -> Topology {
        Topology::affine(AffineMapping {
            input_bounds: input,
            xform: AffineTransform::from_offset(Ordinate::new(by)),
        })
    }

    #[test]
    fn join_intersects_bounds() {
        // [3, inf) shifted by -3, then clipped by an identity over [0, 8)
        let a2b = translate(
            ContinuousInterval::new(Ordinate::new(3.0), Ordinate::INFINITY),
            -3.0,
        );
        let b2c = Topology::identity(seg(0.0, 8.0));
        let joined = Topology::join(&a2b, &b2c).unwrap();
        assert_eq!(joined.input_bounds(), Some(seg(3.0, 11.0)));
        assert_eq!(joined.output_bounds(), Some(seg(0.0, 8.0)));
        assert_eq!(
            joined.project_instantaneous_cc(Ordinate::new(3.0)).unwrap(),
            Ordinate::ZERO
        );
    }

    #[test]
    fn join_of_disjoint_mappings_is_empty() {
        let a2b = Topology::identity(seg(0.0, 1.0));
        let b2c = Topology::identity(seg(5.0, 6.0));
        assert!(Topology::join(&a2b, &b2c).unwrap().is_empty());
        assert_eq!(
            Topology::Empty.project_instantaneous_cc(Ordinate::ZERO),
            Err(Error::NoOverlap)
        );
    }

    #[test]
    fn reversing_join_reorders_bounds() {
        // x -> -2x + 8 over all inputs, clipped to a child span of [0, 8)
        let reverse = Topology::affine(AffineMapping {
            input_bounds: ContinuousInterval::EVERYTHING,
            xform: AffineTransform {
                offset: Ordinate::new(8.0),
                scale: Ordinate::new(-2.0),
            },
        });
        let child = Topology::identity(seg(0.0, 8.0));
        let joined = Topology::join(&reverse, &child).unwrap();
        assert_eq!(joined.input_bounds(), Some(seg(0.0, 4.0)));
        assert_eq!(joined.output_bounds(), Some(seg(0.0, 8.0)));
        assert_eq!(
            joined.project_instantaneous_cc(Ordinate::ZERO).unwrap(),
            Ordinate::new(8.0)
        );
    }

    #[test]
    fn invert_affine_round_trips() {
        let m = Topology::affine(AffineMapping {
            input_bounds: seg(0.0, 4.0),
            xform: AffineTransform {
                offset: Ordinate::new(8.0),
                scale: Ordinate::new(-2.0),
            },
        });
        let inverses = m.invert();
        assert_eq!(inverses.len(), 1);
        let inv = &inverses[0];
        assert_eq!(inv.input_bounds(), Some(seg(0.0, 8.0)));
        assert_eq!(
            inv.project_instantaneous_cc(Ordinate::ZERO).unwrap(),
            Ordinate::new(4.0)
        );
    }

    #[test]
    fn freeze_and_staircase_do_not_invert() {
        let freeze = Topology::affine(AffineMapping {
            input_bounds: seg(0.0, 4.0),
            xform: AffineTransform {
                offset: Ordinate::new(2.0),
                scale: Ordinate::ZERO,
            },
        });
        assert!(freeze.invert().is_empty());
        let stairs =
            Topology::step_mapping(seg(0.0, 1.0), Ordinate::ZERO, Ordinate::new(0.25), Ordinate::ONE)
                .unwrap();
        assert!(stairs.invert().is_empty());
    }

    #[test]
    fn staircase_holds_and_advances() {
        let stairs = Topology::step_mapping(
            seg(0.0, 8.0),
            Ordinate::ZERO,
            Ordinate::new(1.0 / 24.0),
            Ordinate::ONE,
        )
        .unwrap();
        let at = |x: f64| {
            stairs
                .project_instantaneous_cc(Ordinate::new(x))
                .unwrap()
                .value()
        };
        assert_eq!(at(0.0), 0.0);
        assert_eq!(at(0.02), 0.0);
        assert_eq!(at(1.0 / 24.0), 1.0);
        assert_eq!(at(1.0), 24.0);
    }

    #[test]
    fn step_rejects_degenerate_grid() {
        assert_eq!(
            Topology::step_mapping(seg(0.0, 1.0), Ordinate::ZERO, Ordinate::ZERO, Ordinate::ONE),
            Err(Error::InvalidBounds("step must be positive and finite"))
        );
    }
}
