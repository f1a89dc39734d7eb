// canvas-zoom -- Viewport transform engine for zooming and panning large images
//
// Copyright (c) 2024-2025 Martin van der Werff <github (at) newinnovations.nl>
//
// This file is part of canvas-zoom.
//
// canvas-zoom is free software: you can redistribute it and/or modify it under the terms of
// the GNU Affero General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR
// IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND
// FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR
// BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
// STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use crate::{
    error::{Error, Result},
    rect::PointD,
};

use super::{clamp, Bounds, Viewport};

/// Scale multiplier applied per wheel notch
pub const ZOOM_MULTIPLIER: f64 = 1.1;

/// Direction of a single, discrete zoom step.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum ZoomDirection {
    /// Fewer content pixels per surface pixel, the image grows
    In,
    /// More content pixels per surface pixel, the image shrinks
    Out,
}

impl ZoomDirection {
    /// Direction of a wheel event: scrolling away (positive delta) zooms out, scrolling toward
    /// the user zooms in. A zero (or NaN) delta carries no direction.
    pub fn from_wheel(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Out)
        } else if delta < 0.0 {
            Some(Self::In)
        } else {
            None
        }
    }

    fn exponent(self) -> i32 {
        match self {
            Self::In => -1,
            Self::Out => 1,
        }
    }
}

/// Computes anchor-preserving zoom steps.
///
/// Each step multiplies the scale by `factor` (or divides by it) and moves the origin so
/// the content point under the anchor stays under the anchor. The result is clamped,
/// so near the content edges the bounds win over the anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomOperator {
    factor: f64,
}

impl Default for ZoomOperator {
    fn default() -> Self {
        Self {
            factor: ZOOM_MULTIPLIER,
        }
    }
}

impl ZoomOperator {
    pub fn new(factor: f64) -> Result<Self> {
        if factor.is_finite() && factor > 1.0 {
            Ok(Self { factor })
        } else {
            Err(Error::InvalidZoomFactor(factor))
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Applies one wheel event at `anchor` (surface coordinates).
    ///
    /// Only the sign of `wheel_delta` matters; a zero delta returns `viewport` unchanged.
    pub fn zoom(
        &self,
        viewport: &Viewport,
        bounds: &Bounds,
        anchor: &PointD,
        wheel_delta: f64,
    ) -> Viewport {
        match ZoomDirection::from_wheel(wheel_delta) {
            Some(direction) => self.zoom_at(viewport, bounds, anchor, direction),
            None => *viewport,
        }
    }

    /// Zooms one step around the surface center.
    pub fn zoom_step(
        &self,
        viewport: &Viewport,
        bounds: &Bounds,
        direction: ZoomDirection,
    ) -> Viewport {
        self.zoom_at(viewport, bounds, &bounds.surface().center(), direction)
    }

    /// Zooms one step in `direction` keeping the content under `anchor` in place.
    pub fn zoom_at(
        &self,
        viewport: &Viewport,
        bounds: &Bounds,
        anchor: &PointD,
        direction: ZoomDirection,
    ) -> Viewport {
        let new_scale = viewport.scale() * self.factor.powi(direction.exponent());

        // Content point under the anchor with the old scale, then the origin that puts
        // it back under the anchor with the new scale
        let content_anchor = viewport.surface_to_content(anchor);
        let origin = content_anchor - anchor.scale(new_scale);

        clamp(&Viewport::with_origin(origin, new_scale), bounds)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{rect::SizeD, viewport::ClampPolicy};

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    fn bounds(policy: ClampPolicy) -> Bounds {
        Bounds::new(
            SizeD::new(100.0, 100.0),
            SizeD::new(1000.0, 1000.0),
            1.0,
            10.0,
            policy,
        )
        .unwrap()
    }

    #[test]
    fn test_direction_from_wheel() {
        assert_eq!(ZoomDirection::from_wheel(3.0), Some(ZoomDirection::Out));
        assert_eq!(ZoomDirection::from_wheel(-0.01), Some(ZoomDirection::In));
        assert_eq!(ZoomDirection::from_wheel(0.0), None);
        assert_eq!(ZoomDirection::from_wheel(-0.0), None);
        assert_eq!(ZoomDirection::from_wheel(f64::NAN), None);
    }

    #[test]
    fn test_new_rejects_bad_factor() {
        assert!(ZoomOperator::new(1.0).is_err());
        assert!(ZoomOperator::new(0.5).is_err());
        assert!(ZoomOperator::new(f64::INFINITY).is_err());
        assert_eq!(ZoomOperator::new(1.25).unwrap().factor(), 1.25);
        assert_eq!(ZoomOperator::default().factor(), ZOOM_MULTIPLIER);
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let op = ZoomOperator::default();
        let b = bounds(ClampPolicy::Bounded);
        let v = Viewport::new(12.0, 34.0, 5.0);
        assert_eq!(op.zoom(&v, &b, &PointD::new(50.0, 50.0), 0.0), v);
    }

    #[test]
    fn test_only_sign_of_delta_matters() {
        let op = ZoomOperator::default();
        let b = bounds(ClampPolicy::Bounded);
        let v = Viewport::new(100.0, 100.0, 5.0);
        let anchor = PointD::new(30.0, 70.0);
        assert_eq!(
            op.zoom(&v, &b, &anchor, -1.0),
            op.zoom(&v, &b, &anchor, -120.0)
        );
        assert_eq!(op.zoom(&v, &b, &anchor, 0.3), op.zoom(&v, &b, &anchor, 53.0));
    }

    #[test]
    fn test_scenario_zoom_in_from_max_scale() {
        let op = ZoomOperator::default();
        let b = bounds(ClampPolicy::Bounded);
        let v = Viewport::new(0.0, 0.0, 10.0);

        let zoomed = op.zoom(&v, &b, &PointD::new(50.0, 50.0), -1.0);

        let expected_scale = 10.0 / 1.1;
        let expected_origin = 500.0 - 50.0 * expected_scale;
        assert!(approx_eq(zoomed.scale(), expected_scale, 1e-9));
        assert!(approx_eq(zoomed.x(), expected_origin, 1e-9));
        assert!(approx_eq(zoomed.y(), expected_origin, 1e-9));
        assert!(zoomed.x() >= 0.0 && zoomed.x() <= 1000.0 - 100.0 * zoomed.scale());
    }

    proptest! {
        #[test]
        fn prop_anchor_invariance_unclamped(
            x in -1.0e4..1.0e4f64,
            y in -1.0e4..1.0e4f64,
            scale in 0.01..100.0f64,
            ax in 0.0..100.0f64,
            ay in 0.0..100.0f64,
            factor in 1.01..3.0f64,
            zoom_out in any::<bool>(),
        ) {
            let op = ZoomOperator::new(factor).unwrap();
            let b = bounds(ClampPolicy::Unbounded);
            let v = Viewport::new(x, y, scale);
            let anchor = PointD::new(ax, ay);
            let delta = if zoom_out { 1.0 } else { -1.0 };

            let before = v.surface_to_content(&anchor);
            let after = op.zoom(&v, &b, &anchor, delta).surface_to_content(&anchor);

            // Relative to the magnitudes involved in the round trip
            let tolerance = 1e-9 * (1.0 + x.abs().max(y.abs()) + 100.0 * scale * factor);
            prop_assert!(approx_eq(before.x(), after.x(), tolerance), "{:?} != {:?}", before, after);
            prop_assert!(approx_eq(before.y(), after.y(), tolerance), "{:?} != {:?}", before, after);
        }
    }

    #[test]
    fn test_anchor_invariance_when_clamp_does_not_engage() {
        let op = ZoomOperator::default();
        let b = bounds(ClampPolicy::Bounded);
        let v = Viewport::new(300.0, 300.0, 4.0);
        let anchor = PointD::new(40.0, 60.0);

        let zoomed = op.zoom(&v, &b, &anchor, 1.0);
        let before = v.surface_to_content(&anchor);
        let after = zoomed.surface_to_content(&anchor);
        assert!(approx_eq(zoomed.scale(), 4.4, 1e-9));
        assert!(approx_eq(before.x(), after.x(), 1e-9));
        assert!(approx_eq(before.y(), after.y(), 1e-9));
    }

    #[test]
    fn test_clamp_wins_over_anchor() {
        let op = ZoomOperator::default();
        let b = bounds(ClampPolicy::Bounded);
        // Zoomed in at the top-left corner, zooming out around the far corner would
        // move the origin below zero
        let v = Viewport::new(0.0, 0.0, 1.0);
        let zoomed = op.zoom(&v, &b, &PointD::new(100.0, 100.0), 1.0);
        assert!(approx_eq(zoomed.scale(), 1.1, 1e-9));
        assert_eq!(zoomed.x(), 0.0);
        assert_eq!(zoomed.y(), 0.0);
    }

    #[test]
    fn test_scale_limits() {
        let op = ZoomOperator::default();
        let b = bounds(ClampPolicy::Bounded);
        let anchor = PointD::new(50.0, 50.0);

        let v = op.zoom(&Viewport::new(0.0, 0.0, 10.0), &b, &anchor, 1.0);
        assert_eq!(v.scale(), 10.0);

        let v = op.zoom(&Viewport::new(0.0, 0.0, 1.0), &b, &anchor, -1.0);
        assert_eq!(v.scale(), 1.0);
    }

    #[test]
    fn test_zoom_step_uses_surface_center() {
        let op = ZoomOperator::default();
        let b = bounds(ClampPolicy::Bounded);
        let v = Viewport::new(200.0, 200.0, 5.0);

        assert_eq!(
            op.zoom_step(&v, &b, ZoomDirection::In),
            op.zoom(&v, &b, &PointD::new(50.0, 50.0), -1.0)
        );
        assert_eq!(
            op.zoom_step(&v, &b, ZoomDirection::Out),
            op.zoom(&v, &b, &PointD::new(50.0, 50.0), 1.0)
        );
    }

    #[test]
    fn test_zoom_in_then_out_returns() {
        let op = ZoomOperator::default();
        let b = bounds(ClampPolicy::Unbounded);
        let v = Viewport::new(123.0, 456.0, 2.0);
        let anchor = PointD::new(10.0, 90.0);

        let back = op.zoom(&op.zoom(&v, &b, &anchor, -1.0), &b, &anchor, 1.0);
        assert!(approx_eq(back.scale(), v.scale(), 1e-12));
        assert!(approx_eq(back.x(), v.x(), 1e-9));
        assert!(approx_eq(back.y(), v.y(), 1e-9));
    }
}
