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

pub mod clamp;
pub mod compose;
pub mod drag;
pub mod zoom;

use crate::{
    error::{Error, Result},
    rect::{PointD, RectD, SizeD, VectorD},
};

pub use clamp::{clamp, clamp_offset};
pub use compose::compose;
pub use drag::{DragEngine, DragState};
pub use zoom::{ZoomDirection, ZoomOperator, ZOOM_MULTIPLIER};

/// Tolerance used when checking whether a viewport respects its bounds
const BOUNDS_EPSILON: f64 = 1.0e-9;

/// Whether viewports are kept inside the content or left free.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClampPolicy {
    /// Origin and scale are limited so the surface never shows area outside the content
    #[default]
    Bounded,
    /// Clamping is the identity, the viewport may wander off the content
    Unbounded,
}

/// Static limits of one viewing session.
///
/// Known once the backing asset has been loaded and the surface allocated. The scale range
/// is not required to be ordered; an inverted range resolves to `min_scale` (see
/// [`clamp::limit`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    surface: SizeD,
    content: SizeD,
    min_scale: f64,
    max_scale: f64,
    policy: ClampPolicy,
}

fn positive(what: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidBounds { what, value })
    }
}

impl Bounds {
    pub fn new(
        surface: SizeD,
        content: SizeD,
        min_scale: f64,
        max_scale: f64,
        policy: ClampPolicy,
    ) -> Result<Self> {
        Ok(Self {
            surface: SizeD::new(
                positive("surface width", surface.width())?,
                positive("surface height", surface.height())?,
            ),
            content: SizeD::new(
                positive("content width", content.width())?,
                positive("content height", content.height())?,
            ),
            min_scale: positive("min scale", min_scale)?,
            max_scale: positive("max scale", max_scale)?,
            policy,
        })
    }

    /// Bounds whose coarsest zoom level shows the full content width on the surface.
    ///
    /// `max_scale` becomes `content.width / surface.width`.
    pub fn fit_width(
        surface: SizeD,
        content: SizeD,
        min_scale: f64,
        policy: ClampPolicy,
    ) -> Result<Self> {
        let surface_width = positive("surface width", surface.width())?;
        let content_width = positive("content width", content.width())?;
        Self::new(
            surface,
            content,
            min_scale,
            content_width / surface_width,
            policy,
        )
    }

    pub fn surface(&self) -> SizeD {
        self.surface
    }

    pub fn content(&self) -> SizeD {
        self.content
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn policy(&self) -> ClampPolicy {
        self.policy
    }

    pub fn is_bounded(&self) -> bool {
        self.policy == ClampPolicy::Bounded
    }

    /// The surface as a rectangle at the origin, the destination of every blit
    pub fn surface_rect(&self) -> RectD {
        RectD::new_from_size(self.surface)
    }

    /// Largest origin allowed at `scale`; a negative component means the content is smaller
    /// than the view on that axis.
    pub fn max_origin(&self, scale: f64) -> VectorD {
        let visible = self.surface.scale(scale);
        VectorD::new(
            self.content.width() - visible.width(),
            self.content.height() - visible.height(),
        )
    }

    /// Checks the bounded invariant for `viewport`, with a small tolerance for float error.
    ///
    /// Always true for unbounded sessions.
    pub fn admits(&self, viewport: &Viewport) -> bool {
        if !self.is_bounded() {
            return true;
        }
        let max_origin = self.max_origin(viewport.scale());
        within(viewport.scale(), self.min_scale, self.max_scale)
            && within(viewport.x(), 0.0, max_origin.x())
            && within(viewport.y(), 0.0, max_origin.y())
    }
}

fn within(value: f64, min: f64, max: f64) -> bool {
    if max < min {
        (value - min).abs() <= BOUNDS_EPSILON
    } else {
        value >= min - BOUNDS_EPSILON && value <= max + BOUNDS_EPSILON
    }
}

/// The committed mapping from surface to content coordinates.
///
/// `origin` is the top-left of the visible region in content coordinates, `scale` the number
/// of content pixels per surface pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    origin: VectorD,
    scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Default::default(),
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self {
            origin: VectorD::new(x, y),
            scale,
        }
    }

    pub fn with_origin(origin: VectorD, scale: f64) -> Self {
        Self { origin, scale }
    }

    pub fn x(&self) -> f64 {
        self.origin.x()
    }

    pub fn y(&self) -> f64 {
        self.origin.y()
    }

    pub fn origin(&self) -> VectorD {
        self.origin
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the viewport moved by `offset` content pixels, scale unchanged
    pub fn translate(&self, offset: VectorD) -> Self {
        Self::with_origin(self.origin + offset, self.scale)
    }

    /// Converts a surface point to the content point displayed there.
    pub fn surface_to_content(&self, surface: &PointD) -> PointD {
        self.origin + surface.scale(self.scale)
    }

    /// Converts a content point to the surface point where it is displayed.
    pub fn content_to_surface(&self, content: &PointD) -> PointD {
        (*content - self.origin).unscale(self.scale)
    }
}
