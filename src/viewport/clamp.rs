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

use crate::rect::VectorD;

use super::{Bounds, Viewport};

/// Limits `value` to `[min, max]`.
///
/// When the range is inverted (`max < min`) the lower limit wins. This covers content that is
/// smaller than the view (the origin stays at 0 and the far edge overscans) and a scale range
/// given upside down.
pub fn limit(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Clamps a candidate viewport against `bounds`.
///
/// Scale is limited first, the origin is then limited using the clamped scale. Pure and
/// idempotent; the identity for unbounded sessions.
pub fn clamp(viewport: &Viewport, bounds: &Bounds) -> Viewport {
    if !bounds.is_bounded() {
        return *viewport;
    }
    let scale = limit(viewport.scale(), bounds.min_scale(), bounds.max_scale());
    let max_origin = bounds.max_origin(scale);
    Viewport::new(
        limit(viewport.x(), 0.0, max_origin.x()),
        limit(viewport.y(), 0.0, max_origin.y()),
        scale,
    )
}

/// Clamps a drag offset so that `viewport.origin + offset` stays inside the content.
///
/// Works on the offset alone, the committed viewport is left untouched.
pub fn clamp_offset(viewport: &Viewport, bounds: &Bounds, offset: VectorD) -> VectorD {
    if !bounds.is_bounded() {
        return offset;
    }
    let max_origin = bounds.max_origin(viewport.scale());
    VectorD::new(
        limit(offset.x(), -viewport.x(), max_origin.x() - viewport.x()),
        limit(offset.y(), -viewport.y(), max_origin.y() - viewport.y()),
    )
}
