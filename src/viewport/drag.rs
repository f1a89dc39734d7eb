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

use crate::rect::{PointD, VectorD};

use super::{clamp_offset, Bounds, Viewport};

/// State of the pan gesture.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position (surface coordinates) at gesture start
        anchor: PointD,
        /// Uncommitted content-space offset, recomputed every tick
        preview: VectorD,
    },
}

impl DragState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn anchor(&self) -> Option<PointD> {
        match self {
            Self::Dragging { anchor, .. } => Some(*anchor),
            Self::Idle => None,
        }
    }

    /// Live offset to add to the committed origin, zero when idle
    pub fn preview(&self) -> VectorD {
        match self {
            Self::Dragging { preview, .. } => *preview,
            Self::Idle => VectorD::default(),
        }
    }
}

/// Tracks one pan gesture at a time.
///
/// While dragging, the committed viewport is never touched: every tick recomputes the
/// preview from the pointer displacement since gesture start, and only [`DragEngine::end`]
/// hands the final offset back to be folded into the viewport. Dropping the preview with
/// [`DragEngine::cancel`] leaves the viewport as it was.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct DragEngine {
    state: DragState,
}

impl DragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_active()
    }

    pub fn preview(&self) -> VectorD {
        self.state.preview()
    }

    /// Starts a gesture anchored at `pointer`.
    ///
    /// Starting while already dragging restarts the gesture at the new anchor; the old
    /// preview is dropped.
    pub fn start(&mut self, pointer: PointD) {
        self.state = DragState::Dragging {
            anchor: pointer,
            preview: VectorD::default(),
        };
    }

    /// Recomputes the preview for the current pointer position and returns it.
    ///
    /// The offset is `(anchor - pointer) * scale`: a fixed pointer travel always pans the
    /// same surface distance regardless of zoom. In bounded sessions each axis is limited
    /// so that `viewport.origin + preview` stays inside the content. Idle engines return a
    /// zero offset.
    pub fn update(&mut self, viewport: &Viewport, bounds: &Bounds, pointer: PointD) -> VectorD {
        match &mut self.state {
            DragState::Dragging { anchor, preview } => {
                let offset = (*anchor - pointer).scale(viewport.scale());
                *preview = clamp_offset(viewport, bounds, offset);
                *preview
            }
            DragState::Idle => VectorD::default(),
        }
    }

    /// Ends the gesture and returns the offset to commit, `None` if no gesture was active.
    pub fn end(&mut self) -> Option<VectorD> {
        let preview = match self.state {
            DragState::Dragging { preview, .. } => Some(preview),
            DragState::Idle => None,
        };
        self.state = DragState::Idle;
        preview
    }

    /// Ends the gesture without committing. Returns whether a gesture was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_dragging();
        self.state = DragState::Idle;
        was_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rect::SizeD, viewport::ClampPolicy};

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
    fn test_default_is_idle() {
        let engine = DragEngine::new();
        assert!(!engine.is_dragging());
        assert_eq!(engine.state(), &DragState::Idle);
        assert_eq!(engine.preview(), VectorD::default());
        assert_eq!(engine.state().anchor(), None);
    }

    #[test]
    fn test_start_records_anchor() {
        let mut engine = DragEngine::new();
        engine.start(PointD::new(30.0, 40.0));
        assert!(engine.is_dragging());
        assert_eq!(engine.state().anchor(), Some(PointD::new(30.0, 40.0)));
        assert_eq!(engine.preview(), VectorD::default());
    }

    #[test]
    fn test_drag_left_scales_with_zoom() {
        let b = bounds(ClampPolicy::Bounded);
        let v = Viewport::new(200.0, 200.0, 2.0);
        let mut engine = DragEngine::new();

        engine.start(PointD::new(50.0, 50.0));
        let preview = engine.update(&v, &b, PointD::new(40.0, 50.0));

        assert_eq!(preview, VectorD::new(20.0, 0.0));
        assert_eq!(engine.preview(), VectorD::new(20.0, 0.0));
    }

    #[test]
    fn test_update_is_absolute_not_cumulative() {
        let b = bounds(ClampPolicy::Bounded);
        let v = Viewport::new(200.0, 200.0, 1.0);
        let mut engine = DragEngine::new();

        engine.start(PointD::new(50.0, 50.0));
        engine.update(&v, &b, PointD::new(40.0, 45.0));
        engine.update(&v, &b, PointD::new(40.0, 45.0));
        let preview = engine.update(&v, &b, PointD::new(30.0, 60.0));

        assert_eq!(preview, VectorD::new(20.0, -10.0));
    }

    #[test]
    fn test_preview_clamped_to_content() {
        let b = bounds(ClampPolicy::Bounded);
        let v = Viewport::new(10.0, 890.0, 1.0);
        let mut engine = DragEngine::new();

        engine.start(PointD::new(50.0, 50.0));
        // Dragging right/up would expose area left of and below the content
        let preview = engine.update(&v, &b, PointD::new(90.0, 0.0));
        assert_eq!(preview, VectorD::new(-10.0, 10.0));
        assert!(b.admits(&v.translate(preview)));
    }

    #[test]
    fn test_preview_unclamped_when_unbounded() {
        let b = bounds(ClampPolicy::Unbounded);
        let v = Viewport::new(10.0, 890.0, 1.0);
        let mut engine = DragEngine::new();

        engine.start(PointD::new(50.0, 50.0));
        let preview = engine.update(&v, &b, PointD::new(90.0, 0.0));
        assert_eq!(preview, VectorD::new(-40.0, 50.0));
    }

    #[test]
    fn test_update_when_idle() {
        let b = bounds(ClampPolicy::Bounded);
        let mut engine = DragEngine::new();
        let preview = engine.update(&Viewport::default(), &b, PointD::new(5.0, 5.0));
        assert_eq!(preview, VectorD::default());
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_restart_reanchors() {
        let b = bounds(ClampPolicy::Bounded);
        let v = Viewport::new(200.0, 200.0, 1.0);
        let mut engine = DragEngine::new();

        engine.start(PointD::new(50.0, 50.0));
        engine.update(&v, &b, PointD::new(20.0, 20.0));
        engine.start(PointD::new(20.0, 20.0));

        assert_eq!(engine.preview(), VectorD::default());
        assert_eq!(engine.state().anchor(), Some(PointD::new(20.0, 20.0)));
    }

    #[test]
    fn test_end_returns_preview_once() {
        let b = bounds(ClampPolicy::Bounded);
        let v = Viewport::new(200.0, 200.0, 1.0);
        let mut engine = DragEngine::new();

        engine.start(PointD::new(50.0, 50.0));
        engine.update(&v, &b, PointD::new(45.0, 55.0));

        assert_eq!(engine.end(), Some(VectorD::new(5.0, -5.0)));
        assert!(!engine.is_dragging());
        assert_eq!(engine.end(), None);
    }

    #[test]
    fn test_cancel() {
        let mut engine = DragEngine::new();
        assert!(!engine.cancel());

        engine.start(PointD::new(1.0, 1.0));
        assert!(engine.cancel());
        assert!(!engine.is_dragging());
        assert_eq!(engine.end(), None);
    }
}
