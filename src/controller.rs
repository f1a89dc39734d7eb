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
    host::InputEvent,
    rect::{PointD, RectD},
    viewport::{
        clamp, compose, Bounds, DragEngine, DragState, Viewport, ZoomDirection, ZoomOperator,
    },
};

/// State that only exists once the asset dimensions are known
#[derive(Debug, Clone)]
struct Session {
    bounds: Bounds,
    viewport: Viewport,
    drag: DragEngine,
}

impl Session {
    fn commit_drag(&mut self) -> bool {
        match self.drag.end() {
            Some(preview) => {
                self.viewport = clamp(&self.viewport.translate(preview), &self.bounds);
                true
            }
            None => false,
        }
    }
}

/// Owns the viewport and pan gesture of one surface.
///
/// Input handlers call the `on_*` methods, the frame scheduler calls [`tick`] and hands the
/// returned source rectangle to the renderer. All other components are pure; this is the
/// only place where state changes. Controllers for different surfaces are independent.
///
/// [`tick`]: ViewportController::tick
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    zoom: ZoomOperator,
    session: Option<Session>,
    pointer: PointD,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller using a custom zoom step.
    pub fn with_zoom(zoom: ZoomOperator) -> Self {
        Self {
            zoom,
            ..Default::default()
        }
    }

    /// Starts a session for `bounds`, showing the content from its top-left corner at the
    /// coarsest zoom. Any previous session, including an active gesture, is discarded.
    pub fn initialize(&mut self, bounds: Bounds) {
        let viewport = clamp(&Viewport::new(0.0, 0.0, bounds.max_scale()), &bounds);
        tracing::info!(
            surface = ?bounds.surface(),
            content = ?bounds.content(),
            min_scale = bounds.min_scale(),
            max_scale = bounds.max_scale(),
            policy = ?bounds.policy(),
            "viewport initialized"
        );
        self.session = Some(Session {
            bounds,
            viewport,
            drag: DragEngine::new(),
        });
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(Error::Uninitialized)
    }

    fn session_mut(&mut self) -> Result<&mut Session> {
        self.session.as_mut().ok_or(Error::Uninitialized)
    }

    pub fn bounds(&self) -> Result<&Bounds> {
        Ok(&self.session()?.bounds)
    }

    /// The committed viewport, without any live drag preview
    pub fn viewport(&self) -> Result<Viewport> {
        Ok(self.session()?.viewport)
    }

    pub fn drag_state(&self) -> Result<&DragState> {
        Ok(self.session()?.drag.state())
    }

    pub fn is_dragging(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.drag.is_dragging())
    }

    pub fn zoom_operator(&self) -> &ZoomOperator {
        &self.zoom
    }

    /// Last known pointer position in surface coordinates
    pub fn pointer(&self) -> PointD {
        self.pointer
    }

    pub fn on_pointer_move(&mut self, pointer: PointD) {
        self.pointer = pointer;
    }

    /// Zooms one wheel step around `anchor`.
    ///
    /// During a gesture the preview so far is committed and the gesture restarts at
    /// `anchor`, so the pan continues from the zoomed view without a jump.
    pub fn on_wheel(&mut self, anchor: PointD, delta: f64) -> Result<Viewport> {
        let zoom = self.zoom;
        let session = self.session_mut()?;
        if ZoomDirection::from_wheel(delta).is_none() {
            return Ok(session.viewport);
        }
        if session.commit_drag() {
            session.drag.start(anchor);
        }
        session.viewport = zoom.zoom(&session.viewport, &session.bounds, &anchor, delta);
        tracing::debug!(
            x = session.viewport.x(),
            y = session.viewport.y(),
            scale = session.viewport.scale(),
            "zoom"
        );
        Ok(session.viewport)
    }

    /// Zooms one step around the surface center, as a keyboard shortcut would.
    pub fn zoom_step(&mut self, direction: ZoomDirection) -> Result<Viewport> {
        let center = self.bounds()?.surface().center();
        let delta = match direction {
            ZoomDirection::In => -1.0,
            ZoomDirection::Out => 1.0,
        };
        self.on_wheel(center, delta)
    }

    /// Starts a pan gesture at the last known pointer position.
    pub fn on_gesture_start(&mut self) -> Result<()> {
        let pointer = self.pointer;
        let session = self.session_mut()?;
        session.drag.start(pointer);
        tracing::debug!(x = pointer.x(), y = pointer.y(), "gesture start");
        Ok(())
    }

    /// Ends the pan gesture, folding its preview into the viewport. A no-op without an
    /// active gesture.
    pub fn on_gesture_end(&mut self) -> Result<()> {
        let session = self.session_mut()?;
        if session.commit_drag() {
            tracing::debug!(
                x = session.viewport.x(),
                y = session.viewport.y(),
                "gesture committed"
            );
        } else {
            tracing::trace!("gesture end without active gesture ignored");
        }
        Ok(())
    }

    /// Abandons the pan gesture; the viewport stays where it was before the gesture.
    pub fn on_gesture_cancel(&mut self) -> Result<()> {
        if self.session_mut()?.drag.cancel() {
            tracing::debug!("gesture cancelled");
        }
        Ok(())
    }

    /// Advances the drag for `pointer` and returns the source rectangle for this frame.
    pub fn tick(&mut self, pointer: PointD) -> Result<RectD> {
        let session = self.session_mut()?;
        session
            .drag
            .update(&session.viewport, &session.bounds, pointer);
        let rect = compose(
            &session.viewport,
            session.drag.state(),
            &session.bounds,
        );
        self.pointer = pointer;
        Ok(rect)
    }

    /// Source rectangle for the current state without advancing the drag
    pub fn frame(&self) -> Result<RectD> {
        let session = self.session()?;
        Ok(compose(
            &session.viewport,
            session.drag.state(),
            &session.bounds,
        ))
    }

    /// Routes one input event to the matching handler.
    pub fn dispatch(&mut self, event: &InputEvent) -> Result<()> {
        match *event {
            InputEvent::PointerMove { position } => {
                self.on_pointer_move(position);
                Ok(())
            }
            InputEvent::PointerDown => self.on_gesture_start(),
            InputEvent::PointerUp | InputEvent::PointerLeave => self.on_gesture_end(),
            InputEvent::Cancel => self.on_gesture_cancel(),
            InputEvent::Wheel { position, delta } => {
                self.on_pointer_move(position);
                self.on_wheel(position, delta).map(|_| ())
            }
        }
    }
}
