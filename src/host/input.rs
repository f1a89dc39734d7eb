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

use std::{collections::VecDeque, fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::Result, rect::PointD};

/// Input delivered to the controller, positions already in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    PointerMove { position: PointD },
    PointerDown,
    PointerUp,
    /// Pointer left the surface; ends the gesture like a release
    PointerLeave,
    Wheel { position: PointD, delta: f64 },
    /// Abandons the current gesture without moving the view
    Cancel,
}

/// Source of input events, polled once per frame.
pub trait InputSource {
    /// Events that arrived since the previous poll, `None` once the source is exhausted.
    fn poll(&mut self) -> Option<Vec<InputEvent>>;
}

/// Input source that never produces events and never runs out
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self) -> Option<Vec<InputEvent>> {
        Some(Vec::new())
    }
}

/// Replays a recorded session, one list of events per frame.
///
/// The JSON form is an array of frames, each an array of events:
///
/// ```json
/// [
///   [{"pointer_move": {"position": {"x": 50, "y": 50}}}, "pointer_down"],
///   [{"pointer_move": {"position": {"x": 40, "y": 50}}}],
///   ["pointer_up", {"wheel": {"position": {"x": 40, "y": 50}, "delta": -1}}]
/// ]
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: Vec<Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let frames: Vec<Vec<InputEvent>> = serde_json::from_str(json)?;
        Ok(Self::new(frames))
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let frames: Vec<Vec<InputEvent>> = serde_json::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), frames = frames.len(), "loaded input script");
        Ok(Self::new(frames))
    }

    /// Number of frames not yet replayed
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<Vec<InputEvent>> {
        self.frames.pop_front()
    }
}
