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

//! Collaborators around the viewport core: where content dimensions, input events and
//! frame ticks come from, and where composed frames go.

mod asset;
mod input;
mod renderer;
mod scheduler;

pub use asset::{AssetProvider, FixedAsset, ImageAsset};
pub use input::{IdleInput, InputEvent, InputSource, ScriptedInput};
pub use renderer::{FrameRecord, JsonLinesRenderer, Renderer};
pub use scheduler::{IntervalScheduler, ManualScheduler, Scheduler};

use crate::{controller::ViewportController, error::Result};

/// Drives `controller` until the scheduler or the input runs out.
///
/// For every tick the pending input events are applied first, then the drag is advanced
/// with the current pointer and the composed frame is handed to the renderer. Returns the
/// number of frames rendered.
pub fn run(
    controller: &mut ViewportController,
    input: &mut dyn InputSource,
    scheduler: &mut dyn Scheduler,
    renderer: &mut dyn Renderer,
) -> Result<u64> {
    let destination = controller.bounds()?.surface_rect();
    let mut frames = 0;
    while let Some(tick) = scheduler.next_tick()? {
        let Some(events) = input.poll() else {
            tracing::debug!(tick, "input exhausted");
            break;
        };
        for event in &events {
            controller.dispatch(event)?;
        }
        let source = controller.tick(controller.pointer())?;
        renderer.render(&source, &destination)?;
        frames += 1;
    }
    tracing::debug!(frames, "run finished");
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        rect::{PointD, RectD, SizeD},
        viewport::{Bounds, ClampPolicy},
    };

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(RectD, RectD)>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, source: &RectD, destination: &RectD) -> Result<()> {
            self.frames.push((*source, *destination));
            Ok(())
        }
    }

    fn controller() -> ViewportController {
        let mut controller = ViewportController::new();
        controller.initialize(
            Bounds::new(
                SizeD::new(100.0, 100.0),
                SizeD::new(1000.0, 1000.0),
                1.0,
                2.0,
                ClampPolicy::Bounded,
            )
            .unwrap(),
        );
        controller
    }

    #[test]
    fn test_run_requires_initialize() {
        let mut controller = ViewportController::new();
        let result = run(
            &mut controller,
            &mut IdleInput,
            &mut ManualScheduler::new(3),
            &mut Recorder::default(),
        );
        assert!(matches!(result, Err(Error::Uninitialized)));
    }

    #[test]
    fn test_run_idle_renders_every_tick() {
        let mut controller = controller();
        let mut recorder = Recorder::default();
        let frames = run(
            &mut controller,
            &mut IdleInput,
            &mut ManualScheduler::new(3),
            &mut recorder,
        )
        .unwrap();

        assert_eq!(frames, 3);
        assert_eq!(recorder.frames.len(), 3);
        for (source, destination) in &recorder.frames {
            assert_eq!(*source, RectD::new(0.0, 0.0, 200.0, 200.0));
            assert_eq!(*destination, RectD::new(0.0, 0.0, 100.0, 100.0));
        }
    }

    #[test]
    fn test_run_drag_script() {
        let mut controller = controller();
        let mut input = ScriptedInput::new(vec![
            vec![
                InputEvent::PointerMove {
                    position: PointD::new(50.0, 50.0),
                },
                InputEvent::PointerDown,
            ],
            vec![InputEvent::PointerMove {
                position: PointD::new(40.0, 30.0),
            }],
            vec![InputEvent::PointerUp],
        ]);
        let mut recorder = Recorder::default();

        // More ticks than frames: stops when the script ends
        let frames = run(
            &mut controller,
            &mut input,
            &mut ManualScheduler::new(10),
            &mut recorder,
        )
        .unwrap();

        assert_eq!(frames, 3);
        assert_eq!(recorder.frames[0].0.point0(), PointD::new(0.0, 0.0));
        assert_eq!(recorder.frames[1].0.point0(), PointD::new(20.0, 40.0));
        assert_eq!(recorder.frames[2].0.point0(), PointD::new(20.0, 40.0));
        assert!(!controller.is_dragging());
        assert_eq!(controller.viewport().unwrap().origin(), PointD::new(20.0, 40.0));
    }
}
