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

use std::{
    thread::{self, JoinHandle},
    time::Duration,
};

use async_channel::{Receiver, Sender, TrySendError};

use crate::error::{Error, Result};

/// Paces frame ticks.
pub trait Scheduler {
    /// Blocks until the next tick is due and returns its number, `None` when no more ticks
    /// will come.
    fn next_tick(&mut self) -> Result<Option<u64>>;
}

/// Fires a fixed number of ticks back to back, for replays and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualScheduler {
    next: u64,
    count: u64,
}

impl ManualScheduler {
    pub fn new(count: u64) -> Self {
        Self { next: 0, count }
    }
}

impl Scheduler for ManualScheduler {
    fn next_tick(&mut self) -> Result<Option<u64>> {
        if self.next >= self.count {
            return Ok(None);
        }
        let tick = self.next;
        self.next += 1;
        Ok(Some(tick))
    }
}

/// Ticks at a fixed rate from a timer thread.
///
/// The channel holds a single pending tick; when the consumer falls behind, late ticks are
/// dropped instead of queueing up. The timer thread stops once the scheduler is dropped.
#[derive(Debug)]
pub struct IntervalScheduler {
    receiver: Receiver<u64>,
    remaining: Option<u64>,
    _handle: JoinHandle<()>,
}

impl IntervalScheduler {
    pub fn new(fps: u32) -> Result<Self> {
        if fps == 0 {
            return Err(Error::InvalidFrameRate(fps));
        }
        let interval = Duration::from_secs_f64(1.0 / fps as f64);
        let (sender, receiver) = async_channel::bounded(1);
        let handle = thread::spawn(move || timer(sender, interval));
        Ok(Self {
            receiver,
            remaining: None,
            _handle: handle,
        })
    }

    /// Stops after `count` ticks have been delivered.
    pub fn with_limit(mut self, count: u64) -> Self {
        self.remaining = Some(count);
        self
    }
}

fn timer(sender: Sender<u64>, interval: Duration) {
    let mut tick = 0;
    loop {
        thread::sleep(interval);
        match sender.try_send(tick) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => tracing::trace!(tick, "tick dropped"),
            Err(TrySendError::Closed(_)) => break,
        }
        tick += 1;
    }
}

impl Scheduler for IntervalScheduler {
    fn next_tick(&mut self) -> Result<Option<u64>> {
        if self.remaining == Some(0) {
            return Ok(None);
        }
        let tick = self
            .receiver
            .recv_blocking()
            .map_err(|_| Error::SchedulerClosed)?;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Ok(Some(tick))
    }
}
