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
    fs::{create_dir_all, File},
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    rect::SizeD,
    viewport::{ClampPolicy, ZoomOperator, ZOOM_MULTIPLIER},
};

/// User settings, stored as JSON in the platform config directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Scale multiplier per wheel notch
    pub zoom_factor: f64,
    /// Redraw rate of the interval scheduler
    pub fps: u32,
    /// Finest zoom, in content pixels per surface pixel
    pub min_scale: f64,
    /// Keep the view inside the content
    pub bounded: bool,
    pub surface_width: f64,
    pub surface_height: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zoom_factor: ZOOM_MULTIPLIER,
            fps: 60,
            min_scale: 1.0,
            bounded: true,
            surface_width: 800.0,
            surface_height: 600.0,
        }
    }
}

impl Settings {
    fn config_dir() -> PathBuf {
        let mut dir = dirs::config_dir().unwrap_or_default();
        dir.push("canvas-zoom");
        dir
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("canvas-zoom.json")
    }

    /// Reads the settings from the default location.
    pub fn load() -> Result<Self> {
        Self::read_from(&Self::config_file())
    }

    /// Reads the settings from the default location, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(settings) => settings,
            Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %Self::config_file().display(), "no settings file");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(
                    path = %Self::config_file().display(),
                    error = %e,
                    "using default settings"
                );
                Self::default()
            }
        }
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let settings: Settings = serde_json::from_reader(BufReader::new(file))?;
        tracing::debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Writes the settings to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            create_dir_all(dir)?;
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn policy(&self) -> ClampPolicy {
        if self.bounded {
            ClampPolicy::Bounded
        } else {
            ClampPolicy::Unbounded
        }
    }

    pub fn surface(&self) -> SizeD {
        SizeD::new(self.surface_width, self.surface_height)
    }

    pub fn zoom_operator(&self) -> Result<ZoomOperator> {
        ZoomOperator::new(self.zoom_factor)
    }
}
