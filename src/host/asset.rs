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

use std::path::{Path, PathBuf};

use crate::{error::Result, rect::SizeD};

/// Supplies the dimensions of the backing content once it is available.
pub trait AssetProvider {
    fn content_size(&self) -> Result<SizeD>;
}

/// Image file on disk; only the header is read to learn its dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    path: PathBuf,
}

impl ImageAsset {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AssetProvider for ImageAsset {
    fn content_size(&self) -> Result<SizeD> {
        let (width, height) = image::image_dimensions(&self.path)?;
        tracing::info!(path = %self.path.display(), width, height, "asset dimensions");
        Ok(SizeD::new(width as f64, height as f64))
    }
}

/// Content whose size is known up front
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAsset(pub SizeD);

impl AssetProvider for FixedAsset {
    fn content_size(&self) -> Result<SizeD> {
        Ok(self.0)
    }
}
