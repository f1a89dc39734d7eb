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

use std::{io, path::PathBuf, process::ExitCode};

use canvas_zoom::{
    config::Settings,
    host::{
        self, AssetProvider, FixedAsset, IdleInput, ImageAsset, InputSource, IntervalScheduler,
        JsonLinesRenderer, ManualScheduler, Scheduler, ScriptedInput,
    },
    rect::SizeD,
    viewport::Bounds,
    Result, ViewportController,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Replays zoom and pan input against an image and prints the source rectangle of every
/// frame as JSON lines.
#[derive(Parser, Debug)]
#[command(name = "canvas-zoom", version, about)]
struct Cli {
    /// Image whose dimensions define the content
    image: Option<PathBuf>,

    /// Content size as WIDTHxHEIGHT, instead of reading an image
    #[arg(long, value_parser = parse_size, conflicts_with = "image", required_unless_present = "image")]
    content: Option<SizeD>,

    /// Surface size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    surface: Option<SizeD>,

    /// JSON input script, one array of events per frame
    #[arg(long)]
    script: Option<PathBuf>,

    /// Frames to render when no script is given
    #[arg(long, default_value_t = 1)]
    ticks: u64,

    /// Tick at the configured frame rate instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Frame rate for --realtime
    #[arg(long)]
    fps: Option<u32>,

    /// Let the view leave the content
    #[arg(long)]
    unbounded: bool,

    #[arg(long)]
    zoom_factor: Option<f64>,

    #[arg(long)]
    min_scale: Option<f64>,
}

fn parse_size(value: &str) -> std::result::Result<SizeD, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width: f64 = width
        .trim()
        .parse()
        .map_err(|e| format!("bad width '{width}': {e}"))?;
    let height: f64 = height
        .trim()
        .parse()
        .map_err(|e| format!("bad height '{height}': {e}"))?;
    Ok(SizeD::new(width, height))
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = Settings::load_or_default();
        if let Some(surface) = self.surface {
            settings.surface_width = surface.width();
            settings.surface_height = surface.height();
        }
        if let Some(fps) = self.fps {
            settings.fps = fps;
        }
        if self.unbounded {
            settings.bounded = false;
        }
        if let Some(zoom_factor) = self.zoom_factor {
            settings.zoom_factor = zoom_factor;
        }
        if let Some(min_scale) = self.min_scale {
            settings.min_scale = min_scale;
        }
        settings
    }

    fn asset(&self) -> Box<dyn AssetProvider> {
        match (&self.image, self.content) {
            (Some(path), _) => Box::new(ImageAsset::new(path)),
            (None, Some(size)) => Box::new(FixedAsset(size)),
            // clap guarantees one of both
            (None, None) => Box::new(FixedAsset(SizeD::default())),
        }
    }

    fn input(&self) -> Result<Box<dyn InputSource>> {
        let input: Box<dyn InputSource> = match &self.script {
            Some(path) => Box::new(ScriptedInput::read_from(path)?),
            None => Box::new(IdleInput),
        };
        Ok(input)
    }

    fn scheduler(&self, settings: &Settings) -> Result<Box<dyn Scheduler>> {
        // A script ends the run by itself
        let limit = if self.script.is_some() {
            u64::MAX
        } else {
            self.ticks
        };
        let scheduler: Box<dyn Scheduler> = if self.realtime {
            Box::new(IntervalScheduler::new(settings.fps)?.with_limit(limit))
        } else {
            Box::new(ManualScheduler::new(limit))
        };
        Ok(scheduler)
    }
}

fn run(cli: &Cli) -> Result<u64> {
    let settings = cli.settings();
    let content = cli.asset().content_size()?;
    let bounds = Bounds::fit_width(
        settings.surface(),
        content,
        settings.min_scale,
        settings.policy(),
    )?;

    let mut controller = ViewportController::with_zoom(settings.zoom_operator()?);
    controller.initialize(bounds);

    let mut input = cli.input()?;
    let mut scheduler = cli.scheduler(&settings)?;
    let mut renderer = JsonLinesRenderer::new(io::stdout().lock());
    host::run(
        &mut controller,
        input.as_mut(),
        scheduler.as_mut(),
        &mut renderer,
    )
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(frames) => {
            tracing::info!(frames, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "canvas-zoom failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("800x600").unwrap(), SizeD::new(800.0, 600.0));
        assert_eq!(parse_size("12.5X7").unwrap(), SizeD::new(12.5, 7.0));
        assert_eq!(parse_size(" 3 x 4 ").unwrap(), SizeD::new(3.0, 4.0));
        assert!(parse_size("800").is_err());
        assert!(parse_size("ax600").is_err());
        assert!(parse_size("800x").is_err());
    }

    #[test]
    fn test_cli_requires_content() {
        assert!(Cli::try_parse_from(["canvas-zoom"]).is_err());
        assert!(Cli::try_parse_from(["canvas-zoom", "--content", "100x100"]).is_ok());
        assert!(Cli::try_parse_from(["canvas-zoom", "image.png"]).is_ok());
        assert!(
            Cli::try_parse_from(["canvas-zoom", "image.png", "--content", "100x100"]).is_err()
        );
    }

    #[test]
    fn test_cli_overrides_settings() {
        let cli = Cli::try_parse_from([
            "canvas-zoom",
            "--content",
            "4000x3000",
            "--surface",
            "400x300",
            "--unbounded",
            "--zoom-factor",
            "1.5",
            "--fps",
            "24",
        ])
        .unwrap();
        let settings = cli.settings();
        assert_eq!(settings.surface(), SizeD::new(400.0, 300.0));
        assert!(!settings.bounded);
        assert_eq!(settings.zoom_factor, 1.5);
        assert_eq!(settings.fps, 24);
        assert_eq!(
            cli.asset().content_size().unwrap(),
            SizeD::new(4000.0, 3000.0)
        );
    }
}
