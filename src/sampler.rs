// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Visualization of generator output.
//! Every pixel gets the color of one raw output, so patterns in the
//! generator show up as patterns in the image.

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use tracing::info;

use crate::{
    conditioning,
    config::Config,
    error::LabError,
    pixels::{self, PixelBuffer},
    registry::{GeneratorRegistry, RegisteredGenerator},
    utils,
};

/// How generator instances are mapped onto pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SamplingMode {
    /// One instance seeded with the configured seed, its state evolves
    /// over the whole image.
    OneSeed,
    /// A fresh instance per pixel seeded with the pixel index,
    /// only its first output is used.
    ManySeedsOneGeneration,
}

impl SamplingMode {
    pub const ALL: [SamplingMode; 2] = [
        SamplingMode::OneSeed,
        SamplingMode::ManySeedsOneGeneration,
    ];

    /// File name of the image without extension.
    pub fn file_stem(&self) -> &'static str {
        match self {
            SamplingMode::OneSeed => "oneSeed",
            SamplingMode::ManySeedsOneGeneration => "manySeedsOneGeneration",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageSampler {
    seed: i32,
    size: usize,
    images_dir: PathBuf,
}

impl ImageSampler {
    pub fn new(config: &Config) -> Self {
        ImageSampler {
            seed: config.seed,
            size: config.image_size,
            images_dir: config.images_dir(),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Render a square image of `generator` output, row by row.
    pub fn render(&self, generator: &RegisteredGenerator, mode: SamplingMode) -> PixelBuffer {
        let mut image = PixelBuffer::new(self.size, self.size);
        match mode {
            SamplingMode::OneSeed => {
                let mut test_rng = generator.instantiate(self.seed);
                for y in 0..self.size {
                    for x in 0..self.size {
                        image.set_pixel(x, y, conditioning::i32_to_color(test_rng.next()));
                    }
                }
            }
            SamplingMode::ManySeedsOneGeneration => {
                let mut seed: i32 = 0;
                for y in 0..self.size {
                    for x in 0..self.size {
                        let mut test_rng = generator.instantiate(seed);
                        image.set_pixel(x, y, conditioning::i32_to_color(test_rng.next()));
                        seed = seed.wrapping_add(1);
                    }
                }
            }
        }
        image
    }

    /// Path of the image for `generator` in `mode`.
    pub fn image_path(&self, generator: &str, mode: SamplingMode) -> PathBuf {
        self.images_dir
            .join(generator)
            .join(format!("{}.{}", mode.file_stem(), pixels::IMAGE_EXTENSION))
    }

    /// Render and write one image per registered generator and mode.
    /// Returns the written paths.
    pub fn create_images(&self, registry: &GeneratorRegistry) -> Result<Vec<PathBuf>, LabError> {
        if self.size > pixels::MAX_DIMENSION {
            return Err(LabError::ImageSize {
                size: self.size,
                max: pixels::MAX_DIMENSION,
            });
        }
        let mut written = Vec::with_capacity(registry.len() * SamplingMode::ALL.len());
        for generator in registry.generators() {
            utils::ensure_dir(&self.images_dir.join(generator.name()))?;
            for mode in SamplingMode::ALL {
                let start = Instant::now();
                let image = self.render(generator, mode);
                let path = self.image_path(generator.name(), mode);
                pixels::write_jpeg(&path, &image)?;
                info!(
                    generator = generator.name(),
                    image = %path.display(),
                    "rendered {} image in {}",
                    mode.file_stem(),
                    utils::format_elapsed_time(start.elapsed())
                );
                written.push(path);
            }
        }
        Ok(written)
    }
}
