//! 8-bit height fields and their conversion to grid positions.

use glam::Vec3;
use rayon::prelude::*;
use thiserror::Error;

/// Reasons a height field could not be created or loaded.
#[derive(Debug, Error)]
pub enum HeightFieldError {
  #[error("height field must not be empty, got {width}x{height}")]
  Empty { width: usize, height: usize },

  #[error("{width}x{height} height field needs {expected} samples, got {actual}")]
  SampleCount {
    width: usize,
    height: usize,
    expected: usize,
    actual: usize,
  },

  #[cfg(feature = "image")]
  #[error("failed to read height map {path}")]
  Image {
    path: std::path::PathBuf,
    #[source]
    source: image::ImageError,
  },
}

/// Row-major grid of 8-bit heights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightField {
  width: usize,
  height: usize,
  data: Vec<u8>,
}

impl HeightField {
  pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, HeightFieldError> {
    if width == 0 || height == 0 {
      return Err(HeightFieldError::Empty { width, height });
    }
    let expected = width * height;
    if data.len() != expected {
      return Err(HeightFieldError::SampleCount {
        width,
        height,
        expected,
        actual: data.len(),
      });
    }
    Ok(Self {
      width,
      height,
      data,
    })
  }

  /// Load any image the `image` crate decodes, converted to 8-bit luma.
  #[cfg(feature = "image")]
  pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, HeightFieldError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| HeightFieldError::Image {
      path: path.to_path_buf(),
      source,
    })?;
    Ok(Self::from_image(&image))
  }

  #[cfg(feature = "image")]
  pub fn from_image(image: &image::DynamicImage) -> Self {
    let luma = image.to_luma8();
    let (width, height) = luma.dimensions();
    Self {
      width: width as usize,
      height: height as usize,
      data: luma.into_raw(),
    }
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  pub fn data(&self) -> &[u8] {
    &self.data
  }

  #[inline]
  pub fn sample(&self, x: usize, y: usize) -> u8 {
    self.data[y * self.width + x]
  }

  /// Grid positions: x = column, y = row, z = sample * `z_scale`.
  pub fn to_positions(&self, z_scale: f32) -> Vec<Vec3> {
    let mut positions = vec![Vec3::ZERO; self.data.len()];
    positions
      .par_chunks_mut(self.width)
      .zip(self.data.par_chunks(self.width))
      .enumerate()
      .for_each(|(row, (out, heights))| {
        for (column, (position, &height)) in out.iter_mut().zip(heights).enumerate() {
          *position = Vec3::new(column as f32, row as f32, height as f32 * z_scale);
        }
      });
    positions
  }
}

#[cfg(test)]
#[path = "heightfield_test.rs"]
mod heightfield_test;
