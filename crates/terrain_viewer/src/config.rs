//! Viewer configuration parsing.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration for a flythrough run.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
	pub terrain: TerrainConfig,
	pub view: ViewConfig,
	pub flight: FlightConfig,
	pub output: OutputConfig,
}

/// Height field source.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
	/// 8-bit height map; a procedural field is generated when absent.
	pub height_map: Option<PathBuf>,
	/// Edge length of the procedural field (2^k + 1).
	pub procedural_size: usize,
	/// Seed of the procedural field.
	pub seed: u64,
	/// World units per height map step.
	pub z_scale: f32,
}

impl Default for TerrainConfig {
	fn default() -> Self {
		Self {
			height_map: None,
			procedural_size: 513,
			seed: 1,
			z_scale: 0.5,
		}
	}
}

/// Viewport and projection used for the lateral frustum planes.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
	pub width: u32,
	pub height: u32,
	pub fov_y_degrees: f32,
	pub z_near: f32,
	pub z_far: f32,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			width: 1280,
			height: 720,
			fov_y_degrees: 70.0,
			z_near: 1.0,
			z_far: 4096.0,
		}
	}
}

/// Camera path over the terrain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlightPath {
	/// Circle around the terrain center, looking at it.
	Orbit {
		/// Radius as a fraction of the terrain size.
		radius: f32,
		/// Camera height above z = 0.
		height: f32,
	},
	/// Straight line between two points given in terrain-size fractions
	/// (x, y) and absolute height (z), looking ahead.
	Line { start: [f32; 3], end: [f32; 3] },
}

impl Default for FlightPath {
	fn default() -> Self {
		FlightPath::Orbit {
			radius: 0.35,
			height: 60.0,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
	pub frames: u32,
	pub path: FlightPath,
}

impl Default for FlightConfig {
	fn default() -> Self {
		Self {
			frames: 240,
			path: FlightPath::default(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
	/// Binary STL of the final frame.
	pub stl: Option<PathBuf>,
	/// Log a frame summary every N frames (0 = only the last frame).
	pub log_every: u32,
}

impl ViewerConfig {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content)
	}

	/// Parse and validate TOML text.
	pub fn parse(content: &str) -> Result<Self> {
		let config: ViewerConfig =
			toml::from_str(content).with_context(|| "Failed to parse config TOML")?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<()> {
		let size = self.terrain.procedural_size;
		if self.terrain.height_map.is_none() && (size < 2 || !(size - 1).is_power_of_two()) {
			anyhow::bail!("procedural_size must be 2^k + 1, got {}", size);
		}
		if !(self.terrain.z_scale.is_finite()) {
			anyhow::bail!("z_scale must be finite");
		}
		if self.view.width == 0 || self.view.height == 0 {
			anyhow::bail!(
				"viewport must not be empty, got {}x{}",
				self.view.width,
				self.view.height
			);
		}
		if !(self.view.fov_y_degrees > 0.0 && self.view.fov_y_degrees < 180.0) {
			anyhow::bail!(
				"fov_y_degrees must be in (0, 180), got {}",
				self.view.fov_y_degrees
			);
		}
		if self.flight.frames == 0 {
			anyhow::bail!("flight.frames must be at least 1");
		}
		Ok(())
	}
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
