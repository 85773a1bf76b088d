//! Headless terrain flythrough.
//!
//! Loads (or generates) a height field, builds the quad collapse mesh once and
//! updates it along a camera path, logging triangle counts and update timings.
//! The final frame can be written as binary STL for inspection.

mod config;
mod flight;
mod procedural;
mod stl;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::ViewerConfig;
use terrain_lod::{HeightField, HorizontalFrustum, Terrain};

/// Headless flythrough over a quad collapse terrain.
#[derive(Parser, Debug)]
#[command(name = "terrain_viewer")]
#[command(about = "Flies a camera over a continuous-LOD terrain and reports mesh statistics")]
struct Args {
	/// Path to configuration TOML file (defaults apply when omitted).
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Height map image, overrides the config.
	#[arg(long)]
	height_map: Option<PathBuf>,

	/// Number of frames, overrides the config.
	#[arg(short, long)]
	frames: Option<u32>,

	/// Write the final frame as binary STL, overrides the config.
	#[arg(long)]
	stl: Option<PathBuf>,
}

fn init_logging() {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::registry()
		.with(env_filter)
		.with(fmt::layer().with_target(true))
		.init();
}

fn main() -> Result<()> {
	init_logging();
	let args = Args::parse();

	let mut config = match &args.config {
		Some(path) => {
			tracing::info!(path = %path.display(), "loading config");
			ViewerConfig::load(path)?
		}
		None => ViewerConfig::default(),
	};
	if let Some(height_map) = args.height_map {
		config.terrain.height_map = Some(height_map);
	}
	if let Some(frames) = args.frames {
		config.flight.frames = frames;
	}
	if let Some(stl) = args.stl {
		config.output.stl = Some(stl);
	}
	config.validate()?;

	let field = match &config.terrain.height_map {
		Some(path) => HeightField::load(path)
			.with_context(|| format!("Failed to load height map: {}", path.display()))?,
		None => {
			tracing::info!(
				size = config.terrain.procedural_size,
				seed = config.terrain.seed,
				"generating procedural height field"
			);
			procedural::value_noise(config.terrain.procedural_size, config.terrain.seed)?
		}
	};

	let mut terrain = Terrain::from_height_field(&field, config.terrain.z_scale)
		.context("Failed to build terrain")?;
	let size = terrain.size() as f32;
	tracing::info!(
		edge = field.width(),
		vertices = terrain.engine().hierarchy().vertex_count(),
		"terrain ready"
	);

	let frames = config.flight.frames;
	for frame in 0..frames {
		let camera = flight::camera_at(&config.flight.path, &config.view, size, frame, frames);
		let frustum = HorizontalFrustum::from_camera(config.view.width, config.view.height, &camera);
		let triangles = terrain.update(&camera, &frustum).triangle_count();

		let every = config.output.log_every;
		if (every > 0 && frame % every == 0) || frame + 1 == frames {
			let metrics = terrain.engine().metrics();
			tracing::info!(
				frame,
				triangles,
				update_us = metrics.last_update_us,
				culled_quads = metrics.last_culled_quads,
				"frame"
			);
		}
	}

	let metrics = terrain.engine().metrics();
	tracing::info!(
		frames = metrics.frames,
		avg_update_us = metrics.avg_update_us(),
		avg_triangles = metrics.avg_triangles(),
		"flythrough finished"
	);

	if let Some(path) = &config.output.stl {
		let mesh = terrain.mesh();
		stl::write_binary_stl(path, mesh.vertices(), "terrain_viewer")?;
		tracing::info!(path = %path.display(), triangles = mesh.triangle_count(), "wrote STL");
	}

	Ok(())
}
