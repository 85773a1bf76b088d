//! Seeded value-noise height fields for runs without a height map.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terrain_lod::HeightField;

/// Octaves summed into the field, coarsest first: (lattice cells, weight).
const OCTAVES: [(usize, f32); 5] = [(4, 0.5), (8, 0.25), (16, 0.125), (32, 0.0625), (64, 0.0625)];

/// Square `edge` x `edge` field of summed value noise.
pub fn value_noise(edge: usize, seed: u64) -> anyhow::Result<HeightField> {
	let mut rng = StdRng::seed_from_u64(seed);
	let mut heights = vec![0.0f32; edge * edge];

	for (cells, weight) in OCTAVES {
		let lattice_edge = cells + 1;
		let lattice: Vec<f32> = (0..lattice_edge * lattice_edge)
			.map(|_| rng.random::<f32>())
			.collect();
		let scale = cells as f32 / (edge - 1).max(1) as f32;

		for y in 0..edge {
			for x in 0..edge {
				let fx = x as f32 * scale;
				let fy = y as f32 * scale;
				let (x0, y0) = ((fx as usize).min(cells - 1), (fy as usize).min(cells - 1));
				let (tx, ty) = (smoothstep(fx - x0 as f32), smoothstep(fy - y0 as f32));

				let at = |lx: usize, ly: usize| lattice[ly * lattice_edge + lx];
				let bottom = at(x0, y0) + (at(x0 + 1, y0) - at(x0, y0)) * tx;
				let top = at(x0, y0 + 1) + (at(x0 + 1, y0 + 1) - at(x0, y0 + 1)) * tx;
				heights[y * edge + x] += (bottom + (top - bottom) * ty) * weight;
			}
		}
	}

	let data = heights
		.into_iter()
		.map(|h| (h.clamp(0.0, 1.0) * 255.0).round() as u8)
		.collect();
	Ok(HeightField::new(edge, edge, data)?)
}

#[inline]
fn smoothstep(t: f32) -> f32 {
	t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
#[path = "procedural_test.rs"]
mod procedural_test;
