//! Binary STL export of an emitted triangle list.

use anyhow::{Context, Result};
use glam::Vec3;
use std::fs;
use std::path::Path;

fn triangle_normal(tri: &[Vec3]) -> Vec3 {
	(tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero()
}

/// Encode `vertices` (three per triangle) as binary STL.
pub fn to_binary_stl(vertices: &[Vec3], header_name: &str) -> Vec<u8> {
	let triangles = vertices.len() / 3;
	let mut out = Vec::with_capacity(84 + triangles * 50);

	let mut header = [0u8; 80];
	let name = header_name.as_bytes();
	let copy_n = name.len().min(header.len());
	header[..copy_n].copy_from_slice(&name[..copy_n]);
	out.extend_from_slice(&header);

	out.extend_from_slice(&(triangles as u32).to_le_bytes());

	for tri in vertices.chunks_exact(3) {
		for v in std::iter::once(triangle_normal(tri)).chain(tri.iter().copied()) {
			for component in v.to_array() {
				out.extend_from_slice(&component.to_le_bytes());
			}
		}
		out.extend_from_slice(&0u16.to_le_bytes());
	}

	out
}

pub fn write_binary_stl(path: &Path, vertices: &[Vec3], header_name: &str) -> Result<()> {
	let bytes = to_binary_stl(vertices, header_name);
	fs::write(path, bytes).with_context(|| format!("Failed to write STL: {}", path.display()))?;
	Ok(())
}

#[cfg(test)]
#[path = "stl_test.rs"]
mod stl_test;
