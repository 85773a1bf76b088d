use super::*;

#[test]
fn test_size_and_triangle_count() {
	let vertices = [
		Vec3::ZERO,
		Vec3::X,
		Vec3::Y,
		Vec3::Z,
		Vec3::new(0.0, 1.0, 1.0),
		Vec3::new(1.0, 0.0, 1.0),
	];
	let bytes = to_binary_stl(&vertices, "terrain");

	assert_eq!(bytes.len(), 84 + 2 * 50);
	assert_eq!(&bytes[..7], b"terrain");
	let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]);
	assert_eq!(count, 2);
}

#[test]
fn test_normal_written_first() {
	let bytes = to_binary_stl(&[Vec3::ZERO, Vec3::X, Vec3::Y], "");
	let read = |offset: usize| {
		f32::from_le_bytes([
			bytes[offset],
			bytes[offset + 1],
			bytes[offset + 2],
			bytes[offset + 3],
		])
	};
	assert_eq!([read(84), read(88), read(92)], [0.0, 0.0, 1.0]);
	// First vertex after the normal, then the second.
	assert_eq!(read(108), 1.0);
}

#[test]
fn test_degenerate_triangle_gets_zero_normal() {
	let bytes = to_binary_stl(&[Vec3::ONE, Vec3::ONE, Vec3::ONE], "");
	assert!(bytes[84..96].iter().all(|&b| b == 0));
}
