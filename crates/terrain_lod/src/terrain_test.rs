use super::*;
use crate::error::CollectingSink;

fn ramp_field(edge: usize) -> HeightField {
  let data = (0..edge * edge).map(|i| (i % edge) as u8).collect();
  HeightField::new(edge, edge, data).unwrap()
}

#[test]
fn test_size_is_cells_per_edge() {
  let terrain = Terrain::from_height_field(&ramp_field(17), 1.0).unwrap();
  assert_eq!(terrain.size(), 16);
  assert_eq!(terrain.positions().len(), 17 * 17);
  assert_eq!(terrain.positions()[16].z, 16.0);
}

#[test]
fn test_update_and_mesh_agree() {
  let mut terrain = Terrain::from_height_field(&ramp_field(33), 0.25).unwrap();
  let camera = Camera {
    position: Vec3::new(16.0, -4.0, 10.0),
    target: Vec3::new(16.0, 16.0, 0.0),
    ..Camera::default()
  };
  let frustum = HorizontalFrustum::from_camera(1280, 720, &camera);

  let count = terrain.update(&camera, &frustum).triangle_count();
  assert!(count >= 2);
  assert_eq!(terrain.mesh().triangle_count(), count);
}

#[test]
fn test_non_square_field_is_a_build_error() {
  let field = HeightField::new(5, 3, vec![0; 15]).unwrap();
  let sink = Arc::new(CollectingSink::new());
  let error =
    Terrain::from_height_field_with(&field, 1.0, &LodConfig::default(), sink.clone()).unwrap_err();

  assert!(matches!(
    error,
    TerrainError::Build(BuildError::NotSquare {
      width: 5,
      height: 3
    })
  ));
  assert_eq!(sink.reports().len(), 1);
}
