use profilekit_core::{Plane, Point2, RawEntity};
use profilekit_dxf::{DxfSource, DxfWriter};
use tempfile::tempdir;

#[test]
fn test_written_rings_read_back_as_closed_polylines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rings.dxf");

    let square = vec![
        Point2::new(-6.0, -6.0),
        Point2::new(6.0, -6.0),
        Point2::new(6.0, 6.0),
        Point2::new(-6.0, 6.0),
    ];
    let triangle = vec![
        Point2::new(0.0, 0.0),
        Point2::new(2.5, 0.0),
        Point2::new(0.0, 1.5),
    ];

    let written = DxfWriter::default()
        .write([square.as_slice(), triangle.as_slice()], &path)
        .unwrap();
    assert_eq!(written, 2);

    let source = DxfSource::open(&path).unwrap();
    assert_eq!(source.path(), Some(path.as_path()));

    let entities: Vec<RawEntity> = source.entities(Plane::Xy).collect();
    assert_eq!(entities.len(), 2);
    for (entity, expected) in entities.iter().zip([&square, &triangle]) {
        match entity {
            RawEntity::Polyline {
                vertices,
                closed,
                layer,
            } => {
                assert!(*closed);
                assert_eq!(layer.as_deref(), Some("OFFSET"));
                let points: Vec<Point2> = vertices.iter().map(|v| v.point).collect();
                assert_eq!(&points, expected);
                assert!(vertices.iter().all(|v| v.bulge == 0.0));
            }
            other => panic!("expected polyline, got {:?}", other),
        }
    }
}

#[test]
fn test_custom_layer_survives_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("layer.dxf");
    let ring = vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
    ];
    DxfWriter::new("TOOLPATH")
        .write([ring.as_slice()], &path)
        .unwrap();

    let source = DxfSource::open(&path).unwrap();
    let first = source.entities(Plane::Xy).next().unwrap();
    assert_eq!(first.layer(), Some("TOOLPATH"));
}

#[test]
fn test_garbage_file_is_a_read_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garbage.dxf");
    std::fs::write(&path, "this is not a drawing").unwrap();
    assert!(DxfSource::open(&path).is_err());
}
