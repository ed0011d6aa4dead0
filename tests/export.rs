use eduria_whiteboard::{DrawingSurface, WhiteboardConfig};
use egui::pos2;

fn decode(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

#[test]
fn test_blank_export_is_all_background() {
    let mut surface = DrawingSurface::default();
    surface.initialize(64, 32).unwrap();

    let image = decode(&surface.export_png().unwrap());
    assert_eq!(image.dimensions(), (64, 32));
    assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn test_export_contains_strokes() {
    let mut surface = DrawingSurface::default();
    surface.initialize(64, 64).unwrap();
    surface.set_color([200, 0, 0]);
    surface.begin_stroke(pos2(10.0, 10.0)).unwrap();
    surface.extend_stroke(pos2(50.0, 10.0));
    surface.end_stroke();

    let image = decode(&surface.export_png().unwrap());
    assert_eq!(image.get_pixel(30, 10).0, [200, 0, 0, 255]);
    assert_eq!(image.get_pixel(30, 40).0, [255, 255, 255, 255]);
}

#[test]
fn test_export_does_not_mutate() {
    let mut surface = DrawingSurface::default();
    surface.initialize(16, 16).unwrap();
    let revision = surface.revision();
    let history_len = surface.history_len();

    surface.export_png().unwrap();
    assert_eq!(surface.revision(), revision);
    assert_eq!(surface.history_len(), history_len);
}

#[test]
fn test_export_works_mid_stroke() {
    let mut surface = DrawingSurface::default();
    surface.initialize(32, 32).unwrap();
    surface.begin_stroke(pos2(16.0, 2.0)).unwrap();
    surface.extend_stroke(pos2(16.0, 30.0));

    let image = decode(&surface.export_png().unwrap());
    assert_eq!(image.get_pixel(16, 16).0, [0, 0, 0, 255]);
    assert!(surface.is_stroke_active());
}

#[test]
fn test_export_to_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = WhiteboardConfig {
        export_dir: Some(dir.path().to_path_buf()),
        ..WhiteboardConfig::default()
    };
    let mut surface = config.build_surface();
    surface.initialize(20, 10).unwrap();

    let path = config.export_path();
    surface.export_to_file(&path).unwrap();

    let image = decode(&std::fs::read(&path).unwrap());
    assert_eq!(image.dimensions(), (20, 10));
    assert_eq!(path.file_name().unwrap(), "whiteboard.png");
}
