mod common;

use approx::assert_abs_diff_eq;
use common::ImageFixture;
use mosaic_rs::MosaicError;
use mosaic_rs::core::ImageSize;
use mosaic_rs::io::{
    IMAGE_PATH_COLUMN, directory_to_table, image_files_in, load_from_directory, load_image,
    load_images,
};

#[test]
fn directory_scan_keeps_top_level_images_sorted() {
    let fixture = ImageFixture::new();
    fixture.write_png("b.png", 2, 2, [10, 10, 10]);
    fixture.write_png("a.png", 2, 2, [20, 20, 20]);
    fixture.write_png("nested/c.png", 2, 2, [30, 30, 30]);
    fixture.write_file("notes.txt", "not an image");

    let files = image_files_in(fixture.path()).expect("scan");
    let names: Vec<_> = files
        .iter()
        .map(|path| path.file_name().expect("name").to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.png", "b.png"]);
}

#[test]
fn load_image_resizes_to_target() {
    let fixture = ImageFixture::new();
    let name = fixture.write_png("wide.png", 8, 4, [40, 80, 120]);

    let original = load_image(&name, fixture.path(), None).expect("load");
    assert_eq!(original.dimensions(), (8, 4));

    let resized = load_image(&name, fixture.path(), Some(ImageSize::square(3))).expect("load");
    assert_eq!(resized.dimensions(), (3, 3));
    assert_eq!(resized.get_pixel(1, 1).0, [40, 80, 120]);
}

#[test]
fn parallel_loading_preserves_input_order() {
    let fixture = ImageFixture::new();
    let shades: Vec<u8> = (0..12).map(|i| i * 20).collect();
    let files = fixture.write_grey_series(&shades, 2);

    let images = load_images(&files, fixture.path(), None, 4).expect("load");
    let loaded: Vec<u8> = images.iter().map(|image| image.get_pixel(0, 0)[0]).collect();
    assert_eq!(loaded, shades);
}

#[test]
fn undecodable_file_reports_its_path() {
    let fixture = ImageFixture::new();
    fixture.write_file("broken.png", "definitely not a png");

    let err = load_image("broken.png", fixture.path(), None).expect_err("decode failure");
    match err {
        MosaicError::ImageDecode { path, .. } => assert!(path.ends_with("broken.png")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn directory_sampling_is_seeded() {
    let fixture = ImageFixture::new();
    fixture.write_grey_series(&[10, 20, 30, 40, 50], 2);

    let first = load_from_directory(fixture.path(), Some(3), None, 7, 1).expect("sample");
    let second = load_from_directory(fixture.path(), Some(3), None, 7, 1).expect("sample");
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);

    let all = load_from_directory(fixture.path(), None, None, 7, 1).expect("all");
    assert_eq!(all.len(), 5);
}

#[test]
fn directory_table_lists_relative_paths_and_features() {
    let fixture = ImageFixture::new();
    fixture.write_grey_series(&[51, 102], 2);

    let table = directory_to_table(&fixture.dir_string(), &["__value__"], 1).expect("table");
    assert_eq!(
        table.text_column(IMAGE_PATH_COLUMN).expect("paths"),
        &["img_0.png", "img_1.png"]
    );

    let values = table.numeric_column("__value__").expect("value");
    assert_abs_diff_eq!(values[0], 0.2, epsilon = 1e-9);
    assert_abs_diff_eq!(values[1], 0.4, epsilon = 1e-9);
}

#[test]
fn directory_table_rejects_unknown_features() {
    let fixture = ImageFixture::new();
    fixture.write_grey_series(&[51], 2);

    let err = directory_to_table(&fixture.dir_string(), &["__brightness__"], 1)
        .expect_err("unknown feature");
    assert!(matches!(err, MosaicError::UnknownFeature(name) if name == "__brightness__"));
}
