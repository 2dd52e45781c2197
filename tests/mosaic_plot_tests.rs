mod common;

use common::{ImageFixture, grey_images, solid};
use mosaic_rs::api::{GridOptions, MosaicOptions, SortKey};
use mosaic_rs::core::ImageSize;
use mosaic_rs::data::DataTable;
use mosaic_rs::features::HsvFeature;
use mosaic_rs::io::ImageSource;
use mosaic_rs::render::{Color, NullRenderer, PlotKind};
use mosaic_rs::{MosaicError, Plotter, PlotterConfig};

fn plotter() -> Plotter<NullRenderer> {
    Plotter::new(NullRenderer::default(), PlotterConfig::default()).expect("plotter init")
}

#[test]
fn mosaic_tiles_in_memory_images_edge_to_edge() {
    let mut plotter = plotter();
    let frame = plotter
        .mosaic_plot(
            None,
            MosaicOptions::new()
                .with_images(grey_images(&[10, 20, 30, 40, 50], 4))
                .with_image_size(ImageSize::square(4)),
        )
        .expect("mosaic");

    assert_eq!(frame.kind, PlotKind::Mosaic);
    assert_eq!(frame.size(), ImageSize::square(12));
    assert_eq!(frame.image.get_pixel(4, 4).0, [50; 3]);
    // unused trailing cells stay white
    assert_eq!(frame.image.get_pixel(11, 11).0, [255; 3]);
    assert_eq!(plotter.renderer().last_size, Some(ImageSize::square(12)));
}

#[test]
fn mosaic_sorts_by_hsv_value() {
    let mut plotter = plotter();
    let frame = plotter
        .mosaic_plot(
            None,
            MosaicOptions::new()
                .with_images(grey_images(&[200, 50, 120, 10], 2))
                .with_image_size(ImageSize::square(2))
                .with_sort_by(HsvFeature::Value),
        )
        .expect("mosaic");

    let corners: Vec<u8> = [(0, 0), (2, 0), (0, 2), (2, 2)]
        .iter()
        .map(|&(x, y)| frame.image.get_pixel(x, y)[0])
        .collect();
    assert_eq!(corners, vec![10, 50, 120, 200]);
}

#[test]
fn mosaic_sorts_by_data_column_from_files() {
    let fixture = ImageFixture::new();
    let files = fixture.write_grey_series(&[10, 20, 30, 40], 2);
    let table = DataTable::new()
        .with_text("path", files)
        .expect("path")
        .with_numeric("rank", vec![3.0, 0.0, 2.0, 1.0])
        .expect("rank");

    let config = PlotterConfig::default().with_image_dir(fixture.dir_string());
    let mut plotter = Plotter::new(NullRenderer::default(), config).expect("plotter init");
    let frame = plotter
        .mosaic_plot(
            Some(&table),
            MosaicOptions::new()
                .with_images("path")
                .with_image_size(ImageSize::square(2))
                .with_sort_by("rank"),
        )
        .expect("mosaic");

    assert_eq!(frame.image.get_pixel(0, 0)[0], 20);
    assert_eq!(frame.image.get_pixel(2, 0)[0], 40);
    assert_eq!(frame.image.get_pixel(0, 2)[0], 30);
    assert_eq!(frame.image.get_pixel(2, 2)[0], 10);
}

#[test]
fn unknown_sort_column_is_reported() {
    let mut plotter = plotter();
    let table = DataTable::new()
        .with_numeric("x", vec![1.0])
        .expect("x");
    let err = plotter
        .mosaic_plot(
            Some(&table),
            MosaicOptions::new()
                .with_images(grey_images(&[10], 2))
                .with_sort_by("missing"),
        )
        .expect_err("unknown key");
    assert!(matches!(err, MosaicError::UnknownSortKey(name) if name == "missing"));
}

#[test]
fn sort_values_must_match_image_count() {
    let mut plotter = plotter();
    let err = plotter
        .mosaic_plot(
            None,
            MosaicOptions::new()
                .with_images(grey_images(&[10, 20], 2))
                .with_sort_by(vec![1.0]),
        )
        .expect_err("length mismatch");
    assert!(matches!(err, MosaicError::InvalidData(_)));
}

#[test]
fn mixed_sizes_without_resize_are_rejected() {
    let mut plotter = plotter();
    let images = vec![solid(2, 2, [0, 0, 0]), solid(3, 2, [0, 0, 0])];
    let err = plotter
        .mosaic_plot(None, MosaicOptions::new().with_images(images).without_resize())
        .expect_err("mismatch");
    assert!(matches!(err, MosaicError::MismatchedImageSize { index: 1, .. }));
    assert_eq!(plotter.renderer().frames_rendered, 0);
}

#[test]
fn empty_image_set_is_rejected() {
    let mut plotter = plotter();
    let err = plotter
        .mosaic_plot(None, MosaicOptions::new().with_images(ImageSource::Images(Vec::new())))
        .expect_err("empty");
    assert!(matches!(err, MosaicError::NoImages));
}

#[test]
fn grid_inserts_padding_in_background_color() {
    let config = PlotterConfig::default().with_background(Color::BLACK);
    let mut plotter = Plotter::new(NullRenderer::default(), config).expect("plotter init");
    let frame = plotter
        .image_grid(
            None,
            GridOptions::new()
                .with_images(grey_images(&[100; 4], 3))
                .with_image_size(ImageSize::square(3))
                .with_padding(2),
        )
        .expect("grid");

    assert_eq!(frame.kind, PlotKind::Grid);
    assert_eq!(frame.size(), ImageSize::square(8));
    assert_eq!(frame.image.get_pixel(3, 0).0, [0; 3]);
    assert_eq!(frame.image.get_pixel(5, 5).0, [100; 3]);
}

#[test]
fn grid_padding_overflow_is_an_error() {
    let mut plotter = plotter();
    let err = plotter
        .image_grid(
            None,
            GridOptions::new()
                .with_images(grey_images(&[100; 4], 3))
                .with_image_size(ImageSize::square(3))
                .with_padding(u32::MAX),
        )
        .expect_err("padding overflows the canvas");
    assert!(matches!(err, MosaicError::InvalidData(_)));
}

#[test]
fn figsize_shrinks_the_final_plot() {
    let config = PlotterConfig::default().with_figsize(ImageSize::new(10, 10));
    let mut plotter = Plotter::new(NullRenderer::default(), config).expect("plotter init");
    let frame = plotter
        .mosaic_plot(
            None,
            MosaicOptions::new().with_images(grey_images(&[10, 20, 30, 40], 40)),
        )
        .expect("mosaic");
    assert_eq!(frame.size(), ImageSize::square(10));
}

#[test]
fn sort_key_parse_recognises_feature_names() {
    assert_eq!(SortKey::parse("__hue__"), SortKey::Hsv(HsvFeature::Hue));
    assert_eq!(SortKey::parse("__value__"), SortKey::Hsv(HsvFeature::Value));
    assert_eq!(SortKey::parse("score"), SortKey::Column("score".to_owned()));
}
