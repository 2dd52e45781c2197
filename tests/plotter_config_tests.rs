use mosaic_rs::core::ImageSize;
use mosaic_rs::render::{Color, NullRenderer};
use mosaic_rs::{MosaicError, Plotter, PlotterConfig};

#[test]
fn config_json_round_trip() {
    let config = PlotterConfig::new()
        .with_n_jobs(4)
        .with_image_dir("/data/images")
        .with_background(Color::rgb(0.1, 0.2, 0.3))
        .with_figsize(ImageSize::new(800, 600));

    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 1"));
    let parsed = PlotterConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn bare_config_object_uses_defaults() {
    let parsed = PlotterConfig::from_json_str(r#"{"image_dir": "imgs"}"#).expect("parse");
    assert_eq!(parsed.image_dir, "imgs");
    assert_eq!(parsed.n_jobs, 1);
    assert_eq!(parsed.background, Color::WHITE);
    assert_eq!(parsed.figsize, None);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let err = PlotterConfig::from_json_str(r#"{"schema_version": 9, "config": {}}"#)
        .expect_err("schema");
    assert!(matches!(err, MosaicError::InvalidData(message) if message.contains("schema")));
}

#[test]
fn invalid_background_fails_plotter_init() {
    let config = PlotterConfig::new().with_background(Color::rgb(1.5, 0.0, 0.0));
    assert!(Plotter::new(NullRenderer::default(), config).is_err());
}

#[test]
fn zero_figsize_is_rejected() {
    let config = PlotterConfig::new().with_figsize(ImageSize::new(0, 10));
    assert!(config.validate().is_err());
}

#[test]
fn set_config_validates_before_replacing() {
    let mut plotter =
        Plotter::new(NullRenderer::default(), PlotterConfig::default()).expect("plotter init");
    let bad = PlotterConfig::new().with_figsize(ImageSize::new(10, 0));
    assert!(plotter.set_config(bad).is_err());
    assert_eq!(plotter.config(), &PlotterConfig::default());
}
