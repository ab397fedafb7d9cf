//! File-to-file classification regression test
//!
//! Writes two class samples and a scene as PNG files, runs the whole
//! pipeline from disk, and checks the annotated output.

use ieit::io::{RgbImage, read_rgb, write_annotated};
use ieit::recog::{CancelToken, ExamOptions, TrainOptions};
use ieit::{TileRect, classify_to_file};
use ieit_test::synthetic::mosaic_rgb;
use ieit_test::{RegParams, regout_dir, regout_path};

const BLUE: [u8; 3] = [30, 90, 200];
const SAND: [u8; 3] = [200, 180, 40];

fn save(name: &str, layout: &[Vec<[u8; 3]>]) {
    let (w, h, bytes) = mosaic_rgb(layout, 5, 2);
    let image = RgbImage::from_raw(w as u32, h as u32, bytes).expect("image buffer");
    write_annotated(&image, regout_path(name)).expect("write sample");
}

#[test]
fn classify_reg() {
    let mut rp = RegParams::new("classify");

    save("classify_water.png", &[vec![BLUE]]);
    save("classify_sand.png", &[vec![SAND]]);
    save("classify_scene.png", &[vec![BLUE, SAND], vec![SAND, BLUE]]);

    let output = classify_to_file(
        regout_dir(),
        "classify_scene.png",
        &["classify_water.png", "classify_sand.png"],
        regout_path("classify_result.png"),
        &TrainOptions::default(),
        &ExamOptions::new().with_area_size(5),
        &CancelToken::new(),
    )
    .expect("classify_to_file");

    // --- Test 1: model and assignments ---
    rp.compare_values(1.0, output.model.delta() as f64, 0.0);
    let classes: Vec<Option<usize>> = output
        .classification
        .assignments
        .iter()
        .map(|a| a.class)
        .collect();
    rp.compare_bool(true, classes == vec![Some(0), Some(1), Some(1), Some(0)]);
    rp.compare_bool(
        true,
        output.classification.assignments[1].rect == TileRect::new(0, 5, 5),
    );

    // --- Test 2: annotated output ---
    let result = read_rgb(regout_path("classify_result.png")).expect("read result");
    let scene = read_rgb(regout_path("classify_scene.png")).expect("read scene");
    rp.compare_values(scene.width() as f64, result.width() as f64, 0.0);
    // blue outline on the first water tile, orange on the first sand tile
    rp.compare_strings(&[0, 0, 255], &result.get_pixel(1, 1).0);
    rp.compare_strings(&[255, 165, 0], &result.get_pixel(1, 6).0);
    // the tile corner itself is left alone
    rp.compare_strings(&scene.get_pixel(0, 0).0, &result.get_pixel(0, 0).0);

    // --- Test 3: missing class file ---
    let missing = classify_to_file(
        regout_dir(),
        "classify_scene.png",
        &["classify_water.png", "classify_forest.png"],
        regout_path("classify_missing.png"),
        &TrainOptions::default(),
        &ExamOptions::new().with_area_size(5),
        &CancelToken::new(),
    );
    rp.compare_bool(true, missing.is_err());

    assert!(rp.cleanup(), "classify regression test failed");
}
