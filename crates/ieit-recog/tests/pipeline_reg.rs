//! Train-and-classify regression test
//!
//! Two well separated colour classes are trained end to end, then an image
//! made of tiles of both colours is classified. The run is repeated to
//! check that sweep tables are reproducible and independent of the
//! parallel setting.

use ieit_core::{MemoryPixelSource, TileRect};
use ieit_recog::{
    CancelToken, ExamOptions, RecogError, TrainOptions, launch, optimize_delta,
    train_from_matrices,
};
use ieit_test::RegParams;
use ieit_test::synthetic::{constant_profile, mosaic, rgb_patch};

const BLUE: [u8; 3] = [30, 90, 200];
const SAND: [u8; 3] = [200, 180, 40];

fn tables(model: &ieit_recog::Model) -> Vec<u8> {
    let mut out = Vec::new();
    model
        .result()
        .delta
        .write_text(&mut out)
        .expect("write delta table");
    model
        .result()
        .radius
        .write_text(&mut out)
        .expect("write radius table");
    out
}

#[test]
fn pipeline_profile_reg() {
    let mut rp = RegParams::new("pipeline_profile");

    let bright = constant_profile("bright", 10, &[200.0; 4], 2).expect("bright");
    let dark = constant_profile("dark", 10, &[20.0; 4], 2).expect("dark");
    let classes = vec![bright, dark];
    let cancel = CancelToken::new();

    // --- Test 1: delta sweep ---
    let delta = optimize_delta(&classes, &TrainOptions::default(), &cancel).expect("delta");
    rp.compare_values(120.0, delta.rows.len() as f64, 0.0);
    rp.compare_values(1.0, delta.optimal_delta as f64, 0.0);
    rp.compare_bool(true, delta.found_working_area);
    let best = delta.optimal_row().expect("optimal row");
    rp.compare_values(1.0, best.mean_working_area_criterion, 1e-12);
    let in_range = delta.rows.iter().all(|r| (1..=120).contains(&r.delta));
    rp.compare_bool(true, in_range);

    // --- Test 2: trained model ---
    let model = train_from_matrices(&classes, &TrainOptions::default(), &cancel).expect("train");
    rp.compare_values(1.0, model.delta() as f64, 0.0);
    rp.compare_bool(true, model.radii() == [Some(3), Some(1)]);
    rp.compare_bool(true, model.undefined_classes().is_empty());

    // --- Test 3: a tile from the bright distribution is class 0 ---
    let tile = constant_profile("tile", 10, &[200.0; 4], 2).expect("tile");
    let verdict = model.classify_matrix(&tile).expect("classify tile");
    rp.compare_bool(true, verdict.class == Some(0));
    // 4 rows at distance 1 and 6 at distance 2, radius 3
    rp.compare_values(14.0 / 30.0, verdict.score, 1e-12);

    // --- Test 4: single-channel image, one tile of each class ---
    let profile = [200.0, 200.0, 200.0, 200.0, 20.0, 20.0, 20.0, 20.0];
    let image = constant_profile("image", 4, &profile, 2).expect("image");
    let options = ExamOptions::new().with_area_size(4).with_channels(1);
    let classification = model
        .classify_image(&image, &options, &cancel)
        .expect("classify image");
    rp.compare_values(2.0, classification.assignments.len() as f64, 0.0);
    rp.compare_bool(true, classification.assignments[0].rect == TileRect::new(0, 0, 4));
    rp.compare_bool(true, classification.assignments[0].class == Some(0));
    rp.compare_bool(true, classification.assignments[1].class == Some(1));
    rp.compare_values(1.0, classification.assignments[1].score, 0.0);

    // --- Test 5: idempotence ---
    let again = train_from_matrices(&classes, &TrainOptions::default(), &cancel).expect("retrain");
    rp.compare_bool(true, again == model);
    rp.compare_strings(&tables(&model), &tables(&again));

    // --- Test 6: sequential run matches ---
    let sequential = train_from_matrices(
        &classes,
        &TrainOptions::new().with_parallel(false),
        &cancel,
    )
    .expect("train sequential");
    rp.compare_strings(&tables(&model), &tables(&sequential));

    // --- Test 7: a single class is rejected ---
    let single = train_from_matrices(&classes[..1], &TrainOptions::default(), &cancel);
    rp.compare_bool(true, matches!(single, Err(RecogError::TooFewClasses { count: 1 })));

    assert!(rp.cleanup(), "pipeline_profile regression test failed");
}

#[test]
fn pipeline_rgb_reg() {
    let mut rp = RegParams::new("pipeline_rgb");

    let source = MemoryPixelSource::new()
        .with("water", rgb_patch("water", 5, BLUE, 2).expect("water"))
        .with("sand", rgb_patch("sand", 5, SAND, 2).expect("sand"))
        .with(
            "scene",
            mosaic(
                "scene",
                &[vec![BLUE, SAND], vec![SAND, BLUE]],
                5,
                2,
            )
            .expect("scene"),
        );

    let output = launch(
        &source,
        "scene",
        &["water", "sand"],
        &TrainOptions::default(),
        &ExamOptions::new().with_area_size(5),
        &CancelToken::new(),
    )
    .expect("launch");

    // --- Test 1: optimization ---
    // At delta 1 every water row has 9 of its 15 features in the band
    rp.compare_values(1.0, output.model.delta() as f64, 0.0);
    rp.compare_bool(true, output.model.radii() == [Some(14), Some(8)]);

    // --- Test 2: tiles in column-major order ---
    let classes: Vec<Option<usize>> = output
        .classification
        .assignments
        .iter()
        .map(|a| a.class)
        .collect();
    rp.compare_bool(true, classes == vec![Some(0), Some(1), Some(1), Some(0)]);
    let origins: Vec<(usize, usize)> = output
        .classification
        .assignments
        .iter()
        .map(|a| (a.rect.x, a.rect.y))
        .collect();
    rp.compare_bool(true, origins == vec![(0, 0), (0, 5), (5, 0), (5, 5)]);
    rp.compare_values(1.0 - 6.0 / 14.0, output.classification.assignments[0].score, 1e-12);
    rp.compare_bool(
        true,
        output.classification.class_histogram(2) == vec![2, 2],
    );

    // --- Test 3: missing image ---
    let missing = launch(
        &source,
        "harbour",
        &["water", "sand"],
        &TrainOptions::new().with_delta_range(1, 3),
        &ExamOptions::new().with_area_size(5),
        &CancelToken::new(),
    );
    rp.compare_bool(true, missing.is_err());

    // --- Test 4: cancellation ---
    let cancel = CancelToken::new();
    cancel.cancel();
    let cancelled = launch(
        &source,
        "scene",
        &["water", "sand"],
        &TrainOptions::default(),
        &ExamOptions::new().with_area_size(5),
        &cancel,
    );
    rp.compare_bool(true, matches!(cancelled, Err(RecogError::Cancelled { .. })));

    assert!(rp.cleanup(), "pipeline_rgb regression test failed");
}

#[test]
fn pipeline_undefined_class_reg() {
    let mut rp = RegParams::new("pipeline_undefined_class");

    // Classes 0 and 1 are identical, so neither has a working-area radius
    let level = constant_profile("level", 4, &[100.0; 4], 0).expect("level");
    let twin = level.clone();
    let dark = constant_profile("dark", 4, &[0.0; 4], 0).expect("dark");
    let half = constant_profile("half", 4, &[100.0, 100.0, 0.0, 0.0], 0).expect("half");
    let classes = vec![level, twin, dark, half];
    let cancel = CancelToken::new();

    // --- Test 1: training falls back to the best negative delta ---
    let model = train_from_matrices(&classes, &TrainOptions::default(), &cancel).expect("train");
    rp.compare_bool(false, model.result().delta.found_working_area);
    rp.compare_values(1.0, model.delta() as f64, 0.0);
    // two classes at the -10 floor, two at 1.0
    let best = model.result().delta.optimal_row().expect("optimal row");
    rp.compare_values(-4.5, best.mean_working_area_criterion, 1e-12);
    rp.compare_values(-1.0, best.reported_working_area_criterion(), 0.0);
    rp.compare_bool(true, model.radii() == [None, None, Some(1), Some(1)]);
    rp.compare_bool(true, model.undefined_classes() == vec![0, 1]);

    // --- Test 2: undefined classes are excluded, the rest still classify ---
    let profile = [
        0.0, 0.0, 0.0, 0.0, 100.0, 100.0, 0.0, 0.0, 100.0, 100.0, 100.0, 100.0,
    ];
    let image = constant_profile("image", 4, &profile, 0).expect("image");
    let options = ExamOptions::new().with_area_size(4).with_channels(1);
    let classification = model
        .classify_image(&image, &options, &cancel)
        .expect("classify image");
    rp.compare_bool(true, classification.undefined_classes == vec![0, 1]);
    let classes: Vec<Option<usize>> = classification
        .assignments
        .iter()
        .map(|a| a.class)
        .collect();
    rp.compare_bool(true, classes == vec![Some(2), Some(3), None]);
    rp.compare_values(1.0, classification.assignments[0].score, 0.0);
    rp.compare_values(1.0, classification.assignments[1].score, 0.0);
    rp.compare_bool(
        true,
        classification.assignments[2].rect == TileRect::new(8, 0, 4),
    );
    rp.compare_bool(true, classification.class_histogram(4) == vec![0, 0, 1, 1]);

    assert!(rp.cleanup(), "pipeline_undefined_class regression test failed");
}
