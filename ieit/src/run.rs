//! File-to-file classification run

use std::path::Path;

use ieit_io::{FilePixelSource, IoError, Palette, annotate, write_annotated};
use ieit_recog::{CancelToken, ExamOptions, LaunchOutput, RecogError, TrainOptions, launch};
use thiserror::Error;
use tracing::info;

/// Failure of a file-to-file run
#[derive(Error, Debug)]
pub enum RunError {
    /// Training or classification failed
    #[error("classification failed: {0}")]
    Recog(#[from] RecogError),

    /// Reading the examined image or writing the result failed
    #[error("image output failed: {0}")]
    Io(#[from] IoError),
}

/// Train on class images, classify a scene and save the annotated scene
///
/// All identifiers are file paths relative to `root`. The output format
/// follows the extension of `output`.
pub fn classify_to_file<R, O, I>(
    root: R,
    image_id: &str,
    class_ids: &[I],
    output: O,
    train_options: &TrainOptions,
    exam_options: &ExamOptions,
    cancel: &CancelToken,
) -> Result<LaunchOutput, RunError>
where
    R: AsRef<Path>,
    O: AsRef<Path>,
    I: AsRef<str>,
{
    let source = FilePixelSource::new(root.as_ref());
    let result = launch(
        &source,
        image_id,
        class_ids,
        train_options,
        exam_options,
        cancel,
    )?;

    let mut scene = source.read(image_id)?;
    annotate(&mut scene, &result.classification.assignments, &Palette::default());
    write_annotated(&scene, output.as_ref())?;
    info!(
        output = %output.as_ref().display(),
        classified = result.classification.classified_count(),
        "classified image written"
    );
    Ok(result)
}
