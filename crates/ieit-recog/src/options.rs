//! Options for training and classification
//!
//! The defaults reproduce the reference parameter ranges: deltas `1..=120`,
//! radii `0..=60`, working area `detection >= 0.5 && beta < 0.5`, and
//! 50-pixel classification tiles.

use ieit_core::RGB_CHANNELS;

use crate::criterion::WorkingArea;
use crate::{RecogError, RecogResult};

/// Smallest candidate delta
pub const DEFAULT_DELTA_MIN: u32 = 1;
/// Largest candidate delta
pub const DEFAULT_DELTA_MAX: u32 = 120;
/// Largest candidate container radius
pub const DEFAULT_RADIUS_MAX: usize = 60;
/// Side of a classification tile in pixels
pub const DEFAULT_AREA_SIZE: usize = 50;

/// Largest accepted `delta_max`; a band of 255 already covers every 8-bit value
pub const DELTA_MAX_LIMIT: u32 = 255;
/// Largest accepted `radius_max`
pub const RADIUS_MAX_LIMIT: usize = u16::MAX as usize;

/// Options for delta and radius optimization
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Smallest delta in the sweep (default: 1)
    pub delta_min: u32,

    /// Largest delta in the sweep, inclusive (default: 120)
    pub delta_max: u32,

    /// Largest radius in each class's radius sweep, inclusive (default: 60)
    pub radius_max: usize,

    /// Working-area thresholds (default: detection >= 0.5, beta < 0.5)
    pub working_area: WorkingArea,

    /// Evaluate deltas and classes on the rayon pool (default: true)
    ///
    /// Has no effect unless the `rayon` feature is enabled. Results are
    /// identical either way.
    pub parallel: bool,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            delta_min: DEFAULT_DELTA_MIN,
            delta_max: DEFAULT_DELTA_MAX,
            radius_max: DEFAULT_RADIUS_MAX,
            working_area: WorkingArea::default(),
            parallel: true,
        }
    }
}

impl TrainOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inclusive delta range
    pub fn with_delta_range(mut self, min: u32, max: u32) -> Self {
        self.delta_min = min;
        self.delta_max = max;
        self
    }

    /// Set the largest candidate radius
    pub fn with_radius_max(mut self, radius_max: usize) -> Self {
        self.radius_max = radius_max;
        self
    }

    /// Set the working-area thresholds
    pub fn with_working_area(mut self, working_area: WorkingArea) -> Self {
        self.working_area = working_area;
        self
    }

    /// Enable or disable parallel evaluation
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Candidate deltas in sweep order
    pub fn deltas(&self) -> Vec<u32> {
        (self.delta_min..=self.delta_max).collect()
    }

    /// Validate options
    pub fn validate(&self) -> RecogResult<()> {
        if self.delta_min == 0 {
            return Err(RecogError::InvalidParameter(
                "delta_min must be at least 1".to_string(),
            ));
        }
        if self.delta_min > self.delta_max {
            return Err(RecogError::InvalidParameter(format!(
                "delta_min {} exceeds delta_max {}",
                self.delta_min, self.delta_max
            )));
        }
        if self.delta_max > DELTA_MAX_LIMIT {
            return Err(RecogError::InvalidParameter(format!(
                "delta_max {} exceeds {}",
                self.delta_max, DELTA_MAX_LIMIT
            )));
        }
        if self.radius_max > RADIUS_MAX_LIMIT {
            return Err(RecogError::InvalidParameter(format!(
                "radius_max {} exceeds {}",
                self.radius_max, RADIUS_MAX_LIMIT
            )));
        }
        let WorkingArea {
            min_detection,
            max_false_acceptance,
        } = self.working_area;
        if !(0.0..=1.0).contains(&min_detection) {
            return Err(RecogError::InvalidParameter(
                "min_detection must be in [0, 1]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&max_false_acceptance) {
            return Err(RecogError::InvalidParameter(
                "max_false_acceptance must be in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options for classifying an unseen image
#[derive(Debug, Clone)]
pub struct ExamOptions {
    /// Side of each square tile in pixels (default: 50)
    ///
    /// Must match the width of the class sample images, since tiles are
    /// encoded against the same limit vector.
    pub area_size: usize,

    /// Number of channel blocks in the pixel layout (default: 3)
    pub channels: usize,

    /// Classify tiles on the rayon pool (default: true)
    pub parallel: bool,
}

impl Default for ExamOptions {
    fn default() -> Self {
        Self {
            area_size: DEFAULT_AREA_SIZE,
            channels: RGB_CHANNELS,
            parallel: true,
        }
    }
}

impl ExamOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tile side
    pub fn with_area_size(mut self, area_size: usize) -> Self {
        self.area_size = area_size;
        self
    }

    /// Set the number of channel blocks
    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    /// Enable or disable parallel classification
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of features in one tile's rows
    pub fn tile_features(&self) -> usize {
        self.area_size * self.channels
    }

    /// Validate options
    pub fn validate(&self) -> RecogResult<()> {
        if self.area_size == 0 {
            return Err(RecogError::InvalidParameter(
                "area_size must be positive".to_string(),
            ));
        }
        if self.channels == 0 {
            return Err(RecogError::InvalidParameter(
                "channels must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
