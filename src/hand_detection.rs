//! Hand landmark detection using `ONNX` Runtime.
//!
//! Wraps a MediaPipe-style single-hand landmark model: given a BGR frame it
//! returns 21 image-normalized landmarks, or nothing when the model's
//! hand-presence score falls below the configured threshold. Absence of a
//! hand is a normal per-frame outcome, not an error.

use crate::constants::{DEFAULT_HAND_INPUT_SIZE, NUM_HAND_LANDMARKS};
use crate::landmarks::NormalizedLandmark;
use crate::utils::safe_cast::usize_to_i32;
use crate::Result;
use ndarray::{Array4, CowArray};
use opencv::core::{Mat, Size, CV_32F};
use opencv::imgproc::{self, InterpolationFlags};
use opencv::prelude::*;
use ort::{Environment, Session, Value};
use std::path::Path;
use std::sync::Arc;

/// Hand landmark detector using `ONNX` Runtime
pub struct HandDetector {
    session: Session,
    input_size: i32,
    presence_threshold: f32,
}

impl HandDetector {
    /// Create a new hand detector from an `ONNX` model file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ONNX model file cannot be loaded
    /// - The ONNX runtime environment cannot be created
    /// - The model has no inputs
    pub fn new<P: AsRef<Path>>(model_path: P, presence_threshold: f32) -> Result<Self> {
        log::info!(
            "Initializing HandDetector with model: {}",
            model_path.as_ref().display()
        );
        let environment = Arc::new(
            Environment::builder()
                .with_name("hand_detector")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(model_path)?;

        // Read the input size from the model when it declares one
        let input_meta = session
            .inputs
            .first()
            .ok_or_else(|| crate::error::Error::ModelInputError("Model has no inputs".to_string()))?;

        #[allow(clippy::cast_possible_truncation)] // Model input sizes are small
        let input_size = if input_meta.dimensions.len() >= 4 {
            input_meta.dimensions[2].map_or(DEFAULT_HAND_INPUT_SIZE, |d| d as i32)
        } else {
            DEFAULT_HAND_INPUT_SIZE
        };

        Ok(Self {
            session,
            input_size,
            presence_threshold,
        })
    }

    /// Detect the first hand in a BGR frame.
    ///
    /// Returns `Ok(None)` when no hand is present with sufficient
    /// confidence; the landmark coordinates are normalized to `[0, 1]`
    /// relative to the frame.
    ///
    /// # Errors
    ///
    /// Returns an error if preprocessing or model inference fails
    pub fn detect(&self, frame: &Mat) -> Result<Option<Vec<NormalizedLandmark>>> {
        let input = self.preprocess(frame)?;
        let (landmarks, presence) = self.forward(input)?;

        if presence < self.presence_threshold {
            log::debug!("Hand presence {presence:.3} below threshold, no observation");
            return Ok(None);
        }

        Ok(Some(landmarks))
    }

    /// Resize, convert to RGB float and lay the frame out as an NHWC tensor
    #[allow(clippy::cast_sign_loss)] // OpenCV dimensions are positive
    fn preprocess(&self, frame: &Mat) -> Result<Array4<f32>> {
        let size = self.input_size as usize;
        let channels = 3;

        let mut resized = Mat::default();
        imgproc::resize(
            frame,
            &mut resized,
            Size::new(self.input_size, self.input_size),
            0.0,
            0.0,
            InterpolationFlags::INTER_LINEAR as i32,
        )?;

        let mut rgb_image = Mat::default();
        imgproc::cvt_color(&resized, &mut rgb_image, imgproc::COLOR_BGR2RGB, 0)?;

        let mut float_image = Mat::default();
        rgb_image.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

        let mut data = vec![0.0f32; size * size * channels];
        for row in 0..size {
            for col in 0..size {
                let pixel =
                    float_image.at_2d::<opencv::core::Vec3f>(usize_to_i32(row)?, usize_to_i32(col)?)?;
                for ch in 0..channels {
                    data[(row * size + col) * channels + ch] = pixel[ch];
                }
            }
        }

        Array4::from_shape_vec((1, size, size, channels), data)
            .map_err(|e| crate::error::Error::ModelInputError(format!("Failed to create array: {e}")))
    }

    /// Run inference and split the outputs into landmarks and presence score
    fn forward(&self, input: Array4<f32>) -> Result<(Vec<NormalizedLandmark>, f32)> {
        let cow_array = CowArray::from(input.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;
        let mut outputs = outputs.into_iter();

        let landmarks_output = outputs
            .next()
            .ok_or_else(|| crate::error::Error::ModelOutputError("No landmark output from model".to_string()))?;
        let landmarks_tensor = landmarks_output.try_extract::<f32>()?;
        let landmarks_view = landmarks_tensor.view();
        let raw = landmarks_view
            .as_slice()
            .ok_or_else(|| crate::error::Error::ModelOutputError("Failed to read landmark output".to_string()))?;

        // The landmark model emits (x, y, z) per point in input-pixel units
        let values_per_point = 3;
        if raw.len() < NUM_HAND_LANDMARKS * values_per_point {
            return Err(crate::error::Error::ModelOutputError(format!(
                "Expected {} landmark values, got {}",
                NUM_HAND_LANDMARKS * values_per_point,
                raw.len()
            )));
        }

        #[allow(clippy::cast_precision_loss)] // Input size is small
        let scale = self.input_size as f32;
        let landmarks = (0..NUM_HAND_LANDMARKS)
            .map(|i| NormalizedLandmark {
                x: raw[i * values_per_point] / scale,
                y: raw[i * values_per_point + 1] / scale,
            })
            .collect();

        // Second output, when present, is the hand-presence score
        let presence = match outputs.next() {
            Some(score_output) => {
                let score_tensor = score_output.try_extract::<f32>()?;
                let score_view = score_tensor.view();
                score_view.iter().copied().next().unwrap_or(0.0)
            }
            None => 1.0,
        };

        Ok((landmarks, presence))
    }

    /// Model input size (square, pixels)
    #[must_use]
    pub fn input_size(&self) -> i32 {
        self.input_size
    }
}
