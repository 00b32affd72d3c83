//! Main application module: camera loop, detection, pipeline stepping,
//! overlay drawing and result logging.

use crate::{
    config::Config,
    cooldown::CooldownState,
    error::Result,
    finger_classifier::{create_thumb_rule, FingerClassifier, LedSimulator},
    hand_detection::HandDetector,
    landmarks::HandObservation,
    pinch::PinchTransform,
    pipeline::{ActionStatus, FrameDisplay, GesturePipeline},
    result_log::ResultLogger,
    utils::{interp, safe_cast::f64_to_i32},
};
use log::{info, warn};
use opencv::{
    core::{Mat, Point, Scalar},
    highgui::{self, WINDOW_NORMAL},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE},
};
use std::time::{Duration, Instant};

/// Video source type
#[derive(Debug, Clone)]
pub enum VideoSource {
    /// Webcam index
    Camera(i32),
    /// Video file path
    File(String),
}

/// Main application struct
pub struct GestureApp {
    config: Config,
    video_source: VideoSource,
    detector: HandDetector,
    pipeline: GesturePipeline,
    cooldown: CooldownState,
    leds: LedSimulator,
    logger: ResultLogger,
    video_capture: VideoCapture,
    headless: bool,
}

impl GestureApp {
    /// Create a new gesture automation application
    pub fn new(config: Config, video_source: VideoSource, headless: bool) -> Result<Self> {
        info!("Initializing gesture automation application");
        config.validate()?;

        let mut video_capture = match &video_source {
            VideoSource::Camera(index) => {
                info!("Opening camera {index}");
                let mut cap = VideoCapture::new(*index, videoio::CAP_ANY)?;

                // Reduce buffer size for lower latency (webcam only)
                cap.set(CAP_PROP_BUFFERSIZE, 1.0)?;

                cap
            }
            VideoSource::File(path) => {
                info!("Opening video file: {path}");
                VideoCapture::from_file(path, videoio::CAP_ANY)?
            }
        };

        if !video_capture.is_opened()? {
            return Err(crate::Error::InvalidInput(
                "Failed to open video source".to_string(),
            ));
        }

        let detector = HandDetector::new(&config.detection.model, config.detection.presence_threshold)?;

        let thumb_rule = create_thumb_rule(&config.gesture.thumb_rule)?;
        let classifier = FingerClassifier::new(thumb_rule);
        let pinch = PinchTransform::new(config.pinch.near, config.pinch.far);
        let pipeline = GesturePipeline::new(classifier, pinch, config.gesture.subject_id);

        let cooldown = CooldownState::new(Duration::from_secs_f64(config.gesture.cooldown_secs));
        let logger = ResultLogger::open(&config.logging.results_csv)?;

        if !headless {
            highgui::named_window(&config.display.window_name, WINDOW_NORMAL)?;
        }

        // Warm-up read so a dead camera fails here rather than mid-loop
        let mut warmup = Mat::default();
        video_capture.read(&mut warmup)?;

        Ok(Self {
            config,
            video_source,
            detector,
            pipeline,
            cooldown,
            leds: LedSimulator::new(),
            logger,
            video_capture,
            headless,
        })
    }

    /// Run the main application loop
    pub fn run(&mut self) -> Result<()> {
        info!(
            "Starting main loop (cooldown {:.0}s, subject {})",
            self.config.gesture.cooldown_secs,
            self.pipeline.subject_id()
        );

        let mut prev_frame_time = Instant::now();

        loop {
            let mut frame = Mat::default();
            if !self.video_capture.read(&mut frame)? || frame.empty() {
                if matches!(self.video_source, VideoSource::File(_)) {
                    info!("End of video file reached");
                    break;
                }
                warn!("Failed to read frame, retrying...");
                continue;
            }

            if self.config.camera.flip_horizontal {
                let temp = frame.clone();
                opencv::core::flip(&temp, &mut frame, 1)?;
            }

            let now = Instant::now();

            // Detector failures are camera-boundary faults; a missing hand
            // is a normal observation and flows through as None
            let observation = self
                .detector
                .detect(&frame)?
                .and_then(|landmarks| {
                    HandObservation::from_normalized(&landmarks, frame.cols(), frame.rows())
                });

            // Time spent producing this frame's observation, carried into
            // any triggered record
            let elapsed = now.elapsed();

            let step = self
                .pipeline
                .step(&mut self.cooldown, observation.as_ref(), now, elapsed);

            self.leds.update(step.display.fingers.as_ref());

            if let Some(record) = &step.record {
                self.logger.append(record)?;
            }

            // Integer frame-rate estimate from the inter-frame gap
            let dt = now.saturating_duration_since(prev_frame_time).as_secs_f64();
            let fps = if dt > 0.0 { (1.0 / dt).floor() } else { 0.0 };
            prev_frame_time = now;

            if !self.headless {
                self.draw_overlays(&mut frame, observation.as_ref(), &step.display, fps)?;
                highgui::imshow(&self.config.display.window_name, &frame)?;

                let key = highgui::wait_key(20)?;
                if key == 27 || key == i32::from(b'q') {
                    info!("Exit requested by user");
                    break;
                }
            }
        }

        info!("Application shutting down");
        Ok(())
    }

    /// Draw landmarks, pinch geometry, servo bar and status text
    fn draw_overlays(
        &self,
        frame: &mut Mat,
        observation: Option<&HandObservation>,
        display: &FrameDisplay,
        fps: f64,
    ) -> Result<()> {
        if let Some(hand) = observation {
            if self.config.display.show_landmarks {
                for point in hand.points() {
                    imgproc::circle(
                        frame,
                        Point::new(point.x, point.y),
                        5,
                        Scalar::new(0.0, 0.0, 255.0, 0.0),
                        -1,
                        LINE_8,
                        0,
                    )?;
                }
            }

            if let Some(actuator) = &display.actuator {
                self.draw_pinch(frame, hand, actuator.pinch_detected)?;

                if self.config.display.show_servo_bar {
                    self.draw_servo_bar(frame, actuator.distance, actuator.angle)?;
                }
            }
        }

        put_label(frame, "Press 'Q' to Quit", Point::new(10, 25), Scalar::new(0.0, 255.0, 255.0, 0.0))?;
        put_label(
            frame,
            &format!("FPS: {fps:.0}"),
            Point::new(10, 55),
            Scalar::new(0.0, 0.0, 255.0, 0.0),
        )?;

        let gesture_text = match display.count {
            Some(count) => format!("Predicted Gesture: {count}"),
            None => "No hand detected".to_string(),
        };
        put_label(frame, &gesture_text, Point::new(10, 85), Scalar::new(255.0, 0.0, 0.0, 0.0))?;

        if !matches!(display.status, ActionStatus::Idle | ActionStatus::NoHand) {
            put_label(
                frame,
                display.status.label(),
                Point::new(10, 115),
                Scalar::new(0.0, 255.0, 0.0, 0.0),
            )?;
        }

        Ok(())
    }

    /// Draw the pinch line between thumb and index tips with a midpoint
    /// marker that turns green when a pinch is detected
    fn draw_pinch(&self, frame: &mut Mat, hand: &HandObservation, pinched: bool) -> Result<()> {
        let thumb = hand.point(crate::landmarks::index::THUMB_TIP);
        let index_tip = hand.point(crate::landmarks::index::INDEX_FINGER_TIP);
        let (mid_x, mid_y) = PinchTransform::midpoint(hand);

        imgproc::line(
            frame,
            Point::new(thumb.x, thumb.y),
            Point::new(index_tip.x, index_tip.y),
            Scalar::new(0.0, 0.0, 255.0, 0.0),
            2,
            LINE_8,
            0,
        )?;

        let midpoint_color = if pinched {
            Scalar::new(0.0, 255.0, 0.0, 0.0)
        } else {
            Scalar::new(0.0, 0.0, 255.0, 0.0)
        };
        imgproc::circle(frame, Point::new(mid_x, mid_y), 7, midpoint_color, -1, LINE_8, 0)?;

        Ok(())
    }

    /// Draw the simulated servo bar with its current angle
    fn draw_servo_bar(&self, frame: &mut Mat, distance: f64, angle: i32) -> Result<()> {
        imgproc::rectangle(
            frame,
            opencv::core::Rect::new(50, 150, 35, 250),
            Scalar::new(0.0, 255.0, 0.0, 0.0),
            2,
            LINE_8,
            0,
        )?;

        let bar_top = f64_to_i32(interp(
            distance,
            (self.config.pinch.near, self.config.pinch.far),
            (400.0, 150.0),
        ))?;
        imgproc::rectangle(
            frame,
            opencv::core::Rect::new(50, bar_top, 35, 400 - bar_top),
            Scalar::new(0.0, 255.0, 0.0, 0.0),
            -1,
            LINE_8,
            0,
        )?;

        imgproc::put_text(
            frame,
            &format!("DEG {angle}"),
            Point::new(50, 135),
            FONT_HERSHEY_SIMPLEX,
            0.5,
            Scalar::new(0.0, 255.0, 0.0, 0.0),
            2,
            LINE_8,
            false,
        )?;

        Ok(())
    }
}

fn put_label(frame: &mut Mat, text: &str, origin: Point, color: Scalar) -> Result<()> {
    imgproc::put_text(
        frame,
        text,
        origin,
        FONT_HERSHEY_SIMPLEX,
        0.7,
        color,
        2,
        LINE_8,
        false,
    )?;
    Ok(())
}
