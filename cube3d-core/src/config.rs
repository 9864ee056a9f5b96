/// Render and interaction parameters
use thiserror::Error;

use crate::projection::ProjectionMode;

/// Zoom change per scroll notch.
pub const ZOOM_STEP: f64 = 1.1;

/// Trackball rotation per pixel of drag at full sensitivity.
pub const RADIANS_PER_PIXEL: f64 = 0.02;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid zoom range {min}..={max}")]
    ZoomRange { min: f64, max: f64 },
    #[error("sensitivity {0} is outside 0..=1")]
    Sensitivity(f64),
    #[error("move threshold must be positive, got {0}")]
    MoveThreshold(f64),
}

/// Parameters shared by the renderer, the picker and the gesture controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub projection: ProjectionMode,
    zoom: f64,
    zoom_min: f64,
    zoom_max: f64,
    sensitivity: f64,
    /// Drag distance in surface units before a picked face turns its slice.
    pub move_threshold: f64,
    /// Renormalize the puzzle orientation after every trackball step.
    pub renormalize: bool,
    /// Draw edges, vertex dots and vertex labels over the filled faces.
    pub debug: bool,
}

impl RenderConfig {
    pub fn new(zoom: f64, zoom_min: f64, zoom_max: f64) -> Result<Self, ConfigError> {
        let mut config = Self {
            zoom_min,
            zoom_max,
            ..Self::default()
        };
        config.validate()?;
        config.set_zoom(zoom);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.zoom_min > 0.0 && self.zoom_min <= self.zoom_max) {
            return Err(ConfigError::ZoomRange {
                min: self.zoom_min,
                max: self.zoom_max,
            });
        }
        if !(0.0..=1.0).contains(&self.sensitivity) {
            return Err(ConfigError::Sensitivity(self.sensitivity));
        }
        if !(self.move_threshold > 0.0) {
            return Err(ConfigError::MoveThreshold(self.move_threshold));
        }
        Ok(())
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom, clamped to the configured range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.zoom_min, self.zoom_max);
    }

    /// Scale the zoom by `factor`, clamped.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    /// Apply scroll input; positive notches zoom in.
    pub fn scroll(&mut self, notches: f64) {
        self.zoom_by(ZOOM_STEP.powf(notches));
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    pub fn set_sensitivity(&mut self, sensitivity: f64) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&sensitivity) {
            return Err(ConfigError::Sensitivity(sensitivity));
        }
        self.sensitivity = sensitivity;
        Ok(())
    }

    /// Rotation in radians for a drag of `pixels`.
    pub fn drag_angle(&self, pixels: f64) -> f64 {
        pixels * self.sensitivity * RADIANS_PER_PIXEL
    }

    pub fn toggle_projection(&mut self) {
        self.projection = match self.projection {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionMode::Perspective,
            zoom: 256.0,
            zoom_min: 16.0,
            zoom_max: 1024.0,
            sensitivity: 0.5,
            move_threshold: 8.0,
            renormalize: true,
            debug: false,
        }
    }
}
