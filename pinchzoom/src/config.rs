// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component configuration.

use core::fmt;

use kurbo::Size;
use pinchzoom_gesture::ClassifierConfig;
use pinchzoom_view::{PanOptions, SettleOptions};

/// Everything the caller can tune about an [`ImageZoom`](crate::ImageZoom).
///
/// Fields left at their defaults match the behaviour of a stock
/// pinch-zoomable image: panning, pinching and double-tap zoom on,
/// swipe-down dismissal off.
///
/// ```
/// use kurbo::Size;
/// use pinchzoom::ZoomConfig;
///
/// let config = ZoomConfig::new(Size::new(320.0, 480.0), Size::new(640.0, 480.0))
///     .with_scale_limits(1.0, 4.0)
///     .with_swipe_down(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomConfig {
    /// Size of the visible area.
    pub viewport: Size,
    /// Unscaled size of the image.
    pub content: Size,
    /// Smallest scale reachable by pinching. Must be positive.
    pub min_scale: f64,
    /// Largest scale reachable by pinching.
    pub max_scale: f64,
    /// Single-finger drags move the image.
    pub pan_enabled: bool,
    /// Two-finger pinches zoom the image.
    pub pinch_enabled: bool,
    /// A double tap toggles between unit and double scale.
    pub double_click_zoom_enabled: bool,
    /// After a gesture the image never rests below unit scale, and at unit
    /// scale it recentres.
    pub center_focus_enabled: bool,
    /// Pulling down a vertically fitting image shrinks it and may dismiss.
    pub swipe_down_enabled: bool,
    /// Pull-down distance that must be exceeded to dismiss.
    pub swipe_down_threshold: f64,
    /// Largest horizontal rubber-band magnitude.
    pub max_overflow: f64,
    /// Release displacement below which a one-finger gesture is a tap.
    pub click_distance: f64,
    /// Window for pairing two taps into a double tap.
    pub double_click_interval_ms: u64,
    /// Hold time before a press becomes a long press.
    pub long_press_delay_ms: u64,
    /// Passed through to every [`Animation`](crate::Animation).
    pub hardware_accelerated: bool,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            viewport: Size::ZERO,
            content: Size::ZERO,
            min_scale: 0.6,
            max_scale: 10.0,
            pan_enabled: true,
            pinch_enabled: true,
            double_click_zoom_enabled: true,
            center_focus_enabled: true,
            swipe_down_enabled: false,
            swipe_down_threshold: 230.0,
            max_overflow: 100.0,
            click_distance: 10.0,
            double_click_interval_ms: 175,
            long_press_delay_ms: 800,
            hardware_accelerated: true,
        }
    }
}

impl ZoomConfig {
    /// Default configuration for an image of `content` size shown in
    /// `viewport`.
    #[must_use]
    pub fn new(viewport: Size, content: Size) -> Self {
        Self {
            viewport,
            content,
            ..Self::default()
        }
    }

    /// Sets the pinch scale limits.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    /// Enables or disables panning.
    #[must_use]
    pub fn with_pan(mut self, enabled: bool) -> Self {
        self.pan_enabled = enabled;
        self
    }

    /// Enables or disables pinch zoom.
    #[must_use]
    pub fn with_pinch(mut self, enabled: bool) -> Self {
        self.pinch_enabled = enabled;
        self
    }

    /// Enables or disables the double-tap zoom toggle.
    #[must_use]
    pub fn with_double_click_zoom(mut self, enabled: bool) -> Self {
        self.double_click_zoom_enabled = enabled;
        self
    }

    /// Enables or disables center focus.
    #[must_use]
    pub fn with_center_focus(mut self, enabled: bool) -> Self {
        self.center_focus_enabled = enabled;
        self
    }

    /// Enables or disables swipe-down dismissal.
    #[must_use]
    pub fn with_swipe_down(mut self, enabled: bool) -> Self {
        self.swipe_down_enabled = enabled;
        self
    }

    /// Sets the swipe-down dismissal threshold.
    #[must_use]
    pub fn with_swipe_down_threshold(mut self, threshold: f64) -> Self {
        self.swipe_down_threshold = threshold;
        self
    }

    /// Sets the horizontal rubber-band limit.
    #[must_use]
    pub fn with_max_overflow(mut self, max_overflow: f64) -> Self {
        self.max_overflow = max_overflow;
        self
    }

    /// Sets the tap displacement threshold.
    #[must_use]
    pub fn with_click_distance(mut self, distance: f64) -> Self {
        self.click_distance = distance;
        self
    }

    /// Sets the double-tap interval.
    #[must_use]
    pub fn with_double_click_interval(mut self, interval_ms: u64) -> Self {
        self.double_click_interval_ms = interval_ms;
        self
    }

    /// Sets the long-press delay.
    #[must_use]
    pub fn with_long_press_delay(mut self, delay_ms: u64) -> Self {
        self.long_press_delay_ms = delay_ms;
        self
    }

    /// Sets the hardware-acceleration passthrough flag.
    #[must_use]
    pub fn with_hardware_acceleration(mut self, enabled: bool) -> Self {
        self.hardware_accelerated = enabled;
        self
    }

    /// Checks the numeric invariants the transform math relies on.
    ///
    /// Nothing else in the crate rejects a configuration; out-of-range
    /// values are only ever clamped. Call this when the values come from
    /// somewhere untrusted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_scale <= 0.0 || !self.min_scale.is_finite() {
            return Err(ConfigError::NonPositiveMinScale(self.min_scale));
        }
        if self.max_scale < self.min_scale || self.max_scale.is_nan() {
            return Err(ConfigError::InvertedScaleLimits {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if !is_valid_size(self.viewport) {
            return Err(ConfigError::InvalidViewport(self.viewport));
        }
        if !is_valid_size(self.content) {
            return Err(ConfigError::InvalidContent(self.content));
        }
        Ok(())
    }

    pub(crate) fn classifier(&self) -> ClassifierConfig {
        ClassifierConfig {
            double_click_interval_ms: self.double_click_interval_ms,
            long_press_delay_ms: self.long_press_delay_ms,
            click_distance: self.click_distance,
            ..ClassifierConfig::default()
        }
    }

    pub(crate) fn pan_options(&self, horizontal: bool) -> PanOptions {
        PanOptions {
            swipe_down_enabled: self.swipe_down_enabled,
            horizontal,
        }
    }

    pub(crate) fn settle_options(&self) -> SettleOptions {
        SettleOptions {
            swipe_down_enabled: self.swipe_down_enabled,
            swipe_down_threshold: self.swipe_down_threshold,
            center_focus: self.center_focus_enabled,
        }
    }
}

fn is_valid_size(size: Size) -> bool {
    size.is_finite() && size.width >= 0.0 && size.height >= 0.0
}

/// A [`ZoomConfig`] that would break the transform math.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `min_scale` is zero, negative or not finite. Offsets are divided by
    /// the scale, which must stay positive.
    NonPositiveMinScale(f64),
    /// `max_scale` is below `min_scale`.
    InvertedScaleLimits {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// The viewport has a negative or non-finite dimension.
    InvalidViewport(Size),
    /// The content has a negative or non-finite dimension.
    InvalidContent(Size),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMinScale(min) => {
                write!(f, "minimum scale must be positive and finite, got {min}")
            }
            Self::InvertedScaleLimits { min, max } => {
                write!(f, "maximum scale {max} is below minimum scale {min}")
            }
            Self::InvalidViewport(size) => write!(f, "invalid viewport size {size:?}"),
            Self::InvalidContent(size) => write!(f, "invalid content size {size:?}"),
        }
    }
}

impl core::error::Error for ConfigError {}
