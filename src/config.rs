//! Character configuration.
//!
//! A [`Configuration`] is constructed once per session from defaults merged
//! with external overrides (URL parameters, panel edits) and treated as a
//! value type: a change produces a new record, never an in-place mutation
//! while a render pass holds it.

use crate::foundation::core::BackendKind;
use crate::foundation::error::{AvakitError, AvakitResult};
use crate::palette::Rgb8;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    pub skin_color: Rgb8,
    pub hair_color: Rgb8,
    pub eye_color: Rgb8,
    pub clothes_color: Rgb8,
    pub clothes_secondary_color: Rgb8,

    /// Detail level knob, nominally 1–10. Out-of-range and non-finite values
    /// are clamped at resolve time, never rejected.
    pub detail_level: f64,

    pub show_legs: bool,
    pub show_background: bool,
    pub enable_idle_animation: bool,
    pub enable_random_blink: bool,
    pub static_pose: bool,
    pub no_ahoge: bool,

    /// Mean delay between random blinks, milliseconds.
    #[serde(rename = "blinkInterval")]
    pub blink_interval_ms: f64,
    /// Multiplier on continuous motion (sway, mouth chatter) frequencies.
    pub animation_speed: f64,

    #[serde(rename = "backendKind")]
    pub backend: BackendKind,
    pub model_scale: f64,

    // Backend-specific camera/viewport placement, consumed opaquely by the
    // scene description, not by the core algorithms.
    pub camera_y: f64,
    pub camera_z: f64,
    pub viewport_center_y: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            skin_color: Rgb8::new(0xF6, 0xD4, 0xBE),
            hair_color: Rgb8::new(0x8D, 0x67, 0x48),
            eye_color: Rgb8::new(0x4A, 0x7A, 0xB5),
            clothes_color: Rgb8::new(0x5B, 0x7F, 0xBF),
            clothes_secondary_color: Rgb8::new(0xFF, 0xFF, 0xFF),
            detail_level: 10.0,
            show_legs: true,
            show_background: true,
            enable_idle_animation: true,
            enable_random_blink: true,
            static_pose: false,
            no_ahoge: false,
            blink_interval_ms: 3000.0,
            animation_speed: 1.0,
            backend: BackendKind::Vector,
            model_scale: 1.0,
            camera_y: 1.35,
            camera_z: 3.2,
            viewport_center_y: 0.0,
        }
    }
}

impl Configuration {
    /// Build a configuration from defaults plus `key=value` overrides, the
    /// shape produced by the URL-parameter parser and the config panel.
    pub fn from_options<'a, I>(options: I) -> AvakitResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut cfg = Self::default();
        for (key, value) in options {
            cfg.apply_option(key, value)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply one recognized option. Unrecognized keys and malformed values
    /// are config errors.
    pub fn apply_option(&mut self, key: &str, value: &str) -> AvakitResult<()> {
        fn color(key: &str, value: &str) -> AvakitResult<Rgb8> {
            Rgb8::parse_hex(value)
                .map_err(|e| AvakitError::config(format!("option '{key}': {e}")))
        }

        fn number(key: &str, value: &str) -> AvakitResult<f64> {
            value
                .parse::<f64>()
                .map_err(|_| AvakitError::config(format!("option '{key}': expected a number")))
        }

        fn boolean(key: &str, value: &str) -> AvakitResult<bool> {
            match value {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(AvakitError::config(format!(
                    "option '{key}': expected true/false"
                ))),
            }
        }

        match key {
            "skinColor" => self.skin_color = color(key, value)?,
            "hairColor" => self.hair_color = color(key, value)?,
            "eyeColor" => self.eye_color = color(key, value)?,
            "clothesColor" => self.clothes_color = color(key, value)?,
            "clothesSecondaryColor" => self.clothes_secondary_color = color(key, value)?,
            "detailLevel" => self.detail_level = number(key, value)?,
            "showLegs" => self.show_legs = boolean(key, value)?,
            "showBackground" => self.show_background = boolean(key, value)?,
            "enableIdleAnimation" => self.enable_idle_animation = boolean(key, value)?,
            "enableRandomBlink" => self.enable_random_blink = boolean(key, value)?,
            "staticPose" => self.static_pose = boolean(key, value)?,
            "noAhoge" => self.no_ahoge = boolean(key, value)?,
            "blinkInterval" => self.blink_interval_ms = number(key, value)?,
            "animationSpeed" => self.animation_speed = number(key, value)?,
            "enable3D" => {
                self.backend = if boolean(key, value)? {
                    BackendKind::Polygonal
                } else {
                    BackendKind::Vector
                };
            }
            "backendKind" => {
                self.backend = match value {
                    "vector" => BackendKind::Vector,
                    "polygonal" => BackendKind::Polygonal,
                    _ => {
                        return Err(AvakitError::config(format!(
                            "option '{key}': expected vector|polygonal"
                        )));
                    }
                };
            }
            "modelScale" | "characterScale" => self.model_scale = number(key, value)?,
            "cameraY" => self.camera_y = number(key, value)?,
            "cameraZ" => self.camera_z = number(key, value)?,
            "viewportCenterY" => self.viewport_center_y = number(key, value)?,
            _ => {
                return Err(AvakitError::config(format!("unrecognized option '{key}'")));
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> AvakitResult<()> {
        if !(self.blink_interval_ms.is_finite() && self.blink_interval_ms > 0.0) {
            return Err(AvakitError::validation("blinkInterval must be > 0"));
        }
        if !(self.animation_speed.is_finite() && self.animation_speed > 0.0) {
            return Err(AvakitError::validation("animationSpeed must be > 0"));
        }
        if !(self.model_scale.is_finite() && self.model_scale > 0.0) {
            return Err(AvakitError::validation("modelScale must be > 0"));
        }
        Ok(())
    }
}
