use constants::gesture::{CAPTURE_IDEAL_HEIGHT, CAPTURE_IDEAL_WIDTH};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Classified camera acquisition failure. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Camera permission denied, allow access in the browser settings")]
    PermissionDenied,
    #[error("No camera device found")]
    NoDevice,
    #[error("The camera is in use by another application")]
    DeviceBusy,
    #[error("This device does not support the requested camera configuration")]
    Unsupported,
    #[error("Camera start-up timed out, reload to try again")]
    TimedOut,
    #[error("Unable to access the camera: {0}")]
    Other(String),
}

impl CaptureError {
    /// Classify a platform device error by its name, then by its message.
    pub fn from_device_error(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => Self::PermissionDenied,
            "NotFoundError" => Self::NoDevice,
            "NotReadableError" => Self::DeviceBusy,
            "OverconstrainedError" => Self::Unsupported,
            _ if message.to_ascii_lowercase().contains("timeout")
                || message.to_ascii_lowercase().contains("timed out") =>
            {
                Self::TimedOut
            }
            _ => Self::Other(message.to_string()),
        }
    }

    /// Stable identifier for frontend notifications.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission_denied",
            Self::NoDevice => "no_device",
            Self::DeviceBusy => "device_busy",
            Self::Unsupported => "unsupported",
            Self::TimedOut => "timed_out",
            Self::Other(_) => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    #[default]
    User,
    Environment,
}

impl FacingMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::User => Self::Environment,
            Self::Environment => Self::User,
        }
    }
}

/// Camera request handed to the page that owns the video device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConstraints {
    pub facing_mode: Option<FacingMode>,
    pub ideal_size: Option<(u32, u32)>,
}

impl CaptureConstraints {
    pub fn preferred(facing_mode: FacingMode) -> Self {
        Self {
            facing_mode: Some(facing_mode),
            ideal_size: Some((CAPTURE_IDEAL_WIDTH, CAPTURE_IDEAL_HEIGHT)),
        }
    }

    /// Any camera, no constraints.
    pub fn minimal() -> Self {
        Self {
            facing_mode: None,
            ideal_size: None,
        }
    }

    /// Media-constraints object in the shape `getUserMedia` expects.
    pub fn to_json(&self) -> Value {
        if self.facing_mode.is_none() && self.ideal_size.is_none() {
            return json!({ "video": true, "audio": false });
        }

        let mut video = serde_json::Map::new();
        if let Some(facing_mode) = self.facing_mode {
            video.insert("facingMode".into(), json!(facing_mode));
        }
        if let Some((width, height)) = self.ideal_size {
            video.insert("width".into(), json!({ "ideal": width }));
            video.insert("height".into(), json!({ "ideal": height }));
        }
        json!({ "video": video, "audio": false })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureAttempt {
    #[default]
    Idle,
    Preferred,
    Minimal,
    Streaming,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NegotiationStep {
    Retry(CaptureConstraints),
    GiveUp(CaptureError),
}

/// Preferred-then-minimal camera negotiation.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaptureNegotiator {
    pub facing_mode: FacingMode,
    attempt: CaptureAttempt,
}

impl CaptureNegotiator {
    pub fn attempt(&self) -> CaptureAttempt {
        self.attempt
    }

    pub fn start(&mut self) -> CaptureConstraints {
        self.attempt = CaptureAttempt::Preferred;
        CaptureConstraints::preferred(self.facing_mode)
    }

    /// A failed preferred request is retried once with the minimal request.
    /// Any other failure is final.
    pub fn on_failure(&mut self, name: &str, message: &str) -> NegotiationStep {
        if self.attempt == CaptureAttempt::Preferred {
            self.attempt = CaptureAttempt::Minimal;
            return NegotiationStep::Retry(CaptureConstraints::minimal());
        }

        self.attempt = CaptureAttempt::Idle;
        NegotiationStep::GiveUp(CaptureError::from_device_error(name, message))
    }

    pub fn on_success(&mut self) {
        if self.attempt != CaptureAttempt::Idle {
            self.attempt = CaptureAttempt::Streaming;
        }
    }

    pub fn stop(&mut self) {
        self.attempt = CaptureAttempt::Idle;
    }

    /// Switch cameras. Restarts negotiation when capture is running.
    pub fn toggle_facing(&mut self) -> Option<CaptureConstraints> {
        self.facing_mode = self.facing_mode.toggled();
        match self.attempt {
            CaptureAttempt::Idle => None,
            _ => Some(self.start()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_device_errors() {
        assert_eq!(
            CaptureError::from_device_error("NotAllowedError", ""),
            CaptureError::PermissionDenied
        );
        assert_eq!(
            CaptureError::from_device_error("NotFoundError", ""),
            CaptureError::NoDevice
        );
        assert_eq!(
            CaptureError::from_device_error("NotReadableError", ""),
            CaptureError::DeviceBusy
        );
        assert_eq!(
            CaptureError::from_device_error("OverconstrainedError", ""),
            CaptureError::Unsupported
        );
        assert_eq!(
            CaptureError::from_device_error("Error", "Video load Timeout"),
            CaptureError::TimedOut
        );
        assert_eq!(
            CaptureError::from_device_error("AbortError", "aborted"),
            CaptureError::Other("aborted".into())
        );
    }

    #[test]
    fn preferred_failure_retries_minimal_then_gives_up() {
        let mut negotiator = CaptureNegotiator::default();
        let first = negotiator.start();
        assert_eq!(first.ideal_size, Some((320, 240)));

        assert_eq!(
            negotiator.on_failure("OverconstrainedError", ""),
            NegotiationStep::Retry(CaptureConstraints::minimal())
        );
        assert_eq!(
            negotiator.on_failure("NotAllowedError", ""),
            NegotiationStep::GiveUp(CaptureError::PermissionDenied)
        );
        assert_eq!(negotiator.attempt(), CaptureAttempt::Idle);
    }

    #[test]
    fn failure_after_streaming_is_final() {
        let mut negotiator = CaptureNegotiator::default();
        negotiator.start();
        negotiator.on_success();
        assert_eq!(negotiator.attempt(), CaptureAttempt::Streaming);
        assert_eq!(
            negotiator.on_failure("Error", "timeout"),
            NegotiationStep::GiveUp(CaptureError::TimedOut)
        );
    }

    #[test]
    fn toggling_camera_restarts_only_when_running() {
        let mut negotiator = CaptureNegotiator::default();
        assert_eq!(negotiator.toggle_facing(), None);
        assert_eq!(negotiator.facing_mode, FacingMode::Environment);

        negotiator.start();
        let restart = negotiator.toggle_facing().unwrap();
        assert_eq!(restart.facing_mode, Some(FacingMode::User));
    }

    #[test]
    fn constraints_serialise_like_media_constraints() {
        assert_eq!(
            CaptureConstraints::minimal().to_json(),
            json!({ "video": true, "audio": false })
        );
        assert_eq!(
            CaptureConstraints::preferred(FacingMode::Environment).to_json(),
            json!({
                "video": {
                    "facingMode": "environment",
                    "width": { "ideal": 320 },
                    "height": { "ideal": 240 }
                },
                "audio": false
            })
        );
    }
}
