use std::fmt;

/// Reasons a `Settings` value is rejected at startup
#[derive(Clone, Debug, PartialEq)]
pub enum SettingsError {
    NonPositiveScreen { width: f32, height: f32 },
    ZeroFrameRate,
    ZeroPointsPerLevel,
    ZeroMaxLevel,
    ZeroSpawnRate,
    InvalidSpeedRange { min: f32, max: f32 },
    ProbabilityOutOfRange { field: &'static str, value: f64 },
    NonPositiveSize { entity: &'static str },
    EntityDoesNotFit { entity: &'static str },
    VolumeOutOfRange { field: &'static str, value: f32 },
    Io { path: String, message: String },
    Parse { message: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveScreen { width, height } => {
                write!(f, "screen must be larger than 0x0, got {width}x{height}")
            }
            Self::ZeroFrameRate => write!(f, "frame rate must be non-zero"),
            Self::ZeroPointsPerLevel => write!(f, "points per level must be non-zero"),
            Self::ZeroMaxLevel => write!(f, "max level must be at least 1"),
            Self::ZeroSpawnRate => write!(f, "asteroid spawn rates must be non-zero"),
            Self::InvalidSpeedRange { min, max } => write!(
                f,
                "asteroid speed range is invalid: min {min} must be at least 1 and <= max {max}"
            ),
            Self::ProbabilityOutOfRange { field, value } => {
                write!(f, "{field} must be within 0..=1, got {value}")
            }
            Self::NonPositiveSize { entity } => {
                write!(f, "{entity} must have a positive width, height and speed")
            }
            Self::EntityDoesNotFit { entity } => {
                write!(f, "{entity} is wider or taller than the screen")
            }
            Self::VolumeOutOfRange { field, value } => {
                write!(f, "{field} must be within 0..=1, got {value}")
            }
            Self::Io { path, message } => write!(f, "failed to access {path}: {message}"),
            Self::Parse { message } => write!(f, "invalid settings JSON: {message}"),
        }
    }
}

impl std::error::Error for SettingsError {}
