//! Error types and handling for the site metrics library

use thiserror::Error;

/// Main error type for the `SiteMetrics` library
#[derive(Error, Debug)]
pub enum SiteMetricsError {
    /// Latitude or longitude outside its valid range, or non-finite
    #[error("Invalid coordinate: ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Malformed parameter such as a negative radius
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// An aggregate that needs at least one element got none
    #[error("Empty collection: {message}")]
    EmptyCollection { message: String },

    /// Dataset integrity errors
    #[error("Invalid dataset: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl SiteMetricsError {
    /// Create a new coordinate error
    #[must_use]
    pub fn invalid_coordinate(latitude: f64, longitude: f64) -> Self {
        Self::InvalidCoordinate {
            latitude,
            longitude,
        }
    }

    /// Create a new argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new empty collection error
    pub fn empty_collection<S: Into<String>>(message: S) -> Self {
        Self::EmptyCollection {
            message: message.into(),
        }
    }

    /// Create a new dataset validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SiteMetricsError::InvalidCoordinate {
                latitude,
                longitude,
            } => format!(
                "Coordinates ({latitude}, {longitude}) are out of range. Latitude must be within [-90, 90] and longitude within [-180, 180]."
            ),
            SiteMetricsError::InvalidArgument { message } => {
                format!("Invalid input: {message}")
            }
            SiteMetricsError::EmptyCollection { message } => {
                format!("Nothing to compute: {message}")
            }
            SiteMetricsError::Validation { message } => {
                format!("The location dataset is inconsistent: {message}")
            }
            SiteMetricsError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteMetricsError>;
