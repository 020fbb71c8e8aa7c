//! Capture error types and handling
//!
//! This module defines all error types used throughout the capture library,
//! providing clear error messages and context for debugging and error handling.

use thiserror::Error;

/// Main error type for capture operations
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Platform lacks a camera-acquisition API
    #[error("camera capability unavailable: {reason}")]
    CapabilityUnavailable {
        /// Why no capability provider could be selected
        reason: String,
    },

    /// Stream acquisition was refused or failed mid-request
    #[error("stream acquisition failed: {reason}")]
    AcquisitionFailed {
        /// Failure reason
        reason: String,
    },

    /// Surface could not accept the stream source directly
    #[error("surface rejected stream binding: {reason}")]
    BindingRejected {
        /// Why the binding was rejected
        reason: String,
    },

    /// No display surface is configured for the operation
    #[error("no display surface configured")]
    SurfaceMissing,

    /// Invalid configuration provided
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },

    /// Invalid state for operation
    #[error("invalid state: {message}")]
    InvalidState {
        /// State error message
        message: String,
    },
}

/// Result type alias for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

impl CaptureError {
    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Permission prompts and busy hardware clear up between attempts
            CaptureError::AcquisitionFailed { .. } => true,
            // Binding rejection has a fallback strategy
            CaptureError::BindingRejected { .. } => true,
            CaptureError::CapabilityUnavailable { .. } => false,
            CaptureError::SurfaceMissing => false,
            CaptureError::InvalidConfiguration { .. } => false,
            CaptureError::InvalidState { .. } => false,
        }
    }

    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            CaptureError::CapabilityUnavailable { .. } => ErrorCategory::Capability,
            CaptureError::AcquisitionFailed { .. } => ErrorCategory::Acquisition,
            CaptureError::BindingRejected { .. } => ErrorCategory::Binding,
            CaptureError::SurfaceMissing => ErrorCategory::Binding,
            CaptureError::InvalidConfiguration { .. } => ErrorCategory::Configuration,
            CaptureError::InvalidState { .. } => ErrorCategory::State,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Platform capability errors
    Capability,
    /// Stream acquisition errors
    Acquisition,
    /// Surface binding errors
    Binding,
    /// Configuration and parameter errors
    Configuration,
    /// State management errors
    State,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let capability_error = CaptureError::CapabilityUnavailable {
            reason: "no acquisition API present".to_string(),
        };
        assert_eq!(capability_error.category(), ErrorCategory::Capability);
        assert!(!capability_error.is_recoverable());

        let acquisition_error = CaptureError::AcquisitionFailed {
            reason: "permission denied".to_string(),
        };
        assert_eq!(acquisition_error.category(), ErrorCategory::Acquisition);
        assert!(acquisition_error.is_recoverable());

        let binding_error = CaptureError::BindingRejected {
            reason: "direct binding unsupported".to_string(),
        };
        assert_eq!(binding_error.category(), ErrorCategory::Binding);
        assert!(binding_error.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let error = CaptureError::AcquisitionFailed {
            reason: "hardware busy".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "stream acquisition failed: hardware busy"
        );

        assert_eq!(
            CaptureError::SurfaceMissing.to_string(),
            "no display surface configured"
        );
    }
}
