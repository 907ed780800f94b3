//! Error handling for Qtex conversions
//!
//! This module provides a unified error type and result type for the
//! segmentation pipeline and the optional external compilation step.

use std::fmt;

/// Conversion error type
#[derive(Debug, Clone)]
pub enum ConversionError {
    /// Segmentation error - blank line found inside an open tree (strict mode)
    Segmentation {
        message: String,
        line: Option<usize>,
    },
    /// External typesetting tool failed to start, timed out, or exited non-zero
    ExternalTool { tool: String, message: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::Segmentation { message, line } => {
                if let Some(l) = line {
                    write!(f, "Segmentation error at line {}: {}", l, message)
                } else {
                    write!(f, "Segmentation error: {}", message)
                }
            }
            ConversionError::ExternalTool { tool, message } => {
                write!(f, "External tool '{}' failed: {}", tool, message)
            }
            ConversionError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

// Convenience constructors for errors
impl ConversionError {
    pub fn segmentation(message: impl Into<String>) -> Self {
        ConversionError::Segmentation {
            message: message.into(),
            line: None,
        }
    }

    pub fn segmentation_at(message: impl Into<String>, line: usize) -> Self {
        ConversionError::Segmentation {
            message: message.into(),
            line: Some(line),
        }
    }

    pub fn external_tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        ConversionError::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// True when processing of later trees may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ConversionError::ExternalTool { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segmentation_error_display() {
        let err = ConversionError::segmentation("unexpected blank line");
        assert!(err.to_string().contains("Segmentation error"));
        assert!(err.to_string().contains("unexpected blank line"));
    }

    #[test]
    fn test_segmentation_error_with_line() {
        let err = ConversionError::segmentation_at("unexpected blank line", 7);
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_external_tool_error() {
        let err = ConversionError::external_tool("pdflatex", "exited with status 1");
        let msg = err.to_string();
        assert!(msg.contains("pdflatex"));
        assert!(msg.contains("status 1"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: ConversionError = io_err.into();
        assert!(err.to_string().contains("no such file"));
        assert!(!err.is_recoverable());
    }
}
