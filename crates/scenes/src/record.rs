//! JSON frame dumps for headless runs and debugging.

use std::path::Path;
use vizwave_core::error::EngineError;
use vizwave_core::frame::Frame;

/// Writes a frame snapshot as pretty-printed JSON.
///
/// Returns `EngineError::Io` on serialization or write failure.
pub fn write_frame_json(frame: &Frame, path: &Path) -> Result<(), EngineError> {
    let json = serde_json::to_string_pretty(frame).map_err(|e| EngineError::Io(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| EngineError::Io(e.to_string()))
}

/// Reads a frame snapshot back from a JSON dump.
pub fn read_frame_json(path: &Path) -> Result<Frame, EngineError> {
    let json = std::fs::read_to_string(path).map_err(|e| EngineError::Io(e.to_string()))?;
    serde_json::from_str(&json).map_err(|e| EngineError::Io(e.to_string()))
}
