//! Bounded streaming input.
//!
//! The whole document must be consumed before validation starts, but never
//! more than `max_input_bytes + 1` bytes are buffered: the size check and the
//! read are the same operation.

use std::io::Read;

use crate::error::NotebookError;

/// Read an entire document from `reader`, enforcing `max_input_bytes`.
///
/// # Errors
///
/// - [`NotebookError::Io`] if reading fails
/// - [`NotebookError::InputTooLarge`] if the input exceeds `max_input_bytes`
/// - [`NotebookError::InvalidEncoding`] if the input is not valid UTF-8
pub fn read_bounded<R: Read>(reader: R, max_input_bytes: u64) -> Result<String, NotebookError> {
    // Read one byte past the limit to detect oversized input.
    let mut buffer = Vec::new();
    reader
        .take(max_input_bytes.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| NotebookError::Io(e.to_string()))?;

    if buffer.len() as u64 > max_input_bytes {
        return Err(NotebookError::InputTooLarge {
            limit: max_input_bytes,
        });
    }

    String::from_utf8(buffer).map_err(|_| NotebookError::InvalidEncoding)
}
