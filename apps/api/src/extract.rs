//! Resume text extraction from uploaded PDF bytes.

use crate::errors::AppError;

/// Extracts plain text from an uploaded PDF, trimmed of surrounding
/// whitespace. A file pdf-extract cannot parse is a 422 to the caller.
pub fn extract_text(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map(|text| text.trim().to_string())
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not extract text from PDF: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_unprocessable() {
        let result = extract_text(b"definitely not a pdf");
        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
    }
}
