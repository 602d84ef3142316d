//! File output and dimension-file input.

pub mod stl;

/// Failures reading a dimension table or writing output files.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),

    #[error("Could not parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The path is malformed: {0}")]
    MalformedPath(String),
}

#[cfg(test)]
mod tests {
    use super::IoError;
    use std::error::Error;

    #[test]
    fn wrapped_errors_keep_their_source() {
        let io = IoError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.source().is_some());
        assert!(io.to_string().contains("gone"));

        let path = IoError::MalformedPath("out is a file".into());
        assert!(path.source().is_none());
    }
}
