use std::fmt;

/// Errors raised by the maze core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A grid was requested with zero columns or zero rows.
    InvalidDimension { cols: u16, rows: u16 },
    /// An internal precondition was broken, e.g. touching the wall between two cells that are
    /// not 4-adjacent. Never expected for a correct generator.
    InvariantViolation(String),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimension { cols, rows } => write!(
                f,
                "invalid grid dimensions {}x{}: both must be at least 1",
                cols, rows
            ),
            MazeError::InvariantViolation(msg) => write!(f, "invariant violation: {}", msg),
        }
    }
}

impl std::error::Error for MazeError {}

impl From<MazeError> for std::io::Error {
    fn from(err: MazeError) -> Self {
        let kind = match err {
            MazeError::InvalidDimension { .. } => std::io::ErrorKind::InvalidInput,
            MazeError::InvariantViolation(_) => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimension_message() {
        let err = MazeError::InvalidDimension { cols: 0, rows: 3 };
        assert_eq!(
            err.to_string(),
            "invalid grid dimensions 0x3: both must be at least 1"
        );
    }

    #[test]
    fn test_into_io_error_kind() {
        let io: std::io::Error = MazeError::InvalidDimension { cols: 0, rows: 0 }.into();
        assert_eq!(io.kind(), std::io::ErrorKind::InvalidInput);

        let io: std::io::Error = MazeError::InvariantViolation("boom".into()).into();
        assert_eq!(io.kind(), std::io::ErrorKind::Other);
    }
}
