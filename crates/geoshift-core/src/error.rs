use std::ffi::NulError;

/// Failure reported by the geodetic engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("string contains interior NUL: {0}")]
    Nul(#[from] NulError),
    #[error("engine error {code}: {message}")]
    Engine { code: i32, message: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl EngineError {
    pub fn engine(code: i32, message: impl Into<String>) -> Self {
        Self::Engine {
            code,
            message: message.into(),
        }
    }
}

/// Why an operation could not be produced for a CRS pair.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("engine context is not initialized")]
    NotInitialized,
    #[error("{0} CRS identifier is empty")]
    EmptyIdentifier(&'static str),
    #[error("cannot materialize CRS {id:?}: {source}")]
    Materialize { id: String, source: EngineError },
    #[error("cannot compile operation: {0}")]
    Compile(EngineError),
    #[error("cannot normalize operation axis order: {0}")]
    Normalize(EngineError),
}

/// Failure of a single coordinate transform.
///
/// Each variant maps to a stable numeric code via [`TransformError::code`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("missing required ordinate: {0}")]
    MissingOrdinate(&'static str),
    #[error("no operation available from {src:?} to {dst:?}: {source}")]
    OperationUnavailable {
        src: String,
        dst: String,
        source: BuildError,
    },
    #[error("transform failed: {0}")]
    Evaluation(EngineError),
}

impl TransformError {
    pub const PARAMETER: i32 = 2;
    pub const UNAVAILABLE: i32 = 3;
    pub const EVALUATION: i32 = 4;

    pub const fn code(&self) -> i32 {
        match self {
            Self::MissingOrdinate(_) => Self::PARAMETER,
            Self::OperationUnavailable { .. } => Self::UNAVAILABLE,
            Self::Evaluation(_) => Self::EVALUATION,
        }
    }
}

/// Engine context could not be created.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot create engine context: {0}")]
pub struct InitError(#[from] pub EngineError);

impl InitError {
    pub const CODE: i32 = 1;

    pub const fn code(&self) -> i32 {
        Self::CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_per_category() {
        let param = TransformError::MissingOrdinate("x");
        let unavailable = TransformError::OperationUnavailable {
            src: "EPSG:4326".into(),
            dst: String::new(),
            source: BuildError::EmptyIdentifier("target"),
        };
        let eval = TransformError::Evaluation(EngineError::engine(2049, "out of area"));

        assert_eq!(param.code(), 2);
        assert_eq!(unavailable.code(), 3);
        assert_eq!(eval.code(), 4);
        assert_eq!(InitError(EngineError::InvalidArgument("ctx")).code(), 1);
    }

    #[test]
    fn test_unavailable_message_names_the_pair() {
        let err = TransformError::OperationUnavailable {
            src: "EPSG:4326".into(),
            dst: "EPSG:0".into(),
            source: BuildError::Materialize {
                id: "EPSG:0".into(),
                source: EngineError::engine(1025, "crs not found"),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("EPSG:4326"), "{msg}");
        assert!(msg.contains("crs not found"), "{msg}");
    }
}
