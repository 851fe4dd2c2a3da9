//! Error types for plan-resolve

/// Result type for plan-resolve operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving references and interpolations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dotted reference has no resolvable value in the context.
    ///
    /// Always carries the full dotted path, not just the failing segment.
    #[error("undefined reference '{path}'")]
    UndefinedReference { path: String },

    /// An interpolation opener `${` with no closing brace
    #[error("unterminated interpolation in '{input}'")]
    UnterminatedReference { input: String },
}

impl Error {
    pub(crate) fn undefined(path: &str) -> Self {
        Error::UndefinedReference {
            path: path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_reference_names_full_path() {
        let err = Error::undefined("env.MISSING");
        assert!(err.to_string().contains("env.MISSING"));
    }

    #[test]
    fn unterminated_reference_names_input() {
        let err = Error::UnterminatedReference {
            input: "x=${oops".to_string(),
        };
        assert!(err.to_string().contains("${oops"));
    }
}
