use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the library. Code generation itself never fails;
/// only loading a program description and writing the output can.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot write `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("write error: {0}")]
    Write(#[from] io::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl Error {
    /// Short classification string used for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Io { .. } | Error::Write(_) => "io",
            Error::Load(e) => e.category(),
        }
    }
}

/// Problems in an S-expression program description.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("malformed program: {0}")]
    Shape(String),
    #[error("unknown data type `{ty}` for `{name}`")]
    UnknownType { name: String, ty: String },
    #[error("`{tag}` takes at most two children, got {count}")]
    Arity { tag: String, count: usize },
}

impl LoadError {
    /// Short classification string used for logging.
    pub fn category(&self) -> &'static str {
        match self {
            LoadError::Syntax(_) => "syntax",
            LoadError::Shape(_) => "shape",
            LoadError::UnknownType { .. } => "type",
            LoadError::Arity { .. } => "arity",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_errors_convert_and_keep_their_message() {
        let err = Error::from(LoadError::Syntax("unbalanced parenthesis".to_string()));
        assert!(matches!(err, Error::Load(LoadError::Syntax(_))));
        assert_eq!(err.to_string(), "syntax error: unbalanced parenthesis");
        assert_eq!(err.category(), "syntax");
    }

    #[test]
    fn categories() {
        let cases = [
            (LoadError::Shape("x".to_string()), "shape"),
            (
                LoadError::UnknownType {
                    name: "x".to_string(),
                    ty: "double".to_string(),
                },
                "type",
            ),
            (
                LoadError::Arity {
                    tag: "+".to_string(),
                    count: 3,
                },
                "arity",
            ),
        ];
        for (load, category) in cases {
            assert_eq!(Error::from(load).category(), category);
        }

        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(Error::from(io).category(), "io");
    }
}
