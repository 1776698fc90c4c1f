use std::fmt;

/// Convenience result type used across jao.
pub type JaoResult<T> = Result<T, JaoError>;

/// Which registry table a failed lookup was resolved against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// The library namespace itself is not registered.
    Library,
    /// The library exists but has no action with that name.
    Action,
    /// The library exists but has no initializer with that name.
    Initializer,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Library => "library",
            Self::Action => "action",
            Self::Initializer => "initializer",
        })
    }
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum JaoError {
    /// Unknown library, action or initializer name.
    #[error("lookup failure: unknown {kind} '{name}' (library '{library}')")]
    Lookup {
        /// Table the lookup failed in.
        kind: LookupKind,
        /// Requested library namespace.
        library: String,
        /// Requested name (equal to `library` for [`LookupKind::Library`]).
        name: String,
    },

    /// A plugin factory or its model loading failed.
    #[error("cannot instantiate '{name}': {source}")]
    Instantiation {
        /// Action or initializer name.
        name: String,
        /// Underlying cause.
        #[source]
        source: anyhow::Error,
    },

    /// The package could not be read or has no manifest.
    #[error("cannot load package '{path}': {source}")]
    PackageLoad {
        /// Path of the package source.
        path: String,
        /// Underlying cause.
        #[source]
        source: anyhow::Error,
    },

    /// The package path is neither a folder nor a known archive extension.
    #[error("unknown package format: {0}")]
    UnknownFormat(String),

    /// A content file requested from an extractor does not exist.
    #[error("content file does not exist: {0}")]
    ContentNotFound(String),

    /// A named event does not exist on a layer.
    #[error("event not found: {0}")]
    EventNotFound(String),

    /// A time expression could not be converted to milliseconds.
    #[error("time expression error: {0}")]
    TimeExpression(String),

    /// Invalid caller-provided options or data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A renderer failed to accept a data type or a frame.
    #[error("renderer error: {0}")]
    Renderer(String),

    /// An action or initializer failed while running.
    #[error("action error: {0}")]
    Action(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl JaoError {
    /// Build a library lookup failure.
    pub fn library_not_found(library: impl Into<String>) -> Self {
        let library = library.into();
        Self::Lookup {
            kind: LookupKind::Library,
            name: library.clone(),
            library,
        }
    }

    /// Build an action lookup failure.
    pub fn action_not_found(library: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Lookup {
            kind: LookupKind::Action,
            library: library.into(),
            name: name.into(),
        }
    }

    /// Build an initializer lookup failure.
    pub fn initializer_not_found(library: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Lookup {
            kind: LookupKind::Initializer,
            library: library.into(),
            name: name.into(),
        }
    }

    /// Build a [`JaoError::Instantiation`] value.
    pub fn instantiation(name: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Instantiation {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Build a [`JaoError::PackageLoad`] value.
    pub fn package_load(path: impl fmt::Display, source: impl Into<anyhow::Error>) -> Self {
        Self::PackageLoad {
            path: path.to_string(),
            source: source.into(),
        }
    }

    /// Build a [`JaoError::TimeExpression`] value.
    pub fn time_expression(msg: impl Into<String>) -> Self {
        Self::TimeExpression(msg.into())
    }

    /// Build a [`JaoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`JaoError::Renderer`] value.
    pub fn renderer(msg: impl Into<String>) -> Self {
        Self::Renderer(msg.into())
    }

    /// Build a [`JaoError::Action`] value.
    pub fn action(msg: impl Into<String>) -> Self {
        Self::Action(msg.into())
    }

    /// Build a [`JaoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Kind of the failed lookup, if this is a lookup failure.
    pub fn lookup_kind(&self) -> Option<LookupKind> {
        match self {
            Self::Lookup { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
