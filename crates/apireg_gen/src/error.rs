use std::path::PathBuf;
use thiserror::Error;

/// Structural violations found while resolving the package topology.
///
/// These abort the whole run: package placement is ambiguous, so no
/// generator may be invoked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("found multiple apis directory paths: {first} and {second}")]
    MultipleApisRoots { first: String, second: String },
}

#[derive(Error, Debug)]
pub enum BoilerplateError {
    #[error("no boilerplate header file configured")]
    NotConfigured,
    #[error("failed to read boilerplate header '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures raised while a bound generator renders a package.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("failed to render package '{package}': {message}")]
    Render { package: String, message: String },
    #[error(transparent)]
    Format(#[from] std::fmt::Error),
}
