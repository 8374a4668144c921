use std::path::PathBuf;

use thiserror::Error;

/// Bad input data. Aborts the whole generation pass.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {what}: {message}")]
    Json { what: &'static str, message: String },
    #[error("invalid skip pattern `{pattern}`: {source}")]
    SkipPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("{what} #{index} has an empty name")]
    EmptyName { what: &'static str, index: usize },
}

/// A hand-curated override table that breaks one of its own invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("override `{native}` pairs {fields} target fields with {cfields} native fields")]
    FieldCountMismatch { native: String, fields: usize, cfields: usize },
    #[error("union `{union}` maps `{value}` to both `{first}` and `{second}`")]
    DuplicateDiscriminant { union: String, value: String, first: String, second: String },
    #[error("union `{union}` variant `{variant}` carries payload `{payload}` which has no struct override")]
    MissingPayloadOverride { union: String, variant: String, payload: String },
    #[error("union `{union}` variant `{variant}` is built from payload type `{target}`")]
    PayloadVariantMismatch { union: String, variant: String, target: String },
    #[error("union `{union}` variant `{variant}` binds no discriminant value")]
    EmptyMapper { union: String, variant: String },
    #[error("override `{native}` registers counted sequence `{function}.{param}` twice")]
    DuplicateArrayParam { native: String, function: String, param: String },
}

/// A per-declaration structural problem. Aborts only that declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoweringError {
    #[error("`{function}`: promoted output parameter `{param}` is not in the parameter list")]
    MissingReturnParam { function: String, param: String },
    #[error("`{function}`: counted sequence parameter `{param}` is not in the parameter list")]
    MissingArrayParam { function: String, param: String },
    #[error("`{function}`: count parameter `{count}` paired with `{param}` is not in the parameter list")]
    MissingCountParam { function: String, param: String, count: String },
    #[error("`{function}`: counted sequence `{param}` has type `{found}`, expected a pointer to `{expected}`")]
    ArrayParamTypeMismatch { function: String, param: String, expected: String, found: String },
}

impl LoweringError {
    pub fn function(&self) -> &str {
        match self {
            Self::MissingReturnParam { function, .. }
            | Self::MissingArrayParam { function, .. }
            | Self::MissingCountParam { function, .. }
            | Self::ArrayParamTypeMismatch { function, .. } => function,
        }
    }
}
