use crate::alloc::string::String;
use core::fmt;
use wasm5_core::TrapCode;

/// Top-level error returned by [`crate::instantiate`] and by callers that
/// want a single type covering the whole `bytes -> running instance`
/// pipeline. Each variant corresponds to one of the three disjoint error
/// taxonomies the engine recognizes.
#[derive(Debug)]
pub enum Error {
    /// Malformed binary, or an instantiation-time mismatch (import types,
    /// start function signature, segment initializer types).
    Load(LoadError),
    /// The parsed module failed a structural or typing rule.
    Validation(ValidationError),
    /// A trap occurred while running a constant expression or start
    /// function during instantiation.
    Trap(TrapCode),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "{e}"),
            Self::Validation(e) => write!(f, "{e}"),
            Self::Trap(t) => write!(f, "trap: {t}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<LoadError> for Error {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

/// Parser/instantiation-level failure. Never retried: the input bytes (or
/// the host's import table) are simply wrong.
#[derive(Debug)]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub detail: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadErrorKind {
    MalformedMagicOrVersion,
    TruncatedSection,
    MalformedLeb128,
    MismatchedImportType,
    InvalidStartFunctionSignature,
    InvalidInitializerType,
    Other,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load error: {:?}: {}", self.kind, self.detail)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LoadError {}

impl LoadError {
    pub fn new(kind: LoadErrorKind, detail: impl Into<String>) -> Self {
        Self { kind, detail: detail.into() }
    }
}

/// A module-level or per-function validation failure, reported at the
/// first offending instruction with a stable kind tag and a human-readable
/// detail string.
#[derive(Debug)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub detail: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, detail: impl Into<String>) -> Self {
        Self { kind, detail: detail.into() }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error: {:?}: {}", self.kind, self.detail)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    TypeMismatch,
    UnknownFunction,
    UnknownType,
    UnknownLocal,
    UnknownGlobal,
    UnknownLabel,
    UnknownTable,
    UnknownMemory,
    UnknownData,
    UnknownElement,
    InvalidResultArity,
    AlignmentTooLarge,
    OutOfBounds,
    ConstantExpressionRequired,
    MutableGlobalInConstExpr,
    DuplicateExport,
    MultipleMemories,
    SizeMinimumGreaterThanMaximum,
}
