use std::fmt;

use crate::ElementType;

/// What turned up where an element of some type was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Element(ElementType),
    /// A list whose length isn't that of any element type.
    Tuple(usize),
    /// A script value with no element type at all, such as a string.
    Other(&'static str),
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Element(ty) => write!(f, "{ty}"),
            Found::Tuple(n) => write!(f, "{n}-component list"),
            Found::Other(kind) => f.write_str(kind),
        }
    }
}

impl From<ElementType> for Found {
    fn from(value: ElementType) -> Self {
        Found::Element(value)
    }
}

/// Errors reported by attribute stores and the operator engine.
///
/// None of these are fatal: every failing call leaves the store exactly as it found it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("no pdata called [{0}]")]
    NotFound(String),
    #[error("expected {expected} pdata, found {found}")]
    TypeMismatch {
        expected: ElementType,
        found: Found,
    },
    #[error("unknown pdata operator [{0}]")]
    UnknownOperator(String),
    #[error("unknown pdata type [{0}]")]
    UnknownType(String),
    #[error("pdata called [{0}] already exists")]
    DuplicateName(String),
    #[error("pdata called [{0}] is empty")]
    EmptyArray(String),
    #[error("tuple of {0} components is not a vector (3), colour (4), or matrix (16)")]
    InvalidArity(usize),
    #[error("operator [{op}] is not defined for {ty} pdata with {operand} operand")]
    Unsupported {
        op: &'static str,
        ty: ElementType,
        operand: &'static str,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
