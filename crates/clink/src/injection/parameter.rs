//! Declared constructor parameters.

use std::any::{Any, TypeId, type_name};
use std::fmt;

/// Identity of an injectable value type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// Identity of `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Fully qualified Rust type name, for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) const fn id(&self) -> TypeId {
        self.id
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// What a constructor parameter asks the repository for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    /// The request being routed.
    Request,
    /// The shared [`Input`](crate::Input).
    Input,
    /// The shared [`Printer`](crate::Printer).
    Printer,
    /// An extra value registered by type or by parameter name.
    Value(ValueType),
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => f.write_str("request"),
            Self::Input => f.write_str("input"),
            Self::Printer => f.write_str("printer"),
            Self::Value(value) => f.write_str(value.name()),
        }
    }
}

/// One declared constructor parameter of a handler type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: &'static str,
    kind: DependencyKind,
    has_default: bool,
}

impl Parameter {
    /// Parameter receiving the routed request.
    #[must_use]
    pub const fn request(name: &'static str) -> Self {
        Self::new(name, DependencyKind::Request)
    }

    /// Parameter receiving the shared input reader.
    #[must_use]
    pub const fn input(name: &'static str) -> Self {
        Self::new(name, DependencyKind::Input)
    }

    /// Parameter receiving the shared printer.
    #[must_use]
    pub const fn printer(name: &'static str) -> Self {
        Self::new(name, DependencyKind::Printer)
    }

    /// Parameter receiving an extra value of type `T`.
    #[must_use]
    pub fn value<T: Any>(name: &'static str) -> Self {
        Self::new(name, DependencyKind::Value(ValueType::of::<T>()))
    }

    /// Marks the parameter as having a fallback the constructor supplies
    /// itself.
    #[must_use]
    pub const fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    const fn new(name: &'static str, kind: DependencyKind) -> Self {
        Self {
            name,
            kind,
            has_default: false,
        }
    }

    /// Parameter name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Requested dependency.
    #[must_use]
    pub const fn kind(&self) -> DependencyKind {
        self.kind
    }

    /// Whether the constructor can do without a registered value.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.has_default
    }
}
