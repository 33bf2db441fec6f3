//! Registry of type references the router can resolve by name.
//!
//! A [`TypeDescriptor`] records what the router needs to know about a type
//! without reflection: its name, whether it is a command handler, its
//! declared constructor parameters and the function that builds it.

use std::any::{Any, type_name};
use std::borrow::Cow;
use std::collections::HashMap;

use crate::command::{Command, Inject};
use crate::injection::{Parameter, ResolveError, Resolver};

/// Builds a boxed handler from resolved dependencies.
pub type Factory = fn(&Resolver<'_>) -> Result<Box<dyn Command>, ResolveError>;

/// Metadata describing one type reference.
#[derive(Clone)]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    parameters: Option<Vec<Parameter>>,
    factory: Option<Factory>,
}

impl TypeDescriptor {
    /// Handler built through its declared constructor.
    #[must_use]
    pub fn command<C: Command + Inject>() -> Self {
        Self {
            name: Cow::Borrowed(type_name::<C>()),
            parameters: Some(C::parameters()),
            factory: Some(build_injected::<C>),
        }
    }

    /// Handler without a declared constructor, built with [`Default`].
    #[must_use]
    pub fn default_command<C: Command + Default>() -> Self {
        Self {
            name: Cow::Borrowed(type_name::<C>()),
            parameters: None,
            factory: Some(build_default::<C>),
        }
    }

    /// Known type that is not a command handler.
    #[must_use]
    pub fn plain<T: Any>() -> Self {
        Self {
            name: Cow::Borrowed(type_name::<T>()),
            parameters: None,
            factory: None,
        }
    }

    /// Registers the descriptor under another type reference.
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Type reference the descriptor is registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared constructor parameters, or `None` without a constructor.
    #[must_use]
    pub fn parameters(&self) -> Option<&[Parameter]> {
        self.parameters.as_deref()
    }

    /// Whether the type carries the handler capability.
    #[must_use]
    pub const fn is_command(&self) -> bool {
        self.factory.is_some()
    }

    pub(crate) fn instantiate(
        &self,
        resolver: &Resolver<'_>,
    ) -> Result<Box<dyn Command>, ResolveError> {
        match self.factory {
            Some(factory) => factory(resolver),
            None => Err(ResolveError::NotInstantiable {
                type_name: self.name.clone().into_owned(),
            }),
        }
    }
}

impl std::fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("command", &self.is_command())
            .finish()
    }
}

fn build_injected<C: Command + Inject>(
    resolver: &Resolver<'_>,
) -> Result<Box<dyn Command>, ResolveError> {
    let command = C::inject(resolver)?;
    Ok(Box::new(command))
}

fn build_default<C: Command + Default>(
    _resolver: &Resolver<'_>,
) -> Result<Box<dyn Command>, ResolveError> {
    Ok(Box::new(C::default()))
}

/// Type references known to a router, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<String, TypeDescriptor>,
}

impl TypeCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a descriptor.
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.types
            .insert(descriptor.name().to_owned(), descriptor);
        self
    }

    /// Returns the catalog with `descriptor` added.
    #[must_use]
    pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
        self.insert(descriptor);
        self
    }

    /// Looks up a type reference.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Whether a type reference is known.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Removes a type reference, returning its descriptor.
    pub fn remove(&mut self, name: &str) -> Option<TypeDescriptor> {
        self.types.remove(name)
    }

    /// Number of known types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injection::Repository;

    #[derive(Default)]
    struct Noop;

    impl Command for Noop {
        fn run(&mut self) {}
    }

    struct Settings;

    #[test]
    fn descriptors_default_to_the_rust_type_name() {
        let descriptor = TypeDescriptor::default_command::<Noop>();
        assert_eq!(descriptor.name(), type_name::<Noop>());
        assert!(descriptor.is_command());
        assert!(descriptor.parameters().is_none());
    }

    #[test]
    fn plain_types_are_not_commands() {
        let descriptor = TypeDescriptor::plain::<Settings>().named("app::Settings");
        assert_eq!(descriptor.name(), "app::Settings");
        assert!(!descriptor.is_command());

        let repository = Repository::new();
        let result = descriptor.instantiate(&Resolver::new(&repository));
        assert!(matches!(result, Err(ResolveError::NotInstantiable { .. })));
    }

    #[test]
    fn catalog_replaces_descriptors_with_the_same_name() {
        let mut catalog = TypeCatalog::new();
        catalog
            .insert(TypeDescriptor::plain::<Settings>().named("app::Thing"))
            .insert(TypeDescriptor::default_command::<Noop>().named("app::Thing"));

        assert_eq!(catalog.len(), 1);
        let descriptor = catalog.get("app::Thing").expect("descriptor");
        assert!(descriptor.is_command());
    }

    #[test]
    fn default_commands_instantiate_without_dependencies() {
        let repository = Repository::new();
        let descriptor = TypeDescriptor::default_command::<Noop>();
        let command = descriptor
            .instantiate(&Resolver::new(&repository))
            .expect("instantiate");
        assert!(command.is::<Noop>());
    }
}
