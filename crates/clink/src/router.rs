//! Name-based command routing with constructor validation.
//!
//! The router maps command names to type references from its
//! [`TypeCatalog`]. Handler constructors are validated against the
//! dependency repository when a command is added, and instantiated with the
//! live request when a command is routed.

use std::any::Any;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, error};

use crate::catalog::{TypeCatalog, TypeDescriptor};
use crate::command::{Command, Inject};
use crate::errors::RouterError;
use crate::injection::{DependencyKind, Repository, Resolver, Validator};
use crate::input::Input;
use crate::printer::Printer;
use crate::request::Request;

/// Tracing target for routing operations.
pub(crate) const ROUTER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::router");

/// Stores routes and builds command handlers.
///
/// `route` writes the request into the router's repository before building
/// the handler, so a router serves one request at a time. It holds `Rc`
/// values and therefore stays on the thread that created it.
#[derive(Debug)]
pub struct Router {
    commands: BTreeMap<String, String>,
    catalog: TypeCatalog,
    dependencies: Repository,
    validator: Validator,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Creates a router with an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(TypeCatalog::new())
    }

    /// Creates a router resolving type references from `catalog`.
    #[must_use]
    pub fn with_catalog(catalog: TypeCatalog) -> Self {
        let mut validator = Validator::new();
        validator.allow(DependencyKind::Request);
        Self {
            commands: BTreeMap::new(),
            catalog,
            dependencies: Repository::new(),
            validator,
        }
    }

    /// Type references the router can resolve.
    #[must_use]
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Mutable access to the catalog, for declaring additional types.
    pub fn catalog_mut(&mut self) -> &mut TypeCatalog {
        &mut self.catalog
    }

    /// Values available to handler constructors.
    #[must_use]
    pub fn dependencies(&self) -> &Repository {
        &self.dependencies
    }

    /// Mutable access to the dependency repository.
    pub fn dependencies_mut(&mut self) -> &mut Repository {
        &mut self.dependencies
    }

    /// Registers `name` as a route to the catalog type `type_name`.
    ///
    /// Re-registering a name replaces the previous route.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::UnknownType`] when the catalog has no such
    /// type, [`RouterError::NotAHandler`] when the type is not a command and
    /// [`RouterError::InvalidConstructor`] when a declared parameter cannot be
    /// satisfied.
    pub fn add_command(
        &mut self,
        name: impl Into<String>,
        type_name: &str,
    ) -> Result<&mut Self, RouterError> {
        let name = name.into();
        let descriptor = self
            .catalog
            .get(type_name)
            .ok_or_else(|| RouterError::unknown_type(type_name))?;

        if !descriptor.is_command() {
            return Err(RouterError::not_a_handler(type_name));
        }

        self.check_constructor(&name, descriptor)?;

        debug!(target: ROUTER_TARGET, command = name.as_str(), type_name, "registered command");
        self.commands.insert(name, type_name.to_owned());
        Ok(self)
    }

    fn check_constructor(
        &self,
        command: &str,
        descriptor: &TypeDescriptor,
    ) -> Result<(), RouterError> {
        let Some(parameters) = descriptor.parameters() else {
            return Ok(());
        };

        let unsatisfied = self.validator.unsatisfied(parameters, &self.dependencies);
        if unsatisfied.is_empty() {
            return Ok(());
        }

        let names: Vec<&str> = unsatisfied.iter().map(|parameter| parameter.name()).collect();
        debug!(
            target: ROUTER_TARGET,
            command,
            type_name = descriptor.name(),
            parameters = ?names,
            "rejected command constructor"
        );
        Err(RouterError::invalid_constructor(descriptor.name(), names))
    }

    /// Declares `C` in the catalog and routes `name` to it.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConstructor`] when a declared parameter
    /// of `C` cannot be satisfied.
    pub fn register<C: Command + Inject>(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut Self, RouterError> {
        self.register_descriptor(name, TypeDescriptor::command::<C>())
    }

    /// Declares the constructor-less `C` in the catalog and routes `name`
    /// to it.
    ///
    /// # Errors
    ///
    /// Never fails for a constructor-less type; the result mirrors
    /// [`Router::add_command`] for uniform chaining.
    pub fn register_default<C: Command + Default>(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut Self, RouterError> {
        self.register_descriptor(name, TypeDescriptor::default_command::<C>())
    }

    fn register_descriptor(
        &mut self,
        name: impl Into<String>,
        descriptor: TypeDescriptor,
    ) -> Result<&mut Self, RouterError> {
        let name = name.into();
        // A rejected type must not displace an existing catalog entry.
        self.check_constructor(&name, &descriptor)?;
        let type_name = descriptor.name().to_owned();
        self.catalog.insert(descriptor);
        self.add_command(name, &type_name)
    }

    /// Builds the handler registered for the request's command.
    ///
    /// Returns `Ok(None)` when no command is registered under that name.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::MissingCommandName`] when the request has no
    /// command name and [`RouterError::Unresolvable`] when a registered
    /// handler can no longer be built.
    pub fn route<R: Request + 'static>(
        &mut self,
        request: R,
    ) -> Result<Option<Box<dyn Command>>, RouterError> {
        self.route_shared(Rc::new(request))
    }

    /// Like [`Router::route`], for a request that is already shared.
    ///
    /// # Errors
    ///
    /// See [`Router::route`].
    pub fn route_shared(
        &mut self,
        request: Rc<dyn Request>,
    ) -> Result<Option<Box<dyn Command>>, RouterError> {
        let command = match request.command() {
            Some(command) if !command.is_empty() => command.to_owned(),
            _ => return Err(RouterError::MissingCommandName),
        };

        let Some(type_name) = self.commands.get(&command).cloned() else {
            debug!(target: ROUTER_TARGET, command = command.as_str(), "command not found");
            return Ok(None);
        };

        debug!(
            target: ROUTER_TARGET,
            command = command.as_str(),
            type_name = type_name.as_str(),
            arguments = request.arguments().len(),
            "routing command"
        );
        self.dependencies.set_request(request);

        let resolver = Resolver::new(&self.dependencies);
        let built = match self.catalog.get(&type_name) {
            Some(descriptor) => descriptor.instantiate(&resolver),
            None => Err(crate::injection::ResolveError::NotInstantiable {
                type_name: type_name.clone(),
            }),
        };

        built.map(Some).map_err(|source| {
            error!(
                target: ROUTER_TARGET,
                command = command.as_str(),
                type_name = type_name.as_str(),
                error = %source,
                "validated command could not be instantiated"
            );
            RouterError::unresolvable(command, type_name, source)
        })
    }

    /// Sets the input reader offered to handler constructors.
    pub fn set_input(&mut self, input: Rc<Input>) -> &mut Self {
        self.dependencies.set_input(input);
        self
    }

    /// Sets the printer offered to handler constructors.
    pub fn set_printer(&mut self, printer: Rc<Printer>) -> &mut Self {
        self.dependencies.set_printer(printer);
        self
    }

    /// Offers `value` to constructor parameters of type `T`.
    pub fn set_value<T: Any>(&mut self, value: T) -> &mut Self {
        self.dependencies.set_value(value);
        self
    }

    /// Offers `value` to constructor parameters called `name`.
    pub fn set_named<T: Any>(&mut self, name: impl Into<String>, value: T) -> &mut Self {
        self.dependencies.set_named(name, value);
        self
    }

    /// Registered command names, in sorted order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Whether a command is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Type reference registered under `name`.
    #[must_use]
    pub fn command_type(&self, name: &str) -> Option<&str> {
        self.commands.get(name).map(String::as_str)
    }
}
