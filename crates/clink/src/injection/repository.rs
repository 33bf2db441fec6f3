//! Per-router store of injectable values.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::rc::Rc;

use super::parameter::DependencyKind;
use crate::input::Input;
use crate::printer::Printer;
use crate::request::Request;

/// Values available for constructor injection.
///
/// The request, input and printer each have a typed slot. Any other value is
/// kept in a capability map, keyed either by its type or by the parameter name
/// it should satisfy. Named values remember their type, so a name only
/// satisfies parameters of that type. Each key holds at most one value;
/// setting it again replaces the previous one.
#[derive(Default)]
pub struct Repository {
    request: Option<Rc<dyn Request>>,
    input: Option<Rc<Input>>,
    printer: Option<Rc<Printer>>,
    by_type: HashMap<TypeId, Rc<dyn Any>>,
    by_name: HashMap<String, (TypeId, Rc<dyn Any>)>,
}

impl Repository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the request handed to the next instantiation.
    pub fn set_request(&mut self, request: Rc<dyn Request>) {
        self.request = Some(request);
    }

    /// Stores the shared input reader.
    pub fn set_input(&mut self, input: Rc<Input>) {
        self.input = Some(input);
    }

    /// Stores the shared printer.
    pub fn set_printer(&mut self, printer: Rc<Printer>) {
        self.printer = Some(printer);
    }

    /// Stores `value` under its type.
    pub fn set_value<T: Any>(&mut self, value: T) {
        self.by_type.insert(TypeId::of::<T>(), Rc::new(value));
    }

    /// Stores `value` under a parameter name.
    pub fn set_named<T: Any>(&mut self, name: impl Into<String>, value: T) {
        self.by_name
            .insert(name.into(), (TypeId::of::<T>(), Rc::new(value)));
    }

    /// Removes the value stored under type `T`, returning whether one existed.
    pub fn remove_value<T: Any>(&mut self) -> bool {
        self.by_type.remove(&TypeId::of::<T>()).is_some()
    }

    /// Removes the value stored under `name`, returning whether one existed.
    pub fn remove_named(&mut self, name: &str) -> bool {
        self.by_name.remove(name).is_some()
    }

    /// Current request, if one has been injected.
    #[must_use]
    pub fn request(&self) -> Option<Rc<dyn Request>> {
        self.request.clone()
    }

    /// Shared input reader, if registered.
    #[must_use]
    pub fn input(&self) -> Option<Rc<Input>> {
        self.input.clone()
    }

    /// Shared printer, if registered.
    #[must_use]
    pub fn printer(&self) -> Option<Rc<Printer>> {
        self.printer.clone()
    }

    pub(crate) fn value_by_type(&self, id: TypeId) -> Option<Rc<dyn Any>> {
        self.by_type.get(&id).cloned()
    }

    pub(crate) fn value_by_name(&self, name: &str) -> Option<Rc<dyn Any>> {
        self.by_name.get(name).map(|(_, value)| Rc::clone(value))
    }

    /// Whether a value exists for `kind`, either under its type or under
    /// `name` with a matching type.
    #[must_use]
    pub fn provides(&self, kind: DependencyKind, name: &str) -> bool {
        match kind {
            DependencyKind::Request => self.request.is_some(),
            DependencyKind::Input => self.input.is_some(),
            DependencyKind::Printer => self.printer.is_some(),
            DependencyKind::Value(value) => {
                self.by_type.contains_key(&value.id())
                    || self
                        .by_name
                        .get(name)
                        .is_some_and(|(id, _)| *id == value.id())
            }
        }
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Repository")
            .field("request", &self.request.is_some())
            .field("input", &self.input.is_some())
            .field("printer", &self.printer.is_some())
            .field("typed_values", &self.by_type.len())
            .field("named_values", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injection::parameter::ValueType;
    use crate::request::OutgoingRequest;

    #[test]
    fn empty_repository_provides_nothing() {
        let repository = Repository::new();
        assert!(!repository.provides(DependencyKind::Request, "request"));
        assert!(!repository.provides(DependencyKind::Input, "input"));
        assert!(!repository.provides(DependencyKind::Printer, "printer"));
        assert!(!repository.provides(DependencyKind::Value(ValueType::of::<u8>()), "level"));
    }

    #[test]
    fn values_are_found_by_type_or_by_name() {
        let mut repository = Repository::new();
        repository.set_value(String::from("Foobar"));
        repository.set_named("limit", 3_u32);

        let string = DependencyKind::Value(ValueType::of::<String>());
        let count = DependencyKind::Value(ValueType::of::<u32>());
        assert!(repository.provides(string, "anything"));
        assert!(repository.provides(count, "limit"));
        assert!(!repository.provides(count, "other"));
    }

    #[test]
    fn named_values_only_satisfy_their_own_type() {
        let mut repository = Repository::new();
        repository.set_named("count", "three");

        let integer = DependencyKind::Value(ValueType::of::<i32>());
        let text = DependencyKind::Value(ValueType::of::<&str>());
        assert!(!repository.provides(integer, "count"));
        assert!(repository.provides(text, "count"));
    }

    #[test]
    fn later_values_replace_earlier_ones() {
        let mut repository = Repository::new();
        repository.set_value(1_i64);
        repository.set_value(2_i64);

        let stored = repository
            .value_by_type(TypeId::of::<i64>())
            .and_then(|value| value.downcast::<i64>().ok())
            .expect("stored value");
        assert_eq!(*stored, 2);
    }

    #[test]
    fn request_slot_is_overwritten() {
        let mut repository = Repository::new();
        repository.set_request(Rc::new(OutgoingRequest::new().with_command("first")));
        repository.set_request(Rc::new(OutgoingRequest::new().with_command("second")));

        let request = repository.request().expect("request");
        assert_eq!(request.command(), Some("second"));
    }

    #[test]
    fn removed_values_are_no_longer_provided() {
        let mut repository = Repository::new();
        repository.set_value(7_u16);
        repository.set_named("label", "seven");

        assert!(repository.remove_value::<u16>());
        assert!(repository.remove_named("label"));
        assert!(!repository.remove_value::<u16>());
        assert!(!repository.provides(DependencyKind::Value(ValueType::of::<u16>()), "label"));
    }
}
