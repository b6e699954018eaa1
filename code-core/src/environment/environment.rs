use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::prelude::{Value, ValueType};

/// A single binding: the type it was declared with and its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub declared: ValueType,
    pub value: Value,
}

/// Lexically scoped variable store. Each block gets a fresh environment
/// whose lookups fall through to the enclosing one.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Binding>,
    parent: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            parent: None,
        }
    }

    pub fn with_parent(parent: Rc<RefCell<Environment>>) -> Self {
        Self {
            bindings: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Declares a new binding holding the zero value of its type. Returns
    /// false when the name is already declared in this scope; shadowing an
    /// outer binding is allowed.
    pub fn declare(&mut self, name: &str, declared: ValueType) -> bool {
        if self.bindings.contains_key(name) {
            return false;
        }

        let binding = Binding {
            declared,
            value: declared.zero_value(),
        };
        self.bindings.insert(name.to_string(), binding);

        true
    }

    /// Overwrites the value of an existing binding, searching outward.
    /// Returns false when the name is not declared anywhere.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(binding) = self.bindings.get_mut(name) {
            binding.value = value;
            return true;
        }

        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => false,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.value.clone());
        }

        match &self.parent {
            Some(parent) => parent.borrow().lookup(name),
            None => None,
        }
    }

    /// The type a name was declared with, searching outward.
    pub fn type_of(&self, name: &str) -> Option<ValueType> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.declared);
        }

        match &self.parent {
            Some(parent) => parent.borrow().type_of(name),
            None => None,
        }
    }
}
