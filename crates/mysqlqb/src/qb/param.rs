//! Named parameter registry.

use crate::value::Value;

/// A bound parameter: a unique name and the value supplied for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
}

impl Parameter {
    /// Create a new parameter.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The placeholder text that references this parameter in SQL (`:p_0`).
    pub fn placeholder(&self) -> String {
        format!(":{}", self.name)
    }
}

/// Generates `p_<n>` names and keeps the ordered list of bindings for one statement.
///
/// Names are handed out from a monotonic counter and never reused, so two calls to
/// [`ParamList::next_name`] on the same list never return the same string.
#[derive(Debug, Clone, Default)]
pub struct ParamList {
    counter: usize,
    params: Vec<Parameter>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next parameter name.
    pub fn next_name(&mut self) -> String {
        let name = format!("p_{}", self.counter);
        self.counter += 1;
        name
    }

    /// Append a binding. No type checking happens here.
    pub fn register(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.params.push(Parameter::new(name, value));
    }

    /// Reserve a name, register `value` under it, and return its placeholder.
    pub fn bind(&mut self, value: impl Into<Value>) -> String {
        let name = self.next_name();
        let placeholder = format!(":{name}");
        self.register(name, value);
        placeholder
    }

    /// All bindings in registration order.
    pub fn all(&self) -> &[Parameter] {
        &self.params
    }

    /// Look up a binding by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
