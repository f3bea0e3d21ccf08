//! Callables, error records and symbols.

use super::object::{Object, Property};
use super::Value;
use std::rc::Rc;

/// The native body of a [`Function`].
pub type NativeFn = dyn Fn(&[Value]) -> Value;

struct FunctionInner {
    invoke: Rc<NativeFn>,
    attributes: Object,
}

/// Function is a callable that can carry attached properties.
///
/// The attributes behave like any other [`Object`]: merging a mapping into
/// a function merges into its attributes while the function stays
/// invokable.
#[derive(Clone)]
pub struct Function(Rc<FunctionInner>);

impl Function {
    /// Creates a new function with a non-enumerable `name` attribute.
    pub fn new<F>(name: &str, invoke: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        let attributes = Object::new();
        attributes.define("name", Property::hidden(Value::from(name)));
        Function::from_parts(Rc::new(invoke), attributes)
    }

    /// Creates a function from an existing body and attribute object.
    pub fn from_parts(invoke: Rc<NativeFn>, attributes: Object) -> Self {
        Function(Rc::new(FunctionInner { invoke, attributes }))
    }

    /// Invokes the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0.invoke)(args)
    }

    /// Returns the attached properties.
    pub fn attributes(&self) -> &Object {
        &self.0.attributes
    }

    /// Returns the `name` attribute, or an empty string.
    pub fn name(&self) -> String {
        match self.0.attributes.get("name") {
            Some(Value::String(name)) => name,
            _ => String::new(),
        }
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// ErrorValue is an error record: a name plus a property bag whose
/// `message` is non-enumerable.
#[derive(Clone)]
pub struct ErrorValue {
    name: String,
    properties: Object,
}

impl ErrorValue {
    /// Creates a new `Error` with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        ErrorValue::with_name("Error", message)
    }

    /// Creates a new error of a named class, e.g. `TypeError`.
    pub fn with_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        let properties = Object::new();
        properties.define("message", Property::hidden(Value::String(message.into())));
        ErrorValue {
            name: name.into(),
            properties,
        }
    }

    pub fn from_parts(name: impl Into<String>, properties: Object) -> Self {
        ErrorValue {
            name: name.into(),
            properties,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> String {
        match self.properties.get("message") {
            Some(Value::String(message)) => message,
            _ => String::new(),
        }
    }

    /// Returns the own properties, including the hidden `message`.
    pub fn properties(&self) -> &Object {
        &self.properties
    }

    pub fn id(&self) -> usize {
        self.properties.id()
    }

    pub fn ptr_eq(&self, other: &ErrorValue) -> bool {
        self.properties.ptr_eq(&other.properties)
    }
}

impl PartialEq for ErrorValue {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.message() == other.message()
            && self.properties == other.properties
    }
}

/// Symbol is a unique primitive; two symbols are equal only if they are
/// the same symbol.
#[derive(Clone)]
pub struct Symbol(Rc<Option<String>>);

impl Symbol {
    pub fn new(description: Option<&str>) -> Self {
        Symbol(Rc::new(description.map(str::to_string)))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn ptr_eq(&self, other: &Symbol) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
