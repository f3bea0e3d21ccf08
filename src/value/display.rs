//! Human-readable rendering of values.
//!
//! Values print in an inspection style: `{ a: 1, b: [ 'x', null ] }`.
//! A reference that is already being printed renders as `[Circular]`.

use super::callable::{ErrorValue, Function, Symbol};
use super::object::{Array, Object};
use super::special::{KeyedMap, ValueSet};
use super::Value;
use chrono::SecondsFormat;
use std::fmt::{self, Write};

struct Inspector<'a, 'b> {
    out: &'a mut fmt::Formatter<'b>,
    ancestors: Vec<usize>,
}

impl Inspector<'_, '_> {
    fn value(&mut self, value: &Value) -> fmt::Result {
        match value {
            Value::Undefined => self.out.write_str("undefined"),
            Value::Null => self.out.write_str("null"),
            Value::Bool(b) => write!(self.out, "{}", b),
            Value::Number(n) => self.out.write_str(&format_number(*n)),
            Value::String(s) => write!(self.out, "'{}'", s.replace('\'', "\\'")),
            Value::BigInt(n) => write!(self.out, "{}n", n),
            Value::Symbol(s) => write!(self.out, "{}", s),
            Value::Array(a) => self.nested(a.id(), |this| this.array(a)),
            Value::Object(o) => self.nested(o.id(), |this| this.properties("", o)),
            Value::Function(f) => self.nested(f.id(), |this| this.function(f)),
            Value::Error(e) => self.nested(e.id(), |this| this.error(e)),
            Value::Date(d) => self
                .out
                .write_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::RegExp(r) => write!(self.out, "{}", r),
            Value::Buffer(bytes) => {
                self.out.write_str("<Buffer")?;
                for byte in bytes {
                    write!(self.out, " {:02x}", byte)?;
                }
                self.out.write_char('>')
            }
            Value::TypedArray(t) => {
                write!(self.out, "{}({}) ", t.kind().name(), t.len())?;
                self.list(&t.to_values())
            }
            Value::ArrayBuffer(bytes) => {
                write!(self.out, "ArrayBuffer {{ byteLength: {} }}", bytes.len())
            }
            Value::Map(m) => self.map(m),
            Value::Set(s) => self.set(s),
        }
    }

    fn nested<F>(&mut self, id: usize, render: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        if self.ancestors.contains(&id) {
            return self.out.write_str("[Circular]");
        }
        self.ancestors.push(id);
        let result = render(self);
        self.ancestors.pop();
        result
    }

    fn list(&mut self, items: &[Value]) -> fmt::Result {
        if items.is_empty() {
            return self.out.write_str("[]");
        }
        self.out.write_str("[ ")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.value(item)?;
        }
        self.out.write_str(" ]")
    }

    fn array(&mut self, array: &Array) -> fmt::Result {
        self.list(&array.to_vec())
    }

    fn properties(&mut self, prefix: &str, object: &Object) -> fmt::Result {
        let entries = object.entries();
        if entries.is_empty() {
            return write!(self.out, "{}{{}}", prefix);
        }
        write!(self.out, "{}{{ ", prefix)?;
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            if is_identifier(key) {
                write!(self.out, "{}: ", key)?;
            } else {
                write!(self.out, "'{}': ", key)?;
            }
            self.value(value)?;
        }
        self.out.write_str(" }")
    }

    fn function(&mut self, function: &Function) -> fmt::Result {
        let name = function.name();
        let label = if name.is_empty() {
            "[Function (anonymous)]".to_string()
        } else {
            format!("[Function: {}]", name)
        };
        if function.attributes().is_empty() {
            return self.out.write_str(&label);
        }
        self.properties(&format!("{} ", label), function.attributes())
    }

    fn error(&mut self, error: &ErrorValue) -> fmt::Result {
        let message = error.message();
        let label = if message.is_empty() {
            error.name().to_string()
        } else {
            format!("{}: {}", error.name(), message)
        };
        if error.properties().is_empty() {
            return self.out.write_str(&label);
        }
        self.properties(&format!("[{}] ", label), error.properties())
    }

    fn map(&mut self, map: &KeyedMap) -> fmt::Result {
        if map.is_empty() {
            return self.out.write_str("Map(0) {}");
        }
        write!(self.out, "Map({}) {{ ", map.len())?;
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.value(key)?;
            self.out.write_str(" => ")?;
            self.value(value)?;
        }
        self.out.write_str(" }")
    }

    fn set(&mut self, set: &ValueSet) -> fmt::Result {
        if set.is_empty() {
            return self.out.write_str("Set(0) {}");
        }
        write!(self.out, "Set({}) {{ ", set.len())?;
        for (i, item) in set.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.value(item)?;
        }
        self.out.write_str(" }")
    }
}

/// Formats a number the way dynamic languages print them: integral values
/// without a fractional part, `NaN`, `Infinity`.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        // -0 prints as 0
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i128)
    } else {
        format!("{}", n)
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Inspector {
            out: f,
            ancestors: Vec::new(),
        }
        .value(self)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

macro_rules! display_via_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&Value::$variant(self.clone()), f)
                }
            }

            impl fmt::Debug for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(self, f)
                }
            }
        )*
    };
}

display_via_value! {
    Array => Array,
    Object => Object,
    Function => Function,
    ErrorValue => Error,
    KeyedMap => Map,
    ValueSet => Set,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
