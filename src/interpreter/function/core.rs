use std::{cell::RefCell, fmt, rc::Rc};

use crate::interpreter::{
    engine::core::SourceLine,
    function::builtin::BUILTIN_TABLE,
    value::core::{Kind, Value},
};

/// A native function: evaluated arguments in, one value out.
///
/// Natives cannot fail. They return the empty value for "no result".
pub type NativeFn = Rc<dyn Fn(&[Value]) -> Value>;

/// A registry shared by an interpreter and the scopes and calls it spawns.
pub type SharedRegistry = Rc<RefCell<Registry>>;

#[derive(Clone)]
struct Native {
    name: String,
    call: NativeFn,
}

#[derive(Debug, Clone)]
struct Defined {
    name:  String,
    lines: Rc<[SourceLine]>,
}

/// Looks up functions by name.
///
/// Native and script-defined functions are kept in two tables, each sorted by
/// name. A call resolves a defined function first, then a native one.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use cll::interpreter::{function::core::Registry, value::core::Value};
///
/// let mut registry = Registry::with_builtins();
/// registry.add_native("twice", Rc::new(|args: &[Value]| {
///     args.first().map_or_else(Value::empty, |v| v + v)
/// }));
///
/// let twice = registry.native("twice").unwrap();
/// assert_eq!(twice(&[Value::new("21")]).text(), "42");
/// assert!(registry.is_native("sqrt"));
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    natives: Vec<Native>,
    defined: Vec<Defined>,
}

impl Registry {
    /// A registry holding the builtin library and nothing else.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        for builtin in BUILTIN_TABLE {
            registry.add_native(builtin.name, Rc::new(builtin.func));
        }
        registry
    }

    /// Wraps the registry into a shareable handle.
    #[must_use]
    pub fn shared(self) -> SharedRegistry {
        Rc::new(RefCell::new(self))
    }

    /// A copy with the native functions only; script definitions are left
    /// behind.
    #[must_use]
    pub fn natives_only(&self) -> Self {
        Self { natives: self.natives.clone(),
               defined: Vec::new(), }
    }

    #[must_use]
    pub fn native(&self, name: &str) -> Option<NativeFn> {
        self.natives
            .binary_search_by(|n| n.name.as_str().cmp(name))
            .ok()
            .map(|i| Rc::clone(&self.natives[i].call))
    }

    /// The body lines of a script-defined function.
    #[must_use]
    pub fn defined(&self, name: &str) -> Option<Rc<[SourceLine]>> {
        self.defined
            .binary_search_by(|d| d.name.as_str().cmp(name))
            .ok()
            .map(|i| Rc::clone(&self.defined[i].lines))
    }

    #[must_use]
    pub fn is_native(&self, name: &str) -> bool {
        self.native(name).is_some()
    }

    /// Returns `true` if `name` is callable.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.is_native(name) || self.defined(name).is_some()
    }

    /// Registers a native function, replacing one with the same name.
    pub fn add_native(&mut self, name: &str, call: NativeFn) {
        let native = Native { name: name.to_owned(),
                              call };
        match self.natives.binary_search_by(|n| n.name.as_str().cmp(name)) {
            Ok(i) => self.natives[i] = native,
            Err(i) => self.natives.insert(i, native),
        }
    }

    /// Removes a function of either table. Returns `false` if none existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let native = self.natives.binary_search_by(|n| n.name.as_str().cmp(name));
        if let Ok(i) = native {
            self.natives.remove(i);
        }
        let defined = self.defined.binary_search_by(|d| d.name.as_str().cmp(name));
        if let Ok(i) = defined {
            self.defined.remove(i);
        }
        native.is_ok() || defined.is_ok()
    }

    /// Stores a script-defined function, replacing an earlier definition.
    pub fn define(&mut self, name: &str, lines: Vec<SourceLine>) {
        let defined = Defined { name:  name.to_owned(),
                                lines: lines.into(), };
        match self.defined.binary_search_by(|d| d.name.as_str().cmp(name)) {
            Ok(i) => self.defined[i] = defined,
            Err(i) => self.defined.insert(i, defined),
        }
    }

    /// Names of all native functions, in order.
    #[must_use]
    pub fn native_names(&self) -> Vec<&str> {
        self.natives.iter().map(|n| n.name.as_str()).collect()
    }

    /// Names of all script-defined functions, in order.
    #[must_use]
    pub fn defined_names(&self) -> Vec<&str> {
        self.defined.iter().map(|d| d.name.as_str()).collect()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
         .field("natives", &self.native_names())
         .field("defined", &self.defined_names())
         .finish()
    }
}

/// Drops the separating commas from a call's evaluated arguments.
#[must_use]
pub fn arguments(values: Vec<Value>) -> Vec<Value> {
    values.into_iter()
          .filter(|v| !(v.kind() == Kind::Symbol && v.text() == ","))
          .collect()
}
