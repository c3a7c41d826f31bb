use crate::ast::Block;
use crate::environment::Environment;
use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

pub type BuiltinFn = fn(Vec<Object>) -> Object;

#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    ReturnValue(Box<Object>),
    Error(String),
    Function {
        params: Vec<String>,
        body: Block,
        env: Rc<RefCell<Environment>>,
    },
    Builtin(BuiltinFn),
    Array(Vec<Object>),
    Hash(HashMap<HashKey, HashPair>),
}

/// Map key derived from a hashable value: the type tag plus a fingerprint
/// (the integer itself, 0/1 for booleans, a hash of the string bytes).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct HashKey {
    pub tag: &'static str,
    pub fingerprint: u64,
}

/// The stored entry of a hash: the original key value is kept alongside
/// the mapped value so iteration can report faithful key forms.
#[derive(Debug, PartialEq, Clone)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

impl Object {
    /// Type tag used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::String(_) => "STRING",
            Object::Null => "NULL",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Function { .. } => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Only integers, booleans, and strings are hashable.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey {
                tag: self.type_name(),
                fingerprint: *value as u64,
            }),
            Object::Boolean(value) => Some(HashKey {
                tag: self.type_name(),
                fingerprint: *value as u64,
            }),
            Object::String(value) => {
                let mut hasher = DefaultHasher::new();
                value.hash(&mut hasher);
                Some(HashKey {
                    tag: self.type_name(),
                    fingerprint: hasher.finish(),
                })
            }
            _ => None,
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(l), Object::Integer(r)) => l == r,
            (Object::Boolean(l), Object::Boolean(r)) => l == r,
            (Object::String(l), Object::String(r)) => l == r,
            (Object::Null, Object::Null) => true,
            (Object::ReturnValue(l), Object::ReturnValue(r)) => l == r,
            (Object::Error(l), Object::Error(r)) => l == r,
            (Object::Array(l), Object::Array(r)) => l == r,
            (Object::Hash(l), Object::Hash(r)) => l == r,
            // Functions and builtins never compare equal.
            _ => false,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Error(message) => write!(f, "ERROR: {}", message),
            Object::Function { params, body, .. } => {
                write!(f, "fn({}) {{\n{}\n}}", params.join(", "), body)
            }
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Object::Hash(pairs) => {
                write!(f, "{{")?;
                for (i, pair) in pairs.values().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
