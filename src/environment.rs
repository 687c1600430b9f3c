use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;

/// A single scope frame: name-to-value bindings plus an optional link to the
/// enclosing scope. Frames form a chain rooted at the globals environment;
/// closures keep interior frames alive after the block that created them has
/// exited.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Insert or overwrite a binding in this frame only.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Walk the chain outward looking for `name`. Used for references the
    /// resolver left unrecorded, which by construction live in globals.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(LoxError::runtime(
                name.line,
                format!("Undefined variable '{}'.", name.lexeme),
            ))
        }
    }

    /// Overwrite an existing binding, walking the chain outward.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(LoxError::runtime(
                name.line,
                format!("Undefined variable '{}'.", name.lexeme),
            ))
        }
    }

    /// Fetch `name` from the frame exactly `depth` parent links away.
    ///
    /// The resolver guarantees both the chain length and the binding's
    /// presence; a miss here is an interpreter bug, not a user error.
    pub fn get_at(env: &Rc<RefCell<Environment>>, depth: usize, name: &str) -> Value {
        Self::ancestor(env, depth)
            .borrow()
            .values
            .get(name)
            .cloned()
            .expect("resolved variable missing from its scope")
    }

    /// Overwrite `name` in the frame exactly `depth` parent links away.
    pub fn assign_at(env: &Rc<RefCell<Environment>>, depth: usize, name: &str, value: Value) {
        Self::ancestor(env, depth)
            .borrow_mut()
            .values
            .insert(name.to_string(), value);
    }

    fn ancestor(env: &Rc<RefCell<Environment>>, depth: usize) -> Rc<RefCell<Environment>> {
        let mut current: Rc<RefCell<Environment>> = Rc::clone(env);

        for _ in 0..depth {
            let next: Rc<RefCell<Environment>> = current
                .borrow()
                .enclosing
                .clone()
                .expect("resolved depth exceeds the environment chain");

            current = next;
        }

        current
    }
}
