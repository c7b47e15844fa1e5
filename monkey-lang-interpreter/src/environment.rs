use crate::object::Object;
use gc::{Finalize, Gc, GcCell, Trace};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Trace, Finalize)]
pub struct EnvironmentCore {
    store: HashMap<Rc<str>, Gc<Object>>,
    outer: Option<Environment>,
}

/// Handle to a scope. Clones share the same frame.
#[derive(Debug, Clone, Trace, Finalize)]
pub struct Environment {
    environment: Gc<GcCell<EnvironmentCore>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::with_outer(None)
    }

    pub fn new_enclosed(outer: Environment) -> Environment {
        Self::with_outer(Some(outer))
    }

    fn with_outer(outer: Option<Environment>) -> Environment {
        Environment {
            environment: Gc::new(GcCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer,
            })),
        }
    }

    pub fn get(&self, key: &str) -> Option<Gc<Object>> {
        let env = self.environment.borrow();
        match env.store.get(key) {
            Some(value) => Some(value.clone()),
            None => env.outer.as_ref().and_then(|outer| outer.get(key)),
        }
    }

    pub fn set(&mut self, key: Rc<str>, value: Gc<Object>) {
        self.environment.borrow_mut().store.insert(key, value);
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        Gc::ptr_eq(&self.environment, &other.environment)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let mut env = Environment::new();
        assert_eq!(env.get("x"), None);

        env.set("x".into(), Object::integer(1));
        assert_eq!(env.get("x"), Some(Object::integer(1)));

        env.set("x".into(), Object::integer(2));
        assert_eq!(env.get("x"), Some(Object::integer(2)));
    }

    #[test]
    fn test_enclosed_lookup_and_shadowing() {
        let mut outer = Environment::new();
        outer.set("x".into(), Object::integer(1));
        outer.set("y".into(), Object::integer(2));

        let mut inner = Environment::new_enclosed(outer.clone());
        inner.set("x".into(), Object::integer(10));

        assert_eq!(inner.get("x"), Some(Object::integer(10)));
        assert_eq!(inner.get("y"), Some(Object::integer(2)));
        assert_eq!(outer.get("x"), Some(Object::integer(1)));
        assert_eq!(inner.get("z"), None);
    }

    #[test]
    fn test_clones_share_the_frame() {
        let env = Environment::new();
        let mut alias = env.clone();
        alias.set("a".into(), Object::boolean(true));

        assert_eq!(env, alias);
        assert_ne!(env, Environment::new());
        assert!(env.get("a").is_some());
    }
}
