// src/env/options.rs

//! Type-indexed bundle of option classes.
//!
//! Each option class is a plain struct; the bundle holds at most one value
//! per type and hands out shared references to it.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

#[derive(Default)]
pub struct OptionsBundle {
    classes: HashMap<TypeId, (&'static str, Box<dyn Any + Send + Sync>)>,
}

impl OptionsBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with<O: Any + Send + Sync>(mut self, options: O) -> Self {
        self.insert(options);
        self
    }

    /// Insert an option class, replacing any previous value of the same type.
    pub fn insert<O: Any + Send + Sync>(&mut self, options: O) {
        self.classes
            .insert(TypeId::of::<O>(), (type_name::<O>(), Box::new(options)));
    }

    /// Look up an option class. `None` if that class was never provided.
    pub fn get<O: Any>(&self) -> Option<&O> {
        self.classes
            .get(&TypeId::of::<O>())
            .and_then(|(_, value)| value.downcast_ref::<O>())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl fmt::Debug for OptionsBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.classes.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        f.debug_struct("OptionsBundle").field("classes", &names).finish()
    }
}
