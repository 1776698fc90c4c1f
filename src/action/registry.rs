use std::{
    collections::{BTreeSet, HashMap, HashSet},
    fmt,
    sync::Arc,
};

use crate::action::{Action, Initializer};
use crate::foundation::error::{JaoError, JaoResult};
use crate::model::ActionModel;

/// Constructor for an [`Action`] implementation.
pub type ActionFactory = Arc<dyn Fn() -> anyhow::Result<Box<dyn Action>> + Send + Sync>;

/// Constructor for an [`Initializer`] implementation.
pub type InitializerFactory = Arc<dyn Fn() -> anyhow::Result<Box<dyn Initializer>> + Send + Sync>;

/// A bundle of actions/initializers installed into an [`ActionRegistry`] under one id.
pub trait ActionLibrary {
    /// Unique library id; installing the same id twice is a no-op.
    fn id(&self) -> &str;

    /// Register every factory this library provides.
    fn register(&self, registry: &mut ActionRegistry);
}

/// Two-level plugin table: library -> name -> factory, kept separately for actions and
/// initializers.
///
/// Populate it once at startup, then share it read-only (for example behind an [`Arc`]);
/// every lookup returns a fresh instance so animations never share plugin state.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    actions: HashMap<String, HashMap<String, ActionFactory>>,
    initializers: HashMap<String, HashMap<String, InitializerFactory>>,
    installed: HashSet<String>,
}

impl ActionRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `jao.std` library installed.
    pub fn with_std() -> Self {
        let mut registry = Self::new();
        registry.install(&crate::action::std_lib::StdLibrary);
        registry
    }

    /// Install `library` unless a library with the same id is already installed.
    ///
    /// Returns `true` if the library was installed by this call.
    pub fn install(&mut self, library: &dyn ActionLibrary) -> bool {
        if !self.installed.insert(library.id().to_string()) {
            return false;
        }
        library.register(self);
        tracing::debug!(library = library.id(), "installed action library");
        true
    }

    /// Register an action factory under `library`/`name`, replacing any previous one.
    pub fn register_action<F>(
        &mut self,
        library: impl Into<String>,
        name: impl Into<String>,
        factory: F,
    ) -> &mut Self
    where
        F: Fn() -> anyhow::Result<Box<dyn Action>> + Send + Sync + 'static,
    {
        self.actions
            .entry(library.into())
            .or_default()
            .insert(name.into(), Arc::new(factory));
        self
    }

    /// Register an initializer factory under `library`/`name`, replacing any previous one.
    pub fn register_initializer<F>(
        &mut self,
        library: impl Into<String>,
        name: impl Into<String>,
        factory: F,
    ) -> &mut Self
    where
        F: Fn() -> anyhow::Result<Box<dyn Initializer>> + Send + Sync + 'static,
    {
        self.initializers
            .entry(library.into())
            .or_default()
            .insert(name.into(), Arc::new(factory));
        self
    }

    /// Register an action type constructed through [`Default`].
    pub fn register_action_type<T>(
        &mut self,
        library: impl Into<String>,
        name: impl Into<String>,
    ) -> &mut Self
    where
        T: Action + Default + 'static,
    {
        self.register_action(library, name, || {
            let action: Box<dyn Action> = Box::new(T::default());
            Ok(action)
        })
    }

    /// Register an initializer type constructed through [`Default`].
    pub fn register_initializer_type<T>(
        &mut self,
        library: impl Into<String>,
        name: impl Into<String>,
    ) -> &mut Self
    where
        T: Initializer + Default + 'static,
    {
        self.register_initializer(library, name, || {
            let init: Box<dyn Initializer> = Box::new(T::default());
            Ok(init)
        })
    }

    /// Whether `library` provides any action or initializer.
    pub fn has_library(&self, library: &str) -> bool {
        self.actions.contains_key(library) || self.initializers.contains_key(library)
    }

    /// All known library names in sorted order.
    pub fn libraries(&self) -> Vec<&str> {
        self.actions
            .keys()
            .chain(self.initializers.keys())
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Instantiate action `library`/`name`.
    ///
    /// With a model, the new instance receives `load_model(model)` followed by `reset()`, so a
    /// freshly parsed action always starts in begin-of-event state.
    pub fn get_action(
        &self,
        library: &str,
        name: &str,
        model: Option<&ActionModel>,
    ) -> JaoResult<Box<dyn Action>> {
        let table = self
            .actions
            .get(library)
            .ok_or_else(|| JaoError::library_not_found(library))?;
        let factory = table
            .get(name)
            .ok_or_else(|| JaoError::action_not_found(library, name))?;

        let mut action = factory().map_err(|e| JaoError::instantiation(name, e))?;
        if let Some(model) = model {
            action
                .load_model(model)
                .map_err(|e| JaoError::instantiation(name, e))?;
            action.reset();
        }
        tracing::trace!(library, name, "instantiated action");
        Ok(action)
    }

    /// Instantiate initializer `library`/`name`; with a model it receives `load_model(model)`.
    pub fn get_initializer(
        &self,
        library: &str,
        name: &str,
        model: Option<&ActionModel>,
    ) -> JaoResult<Box<dyn Initializer>> {
        let table = self
            .initializers
            .get(library)
            .ok_or_else(|| JaoError::library_not_found(library))?;
        let factory = table
            .get(name)
            .ok_or_else(|| JaoError::initializer_not_found(library, name))?;

        let mut init = factory().map_err(|e| JaoError::instantiation(name, e))?;
        if let Some(model) = model {
            init.load_model(model)
                .map_err(|e| JaoError::instantiation(name, e))?;
        }
        tracing::trace!(library, name, "instantiated initializer");
        Ok(init)
    }
}

fn count<V>(table: &HashMap<String, HashMap<String, V>>) -> usize {
    table.values().map(HashMap::len).sum()
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("libraries", &self.libraries())
            .field("actions", &count(&self.actions))
            .field("initializers", &count(&self.initializers))
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/action/registry.rs"]
mod tests;
