//! Search engine adapters and the engine registry.

mod duckduckgo;
mod ecosia;
mod google;
mod naver;
mod startpage;
mod yahoo;

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::Engine;

pub use duckduckgo::DuckDuckGo;
pub use ecosia::Ecosia;
pub use google::Google;
pub use naver::Naver;
pub use startpage::Startpage;
pub use yahoo::Yahoo;

static BUILTIN: Lazy<Arc<EngineRegistry>> = Lazy::new(|| Arc::new(EngineRegistry::builtin()));

/// Immutable set of engine adapters, looked up by name or shortcut.
#[derive(Clone, Default)]
pub struct EngineRegistry {
    engines: Vec<Arc<dyn Engine>>,
}

impl EngineRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of every built-in engine.
    pub fn builtin() -> Self {
        Self::new()
            .with_engine(Google::new())
            .with_engine(Ecosia::new())
            .with_engine(Startpage::new())
            .with_engine(Yahoo::new())
            .with_engine(DuckDuckGo::new())
            .with_engine(Naver::new())
    }

    /// Shared registry of the built-in engines, created on first use.
    pub fn global() -> Arc<EngineRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// Adds an engine.
    pub fn with_engine<E: Engine + 'static>(mut self, engine: E) -> Self {
        self.engines.push(Arc::new(engine));
        self
    }

    /// Finds an engine by case-insensitive name or shortcut.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Engine>> {
        let name = name.trim();
        self.engines
            .iter()
            .find(|engine| {
                engine.name().eq_ignore_ascii_case(name) || engine.shortcut().eq_ignore_ascii_case(name)
            })
            .cloned()
    }

    /// Registered engines in registration order.
    pub fn engines(&self) -> &[Arc<dyn Engine>] {
        &self.engines
    }

    /// Returns the number of registered engines.
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}
