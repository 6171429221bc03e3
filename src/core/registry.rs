//! Registry of block definitions.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::info;
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::core::base_block::BaseBlock;
use crate::core::block::ExternalBlockDefinition;
use crate::core::element::Element;
use crate::core::widget_api::WidgetApi;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown block: {0}")]
    UnknownBlock(String),
    #[error("block already defined: {0}")]
    DuplicateBlock(String),
}

/// Registry mapping element names to block definitions.
///
/// This allows compile-time registration of built-in blocks; the hosting
/// application resolves element names against it when materializing content.
pub struct BlockRegistry {
    blocks: HashMap<String, ExternalBlockDefinition>,
}

impl BlockRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
        }
    }

    /// Register a block under its element name. Element names are claimed
    /// once; a second definition for the same name is rejected.
    pub fn define(&mut self, external: ExternalBlockDefinition) -> Result<(), RegistryError> {
        let name = external.definition.name.clone();
        if self.blocks.contains_key(&name) {
            return Err(RegistryError::DuplicateBlock(name));
        }
        info!(
            "defined block <{}> v{} by {}",
            name, external.version, external.author
        );
        self.blocks.insert(name, external);
        Ok(())
    }

    /// Look up a definition by element name.
    pub fn get(&self, name: &str) -> Option<&ExternalBlockDefinition> {
        self.blocks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// Materialize an element: construct the base state, run the block's
    /// factory and wrap the result in the host-side driver.
    pub fn create_element(
        &self,
        name: &str,
        api: Arc<dyn WidgetApi>,
    ) -> Result<Element, RegistryError> {
        let external = self
            .blocks
            .get(name)
            .ok_or_else(|| RegistryError::UnknownBlock(name.to_string()))?;
        let base = BaseBlock::new(api);
        let block = (external.definition.factory)(base);
        info!("created element <{}>", name);
        Ok(Element::new(name.to_string(), block))
    }

    /// List all registered element names.
    pub fn list_blocks(&self) -> Vec<String> {
        let mut names: Vec<String> = self.blocks.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global registry instance backing [`define_block`].
static GLOBAL_REGISTRY: Lazy<RwLock<BlockRegistry>> =
    Lazy::new(|| RwLock::new(BlockRegistry::new()));

/// Register a block with the global registry. This call is what makes the
/// hosting application pick the block up; a definition that is never passed
/// here does not exist as far as the host is concerned.
pub fn define_block(external: ExternalBlockDefinition) -> Result<(), RegistryError> {
    GLOBAL_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .define(external)
}

/// Materialize an element from the global registry.
pub fn create_element(name: &str, api: Arc<dyn WidgetApi>) -> Result<Element, RegistryError> {
    GLOBAL_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .create_element(name, api)
}

/// Run `f` against the global registry, e.g. to list or inspect definitions.
pub fn with_registry<R>(f: impl FnOnce(&BlockRegistry) -> R) -> R {
    f(&GLOBAL_REGISTRY.read().unwrap_or_else(PoisonError::into_inner))
}
