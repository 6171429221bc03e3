//! The contract between content blocks and the hosting platform.
//!
//! A block is delivered to the host as an [`ExternalBlockDefinition`]: an
//! element name, a factory, the attributes the element observes, the two
//! configuration-dialog documents and catalog metadata. The host constructs
//! a [`BaseBlock`] per element instance, runs the factory, and from then on
//! talks to the instance exclusively through the [`Block`] trait.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::base_block::BaseBlock;
use crate::schema::{ConfigurationSchema, UiSchema};

/// Where the host may place instances of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockLevel {
    /// Own paragraph-level slot in the content flow.
    Block,
    /// Inline within surrounding text.
    Inline,
}

/// Render target the host mounts an element's markup into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    html: String,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the container's content.
    pub fn mount(&mut self, markup: String) {
        self.html = markup;
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// Behavior of one element instance.
///
/// Replaces the platform's historical base-class extension point: instead of
/// subclassing host internals, a block composes the [`BaseBlock`] the host
/// hands its factory and implements this trait. The host calls
/// [`Block::attribute_changed`] for every observed attribute write and
/// [`Block::render`] on each render pass; both must be cheap and idempotent.
pub trait Block: Send + Sync {
    /// Attribute names the element reacts on. Writes to any other attribute
    /// are stored but trigger no callback.
    fn observed_attributes(&self) -> &'static [&'static str];

    /// Hook invoked on every observed attribute change. Implementations
    /// defer to [`BaseBlock::attribute_changed`] before any logic of their
    /// own.
    fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>);

    /// Produce the element's markup into the host-provided container.
    fn render(&mut self, container: &mut Container) -> Result<()>;

    fn base(&self) -> &BaseBlock;

    fn base_mut(&mut self) -> &mut BaseBlock;
}

/// Type-erased block for dynamic dispatch.
pub type BoxedBlock = Box<dyn Block>;

/// Creates a block instance from the host-constructed base state.
pub type BlockFactory = fn(BaseBlock) -> BoxedBlock;

/// Everything the host needs to materialize and configure a block.
#[derive(Clone)]
pub struct BlockDefinition {
    /// Element name, also the registry key, e.g. `new-joiners-widget`.
    pub name: String,
    pub factory: BlockFactory,
    /// Attributes instances observe; mirrored by the factory's elements.
    pub attributes: &'static [&'static str],
    pub block_level: BlockLevel,
    /// Structural schema of the configuration dialog.
    pub configuration_schema: ConfigurationSchema,
    /// Presentation hints for the configuration dialog.
    pub ui_schema: UiSchema,
    /// Human-readable name shown in the host's block catalog.
    pub label: String,
    /// Catalog icon.
    pub icon_url: String,
}

/// A [`BlockDefinition`] wrapped with authorship metadata, as the host's
/// registration entry point expects it.
#[derive(Clone)]
pub struct ExternalBlockDefinition {
    pub definition: BlockDefinition,
    pub author: String,
    pub version: String,
}
