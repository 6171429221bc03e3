//! Host-side driver for a single mounted element.

use std::fmt;

use anyhow::Result;
use log::trace;

use crate::core::block::{Block, BoxedBlock, Container};

/// One mounted element: the host's handle on a block instance.
///
/// Behaves like a custom element. Writes to observed attributes invoke the
/// block's change hook with the old and new value; writes to anything else
/// are stored silently. Rendering happens only when the host runs a render
/// pass, so any number of attribute writes coalesce into one render.
pub struct Element {
    tag_name: String,
    block: BoxedBlock,
}

impl Element {
    pub(crate) fn new(tag_name: String, block: BoxedBlock) -> Self {
        Self { tag_name, block }
    }

    /// The element name this instance was created under.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn block(&self) -> &dyn Block {
        self.block.as_ref()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.block.base().attribute(name)
    }

    /// Write an attribute, invoking the block's change hook when observed.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let old = self.block.base_mut().write_attribute(name, Some(value));
        if self.is_observed(name) {
            self.block.attribute_changed(name, old.as_deref(), Some(value));
        }
    }

    /// Remove an attribute; the change hook sees `None` as the new value.
    pub fn remove_attribute(&mut self, name: &str) {
        let old = self.block.base_mut().write_attribute(name, None);
        if old.is_some() && self.is_observed(name) {
            self.block.attribute_changed(name, old.as_deref(), None);
        }
    }

    /// Whether a render pass is due.
    pub fn needs_render(&self) -> bool {
        self.block.base().needs_render()
    }

    /// Run a render pass into `container` and clear the render mark.
    pub fn render(&mut self, container: &mut Container) -> Result<()> {
        trace!("rendering <{}>", self.tag_name);
        self.block.render(container)?;
        self.block.base_mut().mark_rendered();
        Ok(())
    }

    fn is_observed(&self, name: &str) -> bool {
        self.block.observed_attributes().contains(&name)
    }
}

// BoxedBlock has no Debug; report the host-visible state.
impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag_name", &self.tag_name)
            .field("needs_render", &self.needs_render())
            .finish_non_exhaustive()
    }
}
