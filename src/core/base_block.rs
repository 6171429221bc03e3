//! Host-provided per-element state blocks build on.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use crate::core::widget_api::WidgetApi;

/// Attribute storage of one element: attribute name → string value.
pub type AttributeMap = BTreeMap<String, String>;

/// State the hosting platform constructs for each element instance and hands
/// to the block factory.
///
/// Blocks compose this value instead of extending a platform base class: the
/// platform owns attribute storage, the content language and the re-render
/// mark, and a block reaches all of it through its `BaseBlock`. Attribute
/// hooks defer to [`BaseBlock::attribute_changed`] before any logic of their
/// own so the host keeps scheduling re-renders.
pub struct BaseBlock {
    instance_id: Uuid,
    attributes: AttributeMap,
    content_language: String,
    api: Arc<dyn WidgetApi>,
    needs_render: bool,
}

impl BaseBlock {
    pub fn new(api: Arc<dyn WidgetApi>) -> Self {
        let content_language = api.content_language();
        Self {
            instance_id: Uuid::new_v4(),
            attributes: AttributeMap::new(),
            content_language,
            api,
            needs_render: true,
        }
    }

    /// Unique id of this element instance.
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Language of the content surrounding the element, e.g. `en_US`.
    pub fn content_language(&self) -> &str {
        &self.content_language
    }

    /// The host helper surface backing this element.
    pub fn api(&self) -> &Arc<dyn WidgetApi> {
        &self.api
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Store an attribute write coming from the host's element machinery.
    /// Returns the previous value.
    pub(crate) fn write_attribute(&mut self, name: &str, value: Option<&str>) -> Option<String> {
        match value {
            Some(value) => self.attributes.insert(name.to_string(), value.to_string()),
            None => self.attributes.remove(name),
        }
    }

    /// Default attribute-changed handling: note the change and mark the
    /// element for re-render. The host drives the actual render pass.
    pub fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        debug!(
            "element {}: attribute {:?} changed {:?} -> {:?}",
            self.instance_id, name, old, new
        );
        self.needs_render = true;
    }

    /// Whether a render pass is due.
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    pub(crate) fn mark_rendered(&mut self) {
        self.needs_render = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::widget_api::StaticDirectory;

    fn base() -> BaseBlock {
        BaseBlock::new(Arc::new(StaticDirectory::new(Vec::new()).with_language("de_DE")))
    }

    #[test]
    fn test_new_element_needs_initial_render() {
        let base = base();
        assert!(base.needs_render());
        assert_eq!(base.content_language(), "de_DE");
        assert!(base.attributes().is_empty());
    }

    #[test]
    fn test_write_attribute_returns_previous_value() {
        let mut base = base();
        assert_eq!(base.write_attribute("title", Some("Hi")), None);
        assert_eq!(base.write_attribute("title", Some("Hello")), Some("Hi".to_string()));
        assert_eq!(base.attribute("title"), Some("Hello"));
        assert_eq!(base.write_attribute("title", None), Some("Hello".to_string()));
        assert_eq!(base.attribute("title"), None);
    }

    #[test]
    fn test_attribute_changed_marks_for_render() {
        let mut base = base();
        base.mark_rendered();
        assert!(!base.needs_render());

        base.attribute_changed("title", None, Some("Hello"));
        assert!(base.needs_render());
    }

    #[test]
    fn test_instance_ids_are_unique() {
        assert_ne!(base().instance_id(), base().instance_id());
    }
}
