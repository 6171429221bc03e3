//! The new-joiners widget: block behavior, definition and registration.
//!
//! `<new-joiners-widget>` lists colleagues whose start date falls into a
//! configurable window around today, fed from the host's user directory and
//! configured entirely through element attributes.

pub mod joiners;
pub mod props;
pub mod schema;
pub mod view;

use anyhow::Result;

use crate::core::{
    define_block, BaseBlock, Block, BlockDefinition, BlockLevel, BoxedBlock, Container, DataState,
    ExternalBlockDefinition, RegistryError, UserProfile,
};
use crate::widget::props::NewJoinersProps;

/// Element name the widget registers under.
pub const WIDGET_NAME: &str = "new-joiners-widget";

/// Attributes handled by the widget. This is also reflected in the
/// configuration schema.
pub const WIDGET_ATTRIBUTES: &[&str] = &[
    "anniversaryprofilefieldid",
    "dateformat",
    "includepending",
    "loadingmessage",
    "noinstancesmessage",
    "title",
    "todaytitle",
    "yearword",
    "yearwordplural",
    "showdate",
    "showwholemonth",
    "showwholemonthforxdays",
    "showdaysbefore",
    "showdaysafter",
    "specialyears",
    "hideyearheader",
    "imageurl",
    "linktochat",
    "limit",
    "headercolor",
    "additionalfieldsdisplayed",
    "includeyear",
    "daysbeforetitle",
    "daysaftertitle",
    "networkid",
    "numbertoshow",
    "fieldfilter",
    "fieldvalue",
    "optoutfield",
    "optoutvalue",
];

/// Behavior of one `<new-joiners-widget>` element.
pub struct NewJoinersBlock {
    base: BaseBlock,
}

impl NewJoinersBlock {
    pub fn new(base: BaseBlock) -> Self {
        Self { base }
    }

    /// Typed props of this instance: the parsed attributes plus the content
    /// language.
    fn props(&self) -> NewJoinersProps {
        NewJoinersProps::from_attributes(self.base.attributes(), self.base.content_language())
    }

    /// Active profiles merged with pending ones when configured. Loading
    /// until every contributing fetch has finished.
    fn profile_state(&self, props: &NewJoinersProps) -> DataState<Vec<UserProfile>> {
        let api = self.base.api();
        let active = api.user_profiles();
        let pending = match props.pending_network() {
            Some(network_id) => api.pending_profiles(network_id),
            None => DataState::Ready(Vec::new()),
        };
        match (active, pending) {
            (DataState::Ready(mut profiles), DataState::Ready(pending)) => {
                profiles.extend(pending);
                DataState::Ready(profiles)
            }
            _ => DataState::Loading,
        }
    }
}

impl Block for NewJoinersBlock {
    fn observed_attributes(&self) -> &'static [&'static str] {
        WIDGET_ATTRIBUTES
    }

    fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        self.base.attribute_changed(name, old, new);
    }

    fn render(&mut self, container: &mut Container) -> Result<()> {
        let props = self.props();
        let state = self.profile_state(&props);
        let today = self.base.api().today();
        container.mount(view::render(&props, &state, today));
        Ok(())
    }

    fn base(&self) -> &BaseBlock {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseBlock {
        &mut self.base
    }
}

fn factory(base: BaseBlock) -> BoxedBlock {
    Box::new(NewJoinersBlock::new(base))
}

/// The definition of the block, as the hosting application's catalog and
/// element machinery consume it.
pub fn block_definition() -> BlockDefinition {
    BlockDefinition {
        name: WIDGET_NAME.to_string(),
        factory,
        attributes: WIDGET_ATTRIBUTES,
        block_level: BlockLevel::Block,
        configuration_schema: schema::configuration_schema(),
        ui_schema: schema::ui_schema(),
        label: "New Joiners Widget".to_string(),
        icon_url: "https://cc-scripts.staffbase.com/new-joiners-widget/new-joiners.png"
            .to_string(),
    }
}

/// Register the widget with the global registry. This call is mandatory for
/// the hosting application to pick the block up.
pub fn register() -> Result<(), RegistryError> {
    define_block(ExternalBlockDefinition {
        definition: block_definition(),
        author: env!("CARGO_PKG_AUTHORS").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::core::{create_element, Element, StaticDirectory};

    fn sample_profile(first: &str, last: &str, start: &str) -> UserProfile {
        let mut profile = UserProfile {
            id: format!("{first}.{last}"),
            first_name: first.to_string(),
            last_name: last.to_string(),
            ..UserProfile::default()
        };
        profile
            .fields
            .insert("startdate".to_string(), start.to_string());
        profile
    }

    fn element_with(api: StaticDirectory) -> Element {
        let mut registry = crate::core::BlockRegistry::new();
        registry
            .define(ExternalBlockDefinition {
                definition: block_definition(),
                author: "Tests".to_string(),
                version: "0.0.0".to_string(),
            })
            .unwrap();
        registry.create_element(WIDGET_NAME, Arc::new(api)).unwrap()
    }

    fn configure(element: &mut Element) {
        element.set_attribute("anniversaryprofilefieldid", "startdate");
        element.set_attribute("dateformat", "DD.MM");
    }

    #[test]
    fn test_definition_matches_catalog_entry() {
        let definition = block_definition();
        assert_eq!(definition.name, "new-joiners-widget");
        assert_eq!(definition.label, "New Joiners Widget");
        assert_eq!(definition.block_level, BlockLevel::Block);
        assert_eq!(definition.attributes, WIDGET_ATTRIBUTES);
        assert_eq!(WIDGET_ATTRIBUTES.len(), 30);
        assert!(definition.icon_url.ends_with("new-joiners.png"));
        assert_eq!(
            definition.configuration_schema.required,
            ["anniversaryprofilefieldid", "dateformat"]
        );
    }

    #[test]
    fn test_schema_only_offers_observed_attributes() {
        let definition = block_definition();
        for name in definition.configuration_schema.properties.keys() {
            assert!(
                WIDGET_ATTRIBUTES.contains(&name.as_str()),
                "schema offers unobserved attribute {name:?}"
            );
        }
    }

    #[test]
    fn test_loading_until_directory_arrives() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let mut element = element_with(StaticDirectory::loading().with_today(today));
        configure(&mut element);

        let mut container = Container::new();
        element.render(&mut container).unwrap();
        assert!(container.html().contains("nj-loading"));
    }

    #[test]
    fn test_renders_profiles_from_directory() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let api = StaticDirectory::new(vec![
            sample_profile("Ada", "Lovelace", "20.06"),
            sample_profile("Out", "OfWindow", "20.12"),
        ])
        .with_today(today);

        let mut element = element_with(api);
        configure(&mut element);

        let mut container = Container::new();
        element.render(&mut container).unwrap();
        assert!(container.html().contains("Ada Lovelace"));
        assert!(!container.html().contains("OfWindow"));
    }

    #[test]
    fn test_attribute_change_flows_into_next_render() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let api =
            StaticDirectory::new(vec![sample_profile("Ada", "Lovelace", "20.06")]).with_today(today);
        let mut element = element_with(api);
        configure(&mut element);

        let mut container = Container::new();
        element.render(&mut container).unwrap();
        assert!(!element.needs_render());

        element.set_attribute("title", "Welcome aboard");
        assert!(element.needs_render());
        element.render(&mut container).unwrap();
        assert!(container.html().contains("Welcome aboard"));
    }

    #[test]
    fn test_pending_profiles_need_switch_and_network() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let api = StaticDirectory::new(vec![sample_profile("Ada", "Lovelace", "20.06")])
            .with_pending(vec![sample_profile("Pia", "Pending", "21.06")])
            .with_today(today);
        let mut element = element_with(api);
        configure(&mut element);
        let mut container = Container::new();

        // switch alone is not enough
        element.set_attribute("includepending", "true");
        element.render(&mut container).unwrap();
        assert!(!container.html().contains("Pia Pending"));

        element.set_attribute("networkid", "net-1");
        element.render(&mut container).unwrap();
        assert!(container.html().contains("Pia Pending"));
    }

    #[test]
    fn test_props_carry_content_language() {
        let api = Arc::new(StaticDirectory::new(Vec::new()).with_language("de_DE"));
        let block = NewJoinersBlock::new(BaseBlock::new(api));
        assert_eq!(block.props().content_language, "de_DE");
    }

    #[test]
    fn test_register_with_global_registry() {
        match register() {
            // another test may have registered the widget already
            Ok(()) | Err(RegistryError::DuplicateBlock(_)) => {}
            Err(other) => panic!("unexpected registry error: {other}"),
        }

        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let api = Arc::new(
            StaticDirectory::new(vec![sample_profile("Ada", "Lovelace", "20.06")])
                .with_today(today),
        );
        let mut element = create_element(WIDGET_NAME, api).unwrap();
        configure(&mut element);

        let mut container = Container::new();
        element.render(&mut container).unwrap();
        assert!(container.html().contains("Ada Lovelace"));
    }
}
