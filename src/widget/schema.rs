//! Configuration-dialog documents of the new-joiners widget.
//!
//! The host renders the settings form verbatim from these two documents.
//! Field order is form order. A handful of observed attributes stay out of
//! the dialog on purpose: they configure published legacy content but are
//! not offered for new configuration. The presentation schema still carries
//! hints for some dormant fields so re-enabling them needs no archeology.

use crate::schema::{
    ConfigurationSchema, DependentSchema, PropertyDependency, SchemaProperty, UiHints, UiSchema,
};

/// Structural schema of the configuration dialog.
pub fn configuration_schema() -> ConfigurationSchema {
    ConfigurationSchema::new()
        .property("title", SchemaProperty::string("Title"))
        .property("fieldfilter", SchemaProperty::string("Filter Profile Field ID"))
        .property("fieldvalue", SchemaProperty::string("Filter Profile Field Value"))
        .property("numbertoshow", SchemaProperty::number("Height (px)"))
        .property(
            "anniversaryprofilefieldid",
            SchemaProperty::string("Start Date Profile Field ID"),
        )
        .property(
            "dateformat",
            SchemaProperty::string("Date Format")
                .with_enum(["DD.MM", "MM.DD"])
                .with_default("MM.DD"),
        )
        .property(
            "showdate",
            SchemaProperty::boolean("Show Start Date?").with_default(true),
        )
        .property(
            "loadingmessage",
            SchemaProperty::string("Message when the widget is still loading"),
        )
        .property(
            "noinstancesmessage",
            SchemaProperty::string("Message when there are no applicable users"),
        )
        .property("yearword", SchemaProperty::string("Year Word"))
        .property("yearwordplural", SchemaProperty::string("Year Word Plural"))
        .property("includeyear", SchemaProperty::boolean("Split by Year"))
        .property(
            "showdaysbefore",
            SchemaProperty::number("Number of visible past days").with_default(0),
        )
        .property(
            "showdaysafter",
            SchemaProperty::number("Number of visible future days").with_default(30),
        )
        .property("specialyears", SchemaProperty::string("Special Years"))
        .property("headercolor", SchemaProperty::string("Header Color"))
        .property(
            "hideyearheader",
            SchemaProperty::boolean("Hide year header").with_default(false),
        )
        .property(
            "optoutfield",
            SchemaProperty::string("Profile Field ID for Opt Out Field"),
        )
        .property("optoutvalue", SchemaProperty::string("Value for Opt Out Field"))
        .property(
            "includepending",
            SchemaProperty::boolean("Include Pending Users").with_default(false),
        )
        .require("anniversaryprofilefieldid")
        .require("dateformat")
        .dependency(
            "includepending",
            PropertyDependency::one_of([DependentSchema::default()
                .property("includepending", SchemaProperty::default().with_enum([true]))
                .property("networkid", SchemaProperty::string("Network Plugin ID"))
                .require("networkid")]),
        )
}

/// Presentation hints for the configuration dialog.
pub fn ui_schema() -> UiSchema {
    let mut ui = UiSchema::default();
    ui.insert(
        "anniversaryprofilefieldid".to_string(),
        UiHints::help("Enter the profile field ID of the field that holds the date information"),
    );
    ui.insert(
        "groupid".to_string(),
        UiHints::help("The group ID for the group of users who should be shown"),
    );
    ui.insert(
        "dateformat".to_string(),
        UiHints::help("Enter the date format that the date is entered in."),
    );
    ui.insert(
        "includepending".to_string(),
        UiHints::help("Check to include pending users").hidden(),
    );
    ui.insert(
        "loadingmessage".to_string(),
        UiHints::help("Text that will be shown when the widget is still loading the users"),
    );
    ui.insert(
        "noinstancesmessage".to_string(),
        UiHints::help("Text that will be shown in the event that there are no applicable users"),
    );
    ui.insert("title".to_string(), UiHints::help("The title of the widget"));
    ui.insert(
        "todaytitle".to_string(),
        UiHints::help("The wording that will be shown above the users whose start date is today"),
    );
    ui.insert(
        "showdate".to_string(),
        UiHints::help("Select to show the user's date next to the user's name"),
    );
    ui.insert(
        "showwholemonth".to_string(),
        UiHints::help("Select to show all new joiners for the current month"),
    );
    ui.insert(
        "showwholemonthforxdays".to_string(),
        UiHints::help(
            "Number of days that the month's worth of new joiners should be shown \
             (starting at the beginning of the month)",
        ),
    );
    ui.insert(
        "showdaysbefore".to_string(),
        UiHints::help("The number of previous days for which corresponding instances should be shown"),
    );
    ui.insert(
        "daysbeforetitle".to_string(),
        UiHints::help("The message that appears at the top of previous joiners section"),
    );
    ui.insert(
        "showdaysafter".to_string(),
        UiHints::help("The number of upcoming days for which corresponding instances should be shown"),
    );
    ui.insert(
        "daysaftertitle".to_string(),
        UiHints::help("The message that appears at the top of upcoming joiners section"),
    );
    ui.insert(
        "fieldfilter".to_string(),
        UiHints::help("The profile field ID that will be used to filter users"),
    );
    ui.insert(
        "fieldvalue".to_string(),
        UiHints::help("The profile field value that will be used to filter users"),
    );
    ui.insert(
        "headercolor".to_string(),
        UiHints::help("Hexcode color of the Header"),
    );
    ui.insert(
        "additionalfieldsdisplayed".to_string(),
        UiHints::help("Profile Field IDs to show next to user's name separated by commas"),
    );
    ui.insert(
        "optoutgroupid".to_string(),
        UiHints::help("Group ID of opt out group. Users in this group will not be shown in the widget"),
    );
    ui.insert(
        "numbertoshow".to_string(),
        UiHints::help(
            "Enter the height of the widget (in pixels) Each profile is approximately 80 px. \
             If left blank, all profiles will be shown.",
        ),
    );
    ui
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_fields() {
        let schema = configuration_schema();
        assert_eq!(schema.required, ["anniversaryprofilefieldid", "dateformat"]);
    }

    #[test]
    fn test_form_field_order() {
        let schema = configuration_schema();
        let keys: Vec<&str> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "title",
                "fieldfilter",
                "fieldvalue",
                "numbertoshow",
                "anniversaryprofilefieldid",
                "dateformat",
                "showdate",
                "loadingmessage",
                "noinstancesmessage",
                "yearword",
                "yearwordplural",
                "includeyear",
                "showdaysbefore",
                "showdaysafter",
                "specialyears",
                "headercolor",
                "hideyearheader",
                "optoutfield",
                "optoutvalue",
                "includepending",
            ]
        );
    }

    #[test]
    fn test_date_format_choices() {
        let schema = configuration_schema();
        let value = serde_json::to_value(&schema).unwrap();
        let dateformat = &value["properties"]["dateformat"];
        assert_eq!(dateformat["enum"], json!(["DD.MM", "MM.DD"]));
        assert_eq!(dateformat["default"], json!("MM.DD"));
    }

    #[test]
    fn test_form_defaults() {
        let value = serde_json::to_value(configuration_schema()).unwrap();
        let properties = &value["properties"];
        assert_eq!(properties["showdate"]["default"], json!(true));
        assert_eq!(properties["showdaysbefore"]["default"], json!(0));
        assert_eq!(properties["showdaysafter"]["default"], json!(30));
        assert_eq!(properties["hideyearheader"]["default"], json!(false));
        assert_eq!(properties["includepending"]["default"], json!(false));
    }

    #[test]
    fn test_network_id_unlocked_by_pending_toggle() {
        let value = serde_json::to_value(configuration_schema()).unwrap();

        // networkid lives only behind the dependency
        assert!(value["properties"].get("networkid").is_none());

        let one_of = &value["dependencies"]["includepending"]["oneOf"][0];
        assert_eq!(one_of["properties"]["includepending"]["enum"], json!([true]));
        assert_eq!(one_of["properties"]["networkid"]["type"], json!("string"));
        assert_eq!(one_of["required"], json!(["networkid"]));
    }

    #[test]
    fn test_pending_toggle_is_hidden() {
        let ui = ui_schema();
        let value = serde_json::to_value(&ui).unwrap();
        assert_eq!(value["includepending"]["ui:hidden"], json!(true));
        assert_eq!(
            value["includepending"]["ui:help"],
            json!("Check to include pending users")
        );
    }

    #[test]
    fn test_hints_cover_dialog_and_dormant_fields() {
        let ui = ui_schema();
        // dialog fields
        assert!(ui.contains_key("anniversaryprofilefieldid"));
        assert!(ui.contains_key("numbertoshow"));
        // attribute-only fields
        assert!(ui.contains_key("todaytitle"));
        assert!(ui.contains_key("daysbeforetitle"));
        // dormant fields waiting to return to the dialog
        assert!(ui.contains_key("groupid"));
        assert!(ui.contains_key("optoutgroupid"));
    }
}
