//! Typed props of the new-joiners widget and the attribute adapter that
//! produces them.
//!
//! The hosting platform transports configuration exclusively as string
//! attributes on the element. [`NewJoinersProps::from_attributes`] is the
//! single place those strings become typed values; parsing is tolerant, a
//! value that does not parse reads as unset and the defaults apply.

use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::AttributeMap;

/// Order of day and month in stored start-date values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    #[serde(rename = "DD.MM")]
    DayMonth,
    #[default]
    #[serde(rename = "MM.DD")]
    MonthDay,
}

impl DateFormat {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("DD.MM") {
            Some(DateFormat::DayMonth)
        } else if value.eq_ignore_ascii_case("MM.DD") {
            Some(DateFormat::MonthDay)
        } else {
            debug!("unrecognized date format {value:?}");
            None
        }
    }
}

/// Configuration of one widget instance, parsed from element attributes.
///
/// Every attribute-backed field is optional; absent means "use the
/// default". `message` has no attribute, it is set programmatically by
/// embedders and omitted from serialization while unset, so the serialized
/// key set of a fully configured instance is exactly the attribute names
/// plus `contentLanguage`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewJoinersProps {
    #[serde(rename = "anniversaryprofilefieldid", skip_serializing_if = "Option::is_none")]
    pub anniversary_profile_field_id: Option<String>,
    #[serde(rename = "dateformat", skip_serializing_if = "Option::is_none")]
    pub date_format: Option<DateFormat>,
    #[serde(rename = "includepending", skip_serializing_if = "Option::is_none")]
    pub include_pending: Option<bool>,
    #[serde(rename = "loadingmessage", skip_serializing_if = "Option::is_none")]
    pub loading_message: Option<String>,
    #[serde(rename = "noinstancesmessage", skip_serializing_if = "Option::is_none")]
    pub no_instances_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "todaytitle", skip_serializing_if = "Option::is_none")]
    pub today_title: Option<String>,
    #[serde(rename = "yearword", skip_serializing_if = "Option::is_none")]
    pub year_word: Option<String>,
    #[serde(rename = "yearwordplural", skip_serializing_if = "Option::is_none")]
    pub year_word_plural: Option<String>,
    #[serde(rename = "showdate", skip_serializing_if = "Option::is_none")]
    pub show_date: Option<bool>,
    #[serde(rename = "showwholemonth", skip_serializing_if = "Option::is_none")]
    pub show_whole_month: Option<bool>,
    #[serde(rename = "showwholemonthforxdays", skip_serializing_if = "Option::is_none")]
    pub show_whole_month_for_x_days: Option<u32>,
    #[serde(rename = "showdaysbefore", skip_serializing_if = "Option::is_none")]
    pub show_days_before: Option<u32>,
    #[serde(rename = "showdaysafter", skip_serializing_if = "Option::is_none")]
    pub show_days_after: Option<u32>,
    #[serde(rename = "specialyears", skip_serializing_if = "Option::is_none")]
    pub special_years: Option<String>,
    #[serde(rename = "hideyearheader", skip_serializing_if = "Option::is_none")]
    pub hide_year_header: Option<bool>,
    /// Legacy surface kept for published content; current rendering ignores
    /// it.
    #[serde(rename = "imageurl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Legacy surface kept for published content; current rendering ignores
    /// it.
    #[serde(rename = "linktochat", skip_serializing_if = "Option::is_none")]
    pub link_to_chat: Option<String>,
    /// Legacy surface kept for published content; current rendering ignores
    /// it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "headercolor", skip_serializing_if = "Option::is_none")]
    pub header_color: Option<String>,
    #[serde(rename = "additionalfieldsdisplayed", skip_serializing_if = "Option::is_none")]
    pub additional_fields_displayed: Option<String>,
    #[serde(rename = "includeyear", skip_serializing_if = "Option::is_none")]
    pub include_year: Option<bool>,
    #[serde(rename = "daysbeforetitle", skip_serializing_if = "Option::is_none")]
    pub days_before_title: Option<String>,
    #[serde(rename = "daysaftertitle", skip_serializing_if = "Option::is_none")]
    pub days_after_title: Option<String>,
    #[serde(rename = "networkid", skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(rename = "numbertoshow", skip_serializing_if = "Option::is_none")]
    pub number_to_show: Option<u32>,
    #[serde(rename = "fieldfilter", skip_serializing_if = "Option::is_none")]
    pub field_filter: Option<String>,
    #[serde(rename = "fieldvalue", skip_serializing_if = "Option::is_none")]
    pub field_value: Option<String>,
    #[serde(rename = "optoutfield", skip_serializing_if = "Option::is_none")]
    pub opt_out_field: Option<String>,
    #[serde(rename = "optoutvalue", skip_serializing_if = "Option::is_none")]
    pub opt_out_value: Option<String>,
    #[serde(rename = "contentLanguage")]
    pub content_language: String,
    /// Programmatic greeting, not attribute-backed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewJoinersProps {
    /// Parse the host-supplied attribute strings into typed props.
    pub fn from_attributes(attrs: &AttributeMap, content_language: &str) -> Self {
        Self {
            anniversary_profile_field_id: text(attrs, "anniversaryprofilefieldid"),
            date_format: text(attrs, "dateformat").and_then(|v| DateFormat::parse(&v)),
            include_pending: flag(attrs, "includepending"),
            loading_message: text(attrs, "loadingmessage"),
            no_instances_message: text(attrs, "noinstancesmessage"),
            title: text(attrs, "title"),
            today_title: text(attrs, "todaytitle"),
            year_word: text(attrs, "yearword"),
            year_word_plural: text(attrs, "yearwordplural"),
            show_date: flag(attrs, "showdate"),
            show_whole_month: flag(attrs, "showwholemonth"),
            show_whole_month_for_x_days: count(attrs, "showwholemonthforxdays"),
            show_days_before: count(attrs, "showdaysbefore"),
            show_days_after: count(attrs, "showdaysafter"),
            special_years: text(attrs, "specialyears"),
            hide_year_header: flag(attrs, "hideyearheader"),
            image_url: text(attrs, "imageurl"),
            link_to_chat: text(attrs, "linktochat"),
            limit: count(attrs, "limit"),
            header_color: text(attrs, "headercolor"),
            additional_fields_displayed: text(attrs, "additionalfieldsdisplayed"),
            include_year: flag(attrs, "includeyear"),
            days_before_title: text(attrs, "daysbeforetitle"),
            days_after_title: text(attrs, "daysaftertitle"),
            network_id: text(attrs, "networkid"),
            number_to_show: count(attrs, "numbertoshow"),
            field_filter: text(attrs, "fieldfilter"),
            field_value: text(attrs, "fieldvalue"),
            opt_out_field: text(attrs, "optoutfield"),
            opt_out_value: text(attrs, "optoutvalue"),
            content_language: content_language.to_string(),
            message: None,
        }
    }

    /// Stored-date order, `MM.DD` when unconfigured.
    pub fn format(&self) -> DateFormat {
        self.date_format.unwrap_or_default()
    }

    /// Days before today the display window reaches back.
    pub fn days_before(&self) -> u64 {
        u64::from(self.show_days_before.unwrap_or(0))
    }

    /// Days after today the display window reaches forward.
    pub fn days_after(&self) -> u64 {
        u64::from(self.show_days_after.unwrap_or(30))
    }

    /// Whether whole-month mode applies on `today`: configured on, and
    /// either unlimited or still within the first x days of the month.
    pub fn whole_month_active(&self, today: NaiveDate) -> bool {
        if self.show_whole_month != Some(true) {
            return false;
        }
        match self.show_whole_month_for_x_days {
            Some(x) => today.day() <= x,
            None => true,
        }
    }

    /// Defaults on, matching the dialog's pre-selected checkbox.
    pub fn wants_date(&self) -> bool {
        self.show_date.unwrap_or(true)
    }

    pub fn groups_by_years(&self) -> bool {
        self.include_year.unwrap_or(false)
    }

    pub fn hides_year_header(&self) -> bool {
        self.hide_year_header.unwrap_or(false)
    }

    /// Pending users are merged only when switched on and a network id is
    /// configured.
    pub fn pending_network(&self) -> Option<&str> {
        if self.include_pending == Some(true) {
            self.network_id.as_deref()
        } else {
            None
        }
    }

    pub fn loading_text(&self) -> &str {
        self.loading_message.as_deref().unwrap_or("Loading…")
    }

    pub fn today_heading(&self) -> &str {
        self.today_title.as_deref().unwrap_or("Today")
    }

    /// The configured word for "year", singular or plural as `years` needs.
    pub fn year_word_for(&self, years: i32) -> &str {
        if years == 1 {
            self.year_word.as_deref().unwrap_or("Year")
        } else {
            self.year_word_plural.as_deref().unwrap_or("Years")
        }
    }

    /// Milestone years to restrict the display to, e.g. `5,10,25`. Empty
    /// when unconfigured; unparseable parts are skipped.
    pub fn special_year_list(&self) -> Vec<i32> {
        match &self.special_years {
            Some(raw) => raw
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .filter_map(|part| part.parse().ok())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Profile field ids shown next to each name.
    pub fn additional_field_ids(&self) -> Vec<String> {
        match &self.additional_fields_displayed {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }
}

/// A trimmed attribute value, `None` when absent or blank.
fn text(attrs: &AttributeMap, name: &str) -> Option<String> {
    let value = attrs.get(name)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn flag(attrs: &AttributeMap, name: &str) -> Option<bool> {
    let value = text(attrs, name)?;
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => {
            debug!("attribute {name}: unrecognized boolean {value:?}");
            None
        }
    }
}

fn count(attrs: &AttributeMap, name: &str) -> Option<u32> {
    let value = text(attrs, name)?;
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            debug!("attribute {name}: not a number: {value:?}");
            None
        }
    }
}
