//! Presentational rendering of the new-joiners widget.
//!
//! Pure markup generation: props and host data in, HTML out. All text that
//! originates in attributes or profile data is escaped here, directly
//! before it lands in markup.

use chrono::{Datelike, NaiveDate};

use crate::core::{DataState, UserProfile};
use crate::widget::joiners::{self, JoinerEntry, JoinerGroup};
use crate::widget::props::{DateFormat, NewJoinersProps};

/// Render the widget for `today`.
///
/// While the host is still fetching, this is the loading state. With data
/// and nothing to show it is the configured empty message, or no markup at
/// all when none is configured.
pub fn render(
    props: &NewJoinersProps,
    state: &DataState<Vec<UserProfile>>,
    today: NaiveDate,
) -> String {
    let body = match state {
        DataState::Loading => Some(format!(
            r#"<p class="nj-loading">{}</p>"#,
            escape(props.loading_text())
        )),
        DataState::Ready(profiles) => {
            let groups = joiners::collect(profiles, props, today);
            if groups.is_empty() {
                props
                    .no_instances_message
                    .as_deref()
                    .map(|message| format!(r#"<p class="nj-empty">{}</p>"#, escape(message)))
            } else {
                Some(render_groups(&groups, props))
            }
        }
    };

    let greeting = props
        .message
        .as_deref()
        .map(|message| format!(r#"<p class="nj-greeting">Hello {}</p>"#, escape(message)));

    if body.is_none() && greeting.is_none() {
        return String::new();
    }

    let mut html = String::from(r#"<div class="new-joiners-widget">"#);
    if let Some(greeting) = greeting {
        html.push_str(&greeting);
    }
    if let Some(body) = body {
        if let Some(title) = props.title.as_deref() {
            html.push_str(&format!(r#"<h2 class="nj-title">{}</h2>"#, escape(title)));
        }
        html.push_str(&body);
    }
    html.push_str("</div>");
    html
}

fn render_groups(groups: &[JoinerGroup], props: &NewJoinersProps) -> String {
    let height = props
        .number_to_show
        .map(|px| format!(r#" style="max-height: {px}px; overflow-y: auto;""#))
        .unwrap_or_default();

    let mut html = format!(r#"<div class="nj-list"{height}>"#);
    for group in groups {
        html.push_str(r#"<section class="nj-group">"#);
        if let Some(heading) = &group.heading {
            let color = props
                .header_color
                .as_deref()
                .map(|color| format!(r#" style="color: {};""#, escape(color)))
                .unwrap_or_default();
            html.push_str(&format!(
                r#"<h3 class="nj-heading"{color}>{}</h3>"#,
                escape(heading)
            ));
        }
        html.push_str(r#"<ul class="nj-entries">"#);
        for entry in &group.entries {
            html.push_str(&render_entry(entry, props));
        }
        html.push_str("</ul></section>");
    }
    html.push_str("</div>");
    html
}

fn render_entry(entry: &JoinerEntry, props: &NewJoinersProps) -> String {
    let mut html = String::from(r#"<li class="nj-entry">"#);

    if let Some(avatar_url) = &entry.profile.avatar_url {
        html.push_str(&format!(
            r#"<img class="nj-avatar" src="{}" alt="">"#,
            escape(avatar_url)
        ));
    }

    html.push_str(&format!(
        r#"<span class="nj-name">{}</span>"#,
        escape(&entry.profile.display_name())
    ));

    let extras = additional_field_values(&entry.profile, props);
    if !extras.is_empty() {
        html.push_str(&format!(
            r#"<span class="nj-meta">{}</span>"#,
            escape(&extras.join(", "))
        ));
    }

    if props.wants_date() {
        html.push_str(&format!(
            r#"<span class="nj-date">{}</span>"#,
            format_date(entry.occurrence, props.format())
        ));
    }

    // the year count doubles as a heading in split-by-year mode, so the
    // badge only appears in the default arrangement
    if !props.groups_by_years() {
        if let Some(years) = entry.years.filter(|y| *y > 0) {
            html.push_str(&format!(
                r#"<span class="nj-years">{} {}</span>"#,
                years,
                escape(props.year_word_for(years))
            ));
        }
    }

    html.push_str("</li>");
    html
}

fn additional_field_values(profile: &UserProfile, props: &NewJoinersProps) -> Vec<String> {
    props
        .additional_field_ids()
        .iter()
        .filter_map(|id| profile.field(id))
        .map(str::to_string)
        .collect()
}

/// The occurrence in the same order the dates are stored in.
fn format_date(date: NaiveDate, format: DateFormat) -> String {
    match format {
        DateFormat::DayMonth => format!("{:02}.{:02}", date.day(), date.month()),
        DateFormat::MonthDay => format!("{:02}.{:02}", date.month(), date.day()),
    }
}

/// Escape text for use in HTML content and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> NewJoinersProps {
        NewJoinersProps {
            anniversary_profile_field_id: Some("startdate".to_string()),
            date_format: Some(DateFormat::DayMonth),
            ..NewJoinersProps::default()
        }
    }

    fn profile(first: &str, last: &str, start: &str) -> UserProfile {
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

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_loading_state() {
        let html = render(&props(), &DataState::Loading, date(2024, 6, 15));
        assert!(html.contains(r#"<p class="nj-loading">Loading…</p>"#));

        let mut props = props();
        props.loading_message = Some("Fetching colleagues".to_string());
        let html = render(&props, &DataState::Loading, date(2024, 6, 15));
        assert!(html.contains("Fetching colleagues"));
        assert!(!html.contains("Loading…"));
    }

    #[test]
    fn test_empty_with_message() {
        let mut props = props();
        props.no_instances_message = Some("Nobody joining soon".to_string());
        props.title = Some("New Joiners".to_string());

        let html = render(&props, &DataState::Ready(Vec::new()), date(2024, 6, 15));
        assert!(html.contains(r#"<p class="nj-empty">Nobody joining soon</p>"#));
        assert!(html.contains(r#"<h2 class="nj-title">New Joiners</h2>"#));
    }

    #[test]
    fn test_empty_without_message_renders_nothing() {
        let mut props = props();
        props.title = Some("New Joiners".to_string());
        let html = render(&props, &DataState::Ready(Vec::new()), date(2024, 6, 15));
        assert_eq!(html, "");
    }

    #[test]
    fn test_greeting_message() {
        let mut props = props();
        props.content_language = "en_US".to_string();
        props.message = Some("World".to_string());
        let html = render(&props, &DataState::Ready(Vec::new()), date(2024, 6, 15));
        assert!(html.contains("Hello World"));
    }

    #[test]
    fn test_entries_and_title() {
        let mut props = props();
        props.title = Some("Welcome!".to_string());

        let profiles = vec![
            profile("Ada", "Lovelace", "20.06"),
            profile("Grace", "Hopper", "25.06"),
        ];
        let html = render(&props, &DataState::Ready(profiles), date(2024, 6, 15));

        assert!(html.contains(r#"<h2 class="nj-title">Welcome!</h2>"#));
        let ada = html.find("Ada Lovelace").unwrap();
        let grace = html.find("Grace Hopper").unwrap();
        assert!(ada < grace);
    }

    #[test]
    fn test_show_date_and_format() {
        let profiles = vec![profile("Ada", "Lovelace", "20.06")];
        let html = render(&props(), &DataState::Ready(profiles.clone()), date(2024, 6, 15));
        assert!(html.contains(r#"<span class="nj-date">20.06</span>"#));

        let mut props = props();
        props.show_date = Some(false);
        let html = render(&props, &DataState::Ready(profiles.clone()), date(2024, 6, 15));
        assert!(!html.contains("nj-date"));

        // month-day order follows the stored format
        let mut props = self::props();
        props.date_format = Some(DateFormat::MonthDay);
        let by_month_day = vec![profile("Ada", "Lovelace", "06.20")];
        let html = render(&props, &DataState::Ready(by_month_day), date(2024, 6, 15));
        assert!(html.contains(r#"<span class="nj-date">06.20</span>"#));
    }

    #[test]
    fn test_years_badge_outside_year_grouping() {
        let profiles = vec![profile("Vera", "Veteran", "20.06.2019")];
        let html = render(&props(), &DataState::Ready(profiles.clone()), date(2024, 6, 15));
        assert!(html.contains(r#"<span class="nj-years">5 Years</span>"#));

        let mut props = props();
        props.include_year = Some(true);
        let html = render(&props, &DataState::Ready(profiles), date(2024, 6, 15));
        assert!(html.contains(r#"<h3 class="nj-heading">5 Years</h3>"#));
        assert!(!html.contains("nj-years"));
    }

    #[test]
    fn test_header_color_and_height() {
        let mut props = props();
        props.today_title = Some("Today".to_string());
        props.header_color = Some("#ff0000".to_string());
        props.number_to_show = Some(240);

        let profiles = vec![profile("Tim", "Today", "15.06")];
        let html = render(&props, &DataState::Ready(profiles), date(2024, 6, 15));

        assert!(html.contains(r#"<h3 class="nj-heading" style="color: #ff0000;">Today</h3>"#));
        assert!(html.contains(r#"style="max-height: 240px; overflow-y: auto;""#));
    }

    #[test]
    fn test_header_color_cannot_break_out_of_its_attribute() {
        let mut props = props();
        props.today_title = Some("Today".to_string());
        props.header_color = Some(r#"#f00" onmouseover="boom"#.to_string());

        let profiles = vec![profile("Tim", "Today", "15.06")];
        let html = render(&props, &DataState::Ready(profiles), date(2024, 6, 15));
        assert!(!html.contains(r#"" onmouseover=""#));
        assert!(html.contains("&quot; onmouseover=&quot;boom"));
    }

    #[test]
    fn test_additional_fields() {
        let mut props = props();
        props.additional_fields_displayed = Some("department, office".to_string());

        let mut ada = profile("Ada", "Lovelace", "20.06");
        ada.fields
            .insert("department".to_string(), "Engineering".to_string());
        ada.fields.insert("office".to_string(), "London".to_string());

        let html = render(&props, &DataState::Ready(vec![ada]), date(2024, 6, 15));
        assert!(html.contains(r#"<span class="nj-meta">Engineering, London</span>"#));
    }

    #[test]
    fn test_avatar() {
        let mut ada = profile("Ada", "Lovelace", "20.06");
        ada.avatar_url = Some("https://example.test/ada.png".to_string());

        let html = render(&props(), &DataState::Ready(vec![ada]), date(2024, 6, 15));
        assert!(html.contains(r#"<img class="nj-avatar" src="https://example.test/ada.png" alt="">"#));
    }

    #[test]
    fn test_attribute_text_is_escaped() {
        let mut props = props();
        props.title = Some("<script>alert('x')</script>".to_string());
        props.message = Some("Tom & Jerry".to_string());

        let mut sly = profile("Sly", "<b>Bold</b>", "20.06");
        sly.fields
            .insert("startdate".to_string(), "20.06".to_string());

        let html = render(&props, &DataState::Ready(vec![sly]), date(2024, 6, 15));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Hello Tom &amp; Jerry"));
        assert!(html.contains("Sly &lt;b&gt;Bold&lt;/b&gt;"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut props = props();
        props.title = Some("Welcome".to_string());
        let profiles = vec![profile("Ada", "Lovelace", "20.06")];
        let state = DataState::Ready(profiles);

        let first = render(&props, &state, date(2024, 6, 15));
        let second = render(&props, &state, date(2024, 6, 15));
        assert_eq!(first, second);
    }
}
