//! Start-date resolution, windowing and grouping for the new-joiners view.
//!
//! Profiles carry their start date as a string field, `day.month` or
//! `month.day` with an optional trailing year. Each render the engine
//! resolves every profile's next occurrence of that calendar day, keeps the
//! ones inside the configured display window and arranges them into headed
//! groups. Profiles that do not resolve (missing field, malformed value,
//! filtered out) are skipped, unparseable dates noted at debug level; one
//! bad profile never hides the rest.

use chrono::{Datelike, Days, NaiveDate};
use log::debug;

use crate::core::UserProfile;
use crate::widget::props::{DateFormat, NewJoinersProps};

/// A profile's stored start date: calendar day plus the start year when the
/// stored value carried one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartDate {
    pub day: u32,
    pub month: u32,
    pub year: Option<i32>,
}

impl StartDate {
    /// Parse a stored value in the configured format. `DD.MM` reads
    /// day-dot-month, `MM.DD` month-dot-day; both accept a trailing
    /// `.YYYY`. Anything that does not name a real calendar day reads as
    /// `None`.
    pub fn parse(raw: &str, format: DateFormat) -> Option<Self> {
        let mut parts = raw.trim().split('.');
        let first: u32 = parts.next()?.trim().parse().ok()?;
        let second: u32 = parts.next()?.trim().parse().ok()?;
        let year: Option<i32> = match parts.next() {
            Some(part) => Some(part.trim().parse().ok()?),
            None => None,
        };
        if parts.next().is_some() {
            return None;
        }

        let (day, month) = match format {
            DateFormat::DayMonth => (first, second),
            DateFormat::MonthDay => (second, first),
        };
        // validity check in a leap year so Feb 29 passes
        NaiveDate::from_ymd_opt(2000, month, day)?;
        Some(Self { day, month, year })
    }

    /// The occurrence of this calendar day in `year`. Feb 29 falls back to
    /// Feb 28 outside leap years.
    fn occurrence_in(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day).or_else(|| {
            if self.month == 2 && self.day == 29 {
                NaiveDate::from_ymd_opt(year, 2, 28)
            } else {
                None
            }
        })
    }
}

/// One displayable profile with its resolved occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinerEntry {
    pub profile: UserProfile,
    /// The occurrence inside the display window this entry is shown for.
    pub occurrence: NaiveDate,
    /// Completed years since the stored start, when the stored value
    /// carried a year.
    pub years: Option<i32>,
}

/// An ordered run of entries under one (possibly absent) heading.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinerGroup {
    pub heading: Option<String>,
    pub entries: Vec<JoinerEntry>,
}

/// Resolve, filter, sort and group `profiles` for display on `today`.
pub fn collect(
    profiles: &[UserProfile],
    props: &NewJoinersProps,
    today: NaiveDate,
) -> Vec<JoinerGroup> {
    let special_years = props.special_year_list();

    let mut entries: Vec<JoinerEntry> = profiles
        .iter()
        .filter(|profile| passes_filters(profile, props))
        .filter_map(|profile| resolve_entry(profile, props, today))
        .filter(|entry| {
            special_years.is_empty() || entry.years.is_some_and(|y| special_years.contains(&y))
        })
        .collect();

    entries.sort_by(|a, b| {
        (a.occurrence, &a.profile.last_name, &a.profile.first_name).cmp(&(
            b.occurrence,
            &b.profile.last_name,
            &b.profile.first_name,
        ))
    });

    if props.groups_by_years() {
        year_groups(entries, props)
    } else {
        date_sections(entries, props, today)
    }
}

/// Apply the profile-field filter and the opt-out field.
fn passes_filters(profile: &UserProfile, props: &NewJoinersProps) -> bool {
    if let Some(filter_field) = props.field_filter.as_deref() {
        match (profile.field(filter_field), props.field_value.as_deref()) {
            // with a configured value the field must match it exactly
            (Some(actual), Some(wanted)) => {
                if actual != wanted.trim() {
                    return false;
                }
            }
            // without one the field merely has to be present
            (Some(_), None) => {}
            (None, _) => return false,
        }
    }

    if let Some(opt_out_field) = props.opt_out_field.as_deref() {
        if let Some(actual) = profile.field(opt_out_field) {
            match props.opt_out_value.as_deref() {
                Some(wanted) => {
                    if actual == wanted.trim() {
                        return false;
                    }
                }
                // any value in the field opts the user out
                None => return false,
            }
        }
    }

    true
}

/// Parse the profile's start date and place it on the calendar, or `None`
/// when the profile has nothing to show on `today`.
fn resolve_entry(
    profile: &UserProfile,
    props: &NewJoinersProps,
    today: NaiveDate,
) -> Option<JoinerEntry> {
    let field_id = props.anniversary_profile_field_id.as_deref()?;
    let raw = profile.field(field_id)?;
    let start = match StartDate::parse(raw, props.format()) {
        Some(start) => start,
        None => {
            debug!("profile {}: unparseable start date {:?}", profile.id, raw);
            return None;
        }
    };

    let occurrence = if props.whole_month_active(today) {
        if start.month != today.month() {
            return None;
        }
        start.occurrence_in(today.year())?
    } else {
        let window_start = today
            .checked_sub_days(Days::new(props.days_before()))
            .unwrap_or(NaiveDate::MIN);
        let window_end = today
            .checked_add_days(Days::new(props.days_after()))
            .unwrap_or(NaiveDate::MAX);

        // the window may straddle a year boundary, so try the surrounding
        // years and keep the earliest hit
        (today.year() - 1..=today.year() + 1)
            .filter_map(|year| start.occurrence_in(year))
            .filter(|occurrence| (window_start..=window_end).contains(occurrence))
            .min()?
    };

    let years = match start.year {
        Some(start_year) => {
            let years = occurrence.year() - start_year;
            // a start year after the occurrence means the person has not
            // joined yet
            if years < 0 {
                return None;
            }
            Some(years)
        }
        None => None,
    };

    Some(JoinerEntry {
        profile: profile.clone(),
        occurrence,
        years,
    })
}

/// Default arrangement: past, today and upcoming runs in date order, each
/// headed by its configured title (or nothing).
fn date_sections(
    entries: Vec<JoinerEntry>,
    props: &NewJoinersProps,
    today: NaiveDate,
) -> Vec<JoinerGroup> {
    let mut past = Vec::new();
    let mut current = Vec::new();
    let mut upcoming = Vec::new();
    for entry in entries {
        if entry.occurrence < today {
            past.push(entry);
        } else if entry.occurrence == today {
            current.push(entry);
        } else {
            upcoming.push(entry);
        }
    }

    let sections = [
        (props.days_before_title.clone(), past),
        (Some(props.today_heading().to_string()), current),
        (props.days_after_title.clone(), upcoming),
    ];

    sections
        .into_iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(heading, entries)| JoinerGroup { heading, entries })
        .collect()
}

/// Anniversary arrangement: one group per years-since-start, most senior
/// first. Entries whose stored date carries no year close the list in a
/// headerless group.
fn year_groups(entries: Vec<JoinerEntry>, props: &NewJoinersProps) -> Vec<JoinerGroup> {
    let mut by_years: Vec<(i32, Vec<JoinerEntry>)> = Vec::new();
    let mut yearless = Vec::new();

    for entry in entries {
        match entry.years {
            Some(years) => match by_years.iter_mut().find(|(y, _)| *y == years) {
                Some((_, group)) => group.push(entry),
                None => by_years.push((years, vec![entry])),
            },
            None => yearless.push(entry),
        }
    }
    by_years.sort_by(|a, b| b.0.cmp(&a.0));

    let mut groups: Vec<JoinerGroup> = by_years
        .into_iter()
        .map(|(years, entries)| {
            let heading = if props.hides_year_header() {
                None
            } else {
                Some(format!("{} {}", years, props.year_word_for(years)))
            };
            JoinerGroup { heading, entries }
        })
        .collect();

    if !yearless.is_empty() {
        groups.push(JoinerGroup {
            heading: None,
            entries: yearless,
        });
    }
    groups
}
