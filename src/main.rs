use chrono::{Datelike, Duration, Local, NaiveDate};
use clap::Parser;
use log::{error, info, warn};
use new_joiners_widget::core::{
    create_element, with_registry, Container, StaticDirectory, UserProfile,
};
use new_joiners_widget::widget;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

/// new-joiners-widget - Render the embeddable new-joiners block outside a host
#[derive(Parser, Debug, Clone)]
#[command(name = "new-joiners-widget")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with attribute values, as an object (e.g., {"title": "New faces"})
    #[arg(short = 'c', long = "attributes", value_name = "FILE")]
    attributes: Option<PathBuf>,

    /// JSON file with an array of user profiles to render
    #[arg(short = 'p', long = "profiles", value_name = "FILE")]
    profiles: Option<PathBuf>,

    /// Write the rendered page to a file instead of stdout
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    out: Option<PathBuf>,

    /// Render as of this date instead of today (e.g., --today=2024-06-15)
    #[arg(long = "today", value_name = "DATE")]
    today: Option<NaiveDate>,

    /// Content language reported to the widget
    #[arg(long = "language", value_name = "TAG", default_value = "en_US")]
    language: String,

    /// Render the loading state instead of profile data
    #[arg(long = "loading")]
    loading: bool,

    /// List registered blocks and exit
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logger with verbosity based on -d/--debug flag
    // Level 0 (default): warn only (quiet)
    // Level 1: info (normal verbosity)
    // Level 2: debug (detailed)
    // Level 3+: trace (very detailed)
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting new-joiners-widget v{}", env!("CARGO_PKG_VERSION"));

    // Register the built-in block
    if let Err(e) = widget::register() {
        error!("Failed to register the widget block: {}", e);
        process::exit(1);
    }

    // Handle --list option (list registered blocks and exit)
    if cli.list {
        for name in with_registry(|registry| registry.list_blocks()) {
            println!("{}", name);
        }
        return;
    }

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let api = if cli.loading {
        StaticDirectory::loading()
    } else {
        let profiles = match &cli.profiles {
            Some(path) => match load_profiles(path) {
                Ok(profiles) => {
                    info!("Loaded {} profiles from {:?}", profiles.len(), path);
                    profiles
                }
                Err(e) => {
                    error!("Failed to load profiles from {:?}: {}", path, e);
                    process::exit(1);
                }
            },
            None => sample_profiles(today),
        };
        StaticDirectory::new(profiles)
    };
    let api = api.with_language(&cli.language).with_today(today);

    let mut element = match create_element(widget::WIDGET_NAME, Arc::new(api)) {
        Ok(element) => element,
        Err(e) => {
            error!("Failed to create the widget element: {}", e);
            process::exit(1);
        }
    };

    let attributes = match &cli.attributes {
        Some(path) => match load_attributes(path) {
            Ok(attributes) => {
                info!("Loaded {} attributes from {:?}", attributes.len(), path);
                attributes
            }
            Err(e) => {
                error!("Failed to load attributes from {:?}: {}", path, e);
                process::exit(1);
            }
        },
        None => sample_attributes(),
    };

    for (name, value) in &attributes {
        if !widget::WIDGET_ATTRIBUTES.contains(&name.as_str()) {
            warn!("Attribute {:?} is not observed by the widget", name);
        }
        element.set_attribute(name, value);
    }

    let mut container = Container::new();
    if let Err(e) = element.render(&mut container) {
        error!("Failed to render the widget: {}", e);
        process::exit(1);
    }

    let page = wrap_page(container.html());
    match &cli.out {
        Some(path) => match std::fs::write(path, &page) {
            Ok(()) => info!("Wrote rendered page to {:?}", path),
            Err(e) => {
                error!("Failed to write {:?}: {}", path, e);
                process::exit(1);
            }
        },
        None => println!("{}", page),
    }
}

/// Load user profiles from a JSON array file.
fn load_profiles(path: &Path) -> anyhow::Result<Vec<UserProfile>> {
    let raw = std::fs::read_to_string(path)?;
    let profiles = serde_json::from_str(&raw)?;
    Ok(profiles)
}

/// Load attribute values from a JSON object file.
///
/// Non-string values are carried over in their JSON spelling, matching how
/// hosts stringify attribute writes.
fn load_attributes(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let object = value
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("expected a JSON object of attribute values"))?;

    let mut attributes = BTreeMap::new();
    for (name, value) in object {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        attributes.insert(name.clone(), value);
    }
    Ok(attributes)
}

/// Built-in sample directory used when no profiles file is given.
///
/// Start dates are laid out relative to `today` so every section of the
/// default attribute set has entries.
fn sample_profiles(today: NaiveDate) -> Vec<UserProfile> {
    let entries: [(&str, &str, i64, Option<i32>, Option<&str>); 5] = [
        ("Alan", "Turing", -3, None, Some("Research")),
        ("Ada", "Lovelace", 0, Some(today.year()), Some("Engineering")),
        ("Grace", "Hopper", 9, Some(today.year() - 5), None),
        ("Edsger", "Dijkstra", 20, Some(today.year() - 1), None),
        ("Barbara", "Liskov", 27, None, Some("Engineering")),
    ];

    entries
        .into_iter()
        .enumerate()
        .map(|(index, (first, last, offset, year, department))| {
            let date = today
                .checked_add_signed(Duration::days(offset))
                .unwrap_or(today);
            let mut start = format!("{:02}.{:02}", date.day(), date.month());
            if let Some(year) = year {
                start.push_str(&format!(".{year}"));
            }

            let mut fields = BTreeMap::new();
            fields.insert("startdate".to_string(), start);
            if let Some(department) = department {
                fields.insert("department".to_string(), department.to_string());
            }

            UserProfile {
                id: format!("sample-{index}"),
                first_name: first.to_string(),
                last_name: last.to_string(),
                avatar_url: None,
                fields,
            }
        })
        .collect()
}

/// Attribute values used when no attributes file is given.
fn sample_attributes() -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();
    for (name, value) in [
        ("anniversaryprofilefieldid", "startdate"),
        ("dateformat", "DD.MM"),
        ("title", "New faces this month"),
        ("todaytitle", "Starting today"),
        ("daysbeforetitle", "Recently joined"),
        ("daysaftertitle", "Joining soon"),
        ("showdaysbefore", "7"),
        ("additionalfieldsdisplayed", "department"),
    ] {
        attributes.insert(name.to_string(), value.to_string());
    }
    attributes
}

/// Stylesheet for the standalone preview page. The widget markup itself is
/// unstyled; its classes are meant to be styled by the embedding page.
const PAGE_CSS: &str = "\
body { font-family: sans-serif; margin: 2rem; }
.new-joiners-widget { max-width: 28rem; }
.nj-title { margin-bottom: 0.5rem; }
.nj-heading { font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.05em; color: #444; }
.nj-entries { list-style: none; margin: 0 0 1rem; padding: 0; }
.nj-entry { display: flex; gap: 0.5rem; align-items: baseline; padding: 0.25rem 0; }
.nj-avatar { width: 2rem; height: 2rem; border-radius: 50%; align-self: center; }
.nj-meta, .nj-date, .nj-years { color: #666; font-size: 0.85rem; }
.nj-loading, .nj-empty { font-style: italic; }
";

/// Wrap rendered widget markup into a self-contained HTML page.
fn wrap_page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>New Joiners Widget</title>\n<style>\n{PAGE_CSS}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}
