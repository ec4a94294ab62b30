//! Shared pieces of the listing binaries: common flags, output rendering and
//! logging set-up.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::descriptor::ApplicationDescriptor;
use crate::parent::ParentApplication;
use crate::query::Query;
use crate::{AppContext, app_filter_hint};

const NAME_COLUMN: usize = 50;
const VERSION_COLUMN: usize = 10;

/// Flags accepted by both `meco-app-list` and `meco-app-search`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Display details about the applications.
    #[arg(short, long)]
    pub detail: bool,
    /// Emit the matching applications as a JSON array.
    #[arg(long, conflicts_with = "detail")]
    pub json: bool,
    /// List inactive applications too.
    #[arg(long)]
    pub list_inactive: bool,
    /// Parent application the listed applications can be run in.
    #[arg(short = 'a', long, value_parser = parse_parent)]
    pub parent_application: Option<ParentApplication>,
    /// Filter by the parent application this process is running under.
    #[arg(long, conflicts_with = "parent_application")]
    pub current: bool,
    /// Name of the package the applications will be listed for.
    #[arg(short, long)]
    pub package: Option<String>,
    /// Directory to scan for packages (repeatable). Overrides MECO_APPLICATION_PATH.
    #[arg(long = "search-path", value_name = "DIR")]
    pub search_paths: Vec<PathBuf>,
}

fn parse_parent(raw: &str) -> Result<ParentApplication, String> {
    ParentApplication::try_from(raw).map_err(|err| err.to_string())
}

impl FilterArgs {
    pub fn to_query(&self, context: &AppContext, keyword: Option<String>) -> Query {
        let parent = if self.current {
            Some(context.parent_application)
        } else {
            self.parent_application
        };
        Query {
            parent_application: parent,
            package_name: self.package.clone(),
            keyword,
            include_inactive: self.list_inactive,
        }
    }

    fn style(&self) -> ListingStyle {
        if self.json {
            ListingStyle::Json
        } else if self.detail {
            ListingStyle::Detail
        } else {
            ListingStyle::Summary
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingStyle {
    Summary,
    Detail,
    Json,
}

/// Render a query result the way the listing binaries print it.
pub fn render_listing(apps: &[ApplicationDescriptor], style: ListingStyle) -> Result<String> {
    if style == ListingStyle::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(apps)?));
    }

    if apps.is_empty() {
        return Ok("No application found.\n".to_string());
    }

    let mut out = String::from("\n");
    for app in apps {
        match style {
            ListingStyle::Detail => out.push_str(&app.as_plain_text()),
            _ => {
                out.push_str(&summary_line(app));
                out.push('\n');
            }
        }
    }
    if style == ListingStyle::Summary {
        out.push('\n');
    }
    out.push_str(&format!("\n{} application(s) listed.\n", apps.len()));
    Ok(out)
}

pub fn summary_line(app: &ApplicationDescriptor) -> String {
    format!(
        "{:<name$}{:<version$}{}",
        app.name(),
        app.version_string(),
        app.parent_applications_as_string(),
        name = NAME_COLUMN,
        version = VERSION_COLUMN
    )
}

/// Resolve context, run the query and print the listing to stdout.
pub fn run_listing(args: &FilterArgs, keyword: Option<String>) -> Result<()> {
    let context = AppContext::resolve(&args.search_paths);
    tracing::debug!(
        search_paths = ?context.search_paths,
        parent = %context.parent_application,
        "resolved context"
    );

    if !args.json {
        if let Some(hint) = app_filter_hint() {
            println!("{hint}");
        }
    }

    let scanner = context.scanner()?;
    let query = args.to_query(&context, keyword);
    let apps = query.run(&scanner);
    print!("{}", render_listing(&apps, args.style())?);
    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
