use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::core::entry::DATE_FORMAT;
use crate::error::{Result, SbError};
use crate::storage::layout::CatalogLayout;

/// Everything a command needs, resolved once from flags, config and env.
pub struct AppContext {
    pub config: Config,
    pub layout: CatalogLayout,
    pub output_format: OutputFormat,
    pub quiet: bool,
    /// Date stamped into written entries.
    pub today: NaiveDate,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = match &cli.root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };
        let config = Config::load(cli.config.as_deref(), &root)?;
        let layout = CatalogLayout::from_config(&root, &config.paths);
        let today = resolve_today(std::env::var("SKILLBOOK_TODAY").ok().as_deref())?;
        tracing::debug!(root = %root.display(), %today, "resolved context");

        Ok(Self {
            config,
            layout,
            output_format: cli.output_format(),
            quiet: cli.quiet,
            today,
        })
    }

    /// Wall-clock time for backup names.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// `SKILLBOOK_TODAY` (`YYYY-MM-DD`) when set, otherwise the local date.
fn resolve_today(override_value: Option<&str>) -> Result<NaiveDate> {
    match override_value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map_err(|err| SbError::Config(format!("SKILLBOOK_TODAY '{value}': {err}"))),
        None => Ok(Local::now().date_naive()),
    }
}
