//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use webdash_api::Acknowledgement;
use webdash_core::{CrudPage, Dashboard, GuardDecision, MutableResource, Resource};

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::CliError;

/// Run the route guard for a dashboard screen.
pub fn require_access(dash: &Dashboard, route: &str) -> Result<(), CliError> {
    match dash.navigate(route) {
        GuardDecision::Allow => Ok(()),
        GuardDecision::Redirect(r) => Err(CliError::NotLoggedIn {
            redirect: r.location,
        }),
    }
}

/// A guarded, not yet loaded page for `resource`.
pub fn open<R: Resource>(dash: &Dashboard, resource: R) -> Result<CrudPage<R>, CliError> {
    require_access(dash, R::ROUTE)?;
    Ok(dash.page(resource))
}

/// A guarded page with its collection loaded.
pub async fn load<R: Resource>(
    dash: &Dashboard,
    resource: R,
    global: &GlobalOpts,
) -> Result<CrudPage<R>, CliError> {
    let page = open(dash, resource)?;
    with_spinner(&format!("Loading {}", R::PLURAL), global, page.load()).await?;
    Ok(page)
}

/// Submit the page's open dialog.
pub async fn submit<R: MutableResource>(
    page: &CrudPage<R>,
    global: &GlobalOpts,
) -> Result<Acknowledgement, CliError> {
    Ok(with_spinner("Saving", global, page.submit()).await?)
}

/// Loaded records, narrowed by `--search`.
pub fn filtered<R: Resource>(page: &CrudPage<R>, list: &ListArgs) -> Vec<R::Record> {
    match list.search.as_deref() {
        Some(needle) => page.search(needle),
        None => page.records().as_ref().clone(),
    }
}

/// Look up a loaded record or fail with a hint to list.
pub fn find<R: Resource>(page: &CrudPage<R>, id: u64) -> Result<R::Record, CliError> {
    page.find(id).ok_or_else(|| CliError::NotFound {
        resource_type: R::ENTITY.into(),
        identifier: id.to_string(),
        list_command: format!("{} list", crate::error::list_command_for(R::ENTITY)),
    })
}

/// Await `fut` behind a stderr spinner when interactive.
pub async fn with_spinner<T>(message: &str, global: &GlobalOpts, fut: impl Future<Output = T>) -> T {
    if global.quiet || !std::io::stderr().is_terminal() {
        return fut.await;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let out = fut.await;
    spinner.finish_and_clear();
    out
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt {
        message: e.to_string(),
    }
}

pub fn status_label(value: bool) -> String {
    if value { "active" } else { "inactive" }.into()
}

/// Print a status line unless `--quiet`.
pub fn note(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}
