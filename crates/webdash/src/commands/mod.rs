//! Command dispatch: CLI args -> session / CRUD pages -> output.

pub mod auth;
pub mod config_cmd;
pub mod contacts;
pub mod permissions;
pub mod projects;
pub mod roles;
pub mod seo;
pub mod users;
pub mod util;

use webdash_core::Dashboard;

use crate::cli::{Command, GlobalOpts};
use crate::config::Resolved;
use crate::error::CliError;

/// Dispatch a backend-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    dash: &Dashboard,
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(dash, args, resolved, global).await,
        Command::Logout => auth::logout(dash, global).await,
        Command::Whoami { refresh } => auth::whoami(dash, refresh, global).await,
        Command::Can(args) => auth::can(dash, &args, global),
        Command::Navigate { path } => auth::navigate(dash, &path, global),
        Command::Users(args) => users::handle(dash, args, global).await,
        Command::Roles(args) => roles::handle(dash, args, global).await,
        Command::Permissions(args) => permissions::handle(dash, args, global).await,
        Command::Projects(args) => projects::handle(dash, args, global).await,
        Command::Seo(args) => seo::handle(dash, args, global).await,
        Command::Contacts(args) => contacts::handle(dash, args, global).await,
        // Handled before a dashboard is built
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
