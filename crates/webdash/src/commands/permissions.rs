//! Permission command handlers.

use tabled::Tabled;
use webdash_api::PermissionItem;
use webdash_core::Dashboard;
use webdash_core::crud::Permissions;

use crate::cli::{GlobalOpts, PermissionsArgs, PermissionsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct PermissionRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&PermissionItem> for PermissionRow {
    fn from(p: &PermissionItem) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
        }
    }
}

pub async fn handle(
    dash: &Dashboard,
    args: PermissionsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PermissionsCommand::List(list) => {
            let page = util::load(dash, Permissions, global).await?;
            let perms = util::filtered(&page, &list);
            let out =
                output::render_list(&global.output, &perms, |x| PermissionRow::from(x), |p| p.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // The role form's picker source; guarded by the roles screen.
        PermissionsCommand::Names => {
            util::require_access(dash, "/dashboard/users/role")?;
            let perms = util::with_spinner(
                "Loading permissions",
                global,
                dash.call(dash.api().permission_list()),
            )
            .await?;
            let out =
                output::render_list(&global.output, &perms, |x| PermissionRow::from(x), |p| p.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PermissionsCommand::Get { id } => {
            let page = util::load(dash, Permissions, global).await?;
            let perm = util::find(&page, id)?;
            let out = output::render_single(
                &global.output,
                &perm,
                |p| output::detail(&[("ID", p.id.to_string()), ("Name", p.name.clone())]),
                |p| p.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PermissionsCommand::Create { name, guard_name } => {
            let page = util::open(dash, Permissions)?;
            page.open_create();
            page.edit_draft(|d| {
                d.name = name;
                d.guard_name = guard_name;
            })?;
            util::submit(&page, global).await?;
            Ok(())
        }

        PermissionsCommand::Update {
            id,
            name,
            guard_name,
        } => {
            let page = util::load(dash, Permissions, global).await?;
            page.open_edit(id)?;
            page.edit_draft(|d| {
                if let Some(name) = name {
                    d.name = name;
                }
                d.guard_name = guard_name;
            })?;
            util::submit(&page, global).await?;
            Ok(())
        }

        PermissionsCommand::Delete { id } => {
            let page = util::load(dash, Permissions, global).await?;
            let perm = util::find(&page, id)?;
            if !util::confirm(&format!("Delete permission '{}'?", perm.name), global.yes)? {
                return Ok(());
            }
            page.open_delete(id)?;
            util::submit(&page, global).await?;
            Ok(())
        }
    }
}
