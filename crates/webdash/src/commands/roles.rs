//! Role command handlers.

use serde::Serialize;
use tabled::Tabled;
use webdash_api::ApiRole;
use webdash_core::Dashboard;
use webdash_core::crud::Roles;

use crate::cli::{GlobalOpts, RolesArgs, RolesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct RoleRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Guard")]
    guard: String,
    #[tabled(rename = "Permissions")]
    permissions: String,
}

fn permission_names(r: &ApiRole) -> String {
    r.permissions
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<&ApiRole> for RoleRow {
    fn from(r: &ApiRole) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            guard: r.guard_name.clone(),
            permissions: permission_names(r),
        }
    }
}

#[derive(Clone, Serialize, Tabled)]
struct NameRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Clone, Serialize, Tabled)]
struct MemberRow {
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "User ID")]
    user_id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

fn detail(r: &ApiRole) -> String {
    output::detail(&[
        ("ID", r.id.to_string()),
        ("Name", r.name.clone()),
        ("Guard", r.guard_name.clone()),
        ("Permissions", permission_names(r)),
        ("Created", r.created_at.clone().unwrap_or_default()),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(dash: &Dashboard, args: RolesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        RolesCommand::List(list) => {
            let page = util::load(dash, Roles, global).await?;
            let roles = util::filtered(&page, &list);
            let out = output::render_list(&global.output, &roles, |x| RoleRow::from(x), |r| r.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RolesCommand::Names => {
            util::require_access(dash, "/dashboard/users/role")?;
            let names = util::with_spinner("Loading roles", global, dash.call(dash.api().role_names())).await?;
            let rows: Vec<NameRow> = names
                .into_iter()
                .map(|(id, name)| NameRow { id, name })
                .collect();
            let out = output::render_list(&global.output, &rows, NameRow::clone, |r| r.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RolesCommand::Members => {
            util::require_access(dash, "/dashboard/users/role")?;
            let groups =
                util::with_spinner("Loading members", global, dash.call(dash.api().role_members())).await?;
            let rows: Vec<MemberRow> = groups
                .into_iter()
                .flat_map(|(role, members)| {
                    members.into_iter().map(move |m| MemberRow {
                        role: role.clone(),
                        user_id: m.user_id,
                        name: m.name,
                        email: m.email,
                    })
                })
                .collect();
            let out = output::render_list(&global.output, &rows, MemberRow::clone, |m| {
                format!("{}\t{}", m.role, m.email)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RolesCommand::Get { id } => {
            let page = util::load(dash, Roles, global).await?;
            let role = util::find(&page, id)?;
            let out = output::render_single(&global.output, &role, detail, |r| r.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RolesCommand::Create { name, permissions } => {
            let page = util::open(dash, Roles)?;
            page.open_create();
            page.edit_draft(|d| {
                d.name = name;
                d.permissions = permissions;
            })?;
            util::submit(&page, global).await?;
            Ok(())
        }

        RolesCommand::Update {
            id,
            name,
            permissions,
        } => {
            let page = util::load(dash, Roles, global).await?;
            page.open_edit(id)?;
            page.edit_draft(|d| {
                if let Some(name) = name {
                    d.name = name;
                }
                if !permissions.is_empty() {
                    d.permissions = permissions;
                }
            })?;
            util::submit(&page, global).await?;
            Ok(())
        }

        RolesCommand::Delete { id } => {
            let page = util::load(dash, Roles, global).await?;
            let role = util::find(&page, id)?;
            if !util::confirm(&format!("Delete role '{}'?", role.name), global.yes)? {
                return Ok(());
            }
            page.open_delete(id)?;
            util::submit(&page, global).await?;
            Ok(())
        }
    }
}
