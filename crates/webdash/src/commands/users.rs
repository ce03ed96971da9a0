//! User command handlers.

use secrecy::SecretString;
use tabled::Tabled;
use webdash_api::ApiUser;
use webdash_core::Dashboard;
use webdash_core::crud::Users;

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Roles")]
    roles: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created: String,
}

fn role_names(u: &ApiUser) -> String {
    u.roles
        .iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<&ApiUser> for UserRow {
    fn from(u: &ApiUser) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            roles: role_names(u),
            status: u.status.clone().unwrap_or_default(),
            created: u.created_at.clone(),
        }
    }
}

fn detail(u: &ApiUser) -> String {
    output::detail(&[
        ("ID", u.id.to_string()),
        ("Name", u.name.clone()),
        ("Email", u.email.clone()),
        ("Verified", u.email_verified_at.clone().unwrap_or_default()),
        ("Status", u.status.clone().unwrap_or_default()),
        ("Branch", u.branch.clone().unwrap_or_default()),
        ("Roles", role_names(u)),
        ("Created", u.created_at.clone()),
        ("Updated", u.updated_at.clone()),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(dash: &Dashboard, args: UsersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List { list, page } => {
            let page = util::load(dash, Users::page(page), global).await?;
            let users = util::filtered(&page, &list);
            let out = output::render_list(&global.output, &users, |x| UserRow::from(x), |u| u.id.to_string());
            output::print_output(&out, global.quiet);

            if let Some(info) = page.resource().page_info() {
                util::note(
                    global,
                    &format!(
                        "Page {} of {} ({} users)",
                        info.current_page, info.last_page, info.total
                    ),
                );
            }
            Ok(())
        }

        UsersCommand::Get { id, page } => {
            let page = util::load(dash, Users::page(page), global).await?;
            let user = util::find(&page, id)?;
            let out = output::render_single(&global.output, &user, detail, |u| u.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Create {
            name,
            email,
            password,
            roles,
        } => {
            let page = util::open(dash, Users::default())?;
            let password = match password {
                Some(pw) => SecretString::from(pw),
                None => rpassword::prompt_password("Password for the new user: ")
                    .map(SecretString::from)
                    .map_err(util::prompt_err)?,
            };

            page.open_create();
            page.edit_draft(|d| {
                d.name = name;
                d.email = email;
                d.password = Some(password);
                d.roles = roles;
            })?;
            util::submit(&page, global).await?;
            Ok(())
        }

        UsersCommand::Update {
            id,
            page,
            name,
            email,
            status,
            branch_id,
            roles,
        } => {
            let page = util::load(dash, Users::page(page), global).await?;
            page.open_edit(id)?;
            page.edit_draft(|d| {
                if let Some(name) = name {
                    d.name = name;
                }
                if let Some(email) = email {
                    d.email = email;
                }
                if status.is_some() {
                    d.status = status;
                }
                if branch_id.is_some() {
                    d.branch_id = branch_id;
                }
                if !roles.is_empty() {
                    d.roles = roles;
                }
            })?;
            util::submit(&page, global).await?;
            Ok(())
        }

        UsersCommand::Delete { id, page } => {
            let page = util::load(dash, Users::page(page), global).await?;
            let user = util::find(&page, id)?;
            if !util::confirm(&format!("Delete user {} <{}>?", user.name, user.email), global.yes)? {
                return Ok(());
            }
            page.open_delete(id)?;
            util::submit(&page, global).await?;
            Ok(())
        }
    }
}
