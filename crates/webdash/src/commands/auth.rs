//! Session commands: login, logout, whoami, can, navigate.

use dialoguer::Input;
use secrecy::SecretString;
use serde::Serialize;
use tracing::debug;

use webdash_core::guard::LOGIN_PATH;
use webdash_core::{Dashboard, GuardDecision, Requirement, Session};

use crate::cli::{CanArgs, GlobalOpts, LoginArgs};
use crate::config::{self, Resolved};
use crate::error::{CliError, exit_code};
use crate::output;

use super::util;

// ── Login / logout ──────────────────────────────────────────────────

pub async fn login(
    dash: &Dashboard,
    args: LoginArgs,
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // The login screen itself is guarded: a live token bounces to the dashboard.
    if let GuardDecision::Redirect(_) = dash.navigate(LOGIN_PATH) {
        let who = dash
            .session()
            .current()
            .map_or_else(|| "a stored session".to_owned(), |s| s.email.clone());
        util::note(
            global,
            &format!("Already logged in as {who}. Run `webdash logout` first."),
        );
        return Ok(());
    }

    let email = match args.email.or_else(|| resolved.profile.email.clone()) {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(util::prompt_err)?,
    };

    let password = match args.password {
        Some(pw) => SecretString::from(pw),
        None => match config::resolve_password(&resolved.profile, &resolved.name) {
            Ok(pw) => pw,
            Err(e) => {
                debug!(error = %e, "no stored password; prompting");
                rpassword::prompt_password("Password: ")
                    .map(SecretString::from)
                    .map_err(util::prompt_err)?
            }
        },
    };

    let redirect = util::with_spinner(
        "Signing in",
        global,
        dash.session().login(&email, &password),
    )
    .await?;
    debug!(location = %redirect, "login redirect");

    if let Some(user) = dash.session().current() {
        util::note(global, &format!("Logged in as {} <{}>", user.name, user.email));
    }
    Ok(())
}

pub async fn logout(dash: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    let session = dash.session();
    if !session.is_authenticated() && !session.token_present() {
        util::note(global, "Not logged in");
        return Ok(());
    }

    let redirect = util::with_spinner("Signing out", global, session.logout()).await;
    debug!(location = %redirect, "logout redirect");
    util::note(global, "Logged out");
    Ok(())
}

// ── Session inspection ──────────────────────────────────────────────

fn session_detail(s: &Session) -> String {
    output::detail(&[
        ("ID", s.id.to_string()),
        ("Name", s.name.clone()),
        ("Email", s.email.clone()),
        ("Verified", s.email_verified_at.clone().unwrap_or_default()),
        ("Branch", s.branch.clone().unwrap_or_default()),
        ("Roles", s.role_names().collect::<Vec<_>>().join(", ")),
        ("Permissions", s.permission_names().join(", ")),
        ("Avatar", s.avatar.clone().unwrap_or_default()),
    ])
}

pub async fn whoami(dash: &Dashboard, refresh: bool, global: &GlobalOpts) -> Result<(), CliError> {
    let user = dash.session().current().ok_or_else(|| CliError::NotLoggedIn {
        redirect: LOGIN_PATH.into(),
    })?;
    let user = if refresh {
        util::with_spinner("Refreshing profile", global, dash.session().refresh_profile()).await?
    } else {
        user
    };

    let out = output::render_single(&global.output, user.as_ref(), session_detail, |s| {
        s.email.clone()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Print `yes`/`no`; a denial exits with the permission status.
pub fn can(dash: &Dashboard, args: &CanArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let requirement = match (&args.role, &args.permission) {
        (Some(role), _) => Requirement::Role(role.clone()),
        (None, Some(permission)) => Requirement::Permission(permission.clone()),
        (None, None) => {
            return Err(CliError::Validation {
                field: "can".into(),
                reason: "pass --role or --permission".into(),
            });
        }
    };

    let user = dash.session().current();
    let allowed = requirement.is_met(user.as_deref());
    debug!(%requirement, allowed, "access check");

    output::print_output(if allowed { "yes" } else { "no" }, global.quiet);
    if allowed {
        Ok(())
    } else {
        Err(CliError::Reported(exit_code::PERMISSION))
    }
}

#[derive(Serialize)]
struct Navigation {
    path: String,
    allowed: bool,
    redirect: Option<String>,
}

pub fn navigate(dash: &Dashboard, path: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let nav = match dash.navigate(path) {
        GuardDecision::Allow => Navigation {
            path: path.to_owned(),
            allowed: true,
            redirect: None,
        },
        GuardDecision::Redirect(r) => Navigation {
            path: path.to_owned(),
            allowed: false,
            redirect: Some(r.location),
        },
    };

    let out = output::render_single(
        &global.output,
        &nav,
        |n| match &n.redirect {
            Some(to) => format!("redirect {to}"),
            None => format!("allow {}", n.path),
        },
        |n| n.redirect.clone().unwrap_or_else(|| n.path.clone()),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
