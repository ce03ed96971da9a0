//! Contact inbox command handlers (read-only).

use tabled::Tabled;
use webdash_api::ContactMessage;
use webdash_core::Dashboard;
use webdash_core::crud::ContactMessages;

use crate::cli::{ContactsArgs, ContactsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

const PREVIEW_LEN: usize = 48;

#[derive(Tabled)]
struct ContactRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Message")]
    preview: String,
    #[tabled(rename = "Received")]
    received: String,
}

fn preview(message: &str) -> String {
    let flat = message.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_LEN {
        let cut: String = flat.chars().take(PREVIEW_LEN).collect();
        format!("{cut}…")
    } else {
        flat
    }
}

impl From<&ContactMessage> for ContactRow {
    fn from(c: &ContactMessage) -> Self {
        Self {
            id: c.id,
            from: c.full_name(),
            email: c.email_address.clone(),
            subject: c.subject.clone().unwrap_or_default(),
            preview: preview(&c.message),
            received: c.created_at.clone(),
        }
    }
}

fn detail(c: &ContactMessage) -> String {
    let header = output::detail(&[
        ("ID", c.id.to_string()),
        ("From", c.full_name()),
        ("Email", c.email_address.clone()),
        ("Phone", c.phone_number.clone()),
        ("Company", c.company.clone().unwrap_or_default()),
        ("Subject", c.subject.clone().unwrap_or_default()),
        ("Received", c.created_at.clone()),
    ]);
    format!("{header}\n\n{}", c.message)
}

pub async fn handle(dash: &Dashboard, args: ContactsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let page = util::load(dash, ContactMessages, global).await?;

    match args.command {
        ContactsCommand::List(list) => {
            let messages = util::filtered(&page, &list);
            let out = output::render_list(&global.output, &messages, |x| ContactRow::from(x), |c| {
                c.email_address.clone()
            });
            output::print_output(&out, global.quiet);
        }
        ContactsCommand::Get { id } => {
            let message = util::find(&page, id)?;
            let out = output::render_single(&global.output, &message, detail, |c| c.message.clone());
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_flattens_and_truncates() {
        assert_eq!(preview("Hi\nthere"), "Hi there");

        let long = "word ".repeat(20);
        let p = preview(&long);
        assert!(p.ends_with('…'));
        assert_eq!(p.chars().count(), PREVIEW_LEN + 1);
    }
}
