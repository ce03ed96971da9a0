//! SEO metadata command handlers.

use tabled::Tabled;
use webdash_api::{ApiSeoPage, SeoRequest};
use webdash_core::Dashboard;
use webdash_core::crud::SeoPages;

use crate::cli::{GlobalOpts, SeoArgs, SeoCommand, SeoFields};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct SeoRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Page")]
    page_name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&ApiSeoPage> for SeoRow {
    fn from(s: &ApiSeoPage) -> Self {
        Self {
            id: s.id,
            page_name: s.page_name.clone(),
            slug: s.page_slug.clone(),
            title: s.meta_title.clone(),
            status: util::status_label(s.status),
        }
    }
}

fn detail(s: &ApiSeoPage) -> String {
    output::detail(&[
        ("ID", s.id.to_string()),
        ("Page", s.page_name.clone()),
        ("Slug", s.page_slug.clone()),
        ("Title", s.meta_title.clone()),
        ("Description", s.meta_description.clone()),
        ("Keywords", s.meta_keywords.clone()),
        ("Status", util::status_label(s.status)),
        ("Updated", s.updated_at.clone()),
    ])
}

/// Overlay the flags that were given onto `draft`.
fn apply(fields: SeoFields, draft: &mut SeoRequest) {
    if let Some(v) = fields.page_name {
        draft.page_name = v;
    }
    if let Some(v) = fields.page_slug {
        draft.page_slug = v;
    }
    if let Some(v) = fields.meta_title {
        draft.meta_title = v;
    }
    if let Some(v) = fields.meta_description {
        draft.meta_description = v;
    }
    if let Some(v) = fields.meta_keywords {
        draft.meta_keywords = v;
    }
    if let Some(v) = fields.status.value() {
        draft.status = v;
    }
}

pub async fn handle(dash: &Dashboard, args: SeoArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SeoCommand::List(list) => {
            let page = util::load(dash, SeoPages, global).await?;
            let pages = util::filtered(&page, &list);
            let out = output::render_list(&global.output, &pages, |x| SeoRow::from(x), |s| s.page_slug.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SeoCommand::Get { slug } => {
            util::require_access(dash, "/dashboard/seo")?;
            let seo = util::with_spinner(
                "Loading SEO page",
                global,
                dash.call(dash.api().seo_page_by_slug(&slug)),
            )
            .await?;
            let out = output::render_single(&global.output, &seo, detail, |s| s.page_slug.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SeoCommand::Create(fields) => {
            let page = util::open(dash, SeoPages)?;
            page.open_create();
            page.edit_draft(|d| {
                d.status = true;
                apply(fields, d);
            })?;
            util::submit(&page, global).await?;
            Ok(())
        }

        SeoCommand::Update { id, fields } => {
            let page = util::load(dash, SeoPages, global).await?;
            page.open_edit(id)?;
            page.edit_draft(|d| apply(fields, d))?;
            util::submit(&page, global).await?;
            Ok(())
        }

        SeoCommand::Delete { id } => {
            let page = util::load(dash, SeoPages, global).await?;
            let seo = util::find(&page, id)?;
            if !util::confirm(&format!("Delete SEO metadata for '{}'?", seo.page_slug), global.yes)? {
                return Ok(());
            }
            page.open_delete(id)?;
            util::submit(&page, global).await?;
            Ok(())
        }
    }
}
