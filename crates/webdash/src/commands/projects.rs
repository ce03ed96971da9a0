//! Project command handlers.

use std::path::Path;

use tabled::Tabled;
use webdash_api::{ApiProject, ImageUpload, ProjectPayload, Technology};
use webdash_core::Dashboard;
use webdash_core::crud::Projects;

use crate::cli::{GlobalOpts, ProjectFields, ProjectsArgs, ProjectsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&ApiProject> for ProjectRow {
    fn from(p: &ApiProject) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            category: p.category.clone(),
            client: p.client.clone(),
            year: p.year.clone(),
            rating: p.rating.clone(),
            status: util::status_label(p.status),
        }
    }
}

fn detail(p: &ApiProject) -> String {
    let techs = p
        .technologies
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    output::detail(&[
        ("ID", p.id.to_string()),
        ("Title", p.title.clone()),
        ("Summary", p.short_description.clone()),
        ("Category", p.category.clone()),
        ("Client", p.client.clone()),
        ("Year", p.year.clone()),
        ("Duration", p.duration.clone()),
        ("Team", p.team_size.clone()),
        ("Rating", p.rating.clone()),
        ("Tech", techs),
        ("Live", p.live_url.clone().unwrap_or_default()),
        ("GitHub", p.github_url.clone().unwrap_or_default()),
        ("Image", p.image_url.clone().unwrap_or_default()),
        ("Status", util::status_label(p.status)),
        ("Updated", p.updated_at.clone()),
    ])
}

// ── Field parsing ───────────────────────────────────────────────────

fn parse_technology(raw: &str) -> Result<Technology, CliError> {
    match raw.split_once('=') {
        Some((name, icon)) if !name.trim().is_empty() => Ok(Technology {
            name: name.trim().to_owned(),
            icon: icon.trim().to_owned(),
        }),
        _ => Err(CliError::Validation {
            field: "tech".into(),
            reason: format!("expected NAME=ICON, got '{raw}'"),
        }),
    }
}

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn read_image(path: &Path) -> Result<ImageUpload, CliError> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_owned(), |n| n.to_string_lossy().into_owned());
    Ok(ImageUpload {
        file_name,
        content_type: content_type(path).to_owned(),
        bytes,
    })
}

/// Resolve file and `NAME=ICON` arguments before touching the draft.
struct ParsedFields {
    fields: ProjectFields,
    technologies: Vec<Technology>,
    image: Option<ImageUpload>,
}

impl ParsedFields {
    fn parse(mut fields: ProjectFields) -> Result<Self, CliError> {
        let technologies = std::mem::take(&mut fields.technologies)
            .iter()
            .map(|t| parse_technology(t))
            .collect::<Result<Vec<_>, _>>()?;
        let image = fields.image.take().as_deref().map(read_image).transpose()?;
        Ok(Self {
            fields,
            technologies,
            image,
        })
    }

    fn apply(self, draft: &mut ProjectPayload) {
        let f = self.fields;
        let set = |slot: &mut String, value: Option<String>| {
            if let Some(v) = value {
                *slot = v;
            }
        };
        set(&mut draft.title, f.title);
        set(&mut draft.short_description, f.short_description);
        set(&mut draft.category, f.category);
        set(&mut draft.duration, f.duration);
        set(&mut draft.team_size, f.team_size);
        set(&mut draft.rating, f.rating);
        set(&mut draft.client, f.client);
        set(&mut draft.year, f.year);
        if f.live_url.is_some() {
            draft.live_url = f.live_url.filter(|u| !u.is_empty());
        }
        if f.github_url.is_some() {
            draft.github_url = f.github_url.filter(|u| !u.is_empty());
        }
        if let Some(status) = f.status.value() {
            draft.status = status;
        }
        if !self.technologies.is_empty() {
            draft.technologies = self.technologies;
        }
        if self.image.is_some() {
            draft.image = self.image;
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(dash: &Dashboard, args: ProjectsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ProjectsCommand::List(list) => {
            let page = util::load(dash, Projects, global).await?;
            let projects = util::filtered(&page, &list);
            let out = output::render_list(&global.output, &projects, |x| ProjectRow::from(x), |p| p.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProjectsCommand::Get { id } => {
            util::require_access(dash, "/dashboard/projects")?;
            let project =
                util::with_spinner("Loading project", global, dash.call(dash.api().get_project(id))).await?;
            let out = output::render_single(&global.output, &project, detail, |p| p.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProjectsCommand::Create(fields) => {
            let parsed = ParsedFields::parse(fields)?;
            let page = util::open(dash, Projects)?;
            page.open_create();
            page.edit_draft(|d| {
                d.status = true;
                parsed.apply(d);
            })?;
            util::submit(&page, global).await?;
            Ok(())
        }

        ProjectsCommand::Update { id, fields } => {
            let parsed = ParsedFields::parse(fields)?;
            let page = util::load(dash, Projects, global).await?;
            page.open_edit(id)?;
            page.edit_draft(|d| parsed.apply(d))?;
            util::submit(&page, global).await?;
            Ok(())
        }

        ProjectsCommand::Delete { id } => {
            let page = util::load(dash, Projects, global).await?;
            let project = util::find(&page, id)?;
            if !util::confirm(&format!("Delete project '{}'?", project.title), global.yes)? {
                return Ok(());
            }
            page.open_delete(id)?;
            util::submit(&page, global).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn technology_requires_name_and_separator() {
        let t = parse_technology(" Rust = rust.svg").unwrap();
        assert_eq!(t.name, "Rust");
        assert_eq!(t.icon, "rust.svg");

        assert!(parse_technology("Rust").is_err());
        assert!(parse_technology("=icon.svg").is_err());
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type(Path::new("cover.PNG")), "image/png");
        assert_eq!(content_type(Path::new("a/b.jpeg")), "image/jpeg");
        assert_eq!(content_type(Path::new("notes")), "application/octet-stream");
    }
}
