// Projects screen. The draft is the API payload itself, image included.

use webdash_api::{Acknowledgement, ApiClient, ApiProject, Error as ApiError, ProjectPayload};

use super::{FormMode, MutableResource, Resource};
use crate::validate::{ValidationErrors, Validator};

#[derive(Debug, Default)]
pub struct Projects;

impl Resource for Projects {
    type Record = ApiProject;
    type Draft = ProjectPayload;

    const ENTITY: &'static str = "Project";
    const PLURAL: &'static str = "projects";
    const ROUTE: &'static str = "/dashboard/projects";

    fn id(record: &ApiProject) -> u64 {
        record.id
    }

    fn search_fields(record: &ApiProject) -> Vec<&str> {
        vec![
            record.title.as_str(),
            record.category.as_str(),
            record.client.as_str(),
        ]
    }

    async fn list(&self, api: &ApiClient) -> Result<Vec<ApiProject>, ApiError> {
        api.list_projects().await
    }
}

impl MutableResource for Projects {
    fn draft_from(record: &ApiProject) -> ProjectPayload {
        ProjectPayload {
            title: record.title.clone(),
            short_description: record.short_description.clone(),
            category: record.category.clone(),
            duration: record.duration.clone(),
            team_size: record.team_size.clone(),
            rating: record.rating.clone(),
            client: record.client.clone(),
            year: record.year.clone(),
            technologies: record.technologies.clone(),
            live_url: record.live_url.clone(),
            github_url: record.github_url.clone(),
            status: record.status,
            image: None,
        }
    }

    fn validate(draft: &ProjectPayload, _mode: FormMode) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("title", &draft.title)
            .required("short_description", &draft.short_description)
            .required("category", &draft.category)
            .required("client", &draft.client)
            .rating("rating", &draft.rating)
            .year("year", &draft.year)
            .url("live_url", draft.live_url.as_deref())
            .url("github_url", draft.github_url.as_deref());
        for tech in &draft.technologies {
            v.required("technologies", &tech.name);
        }
        v.finish()
    }

    async fn create(
        &self,
        api: &ApiClient,
        draft: &ProjectPayload,
    ) -> Result<Acknowledgement, ApiError> {
        api.create_project(draft).await
    }

    async fn update(
        &self,
        api: &ApiClient,
        id: u64,
        draft: &ProjectPayload,
    ) -> Result<Acknowledgement, ApiError> {
        api.update_project(id, draft).await
    }

    async fn delete(&self, api: &ApiClient, id: u64) -> Result<Acknowledgement, ApiError> {
        api.delete_project(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(title: &str, category: &str, client: &str) -> ApiProject {
        ApiProject {
            title: title.into(),
            category: category.into(),
            client: client.into(),
            ..ApiProject::default()
        }
    }

    #[test]
    fn search_matches_title_category_and_client() {
        let p = project("Customer Portal", "Web", "Acme Corp");
        assert!(Projects::matches(&p, "portal"));
        assert!(Projects::matches(&p, "WEB"));
        assert!(Projects::matches(&p, "acme"));
        assert!(Projects::matches(&p, "  "));
        assert!(!Projects::matches(&p, "mobile"));
    }
}
