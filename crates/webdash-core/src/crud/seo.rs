// SEO metadata screen.

use webdash_api::{Acknowledgement, ApiClient, ApiSeoPage, Error as ApiError, SeoRequest};

use super::{FormMode, MutableResource, Resource};
use crate::validate::{ValidationErrors, Validator};

#[derive(Debug, Default)]
pub struct SeoPages;

impl Resource for SeoPages {
    type Record = ApiSeoPage;
    type Draft = SeoRequest;

    const ENTITY: &'static str = "SEO page";
    const PLURAL: &'static str = "SEO pages";
    const ROUTE: &'static str = "/dashboard/seo";

    fn id(record: &ApiSeoPage) -> u64 {
        record.id
    }

    fn search_fields(record: &ApiSeoPage) -> Vec<&str> {
        vec![
            record.page_name.as_str(),
            record.page_slug.as_str(),
            record.meta_title.as_str(),
        ]
    }

    async fn list(&self, api: &ApiClient) -> Result<Vec<ApiSeoPage>, ApiError> {
        api.list_seo_pages().await
    }
}

impl MutableResource for SeoPages {
    fn draft_from(record: &ApiSeoPage) -> SeoRequest {
        SeoRequest {
            page_name: record.page_name.clone(),
            page_slug: record.page_slug.clone(),
            meta_title: record.meta_title.clone(),
            meta_description: record.meta_description.clone(),
            meta_keywords: record.meta_keywords.clone(),
            status: record.status,
        }
    }

    fn validate(draft: &SeoRequest, _mode: FormMode) -> Result<(), ValidationErrors> {
        Validator::new()
            .required("page_name", &draft.page_name)
            .required("page_slug", &draft.page_slug)
            .slug("page_slug", &draft.page_slug)
            .required("meta_title", &draft.meta_title)
            .required("meta_description", &draft.meta_description)
            .finish()
    }

    async fn create(&self, api: &ApiClient, draft: &SeoRequest) -> Result<Acknowledgement, ApiError> {
        api.create_seo_page(draft).await
    }

    async fn update(
        &self,
        api: &ApiClient,
        id: u64,
        draft: &SeoRequest,
    ) -> Result<Acknowledgement, ApiError> {
        api.update_seo_page(id, draft).await
    }

    async fn delete(&self, api: &ApiClient, id: u64) -> Result<Acknowledgement, ApiError> {
        api.delete_seo_page(id).await
    }
}
