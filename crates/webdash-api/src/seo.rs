// SEO page endpoints
//
// Listing is under `/seos`, but the public single-page lookup is keyed by
// slug under `/seo/{slug}`.

use tracing::debug;

use crate::client::{ApiClient, Extra};
use crate::error::Error;
use crate::models::{Acknowledgement, ApiSeoPage, DataPayload, SeoRequest};

impl ApiClient {
    /// `GET /seos`
    pub async fn list_seo_pages(&self) -> Result<Vec<ApiSeoPage>, Error> {
        let url = self.url("/seos")?;
        debug!("listing SEO pages");
        Ok(self.get::<DataPayload<Vec<ApiSeoPage>>>(url).await?.payload.data)
    }

    /// `GET /seo/{slug}`
    pub async fn seo_page_by_slug(&self, slug: &str) -> Result<ApiSeoPage, Error> {
        let mut url = self.url("/seo")?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(slug);
        debug!(slug, "fetching SEO page");
        self.get::<DataPayload<Option<ApiSeoPage>>>(url)
            .await?
            .payload
            .data
            .ok_or_else(Error::missing_data)
    }

    /// `POST /seos`
    pub async fn create_seo_page(&self, req: &SeoRequest) -> Result<Acknowledgement, Error> {
        let url = self.url("/seos")?;
        debug!(slug = %req.page_slug, "creating SEO page");
        Ok(self.post::<Extra>(url, req).await?.ack())
    }

    /// `PUT /seos/{id}`
    pub async fn update_seo_page(&self, id: u64, req: &SeoRequest) -> Result<Acknowledgement, Error> {
        let url = self.url(&format!("/seos/{id}"))?;
        debug!(id, "updating SEO page");
        Ok(self.put::<Extra>(url, req).await?.ack())
    }

    /// `DELETE /seos/{id}`
    pub async fn delete_seo_page(&self, id: u64) -> Result<Acknowledgement, Error> {
        let url = self.url(&format!("/seos/{id}"))?;
        debug!(id, "deleting SEO page");
        Ok(self.delete::<Extra>(url).await?.ack())
    }
}
