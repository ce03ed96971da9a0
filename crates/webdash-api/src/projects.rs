// Project endpoints
//
// Projects are the only resource with file uploads. A payload carrying an
// image is sent as multipart; because the backend cannot parse multipart
// PUT bodies, multipart updates are POSTed with a `_method=PUT` field.

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::client::{ApiClient, Extra};
use crate::error::Error;
use crate::models::{Acknowledgement, ApiProject, DataPayload, ImageUpload, ProjectPayload};

impl ApiClient {
    /// `GET /admin/projects`
    pub async fn list_projects(&self) -> Result<Vec<ApiProject>, Error> {
        let url = self.url("/admin/projects")?;
        debug!("listing projects");
        Ok(self.get::<DataPayload<Vec<ApiProject>>>(url).await?.payload.data)
    }

    /// `GET /admin/projects/{id}`
    pub async fn get_project(&self, id: u64) -> Result<ApiProject, Error> {
        let url = self.url(&format!("/admin/projects/{id}"))?;
        debug!(id, "fetching project");
        self.get::<DataPayload<Option<ApiProject>>>(url)
            .await?
            .payload
            .data
            .ok_or_else(Error::missing_data)
    }

    /// `POST /admin/projects` as JSON, or multipart when an image is attached.
    pub async fn create_project(&self, payload: &ProjectPayload) -> Result<Acknowledgement, Error> {
        let url = self.url("/admin/projects")?;
        debug!(title = %payload.title, multipart = payload.image.is_some(), "creating project");
        let envelope = match &payload.image {
            Some(image) => {
                let form = project_form(payload, image)?;
                self.post_multipart::<Extra>(url, form).await?
            }
            None => self.post::<Extra>(url, payload).await?,
        };
        Ok(envelope.ack())
    }

    /// `PUT /admin/projects/{id}` as JSON, or multipart
    /// `POST /admin/projects/{id}` with `_method=PUT` when an image is attached.
    pub async fn update_project(
        &self,
        id: u64,
        payload: &ProjectPayload,
    ) -> Result<Acknowledgement, Error> {
        let url = self.url(&format!("/admin/projects/{id}"))?;
        debug!(id, multipart = payload.image.is_some(), "updating project");
        let envelope = match &payload.image {
            Some(image) => {
                let form = project_form(payload, image)?.text("_method", "PUT");
                self.post_multipart::<Extra>(url, form).await?
            }
            None => self.put::<Extra>(url, payload).await?,
        };
        Ok(envelope.ack())
    }

    /// `DELETE /admin/projects/{id}`
    pub async fn delete_project(&self, id: u64) -> Result<Acknowledgement, Error> {
        let url = self.url(&format!("/admin/projects/{id}"))?;
        debug!(id, "deleting project");
        Ok(self.delete::<Extra>(url).await?.ack())
    }
}

fn project_form(payload: &ProjectPayload, image: &ImageUpload) -> Result<Form, Error> {
    let form = payload
        .form_fields()
        .into_iter()
        .fold(Form::new().percent_encode_noop(), |form, (name, value)| form.text(name, value));

    let part = Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.content_type)?;

    Ok(form.part("image_url", part))
}
