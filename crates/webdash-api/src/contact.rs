// Contact message endpoints
//
// `/contact-messages` predates the `{status, message}` envelope and
// reports success as a boolean.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ContactListPayload, ContactMessage};

impl ApiClient {
    /// `GET /contact-messages`
    pub async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, Error> {
        let url = self.url("/contact-messages")?;
        debug!("listing contact messages");
        let resp: ContactListPayload = self.get_raw(url).await?;
        if resp.success {
            Ok(resp.data)
        } else {
            Err(Error::Rejected {
                message: resp
                    .message
                    .unwrap_or_else(|| "Failed to load contact messages".into()),
            })
        }
    }
}
