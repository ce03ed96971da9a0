// Contact messages: read-only inbox.

use webdash_api::{ApiClient, ContactMessage, Error as ApiError};

use super::Resource;

#[derive(Debug, Default)]
pub struct ContactMessages;

impl Resource for ContactMessages {
    type Record = ContactMessage;
    type Draft = ();

    const ENTITY: &'static str = "Contact message";
    const PLURAL: &'static str = "contact messages";
    const ROUTE: &'static str = "/dashboard/contact";

    fn id(record: &ContactMessage) -> u64 {
        record.id
    }

    fn search_fields(record: &ContactMessage) -> Vec<&str> {
        let mut fields = vec![
            record.first_name.as_str(),
            record.last_name.as_str(),
            record.email_address.as_str(),
            record.message.as_str(),
        ];
        fields.extend(record.subject.as_deref());
        fields.extend(record.company.as_deref());
        fields
    }

    async fn list(&self, api: &ApiClient) -> Result<Vec<ContactMessage>, ApiError> {
        api.list_contact_messages().await
    }
}
