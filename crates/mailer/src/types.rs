use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    pub email: String,
}

/// Body of `POST /smtp/email`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionalEmailRequest {
    pub sender: Contact,
    pub to: Vec<Contact>,
    pub subject: String,
    pub html_content: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionalEmailResponse {
    #[serde(default)]
    pub message_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RelayErrorResponse {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}
