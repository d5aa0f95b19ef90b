//! Identity 응답 DTO

use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::identity::{Email, Identity};

/// `GET /api/user` 응답
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub id: Uuid,
    pub full_name: String,
    pub image_url: String,
    pub emails: Vec<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<&'static str>,
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            full_name: identity.full_name,
            image_url: identity.image_url,
            emails: identity.emails,
            provider: identity.external.map(|ext| ext.provider.as_str()),
        }
    }
}
