//! The Lead record

use super::ids::LeadId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sales contact tracked through the pipeline.
///
/// Field names on the wire follow the leads table (`fullName`, `createdAt`,
/// `user_id`). Display fields are free text; only `id` carries meaning for the
/// board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    #[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub company: String,
    /// Deal value in the account currency
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub contact: String,
    pub created_at: DateTime<Utc>,
}

impl Lead {
    /// Create a lead with a fresh id and the current time
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: LeadId::new(),
            user_id: None,
            title: title.into(),
            full_name: String::new(),
            email: String::new(),
            whatsapp: String::new(),
            address: String::new(),
            number: String::new(),
            city: String::new(),
            state: String::new(),
            company: String::new(),
            value: 0.0,
            contact: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<LeadId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = contact.into();
        self
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the WhatsApp number; also used as contact when none is set
    pub fn with_whatsapp(mut self, whatsapp: impl Into<String>) -> Self {
        self.whatsapp = whatsapp.into();
        if self.contact.is_empty() {
            self.contact = self.whatsapp.clone();
        }
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}
