use mongodb::bson::{Document, oid::ObjectId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored shape of a job listing in the `jobs` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub company: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub company: String,
    pub url: String,
}

impl From<JobDocument> for JobListing {
    fn from(row: JobDocument) -> Self {
        JobListing {
            id: row.id.to_hex(),
            title: row.title,
            description: row.description,
            company: row.company,
            url: row.url,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobListingInput {
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub description: String,
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub company: String,
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub url: String,
}

impl CreateJobListingInput {
    pub fn into_document(self, id: ObjectId) -> JobDocument {
        JobDocument {
            id,
            title: self.title,
            description: self.description,
            company: self.company,
            url: self.url,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateJobListingInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub company: Option<String>,
    pub url: Option<String>,
}

impl UpdateJobListingInput {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.company.is_none()
            && self.url.is_none()
    }

    /// Fields to `$set`; absent fields are left out so stored values survive.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(title) = &self.title {
            set.insert("title", title.clone());
        }
        if let Some(description) = &self.description {
            set.insert("description", description.clone());
        }
        if let Some(company) = &self.company {
            set.insert("company", company.clone());
        }
        if let Some(url) = &self.url {
            set.insert("url", url.clone());
        }
        set
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteJobResponse {
    #[serde(rename = "deletedId")]
    pub deleted_id: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Page {
    pub offset: Option<u64>,
    pub limit: Option<i64>,
}

impl Page {
    pub fn is_unbounded(&self) -> bool {
        self.offset.is_none() && self.limit.is_none()
    }

    /// A page always carries a limit, capped at `max_page_size`.
    pub fn clamped(self, max_page_size: i64) -> Page {
        let max = max_page_size.max(1);
        Page {
            offset: self.offset,
            limit: Some(self.limit.unwrap_or(max).clamp(1, max)),
        }
    }
}
