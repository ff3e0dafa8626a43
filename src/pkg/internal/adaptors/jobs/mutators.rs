use std::time::Duration;

use mongodb::{
    Collection,
    bson::{doc, oid::ObjectId},
    options::ReturnDocument,
};

use crate::{
    pkg::internal::{
        adaptors::jobs::spec::{CreateJobListingInput, JobDocument, UpdateJobListingInput},
        store::within,
    },
    prelude::Result,
};

pub struct JobMutator<'a> {
    jobs: &'a Collection<JobDocument>,
    timeout: Duration,
}

impl<'a> JobMutator<'a> {
    pub fn new(jobs: &'a Collection<JobDocument>, timeout: Duration) -> Self {
        JobMutator { jobs, timeout }
    }

    pub async fn create(&self, job: CreateJobListingInput) -> Result<JobDocument> {
        let row = job.into_document(ObjectId::new());
        within(self.timeout, "create_job", self.jobs.insert_one(&row)).await?;
        tracing::debug!("created job {}", &row.id);
        Ok(row)
    }

    /// Atomic find-and-update returning the post-update document.
    pub async fn update(
        &self,
        id: ObjectId,
        job: UpdateJobListingInput,
    ) -> Result<Option<JobDocument>> {
        let update = doc! { "$set": job.to_set_document() };
        let row = within(
            self.timeout,
            "update_job",
            self.jobs
                .find_one_and_update(doc! { "_id": id }, update)
                .return_document(ReturnDocument::After),
        )
        .await?;
        tracing::debug!("updated job {}: matched={}", &id, row.is_some());
        Ok(row)
    }

    pub async fn delete(&self, id: ObjectId) -> Result<bool> {
        let result = within(
            self.timeout,
            "delete_job",
            self.jobs.delete_one(doc! { "_id": id }),
        )
        .await?;
        tracing::debug!("deleted job {}: count={}", &id, result.deleted_count);
        Ok(result.deleted_count > 0)
    }
}
