use std::time::Duration;

use futures::TryStreamExt;
use mongodb::{
    Collection,
    bson::{doc, oid::ObjectId},
};

use crate::{
    pkg::internal::{
        adaptors::jobs::spec::{JobDocument, Page},
        store::within,
    },
    prelude::Result,
};

pub struct JobSelector<'a> {
    jobs: &'a Collection<JobDocument>,
    timeout: Duration,
}

impl<'a> JobSelector<'a> {
    pub fn new(jobs: &'a Collection<JobDocument>, timeout: Duration) -> Self {
        JobSelector { jobs, timeout }
    }

    pub async fn get_by_id(&self, id: ObjectId) -> Result<Option<JobDocument>> {
        tracing::debug!("fetching job {}", &id);
        within(self.timeout, "get_job", self.jobs.find_one(doc! { "_id": id })).await
    }

    /// Without a page the whole collection comes back in natural order.
    pub async fn get_all(&self, page: Option<Page>) -> Result<Vec<JobDocument>> {
        let rows = within(self.timeout, "get_jobs", async {
            let mut find = self.jobs.find(doc! {});
            if let Some(page) = page.filter(|p| !p.is_unbounded()) {
                find = find.sort(doc! { "_id": 1 });
                if let Some(offset) = page.offset {
                    find = find.skip(offset);
                }
                if let Some(limit) = page.limit {
                    find = find.limit(limit);
                }
            }
            find.await?.try_collect::<Vec<_>>().await
        })
        .await?;
        tracing::debug!("fetched {} jobs", rows.len());
        Ok(rows)
    }

    pub async fn count(&self) -> Result<u64> {
        within(self.timeout, "count_jobs", self.jobs.count_documents(doc! {})).await
    }
}
