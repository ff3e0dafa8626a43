use std::{future::IntoFuture, time::Duration};

use mongodb::{
    Client, Collection,
    bson::{doc, oid::ObjectId},
    options::{ClientOptions, ReadPreference, SelectionCriteria},
};

use crate::{
    pkg::internal::adaptors::jobs::{
        mutators::JobMutator,
        selectors::JobSelector,
        spec::{
            CreateJobListingInput, DeleteJobResponse, JobDocument, JobListing, Page,
            UpdateJobListingInput,
        },
    },
    prelude::{Error, Result},
};

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub connect_timeout: Duration,
    pub op_timeout: Duration,
    pub max_page_size: i64,
}

/// Handle to the job listings collection.
///
/// Cheap to share behind an `Arc`; the driver client pools connections and
/// every call is bounded by the configured operation timeout.
#[derive(Debug, Clone)]
pub struct JobStore {
    client: Client,
    jobs: Collection<JobDocument>,
    config: StoreConfig,
}

impl JobStore {
    /// Builds the client without touching the network.
    pub async fn connect_lazy(config: StoreConfig) -> Result<JobStore> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(Error::Connection)?;
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.connect_timeout);
        let client = Client::with_options(options).map_err(Error::Connection)?;
        let jobs = client
            .database(&config.database)
            .collection::<JobDocument>(&config.collection);
        Ok(JobStore {
            client,
            jobs,
            config,
        })
    }

    /// Builds the client and probes the primary before handing it out.
    pub async fn connect(config: StoreConfig) -> Result<JobStore> {
        let store = JobStore::connect_lazy(config).await?;
        within(store.config.connect_timeout, "connect", store.probe())
            .await
            .map_err(|e| match e {
                Error::Store(inner) => Error::Connection(inner),
                other => other,
            })?;
        tracing::info!(
            "connected to job store {}/{}",
            &store.config.database,
            &store.config.collection
        );
        Ok(store)
    }

    pub async fn ping(&self) -> Result<()> {
        within(self.config.op_timeout, "ping", self.probe()).await
    }

    async fn probe(&self) -> mongodb::error::Result<()> {
        self.client
            .database(&self.config.database)
            .run_command(doc! { "ping": 1 })
            .selection_criteria(SelectionCriteria::ReadPreference(ReadPreference::Primary))
            .await?;
        Ok(())
    }

    pub fn selector(&self) -> JobSelector<'_> {
        JobSelector::new(&self.jobs, self.config.op_timeout)
    }

    pub fn mutator(&self) -> JobMutator<'_> {
        JobMutator::new(&self.jobs, self.config.op_timeout)
    }

    pub async fn get_job(&self, id: &str) -> Result<JobListing> {
        let oid = parse_id(id)?;
        self.selector()
            .get_by_id(oid)
            .await?
            .map(JobListing::from)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    pub async fn get_jobs(&self, page: Option<Page>) -> Result<Vec<JobListing>> {
        let page = page.map(|p| p.clamped(self.config.max_page_size));
        let rows = self.selector().get_all(page).await?;
        Ok(rows.into_iter().map(JobListing::from).collect())
    }

    pub async fn count_jobs(&self) -> Result<u64> {
        self.selector().count().await
    }

    pub async fn create_job_listing(&self, input: CreateJobListingInput) -> Result<JobListing> {
        let row = self.mutator().create(input).await?;
        Ok(row.into())
    }

    pub async fn update_job_listing(
        &self,
        id: &str,
        input: UpdateJobListingInput,
    ) -> Result<JobListing> {
        let oid = parse_id(id)?;
        let row = if input.is_empty() {
            // an empty $set is rejected by the server
            self.selector().get_by_id(oid).await?
        } else {
            self.mutator().update(oid, input).await?
        };
        row.map(JobListing::from)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    pub async fn delete_job_listing(&self, id: &str) -> Result<DeleteJobResponse> {
        let oid = parse_id(id)?;
        self.mutator().delete(oid).await?;
        Ok(DeleteJobResponse {
            deleted_id: id.to_string(),
        })
    }
}

pub fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| Error::InvalidId(id.to_string()))
}

/// Runs one store call under `limit`; the timer is dropped on every exit path.
pub async fn within<T, F>(limit: Duration, op: &'static str, fut: F) -> Result<T>
where
    F: IntoFuture<Output = mongodb::error::Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => Ok(res?),
        Err(_) => {
            tracing::warn!("{} exceeded {:?}", op, limit);
            Err(Error::Timeout { op, after: limit })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> StoreConfig {
        StoreConfig {
            uri: "mongodb://127.0.0.1:1".into(),
            database: "jobboard_test".into(),
            collection: "jobs".into(),
            connect_timeout: Duration::from_millis(200),
            op_timeout: Duration::from_millis(200),
            max_page_size: 10,
        }
    }

    #[test]
    fn parse_id_accepts_hex_object_ids() {
        let oid = ObjectId::new();
        assert_eq!(parse_id(&oid.to_hex()).unwrap(), oid);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        match parse_id("not-an-id") {
            Err(Error::InvalidId(id)) => assert_eq!(id, "not-an-id"),
            other => panic!("expected InvalidId, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn within_reports_timeouts() {
        let res = within(Duration::from_millis(10), "slow", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, mongodb::error::Error>(())
        })
        .await;
        match res {
            Err(Error::Timeout { op, after }) => {
                assert_eq!(op, "slow");
                assert_eq!(after, Duration::from_millis(10));
            }
            other => panic!("expected Timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn within_passes_results_through() {
        let res = within(Duration::from_secs(1), "fast", async {
            Ok::<_, mongodb::error::Error>(7)
        })
        .await;
        assert_eq!(res.unwrap(), 7);
    }

    #[tokio::test]
    async fn invalid_ids_never_reach_the_store() {
        let store = JobStore::connect_lazy(local_config()).await.unwrap();
        assert!(matches!(store.get_job("zzz").await, Err(Error::InvalidId(_))));
        assert!(matches!(
            store.delete_job_listing("zzz").await,
            Err(Error::InvalidId(_))
        ));
        assert!(matches!(
            store
                .update_job_listing("zzz", UpdateJobListingInput::default())
                .await,
            Err(Error::InvalidId(_))
        ));
    }

    #[tokio::test]
    async fn connect_fails_fast_without_a_server() {
        let res = JobStore::connect(local_config()).await;
        assert!(matches!(
            res,
            Err(Error::Connection(_)) | Err(Error::Timeout { .. })
        ));
    }
}
