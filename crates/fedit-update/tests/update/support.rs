use fedit_cache::InMemoryCache;
use fedit_config::media;
use fedit_core::event::{StatusEvent, StatusEventEmitter};
use fedit_db::{
    model::{account::Account, preview_card::PreviewCard, status::Status},
    MemoryStore,
};
use fedit_federation_filter::MediaRejectFilter;
use fedit_jobs::{channel::ChannelJobQueue, JobDetails, JobService};
use fedit_lock::InMemoryLocker;
use fedit_test::{
    fixtures::{self, remote_account, timestamp},
    FakeFederation, MockClock,
};
use fedit_update::{Settings, StatusUpdateService};
use moka::future::Cache;
use smol_str::SmolStr;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

pub const NOW: &str = "2024-03-02T10:00:00Z";
pub const FIRST_EDIT: &str = "2024-03-02T09:00:00Z";
pub const SECOND_EDIT: &str = "2024-03-02T09:30:00Z";

/// Update service wired to in-process doubles, with one remote status seeded
pub struct Harness {
    pub service: StatusUpdateService,
    pub store: MemoryStore,
    pub locker: Arc<InMemoryLocker>,
    pub clock: MockClock,
    pub federation: Arc<FakeFederation>,
    /// Entries seen by the link preview cache of the service
    pub link_previews: Cache<String, PreviewCard>,
    pub jobs: mpsc::UnboundedReceiver<JobDetails>,
    pub events: broadcast::Receiver<StatusEvent>,
    pub author: Account,
    pub status: Status,
}

pub struct HarnessBuilder {
    author: Account,
    federation: FakeFederation,
    reject_domains: Vec<SmolStr>,
    settings: Settings,
}

impl HarnessBuilder {
    pub fn author(mut self, author: Account) -> Self {
        self.author = author;
        self
    }

    pub fn federation(mut self, federation: FakeFederation) -> Self {
        self.federation = federation;
        self
    }

    pub fn reject_domain(mut self, glob: &str) -> Self {
        self.reject_domains.push(SmolStr::new(glob));
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub async fn build(self) -> Harness {
        let store = MemoryStore::new();
        let status = fixtures::status(&self.author, "hello world");
        {
            let author = self.author.clone();
            let status = status.clone();
            store
                .seed(move |tables| {
                    tables.accounts.insert(author.id, author);
                    tables.statuses.insert(status.id, status);
                })
                .await;
        }

        let locker = Arc::new(InMemoryLocker::new());
        let clock = MockClock::new(timestamp(NOW));
        let federation = Arc::new(self.federation);
        let link_previews = Cache::new(100);

        let (job_queue, jobs) = ChannelJobQueue::new();
        let emitter = Arc::new(StatusEventEmitter::default());
        let events = emitter.subscribe();

        let media_policy = MediaRejectFilter::new(&media::Configuration {
            reject_domains: self.reject_domains,
            ..media::Configuration::default()
        })
        .unwrap();

        let service = StatusUpdateService::builder()
            .store(Arc::new(store.clone()))
            .locker(locker.clone())
            .clock(Arc::new(clock.clone()))
            .account_resolver(federation.clone())
            .fetcher(federation.clone())
            .media_policy(Arc::new(media_policy))
            .job_service(JobService::builder().job_queue(Arc::new(job_queue)).build())
            .broadcaster(emitter)
            .link_preview_cache(Arc::new(
                InMemoryCache::<Uuid, _>::shared(link_previews.clone()).into(),
            ))
            .settings(self.settings)
            .build();

        Harness {
            service,
            store,
            locker,
            clock,
            federation,
            link_previews,
            jobs,
            events,
            author: self.author,
            status,
        }
    }
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder {
            author: remote_account("alice", "remote.example"),
            federation: FakeFederation::new(),
            reject_domains: Vec::new(),
            settings: Settings::default(),
        }
    }

    pub async fn new() -> Self {
        Self::builder().build().await
    }

    /// Committed state of the seeded status
    pub async fn stored_status(&self) -> Status {
        let id = self.status.id;
        self.store
            .read(|tables| tables.statuses[&id].clone())
            .await
    }

    /// Jobs enqueued so far
    pub fn drain_jobs(&mut self) -> Vec<JobDetails> {
        let mut jobs = Vec::new();
        while let Ok(job) = self.jobs.try_recv() {
            jobs.push(job);
        }
        jobs
    }
}
