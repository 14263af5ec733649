use async_trait::async_trait;
use fedit_core::traits::{AccountResolver, Fetcher};
use fedit_db::model::account::Account;
use fedit_error::{bail, Result};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::sync::Notify;

/// Lets a test park a fetch call until it decides to let it continue
#[derive(Clone, Default)]
pub struct Gate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    /// Wait until a fetch call is parked at the gate
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn open(&self) {
        self.release.notify_one();
    }
}

/// Account resolver and fetcher backed by maps
#[derive(Default)]
pub struct FakeFederation {
    local: HashMap<String, Account>,
    remote: HashMap<String, Account>,
    failing: bool,
    delay: Option<Duration>,
    gate: Option<Gate>,
    fetch_calls: AtomicUsize,
}

impl FakeFederation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Account known locally
    #[must_use]
    pub fn with_local(mut self, account: Account) -> Self {
        self.local.insert(account.uri.clone(), account);
        self
    }

    /// Account only reachable through a fetch
    #[must_use]
    pub fn with_remote(mut self, account: Account) -> Self {
        self.remote.insert(account.uri.clone(), account);
        self
    }

    /// Every fetch fails as if the origin was unreachable
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    #[must_use]
    pub fn gated(mut self) -> (Self, Gate) {
        let gate = Gate::default();
        self.gate = Some(gate.clone());
        (self, gate)
    }

    #[must_use]
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::Acquire)
    }
}

#[async_trait]
impl AccountResolver for FakeFederation {
    async fn resolve_local_account(&self, uri: &str) -> Result<Option<Account>> {
        Ok(self.local.get(uri).cloned())
    }
}

#[async_trait]
impl Fetcher for FakeFederation {
    async fn fetch_account(&self, uri: &str) -> Result<Option<Account>> {
        self.fetch_calls.fetch_add(1, Ordering::AcqRel);

        if let Some(ref gate) = self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing {
            bail!("connection refused");
        }

        Ok(self.remote.get(uri).cloned())
    }
}
