use async_trait::async_trait;
use fedit_error::Result;
use std::time::Duration;

/// Proof of holding a lease
///
/// The value is unique per acquisition so that a holder whose lease expired
/// can't release the lease of the next holder
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockToken {
    pub key: String,
    pub value: String,
}

#[async_trait]
pub trait Locker: Send + Sync + 'static {
    /// Try to take the lease on the key
    ///
    /// Returns `None` if someone else currently holds it. Never waits.
    async fn try_acquire(&self, key: &str, lease: Duration) -> Result<Option<LockToken>>;

    /// Give the lease back early
    ///
    /// Releasing a lease that already expired is not an error
    async fn release(&self, token: LockToken) -> Result<()>;
}
