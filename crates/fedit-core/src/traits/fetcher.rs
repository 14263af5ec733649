use async_trait::async_trait;
use fedit_db::model::account::Account;
use fedit_error::Result;

#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    /// Fetch the account from its origin and store it locally
    async fn fetch_account(&self, uri: &str) -> Result<Option<Account>>;
}
