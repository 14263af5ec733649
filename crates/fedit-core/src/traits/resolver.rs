use async_trait::async_trait;
use fedit_db::model::account::Account;
use fedit_error::Result;

#[async_trait]
pub trait AccountResolver: Send + Sync + 'static {
    /// Find an account we already know about by its URI
    ///
    /// Never touches the network
    async fn resolve_local_account(&self, uri: &str) -> Result<Option<Account>>;
}
