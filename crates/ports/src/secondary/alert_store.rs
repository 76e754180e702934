use std::future::Future;
use std::pin::Pin;

use domain::alert::entity::AlertRecord;
use domain::common::error::DomainError;

/// Secondary port for reading alert documents from the alert index.
/// Read-only: this system never writes alerts.
pub trait AlertStore: Send + Sync {
    /// Fetch one alert by document id. `None` if no such document exists.
    fn fetch_alert<'a>(
        &'a self,
        id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<AlertRecord>, DomainError>> + Send + 'a>>;
}
