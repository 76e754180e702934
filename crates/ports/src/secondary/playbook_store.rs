use std::future::Future;
use std::pin::Pin;

use domain::common::error::DomainError;
use domain::playbook::entity::PlaybookDocument;

/// Secondary port for reading playbook documents from the playbook index.
pub trait PlaybookStore: Send + Sync {
    /// Fetch a playbook by name. `None` if no playbook with that name exists.
    fn fetch_playbook<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<PlaybookDocument>, DomainError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyStore;
    impl PlaybookStore for EmptyStore {
        fn fetch_playbook<'a>(
            &'a self,
            _name: &'a str,
        ) -> Pin<
            Box<dyn Future<Output = Result<Option<PlaybookDocument>, DomainError>> + Send + 'a>,
        > {
            Box::pin(async { Ok(None) })
        }
    }

    #[test]
    fn playbook_store_is_dyn_compatible() {
        let store: Box<dyn PlaybookStore> = Box::new(EmptyStore);
        let _ = store;
    }
}
