use storage::StorageError;
use tracing::warn;

/// A fetched list together with its request status.
///
/// A failed fetch keeps the previous items and records a short message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loadable<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Loadable<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Settle a fetch started with `begin`. `noun` names the list in the
    /// failure message, e.g. `"players"`.
    pub(crate) fn settle(
        &mut self,
        result: Result<Vec<T>, StorageError>,
        noun: &str,
    ) -> Result<(), StorageError> {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch {noun}");
                self.error = Some(format!("Failed to fetch {noun}"));
                Err(err)
            }
        }
    }
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::new()
    }
}
