use chrono::{DateTime, Utc};
use contracts::dashboards::d402_hourly_sales::{Dataset, LoadState};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::error::{DashboardError, DashboardResult};

pub const NOT_LOADED_MESSAGE: &str =
    "enter or upload data and confirm it with the load button before analysis";
pub const NO_DATASET_MESSAGE: &str = "no dataset to confirm, upload a CSV or submit the template first";

#[derive(Debug, Default)]
struct SessionInner {
    dataset: Option<Dataset>,
    loaded: bool,
    updated_at: Option<DateTime<Utc>>,
    confirmed_at: Option<DateTime<Utc>>,
}

impl SessionInner {
    fn load_state(&self) -> LoadState {
        match &self.dataset {
            Some(dataset) => LoadState {
                dataset_id: Some(dataset.id),
                source: Some(dataset.source.clone()),
                row_count: dataset.row_count(),
                loaded: self.loaded,
                updated_at: self.updated_at,
                confirmed_at: self.confirmed_at,
            },
            None => LoadState::empty(),
        }
    }
}

/// Dashboard session (in-memory, lives as long as the process)
///
/// Holds the current dataset and the "loaded" gate. The dataset is only ever
/// replaced as a whole; readers get a cloned snapshot.
#[derive(Clone, Default)]
pub struct DashboardSession {
    inner: Arc<RwLock<SessionInner>>,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DashboardResult<RwLockReadGuard<'_, SessionInner>> {
        self.inner
            .read()
            .map_err(|_| DashboardError::Internal("session lock poisoned".to_string()))
    }

    fn write(&self) -> DashboardResult<RwLockWriteGuard<'_, SessionInner>> {
        self.inner
            .write()
            .map_err(|_| DashboardError::Internal("session lock poisoned".to_string()))
    }

    /// Replace the current dataset. The new dataset has to be confirmed again.
    pub fn replace(&self, dataset: Dataset) -> DashboardResult<LoadState> {
        let mut inner = self.write()?;
        tracing::info!(
            "D402 Session: dataset {} replaced ({} rows, source {:?})",
            dataset.id,
            dataset.row_count(),
            dataset.source
        );
        inner.dataset = Some(dataset);
        inner.loaded = false;
        inner.updated_at = Some(Utc::now());
        inner.confirmed_at = None;
        Ok(inner.load_state())
    }

    /// Explicit confirmation that flips the "loaded" gate.
    pub fn confirm(&self) -> DashboardResult<LoadState> {
        let mut inner = self.write()?;
        let Some(dataset_id) = inner.dataset.as_ref().map(|d| d.id) else {
            return Err(DashboardError::NotLoaded(NO_DATASET_MESSAGE.to_string()));
        };
        inner.loaded = true;
        inner.confirmed_at = Some(Utc::now());
        tracing::info!("D402 Session: dataset {} confirmed", dataset_id);
        Ok(inner.load_state())
    }

    pub fn state(&self) -> DashboardResult<LoadState> {
        Ok(self.read()?.load_state())
    }

    /// Current dataset, confirmed or not.
    pub fn dataset(&self) -> DashboardResult<Option<Dataset>> {
        Ok(self.read()?.dataset.clone())
    }

    /// Snapshot of the dataset for analysis; refuses until confirmed.
    pub fn confirmed_dataset(&self) -> DashboardResult<Dataset> {
        let inner = self.read()?;
        match (&inner.dataset, inner.loaded) {
            (Some(dataset), true) => Ok(dataset.clone()),
            _ => Err(DashboardError::NotLoaded(NOT_LOADED_MESSAGE.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d402_hourly_sales::{DatasetSource, SalesRow};

    fn dataset() -> Dataset {
        Dataset::new(
            DatasetSource::Template,
            vec![SalesRow::new("10時", 800.0, 400.0, 15, 1500.0)],
        )
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = DashboardSession::new();
        let state = session.state().unwrap();
        assert!(!state.loaded);
        assert!(state.dataset_id.is_none());
        assert!(session.dataset().unwrap().is_none());
    }

    #[test]
    fn test_analysis_blocked_until_confirmed() {
        let session = DashboardSession::new();
        session.replace(dataset()).unwrap();

        let err = session.confirmed_dataset().unwrap_err();
        assert!(matches!(err, DashboardError::NotLoaded(_)));

        let state = session.confirm().unwrap();
        assert!(state.loaded);
        assert!(state.confirmed_at.is_some());
        assert_eq!(session.confirmed_dataset().unwrap().row_count(), 1);
    }

    #[test]
    fn test_confirm_without_dataset_fails() {
        let session = DashboardSession::new();
        let err = session.confirm().unwrap_err();
        assert!(matches!(err, DashboardError::NotLoaded(_)));
        assert!(!session.state().unwrap().loaded);
    }

    #[test]
    fn test_replace_clears_loaded_flag() {
        let session = DashboardSession::new();
        session.replace(dataset()).unwrap();
        session.confirm().unwrap();

        let next = dataset();
        let next_id = next.id;
        let state = session.replace(next).unwrap();
        assert!(!state.loaded);
        assert_eq!(state.dataset_id, Some(next_id));
        assert!(state.confirmed_at.is_none());
        assert!(session.confirmed_dataset().is_err());
    }

    #[test]
    fn test_clones_share_state() {
        let session = DashboardSession::new();
        let handle = session.clone();
        session.replace(dataset()).unwrap();
        assert_eq!(handle.state().unwrap().row_count, 1);
    }
}
