use crate::core::DataSource;
use crate::domain::model::Collections;
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Ready,
    /// 載入失敗，以空集合顯示
    Failed,
}

/// The data behind one dashboard, loaded exactly once.
#[derive(Debug, Clone)]
pub struct Dashboard {
    state: LoadState,
    data: Collections,
}

impl Dashboard {
    pub fn loading() -> Self {
        Self {
            state: LoadState::Loading,
            data: Collections::default(),
        }
    }

    /// Fetches all five collections and settles into `Ready` or `Failed`.
    /// Load errors are logged and never returned.
    pub async fn load<D: DataSource + ?Sized>(source: &D) -> Self {
        let mut dashboard = Self::loading();
        dashboard.settle(fetch_all(source).await);
        dashboard
    }

    pub(crate) fn settle(&mut self, result: Result<Collections>) {
        if self.state != LoadState::Loading {
            tracing::warn!("Dashboard already settled as {:?}, ignoring late result", self.state);
            return;
        }

        match result {
            Ok(data) => {
                self.data = data;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                tracing::error!(
                    "❌ Failed to load dashboard data: {} (Category: {:?})",
                    e,
                    e.category()
                );
                self.state = LoadState::Failed;
            }
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn data(&self) -> &Collections {
        &self.data
    }
}

/// Issues the five fetches concurrently. Either every collection is
/// returned or the first error is.
pub async fn fetch_all<D: DataSource + ?Sized>(source: &D) -> Result<Collections> {
    tracing::debug!("Fetching dozenten, teilnehmer, raeume, kurse and anmeldungen");

    let (dozenten, teilnehmer, raeume, kurse, anmeldungen) = tokio::try_join!(
        source.fetch_dozenten(),
        source.fetch_teilnehmer(),
        source.fetch_raeume(),
        source.fetch_kurse(),
        source.fetch_anmeldungen(),
    )?;

    tracing::info!(
        "📊 Loaded {} courses, {} participants, {} rooms, {} instructors, {} registrations",
        kurse.len(),
        teilnehmer.len(),
        raeume.len(),
        dozenten.len(),
        anmeldungen.len()
    );

    Ok(Collections {
        dozenten,
        teilnehmer,
        raeume,
        kurse,
        anmeldungen,
    })
}
