use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use growth_desk::DashboardState;

/// JSON file holding the dashboard state between runs.
pub struct StateStore {
    path: PathBuf,
    state: Mutex<DashboardState>,
}

impl StateStore {
    pub async fn load(path: PathBuf) -> Result<Self, String> {
        let state = if path.exists() {
            let data = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| format!("failed to read state: {}", err))?;
            if data.trim().is_empty() {
                DashboardState::default()
            } else {
                serde_json::from_str(&data).map_err(|err| format!("failed to parse state: {}", err))?
            }
        } else {
            DashboardState::default()
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub async fn snapshot(&self) -> DashboardState {
        let guard = self.state.lock().await;
        guard.clone()
    }

    /// Applies `change` to a copy and persists it when it reports a change.
    /// The in-memory state only moves forward once the write succeeded.
    pub async fn update<T, F>(&self, change: F) -> Result<T, String>
    where
        F: FnOnce(&mut DashboardState) -> (T, bool),
    {
        let mut guard = self.state.lock().await;
        let mut next = guard.clone();
        let (result, changed) = change(&mut next);
        if changed {
            self.persist(&next).await?;
            *guard = next;
        }
        Ok(result)
    }

    async fn persist(&self, state: &DashboardState) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(state)
            .map_err(|err| format!("failed to serialize state: {}", err))?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload)
            .await
            .map_err(|err| format!("failed to write state: {}", err))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|err| format!("failed to finalize state: {}", err))?;
        Ok(())
    }
}

async fn ensure_dir(path: &Path) -> Result<(), String> {
    if path.as_os_str().is_empty() || path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| format!("failed to create state dir: {}", err))
}
