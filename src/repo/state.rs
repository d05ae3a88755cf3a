use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use anyhow::Context;
use serde::Deserialize;
use serde::de::IgnoredAny;
use crate::domain::{AnnouncedState, GiveawayId};

/// Accepted layouts of the state file. Only the list is ever written back.
#[derive(Deserialize)]
#[serde(untagged)]
enum StateFile {
    List(Vec<GiveawayId>),
    // keys of a JSON object are always strings
    Map(BTreeMap<String, IgnoredAny>),
}

impl TryFrom<StateFile> for AnnouncedState {
    type Error = ParseIntError;

    fn try_from(value: StateFile) -> Result<Self, Self::Error> {
        match value {
            StateFile::List(ids) => Ok(ids.into_iter().collect()),
            StateFile::Map(ids) => ids.keys()
                .map(|key| key.trim().parse().map(GiveawayId))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, derive_more::Constructor)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing, empty or corrupted file is read as an empty state,
    /// otherwise a single broken write would block all future runs.
    pub fn load(&self) -> AnnouncedState {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("no state file was found at {}, starting fresh", self.path.display());
                return AnnouncedState::default()
            }
            Err(e) => {
                log::warn!("couldn't read the state file {}, starting fresh: {e}", self.path.display());
                return AnnouncedState::default()
            }
        };
        if content.trim().is_empty() {
            log::info!("the state file {} is empty", self.path.display());
            return AnnouncedState::default()
        }

        let parsed = serde_json::from_str::<StateFile>(&content)
            .map_err(anyhow::Error::from)
            .and_then(|file| AnnouncedState::try_from(file).map_err(Into::into));
        match parsed {
            Ok(state) => {
                log::info!("loaded {} previously sent giveaway IDs from {}", state.len(), self.path.display());
                state
            }
            Err(e) => {
                log::warn!("corrupted state file {}, starting fresh: {e}", self.path.display());
                AnnouncedState::default()
            }
        }
    }

    /// Replaces the file atomically: the content goes to a sibling temporary file first.
    pub fn save(&self, state: &AnnouncedState) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("couldn't create the directory {}", dir.display()))?;
        }

        let mut content = serde_json::to_string_pretty(state)?;
        content.push('\n');

        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, content)
            .with_context(|| format!("couldn't write {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("couldn't replace {}", self.path.display()))?;

        log::info!("saved {} sent giveaway IDs to {}", state.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut file_name = self.path.file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| "state.json".into());
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}
