use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("run count {requested} is outside 1..={max}")]
    InvalidRunCount { requested: u32, max: u32 },

    #[error("{0} is not a configured preset")]
    UnknownPreset(u32),
}

/// How many questions the user asked for at the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLength {
    /// One of the configured presets; clamped to the dataset size.
    Preset(u32),
    /// A free count; must lie within `1..=dataset size`.
    Custom(u32),
}

/// Menu configuration for a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    run_presets: Vec<u32>,
}

impl QuizSettings {
    #[must_use]
    pub fn run_presets(&self) -> &[u32] {
        &self.run_presets
    }

    /// Resolve the requested run length against a dataset of `dataset_len` rows.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::UnknownPreset` for a preset that is not configured.
    /// Returns `SettingsError::InvalidRunCount` for a custom count outside `1..=dataset_len`.
    pub fn resolve_run_length(&self, requested: RunLength, dataset_len: usize) -> Result<u32, SettingsError> {
        let max = u32::try_from(dataset_len).unwrap_or(u32::MAX);
        match requested {
            RunLength::Preset(n) if !self.run_presets.contains(&n) => Err(SettingsError::UnknownPreset(n)),
            RunLength::Preset(n) if max > 0 => Ok(n.min(max)),
            RunLength::Custom(n) if (1..=max).contains(&n) => Ok(n),
            RunLength::Preset(n) | RunLength::Custom(n) => {
                Err(SettingsError::InvalidRunCount { requested: n, max })
            }
        }
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            run_presets: vec![5, 10],
        }
    }
}
