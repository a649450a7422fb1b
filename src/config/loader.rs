//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading and validating
//! scheduler configurations from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::calculation::{is_balanced, sequential_rotation_table, validate_rotation_table};
use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{Crew, RotationRule};

use super::types::{CrewDefinition, SchedulerConfig, SchedulerSettings};

/// Loads, validates and provides access to scheduler configuration.
///
/// Every rotation-shape problem is reported here, at load time, so the
/// scheduling functions never have to fail at query time.
///
/// # Directory Structure
///
/// ```text
/// config/noc/
/// ├── scheduler.yaml   # Overtime minutes, responsibilities, storage timeout
/// └── crews/
///     ├── a.yaml       # One crew per file
///     ├── b.yaml
///     └── c.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_rota::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/noc")?;
/// let crew = loader.get_crew("A")?;
/// println!("{} starts on {}", crew.name, crew.anchor_date);
/// # Ok::<(), shift_rota::error::SchedulerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SchedulerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `scheduler.yaml` or the `crews` directory is
    /// missing, if any file contains invalid YAML, or if any crew describes an
    /// impossible rotation.
    pub fn load<P: AsRef<Path>>(path: P) -> SchedulerResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<SchedulerSettings>(&path.join("scheduler.yaml"))?;
        let crews = Self::load_crews(&path.join("crews"))?;

        let loader = Self::from_parts(settings, crews)?;
        info!(
            path = %path.display(),
            crews = loader.config.crews().len(),
            "Scheduler configuration loaded"
        );
        Ok(loader)
    }

    /// Builds and validates a configuration from in-memory parts.
    pub fn from_parts(
        settings: SchedulerSettings,
        definitions: Vec<CrewDefinition>,
    ) -> SchedulerResult<Self> {
        Self::validate_settings(&settings)?;

        let mut crews = definitions
            .into_iter()
            .map(Self::build_crew)
            .collect::<SchedulerResult<Vec<_>>>()?;
        crews.sort_by(|a, b| a.id.cmp(&b.id));

        if let Some(pair) = crews.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(SchedulerError::InvalidConfig {
                subject: pair[0].id.clone(),
                message: "crew id is defined more than once".to_string(),
            });
        }

        let mut members = HashMap::new();
        for (crew_index, crew) in crews.iter().enumerate() {
            for (member_index, member) in crew.roster.iter().enumerate() {
                if members
                    .insert(member.id.clone(), (crew_index, member_index))
                    .is_some()
                {
                    return Err(SchedulerError::InvalidConfig {
                        subject: crew.id.clone(),
                        message: format!("member '{}' appears in more than one roster slot", member.id),
                    });
                }
            }
        }

        Ok(Self {
            config: SchedulerConfig::new(settings, crews, members),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> SchedulerResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| SchedulerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| SchedulerError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all crew files from the crews directory.
    fn load_crews(crews_dir: &Path) -> SchedulerResult<Vec<CrewDefinition>> {
        let crews_dir_str = crews_dir.display().to_string();

        let entries = fs::read_dir(crews_dir).map_err(|_| SchedulerError::ConfigNotFound {
            path: crews_dir_str.clone(),
        })?;

        let mut crews = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| SchedulerError::ConfigNotFound {
                path: crews_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                crews.push(Self::load_yaml::<CrewDefinition>(&path)?);
            }
        }

        if crews.is_empty() {
            return Err(SchedulerError::ConfigNotFound {
                path: format!("{} (no crew files found)", crews_dir_str),
            });
        }

        Ok(crews)
    }

    fn validate_settings(settings: &SchedulerSettings) -> SchedulerResult<()> {
        let invalid = |message: &str| SchedulerError::InvalidConfig {
            subject: "scheduler".to_string(),
            message: message.to_string(),
        };

        if settings.overtime_minutes_per_worked_day == 0 {
            return Err(invalid("overtime_minutes_per_worked_day must be positive"));
        }
        if settings.storage_timeout_ms == 0 {
            return Err(invalid("storage_timeout_ms must be positive"));
        }
        if settings.responsibilities.iter().any(|r| r.trim().is_empty()) {
            return Err(invalid("responsibility labels must not be blank"));
        }
        Ok(())
    }

    /// Validates a crew definition and resolves its defaults.
    fn build_crew(definition: CrewDefinition) -> SchedulerResult<Crew> {
        let invalid = |message: String| SchedulerError::InvalidConfig {
            subject: definition.id.clone(),
            message,
        };

        if definition.cycle_length == 0 {
            return Err(invalid("cycle_length must be positive".to_string()));
        }
        if definition.work_days == 0 || definition.work_days % 2 != 0 {
            return Err(invalid(format!(
                "work_days must be a positive even number, got {}",
                definition.work_days
            )));
        }
        if definition.work_days > definition.cycle_length {
            return Err(invalid(format!(
                "work_days ({}) exceeds cycle_length ({})",
                definition.work_days, definition.cycle_length
            )));
        }
        if definition.roster.len() < 2 {
            return Err(invalid(
                "individual rest rotation needs at least two members".to_string(),
            ));
        }

        let rest_window_start_day = definition
            .rest_window_start_day
            .unwrap_or(definition.work_days / 2 + 1);
        if rest_window_start_day == 0 || rest_window_start_day > definition.work_days {
            return Err(invalid(format!(
                "rest_window_start_day must be within block days 1..={}",
                definition.work_days
            )));
        }
        let slots = definition.work_days + 1 - rest_window_start_day;

        let rotation_table = match (definition.rotation_rule, definition.rotation_table.clone()) {
            (RotationRule::PermutationTable, Some(table)) => {
                validate_rotation_table(&table, definition.roster.len(), slots)
                    .map_err(&invalid)?;
                if !is_balanced(&table, definition.roster.len()) {
                    warn!(
                        crew_id = %definition.id,
                        rows = table.len(),
                        "Rotation table does not rest every member equally often"
                    );
                }
                table
            }
            (RotationRule::PermutationTable, None) => {
                sequential_rotation_table(definition.roster.len(), slots)
            }
            (RotationRule::LegacyModulo, Some(_)) => {
                return Err(invalid(
                    "rotation_table only applies to the permutation_table rule".to_string(),
                ));
            }
            (RotationRule::LegacyModulo, None) => Vec::new(),
        };

        Ok(Crew {
            id: definition.id,
            name: definition.name,
            color_code: definition.color_code,
            anchor_date: definition.anchor_date,
            cycle_length: definition.cycle_length,
            work_days: definition.work_days,
            rest_window_start_day,
            rotation_rule: definition.rotation_rule,
            rotation_table,
            roster: definition.roster,
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> SchedulerConfig {
        self.config
    }

    /// Gets a crew by its id.
    pub fn get_crew(&self, crew_id: &str) -> SchedulerResult<&Crew> {
        self.config
            .crew(crew_id)
            .ok_or_else(|| SchedulerError::CrewNotFound {
                crew_id: crew_id.to_string(),
            })
    }

    /// Gets the crew a member belongs to, with the member's roster index.
    pub fn crew_for_member(&self, member_id: &str) -> SchedulerResult<(&Crew, usize)> {
        self.config
            .member(member_id)
            .ok_or_else(|| SchedulerError::MemberNotAssigned {
                member_id: member_id.to_string(),
            })
    }
}
