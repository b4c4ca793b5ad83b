// src/types/preferences.rs
//! Student preference questionnaire, filled in step by step

use serde::{Deserialize, Serialize};

pub const PREFERENCE_STEPS: u8 = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPreferences {
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub study_level: Option<String>,
    pub study_field: Option<String>,
    #[serde(default)]
    pub looking_for: Vec<String>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub availability: Option<String>,
    #[serde(default)]
    pub current_step: u8,
    #[serde(default)]
    pub is_completed: bool,
}

/// Payload for one questionnaire step. `data` carries the step's own fields.
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceStepRequest {
    pub step: u8,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesProgress {
    pub current_step: u8,
    #[serde(default = "default_total_steps")]
    pub total_steps: u8,
    #[serde(default)]
    pub is_completed: bool,
}

fn default_total_steps() -> u8 {
    PREFERENCE_STEPS
}

impl PreferencesProgress {
    /// Completion ratio in percent, clamped to 100
    pub fn percentage(&self) -> u8 {
        if self.is_completed {
            return 100;
        }
        if self.total_steps == 0 {
            return 0;
        }
        let pct = u32::from(self.current_step) * 100 / u32::from(self.total_steps);
        pct.min(100) as u8
    }
}
