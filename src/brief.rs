//! Shoot brief record and prompt construction
//!
//! A [`ShootBrief`] is the structured form a user fills in; [`build_prompt`]
//! turns it into the single natural-language prompt sent to the provider.

use crate::prompts;
use serde::{Deserialize, Serialize};

/// Identifiers of the optional brief fields, in prompt order.
pub const DETAIL_KEYS: [&str; 14] = [
    "projectType",
    "videoTheme",
    "videoTone",
    "colorPalette",
    "lightingStyle",
    "cameraAngles",
    "composition",
    "moodAtmosphere",
    "cameraMovement",
    "settingDetails",
    "participants",
    "wardrobe",
    "hairMakeup",
    "backgrounds",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShootBrief {
    pub main_prompt: String,
    pub project_type: Option<String>,
    pub video_theme: Option<String>,
    pub video_tone: Option<String>,
    pub color_palette: Option<String>,
    pub lighting_style: Option<String>,
    pub camera_angles: Option<String>,
    pub composition: Option<String>,
    pub mood_atmosphere: Option<String>,
    pub camera_movement: Option<String>,
    pub setting_details: Option<String>,
    pub participants: Option<String>,
    pub wardrobe: Option<String>,
    pub hair_makeup: Option<String>,
    pub backgrounds: Option<String>,
}

impl ShootBrief {
    pub fn new(main_prompt: impl Into<String>) -> Self {
        Self {
            main_prompt: main_prompt.into(),
            ..Self::default()
        }
    }

    /// Value of an optional field by its camelCase identifier.
    ///
    /// Unknown identifiers and unset fields both read as `""`.
    pub fn detail(&self, key: &str) -> &str {
        let value = match key {
            "projectType" => &self.project_type,
            "videoTheme" => &self.video_theme,
            "videoTone" => &self.video_tone,
            "colorPalette" => &self.color_palette,
            "lightingStyle" => &self.lighting_style,
            "cameraAngles" => &self.camera_angles,
            "composition" => &self.composition,
            "moodAtmosphere" => &self.mood_atmosphere,
            "cameraMovement" => &self.camera_movement,
            "settingDetails" => &self.setting_details,
            "participants" => &self.participants,
            "wardrobe" => &self.wardrobe,
            "hairMakeup" => &self.hair_makeup,
            "backgrounds" => &self.backgrounds,
            _ => return "",
        };
        value.as_deref().unwrap_or_default()
    }

    /// All optional fields as `(identifier, value)` pairs in [`DETAIL_KEYS`] order.
    pub fn details(&self) -> Vec<(&'static str, &str)> {
        DETAIL_KEYS
            .iter()
            .map(|key| (*key, self.detail(key)))
            .collect()
    }

    /// Build the provider prompt for this brief.
    pub fn prompt(&self) -> String {
        build_prompt(self.main_prompt.trim(), &self.details())
    }
}

/// Format a primary description and its details into a single prompt.
///
/// Details with blank values are skipped; the rest become
/// `- <Human Readable Key>: <value>` lines in the order given.
pub fn build_prompt(main_prompt: &str, details: &[(&str, &str)]) -> String {
    let mut prompt = prompts::render(prompts::BRIEF_PREFIX, &[("main_prompt", main_prompt)]);

    for (key, value) in details {
        if value.trim().is_empty() {
            continue;
        }
        prompt.push_str(&format!("- {}: {}\n", humanize_key(key), value));
    }

    prompt.trim().to_string()
}

/// `"cameraMovement"` → `"Camera Movement"`.
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else {
            if c.is_uppercase() {
                out.push(' ');
            }
            out.push(c);
        }
    }
    out
}
