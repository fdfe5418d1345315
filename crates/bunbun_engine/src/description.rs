use bunbun_assets::AssetPath;
use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::camera::CameraInterpolation;
use crate::services::Color;

/// A level file, as authored in JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDescription {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub camera_list: Vec<CameraDescription>,
    /// Entity type name to a list of property bags, in document order.
    #[serde(default)]
    pub object_list: Map<String, Value>,
    #[serde(default)]
    pub asset_list: Vec<AssetDescription>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraDescription {
    pub name: String,
    pub center: [f32; 2],
    pub width: f32,
    pub viewport: [i32; 4],
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default)]
    pub interpolation: Option<CameraInterpolation>,
}

fn default_background() -> Color {
    [0.8, 0.8, 0.8, 1.0]
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetDescription {
    pub name: AssetPath,
    /// Kept as text: an unknown kind is a warning, not a parse failure.
    #[serde(rename = "type")]
    pub kind: String,
}

impl LevelDescription {
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Every `(type name, property bag)` pair in document order. Entries
    /// whose value is not a list are skipped with a warning.
    pub fn instances(&self) -> Vec<(&str, &Value)> {
        let mut out = Vec::new();
        for (type_name, list) in &self.object_list {
            match list.as_array() {
                Some(bags) => out.extend(bags.iter().map(|bag| (type_name.as_str(), bag))),
                None => warn!("objectList entry `{type_name}` is not a list, skipping"),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"{
        "name": "Level 0",
        "cameraList": [
            {"name": "main", "center": [0, 20], "width": 100, "viewport": [0, 0, 800, 600],
             "interpolation": {"smoothing": 0.1, "maxStep": 1.0}}
        ],
        "objectList": {
            "Water": [{"position": [0, -120]}],
            "Player": [{"position": [0, 10], "__hasPhysics": true}],
            "Broken": {"position": [1, 1]},
            "Carrot": [{"position": [20, 30]}, {"position": [40, 30]}]
        },
        "assetList": [
            {"name": "assets/textures/carrotSlice.png", "type": "texture"},
            {"name": "assets/shaders/glow.glsl", "type": "shader"}
        ]
    }"#;

    #[test]
    fn parses_cameras_and_assets() {
        let level = LevelDescription::parse(LEVEL).unwrap();
        assert_eq!(level.name, "Level 0");
        assert_eq!(level.camera_list.len(), 1);
        let camera = &level.camera_list[0];
        assert_eq!(camera.background, default_background());
        assert_eq!(
            camera.interpolation,
            Some(CameraInterpolation {
                smoothing: 0.1,
                max_step: 1.0
            })
        );
        assert_eq!(level.asset_list[1].kind, "shader");
    }

    #[test]
    fn instances_keep_document_order_and_skip_non_lists() {
        let level = LevelDescription::parse(LEVEL).unwrap();
        let names: Vec<&str> = level.instances().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["Water", "Player", "Carrot", "Carrot"]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let level = LevelDescription::parse(r#"{"name": "Empty"}"#).unwrap();
        assert!(level.camera_list.is_empty());
        assert!(level.instances().is_empty());
    }
}
