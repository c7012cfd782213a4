//! Project schema definitions.
//!
//! Every physical field is optional: a project names a preset and overrides
//! only what differs from it.

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub pipe: PipeDef,
    #[serde(default)]
    pub numerics: NumericsDef,
    #[serde(default)]
    pub run: RunDef,
}

impl Project {
    /// Empty project on the given preset.
    pub fn new(name: impl Into<String>, preset: PresetDef) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            pipe: PipeDef {
                preset,
                ..PipeDef::default()
            },
            numerics: NumericsDef::default(),
            run: RunDef::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PresetDef {
    #[default]
    WallExchange,
    TransportOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PipeDef {
    #[serde(default)]
    pub preset: PresetDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_radius_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_thickness_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity_m_per_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluid: Option<FluidDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall: Option<WallMaterialDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_inner: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_outer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_init: Option<WallInitDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FluidDef {
    pub density: f64,
    pub specific_heat: f64,
    pub conductivity: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WallMaterialDef {
    pub density: f64,
    pub specific_heat: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WallInitDef {
    Fixed { temperature_c: f64 },
    FirstAmbient,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoundingDef {
    Ceil,
    FloorPlusOne,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NumericsDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounding: Option<RoundingDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axial_diffusion: Option<bool>,
}

/// Run defaults and work limits applied at the service boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RunDef {
    /// Sample interval (s) used when the request does not carry one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_samples: Option<usize>,
    /// Upper bound on samples × sub-steps per sample
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_total_substeps: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_uses_defaults() {
        let yaml = "version: 1\nname: bare\n";
        let p: Project = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(p.pipe.preset, PresetDef::WallExchange);
        assert!(p.pipe.length_m.is_none());
        assert_eq!(p.numerics, NumericsDef::default());
    }

    #[test]
    fn tagged_wall_init_and_snake_case_enums() {
        let yaml = r#"
version: 1
name: tagged
pipe:
  preset: transport_only
  wall_init: { type: fixed, temperature_c: 25.0 }
numerics:
  rounding: floor_plus_one
"#;
        let p: Project = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(p.pipe.preset, PresetDef::TransportOnly);
        assert_eq!(
            p.pipe.wall_init,
            Some(WallInitDef::Fixed {
                temperature_c: 25.0
            })
        );
        assert_eq!(p.numerics.rounding, Some(RoundingDef::FloorPlusOne));
    }

    #[test]
    fn wall_init_tags_are_snake_case() {
        let mut p = Project::new("tags", PresetDef::WallExchange);
        p.pipe.wall_init = Some(WallInitDef::FirstAmbient);
        let yaml = serde_yaml::to_string(&p).unwrap();
        assert!(yaml.contains("type: first_ambient"), "{yaml}");

        p.pipe.wall_init = Some(WallInitDef::Fixed { temperature_c: 39.0 });
        let yaml = serde_yaml::to_string(&p).unwrap();
        assert!(yaml.contains("type: fixed"), "{yaml}");

        let legacy = "version: 1\nname: x\npipe:\n  wall_init: { type: Fixed, temperature_c: 1.0 }\n";
        assert!(serde_yaml::from_str::<Project>(legacy).is_err());
    }

    #[test]
    fn unset_overrides_are_not_serialized() {
        let p = Project::new("lean", PresetDef::WallExchange);
        let yaml = serde_yaml::to_string(&p).unwrap();
        assert!(!yaml.contains("length_m"));
        assert!(yaml.contains("wall_exchange"));
    }
}
