//! Project loading, saving, and compilation into an engine configuration.

use std::path::Path;

use pt_project::{
    FluidDef, NumericsDef, PipeDef, PresetDef, Project, RoundingDef, RunDef, WallInitDef,
    WallMaterialDef,
};
use pt_sim::{FluidProps, PipeConfig, StepRounding, WallInit, WallProps};

use crate::error::{AppError, AppResult};
use crate::run_service::{RunLimits, RunOptions};

/// Load and validate a project file (`.yaml`, `.yml` or `.json`).
pub fn load_project(path: &Path) -> AppResult<Project> {
    Ok(pt_project::load(path)?)
}

/// Validate and save a project file, format chosen by extension.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    Ok(pt_project::save(path, project)?)
}

pub fn preset_config(preset: PresetDef) -> PipeConfig {
    match preset {
        PresetDef::WallExchange => PipeConfig::wall_exchange(),
        PresetDef::TransportOnly => PipeConfig::transport_only(),
    }
}

/// Apply project overrides on top of the named preset.
pub fn compile_config(project: &Project) -> AppResult<PipeConfig> {
    let pipe = &project.pipe;
    let mut cfg = preset_config(pipe.preset);

    if let Some(v) = pipe.length_m {
        cfg.length_m = v;
    }
    if let Some(v) = pipe.inner_radius_m {
        cfg.inner_radius_m = v;
    }
    if let Some(v) = pipe.wall_thickness_m {
        cfg.wall_thickness_m = v;
    }
    if let Some(v) = pipe.velocity_m_per_s {
        cfg.velocity_m_per_s = v;
    }
    if let Some(v) = pipe.cells {
        cfg.cells = v;
    }
    if let Some(f) = pipe.fluid {
        cfg.fluid = FluidProps {
            density: f.density,
            specific_heat: f.specific_heat,
            conductivity: f.conductivity,
        };
    }
    if let Some(w) = pipe.wall {
        cfg.wall = WallProps {
            density: w.density,
            specific_heat: w.specific_heat,
        };
    }
    if let Some(v) = pipe.h_inner {
        cfg.h_inner = v;
    }
    if let Some(v) = pipe.h_outer {
        cfg.h_outer = v;
    }
    if let Some(init) = pipe.wall_init {
        cfg.wall_init = match init {
            WallInitDef::Fixed { temperature_c } => WallInit::Fixed(temperature_c),
            WallInitDef::FirstAmbient => WallInit::FirstAmbient,
        };
    }

    let numerics = &project.numerics;
    if let Some(v) = numerics.safety_factor {
        cfg.numerics.safety_factor = v;
    }
    if let Some(r) = numerics.rounding {
        cfg.numerics.rounding = match r {
            RoundingDef::Ceil => StepRounding::Ceil,
            RoundingDef::FloorPlusOne => StepRounding::FloorPlusOne,
        };
    }
    if let Some(v) = numerics.axial_diffusion {
        cfg.numerics.axial_diffusion = v;
    }

    cfg.validate()
        .map_err(|e| AppError::Config(format!("project '{}': {}", project.name, e)))?;
    Ok(cfg)
}

/// Service options (default interval, work limits) declared by a project.
pub fn run_options(project: &Project) -> RunOptions {
    let defaults = RunOptions::default();
    RunOptions {
        default_interval_s: project.run.interval_s.unwrap_or(defaults.default_interval_s),
        limits: RunLimits {
            max_samples: project.run.max_samples.unwrap_or(defaults.limits.max_samples),
            max_total_substeps: project
                .run
                .max_total_substeps
                .unwrap_or(defaults.limits.max_total_substeps),
        },
    }
}

/// Project listing every value of `config` explicitly, for templates.
pub fn project_from_config(name: &str, preset: PresetDef, config: &PipeConfig) -> Project {
    let defaults = RunOptions::default();
    Project {
        version: pt_project::LATEST_VERSION,
        name: name.to_string(),
        pipe: PipeDef {
            preset,
            length_m: Some(config.length_m),
            inner_radius_m: Some(config.inner_radius_m),
            wall_thickness_m: Some(config.wall_thickness_m),
            velocity_m_per_s: Some(config.velocity_m_per_s),
            cells: Some(config.cells),
            fluid: Some(FluidDef {
                density: config.fluid.density,
                specific_heat: config.fluid.specific_heat,
                conductivity: config.fluid.conductivity,
            }),
            wall: Some(WallMaterialDef {
                density: config.wall.density,
                specific_heat: config.wall.specific_heat,
            }),
            h_inner: Some(config.h_inner),
            h_outer: Some(config.h_outer),
            wall_init: Some(match config.wall_init {
                WallInit::Fixed(t) => WallInitDef::Fixed { temperature_c: t },
                WallInit::FirstAmbient => WallInitDef::FirstAmbient,
            }),
        },
        numerics: NumericsDef {
            safety_factor: Some(config.numerics.safety_factor),
            rounding: Some(match config.numerics.rounding {
                StepRounding::Ceil => RoundingDef::Ceil,
                StepRounding::FloorPlusOne => RoundingDef::FloorPlusOne,
            }),
            axial_diffusion: Some(config.numerics.axial_diffusion),
        },
        run: RunDef {
            interval_s: Some(defaults.default_interval_s),
            max_samples: Some(defaults.limits.max_samples),
            max_total_substeps: Some(defaults.limits.max_total_substeps),
        },
    }
}
