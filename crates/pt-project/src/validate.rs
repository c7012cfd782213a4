//! Project validation logic.

use crate::schema::{LATEST_VERSION, NumericsDef, PipeDef, Project, RunDef, WallInitDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    if project.name.trim().is_empty() {
        return Err(invalid("name", &project.name, "must not be empty"));
    }

    validate_pipe(&project.pipe)?;
    validate_numerics(&project.numerics)?;
    validate_run(&project.run)?;
    Ok(())
}

fn validate_pipe(pipe: &PipeDef) -> Result<(), ValidationError> {
    positive("pipe.length_m", pipe.length_m)?;
    positive("pipe.inner_radius_m", pipe.inner_radius_m)?;
    positive("pipe.wall_thickness_m", pipe.wall_thickness_m)?;
    positive("pipe.velocity_m_per_s", pipe.velocity_m_per_s)?;
    non_negative("pipe.h_inner", pipe.h_inner)?;
    non_negative("pipe.h_outer", pipe.h_outer)?;

    if let Some(cells) = pipe.cells {
        if cells < 2 {
            return Err(invalid("pipe.cells", cells, "at least 2 cells required"));
        }
    }

    if let Some(fluid) = &pipe.fluid {
        positive("pipe.fluid.density", Some(fluid.density))?;
        positive("pipe.fluid.specific_heat", Some(fluid.specific_heat))?;
        positive("pipe.fluid.conductivity", Some(fluid.conductivity))?;
    }

    if let Some(wall) = &pipe.wall {
        positive("pipe.wall.density", Some(wall.density))?;
        positive("pipe.wall.specific_heat", Some(wall.specific_heat))?;
    }

    if let Some(WallInitDef::Fixed { temperature_c }) = pipe.wall_init {
        if !temperature_c.is_finite() {
            return Err(invalid(
                "pipe.wall_init.temperature_c",
                temperature_c,
                "must be finite",
            ));
        }
    }

    Ok(())
}

fn validate_numerics(numerics: &NumericsDef) -> Result<(), ValidationError> {
    positive("numerics.safety_factor", numerics.safety_factor)?;
    if let Some(sf) = numerics.safety_factor {
        if sf > 1.0 {
            return Err(invalid("numerics.safety_factor", sf, "must not exceed 1"));
        }
    }
    Ok(())
}

fn validate_run(run: &RunDef) -> Result<(), ValidationError> {
    positive("run.interval_s", run.interval_s)?;
    if run.max_samples == Some(0) {
        return Err(invalid("run.max_samples", 0, "must be positive"));
    }
    if run.max_total_substeps == Some(0) {
        return Err(invalid("run.max_total_substeps", 0, "must be positive"));
    }
    Ok(())
}

fn positive(field: &str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) => pt_core::ensure_positive(v, "value")
            .map(|_| ())
            .map_err(|_| invalid(field, v, "must be finite and strictly positive")),
        None => Ok(()),
    }
}

fn non_negative(field: &str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) => pt_core::ensure_non_negative(v, "value")
            .map(|_| ())
            .map_err(|_| invalid(field, v, "must be finite and non-negative")),
        None => Ok(()),
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FluidDef, PresetDef};

    fn base() -> Project {
        Project::new("test", PresetDef::WallExchange)
    }

    #[test]
    fn default_project_is_valid() {
        assert!(validate_project(&base()).is_ok());
    }

    #[test]
    fn rejects_future_version() {
        let mut p = base();
        p.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_geometry() {
        let mut p = base();
        p.pipe.length_m = Some(0.0);
        let err = validate_project(&p).unwrap_err().to_string();
        assert!(err.contains("pipe.length_m"));

        let mut p = base();
        p.pipe.velocity_m_per_s = Some(f64::NAN);
        assert!(validate_project(&p).is_err());
    }

    #[test]
    fn zero_convection_is_allowed_but_negative_is_not() {
        let mut p = base();
        p.pipe.h_outer = Some(0.0);
        assert!(validate_project(&p).is_ok());
        p.pipe.h_outer = Some(-5.0);
        assert!(validate_project(&p).is_err());
    }

    #[test]
    fn rejects_bad_fluid_and_numerics() {
        let mut p = base();
        p.pipe.fluid = Some(FluidDef {
            density: 997.0,
            specific_heat: 0.0,
            conductivity: 0.6,
        });
        assert!(validate_project(&p).is_err());

        let mut p = base();
        p.numerics.safety_factor = Some(1.2);
        assert!(validate_project(&p).is_err());
    }

    #[test]
    fn rejects_bad_run_limits() {
        let mut p = base();
        p.run.interval_s = Some(-60.0);
        assert!(validate_project(&p).is_err());

        let mut p = base();
        p.run.max_samples = Some(0);
        assert!(validate_project(&p).is_err());
    }

    #[test]
    fn rejects_single_cell_and_blank_name() {
        let mut p = base();
        p.pipe.cells = Some(1);
        assert!(validate_project(&p).is_err());

        let mut p = base();
        p.name = "  ".to_string();
        assert!(validate_project(&p).is_err());
    }
}
