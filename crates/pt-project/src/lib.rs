//! pt-project: pipe project file format and validation.
//!
//! Projects are stored as YAML (`.yaml`, `.yml`) or JSON (`.json`); the
//! extension picks the format. Every load and save validates.

use std::path::Path;

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported project file extension: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding of a project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Yaml,
    Json,
}

impl ProjectFormat {
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ProjectError::UnsupportedFormat { extension }),
        }
    }

    pub fn parse(self, content: &str) -> ProjectResult<Project> {
        let project: Project = match self {
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
        };
        validate_project(&project)?;
        Ok(project)
    }

    pub fn render(self, project: &Project) -> ProjectResult<String> {
        validate_project(project)?;
        Ok(match self {
            Self::Yaml => serde_yaml::to_string(project)?,
            Self::Json => serde_json::to_string_pretty(project)?,
        })
    }
}

pub fn load(path: &Path) -> ProjectResult<Project> {
    let format = ProjectFormat::from_path(path)?;
    format.parse(&std::fs::read_to_string(path)?)
}

pub fn save(path: &Path, project: &Project) -> ProjectResult<()> {
    let content = ProjectFormat::from_path(path)?.render(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            ProjectFormat::from_path(Path::new("a/line.YML")).unwrap(),
            ProjectFormat::Yaml
        );
        assert_eq!(
            ProjectFormat::from_path(Path::new("line.json")).unwrap(),
            ProjectFormat::Json
        );
        assert!(ProjectFormat::from_path(Path::new("line")).is_err());
    }

    #[test]
    fn parse_validates() {
        let err = ProjectFormat::Json
            .parse(r#"{"version": 1, "name": "x", "pipe": {"velocity_m_per_s": 0}}"#)
            .unwrap_err();
        assert!(matches!(err, ProjectError::Validation(_)));
    }

    #[test]
    fn render_refuses_invalid_projects() {
        let mut project = Project::new("", PresetDef::TransportOnly);
        assert!(ProjectFormat::Yaml.render(&project).is_err());
        project.name = "ok".into();
        assert!(ProjectFormat::Yaml.render(&project).unwrap().contains("transport_only"));
    }
}
