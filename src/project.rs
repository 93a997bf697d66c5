//! Project descriptor loading and project type detection

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::{IonbrewError, Result};
use crate::models::{ProjectInfo, ProjectType};

/// Project descriptor file name
pub const PROJECT_FILE: &str = "ionic.config.json";

/// Fallback project name when neither descriptor nor package.json name one
const FALLBACK_PROJECT_NAME: &str = "app";

#[derive(Debug, Deserialize)]
struct ProjectDescriptor {
    name: Option<String>,
    #[serde(rename = "type")]
    project_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PackageJson {
    name: Option<String>,
    #[serde(default)]
    dependencies: HashMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: HashMap<String, String>,
}

/// Load project metadata from the descriptor in `project_dir`
///
/// The project name falls back to the package.json `name` when the
/// descriptor omits it. When the descriptor carries no `type` attribute the
/// type is detected from the project layout.
pub fn load_project(project_dir: &Path) -> Result<ProjectInfo> {
    let descriptor_path = project_dir.join(PROJECT_FILE);
    let content = fs::read_to_string(&descriptor_path).map_err(|e| {
        IonbrewError::Project(format!(
            "Failed to read {}: {}. Run this command inside a project directory.",
            descriptor_path.display(),
            e
        ))
    })?;

    let descriptor: ProjectDescriptor = serde_json::from_str(&content).map_err(|e| {
        IonbrewError::Project(format!(
            "Failed to parse {}: {}",
            descriptor_path.display(),
            e
        ))
    })?;

    let name = descriptor
        .name
        .filter(|name| !name.trim().is_empty())
        .or_else(|| package_json(project_dir).and_then(|package| package.name))
        .unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_string());

    let project_type = match descriptor.project_type {
        Some(value) => ProjectType::from_descriptor(&value),
        None => detect_project_type(project_dir)?,
    };

    log::debug!(
        "Loaded project '{}' ({}) from {}",
        name,
        project_type,
        descriptor_path.display()
    );

    Ok(ProjectInfo { name, project_type })
}

/// Detect the project type from the project layout
///
/// Used when the descriptor has no `type` attribute: an `ionic-angular`
/// package dependency marks an ionic-angular project, a `www/` tree with an
/// AngularJS-era bundle reference marks an ionic1 project.
pub fn detect_project_type(project_dir: &Path) -> Result<ProjectType> {
    if let Some(package) = package_json(project_dir) {
        if package.dependencies.contains_key("ionic-angular")
            || package.dev_dependencies.contains_key("@ionic/app-scripts")
        {
            return Ok(ProjectType::IonicAngular);
        }
    }

    let index_html = project_dir.join("www").join("index.html");
    if index_html.exists() {
        if let Ok(markup) = fs::read_to_string(&index_html) {
            if markup.contains("ionic.bundle") {
                return Ok(ProjectType::Ionic1);
            }
        }
    }

    Err(IonbrewError::Project(format!(
        "Could not determine the project type of {}. Set the \"type\" attribute in {} to \"ionic1\" or \"ionic-angular\".",
        project_dir.display(),
        PROJECT_FILE
    )))
}

fn package_json(project_dir: &Path) -> Option<PackageJson> {
    let path = project_dir.join("package.json");
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(package) => Some(package),
        Err(e) => {
            log::debug!("Ignoring unparsable {}: {}", path.display(), e);
            None
        }
    }
}
