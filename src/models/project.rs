//! Project-related data models

use std::fmt;

/// Project types supported by ionbrew
///
/// The dispatch over these is a closed set: the two serveable types map to
/// materially different dev-server option shapes, so adding a type means
/// adding a match arm rather than registering a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectType {
    /// AngularJS-era project served by its own v1 dev tooling
    Ionic1,
    /// Angular project served through ionic-app-scripts
    IonicAngular,
    /// Explicitly user-managed project; not serveable by ionbrew
    Custom,
    /// Unrecognized `type` value from the project descriptor
    Other(String),
}

impl ProjectType {
    /// Map a project descriptor `type` value onto a project type
    pub fn from_descriptor(value: &str) -> Self {
        match value {
            "ionic1" => ProjectType::Ionic1,
            "ionic-angular" => ProjectType::IonicAngular,
            "custom" => ProjectType::Custom,
            other => ProjectType::Other(other.to_string()),
        }
    }

    /// The descriptor-facing name of this project type
    pub fn name(&self) -> &str {
        match self {
            ProjectType::Ionic1 => "ionic1",
            ProjectType::IonicAngular => "ionic-angular",
            ProjectType::Custom => "custom",
            ProjectType::Other(value) => value,
        }
    }

    /// Whether a server backend exists for this project type
    pub fn is_serveable(&self) -> bool {
        matches!(self, ProjectType::Ionic1 | ProjectType::IonicAngular)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Project metadata loaded from the project descriptor
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    /// Project name, used for the DevApp discovery instance name
    pub name: String,
    /// Detected or declared project type, used as the dispatch key
    pub project_type: ProjectType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_descriptor_known_types() {
        assert_eq!(ProjectType::from_descriptor("ionic1"), ProjectType::Ionic1);
        assert_eq!(
            ProjectType::from_descriptor("ionic-angular"),
            ProjectType::IonicAngular
        );
        assert_eq!(ProjectType::from_descriptor("custom"), ProjectType::Custom);
    }

    #[test]
    fn test_from_descriptor_preserves_unknown_value() {
        let parsed = ProjectType::from_descriptor("react-native");
        assert_eq!(parsed, ProjectType::Other("react-native".to_string()));
        assert_eq!(parsed.name(), "react-native");
        assert_eq!(parsed.to_string(), "react-native");
    }

    #[test]
    fn test_serveable_types() {
        assert!(ProjectType::Ionic1.is_serveable());
        assert!(ProjectType::IonicAngular.is_serveable());
        assert!(!ProjectType::Custom.is_serveable());
        assert!(!ProjectType::Other("x".to_string()).is_serveable());
    }
}
