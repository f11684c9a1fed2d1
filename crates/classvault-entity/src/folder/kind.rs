//! Folder kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a folder plays in a school workspace.
///
/// Unknown server values map to [`FolderKind::Custom`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FolderKind {
    /// The branch's top-level container.
    BranchRoot,
    /// Exams and graded assessments.
    Assessments,
    /// Curriculum documents.
    Curriculum,
    /// Material shared among staff.
    StaffResources,
    /// Material handed out to students.
    StudentMaterials,
    /// Homework submissions.
    Homework,
    /// Homework visible to parents.
    HomeworkParent,
    /// Group work shared among students.
    SharedProjects,
    /// Reading library.
    Library,
    /// Administrative records.
    Administrative,
    /// User-created folder.
    #[default]
    Custom,
}

impl FolderKind {
    /// Return the kind as a kebab-case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BranchRoot => "branch-root",
            Self::Assessments => "assessments",
            Self::Curriculum => "curriculum",
            Self::StaffResources => "staff-resources",
            Self::StudentMaterials => "student-materials",
            Self::Homework => "homework",
            Self::HomeworkParent => "homework-parent",
            Self::SharedProjects => "shared-projects",
            Self::Library => "library",
            Self::Administrative => "administrative",
            Self::Custom => "custom",
        }
    }

    /// Parse a server value, tolerating `snake_case`, spaces, and case
    /// differences. Never fails.
    pub fn from_wire(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "branch-root" | "root" => Self::BranchRoot,
            "assessments" | "assessment" => Self::Assessments,
            "curriculum" => Self::Curriculum,
            "staff-resources" => Self::StaffResources,
            "student-materials" => Self::StudentMaterials,
            "homework" => Self::Homework,
            "homework-parent" => Self::HomeworkParent,
            "shared-projects" => Self::SharedProjects,
            "library" => Self::Library,
            "administrative" => Self::Administrative,
            _ => Self::Custom,
        }
    }
}

impl fmt::Display for FolderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wire_variants() {
        assert_eq!(FolderKind::from_wire("branch_root"), FolderKind::BranchRoot);
        assert_eq!(FolderKind::from_wire("Homework Parent"), FolderKind::HomeworkParent);
        assert_eq!(FolderKind::from_wire("STAFF-RESOURCES"), FolderKind::StaffResources);
        assert_eq!(FolderKind::from_wire("field-trips"), FolderKind::Custom);
    }

    #[test]
    fn test_as_str_round_trips() {
        for kind in [
            FolderKind::BranchRoot,
            FolderKind::Assessments,
            FolderKind::SharedProjects,
            FolderKind::Custom,
        ] {
            assert_eq!(FolderKind::from_wire(kind.as_str()), kind);
        }
    }
}
