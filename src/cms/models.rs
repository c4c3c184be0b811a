use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Minimal handle on a project, enough to query its submissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub slug: String,
}

impl ProjectRef {
    pub fn new(id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Ongoing,
    Past,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Which page experience a project is presented with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectExperience {
    Experimental,
    SceneGame,
    JigsawPuzzle,
    Standard,
}

impl ProjectExperience {
    /// First matching flag wins, in the order the site checks them
    pub fn from_flags(flags: &[String]) -> Self {
        let has = |code: &str| flags.iter().any(|f| f == code);

        if has("experimental") {
            Self::Experimental
        } else if has("guratanabata") {
            Self::SceneGame
        } else if has("kronii-puzzle") {
            Self::JigsawPuzzle
        } else {
            Self::Standard
        }
    }
}

/// A project document with `flags` flattened to codes and `devprops` to a map.
/// Fields this crate does not interpret are kept in `rest`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub slug: String,
    pub title: Option<String>,
    pub status: ProjectStatus,
    pub flags: Vec<String>,
    pub devprops: BTreeMap<String, String>,
    pub experience: ProjectExperience,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Project {
    pub fn from_document(document: Value) -> Result<Self, serde_json::Error> {
        let raw: RawProject = serde_json::from_value(document)?;
        let flags: Vec<String> = raw
            .flags
            .unwrap_or_default()
            .into_iter()
            .filter_map(FlagRef::into_code)
            .collect();
        let devprops = raw
            .devprops
            .unwrap_or_default()
            .into_iter()
            .map(|prop| (prop.key, prop.value))
            .collect();

        Ok(Self {
            id: raw.id,
            slug: raw.slug,
            title: raw.title,
            status: raw.status.unwrap_or_default(),
            experience: ProjectExperience::from_flags(&flags),
            flags,
            devprops,
            rest: raw.rest,
        })
    }

    pub fn has_flag(&self, code: &str) -> bool {
        self.flags.iter().any(|f| f == code)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    id: String,
    slug: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    status: Option<ProjectStatus>,
    #[serde(default)]
    flags: Option<Vec<FlagRef>>,
    #[serde(default)]
    devprops: Option<Vec<DevProp>>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// Populated flags carry a `code`; unpopulated ones are bare ids and are dropped
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRef {
    Populated { code: String },
    Id(IgnoredAny),
}

impl FlagRef {
    fn into_code(self) -> Option<String> {
        match self {
            Self::Populated { code } => Some(code),
            Self::Id(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct DevProp {
    key: String,
    value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flattens_flags_and_devprops() {
        let project = Project::from_document(json!({
            "id": "p1",
            "slug": "tanabata",
            "title": "Tanabata",
            "status": "ongoing",
            "flags": [{ "id": "f1", "code": "guratanabata" }, "f2"],
            "devprops": [{ "id": "d1", "key": "theme", "value": "ina" }],
            "organizer": { "id": "g1" }
        }))
        .unwrap();

        assert_eq!(project.flags, vec!["guratanabata"]);
        assert!(project.has_flag("guratanabata"));
        assert_eq!(project.devprops.get("theme").map(String::as_str), Some("ina"));
        assert_eq!(project.status, ProjectStatus::Ongoing);
        assert_eq!(project.experience, ProjectExperience::SceneGame);
        assert_eq!(project.rest["organizer"]["id"], "g1");
    }

    #[test]
    fn test_missing_optional_fields() {
        let project = Project::from_document(json!({ "id": "p2", "slug": "quiet", "status": null, "flags": null, "devprops": null }))
            .unwrap();

        assert!(project.flags.is_empty());
        assert!(project.devprops.is_empty());
        assert_eq!(project.status, ProjectStatus::Unknown);
        assert_eq!(project.experience, ProjectExperience::Standard);
    }

    #[test]
    fn test_unknown_status_does_not_fail() {
        let project =
            Project::from_document(json!({ "id": "p3", "slug": "s", "status": "archived" })).unwrap();
        assert_eq!(project.status, ProjectStatus::Unknown);
    }

    #[test]
    fn test_experience_priority() {
        let flags = vec!["kronii-puzzle".to_string(), "experimental".to_string()];
        assert_eq!(ProjectExperience::from_flags(&flags), ProjectExperience::Experimental);

        let flags = vec!["kronii-puzzle".to_string()];
        assert_eq!(ProjectExperience::from_flags(&flags), ProjectExperience::JigsawPuzzle);
    }

    #[test]
    fn test_missing_slug_is_an_error() {
        assert!(Project::from_document(json!({ "id": "p4" })).is_err());
    }
}
