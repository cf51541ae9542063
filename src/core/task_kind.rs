use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kinds of generation work a task can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Generate a structured document from a project's latest upload
    Document,
    /// Generate source code from a document
    SourceCode,
    /// Check consistency across a set of documents
    ConsistencyCheck,
    /// Review documents and source files for quality issues
    QualityCheck,
    /// Estimate the effort of a project's development phases
    WorkEstimate,
    /// Assemble a proposal from a project's documents and a template
    Proposal,
    /// Summarize a project's activity inside a date range
    ProgressReport,
}

impl TaskKind {
    /// The wire/storage string for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Document => "document",
            TaskKind::SourceCode => "source_code",
            TaskKind::ConsistencyCheck => "consistency_check",
            TaskKind::QualityCheck => "quality_check",
            TaskKind::WorkEstimate => "work_estimate",
            TaskKind::Proposal => "proposal",
            TaskKind::ProgressReport => "progress_report",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(TaskKind::Document),
            "source_code" => Ok(TaskKind::SourceCode),
            "consistency_check" => Ok(TaskKind::ConsistencyCheck),
            "quality_check" => Ok(TaskKind::QualityCheck),
            "work_estimate" => Ok(TaskKind::WorkEstimate),
            "proposal" => Ok(TaskKind::Proposal),
            "progress_report" => Ok(TaskKind::ProgressReport),
            _ => Err(()),
        }
    }
}

/// The entity a task operates on: one id, or several for the
/// multi-document kinds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ParentRef {
    One(String),
    Many(Vec<String>),
}

impl ParentRef {
    /// All referenced ids, in submission order
    pub fn ids(&self) -> Vec<String> {
        match self {
            ParentRef::One(id) => vec![id.clone()],
            ParentRef::Many(ids) => ids.clone(),
        }
    }

    /// The single referenced id, if this reference holds exactly one
    pub fn single(&self) -> Option<&str> {
        match self {
            ParentRef::One(id) => Some(id),
            ParentRef::Many(ids) if ids.len() == 1 => ids.first().map(String::as_str),
            ParentRef::Many(_) => None,
        }
    }

    /// Whether the reference holds no usable id
    pub fn is_empty(&self) -> bool {
        match self {
            ParentRef::One(id) => id.is_empty(),
            ParentRef::Many(ids) => ids.is_empty() || ids.iter().all(String::is_empty),
        }
    }

    /// Storage form: the bare id, or a JSON array for multiple ids
    pub fn to_storage(&self) -> String {
        match self {
            ParentRef::One(id) => id.clone(),
            ParentRef::Many(ids) => serde_json::to_string(ids).unwrap_or_default(),
        }
    }
}

/// Kind-specific submission parameters. All fields are optional at the
/// wire level; the coordinator enforces per-kind presence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskParams {
    /// Document kind to generate (document tasks)
    #[serde(default)]
    pub document_type: Option<String>,
    /// Target programming language (source_code tasks)
    #[serde(default)]
    pub language: Option<String>,
    /// Additional source files to review (quality_check tasks)
    #[serde(default)]
    pub source_code_ids: Option<Vec<String>>,
    /// Proposal template to fill (proposal tasks)
    #[serde(default)]
    pub template_id: Option<String>,
    /// Range start, RFC 3339 (progress_report tasks)
    #[serde(default)]
    pub start_date: Option<String>,
    /// Range end, RFC 3339 (progress_report tasks)
    #[serde(default)]
    pub end_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_strings() {
        for kind in [
            TaskKind::Document,
            TaskKind::SourceCode,
            TaskKind::ConsistencyCheck,
            TaskKind::QualityCheck,
            TaskKind::WorkEstimate,
            TaskKind::Proposal,
            TaskKind::ProgressReport,
        ] {
            assert_eq!(kind.as_str().parse::<TaskKind>(), Ok(kind));
        }
        assert!("report".parse::<TaskKind>().is_err());
    }

    #[test]
    fn parent_ref_accepts_string_or_array() {
        let one: ParentRef = serde_json::from_str("\"doc-1\"").unwrap();
        assert_eq!(one, ParentRef::One("doc-1".to_string()));

        let many: ParentRef = serde_json::from_str("[\"doc-1\", \"doc-2\"]").unwrap();
        assert_eq!(many.ids(), vec!["doc-1".to_string(), "doc-2".to_string()]);
    }

    #[test]
    fn parent_ref_emptiness() {
        assert!(ParentRef::One(String::new()).is_empty());
        assert!(ParentRef::Many(vec![]).is_empty());
        assert!(!ParentRef::One("p-1".to_string()).is_empty());
    }

    #[test]
    fn params_default_to_absent() {
        let params: TaskParams = serde_json::from_str("{}").unwrap();
        assert!(params.language.is_none());
        assert!(params.template_id.is_none());
    }
}
