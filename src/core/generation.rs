use crate::constants::*;
use crate::core::{ParentRef, TaskKind, TaskParams};
use crate::db::{CatalogRepository, NewArtifact};
use crate::errors::Error;
use crate::llm::LlmClient;
use crate::utils::file_extension;
use diesel::sqlite::SqliteConnection;
use serde_json::{json, Value};
use tracing::warn;

/// A document excerpt fed into a cross-document analysis
#[derive(Debug, Clone)]
pub struct DocumentExcerpt {
    pub id: String,
    pub doc_type: String,
    pub content: String,
}

/// One item reviewed by a quality check
#[derive(Debug, Clone)]
pub struct CheckSubject {
    pub id: String,
    /// "document" or "source_code"
    pub label: &'static str,
    pub body: String,
}

/// Everything a background unit needs to produce its artifact, gathered
/// from the store before the task row is created. Gathering is also where
/// unknown parents are rejected, so a 404 reaches the submitter and no
/// task is left behind.
#[derive(Debug, Clone)]
pub enum GenerationInput {
    Document {
        project_id: String,
        document_type: String,
        file_text: String,
    },
    SourceCode {
        project_id: String,
        language: String,
        document_content: String,
    },
    ConsistencyCheck {
        project_id: String,
        documents: Vec<DocumentExcerpt>,
    },
    QualityCheck {
        project_id: String,
        subjects: Vec<CheckSubject>,
    },
    WorkEstimate {
        project_id: String,
        document_complexity: usize,
        total_lines: usize,
        average_past_hours: i64,
    },
    Proposal {
        project_id: String,
        user_id: String,
        project_name: String,
        template_content: String,
        document_text: String,
    },
    ProgressReport {
        project_id: String,
        doc_count: usize,
        code_count: usize,
        activities: Vec<String>,
    },
}

/// Rejects submissions with missing or empty fields before anything is
/// looked up or persisted.
pub fn validate_params(
    kind: TaskKind,
    parent_ref: &ParentRef,
    params: &TaskParams,
) -> Result<(), Error> {
    if parent_ref.is_empty() {
        return Err(Error::Validation("parentRef must not be empty".into()));
    }

    let missing = |field: &str| Error::Validation(format!("{} requires {}", kind, field));

    match kind {
        TaskKind::Document => {
            if params.document_type.as_deref().unwrap_or("").is_empty() {
                return Err(missing("params.document_type"));
            }
        }
        TaskKind::SourceCode => {
            if params.language.as_deref().unwrap_or("").is_empty() {
                return Err(missing("params.language"));
            }
        }
        TaskKind::Proposal => {
            if params.template_id.as_deref().unwrap_or("").is_empty() {
                return Err(missing("params.template_id"));
            }
        }
        TaskKind::ProgressReport => {
            if params.start_date.as_deref().unwrap_or("").is_empty()
                || params.end_date.as_deref().unwrap_or("").is_empty()
            {
                return Err(missing("params.start_date and params.end_date"));
            }
        }
        TaskKind::ConsistencyCheck | TaskKind::QualityCheck | TaskKind::WorkEstimate => {}
    }

    Ok(())
}

/// Resolves the parent entity and reads everything the generation step
/// will need. Fails with `Error::NotFound` when the parent is absent.
pub fn gather_input(
    conn: &mut SqliteConnection,
    kind: TaskKind,
    parent_ref: &ParentRef,
    params: &TaskParams,
    user_id: &str,
) -> Result<GenerationInput, Error> {
    let mut catalog = CatalogRepository::new(conn);

    match kind {
        TaskKind::Document => {
            let project_id = require_single(parent_ref)?;
            catalog
                .get_project(&project_id)?
                .ok_or_else(|| Error::NotFound(format!("project '{}' not found", project_id)))?;
            let file = catalog
                .latest_file_for_project(&project_id)?
                .ok_or_else(|| {
                    Error::NotFound(format!("no uploaded files for project '{}'", project_id))
                })?;
            Ok(GenerationInput::Document {
                project_id,
                document_type: params.document_type.clone().unwrap_or_default(),
                file_text: file.content,
            })
        }
        TaskKind::SourceCode => {
            let document_id = require_single(parent_ref)?;
            let document = catalog
                .get_document(&document_id)?
                .ok_or_else(|| Error::NotFound(format!("document '{}' not found", document_id)))?;
            Ok(GenerationInput::SourceCode {
                project_id: document.project_id,
                language: params.language.clone().unwrap_or_default(),
                document_content: document.content,
            })
        }
        TaskKind::ConsistencyCheck => {
            let documents = catalog.get_documents(&parent_ref.ids())?;
            let first = documents
                .first()
                .ok_or_else(|| Error::NotFound("no matching documents found".into()))?;
            let project_id = first.project_id.clone();
            let excerpts = documents
                .into_iter()
                .map(|d| DocumentExcerpt {
                    id: d.id,
                    doc_type: d.doc_type,
                    content: d.content,
                })
                .collect();
            Ok(GenerationInput::ConsistencyCheck {
                project_id,
                documents: excerpts,
            })
        }
        TaskKind::QualityCheck => {
            let documents = catalog.get_documents(&parent_ref.ids())?;
            let code_ids = params.source_code_ids.clone().unwrap_or_default();
            let codes = catalog.get_source_codes(&code_ids)?;

            let mut project_id = None;
            let mut subjects = Vec::new();
            for d in documents {
                project_id.get_or_insert(d.project_id);
                subjects.push(CheckSubject {
                    id: d.id,
                    label: "document",
                    body: d.content,
                });
            }
            for c in codes {
                project_id.get_or_insert(c.project_id);
                subjects.push(CheckSubject {
                    id: c.id,
                    label: "source_code",
                    body: c.content,
                });
            }

            let project_id = project_id
                .ok_or_else(|| Error::NotFound("no matching documents or source files".into()))?;
            Ok(GenerationInput::QualityCheck {
                project_id,
                subjects,
            })
        }
        TaskKind::WorkEstimate => {
            let project_id = require_single(parent_ref)?;
            catalog
                .get_project(&project_id)?
                .ok_or_else(|| Error::NotFound(format!("project '{}' not found", project_id)))?;

            let documents = catalog.documents_for_project(&project_id)?;
            let codes = catalog.source_codes_for_project(&project_id)?;
            let document_complexity = documents.iter().map(|d| d.content.chars().count()).sum();
            let total_lines = codes.iter().map(|c| c.content.lines().count()).sum();

            let totals: Vec<i64> = catalog
                .past_estimates()?
                .iter()
                .filter_map(|e| {
                    serde_json::from_str::<Value>(&e.estimate)
                        .ok()
                        .and_then(|v| v["total_hours"].as_i64())
                })
                .collect();
            let average_past_hours = if totals.is_empty() {
                DEFAULT_PAST_ESTIMATE_HOURS
            } else {
                totals.iter().sum::<i64>() / totals.len() as i64
            };

            Ok(GenerationInput::WorkEstimate {
                project_id,
                document_complexity,
                total_lines,
                average_past_hours,
            })
        }
        TaskKind::Proposal => {
            let project_id = require_single(parent_ref)?;
            let project = catalog
                .get_project(&project_id)?
                .ok_or_else(|| Error::NotFound(format!("project '{}' not found", project_id)))?;
            let template_id = params.template_id.clone().unwrap_or_default();
            let template = catalog
                .get_template(&template_id)?
                .ok_or_else(|| Error::NotFound(format!("template '{}' not found", template_id)))?;
            let documents = catalog.documents_for_project(&project_id)?;
            let document_text = documents
                .into_iter()
                .map(|d| d.content)
                .collect::<Vec<_>>()
                .join("\n");

            Ok(GenerationInput::Proposal {
                project_id,
                user_id: user_id.to_string(),
                project_name: project.name,
                template_content: template.content,
                document_text,
            })
        }
        TaskKind::ProgressReport => {
            let project_id = require_single(parent_ref)?;
            catalog
                .get_project(&project_id)?
                .ok_or_else(|| Error::NotFound(format!("project '{}' not found", project_id)))?;

            let start = params.start_date.clone().unwrap_or_default();
            let end = params.end_date.clone().unwrap_or_default();
            let documents = catalog.documents_in_range(&project_id, &start, &end)?;
            let codes = catalog.source_codes_in_range(&project_id, &start, &end)?;

            let mut activities: Vec<String> = documents
                .iter()
                .map(|d| format!("{} document created ({})", d.doc_type, d.created_at))
                .collect();
            activities.extend(
                codes
                    .iter()
                    .map(|c| format!("source file {} updated ({})", c.file_name, c.updated_at)),
            );

            Ok(GenerationInput::ProgressReport {
                project_id,
                doc_count: documents.len(),
                code_count: codes.len(),
                activities,
            })
        }
    }
}

fn require_single(parent_ref: &ParentRef) -> Result<String, Error> {
    parent_ref
        .single()
        .map(str::to_string)
        .ok_or_else(|| Error::Validation("parentRef must be a single id for this kind".into()))
}

/// Runs the AI calls for one task and assembles the artifact payload.
///
/// A failed provider call never propagates: each call site substitutes
/// its deterministic fallback content so the task still completes.
pub async fn generate_artifact(llm: &LlmClient, input: GenerationInput) -> NewArtifact {
    match input {
        GenerationInput::Document {
            project_id,
            document_type,
            file_text,
        } => {
            let user_prompt = format!(
                "Create a \"{}\" document from the following file contents:\n{}",
                document_type, file_text
            );
            let text = match llm.generate(DOCUMENT_SYSTEM_PROMPT, &user_prompt).await {
                Ok(text) => text,
                Err(e) => {
                    warn!("document generation fell back to sample content: {}", e);
                    DOCUMENT_FALLBACK_TEXT.to_string()
                }
            };
            NewArtifact::Document {
                project_id,
                doc_type: document_type.clone(),
                content: format_document(&document_type, &text),
            }
        }
        GenerationInput::SourceCode {
            project_id,
            language,
            document_content,
        } => {
            let user_prompt = format!(
                "Target language: {}\nDocument content: {}",
                language, document_content
            );
            let code = match llm.generate(SOURCE_CODE_SYSTEM_PROMPT, &user_prompt).await {
                Ok(code) => code,
                Err(e) => {
                    warn!("code generation fell back to sample content: {}", e);
                    SOURCE_CODE_FALLBACK_TEXT.to_string()
                }
            };
            NewArtifact::SourceCode {
                project_id,
                file_name: format!("generated_code.{}", file_extension(&language)),
                content: code,
            }
        }
        GenerationInput::ConsistencyCheck {
            project_id,
            documents,
        } => {
            let mut user_prompt =
                String::from("Perform a consistency check on the following documents.\n");
            for (index, doc) in documents.iter().enumerate() {
                user_prompt.push_str(&format!(
                    "\n[Document {}: {}]\n{}\n",
                    index + 1,
                    doc.doc_type,
                    doc.content
                ));
            }
            let analysis = match llm.generate(CONSISTENCY_SYSTEM_PROMPT, &user_prompt).await {
                Ok(response) => parse_consistency_analysis(&response),
                Err(e) => {
                    warn!("consistency check fell back to sample analysis: {}", e);
                    fallback_consistency_analysis()
                }
            };
            NewArtifact::QualityCheck {
                project_id,
                check_type: "consistency".to_string(),
                result: analysis,
            }
        }
        GenerationInput::QualityCheck {
            project_id,
            subjects,
        } => {
            let mut reports = Vec::with_capacity(subjects.len());
            for subject in subjects {
                let system_prompt = match subject.label {
                    "source_code" => QUALITY_SOURCE_CODE_SYSTEM_PROMPT,
                    _ => QUALITY_DOCUMENT_SYSTEM_PROMPT,
                };
                let user_prompt = format!("{} content:\n{}", subject.label, subject.body);
                let issues = match llm.generate(system_prompt, &user_prompt).await {
                    Ok(issues) => issues,
                    Err(e) => {
                        warn!("quality check of {} fell back: {}", subject.id, e);
                        QUALITY_FALLBACK_ISSUES.to_string()
                    }
                };
                reports.push(json!({
                    "subject_id": subject.id,
                    "subject": subject.label,
                    "score": quality_score(&issues),
                    "issues": issues,
                }));
            }
            NewArtifact::QualityCheck {
                project_id,
                check_type: "quality".to_string(),
                result: json!({ "reports": reports }),
            }
        }
        GenerationInput::WorkEstimate {
            project_id,
            document_complexity,
            total_lines,
            average_past_hours,
        } => {
            let user_prompt = format!(
                "The project's document complexity is {}, the total number of code lines is {} \
                 and the average total effort of past projects is {} hours. \
                 Please estimate the effort.",
                document_complexity, total_lines, average_past_hours
            );
            let estimate = match llm.generate(ESTIMATE_SYSTEM_PROMPT, &user_prompt).await {
                Ok(response) => parse_estimate(&response).unwrap_or_else(sample_estimate),
                Err(e) => {
                    warn!("work estimation fell back to default breakdown: {}", e);
                    default_estimate()
                }
            };
            NewArtifact::WorkEstimate {
                project_id,
                estimate,
            }
        }
        GenerationInput::Proposal {
            project_id,
            user_id,
            project_name,
            template_content,
            document_text,
        } => {
            let extract_prompt = format!(
                "Project name: {}\n\nDocument contents:\n{}\n\nExtracted key information:",
                project_name, document_text
            );
            let key_info = match llm
                .generate(PROPOSAL_EXTRACT_SYSTEM_PROMPT, &extract_prompt)
                .await
            {
                Ok(info) => info,
                Err(e) => {
                    warn!("proposal extraction fell back to sample content: {}", e);
                    PROPOSAL_KEY_INFO_FALLBACK.to_string()
                }
            };

            let filled = template_content.replace("{{key_info}}", &key_info);
            let optimize_prompt = format!("Proposal:\n{}\n\nOptimized proposal:", filled);
            let content = match llm
                .generate(PROPOSAL_FORMAT_SYSTEM_PROMPT, &optimize_prompt)
                .await
            {
                Ok(optimized) => optimized,
                Err(e) => {
                    warn!("proposal optimization skipped: {}", e);
                    filled
                }
            };

            NewArtifact::Proposal {
                project_id,
                user_id,
                content,
            }
        }
        GenerationInput::ProgressReport {
            project_id,
            doc_count,
            code_count,
            activities,
        } => {
            let (overall_progress, phases) = derive_phases(doc_count, code_count);
            let user_prompt = format!(
                "Identify the major issues and delay factors from the following activity log.\n\n\
                 Activity log:\n{}",
                activities.join("\n")
            );
            let major_issues = match llm.generate(REPORT_ISSUES_SYSTEM_PROMPT, &user_prompt).await {
                Ok(summary) => summary,
                Err(e) => {
                    warn!("report issue summary fell back: {}", e);
                    REPORT_ISSUES_FALLBACK.to_string()
                }
            };
            NewArtifact::ProgressReport {
                project_id,
                report: json!({
                    "overall_progress": overall_progress,
                    "phases": phases,
                    "major_issues": major_issues,
                }),
            }
        }
    }
}

/// Wraps generated prose into the stored document shape
pub fn format_document(document_type: &str, text: &str) -> Value {
    json!({
        "title": format!("Generated {} document", document_type),
        "sections": [
            {
                "heading": "Overview",
                "content": text,
            }
        ],
    })
}

/// Parses the provider's consistency analysis; an answer that is not the
/// expected JSON object degrades to the sample analysis.
pub fn parse_consistency_analysis(response: &str) -> Value {
    match serde_json::from_str::<Value>(response) {
        Ok(value) if value.get("consistency_score").is_some() => value,
        _ => fallback_consistency_analysis(),
    }
}

pub fn fallback_consistency_analysis() -> Value {
    serde_json::from_str(CONSISTENCY_FALLBACK_JSON)
        .unwrap_or_else(|_| json!({ "consistency_score": 0 }))
}

/// Derives a 0-100 review score from the reported issue text: the longer
/// the issue list, the lower the score.
pub fn quality_score(issues: &str) -> i64 {
    let issue_lines = issues.lines().filter(|l| !l.trim().is_empty()).count() as i64;
    (100 - 4 * issue_lines).max(0)
}

/// Parses the provider's estimate; the answer must carry total hours and
/// a phase breakdown to be accepted.
pub fn parse_estimate(response: &str) -> Option<Value> {
    let value = serde_json::from_str::<Value>(response).ok()?;
    if value["total_hours"].as_i64().is_some() && value["breakdown"].is_array() {
        Some(value)
    } else {
        None
    }
}

/// Estimate stored when the provider answered but not in a usable shape
pub fn sample_estimate() -> Value {
    json!({
        "total_hours": 120,
        "breakdown": [
            { "phase": "requirements", "hours": 20 },
            { "phase": "design", "hours": 30 },
            { "phase": "implementation", "hours": 50 },
            { "phase": "testing", "hours": 20 },
        ],
    })
}

/// Estimate stored when the provider call failed outright
pub fn default_estimate() -> Value {
    json!({
        "total_hours": 100,
        "breakdown": [
            { "phase": "requirements", "hours": 15 },
            { "phase": "design", "hours": 25 },
            { "phase": "implementation", "hours": 40 },
            { "phase": "testing", "hours": 20 },
        ],
    })
}

/// Derives per-phase progress from the activity volume in the reporting
/// window. Later phases lag earlier ones; everything stays in 0-100.
pub fn derive_phases(doc_count: usize, code_count: usize) -> (i64, Vec<Value>) {
    let units = (doc_count * 2 + code_count) as i64;
    let base = (units * 10).min(100);

    let phases: Vec<Value> = REPORT_PHASES
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let progress = (base - 15 * index as i64).max(0);
            let status = if progress >= 100 {
                "completed"
            } else {
                "in_progress"
            };
            json!({ "name": name, "progress": progress, "status": status })
        })
        .collect();

    let overall = phases
        .iter()
        .filter_map(|p| p["progress"].as_i64())
        .sum::<i64>()
        / REPORT_PHASES.len() as i64;

    (overall, phases)
}
