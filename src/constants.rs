/// System prompt for document generation from an uploaded file
pub const DOCUMENT_SYSTEM_PROMPT: &str = "You are an experienced systems engineer. \
Write the requested document based on the file contents provided by the user. \
Be precise, structured and complete.";

/// Substitute document body used when the AI provider call fails
pub const DOCUMENT_FALLBACK_TEXT: &str = "This is sample document content. \
AI generation failed, so sample data is shown instead.";

/// System prompt for source code generation from a document
pub const SOURCE_CODE_SYSTEM_PROMPT: &str = "You are a skilled software developer. \
Generate source code in the requested programming language based on the document provided by the user. \
Return only the code.";

/// Substitute source file body used when the AI provider call fails
pub const SOURCE_CODE_FALLBACK_TEXT: &str =
    "// Sample generated code. AI generation failed, so placeholder content was saved.";

/// System prompt for the cross-document consistency analysis
pub const CONSISTENCY_SYSTEM_PROMPT: &str = "You are an experienced software quality manager. \
Check the consistency between the provided documents and identify every inconsistency. \
Also compute a consistency score between 0 and 100. \
Answer with a JSON object of the form \
{\"inconsistencies\": [{\"description\": string, \"severity\": string}], \
\"consistency_score\": number, \"suggestions\": string}.";

/// Substitute consistency analysis used when the AI call fails or its answer cannot be parsed
pub const CONSISTENCY_FALLBACK_JSON: &str = r#"{
  "inconsistencies": [
    {
      "description": "Document 1 describes feature A while document 2 describes feature B.",
      "severity": "high"
    }
  ],
  "consistency_score": 75,
  "suggestions": "Unify the terminology and feature definitions across the documents."
}"#;

/// System prompt for reviewing a document during a quality check
pub const QUALITY_DOCUMENT_SYSTEM_PROMPT: &str = "You are an excellent software analyst. \
Check the following document for consistency and completeness, and report problems and \
improvement suggestions.";

/// System prompt for reviewing a source file during a quality check
pub const QUALITY_SOURCE_CODE_SYSTEM_PROMPT: &str = "You are an excellent code reviewer. \
Check the following source code for syntax errors and best-practice violations, and report \
problems and improvement suggestions.";

/// Substitute review text used when the AI call fails during a quality check
pub const QUALITY_FALLBACK_ISSUES: &str =
    "Sample review result. The AI request failed, so no detailed issues are available.";

/// System prompt for the work estimation
pub const ESTIMATE_SYSTEM_PROMPT: &str = "You are an excellent project manager. \
Estimate the effort of each development phase from the project information provided by the user. \
Answer with a JSON object of the form \
{\"total_hours\": number, \"breakdown\": [{\"phase\": string, \"hours\": number}]}.";

/// System prompt for extracting key information for a proposal
pub const PROPOSAL_EXTRACT_SYSTEM_PROMPT: &str = "You are a capable business analyst. \
Extract the key information from the documents provided by the user.";

/// Substitute key information used when the extraction call fails
pub const PROPOSAL_KEY_INFO_FALLBACK: &str = "Sample key information.";

/// System prompt for polishing an assembled proposal
pub const PROPOSAL_FORMAT_SYSTEM_PROMPT: &str = "You are a professional business writer. \
Optimize the following proposal and format it for readability.";

/// System prompt for summarizing issues in a progress report
pub const REPORT_ISSUES_SYSTEM_PROMPT: &str = "You are a project manager. \
Identify the major issues and delay factors from the project activity log provided by the user.";

/// Substitute issue summary used when the AI call fails during report generation
pub const REPORT_ISSUES_FALLBACK: &str =
    "No notable issues or delay factors have been identified at this time.";

/// Development phases tracked by progress reports, in order
pub const REPORT_PHASES: [&str; 5] = [
    "requirements",
    "design",
    "implementation",
    "testing",
    "release",
];

/// Default past effort (hours) assumed when no historical estimates exist
pub const DEFAULT_PAST_ESTIMATE_HOURS: i64 = 100;
