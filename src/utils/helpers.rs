/// Returns the file extension used for generated source files in the given language
///
/// # Arguments
/// * `language` - Programming language name as submitted by the client
///
/// # Returns
/// The matching file extension, or "txt" for unrecognized languages
pub fn file_extension(language: &str) -> &'static str {
    match language {
        "Python" => "py",
        "JavaScript" => "js",
        "TypeScript" => "ts",
        "Java" => "java",
        "Rust" => "rs",
        _ => "txt",
    }
}

/// Truncates a string to `max_chars` characters for log output
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
