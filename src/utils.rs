// src/utils.rs
use anyhow::Result;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", filename))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext,
            allowed
        );
    }

    Ok(())
}

/// MIME type sent with a multipart upload
pub fn content_type_for(filename: &str) -> &'static str {
    match get_file_extension(filename).as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Percentage with two decimals, as shown for scores and similarity
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("test.pdf"), Some("pdf".to_string()));
        assert_eq!(
            get_file_extension("document.DOCX"),
            Some("docx".to_string())
        );
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("resume.pdf", SUPPORTED_EXTENSIONS).is_ok());
        assert!(validate_file_extension("resume.png", SUPPORTED_EXTENSIONS).is_err());
        assert!(validate_file_extension("noext", &["pdf"]).is_err());
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("CV.PDF"), "application/pdf");
        assert_eq!(content_type_for("job.txt"), "text/plain");
        assert_eq!(content_type_for("blob"), "application/octet-stream");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.4213), "42.13%");
        assert_eq!(format_percent(1.0), "100.00%");
        assert_eq!(format_percent(0.0), "0.00%");
    }
}
