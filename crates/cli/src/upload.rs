use anyhow::{Context, Result, bail};
use std::path::Path;

use crate::config::{client_for, load_config};

/// Upload a local file to a project.
///
/// The content goes out as one request body; the server's acknowledgment
/// carries no payload worth printing.
pub async fn run_upload(project_id: &str, file: &Path, content_type: Option<&str>) -> Result<()> {
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }

    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Unusable file name: {}", file.display()))?;
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let content_type = content_type
        .map(str::to_string)
        .unwrap_or_else(|| guess_content_type(name));

    let config = load_config()?;
    let client = client_for(&config)?;

    println!("Uploading {} to project {}...", name, project_id);
    client
        .upload_file(project_id, name, &content, &content_type)
        .await?;

    println!("Upload successful!");
    Ok(())
}

/// MIME type from the file extension; text/plain when unknown.
pub fn guess_content_type(name: &str) -> String {
    let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    let mime = match extension.to_ascii_lowercase().as_str() {
        "csv" => "text/csv",
        "json" => "application/json",
        "tsv" => "text/tab-separated-values",
        "md" => "text/markdown",
        "html" => "text/html",
        _ => "text/plain",
    };
    mime.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(guess_content_type("scores.csv"), "text/csv");
        assert_eq!(guess_content_type("meta.JSON"), "application/json");
        assert_eq!(guess_content_type("notes"), "text/plain");
        assert_eq!(guess_content_type("archive.nii.gz"), "text/plain");
    }
}
