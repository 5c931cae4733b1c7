use anyhow::Result;

use crate::config::{client_for, load_config};
use fwtag_api_types::{Analysis, Session};

/// List all projects visible to the configured key.
pub async fn run_projects() -> Result<()> {
    let config = load_config()?;
    let client = client_for(&config)?;

    let projects = client.list_projects().await?;
    if projects.is_empty() {
        println!("No projects visible to this key.");
        return Ok(());
    }

    println!("{} project(s) on {}", projects.len(), client.base_url());
    for project in projects {
        let group = project.group.as_deref().unwrap_or("-");
        println!("  {}  {}  (group: {})", project.id, project.label, group);
    }
    Ok(())
}

/// Project detail page: the project itself plus its sessions and analyses.
pub async fn run_project(id: &str) -> Result<()> {
    let config = load_config()?;
    let client = client_for(&config)?;

    let project = client.get_project(id).await?;
    println!("{}  {}", project.id, project.label);
    if let Some(description) = project.description.as_deref() {
        if !description.is_empty() {
            println!("  {description}");
        }
    }

    let sessions = client.list_sessions_for_project(id).await?;
    println!();
    println!("Sessions ({}):", sessions.len());
    for session in &sessions {
        println!("  {}  {}", session.id, session_display_label(session));
    }

    let analyses = client.list_analyses_for_project(id).await?;
    println!();
    println!("Analyses ({}):", analyses.len());
    for analysis in &analyses {
        println!(
            "  {}  {}  ({} file(s))",
            analysis.id,
            analysis.label,
            analysis.files.len()
        );
    }
    Ok(())
}

/// List the acquisitions of one session.
pub async fn run_acquisitions(session_id: &str) -> Result<()> {
    let config = load_config()?;
    let client = client_for(&config)?;

    let acquisitions = client.list_acquisitions_for_session(session_id).await?;
    if acquisitions.is_empty() {
        println!("No acquisitions in session {session_id}.");
        return Ok(());
    }

    println!("{} acquisition(s):", acquisitions.len());
    for acquisition in acquisitions {
        println!("  {}  {}", acquisition.id, acquisition.label);
        for file in &acquisition.files {
            match file.size {
                Some(size) => println!("    {} ({size} bytes)", file.name),
                None => println!("    {}", file.name),
            }
        }
    }
    Ok(())
}

/// Label a session with its subject code when present, e.g. "9816 / pre".
pub fn session_display_label(session: &Session) -> String {
    let subject_code = session
        .subject
        .as_ref()
        .and_then(|s| s.code.as_deref().or(s.label.as_deref()));
    match subject_code {
        Some(code) => format!("{code} / {}", session.label),
        None => session.label.clone(),
    }
}

/// One selectable line per analysis file, e.g. "antsRegistration: warped.nii.gz".
pub fn analysis_file_items(analyses: &[Analysis]) -> Vec<(String, fwtag_api_types::FileRef)> {
    let mut items = Vec::new();
    for analysis in analyses {
        for file in &analysis.files {
            items.push((
                format!("{}: {}", analysis.label, file.name),
                fwtag_api_types::FileRef::new(analysis.id.clone(), file.name.clone()),
            ));
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwtag_api_types::{FileEntry, FileRef, Subject};

    fn session(label: &str, code: Option<&str>) -> Session {
        Session {
            id: "s1".to_string(),
            label: label.to_string(),
            project: None,
            subject: code.map(|c| Subject {
                id: None,
                code: Some(c.to_string()),
                label: None,
            }),
            created: None,
            modified: None,
        }
    }

    #[test]
    fn session_label_includes_subject_code_when_present() {
        assert_eq!(session_display_label(&session("pre", Some("9816"))), "9816 / pre");
        assert_eq!(session_display_label(&session("pre", None)), "pre");
    }

    #[test]
    fn analysis_files_flatten_into_selectable_items() {
        let analyses = vec![Analysis {
            id: "a1".to_string(),
            label: "antsRegistration".to_string(),
            files: vec![
                FileEntry {
                    name: "warped.nii.gz".to_string(),
                    size: None,
                    file_type: None,
                },
                FileEntry {
                    name: "affine.mat".to_string(),
                    size: None,
                    file_type: None,
                },
            ],
            created: None,
        }];

        let items = analysis_file_items(&analyses);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].0, "antsRegistration: warped.nii.gz");
        assert_eq!(items[0].1, FileRef::new("a1", "warped.nii.gz"));
        assert_eq!(items[1].1, FileRef::new("a1", "affine.mat"));
    }
}
