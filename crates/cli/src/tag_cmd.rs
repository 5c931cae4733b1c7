use anyhow::{Context, Result, bail};
use dialoguer::MultiSelect;

use crate::config::{client_for, load_config, open_store};
use crate::dismiss::DismissRegistry;
use crate::projects::analysis_file_items;
use fwtag_api_types::FileRef;
use fwtag_tag_store::TagDraft;

/// List stored tag records, front (most recent) first.
pub fn run_list() -> Result<()> {
    let store = open_store()?;
    let tags = store.all_tags()?;
    if tags.is_empty() {
        println!("No tags stored.");
        return Ok(());
    }

    for record in tags {
        println!("{}", record.tag);
        for file in &record.files {
            println!("  {file}");
        }
    }
    Ok(())
}

/// Label a set of analysis files, from explicit refs or interactive selection.
pub async fn run_set(label: &str, file_args: &[String], project: Option<&str>) -> Result<()> {
    let files = if !file_args.is_empty() {
        file_args
            .iter()
            .map(|arg| parse_file_ref(arg))
            .collect::<Result<Vec<_>>>()?
    } else if let Some(project_id) = project {
        match select_files_interactively(project_id).await? {
            Some(files) => files,
            None => return Ok(()),
        }
    } else {
        bail!("Provide file refs with --file ANALYSIS_ID:NAME, or --project <ID> to pick interactively.");
    };

    let file_count = files.len();
    let mut store = open_store()?;
    let before = store.all_tags()?.len();
    if !store.save(TagDraft::new(label, files))? {
        bail!("Tag record rejected: a label and a file set are both required.");
    }
    let after = store.all_tags()?.len();

    if after > before {
        println!("Tagged {file_count} file(s) as '{label}'.");
    } else {
        println!("Existing record relabelled to '{label}'.");
    }
    Ok(())
}

/// Delete all stored tag records.
pub fn run_clear() -> Result<()> {
    let mut store = open_store()?;
    store.delete_all()?;
    println!("All tags cleared.");
    Ok(())
}

/// Parse "ANALYSIS_ID:NAME" into a file reference.
pub fn parse_file_ref(arg: &str) -> Result<FileRef> {
    match arg.split_once(':') {
        Some((analysis_id, name)) if !analysis_id.is_empty() && !name.is_empty() => {
            Ok(FileRef::new(analysis_id, name))
        }
        _ => bail!("Invalid file ref '{arg}', expected ANALYSIS_ID:NAME"),
    }
}

/// Multi-select over a project's analysis files.
///
/// Returns `None` when the user dismisses the prompt; any cleanup hooks
/// registered for the draft run at that point.
async fn select_files_interactively(project_id: &str) -> Result<Option<Vec<FileRef>>> {
    let config = load_config()?;
    let client = client_for(&config)?;

    let analyses = client.list_analyses_for_project(project_id).await?;
    let items = analysis_file_items(&analyses);
    if items.is_empty() {
        bail!("Project {project_id} has no analysis files to tag.");
    }

    let registry = DismissRegistry::new();
    let _draft_cleanup = registry.subscribe(|| {
        println!("Tagging cancelled; draft discarded.");
    });

    let labels: Vec<&str> = items.iter().map(|(line, _)| line.as_str()).collect();
    let selection = MultiSelect::new()
        .with_prompt("Select files to tag (space to toggle, enter to confirm)")
        .items(&labels)
        .interact_opt()
        .context("failed to select analysis files")?;

    let Some(indices) = selection else {
        registry.notify();
        return Ok(None);
    };
    if indices.is_empty() {
        registry.notify();
        return Ok(None);
    }

    Ok(Some(
        indices
            .into_iter()
            .map(|i| items[i].1.clone())
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_ref_parses_id_and_name() {
        let file = parse_file_ref("a1:warped.nii.gz").expect("parse file ref");
        assert_eq!(file.analysis_id, "a1");
        assert_eq!(file.name, "warped.nii.gz");
    }

    #[test]
    fn file_name_may_contain_colons() {
        let file = parse_file_ref("a1:odd:name.txt").expect("parse file ref");
        assert_eq!(file.analysis_id, "a1");
        assert_eq!(file.name, "odd:name.txt");
    }

    #[test]
    fn malformed_refs_are_rejected() {
        assert!(parse_file_ref("no-separator").is_err());
        assert!(parse_file_ref(":name-only").is_err());
        assert!(parse_file_ref("id-only:").is_err());
    }
}
