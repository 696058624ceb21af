//! Startup loaders for the student profile and prompt overrides.
//!
//! Any failure here is a startup error; nothing in this module runs per request.

use anyhow::{Context, Result};
use kai_core::{profile::StudentProfile, prompt::PromptTemplates};
use std::{collections::HashMap, fs, path::Path};
use tracing::info;

/// Reads every `*.md` file in `prompts_path`, keyed by file stem.
pub fn load_prompts(prompts_path: &Path) -> Result<HashMap<String, String>> {
    let mut prompts = HashMap::new();
    for entry in fs::read_dir(prompts_path)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            let prompt_key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .context("Could not get file stem")?
                .to_string();
            let content = fs::read_to_string(&path)?;
            prompts.insert(prompt_key, content);
        }
    }
    Ok(prompts)
}

/// The compiled-in templates, with any overrides found in `prompts_path` applied.
pub fn load_templates(prompts_path: Option<&Path>) -> Result<PromptTemplates> {
    let Some(path) = prompts_path else {
        return Ok(PromptTemplates::default());
    };
    let overrides = load_prompts(path)
        .with_context(|| format!("Failed to load prompts from {}", path.display()))?;
    info!(count = overrides.len(), path = %path.display(), "Loaded prompt overrides");
    Ok(PromptTemplates::default().with_overrides(&overrides))
}

/// The profile stored as JSON at `profile_path`, or the built-in one.
pub fn load_profile(profile_path: Option<&Path>) -> Result<StudentProfile> {
    match profile_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read profile {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid profile JSON in {}", path.display()))
        }
        None => Ok(StudentProfile::builtin()),
    }
}
