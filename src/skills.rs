//! Skills repository staging.
//!
//! Each run gets its own clone of the skills repository at a pinned
//! commit, a filtered directory containing only the evaluation skill,
//! and a copy of the skill's `scripts/` inside the workspace so the
//! skill's relative paths resolve.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::workspace::copy_dir_recursive;
use crate::EvalError;

pub const SKILLS_REPO_URL: &str = "https://github.com/huggingface/skills.git";
pub const SKILLS_REPO_COMMIT: &str = "fe044dc129e33aca7c2edc0084f02a7119b4109f";

/// Skill names accepted in a `SKILL.md` manifest.
pub const SKILL_NAMES: &[&str] = &[
    "hugging-face-evaluation",
    "hugging-face-evaluation-manager",
];

/// Known manifest locations, checked before falling back to a scan.
const MANIFEST_CANDIDATES: &[&str] = &[
    "skills/hugging-face-evaluation/SKILL.md",
    "hf_model_evaluation/skills/hugging-face-evaluation-manager/SKILL.md",
    "hf_model_evaluation/skills/hugging-face-evaluation/SKILL.md",
];

/// Directories never copied out of the clone.
const IGNORED_DIRS: &[&str] = &[".git", ".venv", "__pycache__"];

/// Clone the skills repo at the pinned commit into `destination`,
/// replacing any previous clone.
pub fn clone_skills_repo(url: &str, commit: &str, destination: &Path) -> Result<(), EvalError> {
    if destination.exists() {
        fs::remove_dir_all(destination).map_err(|e| EvalError::io("remove stale clone", e))?;
    }

    info!(url, commit, "cloning skills repo");
    run_git(&[
        "clone",
        "--no-checkout",
        url,
        &destination.display().to_string(),
    ])?;
    run_git(&[
        "-C",
        &destination.display().to_string(),
        "checkout",
        commit,
    ])?;
    Ok(())
}

/// Locate the evaluation skill's manifest inside a clone.
///
/// Tries the known candidate paths first, then scans for any `SKILL.md`
/// declaring one of the accepted skill names.
pub fn find_skill_manifest(repo: &Path) -> Result<PathBuf, EvalError> {
    for candidate in MANIFEST_CANDIDATES {
        let manifest = repo.join(candidate);
        if manifest.exists() {
            return Ok(manifest);
        }
    }

    if let Some(manifest) = scan_for_manifest(repo) {
        return Ok(manifest);
    }

    Err(EvalError::SkillRepo(format!(
        "Expected skill manifest not found in cloned skills repo at {}; checked: {}",
        repo.display(),
        MANIFEST_CANDIDATES.join(", ")
    )))
}

/// Create a filtered skills directory containing only the target skill.
/// Returns the directory to hand to the agent framework.
pub fn prepare_skills_directory(
    manifest_path: &Path,
    destination: &Path,
) -> Result<PathBuf, EvalError> {
    if destination.exists() {
        fs::remove_dir_all(destination)
            .map_err(|e| EvalError::io("remove stale filtered skills", e))?;
    }

    let skill_dir = manifest_path.parent().ok_or_else(|| {
        EvalError::SkillRepo(format!(
            "Skill manifest has no parent directory: {}",
            manifest_path.display()
        ))
    })?;
    let skill_name = skill_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("skill");

    copy_dir_recursive(skill_dir, &destination.join(skill_name), IGNORED_DIRS)?;
    Ok(destination.to_path_buf())
}

/// Copy the skill's `scripts/` into the workspace so its relative paths
/// resolve at run time. No-op when the skill ships no scripts.
pub fn copy_skill_runtime_assets(skill_dir: &Path, workspace: &Path) -> Result<(), EvalError> {
    let scripts = skill_dir.join("scripts");
    if !scripts.exists() {
        return Ok(());
    }
    let target = workspace.join("scripts");
    if target.exists() {
        fs::remove_dir_all(&target).map_err(|e| EvalError::io("remove stale scripts", e))?;
    }
    copy_dir_recursive(&scripts, &target, IGNORED_DIRS)
}

fn run_git(args: &[&str]) -> Result<(), EvalError> {
    let output = std::process::Command::new("git")
        .args(args)
        .output()
        .map_err(|e| EvalError::SkillRepo(format!("failed to run git: {}", e)))?;
    if !output.status.success() {
        return Err(EvalError::SkillRepo(format!(
            "git {} failed: {}",
            args.first().copied().unwrap_or_default(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}

fn scan_for_manifest(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if path.file_name().and_then(|n| n.to_str()) != Some(".git") {
                subdirs.push(path);
            }
            continue;
        }
        if path.file_name().and_then(|n| n.to_str()) != Some("SKILL.md") {
            continue;
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => continue,
        };
        for name in SKILL_NAMES {
            if content.contains(&format!("name: {}", name))
                || content.contains(&format!("name: \"{}\"", name))
            {
                return Some(path);
            }
        }
    }

    for subdir in subdirs {
        if let Some(found) = scan_for_manifest(&subdir) {
            return Some(found);
        }
    }
    None
}
