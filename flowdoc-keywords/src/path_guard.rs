use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Fail when `output` names the same file as `input`.
pub fn ensure_output_not_input(output: &Path, input: &Path) -> Result<()> {
    let out_norm = absolute(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;
    let in_norm = absolute(input)
        .with_context(|| format!("failed to resolve input path {}", input.display()))?;

    if out_norm == in_norm {
        bail!(
            "refusing to overwrite the input document {} with JSON output",
            input.display()
        );
    }
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }

    // Not on disk yet: join with cwd and fold `.`/`..` lexically.
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().context("current_dir")?.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}
