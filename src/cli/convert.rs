use std::path::{Path, PathBuf};

use similar::TextDiff;
use skillconv::ConverterConfig;

pub(crate) fn run(
    skill_dir: PathBuf,
    output: Option<PathBuf>,
    check: bool,
    config: ConverterConfig,
) {
    let code = skillconv::convert(&skill_dir, &config).unwrap_or_else(|e| {
        eprintln!("skillconv convert: {e}");
        std::process::exit(1);
    });
    let content = code.source();

    let Some(output_path) = output else {
        print!("{content}");
        return;
    };

    let existing = if output_path.exists() {
        std::fs::read_to_string(&output_path).unwrap_or_else(|e| {
            eprintln!(
                "skillconv convert: failed to read {}: {e}",
                output_path.display()
            );
            std::process::exit(1);
        })
    } else {
        String::new()
    };
    let changed = existing != content;

    if check {
        if changed {
            eprintln!("Would update {}", output_path.display());
            eprint!("{}", unified_diff(&existing, &content, &output_path));
            std::process::exit(1);
        }
        eprintln!("ok");
        return;
    }

    // Diff-aware file output: only write on change.
    if changed {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                eprintln!(
                    "skillconv convert: failed to create directory {}: {e}",
                    parent.display()
                );
                std::process::exit(1);
            });
        }
        std::fs::write(&output_path, &content).unwrap_or_else(|e| {
            eprintln!(
                "skillconv convert: failed to write {}: {e}",
                output_path.display()
            );
            std::process::exit(1);
        });
        eprintln!(
            "Updated {} ({} tool(s))",
            output_path.display(),
            code.tool_count()
        );
    } else {
        eprintln!("Unchanged {}", output_path.display());
    }
}

/// Unified diff between the file on disk and the freshly generated program.
fn unified_diff(old: &str, new: &str, path: &Path) -> String {
    let name = path.display().to_string();
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(&name, &name)
        .to_string()
}
