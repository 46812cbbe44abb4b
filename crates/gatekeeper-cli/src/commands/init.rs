//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::ExitCode;

const DEFAULT_CONFIG: &str = r#"# gatekeeper configuration
# Every value below is the built-in default; delete what you do not change.

[scan]
# Scan roots relative to the project base. Missing roots are skipped.
roots = ["app", "components", "lib", "src", "pages", "hooks"]

# Roots that must exist; a missing one fails the gate.
required_roots = []

# Directory names never descended into (hidden directories are always skipped).
exclude_dirs = ["node_modules", ".next", "out", "build", "dist", "coverage", ".turbo", ".vercel", ".git"]

# File extensions to scan.
extensions = ["ts", "tsx", "js", "jsx", "css", "scss"]

# "substring": a file is exempt if its path contains the exemption string.
# "prefix":    a file is exempt if its path starts with the exemption path,
#              so src/tokens does not cover src/tokens-backup.
exemption_mode = "substring"

# Abort instead of skipping syntax rules for files that cannot be parsed.
fail_on_parse_error = false

# Per-rule settings. `exempt` replaces the rule's default exemptions.

[rules.hardcoded-value]
enabled = true
exempt = ["src/design-system/tokens", "src/styles/tokens"]

[rules.motion-import]
enabled = true
exempt = ["src/design-system/motion"]

# [rules.client-directive]
# enabled = true

# [rules.explicit-any]
# enabled = true

# [rules.escape-hatch-assertion]
# enabled = true

# [rules.compiler-suppression]
# enabled = true
"#;

/// Runs the init command, writing `gatekeeper.toml` into `root`.
pub fn run(root: &Path, force: bool) -> Result<ExitCode> {
    let config_path = root.join("gatekeeper.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit gatekeeper.toml to adjust roots and exemptions");
    println!("  2. Run: gatekeeper check");
    println!("  3. In CI, run: gatekeeper gate");

    Ok(ExitCode::SUCCESS)
}
