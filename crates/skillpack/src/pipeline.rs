//! End-to-end build: sources in, artifact and digest out.

use crate::Result;
use crate::bundle::{BuildOutput, ContentBundle};
use crate::catalog::build_catalog;
use crate::config::BuildConfig;
use crate::manifest::load_product_manifest;
use crate::text::{load_when_to_use, render_catalog, render_overview};

/// Run the full build described by `config`.
///
/// # Errors
///
/// Returns an error if an existing source cannot be read, the manifest is
/// invalid, or the output cannot be written.
pub fn build(config: &BuildConfig) -> Result<BuildOutput> {
    let catalog = build_catalog(&config.skills_dir, &config.subagents_dir)?;
    let manifest = load_product_manifest(&config.manifest, &config.name)?;

    let bundle = ContentBundle::assemble(
        &catalog,
        render_catalog(&catalog),
        load_when_to_use(&config.when_to_use)?,
        render_overview(&manifest),
    );
    let output = bundle.write_to(&config.artifact_path())?;

    log::info!(
        "bundled {} skills and {} subagents into {} ({} bytes, sha256 {})",
        output.skills,
        output.subagents,
        output.artifact.display(),
        output.bytes,
        output.digest,
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::sha256_hex;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn builds_from_default_layout() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("skills/foo")).unwrap();
        fs::write(
            root.join("skills/foo/SKILL.md"),
            "---\nname: bar\ndescription: \"does bar\"\n---\nBody",
        )
        .unwrap();
        fs::create_dir_all(root.join("agents")).unwrap();
        fs::write(root.join("agents/helper.md"), "Help").unwrap();
        fs::write(
            root.join("package.json"),
            r#"{"name":"kit","version":"0.3.0"}"#,
        )
        .unwrap();

        let output = build(&BuildConfig::with_root(root)).unwrap();

        let bytes = fs::read(&output.artifact).unwrap();
        assert_eq!(sha256_hex(&bytes), output.digest);
        let bundle: ContentBundle = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(bundle.skills.len(), 1);
        assert_eq!(bundle.skills[0].name, "bar");
        assert_eq!(bundle.subagents[0].name, "helper");
        assert!(bundle.content.catalog.contains("- **bar** (`foo`): does bar"));
        assert!(bundle.content.overview.starts_with("# kit v0.3.0"));
        assert_eq!(bundle.content.when_to_use, "");
    }

    #[test]
    fn builds_empty_bundle_without_sources() {
        let tmp = TempDir::new().unwrap();
        let output = build(&BuildConfig::with_root(tmp.path())).unwrap();
        assert_eq!((output.skills, output.subagents), (0, 0));
        assert!(output.artifact.exists());
        assert!(output.sidecar.exists());
    }

    #[test]
    fn rebuild_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("skills/a")).unwrap();
        fs::write(tmp.path().join("skills/a/SKILL.md"), "A").unwrap();
        let config = BuildConfig::with_root(tmp.path());

        let first = build(&config).unwrap();
        let second = build(&config).unwrap();
        assert_eq!(first.digest, second.digest);
    }
}
