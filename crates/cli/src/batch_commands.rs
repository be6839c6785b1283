use std::path::PathBuf;

use {
    anyhow::bail,
    skilldoc_batch::{
        PipelineReport,
        io::{batch_exists, batch_read},
        validate::batch_validate,
    },
    skilldoc_config::SkilldocConfig,
};

const RULE_WIDTH: usize = 50;

pub async fn handle_run(
    config: SkilldocConfig,
    files: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
    preview_lines: Option<usize>,
) -> anyhow::Result<()> {
    let mut config = resolve_inputs(config, files)?;
    if out_dir.is_some() {
        config.output_dir = out_dir;
    }
    if let Some(lines) = preview_lines {
        config.report.preview_lines = lines;
    }

    let report = skilldoc_batch::run(&config).await?;
    print!("{}", render_summary(&report, config.report.preview_lines));

    let failed = report.failed_writes().count();
    if failed > 0 {
        bail!("{failed} document(s) could not be written");
    }
    Ok(())
}

pub async fn handle_validate(
    config: SkilldocConfig,
    files: Vec<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let config = resolve_inputs(config, files)?;
    let records = batch_read(config.inputs.iter().cloned()).await;
    let verdicts = batch_validate(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&verdicts)?);
    } else {
        for verdict in &verdicts {
            let status = if verdict.is_valid() { "valid  " } else { "invalid" };
            println!("{status} {}", verdict.location().display());
            for error in verdict.errors() {
                println!("        - {error}");
            }
        }
    }

    let invalid = verdicts.iter().filter(|v| !v.is_valid()).count();
    if invalid > 0 {
        bail!("{invalid} of {} config(s) failed validation", verdicts.len());
    }
    Ok(())
}

pub async fn handle_check(config: SkilldocConfig, files: Vec<PathBuf>) -> anyhow::Result<()> {
    let config = resolve_inputs(config, files)?;
    let found = batch_exists(config.inputs.iter().cloned()).await;

    for (path, exists) in &found {
        let status = if *exists { "ok     " } else { "missing" };
        println!("{status} {}", path.display());
    }

    let missing = found.values().filter(|exists| !**exists).count();
    if missing > 0 {
        bail!("{missing} file(s) missing");
    }
    Ok(())
}

fn resolve_inputs(config: SkilldocConfig, files: Vec<PathBuf>) -> anyhow::Result<SkilldocConfig> {
    let config = config.with_inputs(files);
    if config.inputs.is_empty() {
        bail!("no input files: pass paths or set `inputs` in skilldoc.toml");
    }
    Ok(config)
}

fn render_summary(report: &PipelineReport, preview_lines: usize) -> String {
    let total = report.total();
    let mut out = vec![
        format!("Read successfully: {}/{total}", report.read_count()),
        format!("Validated successfully: {}/{total}", report.valid_count()),
        format!("Generated docs: {}", report.documents.len()),
        String::new(),
        "Results Summary:".to_string(),
        "=".repeat(RULE_WIDTH),
    ];

    for doc in report.documents.values() {
        let name = doc
            .location
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| doc.location.display().to_string());
        out.push(String::new());
        out.push(name);
        out.push("-".repeat(RULE_WIDTH));
        out.extend(doc.text.lines().take(preview_lines).map(str::to_string));
        out.push("...".to_string());
    }
    out.push("=".repeat(RULE_WIDTH));

    let failed: Vec<_> = report.failed_writes().collect();
    if !report.writes.is_empty() {
        out.push(format!(
            "Wrote {}/{} document(s)",
            report.writes.len() - failed.len(),
            report.writes.len()
        ));
    }
    for outcome in failed {
        out.push(format!(
            "Failed to write {}: {}",
            outcome.location.display(),
            outcome.error.as_deref().unwrap_or("unknown error")
        ));
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_are_rejected() {
        let err = resolve_inputs(SkilldocConfig::default(), Vec::new()).unwrap_err();
        assert!(err.to_string().starts_with("no input files"));
    }

    #[test]
    fn cli_files_win_over_config() {
        let config = SkilldocConfig {
            inputs: vec![PathBuf::from("configured.json")],
            ..Default::default()
        };
        let config = resolve_inputs(config, vec![PathBuf::from("cli.json")]).unwrap();
        assert_eq!(config.inputs, vec![PathBuf::from("cli.json")]);
    }

    #[tokio::test]
    async fn summary_counts_and_previews() {
        let tmp = tempfile::tempdir().unwrap();
        let good = tmp.path().join("good.json");
        std::fs::write(&good, r#"{"name":"good","version":"1","description":"d"}"#).unwrap();
        let missing = tmp.path().join("missing.json");

        let config = SkilldocConfig {
            inputs: vec![good, missing],
            ..Default::default()
        };
        let report = skilldoc_batch::run(&config).await.unwrap();
        let summary = render_summary(&report, 1);

        assert!(summary.contains("Read successfully: 1/2\n"));
        assert!(summary.contains("Validated successfully: 1/2\n"));
        assert!(summary.contains("Generated docs: 2\n"));
        assert!(summary.contains("good.json\n"));
        assert!(summary.contains("# good\n...\n"));
        assert!(summary.contains("# Error Report\n...\n"));
        assert!(!summary.contains("Wrote"));
    }
}
