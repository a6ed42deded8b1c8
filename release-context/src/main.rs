//! Release context resolver
//!
//! Runs as a step of the release-drafter workflow and emits the publish flag,
//! base branch, config file name and version for the release-drafter action.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use common::{init_logging, ConfigExt};
use release_context::{
    resolve, write_github_output, GithubOutput, InvocationContext, ReleaseParameters,
    WorkflowInputs,
};
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// `key=value` lines appended to `GITHUB_OUTPUT` (stdout when unset)
    Github,
    /// A JSON object on stdout
    Json,
}

/// Resolve release-drafter parameters from the CI invocation context
#[derive(Parser, Debug)]
#[command(name = "release-context")]
struct Args {
    /// Triggering event (push, pull_request, workflow_call, ...)
    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "")]
    event_name: String,

    /// Short ref name of the run
    #[arg(long, env = "GITHUB_REF_NAME", default_value = "")]
    ref_name: String,

    /// Pull request head branch
    #[arg(long, env = "GITHUB_HEAD_REF")]
    head_ref: Option<String>,

    /// Release-drafter config file name
    #[arg(long, env = "RELEASE_CONFIG_NAME")]
    config_name: Option<String>,

    /// Explicit release version; ignored unless it looks like a version
    #[arg(long, env = "RELEASE_VERSION")]
    version: Option<String>,

    #[arg(long, value_enum, default_value = "github")]
    format: Format,
}

impl Args {
    fn context(&self) -> InvocationContext {
        InvocationContext {
            event_name: self.event_name.clone(),
            ref_name: self.ref_name.clone(),
            head_ref: self.head_ref.clone(),
            inputs: WorkflowInputs {
                config_name: self.config_name.clone(),
                version: self.version.clone(),
            },
        }
    }
}

fn render_json(params: &ReleaseParameters) -> Result<String> {
    serde_json::to_string(params).context("Failed to serialize parameters")
}

fn main() -> Result<()> {
    let _guard = init_logging("release-context");
    let args = Args::parse();

    let ctx = args.context();
    let params = resolve(&ctx);

    info!(
        event = %ctx.event_name,
        ref_name = %ctx.ref_name,
        publish = params.publish,
        base_branch = %params.base_branch,
        config_name = %params.config_name,
        version = %params.version,
        "Resolved release parameters"
    );

    if params.version.is_empty() {
        if let Some(requested) = ctx.inputs.version.as_deref().filter(|v| !v.is_empty()) {
            info!(requested, "Version input is not version-like, using auto-versioning");
        }
    }

    match args.format {
        Format::Github => {
            let target = GithubOutput::from_env_value(String::env_opt("GITHUB_OUTPUT").as_deref());
            write_github_output(&params, &target)
        }
        Format::Json => {
            println!("{}", render_json(&params)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(event: &str, head_ref: &str, version: &str, format: &str) -> Args {
        Args::try_parse_from([
            "release-context",
            "--event-name",
            event,
            "--ref-name",
            "develop",
            "--head-ref",
            head_ref,
            "--config-name",
            "",
            "--version",
            version,
            "--format",
            format,
        ])
        .unwrap()
    }

    #[test]
    fn test_flags_build_context() {
        let args = parse("pull_request", "feature-x", "1.2.3-beta.1", "github");
        let params = resolve(&args.context());

        assert!(!params.publish);
        assert_eq!(params.base_branch, "feature-x");
        assert_eq!(params.config_name, "release-drafter.yml");
        assert_eq!(params.version, "1.2.3-beta.1");
        assert!(matches!(args.format, Format::Github));
    }

    #[test]
    fn test_format_flag() {
        assert!(matches!(parse("push", "", "", "json").format, Format::Json));
        assert!(Args::try_parse_from(["release-context", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_env_fallbacks() {
        std::env::set_var("GITHUB_EVENT_NAME", "push");
        std::env::set_var("GITHUB_REF_NAME", "main");
        std::env::set_var("GITHUB_HEAD_REF", "");
        std::env::set_var("RELEASE_CONFIG_NAME", "custom.yml");
        std::env::set_var("RELEASE_VERSION", "2.0.0");

        let args = Args::try_parse_from(["release-context"]).unwrap();

        for name in [
            "GITHUB_EVENT_NAME",
            "GITHUB_REF_NAME",
            "GITHUB_HEAD_REF",
            "RELEASE_CONFIG_NAME",
            "RELEASE_VERSION",
        ] {
            std::env::remove_var(name);
        }

        let params = resolve(&args.context());
        assert_eq!(
            params,
            ReleaseParameters {
                publish: true,
                base_branch: "main".to_string(),
                config_name: "custom.yml".to_string(),
                version: "2.0.0".to_string(),
            }
        );
    }

    #[test]
    fn test_render_json() {
        let params = ReleaseParameters {
            publish: false,
            base_branch: "develop".to_string(),
            config_name: "release-drafter.yml".to_string(),
            version: String::new(),
        };

        let value: serde_json::Value = serde_json::from_str(&render_json(&params).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "publish": false,
                "base_branch": "develop",
                "config_name": "release-drafter.yml",
                "version": "",
            })
        );
    }

    #[test]
    fn test_workflow_builds_from_its_own_checkout() {
        let workflow = include_str!("../../.github/workflows/release-drafter.yml");
        let run = workflow
            .lines()
            .find(|line| line.contains("cargo run"))
            .unwrap();

        assert!(run.contains("--manifest-path .release-context/Cargo.toml"));
        assert!(!run.contains("--release"));
        assert!(workflow.contains("path: .release-context"));
    }
}
