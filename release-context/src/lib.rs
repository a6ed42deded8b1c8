//! Release context resolution for the release-drafter workflow
//!
//! Turns the CI invocation context (event, ref, PR head ref, workflow inputs)
//! into the parameters handed to the release-drafter action.

pub mod context;
pub mod output;
pub mod resolve;

pub use context::{InvocationContext, WorkflowInputs};
pub use output::{write_github_output, GithubOutput};
pub use resolve::{resolve, ReleaseParameters, DEFAULT_CONFIG_NAME, MAIN_BRANCH};
