//! CI invocation context

/// Inputs passed to the reusable workflow by its caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowInputs {
    pub config_name: Option<String>,
    pub version: Option<String>,
}

/// Everything the resolver looks at for one workflow run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    /// `push`, `pull_request`, `workflow_call`, ...
    pub event_name: String,
    pub ref_name: String,
    /// Only present for `pull_request` events.
    pub head_ref: Option<String>,
    pub inputs: WorkflowInputs,
}

impl InvocationContext {
    pub fn new(event_name: impl Into<String>, ref_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            ref_name: ref_name.into(),
            ..Default::default()
        }
    }

    pub fn with_head_ref(mut self, head_ref: impl Into<String>) -> Self {
        self.head_ref = Some(head_ref.into());
        self
    }

    pub fn with_config_name(mut self, config_name: impl Into<String>) -> Self {
        self.inputs.config_name = Some(config_name.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.inputs.version = Some(version.into());
        self
    }

    pub fn is_pull_request(&self) -> bool {
        self.event_name == "pull_request"
    }
}
