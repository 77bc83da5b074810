use std::cell::RefCell;

use bitb_sync_core::reconcile::{GitExecutor, GitInvocation, GitOutput};

/// Records every invocation and reports success without running anything.
#[derive(Default)]
pub struct RecordingGit {
    calls: RefCell<Vec<GitInvocation>>,
}

impl RecordingGit {
    pub fn calls(&self) -> Vec<GitInvocation> {
        self.calls.borrow().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }
}

impl GitExecutor for RecordingGit {
    fn execute(&self, invocation: &GitInvocation) -> anyhow::Result<GitOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        Ok(GitOutput {
            success: true,
            code: Some(0),
            output: String::new(),
        })
    }
}
