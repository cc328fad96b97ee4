#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use gitmenu::error::{AppError, Result};
use gitmenu::git::{CommandResult, GitPort};
use gitmenu::menu::Prompter;

/// Scripted git double: canned results per argument line, every call recorded.
///
/// Unscripted calls succeed with empty output. When several results are
/// queued for the same arguments they are handed out in order, the last one
/// repeating.
#[derive(Default)]
pub struct FakeGit {
    responses: RefCell<HashMap<String, VecDeque<CommandResult>>>,
    calls: RefCell<Vec<(PathBuf, String)>>,
    streamed: RefCell<Vec<String>>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, args: &str, result: CommandResult) -> Self {
        self.responses
            .borrow_mut()
            .entry(args.to_string())
            .or_default()
            .push_back(result);
        self
    }

    /// Argument lines of every call, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(_, args)| args.clone()).collect()
    }

    /// Argument lines of calls made with output passed through.
    pub fn streamed(&self) -> Vec<String> {
        self.streamed.borrow().clone()
    }

    pub fn call_dirs(&self) -> Vec<PathBuf> {
        self.calls.borrow().iter().map(|(cwd, _)| cwd.clone()).collect()
    }
}

impl GitPort for FakeGit {
    fn execute(&self, cwd: &Path, args: &[&str], strict: bool) -> Result<CommandResult> {
        let key = args.join(" ");
        self.calls.borrow_mut().push((cwd.to_path_buf(), key.clone()));

        let result = {
            let mut responses = self.responses.borrow_mut();
            match responses.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
                Some(queue) => queue.front().cloned().unwrap_or_default(),
                None => CommandResult::success(""),
            }
        };

        if strict && !result.succeeded {
            return Err(AppError::ExternalCommand {
                command: format!("git {}", key),
                code: Some(result.exit_code),
                stderr: result.stderr,
            });
        }
        Ok(result)
    }

    fn stream(&self, cwd: &Path, args: &[&str]) -> Result<CommandResult> {
        self.streamed.borrow_mut().push(args.join(" "));
        self.execute(cwd, args, true)
    }
}

pub type TestPrompter = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

pub fn prompter(input: &str) -> TestPrompter {
    Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

pub fn output_of(prompter: TestPrompter) -> String {
    String::from_utf8_lossy(&prompter.into_output()).into_owned()
}

pub fn create_test_git_repo(path: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(path)?;
    fs::create_dir(path.join(".git"))?;
    Ok(())
}
