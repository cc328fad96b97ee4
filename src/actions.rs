use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::git::GitPort;
use crate::menu::{MenuOption, Prompter};

const RECENT_TAG_LIMIT: usize = 5;

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    Clone,
    LocalRepository,
}

impl MainAction {
    pub fn menu() -> Vec<MenuOption<Self>> {
        vec![
            MenuOption::new("1", "Clone a new repository", MainAction::Clone),
            MenuOption::new("2", "Work with a local repository", MainAction::LocalRepository),
        ]
    }
}

/// Entries of the per-repository menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoAction {
    Status,
    CheckRemote,
    Commit,
    Tag,
    Push,
}

impl RepoAction {
    pub fn menu() -> Vec<MenuOption<Self>> {
        vec![
            MenuOption::new("1", "Show git status", RepoAction::Status),
            MenuOption::new("2", "Check remote access", RepoAction::CheckRemote),
            MenuOption::new("3", "Create commit", RepoAction::Commit),
            MenuOption::new("4", "Create tag", RepoAction::Tag),
            MenuOption::new("5", "Push", RepoAction::Push),
        ]
    }

    pub fn run<G, R, W>(self, git: &G, repo: &Path, prompter: &mut Prompter<R, W>) -> Result<()>
    where
        G: GitPort + ?Sized,
        R: BufRead,
        W: Write,
    {
        match self {
            RepoAction::Status => show_status(git, repo, prompter),
            RepoAction::CheckRemote => check_remote_access(git, repo, prompter),
            RepoAction::Commit => create_commit(git, repo, prompter),
            RepoAction::Tag => create_tag(git, repo, prompter),
            RepoAction::Push => push_changes(git, repo, prompter),
        }
    }
}

/// What the push sub-menu sends to `origin`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushMode {
    Branch,
    Tags,
    Both,
}

impl PushMode {
    pub fn menu() -> Vec<MenuOption<Self>> {
        vec![
            MenuOption::new("1", "Push commits (git push origin <branch>)", PushMode::Branch),
            MenuOption::new("2", "Push pending tags (git push origin --tags)", PushMode::Tags),
            MenuOption::new("3", "Push commits and tags", PushMode::Both),
        ]
    }
}

/// Pass recoverable command failures to `on_failure`, keep fatal ones.
fn recover<T>(
    result: Result<T>,
    on_failure: impl FnOnce(AppError) -> Result<()>,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_fatal() => Err(err),
        Err(err) => on_failure(err).map(|_| None),
    }
}

pub fn clone_repository<G, R, W>(
    git: &G,
    base_dir: &Path,
    prompter: &mut Prompter<R, W>,
) -> Result<()>
where
    G: GitPort + ?Sized,
    R: BufRead,
    W: Write,
{
    let url = prompter.ask("Repository SSH/HTTPS URL: ")?;
    if url.is_empty() {
        return prompter.warn("Invalid URL.");
    }

    let target = prompter.ask("Destination directory (blank for default): ")?;
    let destination = resolve_destination(base_dir, &target);

    if let Some(dest) = &destination {
        if let Some(parent) = dest.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                return prompter.failure("Error cloning repository.", &AppError::Io(err));
            }
        }
    }

    prompter.say("Cloning repository...")?;
    let dest_arg = destination.as_ref().map(|d| d.to_string_lossy().into_owned());
    let mut args = vec!["clone", url.as_str()];
    args.extend(dest_arg.as_deref());

    let cloned = recover(git.stream(base_dir, &args), |err| {
        warn!(%url, error = %err, "clone failed");
        prompter.failure("Error cloning repository.", &err)
    })?;
    if let Some(result) = cloned {
        for text in [&result.stdout, &result.stderr] {
            if !text.trim().is_empty() {
                prompter.say(text.trim_end())?;
            }
        }
        info!(%url, "clone finished");
        prompter.success("Clone finished.")?;
    }
    Ok(())
}

/// Blank means "let git pick"; relative paths hang off the base directory.
pub fn resolve_destination(base_dir: &Path, target: &str) -> Option<PathBuf> {
    if target.is_empty() {
        return None;
    }
    let path = PathBuf::from(target);
    if path.is_absolute() {
        Some(path)
    } else {
        Some(base_dir.join(path))
    }
}

pub fn show_status<G, R, W>(git: &G, repo: &Path, prompter: &mut Prompter<R, W>) -> Result<()>
where
    G: GitPort + ?Sized,
    R: BufRead,
    W: Write,
{
    let result = recover(git.execute(repo, &["status"], false), |err| {
        prompter.failure("Error running git status.", &err)
    })?;
    if let Some(result) = result {
        let text = if result.stdout.is_empty() {
            &result.stderr
        } else {
            &result.stdout
        };
        prompter.say(text.trim_end())?;
    }
    Ok(())
}

pub fn check_remote_access<G, R, W>(
    git: &G,
    repo: &Path,
    prompter: &mut Prompter<R, W>,
) -> Result<()>
where
    G: GitPort + ?Sized,
    R: BufRead,
    W: Write,
{
    let remote = match git.execute(repo, &["remote", "get-url", "origin"], true) {
        Ok(result) => result,
        Err(AppError::ExternalCommand { .. }) => {
            return prompter.warn("Repository has no 'origin' remote configured.");
        }
        Err(err) if err.is_fatal() => return Err(err),
        Err(err) => return prompter.failure("Error checking remote.", &err),
    };

    let remote_url = remote.stdout.trim();
    prompter.say(format!("Checking access to {} ...", remote_url))?;

    let listing = recover(git.execute(repo, &["ls-remote", "origin"], false), |err| {
        prompter.failure("Error checking remote.", &err)
    })?;
    let Some(listing) = listing else {
        return Ok(());
    };

    if listing.succeeded {
        prompter.success("Remote access verified.")
    } else {
        prompter.warn("Failed to access the remote.")?;
        if !listing.stderr.trim().is_empty() {
            prompter.say(listing.stderr.trim_end())?;
        }
        Ok(())
    }
}

pub fn create_commit<G, R, W>(git: &G, repo: &Path, prompter: &mut Prompter<R, W>) -> Result<()>
where
    G: GitPort + ?Sized,
    R: BufRead,
    W: Write,
{
    let status = recover(git.execute(repo, &["status", "--short"], false), |err| {
        prompter.failure("Error reading pending changes.", &err)
    })?;
    let Some(status) = status else {
        return Ok(());
    };

    if status.stdout.trim().is_empty() {
        return prompter.say("Nothing to commit.");
    }

    prompter.say(format!("Pending changes:\n{}", status.stdout.trim_end()))?;
    if !prompter.confirm("Proceed with git add -A and commit?")? {
        return prompter.warn("Commit cancelled.");
    }

    let message = prompter.ask("Commit message: ")?;
    if message.is_empty() {
        return prompter.warn("Empty message. Commit cancelled.");
    }

    let committed = recover(
        git.execute(repo, &["add", "-A"], true)
            .and_then(|_| git.execute(repo, &["commit", "-m", &message], true)),
        |err| prompter.failure("Error creating commit.", &err),
    )?;
    if committed.is_some() {
        info!(repo = %repo.display(), "commit created");
        prompter.success("Commit created successfully.")?;
    }
    Ok(())
}

pub fn create_tag<G, R, W>(git: &G, repo: &Path, prompter: &mut Prompter<R, W>) -> Result<()>
where
    G: GitPort + ?Sized,
    R: BufRead,
    W: Write,
{
    let listing = recover(git.execute(repo, &["tag", "--sort=-creatordate"], false), |err| {
        prompter.failure("Error listing tags.", &err)
    })?;
    let Some(listing) = listing else {
        return Ok(());
    };

    let recent: Vec<&str> = listing
        .stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(RECENT_TAG_LIMIT)
        .collect();
    if recent.is_empty() {
        prompter.say("No tags found.")?;
    } else {
        prompter.say("Recent tags:")?;
        for tag in recent {
            prompter.say(format!(" - {}", tag))?;
        }
    }

    let name = prompter.ask("New tag name (e.g. v1.0.20): ")?;
    if name.is_empty() {
        return prompter.warn("Empty tag name. Operation cancelled.");
    }
    let message = prompter.ask("Tag message: ")?;
    if message.is_empty() {
        return prompter.warn("Empty tag message. Operation cancelled.");
    }

    let tagged = recover(
        git.execute(repo, &["tag", "-a", &name, "-m", &message], true),
        |err| prompter.failure("Error creating tag.", &err),
    )?;
    if tagged.is_some() {
        info!(repo = %repo.display(), tag = %name, "tag created");
        prompter.success(format!("Tag {} created.", name))?;
    }
    Ok(())
}

pub fn push_changes<G, R, W>(git: &G, repo: &Path, prompter: &mut Prompter<R, W>) -> Result<()>
where
    G: GitPort + ?Sized,
    R: BufRead,
    W: Write,
{
    let head = match git.execute(repo, &["rev-parse", "--abbrev-ref", "HEAD"], true) {
        Ok(result) => result,
        Err(err) if err.is_fatal() => return Err(err),
        Err(err) => {
            warn!(error = %err, "could not resolve current branch");
            return prompter.warn("Could not determine the current branch.");
        }
    };
    let branch = head.stdout.trim().to_string();
    prompter.say(format!("Current branch: {}", branch))?;

    let options = PushMode::menu();
    let Some(choice) = prompter.menu("Select the push type:", &options)? else {
        return Ok(());
    };

    let push_branch = || git.execute(repo, &["push", "origin", &branch], true);
    let push_tags = || git.execute(repo, &["push", "origin", "--tags"], true);

    let (outcome, done) = match choice.value {
        PushMode::Branch => (push_branch(), "Commits pushed successfully."),
        PushMode::Tags => (push_tags(), "Tags pushed successfully."),
        PushMode::Both => (
            push_branch().and_then(|_| push_tags()),
            "Commits and tags pushed successfully.",
        ),
    };

    let pushed = recover(outcome, |err| prompter.failure("Error running push.", &err))?;
    if pushed.is_some() {
        info!(repo = %repo.display(), %branch, mode = ?choice.value, "push finished");
        prompter.success(done)?;
    }
    Ok(())
}
