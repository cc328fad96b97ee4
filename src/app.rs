use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::actions::{self, MainAction, RepoAction};
use crate::config::Config;
use crate::error::Result;
use crate::git::GitPort;
use crate::menu::{MenuOption, Prompter};
use crate::scan;

/// Top-level dispatcher: the main menu and the per-repository session
pub struct App<G> {
    pub config: Config,
    git: G,
}

impl<G: GitPort> App<G> {
    pub fn new(config: Config, git: G) -> App<G> {
        App { config, git }
    }

    /// Drive the main menu until the user quits.
    pub fn run<R: BufRead, W: Write>(&self, prompter: &mut Prompter<R, W>) -> Result<()> {
        prompter.say(format!("Base directory: {}", self.config.base_dir.display()))?;

        let options = MainAction::menu();
        loop {
            let Some(option) = prompter.menu("Main menu:", &options)? else {
                prompter.say("See you soon!")?;
                info!("quit from main menu");
                return Ok(());
            };

            match option.value {
                MainAction::Clone => {
                    actions::clone_repository(&self.git, &self.config.base_dir, prompter)?
                }
                MainAction::LocalRepository => {
                    if let Some(repo) = self.choose_repository(prompter)? {
                        self.repository_session(&repo, prompter)?;
                    }
                }
            }
        }
    }

    fn choose_repository<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Option<PathBuf>> {
        let base = &self.config.base_dir;
        let repos = scan::list_repositories(base);
        if repos.is_empty() {
            prompter.warn("No repositories found. Use the clone option first.")?;
            return Ok(None);
        }

        let options: Vec<MenuOption<PathBuf>> = repos
            .into_iter()
            .enumerate()
            .map(|(idx, repo)| {
                let label = scan::display_label(&repo, base);
                MenuOption::new((idx + 1).to_string(), label, repo)
            })
            .collect();

        let choice = prompter.menu("Select the repository:", &options)?;
        Ok(choice.map(|option| option.value.clone()))
    }

    fn repository_session<R: BufRead, W: Write>(
        &self,
        repo: &Path,
        prompter: &mut Prompter<R, W>,
    ) -> Result<()> {
        info!(repo = %repo.display(), "entering repository session");
        prompter.say("")?;
        prompter.say(format!("Selected repository: {}", repo.display()))?;

        let options = RepoAction::menu();
        while let Some(option) = prompter.menu("Choose an action:", &options)? {
            option.value.run(&self.git, repo, prompter)?;
        }
        Ok(())
    }
}
