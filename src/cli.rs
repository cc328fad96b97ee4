use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "gitmenu")]
#[command(version)]
#[command(about = "Interactive menu for cloning, committing, tagging and pushing local Git repositories")]
pub struct CliArgs {
    /// Base directory holding your repositories (default: ~/Documents/Git)
    pub base_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_base_dir() {
        let args = CliArgs::parse_from(["gitmenu", "/test/path"]);
        assert_eq!(args.base_dir, Some(PathBuf::from("/test/path")));
    }

    #[test]
    fn test_cli_parse_no_args() {
        let args = CliArgs::parse_from(["gitmenu"]);
        assert_eq!(args.base_dir, None);
    }

    #[test]
    fn test_cli_rejects_extra_positionals() {
        assert!(CliArgs::try_parse_from(["gitmenu", "/a", "/b"]).is_err());
    }
}
