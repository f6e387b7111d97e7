//! Remote URL discovery from a `.git` directory.

use std::fs;

use camino::Utf8Path;
use ds_core::GitInfo;

use crate::error::GitError;

/// Reads the remote URL from `<git_dir>/config`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitRepoLocator;

impl GitRepoLocator {
    /// Returns the first `url = ...` value of the config, rewritten by
    /// [`transform_git_url`].
    ///
    /// # Errors
    ///
    /// Fails if `git_dir` is not a directory, its `config` cannot be read,
    /// or the config has no `url` key.
    pub fn locate(git_dir: &Utf8Path) -> Result<GitInfo, GitError> {
        if !git_dir.is_dir() {
            return Err(GitError::NotADirectory(git_dir.to_owned()));
        }

        let config_path = git_dir.join("config");
        let data = fs::read(&config_path).map_err(|source| GitError::ReadConfig {
            path: config_path.clone(),
            source,
        })?;
        let text = String::from_utf8_lossy(&data);

        // first url wins, even if a later remote is the "main" one
        text.lines()
            .filter_map(|line| line.trim().split_once('='))
            .find(|(key, _)| key.trim() == "url")
            .map(|(_, value)| GitInfo::new(transform_git_url(value.trim())))
            .ok_or(GitError::NoRemoteUrl(config_path))
    }
}

/// Rewrites `git@host:path` into `https://host/path`.
///
/// Only the first `:` after `git@` is replaced. Anything else is returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use ds_scanner::transform_git_url;
///
/// assert_eq!(
///     transform_git_url("git@github.com:acme/widgets"),
///     "https://github.com/acme/widgets"
/// );
/// assert_eq!(
///     transform_git_url("https://github.com/acme/widgets"),
///     "https://github.com/acme/widgets"
/// );
/// ```
#[must_use]
pub fn transform_git_url(url: &str) -> String {
    match url.strip_prefix("git@") {
        Some(rest) if rest.contains(':') => format!("https://{}", rest.replacen(':', "/", 1)),
        _ => url.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git_dir_with_config(config: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config"), config).unwrap();
        dir
    }

    fn locate(dir: &tempfile::TempDir) -> Result<GitInfo, GitError> {
        GitRepoLocator::locate(Utf8Path::from_path(dir.path()).unwrap())
    }

    #[test]
    fn test_transform_git_url() {
        assert_eq!(
            transform_git_url("git@gitlab.com:group/sub/proj.git"),
            "https://gitlab.com/group/sub/proj.git"
        );
        assert_eq!(transform_git_url("git@host:a:b"), "https://host/a:b");
        assert_eq!(transform_git_url("git@nocolon"), "git@nocolon");
        assert_eq!(transform_git_url("ssh://git@host/x"), "ssh://git@host/x");
    }

    #[test]
    fn test_locate_ssh_remote() {
        let dir = git_dir_with_config(
            "[core]\n\tbare = false\n[remote \"origin\"]\n\turl = git@github.com:acme/widgets\n",
        );
        let info = locate(&dir).unwrap();
        assert_eq!(info.url, "https://github.com/acme/widgets");
    }

    #[test]
    fn test_first_url_wins() {
        let dir = git_dir_with_config(
            "[remote \"a\"]\nurl = https://one.example/x\n[remote \"b\"]\nurl = https://two.example/y\n",
        );
        assert_eq!(locate(&dir).unwrap().url, "https://one.example/x");
    }

    #[test]
    fn test_value_may_contain_equals() {
        let dir = git_dir_with_config("url = https://host/x?a=b\n");
        assert_eq!(locate(&dir).unwrap().url, "https://host/x?a=b");
    }

    #[test]
    fn test_no_url() {
        let dir = git_dir_with_config("[core]\n\tbare = false\n");
        assert!(matches!(locate(&dir), Err(GitError::NoRemoteUrl(_))));
    }

    #[test]
    fn test_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(locate(&dir), Err(GitError::ReadConfig { .. })));
    }

    #[test]
    fn test_not_a_directory() {
        let result = GitRepoLocator::locate(Utf8Path::new("/nonexistent/.git"));
        assert!(matches!(result, Err(GitError::NotADirectory(_))));
    }
}
