//! Git working copies pinned to a revision

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{AutotagOption, FetchOptions, Object, RemoteCallbacks, Repository};
use lsp_json_schema_common::config::RepoSource;
use lsp_json_schema_common::{GeneratorError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// Directory name of a repository's working copy
///
/// The last path segment of the URL, without a `.git` suffix.
///
/// # Example
/// ```
/// use lsp_json_schema_pipeline::git_fetcher::repo_dir_name;
///
/// assert_eq!(
///     repo_dir_name("https://github.com/microsoft/language-server-protocol.git").unwrap(),
///     "language-server-protocol"
/// );
/// ```
pub fn repo_dir_name(url: &str) -> Result<String> {
    let parsed = Url::parse(url)
        .map_err(|e| GeneratorError::Git(format!("Invalid repository URL {}: {}", url, e)))?;

    let segment = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .ok_or_else(|| GeneratorError::Git(format!("Repository URL {} has no path", url)))?;

    let name = segment.strip_suffix(".git").unwrap_or(segment);
    if name.is_empty() {
        return Err(GeneratorError::Git(format!(
            "Repository URL {} has no name",
            url
        )));
    }
    Ok(name.to_string())
}

/// Clone `source` under `workdir` unless already present, then check out
/// its revision
///
/// Returns the working copy path. The checkout is forced and leaves HEAD
/// detached at the revision.
pub fn ensure_repo(workdir: &Path, source: &RepoSource) -> Result<PathBuf> {
    let path = workdir.join(repo_dir_name(&source.url)?);

    let repo = if path.join(".git").exists() {
        debug!("reusing working copy {}", path.display());
        Repository::open(&path).map_err(|e| {
            GeneratorError::Git(format!("Failed to open {}: {}", path.display(), e))
        })?
    } else {
        clone(&source.url, &path)?
    };

    checkout(&repo, &source.revision)?;
    info!("{} at {}", path.display(), source.revision);

    Ok(path)
}

fn progress_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.transfer_progress(|stats| {
        if stats.received_objects() == stats.total_objects() {
            debug!(
                "Resolving deltas {}/{}",
                stats.indexed_deltas(),
                stats.total_deltas()
            );
        } else if stats.total_objects() > 0 {
            debug!(
                "Receiving objects {}/{}",
                stats.received_objects(),
                stats.total_objects()
            );
        }
        true
    });
    callbacks
}

fn clone(url: &str, path: &Path) -> Result<Repository> {
    info!("Cloning repository: {}", url);

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(progress_callbacks());

    let mut repo_builder = RepoBuilder::new();
    repo_builder.fetch_options(fetch_options);

    repo_builder
        .clone(url, path)
        .map_err(|e| GeneratorError::Git(format!("Failed to clone {}: {}", url, e)))
}

fn fetch_origin(repo: &Repository) -> Result<()> {
    let mut remote = repo
        .find_remote("origin")
        .map_err(|e| GeneratorError::Git(format!("No origin remote: {}", e)))?;

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(progress_callbacks());
    fetch_options.download_tags(AutotagOption::All);

    remote
        .fetch(&[] as &[&str], Some(&mut fetch_options), None)
        .map_err(|e| GeneratorError::Git(format!("Failed to fetch origin: {}", e)))
}

/// The revision as given, then as a remote branch
fn find_revision<'r>(repo: &'r Repository, revision: &str) -> Option<Object<'r>> {
    repo.revparse_single(revision)
        .or_else(|_| repo.revparse_single(&format!("origin/{}", revision)))
        .ok()
}

fn checkout(repo: &Repository, revision: &str) -> Result<()> {
    let object = match find_revision(repo, revision) {
        Some(object) => object,
        None => {
            debug!("{} not known locally, fetching", revision);
            fetch_origin(repo)?;
            find_revision(repo, revision).ok_or_else(|| {
                GeneratorError::Git(format!("Revision {} not found", revision))
            })?
        }
    };

    let commit = object
        .peel_to_commit()
        .map_err(|e| GeneratorError::Git(format!("{} is not a commit: {}", revision, e)))?;

    repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))
        .map_err(|e| GeneratorError::Git(format!("Failed to check out {}: {}", revision, e)))?;
    repo.set_head_detached(commit.id())
        .map_err(|e| GeneratorError::Git(format!("Failed to move HEAD to {}: {}", revision, e)))?;

    Ok(())
}
