use crate::domain::CommitRecord;
use crate::error::{ReleaseNotesError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use git2::{BranchType, Commit, ErrorCode, Oid, Repository as Git2Repo, Sort};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn resolve_oid(&self, refname: &str) -> Result<Oid> {
        let commit = self
            .repo
            .revparse_single(refname)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| {
                ReleaseNotesError::git_lookup(format!("Cannot resolve ref '{}': {}", refname, e))
            })?;

        Ok(commit.id())
    }
}

/// Author date of a commit, in the author's own timezone
fn author_date(commit: &Commit<'_>) -> Result<NaiveDate> {
    let when = commit.author().when();

    let offset = FixedOffset::east_opt(when.offset_minutes() * 60).ok_or_else(|| {
        ReleaseNotesError::parse(format!(
            "Commit {} has an invalid timezone offset",
            commit.id()
        ))
    })?;
    let utc = DateTime::from_timestamp(when.seconds(), 0).ok_or_else(|| {
        ReleaseNotesError::parse(format!("Commit {} has an invalid timestamp", commit.id()))
    })?;

    Ok(utc.with_timezone(&offset).date_naive())
}

impl super::Repository for Git2Repository {
    fn merge_records(&self, refname: &str) -> Result<Vec<CommitRecord>> {
        let tip = self.resolve_oid(refname)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push(tip)?;

        let mut records = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            if commit.parent_count() < 2 {
                continue;
            }

            records.push(CommitRecord {
                hash: oid.to_string(),
                date: author_date(&commit)?,
                parent_hashes: commit.parent_ids().map(|id| id.to_string()).collect(),
            });
        }

        Ok(records)
    }

    fn list_remote_branches(&self, prefix: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in self.repo.branches(Some(BranchType::Remote))? {
            let (branch, _) = entry?;

            let name = match branch.name()? {
                Some(name) if name.starts_with(prefix) => name.to_string(),
                _ => continue,
            };

            if branch.get().peel_to_commit().is_err() {
                log::debug!("Skipping branch '{}' without commits", name);
                continue;
            }

            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    fn resolve_ref(&self, refname: &str) -> Result<String> {
        Ok(self.resolve_oid(refname)?.to_string())
    }

    fn merge_subjects_between(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let from_oid = self.resolve_oid(from)?;
        let to_oid = self.resolve_oid(to)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push(from_oid)?;
        revwalk.push(to_oid)?;

        match self.repo.merge_bases(from_oid, to_oid) {
            Ok(bases) => {
                for base in bases.iter() {
                    revwalk.hide(*base)?;
                }
            }
            // Unrelated histories: the range is everything reachable from either side
            Err(e) if e.code() == ErrorCode::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let mut subjects = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            if commit.parent_count() < 2 {
                continue;
            }

            subjects.push(commit.summary().unwrap_or("(empty message)").to_string());
        }

        Ok(subjects)
    }

    fn fetch_from_remote(&self, remote_name: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|e| {
            ReleaseNotesError::git_lookup(format!("Remote '{}' not found: {}", remote_name, e))
        })?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        let refspec_heads = format!("+refs/heads/*:refs/remotes/{}/*", remote_name);
        remote.fetch(&[refspec_heads.as_str()], Some(&mut fetch_options), None)?;

        Ok(())
    }
}
