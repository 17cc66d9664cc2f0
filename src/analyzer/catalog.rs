use crate::boundary::BoundaryWarning;
use crate::domain::ReleaseRef;
use semver::Version;
use std::collections::HashMap;

/// Release branches ordered by version, highest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseCatalog {
    releases: Vec<ReleaseRef>,
}

/// Two adjacent releases: `current` and the next older one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseWindow<'a> {
    pub previous: &'a ReleaseRef,
    pub current: &'a ReleaseRef,
}

impl ReleaseCatalog {
    /// Build a catalog from release branch names.
    ///
    /// Branches without a version are skipped with a warning. When two
    /// branches share a version, the later one in `branch_names` is kept.
    pub fn from_branches<S: AsRef<str>>(branch_names: &[S]) -> (Self, Vec<BoundaryWarning>) {
        let mut by_version: HashMap<Version, ReleaseRef> = HashMap::new();
        let mut warnings = Vec::new();

        for name in branch_names.iter().map(AsRef::as_ref) {
            match ReleaseRef::from_branch(name) {
                Ok(release) => {
                    if let Some(replaced) =
                        by_version.insert(release.version_key.clone(), release)
                    {
                        log::debug!(
                            "Branch '{}' replaced by a later branch with version {}",
                            replaced.branch_name,
                            replaced.version_key
                        );
                    }
                }
                Err(e) => {
                    log::debug!("{}", e);
                    warnings.push(BoundaryWarning::UnversionedBranch {
                        branch: name.to_string(),
                    });
                }
            }
        }

        let mut releases: Vec<ReleaseRef> = by_version.into_values().collect();
        releases.sort_by(|a, b| b.version_key.cmp(&a.version_key));

        (ReleaseCatalog { releases }, warnings)
    }

    pub fn releases(&self) -> &[ReleaseRef] {
        &self.releases
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Adjacent release pairs, newest window first
    pub fn windows(&self) -> impl Iterator<Item = ReleaseWindow<'_>> {
        self.releases.windows(2).map(|pair| ReleaseWindow {
            previous: &pair[1],
            current: &pair[0],
        })
    }
}
