use chrono::NaiveDate;
use git2::{Oid, Repository as Git2Repo, Signature, Time};
use git_release_notes::cli::orchestration::correlate_releases;
use git_release_notes::config::Config;
use git_release_notes::git::{Git2Repository, Repository};

// 2024-01-01T12:00:00Z
const JAN_1: i64 = 1_704_110_400;
const DAY: i64 = 86_400;

fn commit(repo: &Git2Repo, message: &str, seconds: i64, parents: &[Oid]) -> Oid {
    let when = Time::new(seconds, 0);
    let sig = Signature::new("Tester", "tester@example.com", &when).unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parents: Vec<_> = parents.iter().map(|id| repo.find_commit(*id).unwrap()).collect();
    let parent_refs: Vec<_> = parents.iter().collect();

    repo.commit(None, &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

fn remote_ref(repo: &Git2Repo, name: &str, oid: Oid) {
    repo.reference(&format!("refs/remotes/{}", name), oid, true, "test")
        .unwrap();
}

struct Fixture {
    _dir: tempfile::TempDir,
    repo: Git2Repository,
    base: Oid,
    release_2: Oid,
    trunk_merge: Oid,
}

/// base ── feature ── release 2.0 merge ── trunk merge on 2024-03-05
fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let repo = Git2Repo::init(dir.path()).unwrap();

    let base = commit(&repo, "Initial commit", JAN_1, &[]);
    let feature = commit(&repo, "Add search", JAN_1 + DAY, &[base]);
    let release_2 = commit(
        &repo,
        "Merge pull request #2 from team/PCD-2-search\n\nSearch for everyone",
        JAN_1 + 2 * DAY,
        &[base, feature],
    );
    let trunk_merge = commit(
        &repo,
        "Merge branch 'release/2.0.x'",
        JAN_1 + 64 * DAY,
        &[base, release_2],
    );

    remote_ref(&repo, "origin/release/1.0.x", base);
    remote_ref(&repo, "origin/release/2.0.x", release_2);
    remote_ref(&repo, "origin/feature/search", feature);
    remote_ref(&repo, "origin/master", trunk_merge);

    Fixture {
        _dir: dir,
        repo: Git2Repository::from_git2(repo),
        base,
        release_2,
        trunk_merge,
    }
}

#[test]
fn test_list_remote_branches_filters_by_prefix() {
    let fx = fixture();
    let branches = fx.repo.list_remote_branches("origin/release/").unwrap();

    assert_eq!(branches, vec!["origin/release/1.0.x", "origin/release/2.0.x"]);
}

#[test]
fn test_resolve_ref() {
    let fx = fixture();

    assert_eq!(
        fx.repo.resolve_ref("origin/release/1.0.x").unwrap(),
        fx.base.to_string()
    );
    assert!(fx.repo.resolve_ref("origin/release/9.9.x").is_err());
}

#[test]
fn test_merge_records_newest_first() {
    let fx = fixture();
    let records = fx.repo.merge_records("origin/master").unwrap();

    let hashes: Vec<&str> = records.iter().map(|r| r.hash.as_str()).collect();
    assert_eq!(
        hashes,
        vec![fx.trunk_merge.to_string(), fx.release_2.to_string()]
    );

    assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    assert_eq!(
        records[0].parent_hashes,
        vec![fx.base.to_string(), fx.release_2.to_string()]
    );
}

#[test]
fn test_merge_subjects_between_releases() {
    let fx = fixture();
    let subjects = fx
        .repo
        .merge_subjects_between("origin/release/1.0.x", "origin/release/2.0.x")
        .unwrap();

    assert_eq!(subjects, vec!["Merge pull request #2 from team/PCD-2-search"]);
}

#[test]
fn test_merge_subjects_of_identical_refs_is_empty() {
    let fx = fixture();
    let subjects = fx
        .repo
        .merge_subjects_between("origin/release/2.0.x", "origin/release/2.0.x")
        .unwrap();

    assert!(subjects.is_empty());
}

#[test]
fn test_correlation_against_real_repository() {
    let fx = fixture();
    let correlation = correlate_releases(&fx.repo, &Config::default()).unwrap();

    assert_eq!(correlation.reports.len(), 1);
    let report = &correlation.reports[0];
    assert_eq!(report.release, "2.0.x");
    assert_eq!(report.date, NaiveDate::from_ymd_opt(2024, 3, 5));
    assert_eq!(report.issue_ids, vec!["PCD-2"]);
}

#[test]
fn test_fetch_from_missing_remote_is_warning() {
    let fx = fixture();
    let mut config = Config::default();
    config.repository.fetch = true;

    let correlation = correlate_releases(&fx.repo, &config).unwrap();
    assert_eq!(correlation.reports.len(), 1);
    assert!(correlation
        .warnings
        .iter()
        .any(|w| w.to_string().contains("Could not fetch from remote 'origin'")));
}
