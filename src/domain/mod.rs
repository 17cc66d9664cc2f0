//! Domain logic - pure business rules independent of git operations

pub mod commit;
pub mod issue;
pub mod release;

pub use commit::CommitRecord;
pub use issue::IssuePattern;
pub use release::{version_key_from_branch, ReleaseRef};
