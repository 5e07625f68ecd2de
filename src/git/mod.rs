//! Git repository access for remote URL lookup.

pub mod remote;
pub mod repository;

pub use remote::{RemoteUrlSource, StaticRemote, ORIGIN};
pub use repository::GitRepository;
