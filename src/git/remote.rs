//! Remote URL sources.

/// Name of the remote used to identify the project.
pub const ORIGIN: &str = "origin";

/// Something that can report the URL of a named remote.
///
/// Implemented by [`GitRepository`](crate::git::GitRepository) for real
/// repositories and by [`StaticRemote`] when the URL is already known.
pub trait RemoteUrlSource {
    /// Returns the URL of remote `name`, or `None` if it is not configured.
    fn remote_url(&self, name: &str) -> Option<String>;

    /// Returns the URL of the `origin` remote.
    fn origin_url(&self) -> Option<String> {
        self.remote_url(ORIGIN)
    }
}

/// A remote source answering with a fixed URL for every remote name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRemote {
    url: Option<String>,
}

impl StaticRemote {
    /// Creates a source that always reports `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    /// Creates a source with no remote configured.
    pub fn none() -> Self {
        Self::default()
    }
}

impl RemoteUrlSource for StaticRemote {
    fn remote_url(&self, _name: &str) -> Option<String> {
        self.url.clone()
    }
}

impl<T: RemoteUrlSource + ?Sized> RemoteUrlSource for &T {
    fn remote_url(&self, name: &str) -> Option<String> {
        (**self).remote_url(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_remote_reports_url() {
        let source = StaticRemote::new("git@host:org/emacs.git");
        assert_eq!(
            source.origin_url().as_deref(),
            Some("git@host:org/emacs.git")
        );
    }

    #[test]
    fn static_remote_none() {
        assert_eq!(StaticRemote::none().origin_url(), None);
    }
}
