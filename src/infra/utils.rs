//! Filepath: src/infra/utils.rs
//! Utility helpers organized by small, focused structs.
//! All functions are associated fns to keep call sites
//! ergonomic, testable, and discoverable.

use camino::Utf8Path;

/// Forward-slash path string helpers
pub struct PathUtils;

impl PathUtils
{
    /// Replace every backslash with a forward slash
    pub fn normalize_slashes(path: &str) -> String
    {
        path.replace('\\', "/")
    }

    /// Join a directory and a file name with a forward slash.
    /// An empty directory yields the bare name.
    pub fn join(
        dir: &str,
        name: &str,
    ) -> String
    {
        // Nothing to prefix
        if dir.is_empty()
        {
            return Self::normalize_slashes(name);
        }

        // Pre-size for dir + '/' + name
        let mut out = String::with_capacity(dir.len() + name.len() + 1);
        out.push_str(dir);

        if !dir.ends_with(['/', '\\'])
        {
            out.push('/');
        }

        out.push_str(name);

        // Normalize whatever separators the caller passed in
        Self::normalize_slashes(&out)
    }

    /// Extension of a file name as written after the last dot, without the
    /// dot. Dotfiles like `.hidden` have none.
    pub fn extension(name: &str) -> Option<&str>
    {
        Utf8Path::new(name).extension()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_join_variants()
    {
        assert_eq!(PathUtils::join("", "a_01.exr"), "a_01.exr");
        assert_eq!(PathUtils::join("/plates", "a_01.exr"), "/plates/a_01.exr");
        assert_eq!(PathUtils::join("/plates/", "a_01.exr"), "/plates/a_01.exr");
        assert_eq!(PathUtils::join("C:\\plates", "a_01.exr"), "C:/plates/a_01.exr");
    }

    #[test]
    fn test_extension()
    {
        assert_eq!(PathUtils::extension("a_01.exr"), Some("exr"));
        assert_eq!(PathUtils::extension("archive.tar.gz"), Some("gz"));
        assert_eq!(PathUtils::extension(".hidden"), None);
        assert_eq!(PathUtils::extension("README"), None);
    }
}
