//! Path decomposition.

/// Split a path into its non-empty `/`-delimited segments.
///
/// Leading, trailing and repeated slashes collapse, so `/` yields nothing and
/// `//pets///{petId}/` yields `["pets", "{petId}"]`.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Append `segment` to `prefix`, eliding the root's trailing slash.
pub fn join(prefix: &str, segment: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let mut path = String::with_capacity(prefix.len() + segment.len() + 1);
    path.push_str(prefix);
    path.push('/');
    path.push_str(segment);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(path: &str) -> Vec<&str> {
        segments(path).collect()
    }

    #[test]
    fn test_root_has_no_segments() {
        assert!(collect("/").is_empty());
        assert!(collect("").is_empty());
        assert!(collect("///").is_empty());
    }

    #[test]
    fn test_segments_in_order() {
        assert_eq!(collect("/pets/{petId}/photos"), vec!["pets", "{petId}", "photos"]);
    }

    #[test]
    fn test_redundant_slashes_collapse() {
        assert_eq!(collect("//pets///{petId}/"), vec!["pets", "{petId}"]);
        assert_eq!(collect("pets"), vec!["pets"]);
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/", "pets"), "/pets");
        assert_eq!(join("", "pets"), "/pets");
        assert_eq!(join("/pets", "{petId}"), "/pets/{petId}");
    }
}
