use std::fmt;

/// A `DotPath` addresses a value nested inside a JSON document.
///
/// The path string is split on `.` and each piece becomes one segment, looked up as an
/// object key or an array index depending on the container it is applied to. Segments
/// are kept exactly as written: `"a..b"` has the three segments `a`, `` and `b`, and the
/// empty string is a path with one empty segment.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct DotPath {
    segments: Vec<String>,
}

impl DotPath {
    pub fn parse(path: &str) -> Self {
        DotPath {
            segments: path.split('.').map(str::to_owned).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.segments.iter()
    }

    /// The first `len` segments as a new path.
    pub fn prefix(&self, len: usize) -> DotPath {
        DotPath {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }

    /// Splits off the final segment.
    pub fn split_last(&self) -> Option<(&String, &[String])> {
        self.segments.split_last()
    }
}

impl fmt::Display for DotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_dots() {
        let path = DotPath::parse("a.b.c");
        assert_eq!(path.segments, vec!["a", "b", "c"]);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn empty_segments_are_preserved() {
        assert_eq!(DotPath::parse("a..b").segments, vec!["a", "", "b"]);
        assert_eq!(DotPath::parse("").segments, vec![""]);
        assert_eq!(DotPath::parse(".a.").segments, vec!["", "a", ""]);
    }

    #[test]
    fn segments_are_not_trimmed() {
        assert_eq!(DotPath::parse(" a . b").segments, vec![" a ", " b"]);
    }

    #[test]
    fn display_round_trips() {
        for s in ["a", "a.b.c", "a..b", "", "0.1.x"] {
            assert_eq!(format!("{}", DotPath::parse(s)), s);
        }
    }

    #[test]
    fn prefix_and_split_last() {
        let path = DotPath::parse("a.b.c");
        assert_eq!(format!("{}", path.prefix(2)), "a.b");
        assert_eq!(path.prefix(10), path);

        let (last, rest) = path.split_last().unwrap();
        assert_eq!(last, "c");
        assert_eq!(rest, &["a".to_string(), "b".to_string()]);
    }
}
