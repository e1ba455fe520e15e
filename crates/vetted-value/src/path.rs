use core::fmt::{self, Display};

use thisisplural::Plural;

/// Address of a slot inside a container: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name(String),
    Index(usize),
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Name(name) => write!(f, "{name}"),
            FieldKey::Index(index) => write!(f, "[{index}]"),
        }
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        FieldKey::Name(name.to_string())
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        FieldKey::Name(name)
    }
}

impl From<usize> for FieldKey {
    fn from(index: usize) -> Self {
        FieldKey::Index(index)
    }
}

/// Dotted/indexed address of a value, e.g. `users[0].name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Plural)]
pub struct FieldPath(pub Vec<FieldKey>);

impl FieldPath {
    /// The empty path, addressing the validated value itself.
    pub fn root() -> Self {
        FieldPath(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_segments(segments: &[FieldKey]) -> Self {
        FieldPath(segments.to_vec())
    }

    /// Last segment, if any.
    pub fn leaf(&self) -> Option<&FieldKey> {
        self.0.last()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                FieldKey::Name(name) => {
                    if i != 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                FieldKey::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_root() {
        assert_eq!(FieldPath::root().to_string(), "(root)");
    }

    #[test]
    fn test_display_nested_names() {
        let path = FieldPath(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(path.to_string(), "a.b.c");
    }

    #[test]
    fn test_display_indexes() {
        let path = FieldPath(vec!["items".into(), 0.into(), "name".into()]);
        assert_eq!(path.to_string(), "items[0].name");

        let path = FieldPath(vec![2.into(), 1.into()]);
        assert_eq!(path.to_string(), "[2][1]");
    }

    #[test]
    fn test_leaf() {
        let path = FieldPath(vec!["a".into(), 3.into()]);
        assert_eq!(path.leaf(), Some(&FieldKey::Index(3)));
        assert_eq!(FieldPath::root().leaf(), None);
    }
}
