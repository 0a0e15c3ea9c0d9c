//! Locations inside a roll payload, for error reporting.

use std::fmt;

/// One step from a payload to a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// An object field.
    Field(String),
    /// A list position.
    Index(usize),
    /// A key of a map-valued field.
    Key(String),
}

/// Path from the root of a payload, rendered like `$.rolls[0].roll`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RollPath(Vec<PathSegment>);

impl RollPath {
    /// The payload root.
    pub fn root() -> Self {
        Self::default()
    }

    /// This path extended by an object field.
    pub fn field(&self, name: &str) -> Self {
        self.with(PathSegment::Field(name.to_string()))
    }

    /// This path extended by a list position.
    pub fn index(&self, i: usize) -> Self {
        self.with(PathSegment::Index(i))
    }

    /// This path extended by a map key.
    pub fn key(&self, key: &str) -> Self {
        self.with(PathSegment::Key(key.to_string()))
    }

    /// The steps of the path.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    fn with(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }
}

impl fmt::Display for RollPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(i) => write!(f, "[{i}]")?,
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_path() {
        let path = RollPath::root()
            .field("rolls")
            .index(2)
            .field("templateRolls")
            .key("place")
            .field("roll");
        assert_eq!(path.to_string(), r#"$.rolls[2].templateRolls["place"].roll"#);
        assert_eq!(path.segments().len(), 5);
    }

    #[test]
    fn root_renders_as_dollar() {
        assert_eq!(RollPath::root().to_string(), "$");
    }
}
