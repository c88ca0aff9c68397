/// One step into a JSON value (an object key or a list index), or into a
/// selection tree (a type branch or a fragment spread).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PathSegment {
    /// A named fragment spread; renders as `(...Name)`.
    FragmentSpread(String),
    Index(usize),
    Key(String),
    /// An inline `... on Type` branch; renders as `(... on Type)`.
    TypeCondition(String),
}

/// Location of a value inside a variables object or a response, used to
/// point errors at the offending value.
///
/// Renders as `root.key[2].other`. Variable paths are rooted at `$`, so a
/// bad list item of variable `ids` renders as `$ids[2]`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}
impl ValuePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub(crate) fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    pub(crate) fn push_fragment_spread(&mut self, fragment_name: impl Into<String>) {
        self.segments.push(PathSegment::FragmentSpread(fragment_name.into()));
    }

    pub(crate) fn push_type_condition(&mut self, type_name: impl Into<String>) {
        self.segments.push(PathSegment::TypeCondition(type_name.into()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }

    pub(crate) fn with_key(&self, key: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push_key(key);
        path
    }
}
impl std::fmt::Display for ValuePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        let mut needs_dot = false;
        for segment in &self.segments {
            match segment {
                PathSegment::FragmentSpread(name) => write!(f, "(...{name})")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::TypeCondition(type_name) => write!(f, "(... on {type_name})")?,
                PathSegment::Key(key) if needs_dot => write!(f, ".{key}")?,
                PathSegment::Key(key) => f.write_str(key)?,
            }
            needs_dot = !matches!(segment, PathSegment::Key(key) if key == "$");
        }
        Ok(())
    }
}
