//! Identity of the things a hierarchy is built from.

use std::fmt;

/// Anything exposing a unique, stable string identifier.
///
/// Structural queries compare identifiers only: two values with the same
/// index are the same node, whatever else they carry.
pub trait Indexed {
    fn index(&self) -> &str;
}

impl Indexed for str {
    fn index(&self) -> &str {
        self
    }
}

impl Indexed for String {
    fn index(&self) -> &str {
        self.as_str()
    }
}

impl<T: Indexed + ?Sized> Indexed for &T {
    fn index(&self) -> &str {
        (**self).index()
    }
}

/// Node as stored inside a [`crate::domain::HierarchyIndex`].
///
/// Roots are synthesized from parent identifiers and carry no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode<T> {
    index: String,
    value: Option<T>,
    decorated: bool,
}

impl<T> HierarchyNode<T> {
    pub(crate) fn root(index: String) -> Self {
        Self {
            index,
            value: None,
            decorated: true,
        }
    }

    /// Payload supplied by the caller, `None` for synthetic roots.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Roots are decorated when rendered.
    pub fn is_decorated(&self) -> bool {
        self.decorated
    }

    pub fn is_root(&self) -> bool {
        self.value.is_none()
    }
}

impl<T: Indexed> HierarchyNode<T> {
    pub(crate) fn child(value: T) -> Self {
        Self {
            index: value.index().to_string(),
            value: Some(value),
            decorated: false,
        }
    }
}

impl<T> Indexed for HierarchyNode<T> {
    fn index(&self) -> &str {
        &self.index
    }
}

impl<T> fmt::Display for HierarchyNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}
