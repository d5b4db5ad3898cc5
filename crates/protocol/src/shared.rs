use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::element::Element;

/// A reference-counted, immutable string.
///
/// Step messages are cloned into every snapshot that repeats them, so
/// `.clone()` must be a refcount bump rather than a heap allocation.
#[derive(Debug, Clone, Eq)]
pub struct SharedStr(Arc<str>);

impl SharedStr {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for SharedStr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl PartialEq<&str> for SharedStr {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl std::ops::Deref for SharedStr {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SharedStr {
    #[inline]
    fn from(s: &str) -> Self {
        SharedStr(Arc::from(s))
    }
}

impl From<String> for SharedStr {
    #[inline]
    fn from(s: String) -> Self {
        SharedStr(Arc::from(s.as_str()))
    }
}

impl std::fmt::Display for SharedStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// An immutable ordering of elements shared between consecutive steps.
///
/// Steps that only change highlight states point at the same arrangement;
/// a new one is allocated only when the algorithm moves an element.
#[derive(Debug, Clone, Default)]
pub struct Arrangement(Arc<[Element]>);

impl Arrangement {
    #[inline]
    pub fn as_slice(&self) -> &[Element] {
        &self.0
    }

    /// Whether two arrangements are the same allocation (not merely equal).
    #[inline]
    pub fn shares_with(&self, other: &Arrangement) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Element values in order.
    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().map(|e| e.value)
    }
}

impl PartialEq for Arrangement {
    fn eq(&self, other: &Self) -> bool {
        self.shares_with(other) || *self.0 == *other.0
    }
}

impl Eq for Arrangement {}

impl std::ops::Deref for Arrangement {
    type Target = [Element];

    #[inline]
    fn deref(&self) -> &[Element] {
        &self.0
    }
}

impl From<Vec<Element>> for Arrangement {
    #[inline]
    fn from(elements: Vec<Element>) -> Self {
        Arrangement(Arc::from(elements))
    }
}

impl From<&[Element]> for Arrangement {
    #[inline]
    fn from(elements: &[Element]) -> Self {
        Arrangement(Arc::from(elements))
    }
}

// --- Serde (hand-rolled to avoid the `rc` feature flag) ---

impl Serialize for SharedStr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SharedStr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SharedStr::from(s))
    }
}

impl Serialize for Arrangement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Arrangement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let elements = Vec::<Element>::deserialize(deserializer)?;
        Ok(Arrangement::from(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementId;

    fn elements(values: &[i32]) -> Vec<Element> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Element::new(ElementId(i as u32), v))
            .collect()
    }

    #[test]
    fn clone_shares_allocation() {
        let a = Arrangement::from(elements(&[3, 1, 2]));
        let b = a.clone();
        assert!(a.shares_with(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn equal_contents_from_different_allocations() {
        let a = Arrangement::from(elements(&[3, 1, 2]));
        let b = Arrangement::from(elements(&[3, 1, 2]));
        assert!(!a.shares_with(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn values_in_order() {
        let a = Arrangement::from(elements(&[9, 4, 7]));
        assert_eq!(a.values().collect::<Vec<_>>(), vec![9, 4, 7]);
    }

    #[test]
    fn message_eq_str() {
        let s = SharedStr::from(format!("Comparing {} and {}", 4, 2));
        assert_eq!(s, "Comparing 4 and 2");
        assert_eq!(format!("{s}"), "Comparing 4 and 2");
    }

    #[test]
    fn serde_roundtrip() {
        let a = Arrangement::from(elements(&[5, 6]));
        let json = serde_json::to_string(&a).unwrap_or_default();
        assert_eq!(json, r#"[{"id":0,"value":5},{"id":1,"value":6}]"#);
        let back: Arrangement =
            serde_json::from_str(&json).unwrap_or_else(|_| Arrangement::default());
        assert_eq!(back, a);

        let s = SharedStr::from("swap");
        let json = serde_json::to_string(&s).unwrap_or_default();
        assert_eq!(json, "\"swap\"");
    }
}
