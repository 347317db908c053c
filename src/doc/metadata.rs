use std::collections::BTreeMap;

/// Multi-valued metadata with case-insensitive keys
///
/// Keys are stored lowercased, so `Content-Type` and `content-type` address
/// the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    fields: BTreeMap<String, Vec<String>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to `key`
    pub fn add(&mut self, key: &str, value: impl Into<String>) {
        self.fields
            .entry(normalize_key(key))
            .or_default()
            .push(value.into());
    }

    /// Replaces all values of `key` with a single value
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(normalize_key(key), vec![value.into()]);
    }

    /// Returns the first value of `key`
    pub fn get_first(&self, key: &str) -> Option<&str> {
        self.fields
            .get(&normalize_key(key))
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns every value of `key`, empty if absent
    pub fn get_all(&self, key: &str) -> &[String] {
        self.fields
            .get(&normalize_key(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Removes `key`, returning its values
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.fields.remove(&normalize_key(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(&normalize_key(key))
    }

    /// Copies every value of `other` into this metadata
    pub fn extend(&mut self, other: &Metadata) {
        for (key, values) in other.iter() {
            for value in values {
                self.add(key, value.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut metadata = Metadata::new();
        metadata.add("Content-Type", "text/html");

        assert_eq!(metadata.get_first("content-type"), Some("text/html"));
        assert!(metadata.contains_key("CONTENT-TYPE"));
    }

    #[test]
    fn test_add_keeps_all_values() {
        let mut metadata = Metadata::new();
        metadata.add("Set-Cookie", "a=1");
        metadata.add("set-cookie", "b=2");

        assert_eq!(metadata.get_all("Set-Cookie"), ["a=1", "b=2"]);
        assert_eq!(metadata.len(), 1);
    }

    #[test]
    fn test_set_replaces_values() {
        let mut metadata = Metadata::new();
        metadata.add("x-tag", "one");
        metadata.add("x-tag", "two");
        metadata.set("X-Tag", "three");

        assert_eq!(metadata.get_all("x-tag"), ["three"]);
    }

    #[test]
    fn test_remove_and_missing_key() {
        let mut metadata = Metadata::new();
        metadata.add("etag", "abc");

        assert_eq!(metadata.remove("ETag"), Some(vec!["abc".to_string()]));
        assert!(metadata.is_empty());
        assert!(metadata.get_all("etag").is_empty());
        assert_eq!(metadata.get_first("etag"), None);
    }

    #[test]
    fn test_extend_appends() {
        let mut target = Metadata::new();
        target.add("a", "1");
        let mut other = Metadata::new();
        other.add("a", "2");
        other.add("b", "3");

        target.extend(&other);

        assert_eq!(target.get_all("a"), ["1", "2"]);
        assert_eq!(target.get_first("b"), Some("3"));
    }
}
