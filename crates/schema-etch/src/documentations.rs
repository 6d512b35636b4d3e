//! The collected key to text mapping
//!
//! [`Documentations`] keeps entries in the order they were recorded, so a
//! run over an unchanged graph always produces the same document.

use crate::key::DocKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from documentation key to text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Documentations {
    entries: IndexMap<DocKey, String>,
}

impl Documentations {
    /// An empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_entries(entries: IndexMap<DocKey, String>) -> Self {
        Self { entries }
    }

    /// Text recorded for a key
    pub fn get(&self, key: &DocKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Text recorded for a rendered key, as the merge step looks it up
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Check whether a rendered key is present
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in recording order
    pub fn iter(&self) -> impl Iterator<Item = (&DocKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Keys in recording order
    pub fn keys(&self) -> impl Iterator<Item = &DocKey> {
        self.entries.keys()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as a JSON object
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize as a property-list XML document, the form handed to the
    /// merge step
    pub fn to_properties_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
        xml.push_str("<!DOCTYPE properties SYSTEM \"http://java.sun.com/dtd/properties.dtd\">\n");
        xml.push_str("<properties>\n");
        for (key, text) in &self.entries {
            xml.push_str("<entry key=\"");
            xml.push_str(&html_escape::encode_double_quoted_attribute(key.as_str()));
            xml.push_str("\">");
            xml.push_str(&html_escape::encode_text(text));
            xml.push_str("</entry>\n");
        }
        xml.push_str("</properties>\n");
        xml
    }
}

impl FromIterator<(DocKey, String)> for Documentations {
    fn from_iter<I: IntoIterator<Item = (DocKey, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Documentations {
    type Item = (&'a DocKey, &'a String);
    type IntoIter = indexmap::map::Iter<'a, DocKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyCategory;
    use pretty_assertions::assert_eq;

    fn sample() -> Documentations {
        let a = DocKey::for_type("NS", "a").unwrap();
        let attr = a.member(KeyCategory::Attribute, "attr").unwrap();
        vec![
            (a, "some docu about a".to_string()),
            (attr, "uses <b> & \"quotes\"".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lookup() {
        let docs = sample();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs.lookup("{NS}a"), Some("some docu about a"));
        assert_eq!(
            docs.get(&DocKey::parse("{NS}a").unwrap()),
            Some("some docu about a")
        );
        assert_eq!(docs.lookup("{NS}b"), None);
    }

    #[test]
    fn test_json_is_an_ordered_object() {
        let json = sample().to_json().unwrap();
        insta::assert_snapshot!(json, @r###"
        {
          "{NS}a": "some docu about a",
          "{NS}a|ATTRIBUTE|attr": "uses <b> & \"quotes\""
        }
        "###);

        let back: Documentations = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_properties_xml() {
        insta::assert_snapshot!(sample().to_properties_xml(), @r###"
        <?xml version="1.0" encoding="UTF-8" standalone="no"?>
        <!DOCTYPE properties SYSTEM "http://java.sun.com/dtd/properties.dtd">
        <properties>
        <entry key="{NS}a">some docu about a</entry>
        <entry key="{NS}a|ATTRIBUTE|attr">uses &lt;b&gt; &amp; "quotes"</entry>
        </properties>
        "###);
    }
}
