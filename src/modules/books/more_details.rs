use serde_json::Value;

/// Image sizes to try for the cover, largest first.
const THUMBNAIL_SIZES: [&str; 5] = [
    "extraLarge",
    "large",
    "medium",
    "thumbnail",
    "smallThumbnail",
];

/// Third-party volume search result for a book. Any part of the payload may be
/// missing, so every accessor returns `Option`.
#[derive(Debug, Clone, PartialEq)]
pub struct MoreDetails(Value);

impl MoreDetails {
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    fn first_hit(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(&format!("/items/0{pointer}"))
    }

    fn volume_str(&self, field: &str) -> Option<&str> {
        self.first_hit(&format!("/volumeInfo/{field}"))
            .and_then(Value::as_str)
    }

    fn volume_list(&self, field: &str) -> Option<String> {
        let values = self
            .first_hit(&format!("/volumeInfo/{field}"))?
            .as_array()?
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>();
        Some(values.join(", "))
    }

    pub fn title(&self) -> Option<&str> {
        self.volume_str("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.volume_str("description")
    }

    /// Authors joined with `", "`.
    pub fn authors(&self) -> Option<String> {
        self.volume_list("authors")
    }

    /// Categories joined with `", "`.
    pub fn categories(&self) -> Option<String> {
        self.volume_list("categories")
    }

    /// Largest available cover image.
    pub fn thumbnail(&self) -> Option<&str> {
        let links = self.first_hit("/volumeInfo/imageLinks")?;
        THUMBNAIL_SIZES
            .iter()
            .find_map(|size| links.get(*size).and_then(Value::as_str))
            .filter(|url| !url.is_empty())
    }

    pub fn info_link(&self) -> Option<&str> {
        self.volume_str("infoLink")
    }

    pub fn buy_link(&self) -> Option<&str> {
        self.first_hit("/saleInfo/buyLink").and_then(Value::as_str)
    }
}
