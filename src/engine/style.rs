//! Area style commands
//!
//! A command names one area and, per property, either leaves it alone,
//! resets it to the default, or sets a value. In JSON an absent key means
//! "leave alone" and `null` means "reset", so the two must not collapse.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tri-state value of one property in an [`AreaStyle`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StyleValue {
    /// Key absent: the property is not touched
    #[default]
    Unchanged,
    /// Key present with `null` (or an empty string): back to the default
    Reset,
    Set(String),
}

impl StyleValue {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, StyleValue::Unchanged)
    }

    /// Value to write, or `None` when the property stays untouched
    ///
    /// An empty `Set` falls back to `default` like `Reset`.
    pub fn resolve<'a>(&'a self, default: &'a str) -> Option<&'a str> {
        match self {
            StyleValue::Unchanged => None,
            StyleValue::Reset => Some(default),
            StyleValue::Set(value) if value.is_empty() => Some(default),
            StyleValue::Set(value) => Some(value.as_str()),
        }
    }
}

impl From<Option<String>> for StyleValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => StyleValue::Set(v),
            _ => StyleValue::Reset,
        }
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StyleValue::Set(value) => serializer.serialize_str(value),
            StyleValue::Unchanged | StyleValue::Reset => serializer.serialize_none(),
        }
    }
}

// Only called when the key is present; absence is handled by `#[serde(default)]`.
impl<'de> Deserialize<'de> for StyleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(StyleValue::from)
    }
}

/// Directive to restyle every element of one area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaStyle {
    pub area_id: String,
    #[serde(default, skip_serializing_if = "StyleValue::is_unchanged")]
    pub fill: StyleValue,
    #[serde(default, skip_serializing_if = "StyleValue::is_unchanged")]
    pub filter: StyleValue,
}

impl AreaStyle {
    /// Command that changes nothing yet
    pub fn new(area_id: impl Into<String>) -> Self {
        AreaStyle {
            area_id: area_id.into(),
            fill: StyleValue::Unchanged,
            filter: StyleValue::Unchanged,
        }
    }

    pub fn fill(mut self, value: impl Into<String>) -> Self {
        self.fill = StyleValue::from(Some(value.into()));
        self
    }

    pub fn reset_fill(mut self) -> Self {
        self.fill = StyleValue::Reset;
        self
    }

    pub fn filter(mut self, value: impl Into<String>) -> Self {
        self.filter = StyleValue::from(Some(value.into()));
        self
    }

    pub fn reset_filter(mut self) -> Self {
        self.filter = StyleValue::Reset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_null_and_value_stay_distinct() {
        let style: AreaStyle = serde_json::from_str(r##"{"areaId":"A12","fill":"#F00"}"##).unwrap();
        assert_eq!(style.fill, StyleValue::Set("#F00".into()));
        assert_eq!(style.filter, StyleValue::Unchanged);

        let style: AreaStyle = serde_json::from_str(r#"{"areaId":"A12","filter":null}"#).unwrap();
        assert_eq!(style.fill, StyleValue::Unchanged);
        assert_eq!(style.filter, StyleValue::Reset);

        let style: AreaStyle = serde_json::from_str(r#"{"areaId":"A12","fill":""}"#).unwrap();
        assert_eq!(style.fill, StyleValue::Reset);
    }

    #[test]
    fn test_serialize_round_trips_tri_state() {
        let style = AreaStyle::new("B7").reset_fill().filter("blur(2px)");
        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(json, r#"{"areaId":"B7","fill":null,"filter":"blur(2px)"}"#);

        let json = serde_json::to_string(&AreaStyle::new("B7")).unwrap();
        assert_eq!(json, r#"{"areaId":"B7"}"#);
    }

    #[test]
    fn test_resolve() {
        assert_eq!(StyleValue::Unchanged.resolve("#FFFFFF"), None);
        assert_eq!(StyleValue::Reset.resolve("#FFFFFF"), Some("#FFFFFF"));
        assert_eq!(StyleValue::Set("#ABC".into()).resolve("#FFFFFF"), Some("#ABC"));
        assert_eq!(StyleValue::Set(String::new()).resolve(""), Some(""));
    }
}
