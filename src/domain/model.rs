use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Stable identifier of a service, kept in canonical string form.
///
/// Catalogs carry ids as JSON numbers or numeric strings; both decode to the
/// same canonical text so `42` and `"42"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn new(raw: impl fmt::Display) -> Self {
        Self(raw.to_string().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::new(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Self::new(u))
                } else {
                    // f64 的 Display 對整數值不帶小數點 (5.0 -> "5")
                    n.as_f64().filter(|f| f.is_finite()).map(Self::new)
                }
            }
            Value::String(s) if !s.trim().is_empty() => Some(Self::new(s)),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ServiceId {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ServiceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Serialize for ServiceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0.parse::<u64>() {
            Ok(n) if n.to_string() == self.0 => serializer.serialize_u64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for ServiceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid service id: {}", value)))
    }
}

/// Price as advertised. Kept verbatim for display, coerced for sorting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Price {
    Number(serde_json::Number),
    Text(String),
}

impl Price {
    /// Numeric value used for ordering; anything non-numeric counts as `0`.
    pub fn amount(&self) -> f64 {
        let amount = match self {
            Price::Number(n) => n.as_f64().unwrap_or(0.0),
            Price::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        };
        if amount.is_finite() {
            amount
        } else {
            0.0
        }
    }

    pub fn is_negative(&self) -> bool {
        self.amount() < 0.0
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::Number(0.into())
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Price::Number(value.into())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Number(n) => write!(f, "{}", n),
            Price::Text(s) => f.write_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => Price::Number(n),
            Value::String(s) => Price::Text(s),
            Value::Null => Price::default(),
            _ => Price::Text(String::new()),
        })
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_text).unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(value_to_text)
        .filter(|s| !s.trim().is_empty()))
}

/// One advertised campus service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: ServiceId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub university: String,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub hostel: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
}

impl ServiceRecord {
    pub fn from_new(id: ServiceId, new: NewService) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            price: new.price,
            category: new.category,
            university: new.university,
            hostel: new.hostel,
            contact: new.contact,
            image: new.image,
            created_at: new.created_at,
        }
    }

    /// Creation time in epoch milliseconds; missing or unparseable is `0`.
    pub fn created_at_millis(&self) -> i64 {
        match &self.created_at {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => parse_timestamp_millis(s).unwrap_or(0),
            _ => 0,
        }
    }
}

/// ISO-8601 (with or without offset, date-only) or epoch milliseconds.
/// Values without an offset are read as UTC.
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    // seconds are optional in ISO-8601
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%#z") {
        return Some(dt.timestamp_millis());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc().timestamp_millis());
    }
    raw.parse::<i64>().ok()
}

/// Body of `POST /services`: a record without its id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub university: String,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub hostel: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
}

impl Validate for NewService {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("title", &self.title).map_err(|_| CatalogError::ValidationError {
            message: "Service title cannot be empty".to_string(),
        })?;
        if self.price.is_negative() {
            return Err(CatalogError::ValidationError {
                message: format!("Service price cannot be negative: {}", self.price),
            });
        }
        Ok(())
    }
}

/// Decode a catalog snapshot. Items that are not objects or lack a usable id
/// are skipped with a warning; malformed optional fields fall back to defaults.
pub fn decode_catalog(json: Value) -> Result<Vec<ServiceRecord>> {
    let Value::Array(items) = json else {
        return Err(CatalogError::SerializationError(serde::de::Error::custom(
            "expected a JSON array of services",
        )));
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            tracing::warn!("Skipping catalog entry #{}: not an object", index);
            continue;
        }
        match serde_json::from_value::<ServiceRecord>(item) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("Skipping catalog entry #{}: {}", index, e),
        }
    }
    Ok(records)
}

/// Catalog ordering requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Relevance,
    PriceLowHigh,
    PriceHighLow,
    Alpha,
    Newest,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::PriceLowHigh => "price-low-high",
            SortMode::PriceHighLow => "price-high-low",
            SortMode::Alpha => "alpha",
            SortMode::Newest => "newest",
        }
    }

    /// Unknown values mean "no reordering"; `price` is the legacy name of
    /// `price-low-high`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim() {
            "price-low-high" | "price" => SortMode::PriceLowHigh,
            "price-high-low" => SortMode::PriceHighLow,
            "alpha" => SortMode::Alpha,
            "newest" => SortMode::Newest,
            _ => SortMode::Relevance,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SortMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

const ANY: &str = "all";

/// Filter, search and sort request for one catalog query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortMode>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_university(mut self, university: impl Into<String>) -> Self {
        self.university = Some(university.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Parse `category=..&university=..&search=..&sort=..`.
    pub fn from_query_string(query: &str) -> Self {
        let mut spec = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "category" => spec.category = Some(value.into_owned()),
                "university" => spec.university = Some(value.into_owned()),
                "search" => spec.search = Some(value.into_owned()),
                "sort" => spec.sort = Some(SortMode::parse_lenient(&value)),
                _ => {}
            }
        }
        spec
    }

    pub fn category_constraint(&self) -> Option<&str> {
        constraint(&self.category)
    }

    pub fn university_constraint(&self) -> Option<&str> {
        constraint(&self.university)
    }

    /// Search term, or `None` when empty or whitespace-only.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort.unwrap_or_default()
    }

    /// Non-empty constraints as query parameters.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category_constraint() {
            pairs.push(("category", category.to_string()));
        }
        if let Some(university) = self.university_constraint() {
            pairs.push(("university", university.to_string()));
        }
        if let Some(search) = self.search_term() {
            pairs.push(("search", search.to_string()));
        }
        if let Some(sort) = self.sort.filter(|s| *s != SortMode::Relevance) {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        pairs
    }
}

fn constraint(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty() && *v != ANY)
}

/// Display theme persisted next to the favorites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_and_string_ids_are_equal() {
        let a: ServiceId = serde_json::from_value(json!(42)).unwrap();
        let b: ServiceId = serde_json::from_value(json!("42")).unwrap();
        let c: ServiceId = serde_json::from_value(json!(42.0)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(serde_json::to_value(&a).unwrap(), json!(42));
        assert_eq!(serde_json::to_value(ServiceId::new("007")).unwrap(), json!("007"));
    }

    #[test]
    fn test_record_decodes_leniently() {
        let record: ServiceRecord = serde_json::from_value(json!({
            "id": "7",
            "title": "Laundry",
            "price": "abc",
            "category": 12,
            "hostel": "",
            "createdAt": "not a date"
        }))
        .unwrap();

        assert_eq!(record.id.as_str(), "7");
        assert_eq!(record.description, "");
        assert_eq!(record.category, "12");
        assert_eq!(record.hostel, None);
        assert_eq!(record.price.amount(), 0.0);
        assert_eq!(record.created_at_millis(), 0);
    }

    #[test]
    fn test_price_amount_coercion() {
        assert_eq!(Price::Text("30".to_string()).amount(), 30.0);
        assert_eq!(Price::Text(" 12.5 ".to_string()).amount(), 12.5);
        assert_eq!(Price::Text("free".to_string()).amount(), 0.0);
        assert_eq!(Price::from(50).amount(), 50.0);
        assert_eq!(Price::from(50).to_string(), "50");
    }

    #[test]
    fn test_created_at_formats() {
        assert_eq!(parse_timestamp_millis("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_timestamp_millis("1970-01-01T00:00:01Z"), Some(1_000));
        assert_eq!(parse_timestamp_millis("1970-01-01T00:00:02"), Some(2_000));
        assert_eq!(parse_timestamp_millis("1970-01-01T00:01Z"), Some(60_000));
        assert_eq!(parse_timestamp_millis("1970-01-01T01:01+01:00"), Some(60_000));
        assert_eq!(parse_timestamp_millis("1970-01-01T00:02"), Some(120_000));
        assert_eq!(parse_timestamp_millis("1500"), Some(1_500));
        assert_eq!(parse_timestamp_millis("yesterday"), None);

        let record: ServiceRecord =
            serde_json::from_value(json!({"id": 1, "title": "x", "createdAt": 1234})).unwrap();
        assert_eq!(record.created_at_millis(), 1234);
    }

    #[test]
    fn test_decode_catalog_skips_bad_entries() {
        let records = decode_catalog(json!([
            {"id": 1, "title": "Room Cleaning"},
            "garbage",
            {"title": "No id"},
            {"id": 2, "title": "Tutoring"}
        ]))
        .unwrap();
        assert_eq!(records.len(), 2);
        assert!(decode_catalog(json!({"id": 1})).is_err());
    }

    #[test]
    fn test_sort_mode_parsing() {
        assert_eq!(SortMode::parse_lenient("price"), SortMode::PriceLowHigh);
        assert_eq!(SortMode::parse_lenient("price-high-low"), SortMode::PriceHighLow);
        assert_eq!(SortMode::parse_lenient("whatever"), SortMode::Relevance);
    }

    #[test]
    fn test_filter_spec_constraints() {
        let spec = FilterSpec::from_query_string("?category=all&university=UG&search=%20%20&sort=alpha");
        assert_eq!(spec.category_constraint(), None);
        assert_eq!(spec.university_constraint(), Some("UG"));
        assert_eq!(spec.search_term(), None);
        assert_eq!(spec.sort_mode(), SortMode::Alpha);
        assert_eq!(
            spec.to_query_pairs(),
            vec![("university", "UG".to_string()), ("sort", "alpha".to_string())]
        );
    }

    #[test]
    fn test_new_service_validation() {
        let mut new = NewService {
            title: "Printing".to_string(),
            price: Price::from(5),
            ..Default::default()
        };
        assert!(new.validate().is_ok());

        new.price = Price::Text("-3".to_string());
        assert!(new.validate().is_err());

        new.price = Price::from(5);
        new.title = "   ".to_string();
        assert!(new.validate().is_err());
    }
}
