//! Event vocabulary and parameter model
//!
//! Event names follow the standard TikTok Business vocabulary but arbitrary
//! custom strings stay valid everywhere, so operations accept plain strings
//! and [`EventName`] is advisory.
//!
//! Event parameters are an open mapping from string keys to a closed set of
//! value shapes (string, number, boolean, array of records) instead of
//! untyped dynamic values. This keeps serialization to the vendor boundary
//! deterministic: every [`EventValue`] has exactly one JSON form.

use std::collections::HashMap;

use serde::ser::{Serialize, Serializer};

use crate::error::Result;

/// Standard event names accepted by the vendor SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventName {
    Launch,
    AppInstall,
    Search,
    ViewContent,
    Click,
    AddToWishlist,
    AddToCart,
    InitiateCheckout,
    AddPaymentInfo,
    CompletePayment,
    PlaceAnOrder,
    Subscribe,
    Contact,
    Custom,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::Launch => "Launch",
            EventName::AppInstall => "AppInstall",
            EventName::Search => "Search",
            EventName::ViewContent => "ViewContent",
            EventName::Click => "Click",
            EventName::AddToWishlist => "AddToWishlist",
            EventName::AddToCart => "AddToCart",
            EventName::InitiateCheckout => "InitiateCheckout",
            EventName::AddPaymentInfo => "AddPaymentInfo",
            EventName::CompletePayment => "CompletePayment",
            EventName::PlaceAnOrder => "PlaceAnOrder",
            EventName::Subscribe => "Subscribe",
            EventName::Contact => "Contact",
            EventName::Custom => "Custom",
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive value inside a line-item record.
#[derive(uniffi::Enum, Debug, Clone, PartialEq)]
pub enum EventScalar {
    Text(String),
    Number(f64),
    Boolean(bool),
}

/// A single event parameter value.
///
/// `Records` carries checkout line items (the `contents` array of purchase
/// events); the other variants cover everything else the vendor SDK accepts.
#[derive(uniffi::Enum, Debug, Clone, PartialEq)]
pub enum EventValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    Records(Vec<HashMap<String, EventScalar>>),
}

/// Open parameter mapping attached to a tracked event.
pub type EventParams = HashMap<String, EventValue>;

impl Serialize for EventScalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            EventScalar::Text(value) => serializer.serialize_str(value),
            EventScalar::Number(value) => serializer.serialize_f64(*value),
            EventScalar::Boolean(value) => serializer.serialize_bool(*value),
        }
    }
}

impl Serialize for EventValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            EventValue::Text(value) => serializer.serialize_str(value),
            EventValue::Number(value) => serializer.serialize_f64(*value),
            EventValue::Boolean(value) => serializer.serialize_bool(*value),
            EventValue::Records(records) => records.serialize(serializer),
        }
    }
}

impl From<&str> for EventValue {
    fn from(value: &str) -> Self {
        EventValue::Text(value.to_string())
    }
}

impl From<String> for EventValue {
    fn from(value: String) -> Self {
        EventValue::Text(value)
    }
}

impl From<f64> for EventValue {
    fn from(value: f64) -> Self {
        EventValue::Number(value)
    }
}

impl From<bool> for EventValue {
    fn from(value: bool) -> Self {
        EventValue::Boolean(value)
    }
}

/// One checkout line item, used by the purchase convenience wrapper.
#[derive(uniffi::Record, Debug, Clone, PartialEq)]
pub struct PurchaseContent {
    pub content_id: String,
    pub content_type: Option<String>,
    pub content_name: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<f64>,
}

impl PurchaseContent {
    /// Convert into one record of the `Records` parameter variant, omitting
    /// fields the caller did not set.
    pub fn into_record(self) -> HashMap<String, EventScalar> {
        let mut record = HashMap::new();
        record.insert("content_id".to_string(), EventScalar::Text(self.content_id));
        if let Some(content_type) = self.content_type {
            record.insert("content_type".to_string(), EventScalar::Text(content_type));
        }
        if let Some(content_name) = self.content_name {
            record.insert("content_name".to_string(), EventScalar::Text(content_name));
        }
        if let Some(quantity) = self.quantity {
            record.insert(
                "quantity".to_string(),
                EventScalar::Number(f64::from(quantity)),
            );
        }
        if let Some(price) = self.price {
            record.insert("price".to_string(), EventScalar::Number(price));
        }
        record
    }
}

/// Serialize a parameter map to the JSON the vendor boundary expects.
pub fn params_to_json(params: &EventParams) -> Result<String> {
    Ok(serde_json::to_string(params)?)
}

/// Merge canonical keys with caller-supplied extras, extras winning on
/// key collision.
fn merge(mut base: EventParams, additional: Option<EventParams>) -> EventParams {
    if let Some(additional) = additional {
        base.extend(additional);
    }
    base
}

/// Parameters for a `Search` event.
pub(crate) fn search_params(query: &str, additional: Option<EventParams>) -> EventParams {
    let mut params = EventParams::new();
    params.insert("search_string".to_string(), EventValue::from(query));
    merge(params, additional)
}

/// Parameters for a `ViewContent` event.
pub(crate) fn view_content_params(
    content_id: &str,
    content_type: Option<&str>,
    additional: Option<EventParams>,
) -> EventParams {
    let mut params = EventParams::new();
    params.insert("content_id".to_string(), EventValue::from(content_id));
    if let Some(content_type) = content_type {
        params.insert("content_type".to_string(), EventValue::from(content_type));
    }
    merge(params, additional)
}

/// Parameters for a `CompletePayment` event.
pub(crate) fn purchase_params(
    value: f64,
    currency: &str,
    contents: Option<Vec<PurchaseContent>>,
    additional: Option<EventParams>,
) -> EventParams {
    let mut params = EventParams::new();
    params.insert("value".to_string(), EventValue::Number(value));
    params.insert("currency".to_string(), EventValue::from(currency));
    if let Some(contents) = contents {
        let records = contents
            .into_iter()
            .map(PurchaseContent::into_record)
            .collect();
        params.insert("contents".to_string(), EventValue::Records(records));
    }
    merge(params, additional)
}

/// Parameters for the `ViewContent` event emitted by a route change.
///
/// Route params are JSON-encoded into a single `screen_params` string, the
/// shape the vendor SDK receives for screen views.
pub(crate) fn route_change_params(
    route_name: &str,
    params: Option<&EventParams>,
) -> Result<EventParams> {
    let mut event = EventParams::new();
    event.insert("screen_name".to_string(), EventValue::from(route_name));
    if let Some(params) = params {
        event.insert(
            "screen_params".to_string(),
            EventValue::Text(params_to_json(params)?),
        );
    }
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_match_vendor_vocabulary() {
        assert_eq!(EventName::Launch.as_str(), "Launch");
        assert_eq!(EventName::AddToWishlist.as_str(), "AddToWishlist");
        assert_eq!(EventName::PlaceAnOrder.as_str(), "PlaceAnOrder");
        assert_eq!(EventName::CompletePayment.to_string(), "CompletePayment");
    }

    #[test]
    fn search_params_set_search_string() {
        let params = search_params("shoes", None);
        assert_eq!(params.get("search_string"), Some(&EventValue::from("shoes")));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn caller_extras_win_on_collision() {
        let mut extras = EventParams::new();
        extras.insert("search_string".to_string(), EventValue::from("override"));
        extras.insert("category".to_string(), EventValue::from("electronics"));

        let params = search_params("shoes", Some(extras));
        assert_eq!(
            params.get("search_string"),
            Some(&EventValue::from("override"))
        );
        assert_eq!(
            params.get("category"),
            Some(&EventValue::from("electronics"))
        );
    }

    #[test]
    fn view_content_params_skip_missing_type() {
        let params = view_content_params("product-123", None, None);
        assert_eq!(
            params.get("content_id"),
            Some(&EventValue::from("product-123"))
        );
        assert!(!params.contains_key("content_type"));
    }

    #[test]
    fn purchase_params_carry_line_items() {
        let contents = vec![PurchaseContent {
            content_id: "product-123".to_string(),
            content_type: Some("product".to_string()),
            content_name: None,
            quantity: Some(2),
            price: Some(49.99),
        }];
        let params = purchase_params(99.98, "USD", Some(contents), None);

        assert_eq!(params.get("value"), Some(&EventValue::Number(99.98)));
        assert_eq!(params.get("currency"), Some(&EventValue::from("USD")));
        match params.get("contents") {
            Some(EventValue::Records(records)) => {
                assert_eq!(records.len(), 1);
                assert_eq!(
                    records[0].get("content_id"),
                    Some(&EventScalar::Text("product-123".to_string()))
                );
                assert_eq!(records[0].get("quantity"), Some(&EventScalar::Number(2.0)));
                assert!(!records[0].contains_key("content_name"));
            }
            other => panic!("contents missing or wrong shape: {other:?}"),
        }
    }

    #[test]
    fn params_serialize_to_plain_json() {
        let mut params = EventParams::new();
        params.insert("content_id".to_string(), EventValue::from("p-1"));
        params.insert("value".to_string(), EventValue::Number(9.5));
        params.insert("in_stock".to_string(), EventValue::Boolean(true));

        let json: serde_json::Value =
            serde_json::from_str(&params_to_json(&params).unwrap()).unwrap();
        assert_eq!(json["content_id"], "p-1");
        assert_eq!(json["value"], 9.5);
        assert_eq!(json["in_stock"], true);
    }

    #[test]
    fn route_change_params_encode_screen_params_as_json_text() {
        let mut route_params = EventParams::new();
        route_params.insert("id".to_string(), EventValue::from("42"));

        let event = route_change_params("/products/42", Some(&route_params)).unwrap();
        assert_eq!(
            event.get("screen_name"),
            Some(&EventValue::from("/products/42"))
        );
        match event.get("screen_params") {
            Some(EventValue::Text(json)) => {
                let value: serde_json::Value = serde_json::from_str(json).unwrap();
                assert_eq!(value["id"], "42");
            }
            other => panic!("screen_params missing or wrong shape: {other:?}"),
        }

        let bare = route_change_params("/home", None).unwrap();
        assert!(!bare.contains_key("screen_params"));
    }
}
