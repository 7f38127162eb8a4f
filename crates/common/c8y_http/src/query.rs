//! Query-string assembly
//!
//! Cumulocity endpoints take many optional query parameters. A parameter is
//! only added to a request when a value is actually provided: `None`, empty
//! strings and empty lists are skipped rather than sent as `name=`.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use time::UtcOffset;

/// A value that can be used as a query parameter
pub trait QueryValue {
    /// The string representation of this value, or `None` if the parameter must be omitted
    fn to_query_value(&self) -> Option<String>;
}

impl QueryValue for str {
    fn to_query_value(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.to_string())
    }
}

impl QueryValue for String {
    fn to_query_value(&self) -> Option<String> {
        self.as_str().to_query_value()
    }
}

impl QueryValue for bool {
    fn to_query_value(&self) -> Option<String> {
        Some(if *self { "true" } else { "false" }.to_string())
    }
}

macro_rules! display_query_value {
    ($($t:ty),*) => {
        $(
            impl QueryValue for $t {
                fn to_query_value(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

display_query_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, f64);

impl QueryValue for OffsetDateTime {
    fn to_query_value(&self) -> Option<String> {
        self.to_offset(UtcOffset::UTC).format(&Rfc3339).ok()
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn to_query_value(&self) -> Option<String> {
        (**self).to_query_value()
    }
}

impl<T: QueryValue> QueryValue for Option<T> {
    fn to_query_value(&self) -> Option<String> {
        self.as_ref().and_then(QueryValue::to_query_value)
    }
}

impl<T: QueryValue> QueryValue for [T] {
    fn to_query_value(&self) -> Option<String> {
        let values: Vec<String> = self.iter().filter_map(T::to_query_value).collect();
        (!values.is_empty()).then(|| values.join(","))
    }
}

impl<T: QueryValue> QueryValue for Vec<T> {
    fn to_query_value(&self) -> Option<String> {
        self.as_slice().to_query_value()
    }
}

/// Ordered list of query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        QueryParams::default()
    }

    /// Add a parameter if the value is present
    pub fn add_if_required(&mut self, name: &str, value: impl QueryValue) {
        if let Some(value) = value.to_query_value() {
            self.params.push((name.to_string(), value));
        }
    }

    pub fn with(mut self, name: &str, value: impl QueryValue) -> Self {
        self.add_if_required(name, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn extend(&mut self, other: QueryParams) {
        self.params.extend(other.params)
    }
}

/// Types grouping several query parameters, e.g. the filters of a collection request
pub trait ToQuery {
    fn append_to(&self, query: &mut QueryParams);

    fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        self.append_to(&mut query);
        query
    }
}

impl<T: ToQuery + ?Sized> ToQuery for &T {
    fn append_to(&self, query: &mut QueryParams) {
        (**self).append_to(query)
    }
}

impl ToQuery for QueryParams {
    fn append_to(&self, query: &mut QueryParams) {
        query.extend(self.clone())
    }
}
