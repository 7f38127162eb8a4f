//! JSON documents exchanged with Cumulocity
//!
//! Server-managed fields are optional: they are set on documents read from the platform
//! and stripped from documents sent to the platform.
use serde::Deserialize;
use serde::Serialize;

/// Declare the collection returned when listing a resource
///
/// The items are stored under a resource-specific member (`events`, `alarms`, ...).
/// The item type defaults to the resource DTO but can be any type, e.g. a custom managed object.
macro_rules! c8y_collection {
    ($(#[$meta:meta])* $name:ident<$item:ty>, $member:tt) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $name<T = $item> {
            #[serde(rename = $member, default = "Vec::new")]
            pub items: Vec<T>,

            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub statistics: Option<$crate::json_c8y::PageStatistics>,

            #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
            pub self_link: Option<String>,

            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub next: Option<String>,

            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub prev: Option<String>,
        }

        impl<T> $name<T> {
            pub fn from_items(items: Vec<T>) -> Self {
                $name {
                    items,
                    statistics: None,
                    self_link: None,
                    next: None,
                    prev: None,
                }
            }
        }
    };
}

mod alarm;
mod application;
mod audit;
mod bulk_operation;
mod device_credentials;
mod event;
mod identity;
mod inventory;
mod login_option;
mod measurement;
mod notification;
mod operation;
mod retention_rule;
mod tenant_option;

pub use alarm::*;
pub use application::*;
pub use audit::*;
pub use bulk_operation::*;
pub use device_credentials::*;
pub use event::*;
pub use identity::*;
pub use inventory::*;
pub use login_option::*;
pub use measurement::*;
pub use notification::*;
pub use operation::*;
pub use retention_rule::*;
pub use tenant_option::*;

/// Paging information attached to a collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStatistics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,

    /// Only set when requested with `withTotalPages=true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,

    /// Only set when requested with `withTotalElements=true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
}

/// A reference to a managed object, as found in the `source` of events, alarms and measurements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedObjectRef {
    pub id: String,

    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ManagedObjectRef {
    pub fn new(id: impl Into<String>) -> Self {
        ManagedObjectRef {
            id: id.into(),
            self_link: None,
            name: None,
        }
    }
}

impl From<&str> for ManagedObjectRef {
    fn from(id: &str) -> Self {
        ManagedObjectRef::new(id)
    }
}

impl From<String> for ManagedObjectRef {
    fn from(id: String) -> Self {
        ManagedObjectRef::new(id)
    }
}
