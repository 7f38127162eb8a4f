use super::Pagination;
use crate::json_c8y::ManagedObject;
use crate::json_c8y::ManagedObjectCollection;
use crate::media_types;
use c8y_http::QueryParams;
use c8y_http::RestError;
use c8y_http::ToQuery;
use serde::de::DeserializeOwned;

const MANAGED_OBJECTS: &str = "/inventory/managedObjects";
const MANAGED_OBJECT: &str = "/inventory/managedObjects/{id}";

const REMOVED_FIELDS: &[&str] = &[
    "id",
    "self",
    "creationTime",
    "lastUpdated",
    "owner",
    "assetParents",
    "deviceParents",
    "additionParents",
    "childAssets",
    "childDevices",
    "childAdditions",
];

api_handle!(
    /// `/inventory/managedObjects`
    Inventory
);

/// Filters of a request on the inventory
///
/// `query` is a Cumulocity query language expression, e.g. `$filter=(has(c8y_IsDevice))`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryQuery {
    pub child_addition_id: Option<String>,
    pub child_asset_id: Option<String>,
    pub child_device_id: Option<String>,
    pub fragment_type: Option<String>,
    pub ids: Vec<String>,
    pub only_roots: Option<bool>,
    pub owner: Option<String>,
    pub query: Option<String>,
    pub text: Option<String>,
    pub object_type: Option<String>,
    pub with_children: Option<bool>,
    pub with_children_count: Option<bool>,
    pub with_groups: Option<bool>,
    pub with_parents: Option<bool>,
    pub skip_children_names: Option<bool>,
    pub pagination: Pagination,
}

impl ToQuery for InventoryQuery {
    fn append_to(&self, query: &mut QueryParams) {
        query.add_if_required("childAdditionId", &self.child_addition_id);
        query.add_if_required("childAssetId", &self.child_asset_id);
        query.add_if_required("childDeviceId", &self.child_device_id);
        query.add_if_required("fragmentType", &self.fragment_type);
        query.add_if_required("ids", &self.ids);
        query.add_if_required("onlyRoots", self.only_roots);
        query.add_if_required("owner", &self.owner);
        query.add_if_required("query", &self.query);
        query.add_if_required("text", &self.text);
        query.add_if_required("type", &self.object_type);
        query.add_if_required("withChildren", self.with_children);
        query.add_if_required("withChildrenCount", self.with_children_count);
        query.add_if_required("withGroups", self.with_groups);
        query.add_if_required("withParents", self.with_parents);
        query.add_if_required("skipChildrenNames", self.skip_children_names);
        self.pagination.append_to(query);
    }
}

impl Inventory<'_> {
    pub async fn list(&self, query: &InventoryQuery) -> Result<ManagedObjectCollection, RestError> {
        self.list_as(query).await
    }

    /// List managed objects, reading each of them into a caller-defined type
    pub async fn list_as<T: DeserializeOwned>(
        &self,
        query: &InventoryQuery,
    ) -> Result<ManagedObjectCollection<T>, RestError> {
        self.ctx
            .get(MANAGED_OBJECTS, &[])
            .query_params(query)
            .accept(media_types::MANAGED_OBJECT_COLLECTION)
            .send_json()
            .await
    }

    pub async fn create(&self, managed_object: &ManagedObject) -> Result<ManagedObject, RestError> {
        self.ctx
            .post(MANAGED_OBJECTS, &[])
            .content_type(media_types::MANAGED_OBJECT)
            .accept(media_types::MANAGED_OBJECT)
            .json_without(managed_object, REMOVED_FIELDS)
            .send_json()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<ManagedObject, RestError> {
        self.get_as(id).await
    }

    /// Read a managed object into a caller-defined type
    pub async fn get_as<T: DeserializeOwned>(&self, id: &str) -> Result<T, RestError> {
        self.ctx
            .get(MANAGED_OBJECT, &[id])
            .accept(media_types::MANAGED_OBJECT)
            .send_json()
            .await
    }

    /// Update a managed object
    ///
    /// Only the given fragments are changed. A fragment set to `null` is removed.
    pub async fn update(
        &self,
        id: &str,
        managed_object: &ManagedObject,
    ) -> Result<ManagedObject, RestError> {
        self.ctx
            .put(MANAGED_OBJECT, &[id])
            .content_type(media_types::MANAGED_OBJECT)
            .accept(media_types::MANAGED_OBJECT)
            .json_without(managed_object, REMOVED_FIELDS)
            .send_json()
            .await
    }

    /// Delete a managed object, and with `cascade` its children
    pub async fn delete(&self, id: &str, cascade: Option<bool>) -> Result<(), RestError> {
        self.ctx
            .delete(MANAGED_OBJECT, &[id])
            .query("cascade", cascade)
            .send_empty()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::client;
    use mockito::Matcher;
    use serde::Deserialize;
    use serde_json::json;
    use time::macros::datetime;

    #[tokio::test]
    async fn ids_are_comma_joined() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/inventory/managedObjects?ids=1%2C2%2C3&withParents=true")
            .match_header("accept", media_types::MANAGED_OBJECT_COLLECTION)
            .with_status(200)
            .with_body(r#"{"managedObjects": [{"id": "1"}, {"id": "2"}, {"id": "3"}]}"#)
            .create_async()
            .await;

        let c8y = client(&server);
        let objects = Inventory::new(&c8y)
            .list(&InventoryQuery {
                ids: vec!["1".into(), "2".into(), "3".into()],
                with_parents: Some(true),
                ..InventoryQuery::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(objects.items.len(), 3);
    }

    #[tokio::test]
    async fn query_language_expressions_are_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/inventory/managedObjects")
            .match_query(Matcher::UrlEncoded(
                "query".into(),
                "$filter=(has(c8y_IsDevice)) $orderby=name".into(),
            ))
            .with_status(200)
            .with_body(r#"{"managedObjects": []}"#)
            .create_async()
            .await;

        let c8y = client(&server);
        Inventory::new(&c8y)
            .list(&InventoryQuery {
                query: Some("$filter=(has(c8y_IsDevice)) $orderby=name".into()),
                ..InventoryQuery::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn hierarchy_is_not_sent_on_update() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/inventory/managedObjects/4242")
            .match_header("content-type", media_types::MANAGED_OBJECT)
            .match_body(Matcher::Json(json!({
                "name": "my device",
                "c8y_Firmware": { "version": "1.2.0" }
            })))
            .with_status(200)
            .with_body(r#"{"id": "4242", "name": "my device", "c8y_Firmware": {"version": "1.2.0"}}"#)
            .create_async()
            .await;

        let mut update = ManagedObject {
            name: Some("my device".into()),
            ..ManagedObject::default()
        }
        .with_fragment("c8y_Firmware", json!({ "version": "1.2.0" }));
        update.id = Some("4242".into());
        update.owner = Some("device_4242".into());
        update.last_updated = Some(datetime!(2024-03-01 12:00 UTC));
        update.child_devices = Some(json!({ "references": [] }));

        let c8y = client(&server);
        let updated = Inventory::new(&c8y).update("4242", &update).await.unwrap();

        mock.assert_async().await;
        assert_eq!(updated.fragments["c8y_Firmware"]["version"], "1.2.0");
    }

    #[tokio::test]
    async fn managed_object_is_read_into_a_custom_type() {
        #[derive(Deserialize)]
        struct Firmware {
            #[serde(rename = "c8y_Firmware")]
            c8y_firmware: Version,
        }

        #[derive(Deserialize)]
        struct Version {
            version: String,
        }

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/inventory/managedObjects/4242")
            .with_status(200)
            .with_body(r#"{"id": "4242", "c8y_Firmware": {"name": "core", "version": "1.2.0"}}"#)
            .create_async()
            .await;

        let c8y = client(&server);
        let firmware: Firmware = Inventory::new(&c8y).get_as("4242").await.unwrap();

        assert_eq!(firmware.c8y_firmware.version, "1.2.0");
    }

    #[tokio::test]
    async fn managed_objects_are_listed_into_a_custom_type() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Device {
            id: String,
            name: String,
        }

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/inventory/managedObjects?fragmentType=c8y_IsDevice&pageSize=2")
            .match_header("accept", media_types::MANAGED_OBJECT_COLLECTION)
            .with_status(200)
            .with_body(
                r#"{
                    "managedObjects": [
                        {"id": "4242", "name": "pump", "c8y_IsDevice": {}},
                        {"id": "4243", "name": "valve", "c8y_IsDevice": {}}
                    ],
                    "statistics": {"currentPage": 1, "pageSize": 2}
                }"#,
            )
            .create_async()
            .await;

        let c8y = client(&server);
        let devices: ManagedObjectCollection<Device> = Inventory::new(&c8y)
            .list_as(&InventoryQuery {
                fragment_type: Some("c8y_IsDevice".into()),
                pagination: Pagination::page_size(2),
                ..InventoryQuery::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            devices.items,
            vec![
                Device {
                    id: "4242".into(),
                    name: "pump".into()
                },
                Device {
                    id: "4243".into(),
                    name: "valve".into()
                },
            ]
        );
        assert_eq!(devices.statistics.map(|s| s.page_size), Some(Some(2)));
    }

    #[tokio::test]
    async fn cascade_is_only_sent_when_set() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/inventory/managedObjects/4242?cascade=true")
            .with_status(204)
            .create_async()
            .await;

        let c8y = client(&server);
        Inventory::new(&c8y).delete("4242", Some(true)).await.unwrap();

        mock.assert_async().await;
    }
}
