use super::object_and_file;
use super::Pagination;
use crate::json_c8y::BinaryInfo;
use crate::json_c8y::ManagedObject;
use crate::json_c8y::ManagedObjectCollection;
use crate::media_types;
use bytes::Bytes;
use c8y_http::ByteStream;
use c8y_http::FormPart;
use c8y_http::MultipartForm;
use c8y_http::QueryParams;
use c8y_http::RestError;
use c8y_http::ToQuery;
use mime::Mime;
use std::path::Path;
use tracing::debug;

const BINARIES: &str = "/inventory/binaries";
const BINARY: &str = "/inventory/binaries/{id}";

api_handle!(
    /// `/inventory/binaries`
    ///
    /// Binaries are files (firmware images, configuration snapshots, log files)
    /// stored by the platform along with a managed object describing them.
    Binaries
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinaryQuery {
    pub child_addition_id: Option<String>,
    pub child_asset_id: Option<String>,
    pub child_device_id: Option<String>,
    pub ids: Vec<String>,
    pub owner: Option<String>,
    pub text: Option<String>,
    pub binary_type: Option<String>,
    pub pagination: Pagination,
}

impl ToQuery for BinaryQuery {
    fn append_to(&self, query: &mut QueryParams) {
        query.add_if_required("childAdditionId", &self.child_addition_id);
        query.add_if_required("childAssetId", &self.child_asset_id);
        query.add_if_required("childDeviceId", &self.child_device_id);
        query.add_if_required("ids", &self.ids);
        query.add_if_required("owner", &self.owner);
        query.add_if_required("text", &self.text);
        query.add_if_required("type", &self.binary_type);
        self.pagination.append_to(query);
    }
}

impl Binaries<'_> {
    /// List the managed objects describing the stored binaries
    pub async fn list(&self, query: &BinaryQuery) -> Result<ManagedObjectCollection, RestError> {
        self.ctx
            .get(BINARIES, &[])
            .query_params(query)
            .accept(media_types::MANAGED_OBJECT_COLLECTION)
            .send_json()
            .await
    }

    /// Upload a binary, described by an `object` part and sent as a `file` part
    pub async fn upload(
        &self,
        info: &BinaryInfo,
        content: impl Into<Bytes>,
    ) -> Result<ManagedObject, RestError> {
        let form = object_and_file(info, content.into())?;
        self.upload_form(form).await
    }

    /// Upload a local file, named after the file and typed after its extension
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> Result<ManagedObject, RestError> {
        let path = path.as_ref();
        let file = FormPart::from_path("file", path).await?;
        let name = file
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        let info = BinaryInfo::new(name, file.mime().as_ref());
        debug!(target: "c8y-api", "Uploading {} as {}", path.display(), info.content_type);

        let form = MultipartForm::new()
            .part(FormPart::json("object", &info)?)
            .part(file);
        self.upload_form(form).await
    }

    async fn upload_form(&self, form: MultipartForm) -> Result<ManagedObject, RestError> {
        self.ctx
            .post(BINARIES, &[])
            .accept(media_types::MANAGED_OBJECT)
            .multipart(form)
            .send_json()
            .await
    }

    /// Download the content of a binary
    pub async fn download(&self, id: &str) -> Result<ByteStream, RestError> {
        self.ctx
            .get(BINARY, &[id])
            .accept("*/*")
            .send_stream()
            .await
    }

    /// Replace the content of a binary, keeping its id
    pub async fn replace(
        &self,
        id: &str,
        content: impl Into<Bytes>,
        mime: Mime,
    ) -> Result<ManagedObject, RestError> {
        self.ctx
            .put(BINARY, &[id])
            .accept(media_types::MANAGED_OBJECT)
            .bytes(content, mime)
            .send_json()
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), RestError> {
        self.ctx.delete(BINARY, &[id]).send_empty().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::client;
    use futures::StreamExt;
    use mockito::Matcher;
    use std::io::Write;

    #[tokio::test]
    async fn binary_is_uploaded_as_object_and_file() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/inventory/binaries")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=.+$".into()),
            )
            .match_header("accept", media_types::MANAGED_OBJECT)
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="object""#.into()),
                Matcher::Regex(r#"\{"name":"firmware.bin","type":"application/octet-stream"\}"#.into()),
                Matcher::Regex(r#"name="file"; filename="firmware.bin""#.into()),
                Matcher::Regex("firmware image".into()),
            ]))
            .with_status(201)
            .with_body(r#"{"id": "900", "name": "firmware.bin", "type": "application/octet-stream", "length": 14, "c8y_IsBinary": ""}"#)
            .create_async()
            .await;

        let c8y = client(&server);
        let binary = Binaries::new(&c8y)
            .upload(
                &BinaryInfo::new("firmware.bin", "application/octet-stream"),
                "firmware image",
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(binary.id.as_deref(), Some("900"));
        assert!(binary.fragments.contains_key("c8y_IsBinary"));
    }

    #[tokio::test]
    async fn local_file_is_typed_after_its_extension() {
        let mut file = tempfile::Builder::new()
            .prefix("device-config")
            .suffix(".json")
            .tempfile()
            .unwrap();
        file.write_all(br#"{"interval": 60}"#).unwrap();
        let file_name = file.path().file_name().unwrap().to_str().unwrap().to_string();

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/inventory/binaries")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(format!(r#"\{{"name":"{file_name}","type":"application/json"\}}"#)),
                Matcher::Regex(format!(r#"name="file"; filename="{file_name}""#)),
                Matcher::Regex(r#"\{"interval": 60\}"#.into()),
            ]))
            .with_status(201)
            .with_body(r#"{"id": "901"}"#)
            .create_async()
            .await;

        let c8y = client(&server);
        let binary = Binaries::new(&c8y).upload_file(file.path()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(binary.id.as_deref(), Some("901"));
    }

    #[tokio::test]
    async fn missing_local_file_is_a_local_error() {
        let server = mockito::Server::new_async().await;
        let c8y = client(&server);
        let error = Binaries::new(&c8y)
            .upload_file("/does/not/exist.bin")
            .await
            .unwrap_err();

        assert_eq!(error.kind(), c8y_http::ErrorKind::Local);
    }

    #[tokio::test]
    async fn binary_is_downloaded_chunk_by_chunk() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/inventory/binaries/900")
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_body("firmware image")
            .create_async()
            .await;

        let c8y = client(&server);
        let mut stream = Binaries::new(&c8y).download("900").await.unwrap();

        let mut content = Vec::new();
        while let Some(chunk) = stream.next().await {
            content.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(content, b"firmware image");
    }

    #[tokio::test]
    async fn binary_is_replaced_in_place() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/inventory/binaries/900")
            .match_header("content-type", "text/plain")
            .match_body("new content")
            .with_status(201)
            .with_body(r#"{"id": "900", "type": "text/plain"}"#)
            .create_async()
            .await;

        let c8y = client(&server);
        let binary = Binaries::new(&c8y)
            .replace("900", "new content", mime::TEXT_PLAIN)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(binary.object_type.as_deref(), Some("text/plain"));
    }
}
