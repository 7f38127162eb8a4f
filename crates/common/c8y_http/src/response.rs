use crate::request::cancellable;
use crate::RestError;
use bytes::Bytes;
use bytes::BytesMut;
use futures::stream::BoxStream;
use futures::Stream;
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use std::pin::Pin;
use std::task::Context;
use std::task::Poll;
use tokio_util::sync::CancellationToken;

/// The raw content of a response, read chunk by chunk
///
/// Used for binaries and event attachments which are not JSON documents.
/// The stream ends with a [RestError::Cancelled] item if the request is cancelled while reading.
pub struct ByteStream {
    content_type: Option<String>,
    content_length: Option<u64>,
    chunks: BoxStream<'static, Result<Bytes, RestError>>,
}

impl ByteStream {
    pub(crate) fn new(response: Response, cancel: Option<CancellationToken>) -> Self {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let content_length = response.content_length();

        let chunks = futures::stream::unfold(Some((response, cancel)), |state| async move {
            let (mut response, cancel) = state?;
            match cancellable(cancel.as_ref(), response.chunk()).await {
                Ok(Some(chunk)) => Some((Ok(chunk), Some((response, cancel)))),
                Ok(None) => None,
                Err(err) => Some((Err(err), None)),
            }
        })
        .boxed();

        ByteStream {
            content_type,
            content_length,
            chunks,
        }
    }

    /// The media type announced by the server
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Read the whole content in memory
    pub async fn collect_bytes(mut self) -> Result<Bytes, RestError> {
        let mut content = BytesMut::new();
        while let Some(chunk) = self.chunks.next().await {
            content.extend_from_slice(&chunk?);
        }
        Ok(content.freeze())
    }
}

impl Stream for ByteStream {
    type Item = Result<Bytes, RestError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.chunks.poll_next_unpin(cx)
    }
}

impl std::fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteStream")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::C8yHttpClient;
    use crate::RestError;
    use assert_matches::assert_matches;
    use futures::StreamExt;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn binary_content_is_streamed() {
        let mut server = mockito::Server::new_async().await;
        let content = vec![7u8; 64 * 1024];
        let _mock = server
            .mock("GET", "/inventory/binaries/4242")
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_body(&content)
            .create_async()
            .await;

        let c8y = C8yHttpClient::new(&server.url()).unwrap();
        let stream = c8y
            .get("/inventory/binaries/{id}", &["4242"])
            .accept("*/*")
            .send_stream()
            .await
            .unwrap();

        assert_eq!(stream.content_type(), Some("application/octet-stream"));
        assert_eq!(stream.collect_bytes().await.unwrap().as_ref(), &content[..]);
    }

    #[tokio::test]
    async fn cancelled_stream_reports_cancellation() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/event/events/1/binaries")
            .with_status(200)
            .with_body("attachment")
            .create_async()
            .await;

        let token = CancellationToken::new();
        let c8y = C8yHttpClient::new(&server.url()).unwrap();
        let mut stream = c8y
            .get("/event/events/{id}/binaries", &["1"])
            .cancel_on(Some(token.clone()))
            .send_stream()
            .await
            .unwrap();

        token.cancel();
        assert_matches!(stream.next().await, Some(Err(RestError::Cancelled)));
        assert!(stream.next().await.is_none());
    }
}
