use super::Output;
use c8y_api::json_c8y::Event;
use c8y_api::C8yClient;
use c8y_api::EventQuery;
use c8y_api::Pagination;
use c8y_http::CancellationToken;
use time::OffsetDateTime;

#[derive(clap::Subcommand, Debug)]
pub enum EventsCmd {
    /// List events, the most recent first
    List {
        /// Id of the device which raised the events
        #[clap(long)]
        source: Option<String>,

        #[clap(long = "type")]
        event_type: Option<String>,

        #[clap(long)]
        page_size: Option<u32>,

        #[clap(long)]
        current_page: Option<u32>,
    },

    /// Get an event by id
    Get { id: String },

    /// Create an event, timestamped now
    Create {
        /// Id of the device raising the event
        #[clap(long)]
        source: String,

        #[clap(long = "type")]
        event_type: String,

        #[clap(long)]
        text: String,
    },

    /// Delete an event by id
    Delete { id: String },
}

impl EventsCmd {
    pub fn description(&self) -> String {
        match self {
            EventsCmd::List { .. } => "list the events".to_string(),
            EventsCmd::Get { id } => format!("get the event {id}"),
            EventsCmd::Create { event_type, .. } => format!("create a {event_type} event"),
            EventsCmd::Delete { id } => format!("delete the event {id}"),
        }
    }

    pub async fn execute(self, c8y: &C8yClient, cancel: CancellationToken) -> anyhow::Result<Output> {
        let events = c8y.events().cancel_on(cancel);
        match self {
            EventsCmd::List {
                source,
                event_type,
                page_size,
                current_page,
            } => {
                let query = EventQuery {
                    source,
                    event_type,
                    pagination: Pagination {
                        page_size,
                        current_page,
                        ..Pagination::default()
                    },
                    ..EventQuery::default()
                };
                Output::json(&events.list(&query).await?)
            }
            EventsCmd::Get { id } => Output::json(&events.get(&id).await?),
            EventsCmd::Create {
                source,
                event_type,
                text,
            } => {
                let event = Event::new(source, event_type, text, OffsetDateTime::now_utc());
                Output::json(&events.create(&event).await?)
            }
            EventsCmd::Delete { id } => {
                events.delete(&id).await?;
                Ok(Output::Done)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_helpers::c8y;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn only_the_given_filters_are_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/event/events?type=myType&pageSize=5")
            .with_status(200)
            .with_body(r#"{"events": [{"id": "1", "type": "myType"}]}"#)
            .create_async()
            .await;

        let cmd = EventsCmd::List {
            source: None,
            event_type: Some("myType".into()),
            page_size: Some(5),
            current_page: None,
        };
        let output = cmd
            .execute(&c8y(&server), CancellationToken::new())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            output,
            Output::Json(json!({ "events": [{ "id": "1", "type": "myType" }] }))
        );
    }

    #[tokio::test]
    async fn created_event_is_timestamped() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/event/events")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({
                    "type": "c8y_Restart",
                    "text": "Device restarted",
                    "source": { "id": "4242" }
                })),
                Matcher::Regex(r#""time":"\d{4}-\d{2}-\d{2}T"#.into()),
            ]))
            .with_status(201)
            .with_body(r#"{"id": "7"}"#)
            .create_async()
            .await;

        let cmd = EventsCmd::Create {
            source: "4242".into(),
            event_type: "c8y_Restart".into(),
            text: "Device restarted".into(),
        };
        cmd.execute(&c8y(&server), CancellationToken::new())
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
