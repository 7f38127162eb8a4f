use super::Output;
use c8y_api::json_c8y::NotificationTokenClaims;
use c8y_api::C8yClient;
use c8y_http::CancellationToken;

#[derive(clap::Subcommand, Debug)]
pub enum NotificationsCmd {
    /// Create a token to consume a subscription
    Token {
        /// Unique name of the consumer
        #[clap(long)]
        subscriber: String,

        /// Name of the subscription to consume
        #[clap(long)]
        subscription: String,

        #[clap(long)]
        expires_in_minutes: Option<u64>,
    },
}

impl NotificationsCmd {
    pub fn description(&self) -> String {
        match self {
            NotificationsCmd::Token { subscription, .. } => {
                format!("create a token for the subscription {subscription}")
            }
        }
    }

    pub async fn execute(self, c8y: &C8yClient, cancel: CancellationToken) -> anyhow::Result<Output> {
        match self {
            NotificationsCmd::Token {
                subscriber,
                subscription,
                expires_in_minutes,
            } => {
                let claims = NotificationTokenClaims {
                    expires_in_minutes,
                    ..NotificationTokenClaims::new(subscriber, subscription)
                };
                let token = c8y
                    .notifications()
                    .cancel_on(cancel)
                    .create_token(&claims)
                    .await?;
                Output::json(&token)
            }
        }
    }
}
