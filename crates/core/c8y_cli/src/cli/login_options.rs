use super::Output;
use c8y_api::C8yClient;
use c8y_api::LoginOptionQuery;
use c8y_http::CancellationToken;

#[derive(clap::Subcommand, Debug)]
pub enum LoginOptionsCmd {
    /// List the login options of the tenant
    List {
        /// Only the options of the management tenant
        #[clap(long)]
        management: bool,
    },
}

impl LoginOptionsCmd {
    pub fn description(&self) -> String {
        "list the login options".to_string()
    }

    pub async fn execute(self, c8y: &C8yClient, cancel: CancellationToken) -> anyhow::Result<Output> {
        match self {
            LoginOptionsCmd::List { management } => {
                let query = LoginOptionQuery {
                    management: management.then_some(true),
                    tenant_id: None,
                };
                let options = c8y.login_options().cancel_on(cancel).list(&query).await?;
                Output::json(&options)
            }
        }
    }
}
