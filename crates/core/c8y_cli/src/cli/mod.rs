use c8y_api::C8yClient;
use c8y_config::DEFAULT_C8Y_CONFIG_PATH;
use c8y_http::CancellationToken;
use serde_json::Value;
use std::path::PathBuf;

mod binaries;
mod bootstrap;
mod events;
mod login_options;
mod notifications;
mod operations;

pub use binaries::BinariesCmd;
pub use bootstrap::BootstrapCmd;
pub use events::EventsCmd;
pub use login_options::LoginOptionsCmd;
pub use notifications::NotificationsCmd;
pub use operations::OperationsCmd;

#[derive(clap::Parser, Debug)]
#[clap(
    name = "c8y",
    version = clap::crate_version!(),
    about = clap::crate_description!(),
    arg_required_else_help(true)
)]
pub struct Opt {
    /// Directory of the `c8y.toml` configuration file
    #[clap(
        long = "config-dir",
        env = "C8Y_CONFIG_DIR",
        default_value = DEFAULT_C8Y_CONFIG_PATH,
        global = true
    )]
    pub config_dir: PathBuf,

    /// Turn-on the debug log level.
    ///
    /// If off only reports INFO, WARN and ERROR messages.
    #[clap(long, global = true)]
    pub debug: bool,

    #[clap(subcommand)]
    pub command: C8yCmd,
}

#[derive(clap::Subcommand, Debug)]
pub enum C8yCmd {
    /// Events of the devices
    #[clap(subcommand)]
    Events(EventsCmd),

    /// Operations sent to the devices
    #[clap(subcommand)]
    Operations(OperationsCmd),

    /// Files stored in the inventory
    #[clap(subcommand)]
    Binaries(BinariesCmd),

    /// Authentication methods of the tenant
    #[clap(subcommand)]
    LoginOptions(LoginOptionsCmd),

    /// Notification 2.0 service
    #[clap(subcommand)]
    Notifications(NotificationsCmd),

    /// Requests sent with the bootstrap credentials
    #[clap(subcommand)]
    Bootstrap(BootstrapCmd),
}

/// What a command prints once done
#[derive(Debug, PartialEq)]
pub enum Output {
    Json(Value),
    Saved { path: PathBuf, size: u64 },
    Done,
}

impl Output {
    pub(crate) fn json<T: serde::Serialize>(value: &T) -> anyhow::Result<Self> {
        Ok(Output::Json(serde_json::to_value(value)?))
    }
}

impl C8yCmd {
    /// Tell what the command does, to give some context to an error
    pub fn description(&self) -> String {
        match self {
            C8yCmd::Events(cmd) => cmd.description(),
            C8yCmd::Operations(cmd) => cmd.description(),
            C8yCmd::Binaries(cmd) => cmd.description(),
            C8yCmd::LoginOptions(cmd) => cmd.description(),
            C8yCmd::Notifications(cmd) => cmd.description(),
            C8yCmd::Bootstrap(cmd) => cmd.description(),
        }
    }

    /// Run the command, aborting the in-flight request when `cancel` is triggered
    pub async fn execute(self, c8y: &C8yClient, cancel: CancellationToken) -> anyhow::Result<Output> {
        match self {
            C8yCmd::Events(cmd) => cmd.execute(c8y, cancel).await,
            C8yCmd::Operations(cmd) => cmd.execute(c8y, cancel).await,
            C8yCmd::Binaries(cmd) => cmd.execute(c8y, cancel).await,
            C8yCmd::LoginOptions(cmd) => cmd.execute(c8y, cancel).await,
            C8yCmd::Notifications(cmd) => cmd.execute(c8y, cancel).await,
            C8yCmd::Bootstrap(cmd) => cmd.execute(c8y, cancel).await,
        }
    }
}
