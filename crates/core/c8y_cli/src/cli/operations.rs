use super::Output;
use c8y_api::json_c8y::OperationStatus;
use c8y_api::C8yClient;
use c8y_api::OperationQuery;
use c8y_api::Pagination;
use c8y_http::CancellationToken;

#[derive(clap::Subcommand, Debug)]
pub enum OperationsCmd {
    /// List operations
    List {
        /// Id of the target device
        #[clap(long)]
        device_id: Option<String>,

        /// PENDING, EXECUTING, SUCCESSFUL or FAILED
        #[clap(long, value_parser = parse_operation_status)]
        status: Option<OperationStatus>,

        #[clap(long)]
        page_size: Option<u32>,
    },
}

fn parse_operation_status(status: &str) -> Result<OperationStatus, String> {
    match status.to_ascii_uppercase().as_str() {
        "PENDING" => Ok(OperationStatus::Pending),
        "EXECUTING" => Ok(OperationStatus::Executing),
        "SUCCESSFUL" => Ok(OperationStatus::Successful),
        "FAILED" => Ok(OperationStatus::Failed),
        _ => Err(format!(
            "unknown status {status:?}, expected PENDING, EXECUTING, SUCCESSFUL or FAILED"
        )),
    }
}

impl OperationsCmd {
    pub fn description(&self) -> String {
        match self {
            OperationsCmd::List { .. } => "list the operations".to_string(),
        }
    }

    pub async fn execute(self, c8y: &C8yClient, cancel: CancellationToken) -> anyhow::Result<Output> {
        match self {
            OperationsCmd::List {
                device_id,
                status,
                page_size,
            } => {
                let query = OperationQuery {
                    device_id,
                    status,
                    pagination: Pagination {
                        page_size,
                        ..Pagination::default()
                    },
                    ..OperationQuery::default()
                };
                let operations = c8y.operations().cancel_on(cancel).list(&query).await?;
                Output::json(&operations)
            }
        }
    }
}
