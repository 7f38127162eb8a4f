use super::Output;
use anyhow::Context;
use c8y_api::json_c8y::BinaryInfo;
use c8y_api::ByteStream;
use c8y_api::C8yClient;
use c8y_http::CancellationToken;
use futures::StreamExt;
use std::path::Path;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::debug;

#[derive(clap::Subcommand, Debug)]
pub enum BinariesCmd {
    /// Upload a file
    Upload {
        file: PathBuf,

        /// Name of the binary, the file name by default
        #[clap(long)]
        name: Option<String>,

        /// Media type of the binary, guessed from the file extension by default
        #[clap(long = "type")]
        content_type: Option<String>,
    },

    /// Download a binary into a file
    Download {
        id: String,

        #[clap(long, short)]
        output: PathBuf,
    },
}

impl BinariesCmd {
    pub fn description(&self) -> String {
        match self {
            BinariesCmd::Upload { file, .. } => format!("upload {}", file.display()),
            BinariesCmd::Download { id, output } => {
                format!("download the binary {id} into {}", output.display())
            }
        }
    }

    pub async fn execute(self, c8y: &C8yClient, cancel: CancellationToken) -> anyhow::Result<Output> {
        let binaries = c8y.binaries().cancel_on(cancel);
        match self {
            BinariesCmd::Upload {
                file,
                name: None,
                content_type: None,
            } => Output::json(&binaries.upload_file(&file).await?),
            BinariesCmd::Upload {
                file,
                name,
                content_type,
            } => {
                let content = tokio::fs::read(&file)
                    .await
                    .with_context(|| format!("failed to read {}", file.display()))?;
                let name = name.unwrap_or_else(|| file_name(&file));
                let content_type = content_type.unwrap_or_else(|| {
                    mime_guess::from_path(&file)
                        .first_or_octet_stream()
                        .to_string()
                });
                let info = BinaryInfo::new(name, content_type);
                Output::json(&binaries.upload(&info, content).await?)
            }
            BinariesCmd::Download { id, output } => {
                let stream = binaries.download(&id).await?;
                let size = match save(stream, &output).await {
                    Ok(size) => size,
                    Err(err) => {
                        if let Err(remove_err) = tokio::fs::remove_file(&output).await {
                            debug!("Cannot remove {}: {remove_err}", output.display());
                        }
                        return Err(err);
                    }
                };
                debug!("Downloaded binary {id}: {size} bytes");
                Ok(Output::Saved { path: output, size })
            }
        }
    }
}

/// Write a downloaded binary into a file, returning the number of bytes written
async fn save(mut stream: ByteStream, output: &Path) -> anyhow::Result<u64> {
    let mut file = tokio::fs::File::create(output)
        .await
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut size = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        size += chunk.len() as u64;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(size)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
