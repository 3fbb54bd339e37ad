//! Command-line configuration for both binaries.
//!
//! Every flag also reads from an environment variable so the server can be
//! configured the same way in a shell and in a container.

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Port the REST server listens on by default.
pub const DEFAULT_PORT: u16 = 5002;
/// Directory holding one subdirectory per parsed document.
pub const DEFAULT_OUTPUTS_DIR: &str = "./outputs";

/// Serves parsed documents and their images over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "outline-server", version, about)]
pub struct ServerArgs {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to bind.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Root of the document store.
    #[arg(long, env = "OUTPUTS_DIR", default_value = DEFAULT_OUTPUTS_DIR)]
    pub outputs_dir: PathBuf,
}

impl ServerArgs {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Side-by-side viewer for a document outline and its source PDF.
#[derive(Debug, Clone, Parser)]
#[command(name = "outline-viewer", version, about)]
pub struct ViewerArgs {
    /// Document to open from the outputs directory.
    pub document_id: Option<String>,

    /// Root of the document store.
    #[arg(long, env = "OUTPUTS_DIR", default_value = DEFAULT_OUTPUTS_DIR)]
    pub outputs_dir: PathBuf,

    /// Source PDF shown in the right-hand pane.
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Quiet period after a mirrored scroll before the panes unlock.
    #[arg(long, env = "SYNC_DELAY_MS", default_value_t = 150)]
    pub sync_delay_ms: u64,

    /// Open the bundled sample document.
    #[arg(long, conflicts_with = "document_id")]
    pub sample: bool,
}

impl ViewerArgs {
    pub fn quiescence(&self) -> Duration {
        Duration::from_millis(self.sync_delay_ms)
    }
}
