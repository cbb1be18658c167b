use clap::Args;
use std::path::PathBuf;

/// Settings for the `serve` command. Each flag can also come from the
/// environment (or a `.env` file).
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// Directory whose sub-directories hold the manga collections
    #[arg(long, value_name = "dir", env = "MANGASHELF_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Address to listen on
    #[arg(long, value_name = "addr", env = "MANGASHELF_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: String,

    /// Directory served under /asset
    #[arg(long, value_name = "dir", env = "MANGASHELF_ASSETS", default_value = "asset")]
    pub assets: PathBuf,
}
