use crate::constants;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds and serves a containerized preview of the site", long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        env = "SITEPOD_PORT",
        default_value_t = constants::DEFAULT_PORT,
        help = "Port published on the host and bound by the server inside the container"
    )]
    pub port: u16,
    #[arg(
        long,
        env = "SITEPOD_NO_CACHE",
        help = "Bypasses the layer cache when building the preview image"
    )]
    pub no_cache: bool,
    #[arg(long, help = "Pulls the base image even if it is present locally")]
    pub pull: bool,
    #[arg(
        short,
        long,
        help = "Site project directory (defaults to the current directory)"
    )]
    pub dir: Option<String>,
}
