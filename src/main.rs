mod api;
mod cli;
mod constants;
mod model;
mod template;
mod util;

use crate::{
    api::{Api, ContainerApi, ImageApi, PreviewApi},
    cli::Cli,
    model::types::{AnyError, PreviewSpec},
    util::backend::ContainerBackend,
};

use bollard::Docker;
use clap::Parser;
use std::{env, path::PathBuf};

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    env_logger::init();

    log::debug!("Started");

    let args = Cli::parse();
    let docker = Docker::connect_with_local_defaults()?;
    let version = docker.version().await?;
    let backend = ContainerBackend::resolve(&version)?;

    log::debug!("API connected: {:?}", &backend);

    let image_api = ImageApi { client: &docker };
    let container_api = ContainerApi {
        client: &docker,
        backend: &backend,
    };
    let api = Api {
        image: &image_api,
        container: &container_api,
    };
    let preview = PreviewApi { api: &api };

    let dir = match &args.dir {
        Some(dir) => PathBuf::from(dir),
        None => env::current_dir()?,
    }
    .canonicalize()?;

    let exit_code = preview
        .preview(&PreviewSpec {
            dir: &dir,
            port: args.port,
            no_cache: args.no_cache,
            pull: args.pull,
        })
        .await?;

    if exit_code != 0 {
        std::process::exit(exit_code as i32);
    }
    Ok(())
}
