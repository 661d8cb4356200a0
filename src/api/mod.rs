use bollard::Docker;

use crate::util::backend::ContainerBackend;

pub mod container;
pub mod image;
pub mod preview;

pub struct ImageApi<'a> {
    pub client: &'a Docker,
}

pub struct ContainerApi<'a> {
    pub client: &'a Docker,
    pub backend: &'a ContainerBackend,
}

pub struct Api<'a> {
    pub image: &'a ImageApi<'a>,
    pub container: &'a ContainerApi<'a>,
}

pub struct PreviewApi<'a> {
    pub api: &'a Api<'a>,
}
