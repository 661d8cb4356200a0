use crate::util::labels::Labels;
use bollard::models::Mount;
use std::path::Path;

pub type AnyError = Box<dyn std::error::Error + Send + Sync>;

/// Everything the launcher needs to run one preview: where the site lives
/// and the caller's overrides. Resolved once per invocation.
pub struct PreviewSpec<'a> {
    pub dir: &'a Path,
    pub port: u16,
    pub no_cache: bool,
    pub pull: bool,
}

pub struct RunSpec<'a> {
    pub reason: &'a str,
    pub image: &'a str,
    pub uid: u32,
    pub container_name: &'a str,
    pub work_dir: &'a str,
    pub port: u16,
    pub mounts: Vec<Mount>,
    pub command: Vec<String>,
    pub labels: Labels,
}
