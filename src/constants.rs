pub const IMAGE_TAG: &'static str = "sitepod/preview:latest";
pub const CONTAINER_NAME: &'static str = "sitepod-preview";
pub const DEFAULT_PORT: u16 = 4000;
pub const BASE_DESCRIPTOR: &'static str = "Dockerfile";
pub const SITE_DIR: &'static str = "/srv/site";
pub const HOST_IP: &'static str = "127.0.0.1";
pub const GEM_FILES: &[&str] = &["Gemfile", "Gemfile.lock"];
pub const CREDENTIAL_PATHS: &[&str] = &["~/.gitconfig", "~/.ssh"];
