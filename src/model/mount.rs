use crate::constants;
use bollard::models::{Mount, MountTypeEnum};
use std::path::Path;

fn bind(source: &str, target: &str) -> Mount {
    Mount {
        typ: Some(MountTypeEnum::BIND),
        source: Some(source.into()),
        target: Some(target.into()),
        read_only: Some(false),
        ..Default::default()
    }
}

/// Host project root mounted read-write at the fixed site path.
pub fn site_mount(dir: &Path) -> Mount {
    bind(&dir.to_string_lossy(), constants::SITE_DIR)
}

fn target_for(path: &str, container_home: &str) -> String {
    path.replacen("~", container_home, 1)
}

fn bind_existing(paths: &[&str], container_home: &str) -> Vec<Mount> {
    let mut mounts = Vec::new();
    for path in paths {
        let expanded = shellexpand::tilde(path).into_owned();
        if Path::new(&expanded).exists() {
            mounts.push(bind(&expanded, &target_for(path, container_home)));
        } else {
            log::debug!("Skipping absent credential path: {}", &expanded);
        }
    }
    mounts
}

/// Git credential paths, mounted only when present on the host. An absent
/// path is not an error.
pub fn credential_mounts(container_home: &str) -> Vec<Mount> {
    bind_existing(constants::CREDENTIAL_PATHS, container_home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn site_mount_targets_fixed_site_dir() {
        let m = site_mount(&PathBuf::from("/home/alice/blog"));
        assert_eq!(m.typ, Some(MountTypeEnum::BIND));
        assert_eq!(m.source.as_deref(), Some("/home/alice/blog"));
        assert_eq!(m.target.as_deref(), Some(constants::SITE_DIR));
        assert_eq!(m.read_only, Some(false));
    }

    #[test]
    fn absent_paths_are_skipped() {
        let mounts = bind_existing(&["/sitepod/does/not/exist"], "/home/alice");
        assert!(mounts.is_empty());
    }

    #[test]
    fn present_paths_are_bound_read_write() {
        let dir = std::env::temp_dir();
        let path = dir.to_string_lossy().into_owned();
        let mounts = bind_existing(&[&path], "/home/alice");
        assert_eq!(mounts.len(), 1);
        assert_eq!(mounts[0].source.as_deref(), Some(path.as_str()));
        assert_eq!(mounts[0].read_only, Some(false));
    }

    #[test]
    fn tilde_targets_relocate_to_container_home() {
        assert_eq!(
            target_for("~/.gitconfig", "/home/alice"),
            "/home/alice/.gitconfig"
        );
        assert_eq!(target_for("~/.ssh", "/home/alice"), "/home/alice/.ssh");
    }
}
