use crate::model::types::AnyError;
use bollard::models::SystemVersion;

#[derive(Debug, Clone, PartialEq)]
pub enum ContainerEngine {
    Docker,
    Podman,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct ContainerBackend {
    pub engine: ContainerEngine,
    pub platform: String,
}

impl ContainerBackend {
    pub fn resolve(version: &SystemVersion) -> Result<Self, AnyError> {
        let platform = match (version.os.as_deref(), version.arch.as_deref()) {
            (Some(os), Some(arch)) => format!("{}/{}", os, arch),
            _ => "unknown".to_string(),
        };

        let engine = match &version.components {
            Some(components) if components.iter().any(|c| c.name == "Podman Engine") => {
                ContainerEngine::Podman
            }
            Some(components) if components.iter().any(|c| c.name == "Engine") => {
                ContainerEngine::Docker
            }
            _ => ContainerEngine::Unknown,
        };

        let backend = ContainerBackend { engine, platform };
        if let ContainerEngine::Unknown = backend.engine {
            log::debug!("{:?}", &version);
        }
        Ok(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::models::SystemVersionComponents;

    fn version(component: &str) -> SystemVersion {
        SystemVersion {
            os: Some("linux".into()),
            arch: Some("amd64".into()),
            components: Some(vec![SystemVersionComponents {
                name: component.into(),
                version: "1.0".into(),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn detects_podman() {
        let backend = ContainerBackend::resolve(&version("Podman Engine")).unwrap();
        assert_eq!(backend.engine, ContainerEngine::Podman);
        assert_eq!(backend.platform, "linux/amd64");
    }

    #[test]
    fn detects_docker() {
        let backend = ContainerBackend::resolve(&version("Engine")).unwrap();
        assert_eq!(backend.engine, ContainerEngine::Docker);
    }

    #[test]
    fn unknown_backend_is_tolerated() {
        let backend = ContainerBackend::resolve(&SystemVersion::default()).unwrap();
        assert_eq!(backend.engine, ContainerEngine::Unknown);
        assert_eq!(backend.platform, "unknown");
    }
}
