use crate::{
    api::ContainerApi,
    constants,
    model::types::{AnyError, RunSpec},
    util::backend::ContainerEngine,
};
use bollard::errors::Error;
use bollard::models::{ContainerCreateBody, ContainerWaitResponse, HostConfig, PortBinding};
use bollard::query_parameters::{AttachContainerOptionsBuilder, CreateContainerOptionsBuilder};
use futures::StreamExt;
use std::{
    collections::HashMap,
    io::{stdout, Write},
};

impl<'a> ContainerApi<'a> {
    /// Creates the preview container. Name or port conflicts and missing
    /// images come back as the daemon's own errors, untranslated.
    pub async fn create(&self, spec: RunSpec<'_>) -> Result<String, AnyError> {
        log::debug!(
            "[{}]: CREATE CONTAINER - name: {}, uid: {}, image: {}, port: {}",
            spec.reason,
            spec.container_name,
            spec.uid,
            spec.image,
            spec.port
        );

        let options = CreateContainerOptionsBuilder::new()
            .name(spec.container_name)
            .build();

        let oom_score_adj = match self.backend.engine {
            ContainerEngine::Podman => Some(100),
            _ => None,
        };

        let mut port_bindings = HashMap::new();
        port_bindings.insert(
            format!("{}/tcp", spec.port),
            Some(vec![PortBinding {
                host_ip: Some(constants::HOST_IP.to_string()),
                host_port: Some(spec.port.to_string()),
            }]),
        );

        let host_config = HostConfig {
            auto_remove: Some(true),
            mounts: Some(spec.mounts),
            port_bindings: Some(port_bindings),
            oom_score_adj,
            init: Some(true),
            ..Default::default()
        };

        let body = ContainerCreateBody {
            image: Some(spec.image.to_string()),
            cmd: Some(spec.command),
            working_dir: Some(spec.work_dir.to_string()),
            // THIS MUST BE the numeric uid, NOT the user name - otherwise file ownership will break
            user: Some(spec.uid.to_string()),
            attach_stdout: Some(true),
            attach_stderr: Some(true),
            labels: Some((&spec.labels).into()),
            host_config: Some(host_config),
            ..Default::default()
        };

        let response = self.client.create_container(Some(options), body).await?;
        log::debug!(
            "Created container: {} ({})",
            spec.container_name,
            response.id
        );
        Ok(response.id)
    }

    pub async fn start(&self, container_id: &str) -> Result<(), AnyError> {
        self.client
            .start_container(
                container_id,
                None::<bollard::query_parameters::StartContainerOptions>,
            )
            .await?;
        Ok(())
    }

    pub async fn stop(&self, container_id: &str) -> Result<(), AnyError> {
        self.client
            .stop_container(
                container_id,
                None::<bollard::query_parameters::StopContainerOptions>,
            )
            .await?;
        Ok(())
    }

    /// Attaches to the container and forwards its stdout/stderr to the
    /// invoker's terminal until the stream closes.
    pub async fn stream_output(
        &self,
        container_id: &str,
    ) -> Result<tokio::task::JoinHandle<()>, AnyError> {
        let options = AttachContainerOptionsBuilder::new()
            .stream(true)
            .stdout(true)
            .stderr(true)
            .logs(true)
            .build();

        let results = self
            .client
            .attach_container(container_id, Some(options))
            .await?;
        let mut output = results.output;

        Ok(tokio::spawn(async move {
            let mut out = stdout();
            while let Some(l) = output.next().await {
                match l {
                    Ok(chunk) => {
                        out.write_all(chunk.into_bytes().as_ref()).ok();
                        out.flush().ok();
                    }
                    Err(e) => {
                        log::debug!("Output stream closed: {}", e);
                        break;
                    }
                }
            }
        }))
    }

    /// Blocks until the container exits and reports its status code.
    pub async fn wait(&self, container_id: &str) -> Result<i64, AnyError> {
        let mut exit_code_stream = self.client.wait_container(
            container_id,
            None::<bollard::query_parameters::WaitContainerOptions>,
        );

        match exit_code_stream.next().await {
            Some(Ok(ContainerWaitResponse { status_code, .. })) => Ok(status_code),
            Some(Err(Error::DockerContainerWaitError { code, .. })) => Ok(code),
            Some(Err(e)) => Err(e.into()),
            None => Ok(0),
        }
    }
}
