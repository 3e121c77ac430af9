//! Docker-backed [`ContainerRuntime`] implementation over bollard.

use std::collections::HashMap;

use bollard::errors::Error as DockerError;
use bollard::models::{
    ContainerCreateBody, ContainerInspectResponse, HostConfig, PortBinding, VolumeCreateOptions,
};
use bollard::query_parameters::{
    AttachContainerOptionsBuilder, CreateContainerOptionsBuilder, CreateImageOptionsBuilder,
};
use bollard::Docker;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use tracing::debug;

use crate::runtime::{ContainerRuntime, ContainerSpec, ContainerState, LogChunk, PullProgress};
use crate::{AppError, Result};

/// Docker Engine client wrapper.
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connect to the local Docker daemon using platform defaults
    /// (Unix socket or named pipe).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Runtime` when no daemon endpoint is available.
    pub fn connect() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults()?;
        Ok(Self { docker })
    }

    async fn inspect(&self, name: &str) -> Result<Option<ContainerInspectResponse>> {
        match self
            .docker
            .inspect_container(name, None::<bollard::query_parameters::InspectContainerOptions>)
            .await
        {
            Ok(details) => Ok(Some(details)),
            Err(DockerError::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl ContainerRuntime for DockerRuntime {
    async fn ping(&self) -> Result<()> {
        self.docker.ping().await?;
        Ok(())
    }

    async fn list_volume_names(&self) -> Result<Vec<String>> {
        let listing = self
            .docker
            .list_volumes(None::<bollard::query_parameters::ListVolumesOptions>)
            .await?;
        Ok(listing
            .volumes
            .unwrap_or_default()
            .into_iter()
            .map(|volume| volume.name)
            .collect())
    }

    async fn create_volume(&self, name: &str) -> Result<()> {
        self.docker
            .create_volume(VolumeCreateOptions {
                name: Some(name.to_owned()),
                ..Default::default()
            })
            .await?;
        Ok(())
    }

    async fn container_state(&self, name: &str) -> Result<Option<ContainerState>> {
        let Some(details) = self.inspect(name).await? else {
            return Ok(None);
        };
        let running = details
            .state
            .and_then(|state| state.running)
            .unwrap_or(false);
        Ok(Some(if running {
            ContainerState::Running
        } else {
            ContainerState::Stopped
        }))
    }

    async fn create_container(&self, spec: &ContainerSpec) -> Result<()> {
        let publication = format!("{}/tcp", spec.container_port);

        let mut port_bindings = HashMap::new();
        port_bindings.insert(
            publication.clone(),
            Some(vec![PortBinding {
                host_ip: None,
                host_port: Some(spec.host_port.to_string()),
            }]),
        );

        let mut exposed_ports = HashMap::new();
        exposed_ports.insert(publication, HashMap::new());

        let body = ContainerCreateBody {
            image: Some(spec.image.clone()),
            env: Some(spec.env.clone()),
            exposed_ports: Some(exposed_ports),
            host_config: Some(HostConfig {
                binds: Some(spec.binds.clone()),
                port_bindings: Some(port_bindings),
                ..Default::default()
            }),
            ..Default::default()
        };

        let options = CreateContainerOptionsBuilder::default()
            .name(&spec.name)
            .build();

        let created = self.docker.create_container(Some(options), body).await?;
        debug!(container_id = %created.id, "container created");
        Ok(())
    }

    async fn start_container(&self, name: &str) -> Result<()> {
        self.docker
            .start_container(name, None::<bollard::query_parameters::StartContainerOptions>)
            .await?;
        Ok(())
    }

    async fn stop_container(&self, name: &str) -> Result<()> {
        self.docker
            .stop_container(name, None::<bollard::query_parameters::StopContainerOptions>)
            .await?;
        Ok(())
    }

    async fn restart_container(&self, name: &str) -> Result<()> {
        self.docker
            .restart_container(
                name,
                None::<bollard::query_parameters::RestartContainerOptions>,
            )
            .await?;
        Ok(())
    }

    async fn remove_container(&self, name: &str) -> Result<()> {
        self.docker
            .remove_container(
                name,
                None::<bollard::query_parameters::RemoveContainerOptions>,
            )
            .await?;
        Ok(())
    }

    async fn has_local_image(&self, reference: &str) -> Result<bool> {
        let images = self
            .docker
            .list_images(None::<bollard::query_parameters::ListImagesOptions>)
            .await?;
        let (repo, tag) = crate::config::split_image_tag(reference);
        Ok(images.iter().any(|image| {
            image.repo_tags.iter().any(|repo_tag| match tag {
                // Tagged reference: only the exact repo:tag counts.
                Some(_) => repo_tag == reference,
                // Bare reference: any tag of the repository counts.
                None => crate::config::split_image_tag(repo_tag).0 == repo,
            })
        }))
    }

    async fn pull_image(&self, reference: &str) -> Result<BoxStream<'static, Result<PullProgress>>> {
        let options = CreateImageOptionsBuilder::default()
            .from_image(reference)
            .build();

        let stream = self
            .docker
            .create_image(Some(options), None, None)
            .map(|message| match message {
                Ok(info) => Ok(PullProgress {
                    layer_id: info.id,
                    status: info.status.unwrap_or_default(),
                    progress: info.progress.unwrap_or_default(),
                    error: info.error,
                }),
                Err(err) => Err(AppError::from(err)),
            })
            .boxed();

        Ok(stream)
    }

    async fn attach(&self, name: &str) -> Result<BoxStream<'static, Result<LogChunk>>> {
        let options = AttachContainerOptionsBuilder::default()
            .stream(true)
            .stdout(true)
            .stderr(true)
            .build();

        let results = self.docker.attach_container(name, Some(options)).await?;

        let stream = results
            .output
            .filter_map(|item| async move {
                match item {
                    Ok(bollard::container::LogOutput::StdOut { message })
                    | Ok(bollard::container::LogOutput::Console { message }) => {
                        Some(Ok(LogChunk::Stdout(message)))
                    }
                    Ok(bollard::container::LogOutput::StdErr { message }) => {
                        Some(Ok(LogChunk::Stderr(message)))
                    }
                    Ok(bollard::container::LogOutput::StdIn { .. }) => None,
                    Err(err) => Some(Err(AppError::from(err))),
                }
            })
            .boxed();

        Ok(stream)
    }
}
