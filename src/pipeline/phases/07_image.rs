use crate::params::image::docker_config_candidates;
use crate::params::{ExtraDirectoryParameters, ParamError};
use crate::pipeline::context::PlanContext;
use crate::pipeline::phase_trait::PlanPhase;
use crate::pipeline::plan::ImagePlan;
use crate::project::ProjectInventory;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

fn is_executable_file(path: &Path) -> bool {
    path.is_absolute() && path.is_file()
}

pub struct ImagePhase;

impl PlanPhase for ImagePhase {
    fn name(&self) -> &'static str {
        "ImagePhase"
    }

    fn execute(&self, context: &mut PlanContext) -> Result<()> {
        let extension = &context.extension;
        let container = &extension.container;

        let base = match extension.from.source() {
            Ok(source) => Some(source),
            Err(ParamError::Missing { .. }) => None,
            Err(e) => return Err(e).context("Invalid base image"),
        };

        let credential_helpers = [&extension.from.cred_helper, &extension.to.cred_helper]
            .into_iter()
            .filter_map(|params| params.resolve_helper(is_executable_file))
            .collect();

        let project_dir = context.project.project_dir();
        let extra_directories = extension
            .extra_directories
            .paths
            .iter()
            .map(|dir| ExtraDirectoryParameters {
                from: dir.source_dir(project_dir),
                ..dir.clone()
            })
            .collect();

        let docker_config_files = docker_config_candidates(|name| std::env::var(name).ok())
            .into_iter()
            .map(|candidate| candidate.path)
            .collect();

        let image = ImagePlan {
            base,
            target: extension.to.image.clone(),
            tags: extension.to.tags.clone(),
            platforms: extension.from.platforms(),
            format: container.format,
            exposed_ports: container
                .exposed_ports()?
                .iter()
                .map(|port| port.to_string())
                .collect(),
            volumes: container.volumes.clone(),
            environment: container.environment.clone(),
            labels: container.labels.clone(),
            user: container.user.clone(),
            working_directory: container.working_directory.clone(),
            creation_time: container.creation_time_at(Utc::now())?,
            files_modification_time: container.modification_time()?,
            app_root: container.effective_app_root().to_string(),
            extra_directories,
            extra_directory_permissions: extension.extra_directories.permissions.clone(),
            offline: context.config.offline,
            allow_insecure_registries: extension.allow_insecure_registries,
            from_credential: extension.from.auth.credential().is_some(),
            to_credential: extension.to.auth.credential().is_some(),
            credential_helpers,
            docker_config_files,
            docker_executable: extension.docker_client.executable().to_path_buf(),
        };

        context.image = Some(image);
        Ok(())
    }
}
