use crate::{
    api::PreviewApi,
    constants,
    model::identity::HostIdentity,
    model::mount,
    model::types::{AnyError, PreviewSpec, RunSpec},
    template::{self, ImageAccount},
    util::labels::{self, Labels},
};
use colored::Colorize;
use std::{fs, path::PathBuf, time::Duration};

impl<'a> PreviewApi<'a> {
    /// The whole launcher: derive the image descriptor from the host
    /// identity, build the image, then serve the site in the foreground
    /// until the server exits or the invoker interrupts.
    pub async fn preview(&self, spec: &PreviewSpec<'_>) -> Result<i64, AnyError> {
        let identity = HostIdentity::resolve()?;
        log::debug!("Host identity: {:?}", &identity);

        let base_path = spec.dir.join(constants::BASE_DESCRIPTOR);
        let base = fs::read_to_string(&base_path)?;

        let account = ImageAccount::new(&identity, spec.port);
        let descriptor = template::render_descriptor(&base, &account)?;

        if spec.pull {
            match template::base_image(&base) {
                Some(image) => {
                    self.api.image.ensure(&image, true).await?;
                }
                None => log::debug!("No FROM instruction in {}", base_path.display()),
            }
        }

        let mut files = vec![(
            PathBuf::from(constants::BASE_DESCRIPTOR),
            descriptor.into_bytes(),
        )];
        for name in constants::GEM_FILES {
            let path = spec.dir.join(name);
            if path.exists() {
                files.push((PathBuf::from(name), fs::read(&path)?));
            }
        }

        self.api
            .image
            .build(constants::IMAGE_TAG, files, spec.no_cache)
            .await?;

        let project = spec
            .dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "site".to_string());

        let mut mounts = vec![mount::site_mount(spec.dir)];
        mounts.extend(mount::credential_mounts(&identity.home_dir()));

        let container_id = self
            .api
            .container
            .create(RunSpec {
                reason: "preview",
                image: constants::IMAGE_TAG,
                uid: identity.uid,
                container_name: constants::CONTAINER_NAME,
                work_dir: constants::SITE_DIR,
                port: spec.port,
                mounts,
                command: template::serve_command(spec.port),
                labels: Labels::new(Some(labels::ROLE_PREVIEW), Some(&project)),
            })
            .await?;

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<()>();
        ctrlc::set_handler(move || {
            tx.send(()).ok();
        })?;

        let log_task = self.api.container.stream_output(&container_id).await?;
        self.api.container.start(&container_id).await?;

        println!(
            "Serving site at {} ... {}",
            format!("http://{}:{}", constants::HOST_IP, spec.port).bold(),
            "OK".green()
        );

        let exit_code = tokio::select! {
            _ = rx.recv() => {
                println!("\nStopping: {}", constants::CONTAINER_NAME);
                self.api.container.stop(&container_id).await?;
                0
            }
            status = self.api.container.wait(&container_id) => status?,
        };

        let _ = tokio::time::timeout(Duration::from_secs(2), log_task).await;
        Ok(exit_code)
    }
}
