use crate::{api::ImageApi, model::types::AnyError, util::labels, util::tar};
use bollard::errors::Error;
use bollard::errors::Error::DockerResponseServerError;
use bollard::models::{BuildInfo, CreateImageInfo};
use bollard::query_parameters::{BuildImageOptionsBuilder, CreateImageOptions};
use bollard::service::ImageInspect;
use futures::StreamExt;
use std::{
    io::{stdout, Write},
    path::PathBuf,
};

impl<'a> ImageApi<'a> {
    async fn pull(&self, image: &str) -> Result<Option<String>, AnyError> {
        println!("Pulling image: {}", &image);
        let img_chunks = &image.split(':').collect::<Vec<&str>>();
        let mut image_info = self.client.create_image(
            Some(CreateImageOptions {
                from_image: Some(img_chunks[0].to_string()),
                tag: Some(
                    match img_chunks.len() {
                        2 => img_chunks[1],
                        _ => "latest",
                    }
                    .to_string(),
                ),
                ..Default::default()
            }),
            None,
            None,
        );

        while let Some(l) = image_info.next().await {
            match l {
                Ok(CreateImageInfo {
                    id,
                    status: Some(m),
                    progress: p,
                    ..
                }) => {
                    if let Some(id) = id {
                        stdout().write_all(&id.as_bytes())?;
                    } else {
                        println!("");
                    }
                    print!(" ");
                    stdout().write_all(&m.as_bytes())?;
                    print!(" ");
                    if let Some(x) = p {
                        stdout().write_all(&x.as_bytes())?;
                    };
                    print!("\r");
                }
                Ok(_) => (),
                Err(Error::DockerStreamError { error }) => eprintln!("{}", error),
                Err(e) => return Err(e.into()),
            };
        }
        println!("");
        Ok(self.client.inspect_image(&image).await?.id)
    }

    pub async fn ensure(&self, image: &str, always_pull: bool) -> Result<String, AnyError> {
        log::debug!("Ensuring image: {}", &image);

        let image_id = match self.client.inspect_image(&image).await {
            Ok(ImageInspect { id, .. }) => {
                if always_pull {
                    self.pull(image).await?
                } else {
                    id
                }
            }
            Err(DockerResponseServerError {
                status_code: 404, ..
            }) => self.pull(image).await?,
            Err(e) => return Err(e.into()),
        };

        log::debug!("Image ID: {:?}", image_id);
        image_id.ok_or_else(|| format!("No id reported for image: {}", image).into())
    }

    /// Builds the preview image from the in-memory descriptor and context
    /// files. Layer caching is the daemon's; an unchanged descriptor makes
    /// the rebuild a cheap no-op.
    pub async fn build(
        &self,
        tag: &str,
        files: Vec<(PathBuf, Vec<u8>)>,
        no_cache: bool,
    ) -> Result<String, AnyError> {
        println!("Building image: {}", tag);

        let image_labels = [
            (labels::SITEPOD, "true".to_owned()),
            (labels::ROLE, labels::ROLE_IMAGE.to_owned()),
        ];
        let options = BuildImageOptionsBuilder::new()
            .t(tag)
            .nocache(no_cache)
            .labels(&image_labels.into())
            .build();

        let context = tar::build_context(files);
        let mut build_stream =
            self.client
                .build_image(options, None, Some(bollard::body_try_stream(context)));

        let mut image_id = None;
        while let Some(l) = build_stream.next().await {
            match l {
                Ok(BuildInfo {
                    aux,
                    stream,
                    error_detail,
                    ..
                }) => {
                    if let Some(id) = aux.and_then(|a| a.id) {
                        image_id = Some(id);
                    }
                    if let Some(s) = stream {
                        print!("{}", s);
                        stdout().flush()?;
                    }
                    if let Some(message) = error_detail.and_then(|e| e.message) {
                        return Err(message.into());
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        log::debug!("Image ID: {:?}", image_id);
        image_id.ok_or_else(|| format!("Build produced no image for tag: {}", tag).into())
    }
}
