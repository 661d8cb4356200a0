use std::path::PathBuf;
use tokio_util::io::ReaderStream;

/// Packs the given files into a tar archive streamed through a duplex pipe,
/// in the shape the daemon's build endpoint expects.
pub fn build_context(files: Vec<(PathBuf, Vec<u8>)>) -> ReaderStream<tokio::io::DuplexStream> {
    let (tar_writer, tar_reader) = tokio::io::duplex(8192);
    tokio::spawn(async move {
        let mut tar = tokio_tar::Builder::new(tar_writer);
        for (path, content) in files {
            let mut header = tokio_tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            tar.append_data(&mut header, &path, content.as_slice())
                .await?;
        }
        tar.finish().await
    });

    ReaderStream::new(tar_reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn context_is_a_readable_tar_archive() {
        let files = vec![(PathBuf::from("Dockerfile"), b"FROM ruby:3.2\n".to_vec())];
        let mut stream = build_context(files);

        let mut bytes = Vec::new();
        while let Some(chunk) = stream.next().await {
            bytes.extend_from_slice(&chunk.unwrap());
        }

        // ustar magic at offset 257 of the first header block
        assert!(bytes.len() >= 512);
        assert_eq!(&bytes[257..262], b"ustar");
        assert!(bytes[..100].starts_with(b"Dockerfile"));
    }
}
