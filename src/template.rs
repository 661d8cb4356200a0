use crate::{constants, model::identity::HostIdentity, model::types::AnyError};
use handlebars::{no_escape, Handlebars};
use serde::Serialize;

/// The account stage appended to the base descriptor. The account mirrors the
/// invoking host user so that anything the server writes into the mounted
/// site tree stays owned by the invoker.
const ACCOUNT_STAGE: &'static str = r#"
RUN groupadd -g {{gid}} {{group}} \
    && useradd -m -l -u {{uid}} -g {{gid}} -s /bin/sh {{user}}

ENV HOME=/home/{{user}}
WORKDIR {{site_dir}}
USER {{uid}}:{{gid}}

EXPOSE {{port}}
CMD ["bundle", "exec", "jekyll", "serve", "--host", "0.0.0.0", "--baseurl", ""]
"#;

#[derive(Serialize, Debug, Clone)]
pub struct ImageAccount {
    pub user: String,
    pub group: String,
    pub uid: u32,
    pub gid: u32,
    pub site_dir: String,
    pub port: u16,
}

impl ImageAccount {
    pub fn new(identity: &HostIdentity, port: u16) -> Self {
        ImageAccount {
            user: identity.user.clone(),
            group: identity.group.clone(),
            uid: identity.uid,
            gid: identity.gid,
            site_dir: constants::SITE_DIR.into(),
            port,
        }
    }
}

pub fn render_descriptor(base: &str, account: &ImageAccount) -> Result<String, AnyError> {
    let mut reg = Handlebars::new();
    reg.register_escape_fn(no_escape);
    reg.set_strict_mode(true);

    let stage = reg.render_template(ACCOUNT_STAGE, account)?;
    Ok(format!("{}\n{}", base.trim_end(), stage))
}

/// The image reference of the descriptor's first FROM instruction.
pub fn base_image(descriptor: &str) -> Option<String> {
    for line in descriptor.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        if !tokens
            .next()
            .map(|t| t.eq_ignore_ascii_case("from"))
            .unwrap_or(false)
        {
            continue;
        }
        return tokens.find(|t| !t.starts_with("--")).map(|t| t.to_string());
    }
    None
}

pub fn serve_command(port: u16) -> Vec<String> {
    vec![
        "bundle".into(),
        "exec".into(),
        "jekyll".into(),
        "serve".into(),
        "--host".into(),
        "0.0.0.0".into(),
        "--baseurl".into(),
        "".into(),
        "--port".into(),
        port.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> ImageAccount {
        ImageAccount {
            user: "alice".into(),
            group: "alice".into(),
            uid: 1000,
            gid: 1000,
            site_dir: constants::SITE_DIR.into(),
            port: constants::DEFAULT_PORT,
        }
    }

    #[test]
    fn account_stage_binds_host_identity() {
        let rendered = render_descriptor("FROM ruby:3.2", &alice()).unwrap();
        assert!(rendered.starts_with("FROM ruby:3.2\n"));
        assert!(rendered.contains("groupadd -g 1000 alice"));
        assert!(rendered.contains("useradd -m -l -u 1000 -g 1000 -s /bin/sh alice"));
        assert!(rendered.contains("USER 1000:1000"));
        assert!(rendered.contains(&format!("WORKDIR {}", constants::SITE_DIR)));
    }

    #[test]
    fn rendering_is_deterministic() {
        let base = "FROM ruby:3.2\nRUN gem install bundler";
        let first = render_descriptor(base, &alice()).unwrap();
        let second = render_descriptor(base, &alice()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn serve_binds_all_interfaces_with_empty_base_path() {
        let cmd = serve_command(5001);
        assert!(cmd.windows(2).any(|w| w == ["--host", "0.0.0.0"]));
        assert!(cmd.windows(2).any(|w| w == ["--baseurl", ""]));
        assert!(cmd.windows(2).any(|w| w == ["--port", "5001"]));
    }

    #[test]
    fn base_image_from_first_from_line() {
        assert_eq!(
            base_image("# preview image\n\nFROM ruby:3.2-slim\nRUN true"),
            Some("ruby:3.2-slim".to_string())
        );
    }

    #[test]
    fn base_image_skips_platform_flag_and_alias() {
        assert_eq!(
            base_image("FROM --platform=linux/amd64 ruby:3.2 AS site"),
            Some("ruby:3.2".to_string())
        );
    }

    #[test]
    fn base_image_none_without_from() {
        assert_eq!(base_image("# empty descriptor\n"), None);
    }
}
