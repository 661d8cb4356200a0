use crate::model::types::AnyError;
use nix::unistd::{getgid, getuid, Group, User};

/// The invoking host user, read once at launch. The uid/gid end up in the
/// generated image account and as the container's runtime user so that files
/// written into the bind-mounted site are owned by the invoker on the host.
#[derive(Debug, Clone)]
pub struct HostIdentity {
    pub uid: u32,
    pub gid: u32,
    pub user: String,
    pub group: String,
}

impl HostIdentity {
    pub fn resolve() -> Result<Self, AnyError> {
        let uid = getuid();
        let gid = getgid();

        let user = User::from_uid(uid)?
            .ok_or_else(|| format!("No passwd entry for uid {}", uid))?;
        let group = Group::from_gid(gid)?
            .ok_or_else(|| format!("No group entry for gid {}", gid))?;

        Ok(HostIdentity {
            uid: uid.as_raw(),
            gid: gid.as_raw(),
            user: user.name,
            group: group.name,
        })
    }

    pub fn home_dir(&self) -> String {
        format!("/home/{}", &self.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_invoking_user() {
        let identity = HostIdentity::resolve().unwrap();
        assert_eq!(identity.uid, getuid().as_raw());
        assert_eq!(identity.gid, getgid().as_raw());
        assert!(!identity.user.is_empty());
        assert!(!identity.group.is_empty());
    }

    #[test]
    fn home_dir_follows_user_name() {
        let identity = HostIdentity {
            uid: 1000,
            gid: 1000,
            user: "alice".into(),
            group: "alice".into(),
        };
        assert_eq!(identity.home_dir(), "/home/alice");
    }
}
