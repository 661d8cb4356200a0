use std::collections::HashMap;

pub const SITEPOD: &'static str = "dev.sitepod";
pub const ROLE: &'static str = "dev.sitepod.role";
pub const PROJECT: &'static str = "dev.sitepod.project";
const TRUE: &'static str = "true";

pub const ROLE_PREVIEW: &'static str = "preview";
pub const ROLE_IMAGE: &'static str = "image";

#[derive(Clone, Debug)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: &str, value: &str) -> Self {
        KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Labels {
    pub sitepod: KeyValue,
    pub role: Option<KeyValue>,
    pub project: Option<KeyValue>,
}

impl Labels {
    pub fn new(role: Option<&str>, project: Option<&str>) -> Labels {
        Labels {
            role: role.map(|v| KeyValue::new(ROLE, v)),
            project: project.map(|v| KeyValue::new(PROJECT, v)),
            ..Default::default()
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            sitepod: KeyValue::new(SITEPOD, TRUE),
            role: None,
            project: None,
        }
    }
}

impl<'a> From<&'a Labels> for HashMap<String, String> {
    fn from(value: &'a Labels) -> Self {
        let mut h = HashMap::new();
        h.insert(value.sitepod.key.clone(), value.sitepod.value.clone());
        if let Some(role) = &value.role {
            h.insert(role.key.clone(), role.value.clone());
        }
        if let Some(project) = &value.project {
            h.insert(project.key.clone(), project.value.clone());
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_label_always_present() {
        let map: HashMap<String, String> = (&Labels::default()).into();
        assert_eq!(map.get(SITEPOD).map(String::as_str), Some(TRUE));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn role_and_project_are_optional() {
        let labels = Labels::new(Some(ROLE_PREVIEW), Some("blog"));
        let map: HashMap<String, String> = (&labels).into();
        assert_eq!(map.get(ROLE).map(String::as_str), Some(ROLE_PREVIEW));
        assert_eq!(map.get(PROJECT).map(String::as_str), Some("blog"));
    }
}
