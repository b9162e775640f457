use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DmarcTag {
    Version,
    Policy,
    Tag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DmarcTagToken {
    pub value: String,
    pub tag: DmarcTag,
}

impl DmarcTagToken {
    pub fn classify(segment: &str) -> Self {
        let tag = if segment.starts_with("v=") {
            DmarcTag::Version
        } else if segment.starts_with("p=") {
            DmarcTag::Policy
        } else {
            DmarcTag::Tag
        };

        Self {
            value: segment.to_string(),
            tag,
        }
    }

    pub fn key(&self) -> &str {
        self.value
            .split_once('=')
            .map_or(self.value.as_str(), |(k, _)| k)
            .trim()
    }

    pub fn tag_value(&self) -> Option<&str> {
        self.value.split_once('=').map(|(_, v)| v.trim())
    }
}
