/// Labels attached to every metric sample recorded by the helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryLabels {
    pub kind: String,
    pub jid: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl TelemetryLabels {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            jid: None,
            extra: Vec::new(),
        }
    }

    pub fn with_jid(mut self, jid: impl Into<String>) -> Self {
        self.jid = Some(jid.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Flattens the labels into key/value tags; only the chat scope of the jid is kept.
    pub fn tags(&self) -> Vec<(String, String)> {
        let mut tags = Vec::with_capacity(2 + self.extra.len());
        tags.push(("kind".into(), self.kind.clone()));
        if let Some(jid) = &self.jid {
            tags.push(("chat_scope".into(), chat_scope(jid).to_string()));
        }
        for (key, value) in &self.extra {
            tags.push((key.clone(), value.clone()));
        }
        tags
    }
}

fn chat_scope(jid: &str) -> &str {
    if jid.ends_with("@g.us") { "group" } else { "direct" }
}
