use std::time::Duration;

use wai_core::Presence;

use crate::error::DispatchError;

/// Pause between the presence update and the relay of an interactive message.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(300);

/// When the `bot` marker node is appended for one-to-one recipients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotMarkerPolicy {
    /// Every relay to a one-to-one chat.
    #[default]
    Always,
    /// Only relays that also received a biz node.
    WithBizNode,
    Never,
}

impl BotMarkerPolicy {
    pub fn applies(&self, biz_node_attached: bool) -> bool {
        match self {
            BotMarkerPolicy::Always => true,
            BotMarkerPolicy::WithBizNode => biz_node_attached,
            BotMarkerPolicy::Never => false,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "always" => Some(BotMarkerPolicy::Always),
            "interactive" | "with_biz_node" => Some(BotMarkerPolicy::WithBizNode),
            "never" | "off" => Some(BotMarkerPolicy::Never),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    pub typing_delay: Duration,
    pub presence: Presence,
    pub bot_marker: BotMarkerPolicy,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            typing_delay: DEFAULT_TYPING_DELAY,
            presence: Presence::Composing,
            bot_marker: BotMarkerPolicy::default(),
        }
    }
}

impl DispatchConfig {
    pub fn from_env() -> Result<Self, DispatchError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `WAI_TYPING_DELAY_MS`, `WAI_PRESENCE` and `WAI_BOT_MARKER`; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DispatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = lookup("WAI_TYPING_DELAY_MS") {
            let ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("WAI_TYPING_DELAY_MS", &raw))?;
            cfg.typing_delay = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup("WAI_PRESENCE") {
            cfg.presence = raw.parse().map_err(|_| invalid("WAI_PRESENCE", &raw))?;
        }
        if let Some(raw) = lookup("WAI_BOT_MARKER") {
            cfg.bot_marker =
                BotMarkerPolicy::parse(&raw).ok_or_else(|| invalid("WAI_BOT_MARKER", &raw))?;
        }
        Ok(cfg)
    }

    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    pub fn with_presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    pub fn with_bot_marker(mut self, policy: BotMarkerPolicy) -> Self {
        self.bot_marker = policy;
        self
    }
}

fn invalid(key: &'static str, value: &str) -> DispatchError {
    DispatchError::InvalidConfig {
        key,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = DispatchConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, DispatchConfig::default());
        assert_eq!(cfg.typing_delay, Duration::from_millis(300));
        assert_eq!(cfg.presence, Presence::Composing);
        assert_eq!(cfg.bot_marker, BotMarkerPolicy::Always);
    }

    #[test]
    fn parses_overrides() {
        let cfg = DispatchConfig::from_lookup(lookup(&[
            ("WAI_TYPING_DELAY_MS", "0"),
            ("WAI_PRESENCE", "recording"),
            ("WAI_BOT_MARKER", "interactive"),
        ]))
        .unwrap();
        assert_eq!(cfg.typing_delay, Duration::ZERO);
        assert_eq!(cfg.presence, Presence::Recording);
        assert_eq!(cfg.bot_marker, BotMarkerPolicy::WithBizNode);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = DispatchConfig::from_lookup(lookup(&[("WAI_TYPING_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::InvalidConfig { key: "WAI_TYPING_DELAY_MS", .. }
        ));
        assert!(DispatchConfig::from_lookup(lookup(&[("WAI_BOT_MARKER", "maybe")])).is_err());
        assert!(DispatchConfig::from_lookup(lookup(&[("WAI_PRESENCE", "typing")])).is_err());
    }

    #[test]
    fn bot_marker_policy() {
        assert!(BotMarkerPolicy::Always.applies(false));
        assert!(BotMarkerPolicy::WithBizNode.applies(true));
        assert!(!BotMarkerPolicy::WithBizNode.applies(false));
        assert!(!BotMarkerPolicy::Never.applies(true));
    }
}
