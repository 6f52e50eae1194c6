use serde_json::Value;
use wai_core::{NativeFlowButton, Node, RelayOptions, WaMessage, normalize_message_content};

/// Native-flow entries of a (possibly view-once wrapped) interactive message.
pub fn native_flow_buttons(message: &WaMessage) -> Vec<NativeFlowButton> {
    normalize_message_content(message)
        .interactive_message
        .map(|interactive| interactive.native_flow_message.buttons)
        .unwrap_or_default()
}

/// `(name, decoded buttonParamsJson)` for every native-flow entry; panics on invalid JSON.
pub fn decoded_buttons(message: &WaMessage) -> Vec<(String, Value)> {
    native_flow_buttons(message)
        .into_iter()
        .map(|button| {
            let params = button.params().unwrap_or_else(|err| {
                panic!(
                    "button `{}` carries invalid params json `{}`: {err}",
                    button.name, button.button_params_json
                )
            });
            (button.name, params)
        })
        .collect()
}

/// Asserts that the relay options carry a top-level node with `tag`.
pub fn assert_has_node(opts: &RelayOptions, tag: &str) {
    assert!(
        has_node(opts, tag),
        "expected relay options to carry a `{}` node, got: {:?}",
        tag,
        opts.nodes().iter().map(|n| n.tag.as_str()).collect::<Vec<_>>()
    );
}

pub fn has_node(opts: &RelayOptions, tag: &str) -> bool {
    opts.nodes().iter().any(|node: &Node| node.tag == tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wai_core::{InteractiveMessage, Node};

    #[test]
    fn decodes_wrapped_buttons() {
        let mut interactive = InteractiveMessage::default();
        interactive
            .native_flow_message
            .buttons
            .push(NativeFlowButton::new("quick_reply", json!({ "id": "a" })));
        let message = WaMessage::view_once(WaMessage::interactive(interactive));
        assert_eq!(
            decoded_buttons(&message),
            vec![("quick_reply".to_string(), json!({ "id": "a" }))]
        );
    }

    #[test]
    fn node_lookup() {
        let mut opts = RelayOptions::default();
        opts.push_node(Node::new("biz"));
        assert_has_node(&opts, "biz");
        assert!(!has_node(&opts, "bot"));
    }
}
