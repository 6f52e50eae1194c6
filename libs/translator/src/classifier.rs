//! Content classification: decides which biz metadata node a relayed message carries.

use wai_core::{ContentType, Node, WaMessage, get_content_type, normalize_message_content};

/// Maps a resolved content type to its metadata node.
///
/// Interactive and buttons content get the native-flow fragment, lists get the product-list
/// fragment, anything else gets nothing.
///
/// ```
/// use wai_core::ContentType;
/// use wai_translator::classify;
///
/// let node = classify(Some(&ContentType::List)).unwrap();
/// assert_eq!(node.tag, "biz");
/// assert!(classify(Some(&ContentType::Conversation)).is_none());
/// assert!(classify(None).is_none());
/// ```
pub fn classify(content_type: Option<&ContentType>) -> Option<Node> {
    match content_type? {
        ContentType::Interactive | ContentType::Buttons => Some(native_flow_node()),
        ContentType::List => Some(product_list_node()),
        ContentType::Conversation | ContentType::Other(_) => None,
    }
}

/// Normalises `message`, resolves its type with the default resolver and classifies it.
pub fn classify_message(message: &WaMessage) -> Option<Node> {
    let normalized = normalize_message_content(message);
    classify(get_content_type(&normalized).as_ref())
}

pub fn native_flow_node() -> Node {
    Node::new("biz").child(
        Node::new("interactive")
            .attr("type", "native_flow")
            .attr("v", "1")
            .child(
                Node::new("native_flow")
                    .attr("v", "9")
                    .attr("name", "mixed"),
            ),
    )
}

pub fn product_list_node() -> Node {
    Node::new("biz").child(
        Node::new("list")
            .attr("type", "product_list")
            .attr("v", "2"),
    )
}

/// Marker appended for one-to-one recipients.
pub fn bot_marker_node() -> Node {
    Node::new("bot").attr("biz_bot", "1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wai_core::InteractiveMessage;

    #[test]
    fn interactive_and_buttons_share_native_flow_fragment() {
        let expected = json!({
            "tag": "biz",
            "attrs": {},
            "content": [{
                "tag": "interactive",
                "attrs": { "type": "native_flow", "v": "1" },
                "content": [{
                    "tag": "native_flow",
                    "attrs": { "v": "9", "name": "mixed" }
                }]
            }]
        });
        for content_type in [ContentType::Interactive, ContentType::Buttons] {
            let node = classify(Some(&content_type)).expect("native flow node");
            assert_eq!(serde_json::to_value(&node).unwrap(), expected);
        }
    }

    #[test]
    fn list_gets_product_list_fragment() {
        let node = classify(Some(&ContentType::List)).unwrap();
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "tag": "biz",
                "attrs": {},
                "content": [{ "tag": "list", "attrs": { "type": "product_list", "v": "2" } }]
            })
        );
    }

    #[test]
    fn other_types_get_nothing() {
        assert!(classify(Some(&ContentType::Conversation)).is_none());
        assert!(classify(Some(&ContentType::Other("imageMessage".into()))).is_none());
    }

    #[test]
    fn wrapped_interactive_message_is_classified() {
        let message = WaMessage::view_once(WaMessage::interactive(InteractiveMessage::default()));
        let node = classify_message(&message).expect("node");
        assert!(node.find("native_flow").is_some());
        assert!(classify_message(&WaMessage::conversation("hi")).is_none());
    }
}
