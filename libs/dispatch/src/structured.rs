use serde_json::Value;
use wai_core::{ClientResult, ListData, MessagingClient, SendResult};
use wai_translator::{DEFAULT_LIST_BUTTON_TEXT, normalize_sections};

use crate::client::{InteractiveClient, InteractiveOptions, first_non_empty};

/// Sends a structured [`ListData`] through [`InteractiveClient::send_list_message`].
///
/// Header is `opts.header` or `opts.title`, body is `opts.body` or `opts.caption`, and the list
/// button reads `list.title`, then `opts.button_text`, then "Select". Media options are not
/// forwarded.
pub async fn send_list_from_data<C>(
    client: &InteractiveClient<C>,
    jid: &str,
    list: ListData,
    quoted: Option<Value>,
    opts: InteractiveOptions,
) -> ClientResult<SendResult>
where
    C: MessagingClient + ?Sized,
{
    let sections = normalize_sections(list.sections);
    let button_text = first_non_empty(&list.title, &opts.button_text)
        .unwrap_or(DEFAULT_LIST_BUTTON_TEXT)
        .to_string();

    let mut forwarded = InteractiveOptions::default().button_text(button_text);
    forwarded.header = first_non_empty(&opts.header, &opts.title).map(str::to_string);
    forwarded.body = first_non_empty(&opts.body, &opts.caption).map(str::to_string);
    forwarded.footer = opts.footer;

    client
        .send_list_message(jid, &sections, quoted, forwarded)
        .await
}
