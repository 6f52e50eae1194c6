use tracing::debug;
use wai_core::{ClientResult, Header, MediaKind, MessagingClient, OutgoingContent};

/// Header inputs: optional title text and optional image / video URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSpec {
    pub title: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
}

impl HeaderSpec {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn video(mut self, url: impl Into<String>) -> Self {
        self.video = Some(url.into());
        self
    }

    pub fn from_content(content: &OutgoingContent) -> Self {
        Self {
            title: content.header.clone(),
            image: content.image.as_ref().map(|media| media.url().to_string()),
            video: content.video.as_ref().map(|media| media.url().to_string()),
        }
    }

    fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Resolves the header: video, then image (both uploaded through `client`), then text.
///
/// Upload failures are returned as reported by the client.
pub async fn resolve_header<C>(client: &C, spec: &HeaderSpec) -> ClientResult<Header>
where
    C: MessagingClient + ?Sized,
{
    if let Some(url) = non_empty(&spec.video) {
        debug!(target = "wai.translator.header", %url, "uploading video header");
        let media = client.upload_media(MediaKind::Video, url).await?;
        return Ok(Header::with_video(spec.title_text(), media));
    }
    if let Some(url) = non_empty(&spec.image) {
        debug!(target = "wai.translator.header", %url, "uploading image header");
        let media = client.upload_media(MediaKind::Image, url).await?;
        return Ok(Header::with_image(spec.title_text(), media));
    }
    Ok(Header::text(spec.title_text()))
}
