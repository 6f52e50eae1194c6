//! Selection-list sections and the `single_select` entry wrapping them.

use serde_json::json;
use wai_core::{NativeFlowButton, RowSpec, SINGLE_SELECT, Section, SectionSpec};

pub const DEFAULT_LIST_BUTTON_TEXT: &str = "Select";

/// Builds a section, filling row defaults (`header`/`description` empty, `id` = title).
///
/// ```
/// use wai_core::RowSpec;
/// use wai_translator::create_section;
///
/// let section = create_section("Drinks", ["Tea", "Coffee"]);
/// assert_eq!(section.rows[1].id, "Coffee");
///
/// let section = create_section("Food", [RowSpec::new("Soup").with_id("soup-1")]);
/// assert_eq!(section.rows[0].id, "soup-1");
/// ```
pub fn create_section<R>(title: impl Into<String>, rows: impl IntoIterator<Item = R>) -> Section
where
    R: Into<RowSpec>,
{
    Section::from(SectionSpec {
        title: title.into(),
        rows: rows.into_iter().map(Into::into).collect(),
    })
}

pub fn normalize_sections(sections: impl IntoIterator<Item = SectionSpec>) -> Vec<Section> {
    sections.into_iter().map(Section::from).collect()
}

/// Wraps sections into one `single_select` entry; an empty button text becomes "Select".
pub fn list_button(button_text: &str, sections: &[Section]) -> NativeFlowButton {
    let title = if button_text.is_empty() {
        DEFAULT_LIST_BUTTON_TEXT
    } else {
        button_text
    };
    NativeFlowButton::new(
        SINGLE_SELECT,
        json!({
            "title": title,
            "sections": sections,
        }),
    )
}
