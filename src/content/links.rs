// Links back into the host's content editor

use crate::content::types::ContentItem;
use url::{ParseError, Url};

const CONTENT_EDITOR_PATH: &str = "/sitecore/shell/Applications/Content Editor";

/// Content editor URL for `item`, rooted at `base_url` (scheme and host,
/// e.g. `https://cms.example.com`). Any path on the base is replaced.
pub fn content_editor_url(item: &ContentItem, base_url: &str) -> Result<Url, ParseError> {
    let mut url = Url::parse(base_url)?;
    if url.cannot_be_a_base() {
        return Err(ParseError::RelativeUrlWithCannotBeABaseBase);
    }

    let id = item.id.to_string();
    url.set_path(CONTENT_EDITOR_PATH);
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .append_pair("id", &id)
        .append_pair("sc_content", item.repository.as_deref().unwrap_or("master"))
        .append_pair("fo", &id)
        .append_pair("vs", &item.version.to_string())
        .append_pair("la", &item.language);
    Ok(url)
}
