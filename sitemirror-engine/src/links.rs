use crate::dom::{Document, attr_name};
use crate::target::MirrorTarget;
use tracing::debug;
use url::Url;

/// What following a link means for crawl depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Navigable hyperlink; followed at depth + 1.
    Page,
    /// Sub-asset (stylesheet, script, image); followed at the same depth.
    Resource,
}

/// Same-host links found in one document, split by kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClassifiedLinks {
    pub resources: Vec<Url>,
    pub pages: Vec<Url>,
}

/// The attribute carrying a link for `tag`, if the tag is one we follow.
pub(crate) fn link_attribute(tag: &str) -> Option<(&'static str, LinkKind)> {
    match tag {
        "a" => Some(("href", LinkKind::Page)),
        "link" => Some(("href", LinkKind::Resource)),
        "script" | "img" => Some(("src", LinkKind::Resource)),
        _ => None,
    }
}

/// Collect same-host http(s) links from `document`, resolved against `base`.
///
/// Each element contributes at most one link. Fragments are stripped.
pub fn classify(document: &Document, base: &Url, target: &MirrorTarget) -> ClassifiedLinks {
    let mut links = ClassifiedLinks::default();

    document.for_each_element(|tag, attrs| {
        let Some((key, kind)) = link_attribute(tag) else {
            return;
        };

        for attr in attrs.iter() {
            if attr_name(attr) != key {
                continue;
            }
            let Some(url) = resolve_followable(base, &attr.value, target) else {
                continue;
            };

            debug!("Found {:?} link: {}", kind, url);
            match kind {
                LinkKind::Page => links.pages.push(url),
                LinkKind::Resource => links.resources.push(url),
            }
            break;
        }
    });

    links
}

fn resolve_followable(base: &Url, value: &str, target: &MirrorTarget) -> Option<Url> {
    let mut url = base.join(value).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    if !target.is_same_host(&url) {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}
