use crate::dom::{Document, attr_name, set_attr_value};
use crate::links::link_attribute;
use crate::paths::relative_link;
use crate::target::MirrorTarget;
use std::path::Path;
use url::Url;

/// Point every same-host link in `document` at its mirrored file.
///
/// `current_local_path` is where `document` itself will be written. Links
/// that do not resolve or leave the target host are left untouched. A
/// fragment on the original link is kept. Returns the number of attributes
/// rewritten.
pub fn rewrite(
    document: &Document,
    base: &Url,
    current_local_path: &Path,
    target: &MirrorTarget,
) -> usize {
    let mut rewritten = 0;

    document.for_each_element(|tag, attrs| {
        let Some((key, _)) = link_attribute(tag) else {
            return;
        };

        for attr in attrs.iter_mut() {
            if attr_name(attr) != key {
                continue;
            }
            let Ok(url) = base.join(&attr.value) else {
                continue;
            };
            if !target.is_same_host(&url) {
                continue;
            }

            let target_path = target.local_path(&url);
            let Some(mut relative) = relative_link(current_local_path, &target_path) else {
                continue;
            };
            if let Some(fragment) = url.fragment() {
                relative.push('#');
                relative.push_str(fragment);
            }

            set_attr_value(attr, &relative);
            rewritten += 1;
            break;
        }
    });

    rewritten
}
