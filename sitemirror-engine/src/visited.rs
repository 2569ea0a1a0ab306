use dashmap::DashSet;
use url::Url;

/// Set of URLs already claimed during one run.
///
/// The only operation exposed is [`VisitedSet::try_claim`]; the underlying
/// sharded set is never handed out, so check-and-insert is always a single
/// atomic step.
#[derive(Debug, Default)]
pub struct VisitedSet {
    claimed: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once per distinct URL (fragment ignored).
    pub fn try_claim(&self, url: &Url) -> bool {
        self.claimed.insert(normalize(url))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.claimed.len()
    }
}

fn normalize(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.to_string()
}
