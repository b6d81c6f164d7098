//! Route templates and the builder that renders them onto a base URL.
//!
//! # Design
//! Templates name their placeholders (`/records/{recordId}`). Rendering walks
//! the template segment by segment and pushes each one through
//! `url::Url::path_segments_mut`, which percent-encodes every substituted
//! value as exactly one segment: an identifier containing `/` or `?` can
//! never change the shape of the route. A placeholder left without a value is
//! an error rather than a literal `{recordId}` on the wire.

use std::fmt;

use url::Url;

use crate::error::ApiError;

/// Routes served by the record API.
pub mod routes {
    use super::PathTemplate;

    pub const COLLECTION_RECORDS: PathTemplate =
        PathTemplate::new("/collections/{collectionId}/records");
    pub const USER_RECORDS: PathTemplate = PathTemplate::new("/users/{userId}/records");
    pub const USER_RECORD_COUNT: PathTemplate =
        PathTemplate::new("/users/{userId}/records/amount");
    pub const NEW_RECORD: PathTemplate = PathTemplate::new("/record");
    pub const RECORD: PathTemplate = PathTemplate::new("/records/{recordId}");
    pub const RECORDS: PathTemplate = PathTemplate::new("/records");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Placeholder names in the order they appear.
    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> {
        self.0.split('/').filter_map(placeholder_name)
    }

    /// Render the template under `base`, taking placeholder values from
    /// `params`. The result always has exactly one `/` between the base path
    /// and the route, whatever trailing slashes `base` carries.
    pub fn render(
        &self,
        base: &Url,
        params: &[(&str, &dyn fmt::Display)],
    ) -> Result<Url, ApiError> {
        let mut url = base.clone();
        let base_path = base.path().trim_end_matches('/').to_string();
        url.set_path(&base_path);
        {
            let mut segments = url.path_segments_mut().map_err(|()| ApiError::InvalidBaseUrl {
                url: base.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?;
            segments.pop_if_empty();

            for segment in self.0.trim_start_matches('/').split('/') {
                let Some(name) = placeholder_name(segment) else {
                    segments.push(segment);
                    continue;
                };
                let value = params
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| value.to_string())
                    .ok_or_else(|| ApiError::UnresolvedPlaceholder {
                        template: self.0.to_string(),
                        placeholder: name.to_string(),
                    })?;
                // `push` silently drops dot segments, which would retarget the request.
                if value.is_empty() || value == "." || value == ".." {
                    return Err(ApiError::InvalidPathSegment {
                        placeholder: name.to_string(),
                        value,
                    });
                }
                segments.push(&value);
            }
        }
        Ok(url)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

fn placeholder_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// Parse a base URL, dropping any query or fragment so rendered routes
/// cannot inherit them.
pub fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(base_url.trim()).map_err(|e| ApiError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: "URL cannot be a base".to_string(),
        });
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
