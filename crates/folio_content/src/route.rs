//! Detail page routes
//!
//! Tapping the center card navigates to `/work/{id}`, carrying the card's
//! on-screen bounds as a JSON `rect` query parameter so the detail page can
//! expand the image from where the card was. Case study pages are also
//! reachable by slug (`/work/project-1`). The rect is optional: a missing or
//! unreadable rect starts the expansion from the full viewport instead.

use folio_carousel::Navigate;
use folio_core::Rect;
use url::form_urlencoded;
use url::Url;

use crate::catalog::ProjectRef;
use crate::error::ContentError;

/// Path of the gallery, where closing a detail page returns to
pub const WORK_INDEX_PATH: &str = "/work";

/// Origin that site-relative paths are resolved against
const ROUTE_BASE: &str = "https://folio.invalid/";

const RECT_PARAM: &str = "rect";

/// A parsed `/work/{id-or-slug}` route
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRoute {
    pub project: ProjectRef,
    /// Where the expand animation starts
    pub origin: Option<Rect>,
}

impl DetailRoute {
    pub fn new(project: impl Into<ProjectRef>, origin: Option<Rect>) -> Self {
        Self {
            project: project.into(),
            origin,
        }
    }

    pub fn from_navigate(navigate: &Navigate<u32>) -> Self {
        Self::new(navigate.key, Some(navigate.bounds))
    }

    /// Encode as a path with the origin rect as a form-encoded JSON query value
    pub fn to_path(&self) -> String {
        let base = format!("{WORK_INDEX_PATH}/{}", self.project);
        let Some(rect) = self.origin.filter(Rect::is_finite) else {
            return base;
        };
        match serde_json::to_string(&rect) {
            Ok(json) => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair(RECT_PARAM, &json)
                    .finish();
                format!("{base}?{query}")
            }
            Err(err) => {
                tracing::warn!(%err, "dropping unserializable origin rect");
                base
            }
        }
    }

    /// Parse a site-relative `/work/{id-or-slug}[?rect=...][#fragment]` path
    pub fn parse(path: &str) -> Result<Self, ContentError> {
        let invalid = || ContentError::InvalidRoute(path.to_string());

        // Only site-relative paths; `//host/...` would replace the origin
        if !path.starts_with('/') || path.starts_with("//") {
            return Err(invalid());
        }
        let url = Url::parse(ROUTE_BASE)
            .and_then(|base| base.join(path))
            .map_err(|_| invalid())?;

        let mut segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.collect())
            .unwrap_or_default();
        if segments.last() == Some(&"") {
            segments.pop();
        }

        let project = match segments.as_slice() {
            ["work", reference] => parse_reference(reference).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };

        let origin = url
            .query_pairs()
            .find(|(key, _)| key == RECT_PARAM)
            .and_then(|(_, json)| parse_rect(&json));

        Ok(Self { project, origin })
    }
}

/// Ids are all digits; slugs are lowercase ASCII words joined by `-`
fn parse_reference(segment: &str) -> Option<ProjectRef> {
    if segment.is_empty() {
        return None;
    }
    if let Ok(id) = segment.parse::<u32>() {
        return Some(ProjectRef::Id(id));
    }
    let is_slug = segment
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    is_slug.then(|| ProjectRef::Slug(segment.to_string()))
}

fn parse_rect(json: &str) -> Option<Rect> {
    match serde_json::from_str::<Rect>(json) {
        Ok(rect) if rect.is_finite() => Some(rect),
        Ok(_) => None,
        Err(err) => {
            tracing::warn!(%err, "ignoring malformed rect parameter");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_without_origin() {
        assert_eq!(DetailRoute::new(3, None).to_path(), "/work/3");
    }

    #[test]
    fn test_path_escapes_rect_json() {
        let route = DetailRoute::new(2, Some(Rect::new(120.0, 380.0, 500.0, 350.0)));
        let path = route.to_path();
        assert!(path.starts_with("/work/2?rect=%7B%22top%22%3A120"));
        assert!(!path.contains('{'));
        assert_eq!(DetailRoute::parse(&path).unwrap(), route);
    }

    #[test]
    fn test_parse_from_navigate() {
        let nav = Navigate {
            key: 4,
            index: 3,
            bounds: Rect::new(1.5, 2.5, 500.0, 350.0),
        };
        let route = DetailRoute::from_navigate(&nav);
        assert_eq!(route.project, ProjectRef::Id(4));
        assert_eq!(DetailRoute::parse(&route.to_path()).unwrap(), route);
    }

    #[test]
    fn test_accepts_percent_encoded_rect_from_browser() {
        // encodeURIComponent output, as the site's carousel produces it
        let route = DetailRoute::parse(
            "/work/1?rect=%7B%22top%22%3A1%2C%22left%22%3A2%2C%22width%22%3A3%2C%22height%22%3A4%7D",
        )
        .unwrap();
        assert_eq!(route.origin, Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_fragment_is_ignored() {
        assert_eq!(
            DetailRoute::parse("/work/2#details").unwrap(),
            DetailRoute::new(2, None)
        );

        let card = Rect::new(225.0, 390.0, 500.0, 350.0);
        let path = format!("{}#details", DetailRoute::new(2, Some(card)).to_path());
        let route = DetailRoute::parse(&path).unwrap();
        assert_eq!(route.origin, Some(card), "rect survives a trailing fragment");
    }

    #[test]
    fn test_slug_routes() {
        let route = DetailRoute::parse("/work/project-1").unwrap();
        assert_eq!(route.project, ProjectRef::Slug("project-1".into()));
        assert_eq!(route.to_path(), "/work/project-1");

        let route = DetailRoute::parse("/work/project-2/?rect=oops").unwrap();
        assert_eq!(route.project, ProjectRef::Slug("project-2".into()));
        assert_eq!(route.origin, None);
    }

    #[test]
    fn test_malformed_rect_falls_back_to_viewport() {
        let route = DetailRoute::parse("/work/1?rect=%7Bnot-json").unwrap();
        assert_eq!(route, DetailRoute::new(1, None));

        let route = DetailRoute::parse("/work/1?from=home&rect=%7B%22top%22%3A1%7D").unwrap();
        assert_eq!(route.origin, None, "incomplete rect is ignored");
    }

    #[test]
    fn test_rejects_other_paths() {
        for path in [
            "/about",
            "/work",
            "/work/",
            "/work/1/extra",
            "/works/1",
            "/work/Project%201",
            "//evil.example/work/1",
            "work/1",
            "",
        ] {
            assert!(
                matches!(DetailRoute::parse(path), Err(ContentError::InvalidRoute(_))),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_trailing_slash_is_tolerated() {
        assert_eq!(DetailRoute::parse("/work/5/").unwrap().project, ProjectRef::Id(5));
    }
}
