//! Hash-fragment routing

use crate::helpers::decode_component;

/// The four reachable views, parsed from a location fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Post(String),
    Tags,
    Tag(String),
}

impl Route {
    /// Parse a fragment like `#/post/hello-world` into a route.
    ///
    /// The keyword is the first path segment after the marker, the parameter
    /// the second; deeper segments are ignored. Unknown keywords and missing
    /// parameters fall back to the home view.
    pub fn parse(fragment: &str) -> Self {
        let rest = fragment.strip_prefix('#').unwrap_or(fragment);
        let rest = rest.strip_prefix('/').unwrap_or(rest);

        let mut segments = rest.splitn(3, '/');
        let keyword = segments.next().unwrap_or_default();
        let param = segments
            .next()
            .filter(|s| !s.is_empty())
            .map(decode_component);

        match (keyword, param) {
            ("post", Some(slug)) => Route::Post(slug),
            ("tags", _) => Route::Tags,
            ("tag", Some(name)) => Route::Tag(name),
            _ => Route::Home,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_routes() {
        assert_eq!(Route::parse("#/"), Route::Home);
        assert_eq!(Route::parse("#"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
    }

    #[test]
    fn test_post_route() {
        assert_eq!(
            Route::parse("#/post/hello-world"),
            Route::Post("hello-world".to_string())
        );
    }

    #[test]
    fn test_tags_route() {
        assert_eq!(Route::parse("#/tags"), Route::Tags);
        // A stray parameter is ignored
        assert_eq!(Route::parse("#/tags/extra"), Route::Tags);
    }

    #[test]
    fn test_tag_route() {
        assert_eq!(Route::parse("#/tag/rust"), Route::Tag("rust".to_string()));
    }

    #[test]
    fn test_parameter_is_decoded() {
        assert_eq!(
            Route::parse("#/tag/systems%20%26%20networks"),
            Route::Tag("systems & networks".to_string())
        );
    }

    #[test]
    fn test_missing_parameter_falls_back_to_home() {
        assert_eq!(Route::parse("#/post"), Route::Home);
        assert_eq!(Route::parse("#/post/"), Route::Home);
        assert_eq!(Route::parse("#/tag"), Route::Home);
    }

    #[test]
    fn test_unknown_keyword_falls_back_to_home() {
        assert_eq!(Route::parse("#/archive"), Route::Home);
        assert_eq!(Route::parse("#/bogus/param"), Route::Home);
    }

    #[test]
    fn test_deeper_segments_are_ignored() {
        assert_eq!(Route::parse("#/post/a/b/c"), Route::Post("a".to_string()));
    }

    #[test]
    fn test_parse_is_idempotent() {
        for fragment in ["#/", "#/post/x", "#/tags", "#/tag/y", "#/junk"] {
            assert_eq!(Route::parse(fragment), Route::parse(fragment));
        }
    }
}
