//! Route templates for span names and metric labels.

use uuid::Uuid;

/// Path segments that are followed by a caller-chosen slug.
const SLUG_PARENTS: [&str; 2] = ["category", "product"];

/// Collapse identifiers in `path` so every request to one route shares a label.
pub(super) fn route_template(path: &str) -> String {
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() {
        return "/".to_owned();
    }

    let mut template = String::with_capacity(path.len());
    let mut previous: Option<&str> = None;

    for segment in trimmed.split('/') {
        template.push('/');

        if previous.is_some_and(|parent| SLUG_PARENTS.contains(&parent)) {
            template.push_str("{slug}");
        } else if Uuid::parse_str(segment).is_ok() {
            template.push_str("{uuid}");
        } else {
            template.push_str(segment);
        }

        previous = Some(segment);
    }

    template
}

#[cfg(test)]
mod tests {
    use super::route_template;

    #[test]
    fn root_stays_root() {
        assert_eq!(route_template("/"), "/");
        assert_eq!(route_template(""), "/");
    }

    #[test]
    fn slugs_after_catalog_segments_are_collapsed() {
        assert_eq!(route_template("/product/red-shoes"), "/product/{slug}");
        assert_eq!(route_template("/category/shoes/"), "/category/{slug}");
    }

    #[test]
    fn uuids_are_collapsed() {
        assert_eq!(
            route_template("/orders/0190b4d4-5c3a-7000-8000-000000000001"),
            "/orders/{uuid}"
        );
    }

    #[test]
    fn static_routes_are_kept() {
        assert_eq!(route_template("/add_to_cart"), "/add_to_cart");
    }
}
