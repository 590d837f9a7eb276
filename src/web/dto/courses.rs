use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogQuery, Selection, SortOrder};
use crate::model::entity::{Course, CourseId};
use crate::utils::format::format_category_name;

/// Listing filters. `category`, `level` and `feature` take comma-separated
/// values; omitting `category` or `level` means `all`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub feature: Option<String>,
    pub sort: Option<String>,
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

impl CourseListParams {
    pub fn to_query(&self) -> CatalogQuery {
        let mut query = CatalogQuery::new()
            .with_search(self.search.as_deref().unwrap_or_default())
            .with_categories(Selection::from_params(split_list(self.category.as_deref())))
            .with_levels(Selection::from_params(split_list(self.level.as_deref())))
            .with_sort(
                self.sort
                    .as_deref()
                    .map(SortOrder::parse_lenient)
                    .unwrap_or_default(),
            );

        for feature in split_list(self.feature.as_deref()) {
            query = query.with_feature(feature);
        }
        query
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    pub slug: String,
    pub name: String,
}

impl From<String> for CategoryResponse {
    fn from(slug: String) -> Self {
        Self {
            name: format_category_name(&slug),
            slug,
        }
    }
}

/// Where the client should go when a course card is opened.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CourseRouteResponse {
    pub course_id: CourseId,
    pub route: String,
}

impl From<&Course> for CourseRouteResponse {
    fn from(course: &Course) -> Self {
        let route = if course.is_enrolled() {
            format!("/learn/{}", course.id())
        } else {
            format!("/course/{}", course.id())
        };

        Self {
            course_id: course.id(),
            route,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BookmarkResponse {
    pub course_id: CourseId,
    pub bookmarked: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn absent_filters_select_everything() {
        let query = CourseListParams::default().to_query();
        assert!(query.categories.is_all());
        assert!(query.levels.is_all());
        assert!(query.features.is_empty());
        assert_eq!(query.sort, SortOrder::MostPopular);
    }

    #[test]
    fn lists_are_comma_separated() {
        let params = CourseListParams {
            category: Some("music, dance".into()),
            feature: Some("Plating,Knife Skills".into()),
            sort: Some("Price: High to Low".into()),
            ..Default::default()
        };
        let query = params.to_query();
        assert_eq!(query.categories.values(), &["music", "dance"]);
        assert_eq!(query.features, vec!["Plating", "Knife Skills"]);
        assert_eq!(query.sort, SortOrder::PriceHighToLow);
    }

    #[test]
    fn category_names_are_humanised() {
        let category = CategoryResponse::from(String::from("film-&-video-production"));
        assert_eq!(category.name, "Film & Video Production");
    }
}
