use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::entity::Course;

/// Sentinel that disables a category or level filter.
pub const ALL: &str = "all";

/// Multi-value filter selection with the `all` sentinel.
///
/// While the sentinel is present every value matches, whatever else is
/// selected. An empty selection matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Selection(Vec<String>);

impl Default for Selection {
    fn default() -> Self {
        Self::all()
    }
}

impl Selection {
    pub fn all() -> Self {
        Self(vec![ALL.to_string()])
    }

    pub fn of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    /// Selection built from request parameters: nothing given means `all`.
    pub fn from_params(values: Vec<String>) -> Self {
        if values.is_empty() {
            Self::all()
        } else {
            Self(values)
        }
    }

    pub fn is_all(&self) -> bool {
        self.0.iter().any(|v| v == ALL)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn matches(&self, value: &str) -> bool {
        self.is_all() || self.0.iter().any(|v| v == value)
    }

    /// Picking `all`, or picking anything while `all` is selected, replaces
    /// the selection with just that value. Otherwise the value is toggled.
    pub fn toggle<S: Into<String>>(&mut self, value: S) {
        let value = value.into();
        if self.is_all() || value == ALL {
            self.0 = vec![value];
        } else if let Some(pos) = self.0.iter().position(|v| *v == value) {
            self.0.remove(pos);
        } else {
            self.0.push(value);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "Most Popular")]
    MostPopular,
    Newest,
    #[serde(rename = "Highest Rated")]
    HighestRated,
    #[serde(rename = "Price: Low to High")]
    PriceLowToHigh,
    #[serde(rename = "Price: High to Low")]
    PriceHighToLow,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::MostPopular,
        SortOrder::Newest,
        SortOrder::HighestRated,
        SortOrder::PriceLowToHigh,
        SortOrder::PriceHighToLow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MostPopular => "Most Popular",
            Self::Newest => "Newest",
            Self::HighestRated => "Highest Rated",
            Self::PriceLowToHigh => "Price: Low to High",
            Self::PriceHighToLow => "Price: High to Low",
        }
    }

    /// Unknown names fall back to Most Popular.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Stable in-place sort.
    pub fn sort(&self, courses: &mut [Course]) {
        match self {
            Self::MostPopular => courses.sort_by(|a, b| b.students().cmp(&a.students())),
            // new first, no secondary key
            Self::Newest => courses.sort_by(|a, b| b.is_new().cmp(&a.is_new())),
            Self::HighestRated => courses.sort_by(|a, b| b.rating().total_cmp(&a.rating())),
            Self::PriceLowToHigh => courses.sort_by(|a, b| a.price().cmp(&b.price())),
            Self::PriceHighToLow => courses.sort_by(|a, b| b.price().cmp(&a.price())),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| format!("unknown sort order `{s}`"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CatalogQuery {
    pub search: String,
    pub categories: Selection,
    pub levels: Selection,
    pub features: Vec<String>,
    pub sort: SortOrder,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search<S: Into<String>>(mut self, search: S) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_categories(mut self, categories: Selection) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_levels(mut self, levels: Selection) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_feature<S: Into<String>>(mut self, feature: S) -> Self {
        self.features.push(feature.into());
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    fn matches_search(&self, course: &Course, needle: &str) -> bool {
        needle.is_empty()
            || course.title().to_lowercase().contains(needle)
            || course.instructor().to_lowercase().contains(needle)
    }

    fn matches_features(&self, course: &Course) -> bool {
        self.features.iter().all(|f| course.has_feature(f))
    }
}

/// Filters then sorts, in the order search, category, level, features, sort.
///
/// The input slice is never touched; the result only holds clones of input
/// courses.
pub fn query(courses: &[Course], params: &CatalogQuery) -> Vec<Course> {
    let needle = params.search.to_lowercase();

    let mut result: Vec<Course> = courses
        .iter()
        .filter(|c| params.matches_search(c, &needle))
        .filter(|c| params.categories.matches(c.category()))
        .filter(|c| params.levels.matches(c.level().as_str()))
        .filter(|c| params.matches_features(c))
        .cloned()
        .collect();

    params.sort.sort(&mut result);
    result
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn course(value: serde_json::Value) -> Course {
        serde_json::from_value(value).unwrap()
    }

    fn ids(courses: &[Course]) -> Vec<u32> {
        courses.iter().map(|c| c.id()).collect()
    }

    fn fixture() -> Vec<Course> {
        vec![
            course(json!({
                "id": 1, "title": "Scientific Communication", "instructor": "Dr. Evelyn Reed",
                "category": "professional-development", "level": "All Levels",
                "students": 15230, "rating": 4.9, "price": 900, "is_new": false,
                "features": ["Public Speaking", "Data Visualization"]
            })),
            course(json!({
                "id": 2, "title": "Culinary Arts", "instructor": "Javier Torres",
                "category": "personal-development", "level": "Beginner",
                "students": 25890, "rating": 4.7, "price": 500, "is_new": false,
                "features": ["Knife Skills", "Plating"]
            })),
            course(json!({
                "id": 3, "title": "Strategic Negotiation", "instructor": "Elena Petrova",
                "category": "business-development", "level": "Intermediate",
                "students": 18400, "rating": 4.8, "price": 700, "is_new": true,
                "features": ["Body Language", "Public Speaking"]
            })),
            course(json!({
                "id": 4, "title": "Speaking with Data", "instructor": "Ana Ruiz",
                "category": "professional-development", "level": "Beginner",
                "students": 900, "rating": 4.8, "price": 700, "is_new": true,
                "features": ["Public Speaking", "Data Visualization", "Projects"]
            })),
        ]
    }

    #[test]
    fn defaults_return_everything_by_popularity() {
        let courses = fixture();
        let result = query(&courses, &CatalogQuery::default());
        assert_eq!(ids(&result), vec![2, 3, 1, 4]);
    }

    #[test]
    fn search_matches_title_or_instructor_ignoring_case() {
        let courses = fixture();
        let by_title = query(&courses, &CatalogQuery::new().with_search("NEGOTIATION"));
        assert_eq!(ids(&by_title), vec![3]);

        let by_instructor = query(&courses, &CatalogQuery::new().with_search("reed"));
        assert_eq!(ids(&by_instructor), vec![1]);

        let nothing = query(&courses, &CatalogQuery::new().with_search("quantum"));
        assert!(nothing.is_empty());
    }

    #[test]
    fn sentinel_overrides_concrete_values() {
        let courses = fixture();
        let q = CatalogQuery::new()
            .with_categories(Selection::of(["all", "business-development"]));
        assert_eq!(query(&courses, &q).len(), courses.len());

        let q = CatalogQuery::new().with_categories(Selection::of(["business-development"]));
        assert_eq!(ids(&query(&courses, &q)), vec![3]);

        let q = CatalogQuery::new().with_levels(Selection::of(["all", "Beginner"]));
        assert_eq!(ids(&query(&courses, &q)), vec![2, 3, 1, 4]);

        let q = CatalogQuery::new().with_levels(Selection::of(["Advanced"]));
        assert!(query(&courses, &q).is_empty());
    }

    #[test]
    fn sentinels_apply_per_dimension() {
        let courses = fixture();
        let q = CatalogQuery::new()
            .with_categories(Selection::of(["professional-development"]))
            .with_levels(Selection::of(["all", "Advanced"]));
        assert_eq!(ids(&query(&courses, &q)), vec![1, 4]);

        let q = CatalogQuery::new()
            .with_categories(Selection::of(["all", "nonexistent"]))
            .with_levels(Selection::of(["Beginner"]));
        assert_eq!(ids(&query(&courses, &q)), vec![2, 4]);
    }

    #[test]
    fn levels_filter_independently() {
        let courses = fixture();
        let q = CatalogQuery::new()
            .with_categories(Selection::of(["professional-development"]))
            .with_levels(Selection::of(["Beginner"]));
        assert_eq!(ids(&query(&courses, &q)), vec![4]);

        let q = CatalogQuery::new().with_levels(Selection::of(["Beginner", "All Levels"]));
        assert_eq!(ids(&query(&courses, &q)), vec![2, 1, 4]);
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let courses = fixture();
        let q = CatalogQuery::new().with_levels(Selection::of(Vec::<String>::new()));
        assert!(query(&courses, &q).is_empty());
    }

    #[test]
    fn features_are_conjunctive() {
        let courses = fixture();
        let q = CatalogQuery::new()
            .with_feature("Public Speaking")
            .with_feature("Data Visualization");
        let result = query(&courses, &q);
        assert_eq!(ids(&result), vec![1, 4]);
        for c in &result {
            assert!(q.features.iter().all(|f| c.has_feature(f)));
        }
    }

    #[test]
    fn result_is_subset_without_duplicates() {
        let courses = fixture();
        let q = CatalogQuery::new()
            .with_search("e")
            .with_feature("Public Speaking")
            .with_sort(SortOrder::PriceHighToLow);
        let result = query(&courses, &q);
        let mut seen = ids(&result);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), result.len());
        assert!(result.iter().all(|r| courses.iter().any(|c| c.id() == r.id())));
        // input untouched
        assert_eq!(ids(&courses), vec![1, 2, 3, 4]);
    }

    #[test]
    fn newest_versus_popular() {
        let courses = vec![
            course(json!({ "id": 1, "title": "A", "students": 100, "is_new": false })),
            course(json!({ "id": 2, "title": "B", "students": 50, "is_new": true })),
        ];
        let newest = query(&courses, &CatalogQuery::new().with_sort(SortOrder::Newest));
        assert_eq!(ids(&newest), vec![2, 1]);
        let popular = query(&courses, &CatalogQuery::new().with_sort(SortOrder::MostPopular));
        assert_eq!(ids(&popular), vec![1, 2]);
    }

    #[test]
    fn newest_keeps_input_order_among_ties() {
        let courses = fixture();
        let mut sorted = courses.clone();
        SortOrder::Newest.sort(&mut sorted);
        assert_eq!(ids(&sorted), vec![3, 4, 1, 2]);
    }

    #[test]
    fn rating_and_price_orders() {
        let courses = fixture();
        let rated = query(&courses, &CatalogQuery::new().with_sort(SortOrder::HighestRated));
        assert_eq!(ids(&rated), vec![1, 3, 4, 2]);

        let cheap = query(&courses, &CatalogQuery::new().with_sort(SortOrder::PriceLowToHigh));
        assert_eq!(ids(&cheap), vec![2, 3, 4, 1]);

        let pricey = query(&courses, &CatalogQuery::new().with_sort(SortOrder::PriceHighToLow));
        assert_eq!(ids(&pricey), vec![1, 3, 4, 2]);
    }

    #[test]
    fn sorting_is_idempotent() {
        for order in SortOrder::ALL {
            let mut once = fixture();
            order.sort(&mut once);
            let mut twice = once.clone();
            order.sort(&mut twice);
            assert_eq!(ids(&once), ids(&twice), "{order}");
        }
    }

    #[test]
    fn toggle_follows_selection_rules() {
        let mut s = Selection::all();
        s.toggle("music");
        assert_eq!(s.values(), ["music"]);
        assert!(!s.is_all());

        s.toggle("dance");
        assert_eq!(s.values(), ["music", "dance"]);

        s.toggle("music");
        assert_eq!(s.values(), ["dance"]);

        s.toggle("all");
        assert!(s.is_all());
        assert_eq!(s.values(), ["all"]);
    }

    #[test]
    fn sort_names() {
        assert_eq!(SortOrder::parse_lenient("Price: Low to High"), SortOrder::PriceLowToHigh);
        assert_eq!(SortOrder::parse_lenient("whatever"), SortOrder::MostPopular);
        assert_eq!(
            serde_json::to_value(SortOrder::HighestRated).unwrap(),
            json!("Highest Rated")
        );
    }
}
