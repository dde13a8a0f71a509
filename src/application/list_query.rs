// Client-side list querying: filter, sort and paginate an in-memory list
use serde::Deserialize;
use std::cmp::Ordering;

/// Rows that can be shown in a paged table.
pub trait Listable {
    /// Field names accepted by `compare_by`.
    const SORT_FIELDS: &'static [&'static str];

    fn category(&self) -> Option<&str> {
        None
    }

    fn search_text(&self) -> String;

    fn compare_by(&self, other: &Self, field: &str) -> Ordering;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Query-string parameters shared by every table panel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub category: Option<String>,
    pub keyword: Option<String>,
    pub sort: Option<String>,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 200,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

impl ListQuery {
    fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != "all")
    }

    fn keyword_filter(&self) -> Option<String> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_lowercase)
    }

    /// Filter and sort without paginating (used for exports).
    pub fn select<T: Listable>(&self, mut items: Vec<T>) -> Vec<T> {
        if let Some(category) = self.category_filter() {
            items.retain(|item| item.category() == Some(category));
        }

        if let Some(keyword) = self.keyword_filter() {
            items.retain(|item| item.search_text().to_lowercase().contains(&keyword));
        }

        if let Some(field) = self.sort.as_deref() {
            if T::SORT_FIELDS.contains(&field) {
                // sort_by is stable, so ties keep their incoming order
                match self.order {
                    SortOrder::Asc => items.sort_by(|a, b| a.compare_by(b, field)),
                    SortOrder::Desc => items.sort_by(|a, b| b.compare_by(a, field)),
                }
            } else {
                tracing::debug!("Ignoring unknown sort field: {}", field);
            }
        }

        items
    }

    pub fn apply<T: Listable>(&self, items: Vec<T>, limits: PageLimits) -> Page<T> {
        let selected = self.select(items);
        paginate(selected, self.page.unwrap_or(1), self.page_size, limits)
    }

    /// Query string for a link to `page`, keeping filters and sort.
    pub fn to_query_string(&self, page: usize) -> String {
        let mut params = vec![format!("page={page}")];
        if let Some(size) = self.page_size {
            params.push(format!("page_size={size}"));
        }
        if let Some(category) = self.category_filter() {
            params.push(format!("category={}", urlencoding::encode(category)));
        }
        if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.trim().is_empty()) {
            params.push(format!("keyword={}", urlencoding::encode(keyword.trim())));
        }
        if let Some(sort) = self.sort.as_deref() {
            params.push(format!("sort={}", urlencoding::encode(sort)));
            if self.order == SortOrder::Desc {
                params.push("order=desc".to_string());
            }
        }
        params.join("&")
    }
}

/// Slice out one page. Page numbers are clamped to `[1, total_pages]` and
/// an empty list still has one (empty) page.
pub fn paginate<T>(
    items: Vec<T>,
    page: usize,
    page_size: Option<usize>,
    limits: PageLimits,
) -> Page<T> {
    let page_size = page_size
        .unwrap_or(limits.default_page_size)
        .clamp(1, limits.max_page_size.max(1));
    let total = items.len();
    let total_pages = total.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let items: Vec<T> = items.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        page,
        page_size,
        total,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        kind: &'static str,
        score: i32,
    }

    impl Listable for Row {
        const SORT_FIELDS: &'static [&'static str] = &["score", "name"];

        fn category(&self) -> Option<&str> {
            Some(self.kind)
        }

        fn search_text(&self) -> String {
            self.name.to_string()
        }

        fn compare_by(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "score" => self.score.cmp(&other.score),
                "name" => self.name.cmp(other.name),
                _ => Ordering::Equal,
            }
        }
    }

    fn fixture() -> Vec<Row> {
        vec![
            Row { name: "Alpha", kind: "tech", score: 3 },
            Row { name: "Bravo", kind: "bank", score: 1 },
            Row { name: "Charlie", kind: "tech", score: 2 },
            Row { name: "Delta", kind: "energy", score: 3 },
            Row { name: "Echo", kind: "tech", score: 5 },
        ]
    }

    fn names(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_last_page_holds_remainder() {
        let items: Vec<u32> = (0..23).collect();
        let page = paginate(items, 3, Some(10), PageLimits::default());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec![20, 21, 22]);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_number_is_clamped() {
        let items: Vec<u32> = (0..23).collect();
        let beyond = paginate(items.clone(), 99, Some(10), PageLimits::default());
        assert_eq!(beyond.page, 3);
        assert_eq!(beyond.items.len(), 3);

        let zero = paginate(items, 0, Some(10), PageLimits::default());
        assert_eq!(zero.page, 1);
        assert_eq!(zero.items, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_list_has_single_page() {
        let page = paginate(Vec::<u32>::new(), 4, Some(10), PageLimits::default());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_page_size_is_clamped() {
        let limits = PageLimits { default_page_size: 5, max_page_size: 8 };
        let items: Vec<u32> = (0..20).collect();
        assert_eq!(paginate(items.clone(), 1, None, limits).page_size, 5);
        assert_eq!(paginate(items.clone(), 1, Some(0), limits).page_size, 1);
        assert_eq!(paginate(items, 1, Some(500), limits).page_size, 8);
    }

    #[test]
    fn test_category_filter_preserves_order() {
        let query = ListQuery {
            category: Some("tech".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&query.select(fixture())), vec!["Alpha", "Charlie", "Echo"]);

        let all = ListQuery {
            category: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(all.select(fixture()).len(), 5);
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let query = ListQuery {
            keyword: Some("  LT ".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&query.select(fixture())), vec!["Delta"]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let asc = ListQuery {
            sort: Some("score".to_string()),
            ..Default::default()
        };
        assert_eq!(
            names(&asc.select(fixture())),
            vec!["Bravo", "Charlie", "Alpha", "Delta", "Echo"]
        );

        let desc = ListQuery {
            sort: Some("score".to_string()),
            order: SortOrder::Desc,
            ..Default::default()
        };
        assert_eq!(
            names(&desc.select(fixture())),
            vec!["Echo", "Alpha", "Delta", "Charlie", "Bravo"]
        );
    }

    #[test]
    fn test_unknown_sort_field_keeps_order() {
        let query = ListQuery {
            sort: Some("volume".to_string()),
            ..Default::default()
        };
        assert_eq!(query.select(fixture()), fixture());
    }

    #[test]
    fn test_query_string_keeps_filters() {
        let query = ListQuery {
            page: Some(2),
            category: Some("新能源".to_string()),
            sort: Some("heat".to_string()),
            order: SortOrder::Desc,
            ..Default::default()
        };
        assert_eq!(
            query.to_query_string(3),
            "page=3&category=%E6%96%B0%E8%83%BD%E6%BA%90&sort=heat&order=desc"
        );
    }
}
