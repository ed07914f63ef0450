//! Filter, sort and page listings the way the dashboard tables do, on data
//! already fetched from the backend.

use serde::{Deserialize, Serialize};

use crate::models::packing_list::{PackingList, PackingListStatus};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PackingListSort {
    BoxNumber,
    #[default]
    CreatedAt,
    Status,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackingListQuery {
    pub status: Option<PackingListStatus>,
    pub search: Option<String>,
    pub sort: Option<PackingListSort>,
    pub order: Option<SortOrder>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Slices `items` into the requested page. `page` starts at 1; `limit` is
/// clamped to `1..=MAX_LIMIT`.
pub fn paginate<T>(items: Vec<T>, page: Option<u32>, limit: Option<u32>) -> Paginated<T> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let page = page.unwrap_or(1).max(1);
    let total = items.len() as u64;
    let total_pages = total.div_ceil(u64::from(limit)) as u32;

    let start = (page as usize - 1).saturating_mul(limit as usize);
    let data = items.into_iter().skip(start).take(limit as usize).collect();

    Paginated {
        data,
        pagination: PaginationMeta {
            page,
            limit,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        },
    }
}

pub fn query_packing_lists(
    mut lists: Vec<PackingList>,
    query: &PackingListQuery,
) -> Paginated<PackingList> {
    if let Some(status) = query.status {
        lists.retain(|l| l.status == status);
    }

    if let Some(needle) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let needle = needle.to_lowercase();
        lists.retain(|l| {
            l.box_number.to_lowercase().contains(&needle)
                || l.store_name().to_lowercase().contains(&needle)
        });
    }

    let sort = query.sort.unwrap_or_default();
    let order = query.order.unwrap_or_default();
    lists.sort_by(|a, b| {
        let ord = match sort {
            PackingListSort::BoxNumber => a.box_number.cmp(&b.box_number),
            PackingListSort::CreatedAt => a.created_at.cmp(&b.created_at),
            PackingListSort::Status => a.status.as_str().cmp(b.status.as_str()),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    paginate(lists, query.page, query.limit)
}
