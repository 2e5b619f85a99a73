use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, Select};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Keeps `page * page_size` inside the range SQLite accepts for `OFFSET`.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PAGE_SIZE;

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u64,
    pub page_size: u64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: (page.max(1) as u64).min(MAX_PAGE),
            page_size: if page_size < 1 {
                DEFAULT_PAGE_SIZE
            } else {
                (page_size as u64).min(MAX_PAGE_SIZE)
            },
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.page_size
    }

    pub fn pages(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size)
    }

    pub fn has_more(&self, total: u64) -> bool {
        self.page * self.page_size < total
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub params: PageParams,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn pages(&self) -> u64 {
        self.params.pages(self.total)
    }

    pub fn has_next(&self) -> bool {
        self.params.has_more(self.total)
    }

    pub fn has_prev(&self) -> bool {
        self.params.page > 1
    }
}

pub async fn fetch_page<'db, C, E>(
    conn: &'db C,
    select: Select<E>,
    params: PageParams,
) -> Result<Page<E::Model>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: Send + Sync + 'db,
{
    let paginator = select.paginate(conn, params.page_size);
    let total = paginator.num_items().await?;
    let items = if params.offset() >= total {
        Vec::new()
    } else {
        paginator.fetch_page(params.page - 1).await?
    };
    Ok(Page {
        items,
        params,
        total,
    })
}
