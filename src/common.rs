use serde::{Deserialize, Serialize};

/// 列表响应中的分页块
#[derive(Debug, Serialize, Clone, Copy)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            page,
            limit,
            total,
            pages: (total + limit - 1) / limit,
        }
    }
}

/// 列表接口通用查询参数
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// 约束 page/limit 到合法范围并计算偏移量
    pub fn normalize(&self, default_limit: i64) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(default_limit).clamp(1, 100);
        let offset = (page - 1) * limit;
        (page, limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_pages_up() {
        let p = Pagination::new(1, 10, 31);
        assert_eq!(p.pages, 4);
        assert_eq!(Pagination::new(1, 10, 30).pages, 3);
        assert_eq!(Pagination::new(1, 10, 0).pages, 0);
    }

    #[test]
    fn page_query_normalizes_bounds() {
        let q = PageQuery {
            page: None,
            limit: None,
        };
        assert_eq!(q.normalize(10), (1, 10, 0));

        let q = PageQuery {
            page: Some(3),
            limit: Some(20),
        };
        assert_eq!(q.normalize(10), (3, 20, 40));

        let q = PageQuery {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(q.normalize(10), (1, 100, 0));
    }
}
