//! List / create envelopes used by every resource endpoint

use serde::{Deserialize, Serialize};

/// `GET /api/<resource>` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

/// `POST /api/<resource>` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: String,
    pub created_at: i64,
}

impl CreatedResponse {
    pub fn new(id: i64, created_at: i64) -> Self {
        Self {
            id,
            message: format!("successfully created new resource '{id}'."),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_counts_items() {
        let list = ListResponse::new(vec!["a", "b", "c"]);
        assert_eq!(list.total, 3);
    }

    #[test]
    fn test_created_response_message() {
        let created = CreatedResponse::new(42, 1_700_000_000_000);
        assert_eq!(created.message, "successfully created new resource '42'.");
    }
}
