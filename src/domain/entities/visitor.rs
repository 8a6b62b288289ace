use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct VisitorCount {
    pub count: i64,
}
