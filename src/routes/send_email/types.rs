/// Keys a submission must carry. Kept in ascending order so the missing-items
/// list in the 400 body comes out sorted without a second pass.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "content_html",
    "from_address",
    "from_name",
    "subject",
    "to_address",
    "to_name",
];

#[derive(serde::Serialize)]
pub struct MissingFieldsBody {
    #[serde(rename = "Error")]
    error: &'static str,
    #[serde(rename = "Missing configuration items.")]
    missing: Vec<&'static str>,
}

impl MissingFieldsBody {
    pub fn new(missing: Vec<&'static str>) -> Self {
        Self {
            error: "Missing configuration items.",
            missing,
        }
    }
}
