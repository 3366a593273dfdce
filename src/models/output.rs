use serde::Serialize;

/// One line of the result CSV. Cell values are copied verbatim from the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow<'a> {
    pub yr: i32,
    pub lon_c: f64,
    pub lat_c: f64,
    pub summer: &'a str,
    pub spring: &'a str,
}
