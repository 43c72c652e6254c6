use serde::Serialize;

/// A program in the static course catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: &'static str,
    pub name: &'static str,
    pub department: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
    pub eligibility: &'static str,
    pub image: &'static str,
}
