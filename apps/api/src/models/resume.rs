//! The resume document model: the single source of truth the wizard edits.
//!
//! Field names serialize in camelCase so the wire format matches the frontend
//! exactly; `drivers_license` keeps its legacy wire name `cnh`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub age: String,
    pub marital_status: String,
    #[serde(rename = "cnh")]
    pub drivers_license: String,
    /// Data URL of the profile picture, empty when none was uploaded.
    pub profile_picture: String,
}

/// One work-experience entry. `id` is an opaque caller-assigned string
/// (the frontend uses creation timestamps), stable for the item's lifetime
/// and used as the join key for continuation lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub institution: String,
    pub completion_date: String,
}

/// Proficiency stays a free-form string; the original union was UI copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageSkill {
    pub id: String,
    pub language: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateId {
    #[default]
    #[serde(rename = "template-modern")]
    Modern,
    #[serde(rename = "template-classic")]
    Classic,
    #[serde(rename = "template-minimalist")]
    Minimalist,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    pub template: TemplateId,
    /// Accent color as a CSS hex string.
    pub color: String,
    #[serde(rename = "showQRCode")]
    pub show_qr_code: bool,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            template: TemplateId::Modern,
            color: "#002e9e".to_string(),
            show_qr_code: true,
        }
    }
}

/// The complete in-memory resume. A value object: no identity, replaced
/// wholesale on "start new" or "load saved", mutated only via wizard edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub courses: Vec<Course>,
    pub languages: Vec<LanguageSkill>,
    pub skills: Vec<String>,
    pub style: Style,
}
