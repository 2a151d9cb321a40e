//! AI services built on the Gemini client: text rewriting, skill
//! suggestions and resume extraction from PDF text.

use serde::Deserialize;
use uuid::Uuid;

use crate::ai::{prompts, GeminiClient, GeminiError};
use crate::models::resume::{
    Course, Education, Experience, LanguageSkill, PersonalInfo, ResumeData,
};

/// Rewrites free text into a more professional register.
pub async fn enhance_text(client: &GeminiClient, text: &str) -> Result<String, GeminiError> {
    client.call_text(text, prompts::ENHANCE_SYSTEM).await
}

/// Suggests skills for a job title. An empty job title short-circuits to an
/// empty list without touching the upstream API.
pub async fn suggest_skills(
    client: &GeminiClient,
    job_title: &str,
    experience: &str,
) -> Result<Vec<String>, GeminiError> {
    if job_title.trim().is_empty() {
        return Ok(Vec::new());
    }
    let prompt = prompts::suggest_skills_prompt(job_title, experience);
    let text = client.call_text(&prompt, "").await?;
    Ok(text
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ExtractedExperience {
    job_title: String,
    company: String,
    location: String,
    start_date: String,
    end_date: String,
    description: String,
}

impl ExtractedExperience {
    fn into_experience(self) -> Experience {
        Experience {
            id: Uuid::new_v4().to_string(),
            job_title: self.job_title,
            company: self.company,
            location: self.location,
            start_date: self.start_date,
            // The source document leaves ongoing jobs blank.
            end_date: if self.end_date.trim().is_empty() {
                "Atual".to_string()
            } else {
                self.end_date
            },
            description: self.description,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WorkHistoryEnvelope {
    #[serde(default)]
    experiences: Vec<ExtractedExperience>,
}

/// Extracts work-history entries from the text of a Carteira de Trabalho
/// Digital PDF. Each entry gets a fresh id.
pub async fn extract_work_history(
    client: &GeminiClient,
    full_text: &str,
) -> Result<Vec<Experience>, GeminiError> {
    let prompt = prompts::extract_work_history_prompt(full_text);
    let envelope: WorkHistoryEnvelope = client.call_json(&prompt, "").await?;
    Ok(envelope
        .experiences
        .into_iter()
        .map(ExtractedExperience::into_experience)
        .collect())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ExtractedEducation {
    degree: String,
    institution: String,
    start_date: String,
    end_date: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ExtractedCourse {
    name: String,
    institution: String,
    completion_date: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ExtractedLanguage {
    language: String,
    proficiency: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ExtractedResume {
    personal_info: Option<PersonalInfo>,
    summary: Option<String>,
    experiences: Vec<ExtractedExperience>,
    education: Vec<ExtractedEducation>,
    courses: Vec<ExtractedCourse>,
    languages: Vec<ExtractedLanguage>,
    skills: Vec<String>,
}

/// Extracts a whole resume from arbitrary resume text. Items get fresh ids;
/// fields the model could not find stay at their defaults.
pub async fn extract_resume(
    client: &GeminiClient,
    resume_text: &str,
) -> Result<ResumeData, GeminiError> {
    let prompt = prompts::extract_resume_prompt(resume_text);
    let extracted: ExtractedResume = client.call_json(&prompt, "").await?;

    Ok(ResumeData {
        personal_info: extracted.personal_info.unwrap_or_default(),
        summary: extracted.summary.unwrap_or_default(),
        experiences: extracted
            .experiences
            .into_iter()
            .map(ExtractedExperience::into_experience)
            .collect(),
        education: extracted
            .education
            .into_iter()
            .map(|e| Education {
                id: Uuid::new_v4().to_string(),
                degree: e.degree,
                institution: e.institution,
                start_date: e.start_date,
                end_date: e.end_date,
            })
            .collect(),
        courses: extracted
            .courses
            .into_iter()
            .map(|c| Course {
                id: Uuid::new_v4().to_string(),
                name: c.name,
                institution: c.institution,
                completion_date: c.completion_date,
            })
            .collect(),
        languages: extracted
            .languages
            .into_iter()
            .map(|l| LanguageSkill {
                id: Uuid::new_v4().to_string(),
                language: l.language,
                proficiency: l.proficiency,
            })
            .collect(),
        skills: extracted.skills,
        ..Default::default()
    })
}
