// Prompt constants and builders for the recommendation gateway.

use serde::Serialize;

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, LANGUAGE_INSTRUCTION};
use crate::models::candidate::Candidate;
use crate::models::job::{ExperienceLevel, Job};

const JOB_DESCRIPTION_PREVIEW: usize = 200;
const JOB_BRIEF_PREVIEW: usize = 300;
const CANDIDATE_EXPERIENCE_PREVIEW: usize = 100;

pub const JOB_RECOMMENDATION_ROLE: &str = "You are an expert recruitment advisor. \
    Analyse the candidate profile and recommend the jobs that fit it best.";

pub const CANDIDATE_RECOMMENDATION_ROLE: &str = "You are an AI recruitment specialist. \
    Analyse the open position and recommend the candidates that fit it best.";

pub const COURSE_RECOMMENDATION_ROLE: &str = "You are a career development expert. \
    Recommend courses that raise the candidate's skills and employability.";

pub const JOB_RECOMMENDATION_TEMPLATE: &str = r#"Candidate profile:
- Skills: {skills}
- Experience: {experience}
- Desired position: {desired_position}
- Location: {location}

Open jobs:
{jobs}

Recommend the TOP 3 jobs from the list above that best match the candidate and explain why.
Only use job ids that appear in the list.

Return a JSON object with this EXACT schema:
{
  "recommendations": [
    {
      "job_id": "id",
      "title": "job title",
      "match_percentage": 85,
      "reasons": ["reason 1", "reason 2"],
      "tips": "advice to improve the candidate's chances"
    }
  ]
}"#;

pub const CANDIDATE_RECOMMENDATION_TEMPLATE: &str = r#"Open position:
- Title: {title}
- Description: {description}
- Requirements: {requirements}
- Level: {experience_level}

Candidates:
{candidates}

Recommend the TOP 3 candidates from the list above for this position.
Only use candidate ids that appear in the list.

Return a JSON object with this EXACT schema:
{
  "recommendations": [
    {
      "candidate_id": "id",
      "match_percentage": 90,
      "strengths": ["strength 1", "strength 2"],
      "concerns": ["point to verify"],
      "interview_tips": "interview suggestions"
    }
  ]
}"#;

pub const COURSE_RECOMMENDATION_TEMPLATE: &str = r#"Candidate profile:
- Current skills: {skills}
- Experience: {experience}
- Desired position: {desired_position}

Recommend courses that:
1. Deepen the candidate's current skills
2. Teach new skills needed for the desired position
3. Keep up with industry trends

Return a JSON object with this EXACT schema:
{
  "courses": [
    {
      "title": "course name",
      "provider": "provider (Coursera, Udemy, ...)",
      "duration": "duration",
      "skill_focus": "main skill",
      "career_impact": "impact on the candidate's career",
      "priority": "high"
    }
  ]
}
"priority" must be one of "high", "medium", "low"."#;

/// Full system prompt for a recommendation call.
pub fn system_prompt(role: &str) -> String {
    format!("{role} {JSON_ONLY_INSTRUCTION} {LANGUAGE_INSTRUCTION}")
}

#[derive(Debug, Serialize)]
struct JobSummary<'a> {
    id: &'a str,
    title: &'a str,
    description: String,
    requirements: &'a [String],
    location: &'a str,
    experience_level: &'a ExperienceLevel,
}

#[derive(Debug, Serialize)]
struct CandidateSummary<'a> {
    id: &'a str,
    skills: &'a [String],
    experience: String,
    desired_position: &'a str,
    location: &'a str,
}

pub fn job_recommendation_prompt(
    candidate: &Candidate,
    jobs: &[Job],
) -> Result<String, serde_json::Error> {
    let summaries: Vec<JobSummary<'_>> = jobs
        .iter()
        .map(|job| JobSummary {
            id: &job.id,
            title: &job.title,
            description: preview(&job.description, JOB_DESCRIPTION_PREVIEW),
            requirements: &job.requirements,
            location: &job.location,
            experience_level: &job.experience_level,
        })
        .collect();
    let jobs_json = serde_json::to_string_pretty(&summaries)?;
    let skills = candidate.skills.join(", ");

    Ok(fill(
        JOB_RECOMMENDATION_TEMPLATE,
        &[
            ("skills", skills.as_str()),
            ("experience", candidate.experience.as_str()),
            ("desired_position", candidate.desired_position.as_str()),
            ("location", candidate.location.as_str()),
            ("jobs", jobs_json.as_str()),
        ],
    ))
}

pub fn candidate_recommendation_prompt(
    job: &Job,
    candidates: &[Candidate],
) -> Result<String, serde_json::Error> {
    let summaries: Vec<CandidateSummary<'_>> = candidates
        .iter()
        .map(|c| CandidateSummary {
            id: &c.id,
            skills: &c.skills,
            experience: preview(&c.experience, CANDIDATE_EXPERIENCE_PREVIEW),
            desired_position: &c.desired_position,
            location: &c.location,
        })
        .collect();
    let candidates_json = serde_json::to_string_pretty(&summaries)?;
    let level = serde_json::to_value(&job.experience_level)?;
    let description = preview(&job.description, JOB_BRIEF_PREVIEW);
    let requirements = job.requirements.join(", ");

    Ok(fill(
        CANDIDATE_RECOMMENDATION_TEMPLATE,
        &[
            ("title", job.title.as_str()),
            ("description", description.as_str()),
            ("requirements", requirements.as_str()),
            ("experience_level", level.as_str().unwrap_or_default()),
            ("candidates", candidates_json.as_str()),
        ],
    ))
}

pub fn course_recommendation_prompt(candidate: &Candidate) -> String {
    let skills = candidate.skills.join(", ");
    fill(
        COURSE_RECOMMENDATION_TEMPLATE,
        &[
            ("skills", skills.as_str()),
            ("experience", candidate.experience.as_str()),
            ("desired_position", candidate.desired_position.as_str()),
        ],
    )
}

/// The first `max_chars` characters of `text` followed by an ellipsis.
fn preview(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}

/// Substitutes `{name}` placeholders in a single pass. Substituted values are never
/// rescanned, so profile text containing `{jobs}` stays literal.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    'scan: while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        for (name, value) in vars {
            if let Some(after) = tail
                .strip_prefix('{')
                .and_then(|t| t.strip_prefix(*name))
                .and_then(|t| t.strip_prefix('}'))
            {
                out.push_str(value);
                rest = after;
                continue 'scan;
            }
        }
        out.push('{');
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}
