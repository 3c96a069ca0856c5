// Prompt constants for live resume feedback.

/// System prompt for the resume reviewer.
pub const FEEDBACK_SYSTEM: &str = "You are an expert technical recruiter and ATS (Applicant Tracking System) \
    specialist. You review resumes against job descriptions and give direct, \
    actionable feedback in plain text.";

/// Feedback prompt template. Replace `{resume_text}` and `{jd_text}` before sending.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"Compare the following resume with the job description.

Provide:
1. Match percentage
2. Missing skills
3. Resume improvement suggestions
4. Rewrite 2 bullet points professionally

Resume:
{resume_text}

Job Description:
{jd_text}
"#;

/// Fixed feedback returned when no LLM is configured.
pub const STUB_FEEDBACK: &str = "AI Feedback:\n\
    - Your resume matches the job description well.\n\
    - Consider adding more cloud and deployment-related skills.\n\
    - Improve bullet points with measurable impact.\n\
    - Overall profile is suitable for entry-level roles.";

/// Embeds both texts verbatim into the feedback template.
pub fn build_feedback_prompt(resume_text: &str, jd_text: &str) -> String {
    // Substitute the JD first so a literal "{jd_text}" inside the resume survives.
    FEEDBACK_PROMPT_TEMPLATE
        .replace("{jd_text}", jd_text)
        .replacen("{resume_text}", resume_text, 1)
}
