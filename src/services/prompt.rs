/// Instructions placed ahead of the resume text.
pub const REVIEW_INSTRUCTIONS: &str = "You are an AI resume reviewer. Analyze the following resume context \
and give:\n\
1. An overall score out of 10\n\
2. A brief summary of strengths\n\
3. A bullet list of improvement suggestions\n\n\
Resume context:\n";

/// The single text payload sent to the review model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Appends the extracted text verbatim; no trimming or size cap.
    pub fn for_resume(resume_text: &str) -> Self {
        let mut prompt = String::with_capacity(REVIEW_INSTRUCTIONS.len() + resume_text.len());
        prompt.push_str(REVIEW_INSTRUCTIONS);
        prompt.push_str(resume_text);
        Prompt(prompt)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
