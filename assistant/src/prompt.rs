//! Prompt builder: fixed system instruction + delimited context block.

/// System instructions for grounded answers.
///
/// The model must answer only from the supplied context and say so plainly when
/// the context does not cover the question.
pub const SYSTEM_PROMPT: &str = "\
You are an AI onboarding assistant for a new employee.
Answer the question based *only* on the company context provided by the user message.
Do not use outside knowledge and do not invent policies, numbers, names or dates.
If the answer cannot be found in the context, clearly state that you don't have that \
information based on the provided documents.";

const CONTEXT_FENCE: &str = "---";

/// Build the user prompt with the context fenced off from the question.
///
/// # Example
/// ```
/// use assistant::prompt::build_user_prompt;
///
/// let p = build_user_prompt("PTO policy: 20 days/year.", "How many PTO days?");
/// assert!(p.contains("Company Context:"));
/// assert!(p.ends_with("Answer:"));
/// ```
pub fn build_user_prompt(context: &str, question: &str) -> String {
    let mut out = String::with_capacity(context.len() + question.len() + 256);
    out.push_str(
        "Answer the following question based *only* on the company context below. \
         If the answer cannot be found in the context, clearly state that you don't have \
         that information based on the provided documents.\n\n",
    );
    out.push_str("Company Context:\n");
    out.push_str(CONTEXT_FENCE);
    out.push('\n');
    out.push_str(context.trim());
    out.push('\n');
    out.push_str(CONTEXT_FENCE);
    out.push_str("\n\nQuestion: ");
    out.push_str(question.trim());
    out.push_str("\n\nAnswer:");
    out
}
