//! Prompt texts sent to the model.

use study_core::model::QuestionCount;

fn with_source(instructions: &str, text: &str) -> String {
    format!("{instructions}\n\nText:\n\"\"\"{text}\"\"\"")
}

#[must_use]
pub fn mcq(text: &str, count: QuestionCount) -> String {
    with_source(
        &format!(
            "Based on the following text, generate a challenging quiz of {count} multiple-choice \
             questions in English. Each question must have exactly 4 options. Ensure the answer \
             provided for each question is one of the options. Focus on the key concepts, \
             definitions, and objectives presented in the text."
        ),
        text,
    )
}

#[must_use]
pub fn summary(text: &str) -> String {
    with_source(
        "Summarize the following text into concise, easy-to-understand bullet points. Focus on \
         the main ideas and critical information.",
        text,
    )
}

#[must_use]
pub fn flashcards(text: &str) -> String {
    with_source(
        "From the following text, generate a set of flashcards. Each flashcard should represent \
         a key term, concept, or important fact. Provide a clear and concise definition for each \
         term.",
        text,
    )
}

const STUDY_NOTE_INSTRUCTIONS: &str = r#"You are an expert graphic designer and academic publisher. Your task is to transform raw text into a visually stunning, professional textbook chapter. You must return a JSON object containing two keys: "htmlContent" and "cssStyles".

**1. "cssStyles" Generation**:
- Design a complete, modern, and cohesive CSS stylesheet.
- Choose a professional color palette. Define these as CSS variables.
- Select elegant, readable fonts.
- Style all elements for a premium feel within a container ID'd as '#study-note-content'.

**2. "htmlContent" Generation**:
- Full semantic HTML for the chapter body. Restructure and format for a professional audience.
- Identify key concepts for visual aids using: `<div class="image-placeholder" data-prompt="..."></div>`.

Transform the following text:
"#;

#[must_use]
pub fn study_note(text: &str) -> String {
    with_source(STUDY_NOTE_INSTRUCTIONS, text)
}

/// Wraps a placeholder's subject in the illustration style.
#[must_use]
pub fn image(subject: &str) -> String {
    format!(
        "A professional 3D render of an educational diagram, minimalist style, on a clean \
         background, illustrating: {subject}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mcq_prompt_names_count_and_wraps_text() {
        let prompt = mcq("Cells divide.", QuestionCount::new(30).unwrap());
        assert!(prompt.contains("a challenging quiz of 30 multiple-choice questions"));
        assert!(prompt.ends_with("\n\nText:\n\"\"\"Cells divide.\"\"\""));
    }

    #[test]
    fn study_note_prompt_mentions_placeholders() {
        let prompt = study_note("body");
        assert!(prompt.contains(r#"<div class="image-placeholder" data-prompt="..."></div>"#));
        assert!(prompt.contains("Transform the following text:\n\n\nText:\n\"\"\"body\"\"\""));
    }

    #[test]
    fn image_prompt_keeps_subject() {
        assert!(image("mitosis phases").ends_with("illustrating: mitosis phases"));
    }
}
