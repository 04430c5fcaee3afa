use study_core::model::Flashcard;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardVm {
    pub number: usize,
    pub term: String,
    pub definition: String,
}

#[must_use]
pub fn map_flashcards(cards: &[Flashcard]) -> Vec<FlashcardVm> {
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| FlashcardVm {
            number: i + 1,
            term: card.term().to_owned(),
            definition: card.definition().to_owned(),
        })
        .collect()
}
