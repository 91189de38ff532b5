/// A generation service response containing five cards, shaped the way the
/// service returns them (no ids, capitalised difficulty on one entry).
pub fn flashcards_fixture() -> &'static str {
    return r#"
[
  {
    "prompt": "What is the capital of France?",
    "answer": "Paris",
    "category": "Geography",
    "difficulty": "easy"
  },
  {
    "prompt": "Which planet is known as the red planet?",
    "answer": "Mars",
    "category": "Astronomy",
    "difficulty": "easy"
  },
  {
    "prompt": "What is the chemical symbol for gold?",
    "answer": "Au",
    "category": "Chemistry",
    "difficulty": "Medium"
  },
  {
    "prompt": "Who wrote 'Don Quixote'?",
    "answer": "Miguel de Cervantes",
    "category": "Literature",
    "difficulty": "medium"
  },
  {
    "prompt": "What is the derivative of sin(x)?",
    "answer": "cos(x)",
    "category": "Mathematics",
    "difficulty": "hard"
  }
]
"#
    .trim();
}

pub fn text_document_fixture() -> &'static str {
    return r#"
Photosynthesis is the process used by plants, algae and certain bacteria to convert light energy into chemical energy. It takes place mainly in the chloroplasts of leaf cells, where chlorophyll absorbs sunlight. The overall reaction combines carbon dioxide and water to produce glucose and oxygen.
"#
    .trim();
}
