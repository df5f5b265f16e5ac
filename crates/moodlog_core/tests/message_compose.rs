use moodlog_core::{
    build_prompt, quotes, MessageComposer, MoodLabel, PrimarySource, ServiceError, TextGenerator,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;

struct RecordingGenerator {
    reply: Result<String, ServiceError>,
    calls: RefCell<Vec<(String, usize)>>,
}

impl RecordingGenerator {
    fn new(reply: Result<String, ServiceError>) -> Self {
        Self {
            reply,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl TextGenerator for RecordingGenerator {
    fn generate(&self, prompt: &str, max_length: usize) -> Result<String, ServiceError> {
        self.calls
            .borrow_mut()
            .push((prompt.to_string(), max_length));
        self.reply.clone()
    }
}

#[test]
fn generated_text_becomes_primary_with_one_call() {
    let generator = RecordingGenerator::new(Ok(" Keep going, gently. ".to_string()));
    let message = MessageComposer::default().compose(MoodLabel::Tired, Some(&generator));

    assert_eq!(message.primary, "Keep going, gently.");
    assert_eq!(message.source, PrimarySource::Generated);
    assert!(quotes().contains(&message.secondary.as_str()));

    let calls = generator.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, build_prompt(MoodLabel::Tired));
    assert_eq!(calls[0].1, 40);
}

#[test]
fn failing_generator_falls_back_to_quote() {
    let generator =
        RecordingGenerator::new(Err(ServiceError::Failed("model crashed".to_string())));
    let message = MessageComposer::default().compose(MoodLabel::Sad, Some(&generator));

    assert_eq!(message.source, PrimarySource::Fallback);
    assert!(quotes().contains(&message.primary.as_str()));
    assert!(quotes().contains(&message.secondary.as_str()));
    assert_eq!(generator.calls.borrow().len(), 1);
}

#[test]
fn blank_generation_falls_back_to_quote() {
    let generator = RecordingGenerator::new(Ok("   ".to_string()));
    let message = MessageComposer::default().compose(MoodLabel::Angry, Some(&generator));

    assert_eq!(message.source, PrimarySource::Fallback);
    assert!(quotes().contains(&message.primary.as_str()));
}

#[test]
fn without_generator_both_parts_are_quotes() {
    let message = MessageComposer::default().compose(MoodLabel::Neutral, None);

    assert_eq!(message.source, PrimarySource::QuoteBank);
    assert!(quotes().contains(&message.primary.as_str()));
    assert!(quotes().contains(&message.secondary.as_str()));
}

#[test]
fn closures_work_as_generators_and_see_custom_max_length() {
    let generator = |prompt: &str, max_length: usize| -> Result<String, ServiceError> {
        Ok(format!("{max_length}:{}", prompt.len()))
    };
    let message = MessageComposer::new(12).compose(MoodLabel::Happy, Some(&generator));

    assert!(message.primary.starts_with("12:"));
}

#[test]
fn seeded_rng_makes_quote_choice_reproducible() {
    let composer = MessageComposer::default();
    let mut first_rng = StdRng::seed_from_u64(42);
    let mut second_rng = StdRng::seed_from_u64(42);
    let first = composer.compose_with(MoodLabel::Stressed, None, &mut first_rng);
    let second = composer.compose_with(MoodLabel::Stressed, None, &mut second_rng);

    assert_eq!(first, second);
}
