use super::GenerationRequest;

pub enum Action {
    Generate(GenerationRequest),
}
