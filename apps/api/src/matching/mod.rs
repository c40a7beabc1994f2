// Matching core: ranks the candidate corpus against an uploaded resume by
// embedding similarity. All embedding calls go through the Embedder trait —
// no direct Ollama calls here.

pub mod handlers;
pub mod ranker;
pub mod resume_score;
pub mod similarity;
