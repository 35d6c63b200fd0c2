mod stop_words;
mod tokenizer;
mod vectorizer;

pub use tokenizer::Tokenizer;
pub use vectorizer::TfidfVectorizer;
