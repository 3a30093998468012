// Text normalization: lowercase → strip punctuation → tokenize → stopwords → stem.
// Every lexical scorer consumes the token stream produced here.

pub mod normalizer;
pub mod stemmer;
pub mod stopwords;

pub use normalizer::{clean_text, normalize, normalize_opt};
