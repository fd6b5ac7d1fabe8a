//! Per-field tokenization policy for the CPE index.
//!
//! Two strategies cover every field:
//! - `doc_key` keeps Tantivy's built-in `raw` strategy: whole-value equality.
//! - `vendor` and `product` use the fragment strategy registered here:
//!   lowercased trigrams with consecutive positions, so partial input like
//!   "strut" matches an indexed "Struts" by fragment containment.
//!
//! The strategy is registered on the `Index` itself, which makes the build
//! path and the query parser resolve the identical tokenizer. Adding a field
//! with a new strategy means updating both the schema and this module.

use tantivy::tokenizer::{
    LowerCaser, NgramTokenizer, TextAnalyzer, Token, TokenFilter, TokenStream, Tokenizer,
};
use tantivy::Index;

use crate::SearchError;

/// Registered name of the fragmenting strategy for vendor/product fields.
pub const FRAGMENT_TOKENIZER: &str = "fragment";

/// Fragment size. Query terms shorter than this produce no fragments and
/// cannot match.
const FRAGMENT_GRAM_SIZE: usize = 3;

/// Token filter assigning consecutive positions to fragments.
///
/// NgramTokenizer emits every fragment at position 0; with consecutive
/// positions instead, a multi-fragment query term becomes a phrase query
/// that only matches contiguous fragment runs, i.e. substring containment.
#[derive(Clone)]
struct FragmentPositionFilter;

impl TokenFilter for FragmentPositionFilter {
    type Tokenizer<T: Tokenizer> = FragmentPositionTokenizer<T>;

    fn transform<T: Tokenizer>(self, tokenizer: T) -> Self::Tokenizer<T> {
        FragmentPositionTokenizer(tokenizer)
    }
}

#[derive(Clone)]
struct FragmentPositionTokenizer<T>(T);

impl<T: Tokenizer> Tokenizer for FragmentPositionTokenizer<T> {
    type TokenStream<'a> = FragmentPositionStream<T::TokenStream<'a>>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        FragmentPositionStream {
            inner: self.0.token_stream(text),
            position: 0,
        }
    }
}

struct FragmentPositionStream<T> {
    inner: T,
    position: usize,
}

impl<T: TokenStream> TokenStream for FragmentPositionStream<T> {
    fn advance(&mut self) -> bool {
        if self.inner.advance() {
            self.inner.token_mut().position = self.position;
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn token(&self) -> &Token {
        self.inner.token()
    }

    fn token_mut(&mut self) -> &mut Token {
        self.inner.token_mut()
    }
}

/// Build the fragmenting analyzer used for vendor and product fields.
pub fn fragment_analyzer() -> Result<TextAnalyzer, SearchError> {
    let analyzer = TextAnalyzer::builder(NgramTokenizer::new(
        FRAGMENT_GRAM_SIZE,
        FRAGMENT_GRAM_SIZE,
        false,
    )?)
    .filter(LowerCaser)
    .filter(FragmentPositionFilter)
    .build();
    Ok(analyzer)
}

/// Register the fragment tokenizer with an index.
///
/// Must run before any document is added and before any query is parsed
/// against the index.
pub fn register_fragment_tokenizer(index: &Index) -> Result<(), SearchError> {
    index
        .tokenizers()
        .register(FRAGMENT_TOKENIZER, fragment_analyzer()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(text: &str) -> Vec<(String, usize)> {
        let mut analyzer = fragment_analyzer().unwrap();
        let mut stream = analyzer.token_stream(text);
        let mut out = Vec::new();
        while let Some(token) = stream.next() {
            out.push((token.text.clone(), token.position));
        }
        out
    }

    #[test]
    fn test_fragments_are_lowercased_trigrams() {
        let tokens = fragments("Struts");
        let texts: Vec<&str> = tokens.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["str", "tru", "rut", "uts"]);
    }

    #[test]
    fn test_fragment_positions_are_consecutive() {
        let tokens = fragments("tomcat");
        let positions: Vec<usize> = tokens.iter().map(|(_, p)| *p).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_short_text_yields_no_fragments() {
        assert!(fragments("ab").is_empty());
    }

    #[test]
    fn test_determinism() {
        assert_eq!(fragments("OpenSSL"), fragments("OpenSSL"));
    }

    #[test]
    fn test_register_on_index() {
        let schema = crate::schema::build_cpe_schema();
        let index = Index::create_in_ram(schema.schema().clone());
        register_fragment_tokenizer(&index).unwrap();
        assert!(index.tokenizers().get(FRAGMENT_TOKENIZER).is_some());
    }
}
