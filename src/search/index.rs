use unidecode::unidecode;

pub type Token = String;
pub type Tokenizer = fn(&str) -> Vec<Token>;
pub type Accessor<T> = fn(&T) -> String;

/// Lowercased, ascii-folded whitespace tokens.
pub fn fold_tokens(s: &str) -> Vec<Token> {
    unidecode(s)
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect()
}

#[derive(Clone, Debug)]
pub struct QueryResult {
    pub id: usize,
    pub score: f64,
}

/// In-memory document index queried through a pluggable `Scorer`.
pub struct Index<T> {
    documents: Vec<T>,
    tokens: Vec<Vec<Token>>,
    tokenizer: Tokenizer,
    accessor: Accessor<T>,
    avg_doc_len: f64,
}

impl<T> Index<T> {
    pub fn from(documents: Vec<T>, tokenizer: Tokenizer, accessor: Accessor<T>) -> Self {
        let tokens = documents
            .iter()
            .map(|d| tokenizer(&accessor(d)))
            .collect::<Vec<_>>();
        let mut index = Index {
            documents,
            tokens,
            tokenizer,
            accessor,
            avg_doc_len: 0.0,
        };
        index.recalc_avg_document_len();
        index
    }

    pub fn add_document(&mut self, doc: T) {
        self.tokens.push((self.tokenizer)(&(self.accessor)(&doc)));
        self.documents.push(doc);
        self.recalc_avg_document_len();
    }

    fn recalc_avg_document_len(&mut self) {
        let total: usize = self.tokens.iter().map(|t| t.len()).sum();
        self.avg_doc_len = if self.tokens.is_empty() {
            0.0
        } else {
            total as f64 / self.tokens.len() as f64
        };
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn document(&self, id: usize) -> &T {
        &self.documents[id]
    }

    pub fn query(&self, query: &str, scorer: impl Scorer<T>) -> Vec<QueryResult> {
        scorer.score(query, self)
    }
}

pub trait Scorer<T> {
    fn score(self, query: &str, index: &Index<T>) -> Vec<QueryResult>;
}

pub struct Bm25 {
    k: f64,
    b: f64,
}

impl Bm25 {
    pub fn new() -> Self {
        Bm25 { k: 1.5, b: 0.75 }
    }

    pub fn with_params(k: f64, b: f64) -> Self {
        Bm25 { k, b }
    }
}

impl Default for Bm25 {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scorer<T> for Bm25 {
    fn score(self, query: &str, index: &Index<T>) -> Vec<QueryResult> {
        let keywords = (index.tokenizer)(query);
        let mut scores = vec![QueryResult { id: 0, score: 0.0 }; index.len()];
        for keyword in keywords {
            let n_qi = index
                .tokens
                .iter()
                .filter(|doc| doc.iter().any(|token| *token == keyword))
                .count() as f64;
            let idf = ((index.len() as f64 - n_qi + 0.5) / (n_qi + 0.5) + 1.0).ln();
            for (i, document) in index.tokens.iter().enumerate() {
                let tf = document.iter().filter(|token| **token == keyword).count() as f64;
                let dl = document.len() as f64;
                let partial = idf * (tf * (self.k + 1.0))
                    / (tf + self.k * (1.0 - self.b + self.b * dl / index.avg_doc_len));
                scores[i].id = i;
                scores[i].score += partial;
            }
        }
        let mut scores = scores
            .into_iter()
            .filter(|result| result.score > 0.0)
            .collect::<Vec<_>>();
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(s: &String) -> String {
        s.clone()
    }

    #[test]
    fn folds_tokens() {
        assert_eq!(fold_tokens("Caffè  al\tVolo"), ["caffe", "al", "volo"]);
    }

    #[test]
    fn ranks_matching_document_first() {
        let docs = vec![
            "the quick brown fox".to_owned(),
            "lazy dogs sleep all day".to_owned(),
            "a fox and another fox".to_owned(),
        ];
        let index = Index::from(docs, fold_tokens, identity);
        let results = index.query("fox", Bm25::new());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 2);
        assert_eq!(results[1].id, 0);
        assert!(results[0].score > results[1].score);
        assert_eq!(index.document(results[0].id), "a fox and another fox");
    }

    #[test]
    fn no_match_means_no_results() {
        let index = Index::from(vec!["some words".to_owned()], fold_tokens, identity);
        assert!(index.query("absent", Bm25::new()).is_empty());
    }

    #[test]
    fn added_documents_are_queryable() {
        let mut index = Index::from(Vec::new(), fold_tokens, identity);
        assert!(index.is_empty());
        index.add_document("freshly added words".to_owned());
        assert_eq!(index.len(), 1);
        let results = index.query("added", Bm25::new());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 0);
    }
}
