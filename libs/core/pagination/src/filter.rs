use serde::Deserialize;
use utoipa::IntoParams;

/// Optional `nome` filter shared by the category and product listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameFilter {
    /// Case-insensitive substring of the name
    #[param(example = "bebida")]
    pub nome: Option<String>,
}

impl NameFilter {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            nome: Some(term.into()),
        }
    }

    /// The trimmed search term; blank terms mean no filter
    pub fn term(&self) -> Option<&str> {
        self.nome
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub fn matches(&self, name: &str) -> bool {
        match self.term() {
            Some(term) => name.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        }
    }

    /// `LIKE` pattern for the term with `%`, `_` and `\` escaped
    pub fn like_pattern(&self) -> Option<String> {
        self.term().map(|term| {
            let mut pattern = String::with_capacity(term.len() + 2);
            pattern.push('%');
            for c in term.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}
