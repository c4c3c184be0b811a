use std::fmt;

/// Comparison operator of a `where[field][op]=value` constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equals,
    NotEquals,
    Like,
    Contains,
    In,
    Exists,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Like => "like",
            Self::Contains => "contains",
            Self::In => "in",
            Self::Exists => "exists",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: String,
}

/// Describes which collection to list and how to constrain it.
/// Page size and page number are owned by the fetcher, not the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    pub collection: String,
    pub filters: Vec<Filter>,
    pub depth: Option<u8>,
    pub locale: Option<String>,
    pub fallback_locale: Option<String>,
}

impl CollectionQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            depth: None,
            locale: None,
            fallback_locale: None,
        }
    }

    pub fn filter(mut self, field: impl Into<String>, op: FilterOp, value: impl Into<String>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            op,
            value: value.into(),
        });
        self
    }

    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn locale(mut self, locale: impl Into<String>, fallback: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self.fallback_locale = Some(fallback.into());
        self
    }

    /// Query-string pairs, excluding `limit` and `page`
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|f| (format!("where[{}][{}]", f.field, f.op), f.value.clone()))
            .collect();

        if let Some(depth) = self.depth {
            params.push(("depth".into(), depth.to_string()));
        }
        if let Some(locale) = &self.locale {
            params.push(("locale".into(), locale.clone()));
        }
        if let Some(fallback) = &self.fallback_locale {
            params.push(("fallback-locale".into(), fallback.clone()));
        }

        params
    }
}

impl fmt::Display for CollectionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection)?;
        for filter in &self.filters {
            write!(f, " [{} {} {}]", filter.field, filter.op, filter.value)?;
        }
        Ok(())
    }
}
