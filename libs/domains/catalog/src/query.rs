//! Filter predicates and the product listing composer.
//!
//! A [`Predicate`] is a store-agnostic filter tree. The MongoDB adapter
//! translates it into a filter document, the in-memory adapter evaluates it with
//! [`Predicate::matches`]; both treat [`Predicate::Contains`] as a
//! case-insensitive literal substring match.

use uuid::Uuid;

/// A filterable field of one record type.
pub trait Field: Copy + std::fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Stored field name
    fn name(self) -> &'static str;
}

/// Field access used by in-memory evaluation.
pub trait Record<F: Field> {
    fn text(&self, field: F) -> Option<&str>;
    fn reference(&self, field: F) -> Option<Uuid>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Id,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubCategoryField {
    Id,
    Name,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Id,
    Name,
    Description,
    Category,
    SubCategory,
}

impl Field for CategoryField {
    fn name(self) -> &'static str {
        match self {
            CategoryField::Id => "_id",
            CategoryField::Name => "name",
        }
    }
}

impl Field for SubCategoryField {
    fn name(self) -> &'static str {
        match self {
            SubCategoryField::Id => "_id",
            SubCategoryField::Name => "name",
            SubCategoryField::Category => "category",
        }
    }
}

impl Field for ProductField {
    fn name(self) -> &'static str {
        match self {
            ProductField::Id => "_id",
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::Category => "category",
            ProductField::SubCategory => "subCategory",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<F> {
    /// Matches every record
    True,
    /// Case-insensitive substring match on a text field
    Contains { field: F, needle: String },
    /// Reference field equals the id
    Equals { field: F, id: Uuid },
    /// Reference field is one of the ids; an empty list matches nothing
    In { field: F, ids: Vec<Uuid> },
    /// All clauses match; empty is always true
    And(Vec<Predicate<F>>),
    /// Any clause matches; empty is always false
    Or(Vec<Predicate<F>>),
}

impl<F: Field> Predicate<F> {
    pub fn contains(field: F, needle: impl Into<String>) -> Self {
        Predicate::Contains {
            field,
            needle: needle.into(),
        }
    }

    pub fn eq(field: F, id: Uuid) -> Self {
        Predicate::Equals { field, id }
    }

    pub fn one_of(field: F, ids: Vec<Uuid>) -> Self {
        Predicate::In { field, ids }
    }

    /// Conjunction that drops `True` operands and flattens nested `And`s.
    pub fn and(self, other: Predicate<F>) -> Self {
        match (self, other) {
            (Predicate::True, p) | (p, Predicate::True) => p,
            (Predicate::And(mut left), Predicate::And(right)) => {
                left.extend(right);
                Predicate::And(left)
            }
            (Predicate::And(mut left), p) => {
                left.push(p);
                Predicate::And(left)
            }
            (p, Predicate::And(mut right)) => {
                right.insert(0, p);
                Predicate::And(right)
            }
            (left, right) => Predicate::And(vec![left, right]),
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Predicate::True)
    }

    pub fn matches<R: Record<F>>(&self, record: &R) -> bool {
        match self {
            Predicate::True => true,
            Predicate::Contains { field, needle } => record
                .text(*field)
                .is_some_and(|value| contains_ignore_case(value, needle)),
            Predicate::Equals { field, id } => record.reference(*field) == Some(*id),
            Predicate::In { field, ids } => record
                .reference(*field)
                .is_some_and(|value| ids.contains(&value)),
            Predicate::And(clauses) => clauses.iter().all(|p| p.matches(record)),
            Predicate::Or(clauses) => clauses.iter().any(|p| p.matches(record)),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Optional parameters of a product listing, already parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    pub sub_category_id: Option<Uuid>,
}

impl ProductQuery {
    /// The trimmed search text, or `None` when it is blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// Ids of categories and subcategories whose names matched the search text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchMatches {
    pub category_ids: Vec<Uuid>,
    pub subcategory_ids: Vec<Uuid>,
}

/// Name lookup used to resolve the search text against categories and
/// subcategories before composing the product filter.
pub fn name_search<F: Field>(field: F, term: &str) -> Predicate<F> {
    Predicate::contains(field, term)
}

/// Build the product filter.
///
/// With a search term: name or description contains it, or the product's
/// category/subcategory is among `matches`. `category_id` and
/// `sub_category_id` are ANDed on as equality clauses. No parameters yields
/// [`Predicate::True`].
pub fn compose_product_filter(
    query: &ProductQuery,
    matches: &SearchMatches,
) -> Predicate<ProductField> {
    let mut filter = Predicate::True;

    if let Some(term) = query.search_term() {
        filter = filter.and(Predicate::Or(vec![
            Predicate::contains(ProductField::Name, term),
            Predicate::contains(ProductField::Description, term),
            Predicate::one_of(ProductField::Category, matches.category_ids.clone()),
            Predicate::one_of(ProductField::SubCategory, matches.subcategory_ids.clone()),
        ]));
    }

    if let Some(id) = query.category_id {
        filter = filter.and(Predicate::eq(ProductField::Category, id));
    }

    if let Some(id) = query.sub_category_id {
        filter = filter.and(Predicate::eq(ProductField::SubCategory, id));
    }

    filter
}

/// Subcategory listing filter: everything, or the children of one category.
pub fn compose_subcategory_filter(category_id: Option<Uuid>) -> Predicate<SubCategoryField> {
    match category_id {
        Some(id) => Predicate::eq(SubCategoryField::Category, id),
        None => Predicate::True,
    }
}
