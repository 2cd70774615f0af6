//! Item placement state for a sorting exercise.
//!
//! Each item is either in the source pool (`Unplaced`) or in exactly one
//! category bucket (`PlacedIn`). Bucket contents plus the pool always equal
//! the exercise's item list: nothing is duplicated, nothing is lost.

use crate::error::LessonError;
use crate::example::InteractiveExample;
use crate::validate::{Assignment, SolutionReport, check_solution, evaluate};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "category", rename_all = "snake_case")]
pub enum ItemLocation {
    Unplaced,
    PlacedIn(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    items: Vec<String>,
    categories: Vec<String>,
    pool: Vec<String>,
    buckets: Assignment,
}

impl Placement {
    /// Start state: every item unplaced, every declared category empty.
    ///
    /// Repeated item labels or category names collapse to their first
    /// occurrence; a label identifies an item.
    pub fn new<I, C>(items: I, categories: C) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let items = dedup(items.into_iter().map(Into::into));
        let categories = dedup(categories.into_iter().map(Into::into));
        let buckets = categories
            .iter()
            .map(|c| (c.clone(), Vec::new()))
            .collect();
        Self {
            pool: items.clone(),
            items,
            categories,
            buckets,
        }
    }

    pub fn for_exercise(example: &InteractiveExample) -> Self {
        Self::new(example.items.iter().cloned(), example.category_names())
    }

    /// Move `item` into `category`, taking it out of wherever it was.
    pub fn place(&mut self, item: &str, category: &str) -> Result<(), LessonError> {
        if !self.items.iter().any(|i| i == item) {
            return Err(LessonError::UnknownItem(item.to_string()));
        }
        if !self.buckets.contains_key(category) {
            return Err(LessonError::UnknownCategory(category.to_string()));
        }

        self.take(item);
        if let Some(bucket) = self.buckets.get_mut(category) {
            bucket.push(item.to_string());
        }
        Ok(())
    }

    /// Return `item` to the pool. Already-unplaced items are left alone.
    pub fn unplace(&mut self, item: &str) -> Result<(), LessonError> {
        if !self.items.iter().any(|i| i == item) {
            return Err(LessonError::UnknownItem(item.to_string()));
        }
        if self.pool.iter().any(|i| i == item) {
            return Ok(());
        }
        self.take(item);
        self.pool.push(item.to_string());
        Ok(())
    }

    fn take(&mut self, item: &str) {
        self.pool.retain(|i| i != item);
        for bucket in self.buckets.values_mut() {
            bucket.retain(|i| i != item);
        }
    }

    pub fn location(&self, item: &str) -> Option<ItemLocation> {
        if self.pool.iter().any(|i| i == item) {
            return Some(ItemLocation::Unplaced);
        }
        self.buckets
            .iter()
            .find(|(_, bucket)| bucket.iter().any(|i| i == item))
            .map(|(category, _)| ItemLocation::PlacedIn(category.clone()))
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Declared categories in authored order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn unplaced(&self) -> &[String] {
        &self.pool
    }

    pub fn bucket(&self, category: &str) -> Option<&[String]> {
        self.buckets.get(category).map(Vec::as_slice)
    }

    pub fn assignment(&self) -> &Assignment {
        &self.buckets
    }

    /// True once no item remains in the pool.
    pub fn is_complete(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn check(&self, expected: &Assignment) -> Result<bool, LessonError> {
        check_solution(&self.buckets, expected, self.pool.len())
    }

    /// Detailed comparison, available even while items remain unplaced.
    pub fn report(&self, expected: &Assignment) -> SolutionReport {
        evaluate(&self.buckets, expected)
    }
}

fn dedup(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values.filter(|v| seen.insert(v.clone())).collect()
}
