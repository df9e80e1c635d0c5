//! Defines the category store trait.

use crate::{
    DatabaseID, Error,
    models::{Category, NewCategory},
};

/// Creates and retrieves the categories that classify transactions and budgets.
pub trait CategoryStore {
    /// Create a new category and add it to the store.
    fn create(&mut self, new_category: NewCategory) -> Result<Category, Error>;

    /// Get a category by its ID.
    fn get(&self, category_id: DatabaseID) -> Result<Category, Error>;

    /// Get all categories.
    fn get_all(&self) -> Result<Vec<Category>, Error>;

    /// Replace the category with `category_id` with `new_category`.
    fn update(&mut self, category_id: DatabaseID, new_category: NewCategory)
    -> Result<Category, Error>;

    /// Remove the category with `category_id` from the store.
    fn delete(&mut self, category_id: DatabaseID) -> Result<(), Error>;
}
