//! This file defines the `Category` type and the types needed to create a
//! category. A category classifies transactions of one type (income or
//! expense); a transaction belongs to exactly one category.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{DatabaseID, Error, models::TransactionType};

/// The name of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an error if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.is_empty() {
            Err(Error::EmptyName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty
    /// invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed palette of colors a category can be displayed with.
///
/// The client renders these as chart and badge colors, so the vocabulary is
/// closed: arbitrary color strings are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    /// #ef4444
    Red,
    /// #f97316
    Orange,
    /// #f59e0b
    Amber,
    /// #22c55e
    Green,
    /// #14b8a6
    Teal,
    /// #3b82f6
    Blue,
    /// #8b5cf6
    Violet,
    /// #ec4899
    Pink,
}

impl CategoryColor {
    /// The string stored in the database for this color.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryColor::Red => "red",
            CategoryColor::Orange => "orange",
            CategoryColor::Amber => "amber",
            CategoryColor::Green => "green",
            CategoryColor::Teal => "teal",
            CategoryColor::Blue => "blue",
            CategoryColor::Violet => "violet",
            CategoryColor::Pink => "pink",
        }
    }

    /// The CSS hex code for this color.
    pub fn hex(&self) -> &'static str {
        match self {
            CategoryColor::Red => "#ef4444",
            CategoryColor::Orange => "#f97316",
            CategoryColor::Amber => "#f59e0b",
            CategoryColor::Green => "#22c55e",
            CategoryColor::Teal => "#14b8a6",
            CategoryColor::Blue => "#3b82f6",
            CategoryColor::Violet => "#8b5cf6",
            CategoryColor::Pink => "#ec4899",
        }
    }
}

impl Display for CategoryColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CategoryColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(CategoryColor::Red),
            "orange" => Ok(CategoryColor::Orange),
            "amber" => Ok(CategoryColor::Amber),
            "green" => Ok(CategoryColor::Green),
            "teal" => Ok(CategoryColor::Teal),
            "blue" => Ok(CategoryColor::Blue),
            "violet" => Ok(CategoryColor::Violet),
            "pink" => Ok(CategoryColor::Pink),
            other => Err(Error::InvalidColor(other.to_string())),
        }
    }
}

/// A category for expenses and income, e.g., 'Groceries', 'Eating Out', 'Wages'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID of the category.
    pub id: DatabaseID,
    /// The name of the category.
    pub name: CategoryName,
    /// Whether the category classifies income or expense transactions.
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    /// The display color for the category.
    pub color: CategoryColor,
    /// An optional icon identifier for the category.
    pub icon: Option<String>,
}

/// The data for creating or replacing a [Category].
///
/// The ID is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    /// The name of the category. Must not be empty.
    pub name: String,
    /// Whether the category classifies income or expense transactions.
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    /// The display color for the category.
    pub color: CategoryColor,
    /// An optional icon identifier for the category.
    pub icon: Option<String>,
}

impl NewCategory {
    /// Check and convert the raw name into a [CategoryName].
    ///
    /// # Errors
    /// This function will return an [Error::EmptyName] if the name is an
    /// empty string.
    pub fn validated_name(&self) -> Result<CategoryName, Error> {
        CategoryName::new(&self.name)
    }
}
